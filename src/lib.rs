//! # tree_coding
//!
//! Stack-based encoding and decoding between strongly-typed Rust values and
//! dynamically shaped value trees.
//!
//! ## What is a value tree?
//!
//! A [`Value`] is the kind of structure a native dictionary/array
//! representation produces: string-keyed maps, sequences, scalars and a null
//! marker. Trees arrive from configuration loaders, JSON parsers or foreign
//! APIs; this crate turns them into typed values and back without knowing
//! their shape in advance.
//!
//! ## Key Features
//!
//! - **Container protocol**: a type's own [`Encodable`] / [`Decodable`]
//!   logic asks for keyed, unkeyed or single-value access and never needs to
//!   know where in the tree it sits
//! - **Precise errors**: every failure carries the [`CodingPath`] of the
//!   offending node and a typed [`ErrorReason`]
//! - **Safe coercion**: integers narrow only when exact, booleans and numbers
//!   never alias, non-finite floats follow a configurable strategy
//! - **Delegated encoding**: `super_encoder` writes a base representation
//!   into an already-open container
//!
//! ## Quick Start
//!
//! ```rust
//! use tree_coding::{from_tree, to_tree, tree, Decodable, Decoder, Encodable, Encoder, Result};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! impl Encodable for User {
//!     fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
//!         let mut container = encoder.container();
//!         container.encode("id", &self.id)?;
//!         container.encode("name", &self.name)?;
//!         container.encode("tags", &self.tags)
//!     }
//! }
//!
//! impl Decodable for User {
//!     fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
//!         let mut container = decoder.container()?;
//!         Ok(User {
//!             id: container.decode("id")?,
//!             name: container.decode("name")?,
//!             tags: container.decode("tags")?,
//!         })
//!     }
//! }
//!
//! let user = User { id: 7, name: "Alice".to_string(), tags: vec!["admin".to_string()] };
//!
//! let map = to_tree(&user).unwrap();
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//!
//! let tree = tree!({ "id": 7, "name": "Alice", "tags": ["admin"] });
//! let back: User = from_tree(&tree).unwrap();
//! assert_eq!(back, user);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use tree_coding::{tree, DecoderOptions, DefaultValues, TreeDecoder};
//!
//! let decoder = TreeDecoder::with_options(
//!     DecoderOptions::new().with_defaults(DefaultValues::new().insert(0u32)),
//! );
//! let count: std::collections::HashMap<String, u32> = decoder.decode(&tree!({ "a": 1 })).unwrap();
//! assert_eq!(count["a"], 1);
//! ```

mod coerce;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod ser;
pub mod traits;
pub mod value;

pub use de::{
    Decoder, KeyedDecodingContainer, SingleValueDecodingContainer, UnkeyedDecodingContainer,
};
pub use error::{Context, Error, ErrorReason, Result, TypeTag};
pub use map::Map;
pub use options::{
    DecoderOptions, DefaultValues, EncoderOptions, FloatSentinels, MissingValueStrategy,
    NonConformingFloatStrategy, UserInfo,
};
pub use path::{CodingKey, CodingPath, SUPER_KEY};
pub use ser::{
    Encoder, KeyedEncodingContainer, SingleValueEncodingContainer, UnkeyedEncodingContainer,
};
pub use traits::{Decodable, Encodable};
pub use value::{Number, Value};

use log::trace;
use std::any::type_name;

/// Decodes typed values from value trees.
///
/// Every call runs on a fresh engine; a `TreeDecoder` only carries options
/// and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct TreeDecoder {
    pub options: DecoderOptions,
}

impl TreeDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: DecoderOptions) -> Self {
        TreeDecoder { options }
    }

    /// Decodes a `T` from `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueNotFound`] if the tree yields no value (a null
    /// root for a non-optional type), or whatever error `T`'s decode logic
    /// raises.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn decode<T: Decodable>(&self, tree: &Value) -> Result<T> {
        trace!("decoding {} from {}", type_name::<T>(), tree.kind());
        let mut decoder = Decoder::new(tree, CodingPath::new(), &self.options);
        match T::unbox_value(tree, &mut decoder)? {
            Some(value) => Ok(value),
            None => Err(Error::ValueNotFound {
                expected: type_name::<T>(),
                context: Context::new(
                    CodingPath::new(),
                    "The given data did not contain a top-level value.",
                )
                .with_reason(ErrorReason::ValueNotFound {
                    tree: Some(tree.clone()),
                }),
            }),
        }
    }

    /// Decodes a `T` from a map root.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn decode_map<T: Decodable>(&self, map: &Map) -> Result<T> {
        self.decode(&Value::Map(map.clone()))
    }
}

/// Encodes typed values into value trees.
#[derive(Debug, Clone, Default)]
pub struct TreeEncoder {
    pub options: EncoderOptions,
}

impl TreeEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: EncoderOptions) -> Self {
        TreeEncoder { options }
    }

    /// Encodes `value` as a map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `value` encodes nothing or encodes
    /// as anything other than a map.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn encode<T: Encodable + ?Sized>(&self, value: &T) -> Result<Map> {
        match self.encode_value(value)? {
            Value::Map(map) => Ok(map),
            other => Err(Error::invalid_value(
                &CodingPath::new(),
                type_name::<T>(),
                format!(
                    "Top-level {} encoded as {} fragment.",
                    type_name::<T>(),
                    other.kind()
                ),
            )),
        }
    }

    /// Encodes `value` as any tree node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `value` encodes nothing.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn encode_value<T: Encodable + ?Sized>(&self, value: &T) -> Result<Value> {
        trace!("encoding {}", type_name::<T>());
        let mut encoder = Encoder::new(&self.options, CodingPath::new());
        match value.box_value(&mut encoder)? {
            Some(tree) => Ok(tree),
            None => Err(Error::invalid_value(
                &CodingPath::new(),
                type_name::<T>(),
                format!("Top-level {} did not encode any values.", type_name::<T>()),
            )),
        }
    }
}

/// Decodes a `T` from `tree` with default options.
///
/// # Examples
///
/// ```rust
/// use tree_coding::{from_tree, tree};
///
/// let numbers: Vec<u8> = from_tree(&tree!([1, 2, 3])).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// See [`TreeDecoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_tree<T: Decodable>(tree: &Value) -> Result<T> {
    TreeDecoder::new().decode(tree)
}

/// Decodes a `T` from a map root with default options.
///
/// # Errors
///
/// See [`TreeDecoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_map<T: Decodable>(map: &Map) -> Result<T> {
    TreeDecoder::new().decode_map(map)
}

/// Encodes `value` as a map with default options.
///
/// # Errors
///
/// See [`TreeEncoder::encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tree<T: Encodable + ?Sized>(value: &T) -> Result<Map> {
    TreeEncoder::new().encode(value)
}

/// Encodes `value` as any tree node with default options.
///
/// # Examples
///
/// ```rust
/// use tree_coding::{to_tree_value, Value};
///
/// assert_eq!(to_tree_value(&vec![true]).unwrap(), Value::Sequence(vec![Value::Bool(true)]));
/// ```
///
/// # Errors
///
/// See [`TreeEncoder::encode_value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tree_value<T: Encodable + ?Sized>(value: &T) -> Result<Value> {
    TreeEncoder::new().encode_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Encodable for Point {
        fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
            let mut container = encoder.container();
            container.encode("x", &self.x)?;
            container.encode("y", &self.y)
        }
    }

    impl Decodable for Point {
        fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
            let mut container = decoder.container()?;
            Ok(Point {
                x: container.decode("x")?,
                y: container.decode("y")?,
            })
        }
    }

    struct Silent;

    impl Encodable for Silent {
        fn encode(&self, _encoder: &mut Encoder<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_point_roundtrip() {
        let point = Point { x: 1, y: -2 };
        let map = to_tree(&point).unwrap();
        assert_eq!(from_map::<Point>(&map).unwrap(), point);
    }

    #[test]
    fn test_root_must_be_map() {
        let err = to_tree(&5).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
        assert!(err.to_string().contains("a number fragment"));

        let err = to_tree(&None::<Point>).unwrap_err();
        assert!(err.to_string().contains("null fragment"));

        let err = to_tree(&Silent).unwrap_err();
        assert!(err.to_string().contains("did not encode any values"));
    }

    #[test]
    fn test_null_root() {
        let err = from_tree::<Point>(&Value::Null).unwrap_err();
        assert!(matches!(
            err.reason(),
            Some(ErrorReason::ValueNotFound { tree: Some(Value::Null) })
        ));
        assert_eq!(from_tree::<Option<Point>>(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_options_reach_nested_values() {
        let encoder = TreeEncoder::with_options(
            EncoderOptions::new().with_float_sentinels(FloatSentinels::javascript()),
        );
        let map = encoder
            .encode(&std::collections::BTreeMap::from([(
                "v".to_string(),
                vec![f64::NEG_INFINITY],
            )]))
            .unwrap();
        assert_eq!(map.get("v"), Some(&crate::tree!(["-Infinity"])));
    }
}
