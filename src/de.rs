//! The decode engine.
//!
//! A [`Decoder`] holds a stack of the tree nodes currently being decoded and
//! the [`CodingPath`] of the active node. A type's
//! [`Decodable::decode`](crate::Decodable::decode) asks the decoder for one of
//! three views over the top node:
//!
//! - [`KeyedDecodingContainer`]: the node is a map
//! - [`UnkeyedDecodingContainer`]: the node is a sequence, read in order
//! - [`SingleValueDecodingContainer`]: the node itself is the value
//!
//! Containers re-enter the engine for each nested value, extending the coding
//! path with the key or index for exactly the duration of that nested decode.
//!
//! ## Usage
//!
//! ```rust
//! use tree_coding::{from_tree, tree, Decodable, Decoder, Result};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Decodable for Point {
//!     fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
//!         let mut container = decoder.container()?;
//!         Ok(Point {
//!             x: container.decode("x")?,
//!             y: container.decode("y")?,
//!         })
//!     }
//! }
//!
//! let point: Point = from_tree(&tree!({ "x": 1, "y": 2 })).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

mod keyed;
mod single;
mod storage;
mod unkeyed;

pub use keyed::KeyedDecodingContainer;
pub use single::SingleValueDecodingContainer;
pub use unkeyed::UnkeyedDecodingContainer;

use crate::options::{DecoderOptions, UserInfo};
use crate::{CodingKey, CodingPath, Decodable, Error, Result, Value};
use storage::DecodingStorage;

/// The decoding engine handed to [`Decodable::decode`].
///
/// Created by [`TreeDecoder`](crate::TreeDecoder), and by keyed and unkeyed
/// containers for delegated ("super") decoding.
#[derive(Debug)]
pub struct Decoder<'a> {
    storage: DecodingStorage<'a>,
    coding_path: CodingPath,
    options: &'a DecoderOptions,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder whose stack holds `value`.
    pub(crate) fn new(value: &'a Value, coding_path: CodingPath, options: &'a DecoderOptions) -> Self {
        let mut storage = DecodingStorage::new();
        storage.push(value);
        Decoder {
            storage,
            coding_path,
            options,
        }
    }

    /// The path from the root to the node being decoded.
    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    /// The caller-supplied values from [`DecoderOptions::user_info`].
    pub fn user_info(&self) -> &UserInfo {
        &self.options.user_info
    }

    /// The options shared by every nested decode of this run.
    pub fn options(&self) -> &'a DecoderOptions {
        self.options
    }

    /// Views the current node as a map.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ValueNotFound`] if the node is null, and with
    /// [`Error::TypeMismatch`] if it is anything else but a map.
    pub fn container(&mut self) -> Result<KeyedDecodingContainer<'_, 'a>> {
        let map = match self.storage.top() {
            Value::Map(map) => map,
            Value::Null => {
                return Err(Error::null_container::<KeyedDecodingContainer<'static, 'static>>(
                    &self.coding_path,
                    "Cannot get keyed decoding container -- found null value instead.",
                ))
            }
            other => return Err(Error::type_mismatch(&self.coding_path, "a map", other)),
        };
        let coding_path = self.coding_path.clone();
        Ok(KeyedDecodingContainer::new(self, map, coding_path))
    }

    /// Views the current node as a sequence.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ValueNotFound`] if the node is null, and with
    /// [`Error::TypeMismatch`] if it is anything else but a sequence.
    pub fn unkeyed_container(&mut self) -> Result<UnkeyedDecodingContainer<'_, 'a>> {
        let items = match self.storage.top() {
            Value::Sequence(items) => items,
            Value::Null => {
                return Err(Error::null_container::<UnkeyedDecodingContainer<'static, 'static>>(
                    &self.coding_path,
                    "Cannot get unkeyed decoding container -- found null value instead.",
                ))
            }
            other => return Err(Error::type_mismatch(&self.coding_path, "a sequence", other)),
        };
        let coding_path = self.coding_path.clone();
        Ok(UnkeyedDecodingContainer::new(self, items, coding_path))
    }

    /// Views the current node as a single value.
    pub fn single_value_container(&mut self) -> SingleValueDecodingContainer<'_, 'a> {
        SingleValueDecodingContainer::new(self)
    }

    /// Runs `T::decode` with `value` pushed as the current node.
    ///
    /// This is the recursion step behind the default
    /// [`Decodable::unbox_value`].
    pub fn decode_nested<T: Decodable>(&mut self, value: &'a Value) -> Result<T> {
        self.storage.push(value);
        let result = T::decode(self);
        self.storage.pop();
        result
    }

    /// Unboxes `value` as a `T` with the coding path set to `base` plus `key`
    /// for the duration of the call.
    pub(crate) fn unbox_at<T: Decodable>(
        &mut self,
        value: &'a Value,
        base: &CodingPath,
        key: CodingKey,
    ) -> Result<Option<T>> {
        let saved = std::mem::replace(&mut self.coding_path, base.appending(key));
        let result = T::unbox_value(value, self);
        self.coding_path = saved;
        result
    }

    pub(crate) fn top(&self) -> &'a Value {
        self.storage.top()
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.storage.len()
    }
}
