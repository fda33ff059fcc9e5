//! Error types for tree encoding and decoding.
//!
//! Every recoverable failure carries a [`Context`]: the coding path at the
//! point of failure, a human-readable description, and optionally a typed
//! [`ErrorReason`] payload so callers can recover the offending type or value
//! without parsing strings.
//!
//! ## Error Categories
//!
//! - **KeyNotFound**: a keyed lookup had no entry and no usable default
//! - **ValueNotFound**: a value was required but the node was null, an
//!   unkeyed container was exhausted, or a container was requested on null
//! - **TypeMismatch**: the node's kind cannot represent the requested type
//! - **DataCorrupted**: the node's kind fits but its content does not
//!   (numeric overflow, malformed identifier or locator text)
//! - **InvalidValue**: a value cannot be encoded (non-finite float, bad root)
//!
//! Contract violations such as popping an empty stack are not errors; they
//! panic.
//!
//! ## Examples
//!
//! ```rust
//! use tree_coding::{from_tree, tree, CodingKey, Error};
//!
//! let tree = tree!({ "a": [1, "oops"] });
//! let err = from_tree::<std::collections::HashMap<String, Vec<i32>>>(&tree).unwrap_err();
//!
//! assert!(matches!(err, Error::TypeMismatch { .. }));
//! assert_eq!(err.coding_path().unwrap(), &vec![CodingKey::from("a"), CodingKey::from(1)]);
//! ```

use crate::{CodingKey, CodingPath, Value};
use std::any::TypeId;
use std::fmt;
use thiserror::Error;

/// Identifies a Rust type in error payloads.
///
/// Carries both the readable name and the [`TypeId`], so a caller can test
/// for a specific type with [`TypeTag::is`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    name: &'static str,
    id: TypeId,
}

impl TypeTag {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeTag {
            name: std::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns `true` if this tag identifies `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strongly-typed auxiliary context attached to an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorReason {
    /// A keyed lookup found nothing for a value of this type.
    KeyNotFound { ty: TypeTag },
    /// The node could not be represented as this type.
    DataCorrupted { value: Value, ty: TypeTag },
    /// The top-level tree yielded no value.
    ValueNotFound { tree: Option<Value> },
    /// A container of this type was requested on a null node.
    ValueNotFoundInContainer { ty: TypeTag },
    /// The node that had the wrong kind.
    TypeMismatch { unexpected: Value },
}

impl ErrorReason {
    /// The offending type, when the reason names one.
    #[must_use]
    pub fn type_tag(&self) -> Option<&TypeTag> {
        match self {
            ErrorReason::KeyNotFound { ty } => Some(ty),
            ErrorReason::DataCorrupted { ty, .. } => Some(ty),
            ErrorReason::ValueNotFound { .. } => None,
            ErrorReason::ValueNotFoundInContainer { ty } => Some(ty),
            ErrorReason::TypeMismatch { .. } => None,
        }
    }
}

/// Where and why a failure happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub coding_path: CodingPath,
    pub debug_description: String,
    pub reason: Option<ErrorReason>,
}

impl Context {
    pub fn new(coding_path: CodingPath, debug_description: impl Into<String>) -> Self {
        Context {
            coding_path,
            debug_description: debug_description.into(),
            reason: None,
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: ErrorReason) -> Self {
        self.reason = Some(reason);
        self
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.coding_path, self.debug_description)
    }
}

/// Represents all recoverable errors raised while encoding or decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// No entry for a key, and no default was available
    #[error("Key not found ({key}) {context}")]
    KeyNotFound { key: CodingKey, context: Context },

    /// A value of the expected type was required but absent
    #[error("Value of type {expected} not found {context}")]
    ValueNotFound {
        expected: &'static str,
        context: Context,
    },

    /// The node's kind is incompatible with the requested type
    #[error("Type mismatch, expected {expected} {context}")]
    TypeMismatch {
        expected: &'static str,
        context: Context,
    },

    /// The node's kind fits but its content cannot be represented
    #[error("Data corrupted {context}")]
    DataCorrupted { context: Context },

    /// A value that cannot be encoded into a tree
    #[error("Invalid value {value} {context}")]
    InvalidValue { value: String, context: Context },

    /// Custom error raised by user encode/decode logic
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error for `value` found where `expected` was
    /// requested.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree_coding::{CodingPath, Error, Value};
    ///
    /// let err = Error::type_mismatch(&CodingPath::new(), "i32", &Value::from("x"));
    /// assert!(err.to_string().contains("expected i32"));
    /// ```
    pub fn type_mismatch(path: &CodingPath, expected: &'static str, value: &Value) -> Self {
        Error::TypeMismatch {
            expected,
            context: Context::new(
                path.clone(),
                format!(
                    "Expected to decode {} but found {} instead.",
                    expected,
                    value.kind()
                ),
            )
            .with_reason(ErrorReason::TypeMismatch {
                unexpected: value.clone(),
            }),
        }
    }

    /// Creates a data corrupted error for `value`, which could not be
    /// represented as `T`.
    pub fn corrupted_value<T: ?Sized + 'static>(
        path: &CodingPath,
        value: &Value,
        description: impl Into<String>,
    ) -> Self {
        Error::DataCorrupted {
            context: Context::new(path.clone(), description).with_reason(
                ErrorReason::DataCorrupted {
                    value: value.clone(),
                    ty: TypeTag::of::<T>(),
                },
            ),
        }
    }

    /// Creates a data corrupted error without a typed payload, for use by
    /// decode logic that rejects a value's content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree_coding::{CodingPath, Error};
    ///
    /// let err = Error::data_corrupted(&CodingPath::new(), "negative width");
    /// assert!(err.to_string().contains("negative width"));
    /// ```
    pub fn data_corrupted(path: &CodingPath, description: impl Into<String>) -> Self {
        Error::DataCorrupted {
            context: Context::new(path.clone(), description),
        }
    }

    /// Creates a value-not-found error for a value of type `expected`.
    pub fn value_not_found(
        path: &CodingPath,
        expected: &'static str,
        description: impl Into<String>,
    ) -> Self {
        Error::ValueNotFound {
            expected,
            context: Context::new(path.clone(), description),
        }
    }

    /// Creates a key-not-found error for a lookup of a `T` under `key`.
    pub fn key_not_found<T: ?Sized + 'static>(path: &CodingPath, key: &str) -> Self {
        Error::KeyNotFound {
            key: CodingKey::from(key),
            context: Context::new(
                path.clone(),
                format!("No value associated with key {:?}.", key),
            )
            .with_reason(ErrorReason::KeyNotFound {
                ty: TypeTag::of::<T>(),
            }),
        }
    }

    /// Creates a key-not-found error carrying only a description.
    pub fn missing_key(path: &CodingPath, key: &str, description: impl Into<String>) -> Self {
        Error::KeyNotFound {
            key: CodingKey::from(key),
            context: Context::new(path.clone(), description),
        }
    }

    /// Creates the error raised when a container of type `C` is requested on
    /// a null node.
    pub fn null_container<C: ?Sized + 'static>(
        path: &CodingPath,
        description: impl Into<String>,
    ) -> Self {
        Error::ValueNotFound {
            expected: std::any::type_name::<C>(),
            context: Context::new(path.clone(), description)
                .with_reason(ErrorReason::ValueNotFoundInContainer { ty: TypeTag::of::<C>() }),
        }
    }

    /// Creates an invalid value error for an encode-time failure.
    pub fn invalid_value(
        path: &CodingPath,
        value: impl fmt::Display,
        description: impl Into<String>,
    ) -> Self {
        Error::InvalidValue {
            value: value.to_string(),
            context: Context::new(path.clone(), description),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// The structured context, for every variant except [`Error::Custom`].
    #[must_use]
    pub fn context(&self) -> Option<&Context> {
        match self {
            Error::KeyNotFound { context, .. }
            | Error::ValueNotFound { context, .. }
            | Error::TypeMismatch { context, .. }
            | Error::DataCorrupted { context }
            | Error::InvalidValue { context, .. } => Some(context),
            Error::Custom(_) => None,
        }
    }

    /// The coding path at the point of failure.
    #[must_use]
    pub fn coding_path(&self) -> Option<&CodingPath> {
        self.context().map(|context| &context.coding_path)
    }

    #[must_use]
    pub fn reason(&self) -> Option<&ErrorReason> {
        self.context().and_then(|context| context.reason.as_ref())
    }

    /// The offending type recorded in the reason payload, if any.
    #[must_use]
    pub fn type_tag(&self) -> Option<&TypeTag> {
        self.reason().and_then(ErrorReason::type_tag)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
