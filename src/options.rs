//! Configuration options for the encode and decode engines.
//!
//! This module provides the settings threaded unchanged through every nested
//! encoder and decoder:
//!
//! - [`DecoderOptions`]: missing-value policy, non-conforming float policy,
//!   user info
//! - [`EncoderOptions`]: non-conforming float policy, user info
//! - [`DefaultValues`]: type-indexed defaults for missing keys
//! - [`UserInfo`]: an opaque bag of values for custom encode/decode logic
//!
//! ## Examples
//!
//! ```rust
//! use tree_coding::{DecoderOptions, DefaultValues, EncoderOptions, FloatSentinels};
//!
//! let decoding = DecoderOptions::new()
//!     .with_defaults(DefaultValues::new().insert(0u32).insert(String::from("n/a")))
//!     .with_float_sentinels(FloatSentinels::javascript());
//!
//! let encoding = EncoderOptions::new().with_float_sentinels(FloatSentinels::javascript());
//! ```

use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// String forms used for non-finite floats.
///
/// # Examples
///
/// ```rust
/// use tree_coding::FloatSentinels;
///
/// let sentinels = FloatSentinels::javascript();
/// assert_eq!(sentinels.positive_infinity, "Infinity");
/// assert_eq!(sentinels.negative_infinity, "-Infinity");
/// assert_eq!(sentinels.nan, "NaN");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatSentinels {
    pub positive_infinity: String,
    pub negative_infinity: String,
    pub nan: String,
}

impl FloatSentinels {
    pub fn new(
        positive_infinity: impl Into<String>,
        negative_infinity: impl Into<String>,
        nan: impl Into<String>,
    ) -> Self {
        FloatSentinels {
            positive_infinity: positive_infinity.into(),
            negative_infinity: negative_infinity.into(),
            nan: nan.into(),
        }
    }

    /// The JavaScript spellings: `Infinity`, `-Infinity`, `NaN`.
    #[must_use]
    pub fn javascript() -> Self {
        FloatSentinels::new("Infinity", "-Infinity", "NaN")
    }

    /// Maps a sentinel string back to its float, if it is one.
    #[must_use]
    pub fn parse(&self, s: &str) -> Option<f64> {
        if s == self.positive_infinity {
            Some(f64::INFINITY)
        } else if s == self.negative_infinity {
            Some(f64::NEG_INFINITY)
        } else if s == self.nan {
            Some(f64::NAN)
        } else {
            None
        }
    }

    /// The sentinel for a non-finite float.
    #[must_use]
    pub fn format(&self, value: f64) -> &str {
        if value == f64::INFINITY {
            &self.positive_infinity
        } else if value == f64::NEG_INFINITY {
            &self.negative_infinity
        } else {
            &self.nan
        }
    }
}

/// Policy for IEEE 754 infinities and NaN, which have no plain tree form.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum NonConformingFloatStrategy {
    /// Fail on non-finite values. The default.
    #[default]
    Throw,
    /// Represent non-finite values with the given strings.
    ConvertString(FloatSentinels),
}

impl NonConformingFloatStrategy {
    #[must_use]
    pub fn sentinels(&self) -> Option<&FloatSentinels> {
        match self {
            NonConformingFloatStrategy::Throw => None,
            NonConformingFloatStrategy::ConvertString(sentinels) => Some(sentinels),
        }
    }
}

type DefaultFactory = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;

/// Type-indexed default values used when a keyed lookup finds no entry.
///
/// # Examples
///
/// ```rust
/// use tree_coding::DefaultValues;
///
/// let defaults = DefaultValues::new()
///     .insert(7i64)
///     .insert_with(|| vec![String::from("guest")]);
///
/// assert_eq!(defaults.get::<i64>(), Some(7));
/// assert_eq!(defaults.get::<Vec<String>>(), Some(vec![String::from("guest")]));
/// assert_eq!(defaults.get::<u8>(), None);
/// ```
#[derive(Clone, Default)]
pub struct DefaultValues {
    factories: HashMap<TypeId, DefaultFactory>,
}

impl DefaultValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` as the default for its type, replacing any earlier
    /// default for that type.
    #[must_use]
    pub fn insert<T>(self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.insert_with(move || value.clone())
    }

    /// Registers a factory producing the default for `T`.
    #[must_use]
    pub fn insert_with<T, F>(mut self, factory: F) -> Self
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.factories.insert(
            TypeId::of::<T>(),
            Arc::new(move || Box::new(factory()) as Box<dyn Any>),
        );
        self
    }

    /// Produces the default for `T`, if one is registered.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<T> {
        let factory = self.factories.get(&TypeId::of::<T>())?;
        factory().downcast::<T>().ok().map(|boxed| *boxed)
    }

    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.factories.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for DefaultValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultValues")
            .field("types", &self.factories.len())
            .finish()
    }
}

/// Policy for keyed lookups that find no entry.
#[derive(Clone, Debug, Default)]
pub enum MissingValueStrategy {
    /// Fail with a key-not-found error. The default.
    #[default]
    Throw,
    /// Use the registered default for the requested type; fail if there is none.
    UseDefault(DefaultValues),
}

/// Opaque contextual values for custom encode/decode logic.
///
/// The engines never inspect the bag; they hand the same bag to every nested
/// encoder and decoder.
///
/// # Examples
///
/// ```rust
/// use tree_coding::UserInfo;
///
/// let info = UserInfo::new().with("schema", 3u32);
/// assert_eq!(info.get::<u32>("schema"), Some(&3));
/// assert_eq!(info.get::<i64>("schema"), None);
/// ```
#[derive(Clone, Default)]
pub struct UserInfo {
    entries: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl UserInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.entries.insert(key.into(), Arc::new(value));
    }

    /// Looks up `key`, returning it only if it holds a `T`.
    #[must_use]
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Configuration for decoding.
///
/// # Examples
///
/// ```rust
/// use tree_coding::{DecoderOptions, MissingValueStrategy};
///
/// let options = DecoderOptions::new();
/// assert!(matches!(options.missing_value, MissingValueStrategy::Throw));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecoderOptions {
    pub missing_value: MissingValueStrategy,
    pub non_conforming_float: NonConformingFloatStrategy,
    pub user_info: UserInfo,
}

impl DecoderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_missing_value(mut self, strategy: MissingValueStrategy) -> Self {
        self.missing_value = strategy;
        self
    }

    /// Shorthand for [`MissingValueStrategy::UseDefault`].
    #[must_use]
    pub fn with_defaults(self, defaults: DefaultValues) -> Self {
        self.with_missing_value(MissingValueStrategy::UseDefault(defaults))
    }

    #[must_use]
    pub fn with_non_conforming_float(mut self, strategy: NonConformingFloatStrategy) -> Self {
        self.non_conforming_float = strategy;
        self
    }

    /// Shorthand for [`NonConformingFloatStrategy::ConvertString`].
    #[must_use]
    pub fn with_float_sentinels(self, sentinels: FloatSentinels) -> Self {
        self.with_non_conforming_float(NonConformingFloatStrategy::ConvertString(sentinels))
    }

    #[must_use]
    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.user_info = user_info;
        self
    }
}

/// Configuration for encoding.
#[derive(Clone, Debug, Default)]
pub struct EncoderOptions {
    pub non_conforming_float: NonConformingFloatStrategy,
    pub user_info: UserInfo,
}

impl EncoderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_non_conforming_float(mut self, strategy: NonConformingFloatStrategy) -> Self {
        self.non_conforming_float = strategy;
        self
    }

    /// Shorthand for [`NonConformingFloatStrategy::ConvertString`].
    #[must_use]
    pub fn with_float_sentinels(self, sentinels: FloatSentinels) -> Self {
        self.with_non_conforming_float(NonConformingFloatStrategy::ConvertString(sentinels))
    }

    #[must_use]
    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.user_info = user_info;
        self
    }
}
