//! The encode engine.
//!
//! An [`Encoder`] holds a stack of the values under construction. A type's
//! [`Encodable::encode`](crate::Encodable::encode) requests exactly one
//! container for its own value:
//!
//! - [`KeyedEncodingContainer`]: the value is a map
//! - [`UnkeyedEncodingContainer`]: the value is a sequence
//! - [`SingleValueEncodingContainer`]: the value is a single node
//!
//! Requesting a second container of a different kind for the same value, or
//! writing a single value twice, is a programming error and panics.
//!
//! Delegated ("super") encoding runs a closure against a separate
//! referencing encoder; whatever it produces is written back into the
//! requesting container when the closure returns, even if it failed.
//!
//! ## Usage
//!
//! ```rust
//! use tree_coding::{to_tree, tree, Encodable, Encoder, Result, Value};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Encodable for Point {
//!     fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
//!         let mut container = encoder.container();
//!         container.encode("x", &self.x)?;
//!         container.encode("y", &self.y)
//!     }
//! }
//!
//! let map = to_tree(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(Value::Map(map), tree!({ "x": 1, "y": 2 }));
//! ```

mod keyed;
mod referencing;
mod single;
mod storage;
mod unkeyed;

pub use keyed::KeyedEncodingContainer;
pub use single::SingleValueEncodingContainer;
pub use unkeyed::UnkeyedEncodingContainer;

use crate::options::{EncoderOptions, UserInfo};
use crate::{coerce, CodingKey, CodingPath, Encodable, Result, Value};
use storage::EncodingStorage;

/// The encoding engine handed to [`Encodable::encode`].
#[derive(Debug)]
pub struct Encoder<'o> {
    storage: EncodingStorage,
    coding_path: CodingPath,
    options: &'o EncoderOptions,
    /// Number of keyed or indexed values currently being boxed. A new
    /// container may be opened only while the stack is exactly this deep.
    depth: usize,
}

impl<'o> Encoder<'o> {
    pub(crate) fn new(options: &'o EncoderOptions, coding_path: CodingPath) -> Self {
        Encoder {
            storage: EncodingStorage::new(),
            coding_path,
            options,
            depth: 0,
        }
    }

    /// The path from the root to the value being encoded.
    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    /// The caller-supplied values from [`EncoderOptions::user_info`].
    pub fn user_info(&self) -> &UserInfo {
        &self.options.user_info
    }

    /// The options shared by every nested encode of this run.
    pub fn options(&self) -> &'o EncoderOptions {
        self.options
    }

    fn can_encode_new_value(&self) -> bool {
        self.storage.len() == self.depth
    }

    /// Opens a map for the current value, or returns the one already open.
    ///
    /// # Panics
    ///
    /// Panics if the current value was already encoded as something other
    /// than a map.
    pub fn container(&mut self) -> KeyedEncodingContainer<'_, 'o> {
        let frame = if self.can_encode_new_value() {
            self.storage.push_keyed_container()
        } else {
            match self.storage.last() {
                Some(Value::Map(_)) => self.storage.len() - 1,
                _ => panic!(
                    "Attempt to push new keyed encoding container when already previously encoded at this path."
                ),
            }
        };
        let coding_path = self.coding_path.clone();
        KeyedEncodingContainer::new(self, frame, Vec::new(), coding_path)
    }

    /// Opens a sequence for the current value, or returns the one already
    /// open.
    ///
    /// # Panics
    ///
    /// Panics if the current value was already encoded as something other
    /// than a sequence.
    pub fn unkeyed_container(&mut self) -> UnkeyedEncodingContainer<'_, 'o> {
        let frame = if self.can_encode_new_value() {
            self.storage.push_unkeyed_container()
        } else {
            match self.storage.last() {
                Some(Value::Sequence(_)) => self.storage.len() - 1,
                _ => panic!(
                    "Attempt to push new unkeyed encoding container when already previously encoded at this path."
                ),
            }
        };
        let coding_path = self.coding_path.clone();
        UnkeyedEncodingContainer::new(self, frame, Vec::new(), coding_path)
    }

    /// Writes the current value as a single node.
    pub fn single_value_container(&mut self) -> SingleValueEncodingContainer<'_, 'o> {
        SingleValueEncodingContainer::new(self)
    }

    /// Runs `value.encode` on a fresh frame and returns what it produced.
    ///
    /// Returns `Ok(None)` if the value requested no container. On failure the
    /// stack is unwound to where it was before the call.
    ///
    /// This is the recursion step behind the default
    /// [`Encodable::box_value`].
    pub fn box_nested<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<Option<Value>> {
        let depth = self.storage.len();
        if let Err(err) = value.encode(self) {
            self.storage.truncate(depth);
            return Err(err);
        }
        if self.storage.len() > depth {
            Ok(Some(self.storage.pop_container()))
        } else {
            Ok(None)
        }
    }

    /// Boxes `value` with the coding path set to `base` plus `key` for the
    /// duration of the call.
    pub(crate) fn box_at<T: Encodable + ?Sized>(
        &mut self,
        value: &T,
        base: &CodingPath,
        key: CodingKey,
    ) -> Result<Option<Value>> {
        let saved = std::mem::replace(&mut self.coding_path, base.appending(key));
        self.depth += 1;
        let result = value.box_value(self);
        self.depth -= 1;
        self.coding_path = saved;
        result
    }

    /// Represents a float, applying the non-conforming float strategy.
    pub fn box_float(&self, value: f64) -> Result<Value> {
        coerce::box_float(value, &self.coding_path, &self.options.non_conforming_float)
    }
}
