//! Coding path bookkeeping.
//!
//! A [`CodingPath`] is the ordered list of [`CodingKey`] segments that locate
//! the node currently being encoded or decoded. The engines push a segment
//! immediately before entering a nested value and pop it immediately after, on
//! every exit path, so the path attached to an error names exactly the node
//! that failed.
//!
//! ```rust
//! use tree_coding::{CodingKey, CodingPath};
//!
//! let mut path = CodingPath::new();
//! path.push(CodingKey::from("items"));
//! path.push(CodingKey::from(2));
//! path.push(CodingKey::Super);
//!
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.to_string(), "items[2].super");
//! ```

use std::fmt;
use std::slice;

/// The key under which delegated ("super") values are stored in a map.
pub const SUPER_KEY: &str = "super";

/// One segment of a coding path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodingKey {
    /// A string key in a map.
    Key(String),
    /// A position in a sequence.
    Index(usize),
    /// The reserved key used for delegated encoding of a base representation.
    Super,
}

impl CodingKey {
    /// The string form of the key. Indexes render as `"Index N"`.
    #[must_use]
    pub fn string_value(&self) -> String {
        match self {
            CodingKey::Key(key) => key.clone(),
            CodingKey::Index(index) => format!("Index {}", index),
            CodingKey::Super => SUPER_KEY.to_string(),
        }
    }

    /// The integer form of the key, for index segments.
    #[must_use]
    pub fn int_value(&self) -> Option<usize> {
        match self {
            CodingKey::Index(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for CodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodingKey::Key(key) => write!(f, "{:?}", key),
            CodingKey::Index(index) => write!(f, "{}", index),
            CodingKey::Super => write!(f, "{}", SUPER_KEY),
        }
    }
}

impl From<&str> for CodingKey {
    fn from(key: &str) -> Self {
        CodingKey::Key(key.to_string())
    }
}

impl From<String> for CodingKey {
    fn from(key: String) -> Self {
        CodingKey::Key(key)
    }
}

impl From<usize> for CodingKey {
    fn from(index: usize) -> Self {
        CodingKey::Index(index)
    }
}

/// The ordered segments from the root to the current node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodingPath(Vec<CodingKey>);

impl CodingPath {
    /// Creates an empty (root) path.
    #[must_use]
    pub fn new() -> Self {
        CodingPath(Vec::new())
    }

    pub fn push(&mut self, key: CodingKey) {
        self.0.push(key);
    }

    /// Removes the last segment.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty; pushes and pops are always paired.
    pub fn pop(&mut self) -> CodingKey {
        match self.0.pop() {
            Some(key) => key,
            None => panic!("Coding path popped past the root."),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&CodingKey> {
        self.0.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, CodingKey> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CodingKey] {
        &self.0
    }

    /// Returns a copy of this path extended by `key`.
    #[must_use]
    pub fn appending(&self, key: CodingKey) -> CodingPath {
        let mut path = self.clone();
        path.push(key);
        path
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, key) in self.0.iter().enumerate() {
            match key {
                CodingKey::Index(index) => write!(f, "[{}]", index)?,
                CodingKey::Key(key) if i == 0 => write!(f, "{}", key)?,
                CodingKey::Key(key) => write!(f, ".{}", key)?,
                CodingKey::Super if i == 0 => write!(f, "{}", SUPER_KEY)?,
                CodingKey::Super => write!(f, ".{}", SUPER_KEY)?,
            }
        }
        Ok(())
    }
}

impl From<Vec<CodingKey>> for CodingPath {
    fn from(keys: Vec<CodingKey>) -> Self {
        CodingPath(keys)
    }
}

impl PartialEq<[CodingKey]> for CodingPath {
    fn eq(&self, other: &[CodingKey]) -> bool {
        self.0 == other
    }
}

impl PartialEq<Vec<CodingKey>> for CodingPath {
    fn eq(&self, other: &Vec<CodingKey>) -> bool {
        &self.0 == other
    }
}

impl<'a> IntoIterator for &'a CodingPath {
    type Item = &'a CodingKey;
    type IntoIter = slice::Iter<'a, CodingKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
