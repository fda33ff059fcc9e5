//! The map node of a value tree.
//!
//! [`Map`] wraps an [`IndexMap`] so encoded trees keep the order in which a
//! keyed container wrote its entries. Decoding looks entries up by key and
//! never depends on that order.
//!
//! ```rust
//! use tree_coding::{tree, Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("id".to_string(), Value::from(7));
//! map.insert("super".to_string(), tree!({ "kind": "base" }));
//!
//! assert!(map.contains_key("super"));
//! assert_eq!(Value::Map(map), tree!({ "id": 7, "super": { "kind": "base" } }));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

type Entries = IndexMap<String, crate::Value>;

/// String keys to tree values, in write order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(Entries);

impl Map {
    #[must_use]
    pub fn new() -> Self {
        Map(Entries::new())
    }

    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// A replaced key keeps its position.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes and returns the value for `key`, preserving the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in write order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for Map {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl From<Map> for HashMap<String, crate::Value> {
    fn from(map: Map) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for Map {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        Map(iter.into_iter().collect())
    }
}
