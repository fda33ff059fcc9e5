use crate::{CodingKey, Map, Value};

/// The stack of values under construction. Each entry is a map or sequence
/// opened by a container, or a finished single value.
#[derive(Debug, Default)]
pub(crate) struct EncodingStorage {
    containers: Vec<Value>,
}

impl EncodingStorage {
    pub(crate) fn new() -> Self {
        EncodingStorage {
            containers: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.containers.len()
    }

    pub(crate) fn last(&self) -> Option<&Value> {
        self.containers.last()
    }

    /// Pushes an empty map and returns its frame index.
    pub(crate) fn push_keyed_container(&mut self) -> usize {
        self.containers.push(Value::Map(Map::new()));
        self.containers.len() - 1
    }

    /// Pushes an empty sequence and returns its frame index.
    pub(crate) fn push_unkeyed_container(&mut self) -> usize {
        self.containers.push(Value::Sequence(Vec::new()));
        self.containers.len() - 1
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.containers.push(value);
    }

    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub(crate) fn pop_container(&mut self) -> Value {
        match self.containers.pop() {
            Some(value) => value,
            None => panic!("Empty container stack."),
        }
    }

    pub(crate) fn truncate(&mut self, depth: usize) {
        self.containers.truncate(depth);
    }

    /// The value reached from frame `frame` by following `slots`.
    ///
    /// # Panics
    ///
    /// Panics if the frame or any slot along the way is missing.
    pub(crate) fn resolve(&self, frame: usize, slots: &[CodingKey]) -> &Value {
        let mut value = match self.containers.get(frame) {
            Some(value) => value,
            None => panic!("Encoding frame {} is no longer on the stack.", frame),
        };
        for slot in slots {
            value = match (value, slot) {
                (Value::Map(map), CodingKey::Key(key)) => map.get(key),
                (Value::Sequence(items), CodingKey::Index(index)) => items.get(*index),
                _ => None,
            }
            .unwrap_or_else(|| panic!("Encoding slot {} is no longer present.", slot));
        }
        value
    }

    /// Mutable counterpart of [`EncodingStorage::resolve`].
    pub(crate) fn resolve_mut(&mut self, frame: usize, slots: &[CodingKey]) -> &mut Value {
        let mut value = match self.containers.get_mut(frame) {
            Some(value) => value,
            None => panic!("Encoding frame {} is no longer on the stack.", frame),
        };
        for slot in slots {
            value = match (value, slot) {
                (Value::Map(map), CodingKey::Key(key)) => map.get_mut(key),
                (Value::Sequence(items), CodingKey::Index(index)) => items.get_mut(*index),
                _ => None,
            }
            .unwrap_or_else(|| panic!("Encoding slot {} is no longer present.", slot));
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames() {
        let mut storage = EncodingStorage::new();
        assert_eq!(storage.push_keyed_container(), 0);
        assert_eq!(storage.push_unkeyed_container(), 1);
        storage.push(Value::from(1));
        assert_eq!(storage.len(), 3);

        storage.truncate(1);
        assert_eq!(storage.last(), Some(&Value::Map(Map::new())));
        assert_eq!(storage.pop_container(), Value::Map(Map::new()));
    }

    #[test]
    fn test_resolve_through_slots() {
        let mut storage = EncodingStorage::new();
        let frame = storage.push_keyed_container();
        if let Value::Map(map) = storage.resolve_mut(frame, &[]) {
            map.insert("items".to_string(), Value::Sequence(vec![Value::Null]));
        }

        let slots = [CodingKey::from("items"), CodingKey::from(0)];
        *storage.resolve_mut(frame, &slots) = Value::from(true);
        assert_eq!(storage.resolve(frame, &slots), &Value::from(true));
    }

    #[test]
    #[should_panic(expected = "Empty container stack.")]
    fn test_pop_empty_panics() {
        EncodingStorage::new().pop_container();
    }
}
