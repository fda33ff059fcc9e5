use crate::Value;

/// The stack of tree nodes currently being decoded. The topmost node is the
/// one the active container views.
#[derive(Debug, Default)]
pub(crate) struct DecodingStorage<'a> {
    containers: Vec<&'a Value>,
}

impl<'a> DecodingStorage<'a> {
    pub(crate) fn new() -> Self {
        DecodingStorage {
            containers: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.containers.len()
    }

    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub(crate) fn top(&self) -> &'a Value {
        match self.containers.last() {
            Some(value) => value,
            None => panic!("Empty container stack."),
        }
    }

    pub(crate) fn push(&mut self, value: &'a Value) {
        self.containers.push(value);
    }

    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub(crate) fn pop(&mut self) -> &'a Value {
        match self.containers.pop() {
            Some(value) => value,
            None => panic!("Empty container stack."),
        }
    }
}
