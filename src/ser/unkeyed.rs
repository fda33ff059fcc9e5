use super::referencing::{Reference, ReferencingEncoder};
use super::{Encoder, KeyedEncodingContainer};
use crate::{CodingKey, CodingPath, Encodable, Map, Result, Value};

/// Appends elements to a sequence under construction.
#[derive(Debug)]
pub struct UnkeyedEncodingContainer<'e, 'o> {
    encoder: &'e mut Encoder<'o>,
    frame: usize,
    slots: Vec<CodingKey>,
    coding_path: CodingPath,
}

impl<'e, 'o> UnkeyedEncodingContainer<'e, 'o> {
    pub(crate) fn new(
        encoder: &'e mut Encoder<'o>,
        frame: usize,
        slots: Vec<CodingKey>,
        coding_path: CodingPath,
    ) -> Self {
        UnkeyedEncodingContainer {
            encoder,
            frame,
            slots,
            coding_path,
        }
    }

    /// The path of the sequence this container writes.
    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    /// The number of elements written so far.
    pub fn count(&self) -> usize {
        match self.encoder.storage.resolve(self.frame, &self.slots) {
            Value::Sequence(items) => items.len(),
            other => panic!(
                "Unkeyed encoding container expected a sequence but found {}.",
                other.kind()
            ),
        }
    }

    fn target(&mut self) -> &mut Vec<Value> {
        match self.encoder.storage.resolve_mut(self.frame, &self.slots) {
            Value::Sequence(items) => items,
            other => panic!(
                "Unkeyed encoding container expected a sequence but found {}.",
                other.kind()
            ),
        }
    }

    /// Appends null.
    pub fn encode_nil(&mut self) -> Result<()> {
        self.target().push(Value::Null);
        Ok(())
    }

    /// Appends `value`.
    ///
    /// A value whose encode logic produces nothing appends nothing.
    pub fn encode<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<()> {
        let index = CodingKey::Index(self.count());
        if let Some(boxed) = self.encoder.box_at(value, &self.coding_path, index)? {
            self.target().push(boxed);
        }
        Ok(())
    }

    fn nested_slots(&mut self, empty: Value) -> (Vec<CodingKey>, CodingPath) {
        let index = self.count();
        self.target().push(empty);
        let mut slots = self.slots.clone();
        slots.push(CodingKey::Index(index));
        (slots, self.coding_path.appending(CodingKey::Index(index)))
    }

    /// Appends an empty map and returns a container writing into it.
    pub fn nested_container(&mut self) -> KeyedEncodingContainer<'_, 'o> {
        let (slots, coding_path) = self.nested_slots(Value::Map(Map::new()));
        KeyedEncodingContainer::new(self.encoder, self.frame, slots, coding_path)
    }

    /// Appends an empty sequence and returns a container writing into it.
    pub fn nested_unkeyed_container(&mut self) -> UnkeyedEncodingContainer<'_, 'o> {
        let (slots, coding_path) = self.nested_slots(Value::Sequence(Vec::new()));
        UnkeyedEncodingContainer::new(self.encoder, self.frame, slots, coding_path)
    }

    /// Runs `f` against a referencing encoder whose result is inserted at the
    /// current end of the sequence.
    ///
    /// The result is written back whether or not `f` fails; if `f` wrote
    /// nothing, an empty map is inserted. Returns the result of `f`.
    pub fn super_encoder<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Encoder<'o>) -> Result<()>,
    {
        let index = self.count();
        let mut referencing = ReferencingEncoder::new(
            self.encoder.options(),
            self.coding_path.appending(CodingKey::Index(index)),
            Reference::Index(index),
        );
        let result = f(referencing.encoder());
        referencing.finish(self.encoder.storage.resolve_mut(self.frame, &self.slots));
        result
    }
}
