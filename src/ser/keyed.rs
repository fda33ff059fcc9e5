use super::referencing::{Reference, ReferencingEncoder};
use super::{Encoder, UnkeyedEncodingContainer};
use crate::{CodingKey, CodingPath, Encodable, Map, Result, Value, SUPER_KEY};

/// Writes entries into a map under construction.
///
/// The map lives on the encoder's stack; the container addresses it by frame
/// and by the chain of slots leading to it from that frame.
#[derive(Debug)]
pub struct KeyedEncodingContainer<'e, 'o> {
    encoder: &'e mut Encoder<'o>,
    frame: usize,
    slots: Vec<CodingKey>,
    coding_path: CodingPath,
}

impl<'e, 'o> KeyedEncodingContainer<'e, 'o> {
    pub(crate) fn new(
        encoder: &'e mut Encoder<'o>,
        frame: usize,
        slots: Vec<CodingKey>,
        coding_path: CodingPath,
    ) -> Self {
        KeyedEncodingContainer {
            encoder,
            frame,
            slots,
            coding_path,
        }
    }

    /// The path of the map this container writes.
    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn target(&mut self) -> &mut Map {
        match self.encoder.storage.resolve_mut(self.frame, &self.slots) {
            Value::Map(map) => map,
            other => panic!(
                "Keyed encoding container expected a map but found {}.",
                other.kind()
            ),
        }
    }

    /// Stores null under `key`.
    pub fn encode_nil(&mut self, key: &str) -> Result<()> {
        self.target().insert(key.to_string(), Value::Null);
        Ok(())
    }

    /// Encodes `value` under `key`.
    ///
    /// A value whose encode logic produces nothing leaves `key` unset.
    pub fn encode<T: Encodable + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        if let Some(boxed) = self
            .encoder
            .box_at(value, &self.coding_path, CodingKey::from(key))?
        {
            self.target().insert(key.to_string(), boxed);
        }
        Ok(())
    }

    /// Encodes the contents of `value` under `key`, or nothing if it is `None`.
    pub fn encode_if_present<T: Encodable>(&mut self, key: &str, value: &Option<T>) -> Result<()> {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }

    fn nested_slots(&self, key: &str) -> (Vec<CodingKey>, CodingPath) {
        let mut slots = self.slots.clone();
        slots.push(CodingKey::from(key));
        (slots, self.coding_path.appending(CodingKey::from(key)))
    }

    /// Stores an empty map under `key` and returns a container writing into it.
    pub fn nested_container(&mut self, key: &str) -> KeyedEncodingContainer<'_, 'o> {
        self.target()
            .insert(key.to_string(), Value::Map(Map::new()));
        let (slots, coding_path) = self.nested_slots(key);
        KeyedEncodingContainer::new(self.encoder, self.frame, slots, coding_path)
    }

    /// Stores an empty sequence under `key` and returns a container writing
    /// into it.
    pub fn nested_unkeyed_container(&mut self, key: &str) -> UnkeyedEncodingContainer<'_, 'o> {
        self.target()
            .insert(key.to_string(), Value::Sequence(Vec::new()));
        let (slots, coding_path) = self.nested_slots(key);
        UnkeyedEncodingContainer::new(self.encoder, self.frame, slots, coding_path)
    }

    /// Runs `f` against a referencing encoder whose result is stored under the
    /// reserved `"super"` key.
    ///
    /// The result is written back whether or not `f` fails; if `f` wrote
    /// nothing, an empty map is stored. Returns the result of `f`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree_coding::{to_tree, tree, Encodable, Encoder, Result, Value};
    ///
    /// struct Base {
    ///     id: u32,
    /// }
    ///
    /// impl Encodable for Base {
    ///     fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
    ///         encoder.container().encode("id", &self.id)
    ///     }
    /// }
    ///
    /// struct Derived {
    ///     base: Base,
    ///     name: String,
    /// }
    ///
    /// impl Encodable for Derived {
    ///     fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
    ///         let mut container = encoder.container();
    ///         container.encode("name", &self.name)?;
    ///         container.super_encoder(|sup| self.base.encode(sup))
    ///     }
    /// }
    ///
    /// let derived = Derived { base: Base { id: 1 }, name: "d".to_string() };
    /// let map = to_tree(&derived).unwrap();
    /// assert_eq!(Value::Map(map), tree!({ "name": "d", "super": { "id": 1 } }));
    /// ```
    pub fn super_encoder<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Encoder<'o>) -> Result<()>,
    {
        self.delegate(SUPER_KEY, CodingKey::Super, f)
    }

    /// Like [`KeyedEncodingContainer::super_encoder`], storing the result
    /// under `key`.
    pub fn super_encoder_for_key<F>(&mut self, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Encoder<'o>) -> Result<()>,
    {
        self.delegate(key, CodingKey::from(key), f)
    }

    fn delegate<F>(&mut self, key: &str, segment: CodingKey, f: F) -> Result<()>
    where
        F: FnOnce(&mut Encoder<'o>) -> Result<()>,
    {
        let mut referencing = ReferencingEncoder::new(
            self.encoder.options(),
            self.coding_path.appending(segment),
            Reference::Key(key.to_string()),
        );
        let result = f(referencing.encoder());
        referencing.finish(self.encoder.storage.resolve_mut(self.frame, &self.slots));
        result
    }
}
