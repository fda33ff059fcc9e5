use super::{Decoder, UnkeyedDecodingContainer};
use crate::options::MissingValueStrategy;
use crate::{CodingKey, CodingPath, Decodable, Error, Map, Result, Value, SUPER_KEY};
use log::{debug, trace};
use std::any::type_name;

static NULL: Value = Value::Null;

/// A view over a map node, reading values by key.
#[derive(Debug)]
pub struct KeyedDecodingContainer<'d, 'a> {
    decoder: &'d mut Decoder<'a>,
    map: &'a Map,
    coding_path: CodingPath,
}

impl<'d, 'a> KeyedDecodingContainer<'d, 'a> {
    pub(crate) fn new(decoder: &'d mut Decoder<'a>, map: &'a Map, coding_path: CodingPath) -> Self {
        KeyedDecodingContainer {
            decoder,
            map,
            coding_path,
        }
    }

    /// The path of the map this container reads.
    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    /// Every key present in the map, in map order.
    pub fn all_keys(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    /// Returns `true` if the map has an entry for `key`, null or not.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Returns `true` if the value under `key` is null.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if there is no entry for `key`.
    pub fn decode_nil(&self, key: &str) -> Result<bool> {
        match self.map.get(key) {
            Some(entry) => Ok(entry.is_null()),
            None => Err(Error::missing_key(
                &self.coding_path,
                key,
                format!("No value associated with key {:?}.", key),
            )),
        }
    }

    /// Decodes the value under `key`.
    ///
    /// A missing key is resolved through the configured
    /// [`MissingValueStrategy`]; a present null is [`Error::ValueNotFound`].
    pub fn decode<T: Decodable>(&mut self, key: &str) -> Result<T> {
        let Some(entry) = self.map.get(key) else {
            return self.missing::<T>(key);
        };

        match self
            .decoder
            .unbox_at::<T>(entry, &self.coding_path, CodingKey::from(key))?
        {
            Some(value) => Ok(value),
            None => Err(Error::value_not_found(
                &self.coding_path.appending(CodingKey::from(key)),
                type_name::<T>(),
                format!("Expected {} value but found null instead.", type_name::<T>()),
            )),
        }
    }

    /// Decodes the value under `key`, or `None` if the key is missing or
    /// the value is null.
    pub fn decode_if_present<T: Decodable>(&mut self, key: &str) -> Result<Option<T>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.decode(key).map(Some),
        }
    }

    fn missing<T: Decodable>(&self, key: &str) -> Result<T> {
        if let MissingValueStrategy::UseDefault(defaults) = &self.decoder.options().missing_value {
            if let Some(value) = defaults.get::<T>() {
                debug!(
                    "using default {} for missing key {:?} at {}",
                    type_name::<T>(),
                    key,
                    self.coding_path
                );
                return Ok(value);
            }
            trace!("no default registered for {}", type_name::<T>());
        }
        Err(Error::key_not_found::<T>(&self.coding_path, key))
    }

    fn entry_for_nested(&self, key: &str, what: &str) -> Result<(&'a Value, CodingPath)> {
        let path = self.coding_path.appending(CodingKey::from(key));
        match self.map.get(key) {
            Some(entry) => Ok((entry, path)),
            None => Err(Error::missing_key(
                &path,
                key,
                format!(
                    "Cannot get {} -- no value found for key {:?}",
                    what, key
                ),
            )),
        }
    }

    /// Views the map under `key` as a keyed container.
    pub fn nested_container(&mut self, key: &str) -> Result<KeyedDecodingContainer<'_, 'a>> {
        let (entry, path) = self.entry_for_nested(key, "nested keyed container")?;
        match entry {
            Value::Map(map) => Ok(KeyedDecodingContainer::new(self.decoder, map, path)),
            other => Err(Error::type_mismatch(&path, "a map", other)),
        }
    }

    /// Views the sequence under `key` as an unkeyed container.
    pub fn nested_unkeyed_container(
        &mut self,
        key: &str,
    ) -> Result<UnkeyedDecodingContainer<'_, 'a>> {
        let (entry, path) = self.entry_for_nested(key, "nested unkeyed container")?;
        match entry {
            Value::Sequence(items) => Ok(UnkeyedDecodingContainer::new(self.decoder, items, path)),
            other => Err(Error::type_mismatch(&path, "a sequence", other)),
        }
    }

    /// A decoder for the value stored under the reserved `"super"` key.
    ///
    /// A missing entry yields a decoder over a null node.
    pub fn super_decoder(&self) -> Decoder<'a> {
        let entry = self.map.get(SUPER_KEY).unwrap_or(&NULL);
        Decoder::new(
            entry,
            self.coding_path.appending(CodingKey::Super),
            self.decoder.options(),
        )
    }

    /// A decoder for the value stored under `key`.
    ///
    /// A missing entry yields a decoder over a null node.
    pub fn super_decoder_for_key(&self, key: &str) -> Decoder<'a> {
        let entry = self.map.get(key).unwrap_or(&NULL);
        Decoder::new(
            entry,
            self.coding_path.appending(CodingKey::from(key)),
            self.decoder.options(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::options::{DecoderOptions, DefaultValues};
    use crate::{tree, CodingKey, CodingPath, Decoder, Error, ErrorReason, Value};

    #[test]
    fn test_missing_vs_null() {
        let options = DecoderOptions::new();
        let value = tree!({ "x": null });
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut container = decoder.container().unwrap();

        assert!(container.decode_nil("x").unwrap());
        assert!(container.decode_nil("y").is_err());

        let err = container.decode::<i32>("x").unwrap_err();
        assert!(matches!(err, Error::ValueNotFound { .. }));
        assert_eq!(err.coding_path().unwrap(), &vec![CodingKey::from("x")]);

        let err = container.decode::<i32>("y").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound { .. }));
        assert!(err.type_tag().unwrap().is::<i32>());

        assert_eq!(container.decode_if_present::<i32>("x").unwrap(), None);
        assert_eq!(container.decode_if_present::<i32>("y").unwrap(), None);
        assert_eq!(container.decode::<Option<i32>>("x").unwrap(), None);
    }

    #[test]
    fn test_default_values() {
        let options = DecoderOptions::new().with_defaults(DefaultValues::new().insert(42u16));
        let value = tree!({});
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut container = decoder.container().unwrap();

        assert_eq!(container.decode::<u16>("missing").unwrap(), 42);
        let err = container.decode::<u32>("missing").unwrap_err();
        assert!(matches!(
            err.reason(),
            Some(ErrorReason::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_nested_containers() {
        let options = DecoderOptions::new();
        let value = tree!({ "inner": { "n": [1, 2] }, "flat": 3 });
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut container = decoder.container().unwrap();

        {
            let mut inner = container.nested_container("inner").unwrap();
            assert_eq!(inner.coding_path(), &vec![CodingKey::from("inner")]);
            let mut n = inner.nested_unkeyed_container("n").unwrap();
            assert_eq!(n.count(), 2);
            assert_eq!(n.decode::<i64>().unwrap(), 1);
        }

        let err = container.nested_container("flat").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let err = container.nested_unkeyed_container("absent").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound { .. }));
        assert_eq!(err.coding_path().unwrap(), &vec![CodingKey::from("absent")]);
    }

    #[test]
    fn test_super_decoder() {
        let options = DecoderOptions::new();
        let value = tree!({ "super": { "id": 7 } });
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let container = decoder.container().unwrap();

        let mut base = container.super_decoder();
        assert_eq!(base.coding_path(), &vec![CodingKey::Super]);
        let mut base = base.container().unwrap();
        assert_eq!(base.decode::<u8>("id").unwrap(), 7);

        let mut missing = container.super_decoder_for_key("other");
        assert!(missing.single_value_container().decode_nil());
        assert_eq!(missing.single_value_container().decode::<Value>().unwrap(), Value::Null);
    }
}
