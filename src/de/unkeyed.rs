use super::{Decoder, KeyedDecodingContainer};
use crate::{CodingKey, CodingPath, Decodable, Error, Result, Value};
use std::any::type_name;

/// A view over a sequence node, reading elements in order.
///
/// The cursor advances only when a read succeeds, so a failed read leaves the
/// element in place.
#[derive(Debug)]
pub struct UnkeyedDecodingContainer<'d, 'a> {
    decoder: &'d mut Decoder<'a>,
    items: &'a [Value],
    coding_path: CodingPath,
    current_index: usize,
}

impl<'d, 'a> UnkeyedDecodingContainer<'d, 'a> {
    pub(crate) fn new(decoder: &'d mut Decoder<'a>, items: &'a [Value], coding_path: CodingPath) -> Self {
        UnkeyedDecodingContainer {
            decoder,
            items,
            coding_path,
            current_index: 0,
        }
    }

    /// The path of the sequence this container reads.
    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    /// The number of elements in the sequence.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` once every element has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.current_index >= self.items.len()
    }

    /// The index of the next element to read.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    fn current_path(&self) -> CodingPath {
        self.coding_path.appending(CodingKey::Index(self.current_index))
    }

    fn current<T: ?Sized>(&self) -> Result<&'a Value> {
        match self.items.get(self.current_index) {
            Some(value) => Ok(value),
            None => Err(Error::value_not_found(
                &self.current_path(),
                type_name::<T>(),
                "Unkeyed container is at end.",
            )),
        }
    }

    /// Consumes the current element if it is null.
    pub fn decode_nil(&mut self) -> Result<bool> {
        if self.current::<Value>()?.is_null() {
            self.current_index += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Decodes the current element and advances past it.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ValueNotFound`] at the end of the sequence or if
    /// the element is null.
    pub fn decode<T: Decodable>(&mut self) -> Result<T> {
        let entry = self.current::<T>()?;
        match self.decoder.unbox_at::<T>(
            entry,
            &self.coding_path,
            CodingKey::Index(self.current_index),
        )? {
            Some(value) => {
                self.current_index += 1;
                Ok(value)
            }
            None => Err(Error::value_not_found(
                &self.current_path(),
                type_name::<T>(),
                format!("Expected {} but found null instead.", type_name::<T>()),
            )),
        }
    }

    /// Decodes the current element, or `None` if the sequence is exhausted or
    /// the element is null. A null element is consumed.
    pub fn decode_if_present<T: Decodable>(&mut self) -> Result<Option<T>> {
        if self.is_at_end() || self.decode_nil()? {
            return Ok(None);
        }
        self.decode().map(Some)
    }

    /// Views the current element as a keyed container and advances past it.
    pub fn nested_container(&mut self) -> Result<KeyedDecodingContainer<'_, 'a>> {
        let entry = self.current::<KeyedDecodingContainer<'static, 'static>>()?;
        let path = self.current_path();
        let map = match entry {
            Value::Map(map) => map,
            Value::Null => {
                return Err(Error::null_container::<KeyedDecodingContainer<'static, 'static>>(
                    &path,
                    "Cannot get keyed decoding container -- found null value instead.",
                ))
            }
            other => return Err(Error::type_mismatch(&path, "a map", other)),
        };
        self.current_index += 1;
        Ok(KeyedDecodingContainer::new(self.decoder, map, path))
    }

    /// Views the current element as an unkeyed container and advances past it.
    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedDecodingContainer<'_, 'a>> {
        let entry = self.current::<UnkeyedDecodingContainer<'static, 'static>>()?;
        let path = self.current_path();
        let items = match entry {
            Value::Sequence(items) => items,
            Value::Null => {
                return Err(Error::null_container::<UnkeyedDecodingContainer<'static, 'static>>(
                    &path,
                    "Cannot get unkeyed decoding container -- found null value instead.",
                ))
            }
            other => return Err(Error::type_mismatch(&path, "a sequence", other)),
        };
        self.current_index += 1;
        Ok(UnkeyedDecodingContainer::new(self.decoder, items, path))
    }

    /// A decoder for the current element; advances past it.
    pub fn super_decoder(&mut self) -> Result<Decoder<'a>> {
        let entry = self.current::<Decoder<'static>>()?;
        let path = self.current_path();
        self.current_index += 1;
        Ok(Decoder::new(entry, path, self.decoder.options()))
    }
}

#[cfg(test)]
mod tests {
    use crate::options::DecoderOptions;
    use crate::{tree, CodingKey, CodingPath, Decoder, Error};

    #[test]
    fn test_cursor_advances_only_on_success() {
        let options = DecoderOptions::new();
        let value = tree!([1, "two"]);
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut items = decoder.unkeyed_container().unwrap();

        assert_eq!(items.decode::<i32>().unwrap(), 1);
        assert_eq!(items.current_index(), 1);

        let err = items.decode::<i32>().unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(err.coding_path().unwrap(), &vec![CodingKey::from(1)]);
        assert_eq!(items.current_index(), 1);

        assert_eq!(items.decode::<String>().unwrap(), "two");
        assert!(items.is_at_end());
    }

    #[test]
    fn test_exhaustion() {
        let options = DecoderOptions::new();
        let value = tree!([]);
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut items = decoder.unkeyed_container().unwrap();

        for _ in 0..2 {
            let err = items.decode::<bool>().unwrap_err();
            assert!(matches!(err, Error::ValueNotFound { .. }));
            assert_eq!(err.coding_path().unwrap(), &vec![CodingKey::from(0)]);
            assert_eq!(items.current_index(), 0);
        }
        assert_eq!(items.decode_if_present::<bool>().unwrap(), None);
    }

    #[test]
    fn test_nil_and_nested() {
        let options = DecoderOptions::new();
        let value = tree!([null, 5, { "k": true }, [null]]);
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut items = decoder.unkeyed_container().unwrap();

        assert!(items.decode_nil().unwrap());
        assert!(!items.decode_nil().unwrap());
        assert_eq!(items.current_index(), 1);
        assert_eq!(items.decode::<u64>().unwrap(), 5);

        {
            let mut map = items.nested_container().unwrap();
            assert_eq!(map.coding_path(), &vec![CodingKey::from(2)]);
            assert!(map.decode::<bool>("k").unwrap());
        }

        let mut base = items.super_decoder().unwrap();
        let mut inner = base.unkeyed_container().unwrap();
        assert_eq!(inner.decode_if_present::<i8>().unwrap(), None);
        assert!(items.is_at_end());
    }
}
