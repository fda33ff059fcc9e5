use super::Decoder;
use crate::{CodingPath, Decodable, Error, Result};
use std::any::type_name;

/// A view over the current node as one value, with no key or index
/// bookkeeping.
#[derive(Debug)]
pub struct SingleValueDecodingContainer<'d, 'a> {
    decoder: &'d mut Decoder<'a>,
}

impl<'d, 'a> SingleValueDecodingContainer<'d, 'a> {
    pub(crate) fn new(decoder: &'d mut Decoder<'a>) -> Self {
        SingleValueDecodingContainer { decoder }
    }

    /// The path of the node being decoded.
    pub fn coding_path(&self) -> &CodingPath {
        self.decoder.coding_path()
    }

    /// Returns `true` if the current node is null.
    pub fn decode_nil(&self) -> bool {
        self.decoder.top().is_null()
    }

    /// Decodes the current node as a `T`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ValueNotFound`] if the node is null and `T` has
    /// no representation for null.
    pub fn decode<T: Decodable>(&mut self) -> Result<T> {
        let value = self.decoder.top();
        match T::unbox_value(value, self.decoder)? {
            Some(decoded) => Ok(decoded),
            None => Err(Error::value_not_found(
                self.decoder.coding_path(),
                type_name::<T>(),
                format!("Expected {} but found null value instead.", type_name::<T>()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::options::DecoderOptions;
    use crate::{CodingPath, Decoder, Error, Value};

    #[test]
    fn test_single_value() {
        let options = DecoderOptions::new();
        let value = Value::from(9);
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut single = decoder.single_value_container();

        assert!(!single.decode_nil());
        assert_eq!(single.decode::<u32>().unwrap(), 9);
        assert_eq!(single.decode::<f64>().unwrap(), 9.0);
    }

    #[test]
    fn test_null_value() {
        let options = DecoderOptions::new();
        let value = Value::Null;
        let mut decoder = Decoder::new(&value, CodingPath::new(), &options);
        let mut single = decoder.single_value_container();

        assert!(single.decode_nil());
        let err = single.decode::<String>().unwrap_err();
        assert!(matches!(err, Error::ValueNotFound { .. }));
        assert_eq!(single.decode::<Option<String>>().unwrap(), None);
    }
}
