use super::Encoder;
use crate::{CodingPath, Encodable, Result, Value};

/// Writes the current value as a single node.
#[derive(Debug)]
pub struct SingleValueEncodingContainer<'e, 'o> {
    encoder: &'e mut Encoder<'o>,
}

impl<'e, 'o> SingleValueEncodingContainer<'e, 'o> {
    pub(crate) fn new(encoder: &'e mut Encoder<'o>) -> Self {
        SingleValueEncodingContainer { encoder }
    }

    /// The path of the value being encoded.
    pub fn coding_path(&self) -> &CodingPath {
        self.encoder.coding_path()
    }

    fn assert_can_encode_new_value(&self) {
        assert!(
            self.encoder.can_encode_new_value(),
            "Attempt to encode value through single value container when previously value already encoded."
        );
    }

    /// # Panics
    ///
    /// Panics if the current value was already encoded.
    pub fn encode_nil(&mut self) -> Result<()> {
        self.assert_can_encode_new_value();
        self.encoder.storage.push(Value::Null);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the current value was already encoded.
    pub fn encode<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.assert_can_encode_new_value();
        if let Some(boxed) = value.box_value(self.encoder)? {
            self.encoder.storage.push(boxed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::options::EncoderOptions;
    use crate::{CodingPath, Encodable, Encoder, Result, Value};

    struct Wrapper(u32);

    impl Encodable for Wrapper {
        fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
            encoder.single_value_container().encode(&self.0)
        }
    }

    struct Twice;

    impl Encodable for Twice {
        fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
            encoder.single_value_container().encode(&1)?;
            encoder.single_value_container().encode(&2)
        }
    }

    #[test]
    fn test_wrapper_encodes_inner() {
        let options = EncoderOptions::new();
        let mut encoder = Encoder::new(&options, CodingPath::new());
        assert_eq!(
            encoder.box_nested(&Wrapper(5)).unwrap(),
            Some(Value::from(5))
        );
    }

    #[test]
    #[should_panic(expected = "previously value already encoded")]
    fn test_second_value_panics() {
        let options = EncoderOptions::new();
        let mut encoder = Encoder::new(&options, CodingPath::new());
        let _ = encoder.box_nested(&Twice);
    }
}
