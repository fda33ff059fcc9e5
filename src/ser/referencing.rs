use super::Encoder;
use crate::options::EncoderOptions;
use crate::{CodingPath, Map, Value};
use log::trace;

/// The slot of the outer container that a referencing encoder fills.
#[derive(Debug, Clone)]
pub(crate) enum Reference {
    /// Assign at this key of a map.
    Key(String),
    /// Insert at this index of a sequence.
    Index(usize),
}

/// An encoder with its own stack whose single result is written into a slot
/// of an outer container.
///
/// [`ReferencingEncoder::finish`] consumes the encoder, so the write-back
/// happens exactly once.
#[derive(Debug)]
pub(crate) struct ReferencingEncoder<'o> {
    encoder: Encoder<'o>,
    reference: Reference,
}

impl<'o> ReferencingEncoder<'o> {
    pub(crate) fn new(options: &'o EncoderOptions, coding_path: CodingPath, reference: Reference) -> Self {
        ReferencingEncoder {
            encoder: Encoder::new(options, coding_path),
            reference,
        }
    }

    pub(crate) fn encoder(&mut self) -> &mut Encoder<'o> {
        &mut self.encoder
    }

    /// Resolves the accumulated result and writes it into `target`.
    ///
    /// Nothing written resolves to an empty map.
    ///
    /// # Panics
    ///
    /// Panics if more than one value was left on the stack, or if `target`
    /// is not the kind of container the reference addresses.
    pub(crate) fn finish(mut self, target: &mut Value) {
        let value = match self.encoder.storage.len() {
            0 => Value::Map(Map::new()),
            1 => self.encoder.storage.pop_container(),
            _ => panic!("Referencing encoder finished with multiple containers on stack."),
        };

        trace!(
            "writing delegated {} back at {}",
            value.kind(),
            self.encoder.coding_path
        );

        match (self.reference, target) {
            (Reference::Key(key), Value::Map(map)) => {
                map.insert(key, value);
            }
            (Reference::Index(index), Value::Sequence(items)) => {
                items.insert(index, value);
            }
            (reference, other) => panic!(
                "Referencing encoder cannot write {:?} into {}.",
                reference,
                other.kind()
            ),
        }
    }
}
