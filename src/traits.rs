//! The [`Encodable`] / [`Decodable`] capability pair.
//!
//! A type takes part in tree coding by implementing these traits by hand (or
//! through generated code). `encode` and `decode` describe the value's own
//! structure through the containers of an [`Encoder`] or [`Decoder`].
//!
//! `box_value` and `unbox_value` are the entry points the engines use for
//! nested values. Their defaults recurse into `encode`/`decode` on a fresh
//! stack frame. Scalars and the adapter types (`Uuid`, `Url`, `Decimal`)
//! override them with a direct tree representation and the coercion rules,
//! so the choice of representation is made per type at compile time.
//!
//! ## Implementations
//!
//! | type | tree representation |
//! |---|---|
//! | `bool` | `Bool` |
//! | integers, `f32`, `f64` | `Number` (non-finite floats per strategy) |
//! | `String`, `str`, `char` | `String` |
//! | `Option<T>` | `Null` or the inner value |
//! | `Vec<T>`, `[T]` | `Sequence` |
//! | `HashMap<String, V>`, `BTreeMap<String, V>` | `Map` |
//! | `Uuid`, `Url` | `String` (decodes native values too) |
//! | `Decimal` | `Decimal` |
//! | `DateTime<Utc>` | RFC 3339 `String` (decodes epoch seconds too) |
//! | `Bytes` | `Sequence` of byte values |
//! | `Value`, `Map` | themselves |

use crate::{coerce, Decoder, Encoder, Error, Map, Result, Value};
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use url::Url;
use uuid::Uuid;

/// A type that can write itself into a value tree.
pub trait Encodable {
    /// Writes this value through one of `encoder`'s containers.
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()>;

    /// The tree node for this value, or `None` if it encodes nothing.
    fn box_value(&self, encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        encoder.box_nested(self)
    }
}

/// A type that can read itself from a value tree.
pub trait Decodable: Sized + 'static {
    /// Reads this value from the current node of `decoder`.
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self>;

    /// Converts `value`, or returns `None` if it is null.
    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        decoder.decode_nested(value).map(Some)
    }
}

macro_rules! scalar_decode {
    () => {
        fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
            decoder.single_value_container().decode()
        }
    };
}

macro_rules! scalar_encode {
    () => {
        fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
            encoder.single_value_container().encode(self)
        }
    };
}

impl Encodable for bool {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::Bool(*self)))
    }
}

impl Decodable for bool {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_bool(value, decoder.coding_path())
    }
}

macro_rules! integer_impls {
    ($($ty:ty),*) => {
        $(
            impl Encodable for $ty {
                scalar_encode!();

                fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
                    Ok(Some(Value::from(*self)))
                }
            }

            impl Decodable for $ty {
                scalar_decode!();

                fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
                    coerce::unbox_integer::<$ty>(value, decoder.coding_path())
                }
            }
        )*
    };
}

integer_impls!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Encodable for f32 {
    scalar_encode!();

    fn box_value(&self, encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        encoder.box_float(f64::from(*self)).map(Some)
    }
}

impl Decodable for f32 {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_f32(
            value,
            decoder.coding_path(),
            &decoder.options().non_conforming_float,
        )
    }
}

impl Encodable for f64 {
    scalar_encode!();

    fn box_value(&self, encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        encoder.box_float(*self).map(Some)
    }
}

impl Decodable for f64 {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_f64(
            value,
            decoder.coding_path(),
            &decoder.options().non_conforming_float,
        )
    }
}

impl Encodable for str {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::String(self.to_string())))
    }
}

impl Encodable for String {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::String(self.clone())))
    }
}

impl Decodable for String {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_string(value, decoder.coding_path())
    }
}

impl Encodable for char {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::String(self.to_string())))
    }
}

impl Decodable for char {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_char(value, decoder.coding_path())
    }
}

impl Encodable for Uuid {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::String(self.to_string())))
    }
}

impl Decodable for Uuid {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_uuid(value, decoder.coding_path())
    }
}

impl Encodable for Url {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::String(self.as_str().to_string())))
    }
}

impl Decodable for Url {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_url(value, decoder.coding_path())
    }
}

impl Encodable for Decimal {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::Decimal(*self)))
    }
}

impl Decodable for Decimal {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        coerce::unbox_decimal(
            value,
            decoder.coding_path(),
            &decoder.options().non_conforming_float,
        )
    }
}

// Timestamps and blobs go through their own container logic rather than a
// direct representation.

impl Encodable for DateTime<Utc> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let text = self.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        encoder.single_value_container().encode(&text)
    }
}

impl Decodable for DateTime<Utc> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let node: Value = decoder.single_value_container().decode()?;
        let path = decoder.coding_path();
        match &node {
            Value::String(text) => text.parse::<DateTime<Utc>>().map_err(|err| {
                Error::corrupted_value::<Self>(
                    path,
                    &node,
                    format!("Expected an RFC 3339 timestamp: {}.", err),
                )
            }),
            Value::Number(n) => {
                let seconds = n.as_f64();
                let whole = seconds.floor();
                let nanos = ((seconds - whole) * 1e9).round() as u32;
                let timestamp = if whole >= i64::MIN as f64 && whole <= i64::MAX as f64 {
                    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
                } else {
                    None
                };
                timestamp.ok_or_else(|| {
                    Error::corrupted_value::<Self>(
                        path,
                        &node,
                        format!("Timestamp <{}> is out of range.", n),
                    )
                })
            }
            other => Err(Error::type_mismatch(path, "an RFC 3339 timestamp", other)),
        }
    }
}

impl Encodable for Bytes {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut container = encoder.unkeyed_container();
        for byte in self.iter() {
            container.encode(byte)?;
        }
        Ok(())
    }
}

impl Decodable for Bytes {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut container = decoder.unkeyed_container()?;
        let mut bytes = Vec::with_capacity(container.count());
        while !container.is_at_end() {
            bytes.push(container.decode::<u8>()?);
        }
        Ok(Bytes::from(bytes))
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        match self {
            Some(value) => value.encode(encoder),
            None => encoder.single_value_container().encode_nil(),
        }
    }

    fn box_value(&self, encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        match self {
            Some(value) => value.box_value(encoder),
            None => Ok(Some(Value::Null)),
        }
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        if decoder.single_value_container().decode_nil() {
            Ok(None)
        } else {
            T::decode(decoder).map(Some)
        }
    }

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(Some(None));
        }
        T::unbox_value(value, decoder).map(|inner| inner.map(Some))
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }

    fn box_value(&self, encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        (**self).box_value(encoder)
    }
}

impl<T: Encodable + ?Sized> Encodable for Box<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }

    fn box_value(&self, encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        (**self).box_value(encoder)
    }
}

impl<T: Decodable> Decodable for Box<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        T::decode(decoder).map(Box::new)
    }

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        T::unbox_value(value, decoder).map(|inner| inner.map(Box::new))
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut container = encoder.unkeyed_container();
        for element in self {
            container.encode(element)?;
        }
        Ok(())
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut container = decoder.unkeyed_container()?;
        let mut elements = Vec::with_capacity(container.count());
        while !container.is_at_end() {
            elements.push(container.decode()?);
        }
        Ok(elements)
    }
}

impl<V: Encodable, S: BuildHasher> Encodable for HashMap<String, V, S> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut container = encoder.container();
        for (key, value) in self {
            container.encode(key, value)?;
        }
        Ok(())
    }
}

impl<V: Decodable, S: BuildHasher + Default + 'static> Decodable for HashMap<String, V, S> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut container = decoder.container()?;
        let keys = container.all_keys();
        let mut map = HashMap::with_capacity_and_hasher(keys.len(), S::default());
        for key in keys {
            let value = container.decode(&key)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<V: Encodable> Encodable for BTreeMap<String, V> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut container = encoder.container();
        for (key, value) in self {
            container.encode(key, value)?;
        }
        Ok(())
    }
}

impl<V: Decodable> Decodable for BTreeMap<String, V> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut container = decoder.container()?;
        let mut map = BTreeMap::new();
        for key in container.all_keys() {
            let value = container.decode(&key)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl Encodable for Value {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(self.clone()))
    }
}

impl Decodable for Value {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, _decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        Ok(Some(value.clone()))
    }
}

impl Encodable for Map {
    scalar_encode!();

    fn box_value(&self, _encoder: &mut Encoder<'_>) -> Result<Option<Value>> {
        Ok(Some(Value::Map(self.clone())))
    }
}

impl Decodable for Map {
    scalar_decode!();

    fn unbox_value<'a>(value: &'a Value, decoder: &mut Decoder<'a>) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Map(map) => Ok(Some(map.clone())),
            other => Err(Error::type_mismatch(decoder.coding_path(), "a map", other)),
        }
    }
}
