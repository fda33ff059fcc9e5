//! Coercion rules between tree scalars and Rust primitives.
//!
//! Every `unbox_*` function follows the same contract: `Ok(None)` for a null
//! node, `Ok(Some(_))` for a node that converts, and an error otherwise.
//! Kind mismatches are [`Error::TypeMismatch`]; nodes of the right kind whose
//! content cannot be represented are [`Error::DataCorrupted`].
//!
//! Booleans and numbers never satisfy each other, whatever their content.

use crate::options::NonConformingFloatStrategy;
use crate::{CodingPath, Error, Number, Result, Value};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::any::type_name;
use url::Url;
use uuid::Uuid;

pub(crate) fn unbox_bool(value: &Value, path: &CodingPath) -> Result<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        other => Err(Error::type_mismatch(path, type_name::<bool>(), other)),
    }
}

/// Converts a numeric node to an integer type, accepting it only if the
/// conversion is exact.
pub(crate) fn unbox_integer<T>(value: &Value, path: &CodingPath) -> Result<Option<T>>
where
    T: TryFrom<i128> + 'static,
{
    let exact = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i128(),
        Value::Decimal(d) if d.fract().is_zero() => d.to_i128(),
        Value::Decimal(_) => None,
        other => return Err(Error::type_mismatch(path, type_name::<T>(), other)),
    };

    match exact.and_then(|i| T::try_from(i).ok()) {
        Some(converted) => Ok(Some(converted)),
        None => Err(Error::corrupted_value::<T>(
            path,
            value,
            format!(
                "Parsed tree number <{}> does not fit in {}.",
                value,
                type_name::<T>()
            ),
        )),
    }
}

pub(crate) fn unbox_f64(
    value: &Value,
    path: &CodingPath,
    strategy: &NonConformingFloatStrategy,
) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(Some(n.as_f64())),
        Value::Decimal(d) => match d.to_f64() {
            Some(f) => Ok(Some(f)),
            None => Err(Error::corrupted_value::<f64>(
                path,
                value,
                format!("Decimal <{}> does not fit in f64.", d),
            )),
        },
        Value::String(s) => match strategy.sentinels().and_then(|sentinels| sentinels.parse(s)) {
            Some(f) => Ok(Some(f)),
            None => Err(Error::type_mismatch(path, type_name::<f64>(), value)),
        },
        other => Err(Error::type_mismatch(path, type_name::<f64>(), other)),
    }
}

/// Narrows to `f32`. Finite values are checked against the `f32` range;
/// precision loss inside the range is accepted.
pub(crate) fn unbox_f32(
    value: &Value,
    path: &CodingPath,
    strategy: &NonConformingFloatStrategy,
) -> Result<Option<f32>> {
    if let Value::String(_) = value {
        return Ok(unbox_f64(value, path, strategy)?.map(|f| f as f32));
    }

    let Some(wide) = unbox_f64(value, path, strategy)? else {
        return Ok(None);
    };
    if wide.abs() <= f64::from(f32::MAX) {
        Ok(Some(wide as f32))
    } else {
        Err(Error::corrupted_value::<f32>(
            path,
            value,
            format!("Parsed tree number <{}> does not fit in f32.", value),
        ))
    }
}

/// Represents an `f64` as a tree node, honouring the non-conforming float
/// strategy for infinities and NaN.
pub(crate) fn box_float(
    value: f64,
    path: &CodingPath,
    strategy: &NonConformingFloatStrategy,
) -> Result<Value> {
    if value.is_finite() {
        return Ok(Value::Number(Number::Float(value)));
    }

    match strategy.sentinels() {
        Some(sentinels) => Ok(Value::String(sentinels.format(value).to_string())),
        None => Err(Error::invalid_value(
            path,
            value,
            format!(
                "Unable to encode {} directly. Use NonConformingFloatStrategy::ConvertString to specify how the value should be encoded.",
                float_name(value)
            ),
        )),
    }
}

fn float_name(value: f64) -> &'static str {
    if value.is_nan() {
        "f64::NAN"
    } else if value.is_sign_positive() {
        "f64::INFINITY"
    } else {
        "f64::NEG_INFINITY"
    }
}

/// Strings, plus identifiers and locators already materialized in the tree.
pub(crate) fn unbox_string(value: &Value, path: &CodingPath) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Url(url) => Ok(Some(url.as_str().to_string())),
        Value::Uuid(id) => Ok(Some(id.to_string())),
        other => Err(Error::type_mismatch(path, type_name::<String>(), other)),
    }
}

pub(crate) fn unbox_char(value: &Value, path: &CodingPath) -> Result<Option<char>> {
    let Some(s) = unbox_string(value, path)? else {
        return Ok(None);
    };
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => Err(Error::corrupted_value::<char>(
            path,
            value,
            format!("Expected a single character but found {:?}.", s),
        )),
    }
}

/// Identifiers: native values, canonical text, or a sequence of 16 bytes.
pub(crate) fn unbox_uuid(value: &Value, path: &CodingPath) -> Result<Option<Uuid>> {
    match value {
        Value::Null => Ok(None),
        Value::Uuid(id) => Ok(Some(*id)),
        Value::String(s) => match Uuid::parse_str(s) {
            Ok(id) => Ok(Some(id)),
            Err(_) => Err(Error::type_mismatch(path, type_name::<Uuid>(), value)),
        },
        Value::Sequence(items) if items.len() == 16 => {
            let mut bytes = [0u8; 16];
            for (slot, item) in bytes.iter_mut().zip(items) {
                *slot = match item {
                    Value::Number(n) => n.as_i128().and_then(|i| u8::try_from(i).ok()),
                    _ => None,
                }
                .ok_or_else(|| Error::type_mismatch(path, type_name::<Uuid>(), value))?;
            }
            Ok(Some(Uuid::from_bytes(bytes)))
        }
        other => Err(Error::type_mismatch(path, type_name::<Uuid>(), other)),
    }
}

pub(crate) fn unbox_url(value: &Value, path: &CodingPath) -> Result<Option<Url>> {
    if let Value::Url(url) = value {
        return Ok(Some(url.clone()));
    }

    let Some(text) = unbox_string(value, path)? else {
        return Ok(None);
    };
    match Url::parse(&text) {
        Ok(url) => Ok(Some(url)),
        Err(err) => Err(Error::corrupted_value::<Url>(
            path,
            value,
            format!("Invalid URL string {:?}: {}.", text, err),
        )),
    }
}

/// Decimals: native values directly, anything else through the `f64` rule.
pub(crate) fn unbox_decimal(
    value: &Value,
    path: &CodingPath,
    strategy: &NonConformingFloatStrategy,
) -> Result<Option<Decimal>> {
    if let Value::Decimal(d) = value {
        return Ok(Some(*d));
    }

    let Some(wide) = unbox_f64(value, path, strategy)? else {
        return Ok(None);
    };
    match Decimal::try_from(wide) {
        Ok(d) => Ok(Some(d)),
        Err(_) => Err(Error::corrupted_value::<Decimal>(
            path,
            value,
            format!("Parsed tree number <{}> does not fit in a decimal.", value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FloatSentinels;
    use crate::ErrorReason;

    fn root() -> CodingPath {
        CodingPath::new()
    }

    #[test]
    fn test_null_is_absent_for_every_scalar() {
        let throw = NonConformingFloatStrategy::Throw;
        assert_eq!(unbox_bool(&Value::Null, &root()).unwrap(), None);
        assert_eq!(unbox_integer::<i8>(&Value::Null, &root()).unwrap(), None);
        assert_eq!(unbox_f64(&Value::Null, &root(), &throw).unwrap(), None);
        assert_eq!(unbox_string(&Value::Null, &root()).unwrap(), None);
        assert_eq!(unbox_uuid(&Value::Null, &root()).unwrap(), None);
        assert_eq!(unbox_decimal(&Value::Null, &root(), &throw).unwrap(), None);
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(
            unbox_integer::<u8>(&Value::from(255), &root()).unwrap(),
            Some(255)
        );
        let err = unbox_integer::<u8>(&Value::from(300), &root()).unwrap_err();
        assert!(matches!(err, Error::DataCorrupted { .. }));
        assert_eq!(
            err.reason(),
            Some(&ErrorReason::DataCorrupted {
                value: Value::from(300),
                ty: crate::TypeTag::of::<u8>(),
            })
        );

        assert!(unbox_integer::<u32>(&Value::from(-1), &root()).is_err());
        assert!(unbox_integer::<i64>(&Value::from(1.5), &root()).is_err());
        assert_eq!(
            unbox_integer::<i64>(&Value::from(2.0), &root()).unwrap(),
            Some(2)
        );
        assert_eq!(
            unbox_integer::<u64>(&Value::from(u64::MAX), &root()).unwrap(),
            Some(u64::MAX)
        );
        assert_eq!(
            unbox_integer::<i32>(&Value::Decimal(Decimal::new(1200, 2)), &root()).unwrap(),
            Some(12)
        );
    }

    #[test]
    fn test_bool_and_numbers_do_not_alias() {
        let err = unbox_integer::<i32>(&Value::Bool(true), &root()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let err = unbox_bool(&Value::from(1), &root()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let throw = NonConformingFloatStrategy::Throw;
        assert!(unbox_f64(&Value::Bool(false), &root(), &throw).is_err());
    }

    #[test]
    fn test_float_rules() {
        let throw = NonConformingFloatStrategy::Throw;
        assert_eq!(
            unbox_f64(&Value::from(3), &root(), &throw).unwrap(),
            Some(3.0)
        );
        assert_eq!(
            unbox_f32(&Value::from(0.5), &root(), &throw).unwrap(),
            Some(0.5)
        );
        let err = unbox_f32(&Value::from(1e300), &root(), &throw).unwrap_err();
        assert!(matches!(err, Error::DataCorrupted { .. }));

        let err = unbox_f64(&Value::from("Infinity"), &root(), &throw).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let convert = NonConformingFloatStrategy::ConvertString(FloatSentinels::javascript());
        assert_eq!(
            unbox_f64(&Value::from("-Infinity"), &root(), &convert).unwrap(),
            Some(f64::NEG_INFINITY)
        );
        assert_eq!(
            unbox_f32(&Value::from("Infinity"), &root(), &convert).unwrap(),
            Some(f32::INFINITY)
        );
    }

    #[test]
    fn test_box_float() {
        let throw = NonConformingFloatStrategy::Throw;
        assert_eq!(
            box_float(1.25, &root(), &throw).unwrap(),
            Value::from(1.25)
        );
        let err = box_float(f64::INFINITY, &root(), &throw).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
        assert!(err.to_string().contains("f64::INFINITY"));

        let convert = NonConformingFloatStrategy::ConvertString(FloatSentinels::javascript());
        assert_eq!(
            box_float(f64::NAN, &root(), &convert).unwrap(),
            Value::from("NaN")
        );
    }

    #[test]
    fn test_string_accepts_materialized_values() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(
            unbox_string(&Value::Url(url), &root()).unwrap(),
            Some("https://example.com/".to_string())
        );
        assert_eq!(
            unbox_string(&Value::Uuid(Uuid::nil()), &root()).unwrap(),
            Some("00000000-0000-0000-0000-000000000000".to_string())
        );
        assert!(unbox_string(&Value::from(1), &root()).is_err());
    }

    #[test]
    fn test_identifier_forms() {
        let id = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
        assert_eq!(unbox_uuid(&Value::Uuid(id), &root()).unwrap(), Some(id));
        assert_eq!(
            unbox_uuid(&Value::from(id.to_string()), &root()).unwrap(),
            Some(id)
        );

        let bytes: Vec<Value> = id.as_bytes().iter().map(|b| Value::from(*b)).collect();
        assert_eq!(
            unbox_uuid(&Value::Sequence(bytes), &root()).unwrap(),
            Some(id)
        );

        let err = unbox_uuid(&Value::from("not-an-id"), &root()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_locator_content_errors_are_corruption() {
        let err = unbox_url(&Value::from("not a url"), &root()).unwrap_err();
        assert!(matches!(err, Error::DataCorrupted { .. }));

        let err = unbox_url(&Value::from(3), &root()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_decimal_falls_back_to_float() {
        let throw = NonConformingFloatStrategy::Throw;
        let d = Decimal::new(1999, 2);
        assert_eq!(
            unbox_decimal(&Value::Decimal(d), &root(), &throw).unwrap(),
            Some(d)
        );
        assert_eq!(
            unbox_decimal(&Value::from(2.5), &root(), &throw).unwrap(),
            Some(Decimal::new(25, 1))
        );
        assert!(unbox_decimal(&Value::from("x"), &root(), &throw).is_err());
    }

    #[test]
    fn test_char() {
        assert_eq!(unbox_char(&Value::from("x"), &root()).unwrap(), Some('x'));
        assert!(unbox_char(&Value::from("xy"), &root()).is_err());
    }
}
