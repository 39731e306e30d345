//! Scalar coercers, one per canonical representation.
//!
//! Each coercer matches on the [`RawValue`] variant and either builds the
//! canonical value or reports the rejected input.

use chrono::{DateTime, Utc};

use crate::error::{NumericTarget, ReformatError, ReformatResult};
use crate::layout::LayoutTable;
use crate::value::{zero_timestamp, RawValue, Timestamp};

/// Normalizes any integer or float representation to `i64`.
///
/// Floats truncate toward zero (saturating at the `i64` bounds, NaN is 0).
/// `u64` values above `i64::MAX` wrap. Strings are not accepted.
pub fn reformat_int64(value: &RawValue) -> ReformatResult<i64> {
    match *value {
        RawValue::F32(v) => Ok(v as i64),
        RawValue::F64(v) => Ok(v as i64),
        RawValue::I8(v) => Ok(i64::from(v)),
        RawValue::I16(v) => Ok(i64::from(v)),
        RawValue::I32(v) => Ok(i64::from(v)),
        RawValue::I64(v) => Ok(v),
        RawValue::U8(v) => Ok(i64::from(v)),
        RawValue::U16(v) => Ok(i64::from(v)),
        RawValue::U32(v) => Ok(i64::from(v)),
        RawValue::U64(v) => Ok(v as i64),
        _ => Err(ReformatError::UnsupportedRepresentation {
            target: NumericTarget::Int64,
            value: value.clone(),
        }),
    }
}

/// Normalizes any numeric representation, or a base-10 float string, to `f64`.
pub fn reformat_float64(value: &RawValue) -> ReformatResult<f64> {
    match value {
        RawValue::F32(v) => Ok(f64::from(*v)),
        RawValue::F64(v) => Ok(*v),
        RawValue::I8(v) => Ok(f64::from(*v)),
        RawValue::I16(v) => Ok(f64::from(*v)),
        RawValue::I32(v) => Ok(f64::from(*v)),
        RawValue::I64(v) => Ok(*v as f64),
        RawValue::U8(v) => Ok(f64::from(*v)),
        RawValue::U16(v) => Ok(f64::from(*v)),
        RawValue::U32(v) => Ok(f64::from(*v)),
        RawValue::U64(v) => Ok(*v as f64),
        RawValue::String(s) => s.parse::<f64>().map_err(|source| ReformatError::ParseFloat {
            input: s.clone(),
            source,
        }),
        _ => Err(ReformatError::UnsupportedRepresentation {
            target: NumericTarget::Float64,
            value: value.clone(),
        }),
    }
}

/// Normalizes a date-like value to a [`Timestamp`] using the default layouts.
///
/// See [`reformat_date_with`].
pub fn reformat_date(value: &RawValue) -> ReformatResult<Timestamp> {
    reformat_date_with(value, LayoutTable::shared())
}

/// Normalizes a date-like value to a [`Timestamp`].
///
/// Integers are Unix seconds; they are never scaled to a finer precision.
/// Absent wrappers, `Null`, empty strings and any unrecognized shape all
/// yield the zero timestamp without an error. Non-empty strings go through
/// `layouts`, whose error is returned unchanged.
pub fn reformat_date_with(value: &RawValue, layouts: &LayoutTable) -> ReformatResult<Timestamp> {
    match value {
        RawValue::I64(secs) | RawValue::NullableInt(Some(secs)) => from_unix_seconds(*secs),
        RawValue::NullableInt(None) => Ok(zero_timestamp()),
        RawValue::Timestamp(ts) | RawValue::NullableTimestamp(Some(ts)) => Ok(*ts),
        RawValue::NullableTimestamp(None) => Ok(zero_timestamp()),
        RawValue::NullTime(nt) if nt.valid => Ok(nt.time),
        RawValue::NullTime(_) => Ok(zero_timestamp()),
        RawValue::Null => Ok(zero_timestamp()),
        RawValue::String(s) | RawValue::NullableString(Some(s)) if s.is_empty() => {
            Ok(zero_timestamp())
        }
        RawValue::String(s) | RawValue::NullableString(Some(s)) => layouts.parse(s),
        RawValue::NullableString(None) => Ok(zero_timestamp()),
        _ => Ok(zero_timestamp()),
    }
}

fn from_unix_seconds(secs: i64) -> ReformatResult<Timestamp> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|ts| ts.fixed_offset())
        .ok_or(ReformatError::TimestampOutOfRange(secs))
}
