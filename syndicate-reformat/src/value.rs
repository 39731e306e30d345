//! Raw and canonical value representations.
//!
//! [`RawValue`] is the closed set of physical shapes a reader may hand to the
//! normalizer (driver scalars, nullable wrappers, decoded JSON).
//! [`CanonicalValue`] is the single shape each logical type is normalized to.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// Canonical timestamp: calendar date, time, nanoseconds and a fixed offset.
pub type Timestamp = DateTime<FixedOffset>;

/// Unix seconds of `0001-01-01T00:00:00Z`.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

/// The zero-value timestamp, `0001-01-01T00:00:00+00:00`.
///
/// Returned for absent or unrecognized date inputs.
#[must_use]
pub fn zero_timestamp() -> Timestamp {
    DateTime::<Utc>::from_timestamp(ZERO_UNIX_SECONDS, 0)
        .unwrap_or_default()
        .fixed_offset()
}

/// Returns true if `ts` is the zero-value timestamp.
#[must_use]
pub fn is_zero_timestamp(ts: &Timestamp) -> bool {
    ts.timestamp() == ZERO_UNIX_SECONDS && ts.timestamp_subsec_nanos() == 0
}

/// A database-style nullable time: `time` is meaningful only when `valid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NullTime {
    pub time: Timestamp,
    pub valid: bool,
}

impl NullTime {
    /// A present time.
    #[must_use]
    pub const fn valid(time: Timestamp) -> Self {
        Self { time, valid: true }
    }

    /// An absent time.
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            time: zero_timestamp(),
            valid: false,
        }
    }
}

/// A value of unknown concrete representation, as produced by a reader.
///
/// Coercers never mutate a `RawValue`; they inspect the variant and build a
/// [`CanonicalValue`] from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Timestamp(Timestamp),
    /// Nullable integer (e.g. a pointer or `Option` column).
    NullableInt(Option<i64>),
    /// Nullable timestamp.
    NullableTimestamp(Option<Timestamp>),
    /// Nullable string.
    NullableString(Option<String>),
    /// Database driver nullable time.
    NullTime(NullTime),
    Array(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Name of the physical representation, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "nil",
            Self::Bool(_) => "bool",
            Self::I8(_) => "int8",
            Self::I16(_) => "int16",
            Self::I32(_) => "int32",
            Self::I64(_) => "int64",
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::F32(_) => "float32",
            Self::F64(_) => "float64",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
            Self::NullableInt(_) => "nullable int64",
            Self::NullableTimestamp(_) => "nullable timestamp",
            Self::NullableString(_) => "nullable string",
            Self::NullTime(_) => "null time",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Shortest round-trip digits, switching to exponent form (`1e+21`,
/// `1.5e-05`) when the decimal exponent is below -4 or at least 6.
fn write_float(
    f: &mut fmt::Formatter<'_>,
    value: f64,
    plain: String,
    scientific: String,
) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "+Inf" } else { "-Inf" });
    }
    match scientific.split_once('e') {
        Some((mantissa, exp)) if value != 0.0 => {
            let exp: i32 = exp.parse().unwrap_or(0);
            if (-4..6).contains(&exp) {
                f.write_str(&plain)
            } else {
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
        }
        _ => f.write_str(&plain),
    }
}

/// Default human-readable rendering, used when a value is declared `string`.
impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null
            | Self::NullableInt(None)
            | Self::NullableTimestamp(None)
            | Self::NullableString(None) => f.write_str("<nil>"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) | Self::NullableInt(Some(v)) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write_float(f, f64::from(*v), v.to_string(), format!("{v:e}")),
            Self::F64(v) => write_float(f, *v, v.to_string(), format!("{v:e}")),
            Self::String(v) | Self::NullableString(Some(v)) => f.write_str(v),
            Self::Bytes(v) => write_joined(f, v),
            Self::Timestamp(v) | Self::NullableTimestamp(Some(v)) => write!(f, "{v}"),
            Self::NullTime(v) if v.valid => write!(f, "{}", v.time),
            Self::NullTime(_) => f.write_str("<nil>"),
            Self::Array(items) => write_joined(f, items),
            Self::Map(entries) => {
                f.write_str("map")?;
                write_joined(f, entries.iter().map(|(k, v)| format!("{k}:{v}")))
            }
        }
    }
}

macro_rules! raw_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for RawValue {
                fn from(v: $ty) -> Self {
                    RawValue::$variant(v)
                }
            }
        )*
    };
}

raw_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    Timestamp => Timestamp,
    Option<i64> => NullableInt,
    Option<Timestamp> => NullableTimestamp,
    Option<String> => NullableString,
    NullTime => NullTime,
    Vec<RawValue> => Array,
    BTreeMap<String, RawValue> => Map,
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::String(v.to_string())
    }
}

impl From<isize> for RawValue {
    fn from(v: isize) -> Self {
        RawValue::I64(v as i64)
    }
}

impl From<usize> for RawValue {
    fn from(v: usize) -> Self {
        RawValue::U64(v as u64)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(v: DateTime<Utc>) -> Self {
        RawValue::Timestamp(v.fixed_offset())
    }
}

/// Decoded JSON. Integers that fit `i64` become `I64`, larger ones `U64`,
/// everything else numeric `F64`.
impl From<serde_json::Value> for RawValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::I64(i)
                } else if let Some(u) = n.as_u64() {
                    RawValue::U64(u)
                } else {
                    n.as_f64().map_or(RawValue::Null, RawValue::F64)
                }
            }
            serde_json::Value::String(s) => RawValue::String(s),
            serde_json::Value::Array(items) => {
                RawValue::Array(items.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(entries) => RawValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, RawValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// The normalized value for a logical type.
///
/// Serializes untagged, so it renders as the natural JSON value (timestamps
/// as RFC 3339 strings).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
    Number(f64),
    Timestamp(Timestamp),
    Array(Vec<RawValue>),
    /// A value of an undeclared or pass-through type, unchanged.
    Raw(RawValue),
}

impl CanonicalValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[RawValue]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Converts to a JSON value for the output pipeline.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
