//! Error types for value reformatting.

use std::fmt;
use std::num::ParseFloatError;

use syndicate_types::LogicalType;
use thiserror::Error;

use crate::value::{zero_timestamp, CanonicalValue, RawValue};

/// Numeric representation a coercion was aiming for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericTarget {
    Int64,
    Float64,
}

impl fmt::Display for NumericTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int64 => f.write_str("int64"),
            Self::Float64 => f.write_str("float64"),
        }
    }
}

/// Why a single datetime layout rejected an input.
#[derive(Debug, Error)]
pub enum LayoutMismatch {
    /// The input does not have the layout's fixed shape (field widths,
    /// separators, offset form).
    #[error("input does not fit layout {layout:?} at byte {position}")]
    Shape { layout: String, position: usize },

    /// The input has the right shape but chrono rejected it.
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Reformatting errors.
///
/// Every variant carries enough of the rejected input to diagnose the
/// failure. The error is authoritative: see [`ReformatError::placeholder`]
/// for the value that accompanies it.
#[derive(Debug, Error)]
pub enum ReformatError {
    /// The schema declared one type but the value has another representation.
    #[error("found to be {expected}, but value is not {expected} : {value}")]
    TypeMismatch {
        expected: LogicalType,
        value: RawValue,
    },

    /// Numeric coercion received a representation it does not accept.
    #[error("failed to change {value} (type:{}) to {target}", .value.kind())]
    UnsupportedRepresentation {
        target: NumericTarget,
        value: RawValue,
    },

    /// A string could not be parsed as a base-10 float.
    #[error("failed to change string {input} to float64: {source}")]
    ParseFloat {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    /// No datetime layout matched a non-empty string.
    ///
    /// `source` is the error from the last layout tried, not a summary of
    /// every attempt.
    #[error(
        "failed to parse datetime from available formats: {layouts:?} : {}",
        describe_last(.source)
    )]
    ExhaustedFormats {
        layouts: Vec<String>,
        #[source]
        source: Option<LayoutMismatch>,
    },

    /// Epoch seconds outside the range a timestamp can represent.
    #[error("unix timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn describe_last(source: &Option<LayoutMismatch>) -> String {
    match source {
        Some(err) => err.to_string(),
        None => "no layouts configured".to_string(),
    }
}

impl ReformatError {
    /// The value returned alongside this error by the coercion contract.
    ///
    /// A boolean mismatch hands back the original value; numeric failures
    /// yield zero; date failures yield the zero timestamp. None of these are
    /// valid data.
    #[must_use]
    pub fn placeholder(&self) -> CanonicalValue {
        match self {
            Self::TypeMismatch { value, .. } => CanonicalValue::Raw(value.clone()),
            Self::UnsupportedRepresentation {
                target: NumericTarget::Int64,
                ..
            } => CanonicalValue::Integer(0),
            Self::UnsupportedRepresentation {
                target: NumericTarget::Float64,
                ..
            }
            | Self::ParseFloat { .. } => CanonicalValue::Number(0.0),
            Self::ExhaustedFormats { .. } | Self::TimestampOutOfRange(_) => {
                CanonicalValue::Timestamp(zero_timestamp())
            }
            Self::Serialization(_) => CanonicalValue::Null,
        }
    }
}

/// Result type for reformat operations.
pub type ReformatResult<T> = Result<T, ReformatError>;
