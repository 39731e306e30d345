//! Dispatch from a declared logical type to the matching coercer.

use syndicate_types::LogicalType;
use tracing::trace;

use crate::coerce::{reformat_date_with, reformat_float64, reformat_int64};
use crate::error::{ReformatError, ReformatResult};
use crate::format::FormatHint;
use crate::layout::LayoutTable;
use crate::value::{CanonicalValue, RawValue, Timestamp};

static NULL_TYPE: LogicalType = LogicalType::Null;

/// Returns the first candidate that is not `Null`, or `Null` if there is none.
#[must_use]
pub fn first_not_null(candidates: &[LogicalType]) -> &LogicalType {
    candidates
        .iter()
        .find(|t| !t.is_null())
        .unwrap_or(&NULL_TYPE)
}

/// Coerces `value` against a list of candidate types using the default
/// layouts. The first non-null candidate decides.
pub fn coerce(
    candidates: &[LogicalType],
    format: &str,
    value: RawValue,
) -> ReformatResult<CanonicalValue> {
    Reformatter::default().coerce(candidates, format, value)
}

/// Coerces `value` to the canonical representation of `data_type` using the
/// default layouts.
pub fn coerce_one(
    data_type: &LogicalType,
    format: &str,
    value: RawValue,
) -> ReformatResult<CanonicalValue> {
    Reformatter::default().coerce_one(data_type, format, value)
}

/// [`coerce`] for decoded JSON in and JSON out.
pub fn coerce_json(
    candidates: &[LogicalType],
    format: &str,
    value: serde_json::Value,
) -> ReformatResult<serde_json::Value> {
    let canonical = coerce(candidates, format, RawValue::from(value))?;
    Ok(canonical.to_json()?)
}

/// Value coercion bound to a datetime layout table.
#[derive(Debug, Clone, Copy)]
pub struct Reformatter<'a> {
    layouts: &'a LayoutTable,
}

impl<'a> Reformatter<'a> {
    #[must_use]
    pub const fn new(layouts: &'a LayoutTable) -> Self {
        Self { layouts }
    }

    #[must_use]
    pub const fn layouts(&self) -> &'a LayoutTable {
        self.layouts
    }

    /// Resolves the first non-null candidate and coerces `value` to it.
    pub fn coerce(
        &self,
        candidates: &[LogicalType],
        format: &str,
        value: RawValue,
    ) -> ReformatResult<CanonicalValue> {
        self.coerce_one(first_not_null(candidates), format, value)
    }

    /// Coerces `value` to the canonical representation of `data_type`.
    ///
    /// A `string` field with a `date` or `date-time` format produces a
    /// timestamp rather than a string.
    pub fn coerce_one(
        &self,
        data_type: &LogicalType,
        format: &str,
        value: RawValue,
    ) -> ReformatResult<CanonicalValue> {
        let hint = FormatHint::from(format);
        trace!(%data_type, ?hint, kind = value.kind(), "reformatting value");

        match data_type {
            LogicalType::Null => Ok(CanonicalValue::Null),
            LogicalType::Boolean => match value {
                RawValue::Bool(b) => Ok(CanonicalValue::Boolean(b)),
                other => Err(ReformatError::TypeMismatch {
                    expected: LogicalType::Boolean,
                    value: other,
                }),
            },
            LogicalType::Integer => reformat_int64(&value).map(CanonicalValue::Integer),
            LogicalType::String if hint.is_temporal() => {
                self.reformat_date(&value).map(CanonicalValue::Timestamp)
            }
            LogicalType::String => Ok(CanonicalValue::String(value.to_string())),
            LogicalType::Number => reformat_float64(&value).map(CanonicalValue::Number),
            LogicalType::Array => match value {
                RawValue::Array(items) => Ok(CanonicalValue::Array(items)),
                other => Ok(CanonicalValue::Array(vec![other])),
            },
            LogicalType::Object | LogicalType::Other(_) => Ok(CanonicalValue::Raw(value)),
        }
    }

    /// Date coercion with this reformatter's layouts.
    pub fn reformat_date(&self, value: &RawValue) -> ReformatResult<Timestamp> {
        reformat_date_with(value, self.layouts)
    }
}

impl Default for Reformatter<'static> {
    fn default() -> Self {
        Self::new(LayoutTable::shared())
    }
}
