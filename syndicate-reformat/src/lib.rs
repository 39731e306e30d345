//! Schema-driven value normalization for Syndicate.
//!
//! Readers hand over values in whatever shape their driver produced; the
//! output pipeline expects exactly one shape per logical type. This crate
//! bridges the two:
//! - [`RawValue`] — closed set of accepted physical representations
//! - [`CanonicalValue`] — one representation per [`LogicalType`]
//! - [`coerce`] / [`coerce_one`] — pick a coercer from the declared type and
//!   format hint
//! - [`LayoutTable`] — ordered datetime layouts for string timestamps
//!
//! Everything here is synchronous and stateless. The default layout table
//! is a `static` and may be read from any number of threads.

mod coerce;
mod error;
mod format;
mod layout;
mod reformat;
mod value;

pub use coerce::{reformat_date, reformat_date_with, reformat_float64, reformat_int64};
pub use error::{LayoutMismatch, NumericTarget, ReformatError, ReformatResult};
pub use format::FormatHint;
pub use layout::{parse_datetime, Layout, LayoutTable, DEFAULT_LAYOUTS};
pub use reformat::{coerce, coerce_json, coerce_one, first_not_null, Reformatter};
pub use value::{is_zero_timestamp, zero_timestamp, CanonicalValue, NullTime, RawValue, Timestamp};

pub use syndicate_types::LogicalType;
