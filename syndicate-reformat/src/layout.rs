//! Ordered datetime layouts and the layout-fallback parser.
//!
//! Layouts are tried in declaration order and the first one that parses
//! wins; no attempt is made to rank overlapping layouts. Every layout accepts
//! an optional fractional-second field right after the seconds.
//!
//! chrono's own parser is lenient about field widths, signs and whitespace,
//! so each input is first checked against the fixed shape its layout's
//! format describes: `%Y` is four digits, `%m %d %H %M %S` two, `%:z` is
//! `±HH:MM`, and every literal must appear exactly once.

use std::borrow::Cow;

use chrono::format::ParseErrorKind;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{LayoutMismatch, ReformatError, ReformatResult};
use crate::value::Timestamp;

/// A single datetime layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Human-readable pattern, used in diagnostics.
    pub name: Cow<'static, str>,
    /// chrono `strftime` format string.
    pub format: Cow<'static, str>,
}

impl Layout {
    #[must_use]
    pub const fn new(name: &'static str, format: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            format: Cow::Borrowed(format),
        }
    }

    /// Parses `value` with this layout.
    ///
    /// A layout with an offset keeps the parsed offset; one without is read
    /// as UTC.
    pub fn parse(&self, value: &str) -> Result<Timestamp, LayoutMismatch> {
        check_shape(&self.format, value).map_err(|position| LayoutMismatch::Shape {
            layout: self.name.to_string(),
            position,
        })?;

        let parsed = match DateTime::parse_from_str(value, &self.format) {
            Err(err) if err.kind() == ParseErrorKind::NotEnough => {
                NaiveDateTime::parse_from_str(value, &self.format)
                    .map(|naive| naive.and_utc().fixed_offset())
            }
            other => other,
        };
        Ok(parsed?)
    }
}

/// Built-in layouts, in priority order.
pub static DEFAULT_LAYOUTS: [Layout; 5] = [
    Layout::new("YYYY-MM-DD HH:MM:SS", "%Y-%m-%d %H:%M:%S%.f"),
    Layout::new("YYYY-MM-DD HH:MM:SS ±HH:MM", "%Y-%m-%d %H:%M:%S%.f %:z"),
    Layout::new("YYYY-MM-DD HH:MM:SS±HH:MM", "%Y-%m-%d %H:%M:%S%.f%:z"),
    Layout::new("YYYY-MM-DDTHH:MM:SS", "%Y-%m-%dT%H:%M:%S%.f"),
    Layout::new("YYYY-MM-DDTHH:MM:SS.ffffff", "%Y-%m-%dT%H:%M:%S%.6f"),
];

static SHARED: LayoutTable = LayoutTable {
    layouts: Cow::Borrowed(&DEFAULT_LAYOUTS),
};

/// An ordered, immutable list of datetime layouts.
///
/// Deserializes from a JSON array of `{"name", "format"}` objects so a
/// pipeline can ship its own list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTable {
    layouts: Cow<'static, [Layout]>,
}

impl LayoutTable {
    #[must_use]
    pub fn new(layouts: Vec<Layout>) -> Self {
        Self {
            layouts: Cow::Owned(layouts),
        }
    }

    /// The process-wide default table.
    #[must_use]
    pub fn shared() -> &'static LayoutTable {
        &SHARED
    }

    #[must_use]
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// Layout names in priority order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.layouts.iter().map(|l| l.name.to_string()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Parses `value` against each layout in order, stopping at the first
    /// match.
    ///
    /// On failure the error names every layout and carries the parse error
    /// of the last one tried.
    pub fn parse(&self, value: &str) -> ReformatResult<Timestamp> {
        let mut last_err = None;
        for layout in self.layouts.iter() {
            match layout.parse(value) {
                Ok(ts) => {
                    trace!(layout = %layout.name, "datetime layout matched");
                    return Ok(rebuild(ts));
                }
                Err(err) => last_err = Some(err),
            }
        }

        debug!(value, layouts = self.layouts.len(), "no datetime layout matched");
        Err(ReformatError::ExhaustedFormats {
            layouts: self.names(),
            source: last_err,
        })
    }
}

impl Default for LayoutTable {
    fn default() -> Self {
        SHARED.clone()
    }
}

/// Checks `value` against the fixed shape described by `format`.
///
/// Returns the byte offset of the first mismatch. Specifiers other than
/// `%Y %m %d %H %M %S %.f %.3f %.6f %.9f %:z %%` have no fixed shape here;
/// a format using one is left entirely to chrono.
fn check_shape(format: &str, value: &str) -> Result<(), usize> {
    let input = value.as_bytes();
    let mut pos = 0;
    let mut spec = format.chars();

    while let Some(c) = spec.next() {
        if c != '%' {
            pos = literal(input, pos, c)?;
            continue;
        }
        pos = match (spec.next(), spec.clone().next()) {
            (Some('Y'), _) => digits(input, pos, 4)?,
            (Some('m' | 'd' | 'H' | 'M' | 'S'), _) => digits(input, pos, 2)?,
            (Some('%'), _) => literal(input, pos, '%')?,
            (Some('.'), Some('f')) => {
                spec.next();
                optional_fraction(input, pos)?
            }
            (Some('.'), Some(width @ ('3' | '6' | '9'))) => {
                spec.next();
                if spec.next() != Some('f') {
                    return Ok(());
                }
                let width = width.to_digit(10).unwrap_or(0) as usize;
                digits(input, literal(input, pos, '.')?, width)?
            }
            (Some(':'), Some('z')) => {
                spec.next();
                offset(input, pos)?
            }
            _ => return Ok(()),
        };
    }

    if pos == input.len() { Ok(()) } else { Err(pos) }
}

fn literal(input: &[u8], pos: usize, c: char) -> Result<usize, usize> {
    let mut buf = [0u8; 4];
    let expected = c.encode_utf8(&mut buf).as_bytes();
    if input[pos..].starts_with(expected) {
        Ok(pos + expected.len())
    } else {
        Err(pos)
    }
}

fn digits(input: &[u8], pos: usize, count: usize) -> Result<usize, usize> {
    let end = pos + count;
    match input.get(pos..end) {
        Some(field) if field.iter().all(u8::is_ascii_digit) => Ok(end),
        _ => Err(pos),
    }
}

fn optional_fraction(input: &[u8], pos: usize) -> Result<usize, usize> {
    if input.get(pos) != Some(&b'.') {
        return Ok(pos);
    }
    let count = input[pos + 1..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if count == 0 { Err(pos) } else { Ok(pos + 1 + count) }
}

fn offset(input: &[u8], pos: usize) -> Result<usize, usize> {
    match input.get(pos) {
        Some(b'+' | b'-') => {}
        _ => return Err(pos),
    }
    let pos = digits(input, pos + 1, 2)?;
    let pos = literal(input, pos, ':')?;
    digits(input, pos, 2)
}

/// Rebuilds a timestamp from its calendar fields so the result does not
/// depend on which layout produced it.
fn rebuild(ts: Timestamp) -> Timestamp {
    NaiveDate::from_ymd_opt(ts.year(), ts.month(), ts.day())
        .and_then(|date| {
            date.and_hms_nano_opt(ts.hour(), ts.minute(), ts.second(), ts.nanosecond())
        })
        .and_then(|naive| naive.and_local_timezone(*ts.offset()).single())
        .unwrap_or(ts)
}

/// Parses `value` with the default layout table.
pub fn parse_datetime(value: &str) -> ReformatResult<Timestamp> {
    LayoutTable::shared().parse(value)
}
