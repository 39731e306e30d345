//! Format hints attached to string-typed fields.

/// Optional formatting hint from the schema's `"format"` keyword.
///
/// Only `"date"` and `"date-time"` change behavior; any other string,
/// including the empty one, is [`FormatHint::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    #[default]
    None,
    Date,
    DateTime,
}

impl FormatHint {
    /// True for hints that turn a string field into a timestamp.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl From<&str> for FormatHint {
    fn from(s: &str) -> Self {
        match s {
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            _ => Self::None,
        }
    }
}

impl From<Option<&str>> for FormatHint {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Self::None, Self::from)
    }
}
