//! The declared, schema-level type of a value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// The logical type a schema declares for a field.
///
/// Names follow the JSON-schema `"type"` keyword. Any name outside the known
/// set is kept verbatim in [`LogicalType::Other`] so that the normalizer can
/// pass such values through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogicalType {
    Null,
    Boolean,
    Integer,
    String,
    Number,
    Array,
    Object,
    /// Any other declared type.
    Other(String),
}

impl LogicalType {
    /// Returns the JSON-schema name of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Number => "number",
            Self::Array => "array",
            Self::Object => "object",
            Self::Other(name) => name,
        }
    }

    /// Returns true for [`LogicalType::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Parses a type name, rejecting anything outside the known set.
    pub fn parse_strict(s: &str) -> Result<Self> {
        match Self::from(s) {
            Self::Other(name) => Err(Error::InvalidLogicalType(name)),
            known => Ok(known),
        }
    }

    /// Reads the candidate list from a JSON-schema `"type"` keyword.
    ///
    /// Accepts either a single name (`"integer"`) or an array of names
    /// (`["null", "integer"]`). Order is preserved.
    pub fn from_schema_type(value: &serde_json::Value) -> Result<Vec<Self>> {
        match value {
            serde_json::Value::String(name) => Ok(vec![Self::from(name.as_str())]),
            serde_json::Value::Array(names) => names
                .iter()
                .map(|name| {
                    name.as_str()
                        .map(Self::from)
                        .ok_or_else(|| Error::InvalidLogicalType(name.to_string()))
                })
                .collect(),
            other => Err(Error::InvalidLogicalType(other.to_string())),
        }
    }

    /// Same as [`LogicalType::from_schema_type`], starting from raw JSON text.
    pub fn from_schema_type_json(json: &str) -> Result<Vec<Self>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_schema_type(&value)
    }
}

impl From<&str> for LogicalType {
    fn from(s: &str) -> Self {
        match s {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "string" => Self::String,
            "number" => Self::Number,
            "array" => Self::Array,
            "object" => Self::Object,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for LogicalType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<LogicalType> for String {
    fn from(t: LogicalType) -> Self {
        match t {
            LogicalType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for LogicalType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
