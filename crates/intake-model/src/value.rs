//! Value type tags and spreadsheet-ready scalars.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic value type of a field, inferred from its free-text format tag or
/// declared explicitly on a mapping entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    Text,
    TextMultiline,
    Number,
    Currency,
    Checkbox,
    /// Era-based Japanese calendar date; renders back to wareki text.
    DateWareki,
    /// ISO 8601 calendar date.
    DateIso,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::TextMultiline => "text_multiline",
            ValueType::Number => "number",
            ValueType::Currency => "currency",
            ValueType::Checkbox => "checkbox",
            ValueType::DateWareki => "date_wareki",
            ValueType::DateIso => "date_iso",
        }
    }

    /// True for both date representations.
    pub fn is_date(self) -> bool {
        matches!(self, ValueType::DateWareki | ValueType::DateIso)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    /// Parse a mapping-config type tag. Unknown tags fall back to `text`,
    /// matching the tolerant handling of hand-edited configurations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "text_multiline" => ValueType::TextMultiline,
            "number" => ValueType::Number,
            "currency" => ValueType::Currency,
            "checkbox" => ValueType::Checkbox,
            "date_wareki" => ValueType::DateWareki,
            "date_iso" => ValueType::DateIso,
            _ => ValueType::Text,
        })
    }
}

/// A denormalized value ready to be placed into a spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellScalar {
    Number(i64),
    Text(String),
}

impl CellScalar {
    pub fn empty() -> Self {
        CellScalar::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellScalar::Text(text) if text.is_empty())
    }

    /// String rendering used when a value is distributed across a boxed
    /// cell range character by character.
    pub fn display_string(&self) -> String {
        match self {
            CellScalar::Number(n) => n.to_string(),
            CellScalar::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for CellScalar {
    fn from(text: &str) -> Self {
        CellScalar::Text(text.to_string())
    }
}

impl From<i64> for CellScalar {
    fn from(n: i64) -> Self {
        CellScalar::Number(n)
    }
}
