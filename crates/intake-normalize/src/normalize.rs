//! Raw-answer normalization and cell-value denormalization.
//!
//! Normalization is a pure function of `(raw, format_tag)`: the same inputs
//! always produce the same canonical value, and applying it to its own
//! output is a no-op. It never fails; malformed values degrade to
//! passthrough text and the validator flags them later.

use std::collections::BTreeMap;

use intake_model::{AnswerSet, CellScalar, FieldDef, NormalizedAnswer, RawAnswers, ValueType};

use crate::classify::classify_format;
use crate::numeric::{is_integer_literal, to_int_like};
use crate::wareki::{ISO_DATE_RE, canonicalize_iso, iso_to_wareki, wareki_to_iso};

/// Glyph written into a checked checkbox cell.
pub const CHECK_GLYPH: &str = "レ";

/// Tokens accepted as a checked state, case-insensitively.
const CHECKBOX_TRUTHY: [&str; 5] = ["1", "true", "yes", "on", "レ"];

fn is_truthy(value: &str) -> bool {
    let lowered = value.to_lowercase();
    CHECKBOX_TRUTHY.iter().any(|token| *token == lowered)
}

/// Normalize one raw value according to its field's format tag.
pub fn normalize_value(raw: &str, format: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    match classify_format(format) {
        ValueType::DateWareki | ValueType::DateIso => {
            if raw.starts_with("令和") {
                wareki_to_iso(raw)
            } else if ISO_DATE_RE.is_match(raw) {
                canonicalize_iso(raw)
            } else {
                raw.to_string()
            }
        }
        ValueType::Currency | ValueType::Number => to_int_like(raw),
        ValueType::Checkbox => {
            if is_truthy(raw) { "true" } else { "false" }.to_string()
        }
        ValueType::TextMultiline | ValueType::Text => raw.to_string(),
    }
}

/// Render an arbitrary stored scalar as the raw answer string.
pub fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Normalize a full raw answer set against the field catalog.
///
/// Unknown field ids normalize with an empty format tag (free text).
pub fn normalize_answers(raw_answers: &RawAnswers, fields: &[FieldDef]) -> AnswerSet {
    let lookup: BTreeMap<&str, &FieldDef> = fields
        .iter()
        .map(|field| (field.field_id.as_str(), field))
        .collect();

    let mut normalized = AnswerSet::new();
    for (field_id, value) in raw_answers {
        let format = lookup
            .get(field_id.as_str())
            .map(|field| field.format.as_str())
            .unwrap_or("");
        let raw = scalar_to_string(value);
        let norm = normalize_value(&raw, format);
        normalized.insert(field_id.clone(), NormalizedAnswer { raw, norm });
    }
    normalized
}

/// Denormalize a canonical value into a spreadsheet-ready scalar.
///
/// The value type here is the explicit, closed tag chosen by the mapping
/// engine, not re-derived from the format string. Empty input always
/// denormalizes to an empty text cell.
pub fn denormalize_value(norm: &str, value_type: ValueType) -> CellScalar {
    if norm.is_empty() {
        return CellScalar::empty();
    }

    match value_type {
        ValueType::Text | ValueType::TextMultiline => CellScalar::Text(norm.to_string()),
        ValueType::Number | ValueType::Currency => {
            let int_like = to_int_like(norm);
            if is_integer_literal(&int_like) {
                match int_like.parse::<i64>() {
                    Ok(n) => CellScalar::Number(n),
                    // Amounts beyond i64 keep their canonical digit string.
                    Err(_) => CellScalar::Text(int_like),
                }
            } else {
                CellScalar::Text(norm.to_string())
            }
        }
        ValueType::Checkbox => {
            if is_truthy(norm) {
                CellScalar::Text(CHECK_GLYPH.to_string())
            } else {
                CellScalar::empty()
            }
        }
        ValueType::DateWareki => CellScalar::Text(iso_to_wareki(norm)),
        ValueType::DateIso => {
            if norm.starts_with("令和") {
                CellScalar::Text(wareki_to_iso(norm))
            } else {
                CellScalar::Text(norm.to_string())
            }
        }
    }
}
