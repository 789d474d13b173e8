//! Format-tag classification.
//!
//! Catalog format tags are human-authored free text ("数字", "YYYY-MM-DD",
//! "和暦で入力"). The semantic value type is inferred from substrings, first
//! match wins. This single classifier serves both normalization and the
//! auto-mapping pass so the two can never drift apart.

use intake_model::ValueType;

/// Infer the semantic value type from a free-text format tag.
///
/// Priority: wareki date → ISO date → currency → number → checkbox →
/// multiline text → text. Only the first matching rule applies.
pub fn classify_format(format: &str) -> ValueType {
    let lowered = format.to_lowercase();
    if format.contains("和暦") {
        return ValueType::DateWareki;
    }
    if lowered.contains("yyyy") || format.contains("日付") {
        return ValueType::DateIso;
    }
    if format.contains("金額") || lowered.contains("currency") {
        return ValueType::Currency;
    }
    if format.contains("数字") || lowered.contains("number") {
        return ValueType::Number;
    }
    if lowered.contains("checkbox") || format.contains("チェック") {
        return ValueType::Checkbox;
    }
    if format.contains("改行") || format.contains("複数行") {
        return ValueType::TextMultiline;
    }
    ValueType::Text
}
