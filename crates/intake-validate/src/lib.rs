//! Answer validation.
//!
//! Validation iterates the field catalog (not the answer set) so every
//! declared field is checked even when it was never answered. Issues are
//! purely advisory: they never abort an export, they surface in the review
//! report for a human to resolve.

use std::sync::LazyLock;

use regex::Regex;

use intake_model::{AnswerSet, FieldDef, NormalizedAnswer, ValidationIssue};
use intake_normalize::is_date_like;

/// Synthetic field id for the vehicle/driver cross-check.
pub const CROSS_CHECK_FIELD_ID: &str = "_cross_check";

/// Placeholder tokens an applicant may deliberately store in a mandatory
/// field; tolerated with a warning instead of an error.
const PLACEHOLDER_MARKERS: [&str; 5] = ["不明", "要確認", "対象外", "unknown", "todo"];

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("numeric pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,4}-?\d{2,4}-?\d{3,4}$").expect("phone pattern"));
static POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-?\d{4}$").expect("postal pattern"));

fn is_placeholder(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    PLACEHOLDER_MARKERS.contains(&lowered.as_str())
}

/// Validate a normalized answer set against the field catalog.
///
/// Per-field issues come out in catalog order; the cross-field check is
/// appended last.
pub fn validate_answers(fields: &[FieldDef], answers: &AnswerSet) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let empty = NormalizedAnswer {
        raw: String::new(),
        norm: String::new(),
    };

    for field in fields {
        if field.field_id.is_empty() {
            continue;
        }
        let answer = answers.get(&field.field_id).unwrap_or(&empty);
        let raw = answer.raw.trim();
        let norm = answer.norm.trim();

        if field.required {
            if raw.is_empty() {
                issues.push(ValidationIssue::error(
                    &field.field_id,
                    "必須項目が未入力です。",
                ));
            } else if is_placeholder(raw) {
                issues.push(ValidationIssue::warning(
                    &field.field_id,
                    "必須項目ですが『要確認/不明』として保存されています。",
                ));
            }
        }

        // Nothing to shape-check once the normalized value is empty.
        if norm.is_empty() {
            continue;
        }

        let format = field.format.as_str();
        let lowered = format.to_lowercase();

        if (format.contains("数字") || lowered.contains("number")) && !NUMERIC_RE.is_match(norm) {
            issues.push(ValidationIssue::warning(
                &field.field_id,
                "数字形式が期待されます。",
            ));
        }

        if (format.contains("電話") || lowered.contains("0xx")) && !PHONE_RE.is_match(norm) {
            issues.push(ValidationIssue::warning(
                &field.field_id,
                "電話番号の形式を確認してください（例: 019-1234-5678）。",
            ));
        }

        if (format.contains("郵便") || format.contains("〒")) && !POSTAL_RE.is_match(norm) {
            issues.push(ValidationIssue::warning(
                &field.field_id,
                "郵便番号形式を確認してください（例: 123-4567）。",
            ));
        }

        if (lowered.contains("yyyy") || format.contains("日付") || format.contains("和暦"))
            && !is_date_like(norm)
        {
            issues.push(ValidationIssue::warning(
                &field.field_id,
                "日付形式が不正です（YYYY-MM-DD または 令和X年Y月Z日）。",
            ));
        }
    }

    if let Some(issue) = cross_check(answers) {
        issues.push(issue);
    }

    issues
}

/// Lightweight consistency check over field-id naming conventions: a fleet
/// needs at least as many drivers as vehicles. Last matching field of each
/// kind wins; this is a coarse heuristic, not an accounting rule.
fn cross_check(answers: &AnswerSet) -> Option<ValidationIssue> {
    let mut vehicle_count: Option<u64> = None;
    let mut driver_count: Option<u64> = None;

    for (field_id, answer) in answers {
        let value = answer.norm.trim();
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let Ok(count) = value.parse::<u64>() else {
            continue;
        };
        let upper = field_id.to_uppercase();
        if upper.contains("VEHICLE") || upper.contains("CAR") || upper.contains("車両") {
            vehicle_count = Some(count);
        }
        if upper.contains("DRIVER") || upper.contains("運転者") {
            driver_count = Some(count);
        }
    }

    match (vehicle_count, driver_count) {
        (Some(vehicles), Some(drivers)) if drivers < vehicles => Some(ValidationIssue::warning(
            CROSS_CHECK_FIELD_ID,
            "運転者数が車両数を下回っています。整合性を確認してください。",
        )),
        _ => None,
    }
}
