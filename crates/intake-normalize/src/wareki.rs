//! Wareki (Japanese era) date conversion.
//!
//! Only the Reiwa era is in scope: era year + 2018 = Gregorian year.
//! Conversions are parse-else-passthrough: anything that is not a real
//! calendar date in the expected shape is returned unchanged, deferring the
//! decision to validation.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::numeric::fold_digits;

/// Offset added to a Reiwa era year to obtain the Gregorian year.
pub const REIWA_OFFSET: i32 = 2018;

/// First Gregorian year of the Reiwa era.
const REIWA_FIRST_YEAR: i32 = 2019;

/// `令和N年M月D日`, whitespace tolerated between tokens.
static WAREKI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"令和\s*(\d+)\s*年\s*(\d+)\s*月\s*(\d+)\s*日").expect("wareki pattern")
});

/// `YYYY-M-D` or `YYYY/M/D`, anchored.
pub static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$").expect("iso date pattern")
});

/// True if the value looks like either supported date shape.
pub fn is_date_like(value: &str) -> bool {
    ISO_DATE_RE.is_match(value) || value.starts_with("令和")
}

/// Convert `令和N年M月D日` to `YYYY-MM-DD`. Non-matching or impossible
/// dates pass through unchanged.
pub fn wareki_to_iso(value: &str) -> String {
    let Some(caps) = WAREKI_RE.captures(value) else {
        return value.to_string();
    };
    let (Ok(era_year), Ok(month), Ok(day)) = (
        fold_digits(&caps[1]).parse::<i32>(),
        fold_digits(&caps[2]).parse::<u32>(),
        fold_digits(&caps[3]).parse::<u32>(),
    ) else {
        return value.to_string();
    };
    let year = era_year + REIWA_OFFSET;
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.to_string(),
    }
}

/// Convert `YYYY-MM-DD` back to wareki text. Pre-Reiwa dates render as
/// plain `Y年M月D日`; non-matching or impossible dates pass through.
pub fn iso_to_wareki(value: &str) -> String {
    let Some(caps) = ISO_DATE_RE.captures(value) else {
        return value.to_string();
    };
    let (Ok(year), Ok(month), Ok(day)) = (
        fold_digits(&caps[1]).parse::<i32>(),
        fold_digits(&caps[2]).parse::<u32>(),
        fold_digits(&caps[3]).parse::<u32>(),
    ) else {
        return value.to_string();
    };
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return value.to_string();
    }
    if year < REIWA_FIRST_YEAR {
        return format!("{year}年{month}月{day}日");
    }
    format!("令和{}年{month}月{day}日", year - REIWA_OFFSET)
}

/// Re-serialize an ISO-like date with zero padding (`2024/4/1` →
/// `2024-04-01`). Invalid calendar dates pass through unchanged.
pub fn canonicalize_iso(value: &str) -> String {
    let Some(caps) = ISO_DATE_RE.captures(value) else {
        return value.to_string();
    };
    let (Ok(year), Ok(month), Ok(day)) = (
        fold_digits(&caps[1]).parse::<i32>(),
        fold_digits(&caps[2]).parse::<u32>(),
        fold_digits(&caps[3]).parse::<u32>(),
    ) else {
        return value.to_string();
    };
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.to_string(),
    }
}
