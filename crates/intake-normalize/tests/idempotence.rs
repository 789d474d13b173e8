//! Normalization must be a no-op on its own output for every format class,
//! and valid dates must survive the round trip through denormalization.

use intake_model::{CellScalar, ValueType};
use intake_normalize::{denormalize_value, normalize_value};
use proptest::prelude::*;

const FORMATS: [&str; 7] = [
    "和暦",
    "YYYY-MM-DD",
    "金額（円）",
    "数字",
    "checkbox",
    "複数行",
    "自由記載",
];

proptest! {
    #[test]
    fn normalize_twice_equals_normalize_once(
        raw in "\\PC{0,40}",
        format_idx in 0usize..FORMATS.len(),
    ) {
        let format = FORMATS[format_idx];
        let once = normalize_value(&raw, format);
        let twice = normalize_value(&once, format);
        prop_assert_eq!(&twice, &once);
    }

    #[test]
    fn valid_dates_round_trip_through_wareki(
        year in 2019i32..=2050,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let wareki = format!("令和{}年{month}月{day}日", year - 2018);
        let norm = normalize_value(&wareki, "和暦");
        prop_assert_eq!(&norm, &format!("{year:04}-{month:02}-{day:02}"));
        let back = denormalize_value(&norm, ValueType::DateWareki);
        prop_assert_eq!(back, CellScalar::Text(wareki));
    }

    #[test]
    fn integer_inputs_always_canonicalize(value in -1_000_000_000i64..=1_000_000_000) {
        let formatted = format!("{value}円");
        let norm = normalize_value(&formatted, "金額");
        prop_assert_eq!(&norm, &value.to_string());
        prop_assert_eq!(
            denormalize_value(&norm, ValueType::Currency),
            CellScalar::Number(value)
        );
    }
}

#[test]
fn iso_dates_round_trip_to_iso() {
    let norm = normalize_value("2024-4-1", "YYYY-MM-DD");
    assert_eq!(norm, "2024-04-01");
    assert_eq!(
        denormalize_value(&norm, ValueType::DateIso),
        CellScalar::Text("2024-04-01".to_string())
    );
    // A wareki string handed to an ISO-typed cell converts forward.
    assert_eq!(
        denormalize_value("令和6年4月1日", ValueType::DateIso),
        CellScalar::Text("2024-04-01".to_string())
    );
}
