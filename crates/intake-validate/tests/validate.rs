use intake_model::{AnswerSet, FieldDef, IssueSeverity, NormalizedAnswer};
use intake_validate::{CROSS_CHECK_FIELD_ID, validate_answers};

fn field(field_id: &str, format: &str, required: bool) -> FieldDef {
    FieldDef {
        field_id: field_id.to_string(),
        form_file: "shinsei.xml".to_string(),
        form_name: None,
        sheet: Some("様式1".to_string()),
        cell_range: None,
        format: format.to_string(),
        required,
        step_key: None,
        step_title: None,
        example: None,
        help_text: None,
    }
}

fn answer(answers: &mut AnswerSet, field_id: &str, raw: &str, norm: &str) {
    answers.insert(
        field_id.to_string(),
        NormalizedAnswer {
            raw: raw.to_string(),
            norm: norm.to_string(),
        },
    );
}

#[test]
fn required_empty_yields_exactly_one_error() {
    let fields = vec![field("APPLICANT_NAME", "自由記載", true)];
    let answers = AnswerSet::new();

    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field_id, "APPLICANT_NAME");
    assert_eq!(issues[0].severity, IssueSeverity::Error);

    // Same for a required date field: the empty value short-circuits the
    // shape check, so the missing-input error stands alone.
    let fields = vec![field("GRANT_DATE", "和暦", true)];
    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
}

#[test]
fn placeholder_on_required_field_is_a_warning() {
    let fields = vec![field("OFFICE_ADDRESS", "自由記載", true)];
    let mut answers = AnswerSet::new();
    answer(&mut answers, "OFFICE_ADDRESS", "不明", "不明");

    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Warning);

    // Case-insensitive for the latin markers.
    answer(&mut answers, "OFFICE_ADDRESS", "TODO", "TODO");
    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Warning);
}

#[test]
fn optional_empty_field_is_silent() {
    let fields = vec![field("REMARKS", "複数行", false)];
    let answers = AnswerSet::new();
    assert!(validate_answers(&fields, &answers).is_empty());
}

#[test]
fn shape_checks_emit_fixed_hints() {
    let fields = vec![
        field("VEHICLE_TOTAL", "数字", false),
        field("PHONE", "電話（0xx-xxxx-xxxx）", false),
        field("POSTAL", "郵便番号", false),
        field("GRANT_DATE", "YYYY-MM-DD", false),
    ];
    let mut answers = AnswerSet::new();
    answer(&mut answers, "VEHICLE_TOTAL", "五台", "五台");
    answer(&mut answers, "PHONE", "electric", "electric");
    answer(&mut answers, "POSTAL", "12-345", "12-345");
    answer(&mut answers, "GRANT_DATE", "来月", "来月");

    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 4);
    assert!(issues.iter().all(|i| i.severity == IssueSeverity::Warning));
    assert!(issues[0].message.contains("数字"));
    assert!(issues[1].message.contains("019-1234-5678"));
    assert!(issues[2].message.contains("123-4567"));
    assert!(issues[3].message.contains("令和X年Y月Z日"));
}

#[test]
fn valid_shapes_pass() {
    let fields = vec![
        field("VEHICLE_TOTAL", "数字", false),
        field("PHONE", "電話", false),
        field("POSTAL", "郵便番号", false),
        field("GRANT_DATE", "和暦", false),
        field("GRANT_DATE_ISO", "YYYY-MM-DD", false),
    ];
    let mut answers = AnswerSet::new();
    answer(&mut answers, "VEHICLE_TOTAL", "5", "5");
    answer(&mut answers, "PHONE", "019-1234-5678", "019-1234-5678");
    answer(&mut answers, "POSTAL", "020-0021", "020-0021");
    answer(&mut answers, "GRANT_DATE", "令和6年4月1日", "令和6年4月1日");
    answer(&mut answers, "GRANT_DATE_ISO", "2024-04-01", "2024-04-01");

    assert!(validate_answers(&fields, &answers).is_empty());
}

#[test]
fn a_field_can_trigger_more_than_one_check() {
    // A format tag naming both a numeric and a date shape runs both checks
    // independently.
    let fields = vec![field("ODD", "数字・日付", false)];
    let mut answers = AnswerSet::new();
    answer(&mut answers, "ODD", "abc", "abc");

    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 2);
}

#[test]
fn driver_shortage_emits_cross_check_warning() {
    let fields = vec![
        field("VEHICLE_COUNT", "数字", false),
        field("DRIVER_COUNT", "数字", false),
    ];
    let mut answers = AnswerSet::new();
    answer(&mut answers, "VEHICLE_COUNT", "3", "3");
    answer(&mut answers, "DRIVER_COUNT", "2", "2");

    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field_id, CROSS_CHECK_FIELD_ID);
    assert_eq!(issues[0].severity, IssueSeverity::Warning);

    // Enough drivers: no warning.
    answer(&mut answers, "DRIVER_COUNT", "5", "5");
    assert!(validate_answers(&fields, &answers).is_empty());
}

#[test]
fn cross_check_matches_japanese_identifiers() {
    let fields = Vec::new();
    let mut answers = AnswerSet::new();
    answer(&mut answers, "保有車両数", "4", "4");
    answer(&mut answers, "運転者数", "1", "1");

    let issues = validate_answers(&fields, &answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field_id, CROSS_CHECK_FIELD_ID);
}

#[test]
fn cross_check_ignores_non_numeric_values() {
    let fields = Vec::new();
    let mut answers = AnswerSet::new();
    answer(&mut answers, "VEHICLE_COUNT", "三台", "三台");
    answer(&mut answers, "DRIVER_COUNT", "1", "1");
    assert!(validate_answers(&fields, &answers).is_empty());
}

#[test]
fn issues_keep_catalog_order_with_cross_check_last() {
    let fields = vec![
        field("Z_REQUIRED", "自由記載", true),
        field("A_NUMBER", "数字", false),
    ];
    let mut answers = AnswerSet::new();
    answer(&mut answers, "A_NUMBER", "x", "x");
    answer(&mut answers, "VEHICLE_COUNT", "2", "2");
    answer(&mut answers, "DRIVER_COUNT", "1", "1");

    let issues = validate_answers(&fields, &answers);
    let ids: Vec<&str> = issues.iter().map(|i| i.field_id.as_str()).collect();
    assert_eq!(ids, vec!["Z_REQUIRED", "A_NUMBER", CROSS_CHECK_FIELD_ID]);
}
