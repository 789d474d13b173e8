use std::collections::BTreeMap;
use std::path::Path;

use intake_catalog::FieldCatalog;
use intake_map::write_templates;
use intake_model::{
    AnswerSet, ExplicitMapping, FieldDef, IssueSeverity, MappingConfig, NormalizedAnswer,
    TemplateSpec, ValueType,
};
use intake_workbook::{CellValue, Workbook};

fn field(field_id: &str, form_file: &str, sheet: &str, cell_range: &str, format: &str) -> FieldDef {
    FieldDef {
        field_id: field_id.to_string(),
        form_file: form_file.to_string(),
        form_name: None,
        sheet: Some(sheet.to_string()),
        cell_range: if cell_range.is_empty() {
            None
        } else {
            Some(cell_range.to_string())
        },
        format: format.to_string(),
        required: false,
        step_key: None,
        step_title: None,
        example: None,
        help_text: None,
    }
}

fn answer(answers: &mut AnswerSet, field_id: &str, norm: &str) {
    answers.insert(
        field_id.to_string(),
        NormalizedAnswer {
            raw: norm.to_string(),
            norm: norm.to_string(),
        },
    );
}

fn explicit(sheet: &str, cell: &str, value_type: ValueType) -> ExplicitMapping {
    ExplicitMapping {
        sheet: Some(sheet.to_string()),
        cell: cell.to_string(),
        value_type,
    }
}

fn template(source_file: &str, mappings: BTreeMap<String, ExplicitMapping>) -> TemplateSpec {
    TemplateSpec {
        source_file: source_file.to_string(),
        output_file: None,
        template_key: None,
        mappings,
        source_form_files: None,
    }
}

/// Write a one-sheet template workbook under `dir`.
fn seed_template(dir: &Path, file_name: &str, sheets: &[&str]) {
    let mut wb = Workbook::new();
    for sheet in sheets {
        wb.add_sheet(*sheet).set(1, 1, "見出し");
    }
    wb.save(&dir.join(file_name)).expect("seed template");
}

fn text_cell(workbook: &Workbook, sheet: &str, row: u32, col: u32) -> Option<String> {
    workbook
        .sheet(sheet)
        .and_then(|s| s.get(row, col))
        .map(|v| v.display())
}

#[test]
fn explicit_mapping_wins_over_auto_mapping() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "shinsei.xml", &["様式1"]);

    // The catalog would auto-place APPLICANT_NAME at D9; the explicit
    // mapping overrides it to C5.
    let catalog = FieldCatalog::new(vec![field(
        "APPLICANT_NAME",
        "shinsei.xml",
        "様式1",
        "様式1!D9",
        "自由記載",
    )])
    .expect("catalog");

    let mut mappings = BTreeMap::new();
    mappings.insert(
        "APPLICANT_NAME".to_string(),
        explicit("様式1", "C5", ValueType::Text),
    );
    let config = MappingConfig {
        templates: vec![template("shinsei.xml", mappings)],
    };

    let mut answers = AnswerSet::new();
    answer(&mut answers, "APPLICANT_NAME", "山田運送");

    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");
    assert!(result.notes.is_empty());
    assert_eq!(result.output_files.len(), 1);

    let filled = Workbook::load(&result.output_files[0]).expect("load output");
    assert_eq!(
        text_cell(&filled, "様式1", 5, 3).as_deref(),
        Some("山田運送")
    );
    // The auto-mapping target must be untouched.
    assert_eq!(text_cell(&filled, "様式1", 9, 4), None);
}

#[test]
fn auto_mapping_places_catalog_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "shinsei.xml", &["様式1"]);

    let catalog = FieldCatalog::new(vec![
        field("FEE", "shinsei.xml", "様式1", "様式1!B2", "金額（円）"),
        field("GRANT_DATE", "shinsei.xml", "様式1", "C3", "和暦"),
        // Belongs to another form; must not be placed by this template.
        field("OTHER_FORM", "besshi.xml", "様式1", "様式1!E5", "自由記載"),
        // No cell range; silently skipped.
        field("NO_CELL", "shinsei.xml", "様式1", "", "自由記載"),
    ])
    .expect("catalog");

    let config = MappingConfig {
        templates: vec![template("shinsei.xml", BTreeMap::new())],
    };

    let mut answers = AnswerSet::new();
    answer(&mut answers, "FEE", "1200000");
    answer(&mut answers, "GRANT_DATE", "2024-04-01");
    answer(&mut answers, "OTHER_FORM", "置いてはいけない");
    answer(&mut answers, "NO_CELL", "どこにも置けない");
    answer(&mut answers, "UNKNOWN_FIELD", "カタログ外");

    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");
    assert!(result.notes.is_empty());

    let filled = Workbook::load(&result.output_files[0]).expect("load output");
    // Currency denormalizes to a number cell.
    assert_eq!(
        filled.sheet("様式1").unwrap().get(2, 2),
        Some(&CellValue::Number(1200000.0))
    );
    // Wareki-formatted field renders back to era text; the bare cell
    // resolved against the field's own sheet.
    assert_eq!(
        text_cell(&filled, "様式1", 3, 3).as_deref(),
        Some("令和6年4月1日")
    );
    assert_eq!(text_cell(&filled, "様式1", 5, 5), None);
}

#[test]
fn empty_answers_are_never_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "shinsei.xml", &["様式1"]);

    let catalog = FieldCatalog::new(vec![field(
        "REMARKS",
        "shinsei.xml",
        "様式1",
        "様式1!B2",
        "複数行",
    )])
    .expect("catalog");

    let mut mappings = BTreeMap::new();
    mappings.insert("REMARKS".to_string(), explicit("様式1", "C9", ValueType::Text));
    let config = MappingConfig {
        templates: vec![template("shinsei.xml", mappings)],
    };

    let mut answers = AnswerSet::new();
    answer(&mut answers, "REMARKS", "");

    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");
    assert!(result.notes.is_empty());
    let filled = Workbook::load(&result.output_files[0]).expect("load output");
    assert_eq!(text_cell(&filled, "様式1", 9, 3), None);
    assert_eq!(text_cell(&filled, "様式1", 2, 2), None);
}

#[test]
fn range_fill_distributes_characters_with_padding() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "shinsei.xml", &["様式1"]);

    let catalog = FieldCatalog::new(vec![field(
        "POSTAL_BOXES",
        "shinsei.xml",
        "様式1",
        "様式1!B2:E2",
        "自由記載",
    )])
    .expect("catalog");
    let config = MappingConfig {
        templates: vec![template("shinsei.xml", BTreeMap::new())],
    };

    let mut answers = AnswerSet::new();
    answer(&mut answers, "POSTAL_BOXES", "ABC");

    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");
    let filled = Workbook::load(&result.output_files[0]).expect("load output");
    let sheet = filled.sheet("様式1").expect("sheet");
    assert_eq!(sheet.get(2, 2), Some(&CellValue::Text("A".to_string())));
    assert_eq!(sheet.get(2, 3), Some(&CellValue::Text("B".to_string())));
    assert_eq!(sheet.get(2, 4), Some(&CellValue::Text("C".to_string())));
    assert_eq!(sheet.get(2, 5), Some(&CellValue::Text(String::new())));
}

#[test]
fn two_dimensional_range_fills_row_major() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "shinsei.xml", &["様式1"]);

    let catalog = FieldCatalog::new(vec![field(
        "GRID",
        "shinsei.xml",
        "様式1",
        "様式1!A1:B2",
        "自由記載",
    )])
    .expect("catalog");
    let config = MappingConfig {
        templates: vec![template("shinsei.xml", BTreeMap::new())],
    };

    let mut answers = AnswerSet::new();
    answer(&mut answers, "GRID", "岩手県");

    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");
    let filled = Workbook::load(&result.output_files[0]).expect("load output");
    let sheet = filled.sheet("様式1").expect("sheet");
    assert_eq!(sheet.get(1, 1), Some(&CellValue::Text("岩".to_string())));
    assert_eq!(sheet.get(1, 2), Some(&CellValue::Text("手".to_string())));
    assert_eq!(sheet.get(2, 1), Some(&CellValue::Text("県".to_string())));
    assert_eq!(sheet.get(2, 2), Some(&CellValue::Text(String::new())));
}

#[test]
fn missing_sheet_notes_do_not_abort_remaining_targets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "shinsei.xml", &["様式1"]);

    let catalog = FieldCatalog::new(Vec::new()).expect("catalog");
    let mut mappings = BTreeMap::new();
    mappings.insert(
        "APPLICANT_NAME".to_string(),
        ExplicitMapping {
            sheet: None,
            cell: "様式X!C5;様式1!C5".to_string(),
            value_type: ValueType::Text,
        },
    );
    let config = MappingConfig {
        templates: vec![template("shinsei.xml", mappings)],
    };

    let mut answers = AnswerSet::new();
    answer(&mut answers, "APPLICANT_NAME", "山田運送");

    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");
    assert_eq!(result.notes.len(), 1);
    assert_eq!(result.notes[0].level, IssueSeverity::Warning);
    assert!(result.notes[0].message.contains("様式X"));

    // The second target was still written.
    let filled = Workbook::load(&result.output_files[0]).expect("load output");
    assert_eq!(
        text_cell(&filled, "様式1", 5, 3).as_deref(),
        Some("山田運送")
    );
}

#[test]
fn unresolved_cell_expressions_produce_one_warning() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "shinsei.xml", &["様式1"]);

    let catalog = FieldCatalog::new(Vec::new()).expect("catalog");
    let mut mappings = BTreeMap::new();
    // Bare cell with no default sheet resolves to nothing.
    mappings.insert(
        "APPLICANT_NAME".to_string(),
        ExplicitMapping {
            sheet: None,
            cell: "C5".to_string(),
            value_type: ValueType::Text,
        },
    );
    let config = MappingConfig {
        templates: vec![template("shinsei.xml", mappings)],
    };

    let mut answers = AnswerSet::new();
    answer(&mut answers, "APPLICANT_NAME", "山田運送");

    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");
    assert_eq!(result.notes.len(), 1);
    assert!(result.notes[0].message.contains("マッピング先セル"));
}

#[test]
fn missing_template_is_skipped_with_an_error_note() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    seed_template(dir.path(), "present.xml", &["様式1"]);

    let catalog = FieldCatalog::new(Vec::new()).expect("catalog");
    let config = MappingConfig {
        templates: vec![
            template("absent.xml", BTreeMap::new()),
            template("present.xml", BTreeMap::new()),
        ],
    };

    let answers = AnswerSet::new();
    let result = write_templates(&answers, &catalog, &config, dir.path(), &out).expect("write");

    assert_eq!(result.notes.len(), 1);
    assert_eq!(result.notes[0].field_id, "*");
    assert_eq!(result.notes[0].level, IssueSeverity::Error);
    assert_eq!(result.notes[0].template, "absent.xml");
    // The other template still produced output.
    assert_eq!(result.output_files.len(), 1);
    assert!(result.output_files[0].ends_with("filled_present.xml"));
}

#[test]
fn legacy_binary_template_is_skipped_with_a_warning() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    std::fs::write(dir.path().join("old_form.xls"), b"binary junk").expect("write");

    let catalog = FieldCatalog::new(Vec::new()).expect("catalog");
    let config = MappingConfig {
        templates: vec![template("old_form.xls", BTreeMap::new())],
    };

    let result =
        write_templates(&AnswerSet::new(), &catalog, &config, dir.path(), &out).expect("write");
    assert!(result.output_files.is_empty());
    assert_eq!(result.notes.len(), 1);
    assert_eq!(result.notes[0].field_id, "*");
    assert_eq!(result.notes[0].level, IssueSeverity::Warning);
}

#[test]
fn no_templates_is_a_no_op_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");
    let catalog = FieldCatalog::new(Vec::new()).expect("catalog");

    let result = write_templates(
        &AnswerSet::new(),
        &catalog,
        &MappingConfig::default(),
        dir.path(),
        &out,
    )
    .expect("write");
    assert!(result.output_files.is_empty());
    assert!(result.notes.is_empty());
    assert!(out.is_dir());
}
