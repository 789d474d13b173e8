//! Template mapping engine.
//!
//! Places normalized answers into submission templates in two passes per
//! template: explicit per-field overrides first, then schema-driven auto
//! mapping for everything the overrides did not cover. A field with an
//! explicit mapping in a template is never auto-mapped in that same
//! template. Every skipped template, unresolved target and missing sheet
//! becomes a mapping note; nothing is silently dropped.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use intake_catalog::FieldCatalog;
use intake_model::{AnswerSet, CellScalar, MappingConfig, MappingNote, TemplateSpec};
use intake_normalize::{classify_format, denormalize_value};
use intake_workbook::{CellValue, RangeRef, Workbook, Worksheet, is_legacy_binary, parse_range};

use crate::targets::{Target, parse_targets};

/// Outcome of a template-writing run: produced documents plus the full
/// ordered list of mapping notes.
#[derive(Debug, Default)]
pub struct WriteResult {
    pub output_files: Vec<PathBuf>,
    pub notes: Vec<MappingNote>,
}

/// Fill every configured template with the given answers.
///
/// Templates are processed in declaration order. A template whose source is
/// missing, legacy-binary or unreadable is skipped whole with a note; all
/// other templates still produce output.
pub fn write_templates(
    answers: &AnswerSet,
    catalog: &FieldCatalog,
    config: &MappingConfig,
    template_dir: &Path,
    output_dir: &Path,
) -> Result<WriteResult> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;

    let mut result = WriteResult::default();
    for template in &config.templates {
        write_template(answers, catalog, template, template_dir, output_dir, &mut result)?;
    }

    info!(
        templates = config.templates.len(),
        outputs = result.output_files.len(),
        notes = result.notes.len(),
        "template mapping finished"
    );
    Ok(result)
}

fn write_template(
    answers: &AnswerSet,
    catalog: &FieldCatalog,
    template: &TemplateSpec,
    template_dir: &Path,
    output_dir: &Path,
    result: &mut WriteResult,
) -> Result<()> {
    let template_key = template.key();
    let source_path = template_dir.join(&template.source_file);

    if !source_path.exists() {
        result.notes.push(MappingNote::error(
            "*",
            template_key,
            format!(
                "テンプレートファイルが見つかりません: {}",
                template.source_file
            ),
        ));
        return Ok(());
    }

    match is_legacy_binary(&source_path) {
        Ok(true) => {
            result.notes.push(MappingNote::warning(
                "*",
                template_key,
                "旧形式（.xls）は直接編集できないため未出力です。事前にXML形式へ変換してください。",
            ));
            return Ok(());
        }
        Ok(false) => {}
        Err(error) => {
            result.notes.push(MappingNote::error(
                "*",
                template_key,
                format!("テンプレートを読み込めません: {error}"),
            ));
            return Ok(());
        }
    }

    let mut workbook = match Workbook::load(&source_path) {
        Ok(workbook) => workbook,
        Err(error) => {
            result.notes.push(MappingNote::error(
                "*",
                template_key,
                format!("テンプレートを読み込めません: {error}"),
            ));
            return Ok(());
        }
    };

    debug!(template = template_key, "filling template");

    // Pass 1: explicit per-field overrides.
    for (field_id, mapping) in &template.mappings {
        let Some(answer) = answers.get(field_id) else {
            continue;
        };
        if answer.norm.is_empty() {
            continue;
        }

        let targets = parse_targets(&mapping.cell, mapping.sheet.as_deref());
        if targets.is_empty() {
            result.notes.push(MappingNote::warning(
                field_id,
                template_key,
                "マッピング先セルが不正です。",
            ));
            continue;
        }

        let value = denormalize_value(&answer.norm, mapping.value_type);
        write_to_targets(
            &mut workbook,
            &targets,
            &value,
            field_id,
            template_key,
            &mut result.notes,
        );
    }

    // Pass 2: auto mapping from the catalog's own cell locations. Explicit
    // fields are excluded up front so a double write is impossible.
    let explicit_ids: BTreeSet<&str> = template.mappings.keys().map(String::as_str).collect();
    let source_forms = template.auto_source_forms();

    for (field_id, answer) in answers {
        if answer.norm.is_empty() || explicit_ids.contains(field_id.as_str()) {
            continue;
        }
        let Some(field) = catalog.get(field_id) else {
            continue;
        };
        if !source_forms.iter().any(|form| *form == field.form_file) {
            continue;
        }
        let Some(cell_range) = field.cell_range.as_deref() else {
            continue;
        };

        let targets = parse_targets(cell_range, field.sheet.as_deref());
        if targets.is_empty() {
            result.notes.push(MappingNote::warning(
                field_id,
                template_key,
                format!("cell_range の解析に失敗: {cell_range}"),
            ));
            continue;
        }

        let value = denormalize_value(&answer.norm, classify_format(&field.format));
        write_to_targets(
            &mut workbook,
            &targets,
            &value,
            field_id,
            template_key,
            &mut result.notes,
        );
    }

    let output_path = output_dir.join(template.output_name());
    workbook
        .save(&output_path)
        .with_context(|| format!("save filled template: {}", output_path.display()))?;
    result.output_files.push(output_path);
    Ok(())
}

/// Write one denormalized value to every resolved target whose sheet
/// exists. Missing sheets and unparseable references each cost one warning
/// note; the remaining targets still get written.
fn write_to_targets(
    workbook: &mut Workbook,
    targets: &[Target],
    value: &CellScalar,
    field_id: &str,
    template_key: &str,
    notes: &mut Vec<MappingNote>,
) {
    for (sheet_name, cell_expr) in targets {
        let Some(sheet) = workbook.sheet_mut(sheet_name) else {
            notes.push(MappingNote::warning(
                field_id,
                template_key,
                format!("シートが見つかりません: {sheet_name}"),
            ));
            continue;
        };
        match parse_range(cell_expr) {
            Ok(range) => fill_range(sheet, &range, value),
            Err(_) => notes.push(MappingNote::warning(
                field_id,
                template_key,
                format!("セル参照を解析できません: {cell_expr}"),
            )),
        }
    }
}

/// Range-fill policy: a single cell takes the value directly; a larger
/// range takes the value's characters one per cell in reading order, with
/// cells beyond the string length blanked. This matches boxed, one
/// character-per-box paper forms.
fn fill_range(sheet: &mut Worksheet, range: &RangeRef, value: &CellScalar) {
    if range.is_single_cell() {
        sheet.set_cell(range.start, to_cell_value(value));
        return;
    }

    let text = value.display_string();
    let mut chars = text.chars();
    for cell in range.cells() {
        let boxed = chars.next().map(String::from).unwrap_or_default();
        sheet.set_cell(cell, CellValue::Text(boxed));
    }
}

fn to_cell_value(value: &CellScalar) -> CellValue {
    match value {
        CellScalar::Number(n) => CellValue::Number(*n as f64),
        CellScalar::Text(text) => CellValue::Text(text.clone()),
    }
}
