//! Review report generation.
//!
//! Serializes an export run's validation issues and mapping notes into one
//! auditable workbook: a fixed header row, one row per validation issue,
//! then one row per mapping note, each list in its input order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use intake_model::{MappingNote, ValidationIssue};
use intake_workbook::Workbook;

const HEADER: [&str; 5] = ["kind", "severity", "field_id", "message", "template"];

/// Build the review report workbook at `output_path`.
pub fn build_review_report(
    issues: &[ValidationIssue],
    notes: &[MappingNote],
    output_path: &Path,
) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("review");

    for (col, title) in HEADER.iter().enumerate() {
        sheet.set(1, col as u32 + 1, *title);
    }

    let mut row = 2u32;
    for issue in issues {
        sheet.set(row, 1, "validation");
        sheet.set(row, 2, issue.severity.as_str());
        sheet.set(row, 3, issue.field_id.as_str());
        sheet.set(row, 4, issue.message.as_str());
        sheet.set(row, 5, "");
        row += 1;
    }
    for note in notes {
        sheet.set(row, 1, "mapping");
        sheet.set(row, 2, note.level.as_str());
        sheet.set(row, 3, note.field_id.as_str());
        sheet.set(row, 4, note.message.as_str());
        sheet.set(row, 5, note.template.as_str());
        row += 1;
    }

    workbook
        .save(output_path)
        .with_context(|| format!("write review report: {}", output_path.display()))?;
    Ok(output_path.to_path_buf())
}
