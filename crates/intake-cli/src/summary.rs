//! Terminal summaries for pipeline results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use intake_catalog::StepGroup;
use intake_model::{IssueSeverity, MappingNote, ValidationIssue};
use intake_store::CaseRecord;

use crate::pipeline::ExportOutcome;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("error").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
    }
}

pub fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        println!("Validation: no issues");
        return;
    }
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.field_id),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
}

pub fn print_notes(notes: &[MappingNote]) {
    if notes.is_empty() {
        println!("Mapping: no notes");
        return;
    }
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Template"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    for note in notes {
        table.add_row(vec![
            severity_cell(note.level),
            Cell::new(&note.template),
            Cell::new(&note.field_id),
            Cell::new(&note.message),
        ]);
    }
    println!("{table}");
}

pub fn print_export_summary(outcome: &ExportOutcome) {
    println!("Export: {}", outcome.export_id);
    println!("Output: {}", outcome.work_dir.display());
    for path in &outcome.output_files {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            println!("  - {name}");
        }
    }
    println!(
        "Review report: {}",
        outcome.review_report.display()
    );
    println!("Manifest: {}", outcome.manifest.display());
    print_issues(&outcome.issues);
    print_notes(&outcome.notes);
}

pub fn print_fields(groups: &[StepGroup<'_>]) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Field"),
        header_cell("Format"),
        header_cell("Required"),
        header_cell("Target"),
    ]);
    for group in groups {
        for field in &group.fields {
            table.add_row(vec![
                Cell::new(&group.step_title),
                Cell::new(&field.field_id),
                Cell::new(&field.format),
                if field.required {
                    Cell::new("必須").fg(Color::Red)
                } else {
                    Cell::new("")
                },
                Cell::new(field.cell_range.as_deref().unwrap_or("")),
            ]);
        }
    }
    println!("{table}");
}

pub fn print_cases(cases: &[CaseRecord]) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Title"),
        header_cell("Status"),
        header_cell("Updated"),
    ]);
    for case in cases {
        table.add_row(vec![
            Cell::new(&case.case_id),
            Cell::new(&case.title),
            Cell::new(format!("{:?}", case.status).to_lowercase()),
            Cell::new(&case.updated_at),
        ]);
    }
    println!("{table}");
}
