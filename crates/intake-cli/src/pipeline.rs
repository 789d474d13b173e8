//! Export pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: field catalog and mapping configuration (fatal on
//!    structural errors, before any document is touched)
//! 2. **Normalize**: raw answers to canonical values
//! 3. **Validate**: advisory issues, never blocking
//! 4. **Map**: fill submission templates, collecting notes
//! 5. **Report**: review report workbook
//! 6. **Manifest**: per-artifact SHA-256 checksums
//!
//! Each export runs inside its own working directory keyed by a fresh
//! export id, so concurrent exports never share mutable document state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, info_span};

use intake_catalog::{FieldCatalog, load_field_catalog, load_mapping_config};
use intake_map::{WriteResult, write_templates};
use intake_model::{
    AnswerSet, IssueSeverity, MappingConfig, MappingNote, RawAnswers, ValidationIssue,
    count_issues,
};
use intake_normalize::normalize_answers;
use intake_report::build_review_report;
use intake_store::sha256_file;
use intake_validate::validate_answers;

const MANIFEST_SCHEMA: &str = "permit-intake.export-manifest";
const MANIFEST_SCHEMA_VERSION: u32 = 1;

/// Loaded, validated configuration for a run.
pub struct LoadedConfig {
    pub catalog: FieldCatalog,
    pub mapping: MappingConfig,
}

/// Stage 1: load catalog and mapping configuration, fail-fast.
pub fn load_config(catalog_path: &Path, mapping_path: &Path) -> Result<LoadedConfig> {
    let catalog = load_field_catalog(catalog_path).context("load field catalog")?;
    let mapping = load_mapping_config(mapping_path).context("load mapping configuration")?;
    info!(
        fields = catalog.len(),
        templates = mapping.templates.len(),
        "configuration loaded"
    );
    Ok(LoadedConfig { catalog, mapping })
}

/// Everything one export run produced.
pub struct ExportOutcome {
    pub export_id: String,
    pub work_dir: PathBuf,
    pub output_files: Vec<PathBuf>,
    pub review_report: PathBuf,
    pub manifest: PathBuf,
    pub issues: Vec<ValidationIssue>,
    pub notes: Vec<MappingNote>,
    pub normalized: AnswerSet,
}

#[derive(Serialize)]
struct ExportManifest<'a> {
    schema: &'static str,
    schema_version: u32,
    export_id: &'a str,
    generated_at: String,
    artifacts: Vec<ArtifactEntry>,
}

#[derive(Serialize)]
struct ArtifactEntry {
    file: String,
    sha256: String,
}

#[derive(Serialize)]
struct DebugDump<'a> {
    answers_raw: &'a RawAnswers,
    answers_norm: &'a AnswerSet,
    validation_issues: &'a [ValidationIssue],
    mapping_notes: &'a [MappingNote],
}

/// Stages 2-6: run one export into its isolated working directory.
pub fn execute_export(
    config: &LoadedConfig,
    raw_answers: &RawAnswers,
    export_id: &str,
    template_dir: &Path,
    work_dir: &Path,
    debug_json: bool,
) -> Result<ExportOutcome> {
    let span = info_span!("export", export_id = %export_id);
    let _guard = span.enter();

    std::fs::create_dir_all(work_dir)
        .with_context(|| format!("create export dir: {}", work_dir.display()))?;

    let normalized = normalize_answers(raw_answers, config.catalog.fields());
    info!(answers = normalized.len(), "answers normalized");

    let issues = validate_answers(config.catalog.fields(), &normalized);
    info!(
        errors = count_issues(&issues, IssueSeverity::Error),
        warnings = count_issues(&issues, IssueSeverity::Warning),
        "validation finished"
    );

    let WriteResult {
        output_files,
        notes,
    } = write_templates(
        &normalized,
        &config.catalog,
        &config.mapping,
        template_dir,
        work_dir,
    )?;

    let review_report =
        build_review_report(&issues, &notes, &work_dir.join("review_report.xml"))?;

    if debug_json {
        let dump = DebugDump {
            answers_raw: raw_answers,
            answers_norm: &normalized,
            validation_issues: &issues,
            mapping_notes: &notes,
        };
        let path = work_dir.join("debug_answers.json");
        let json = serde_json::to_string_pretty(&dump).context("serialize debug dump")?;
        std::fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("write {}", path.display()))?;
    }

    let manifest = write_manifest(export_id, work_dir, &output_files, &review_report)?;

    Ok(ExportOutcome {
        export_id: export_id.to_string(),
        work_dir: work_dir.to_path_buf(),
        output_files,
        review_report,
        manifest,
        issues,
        notes,
        normalized,
    })
}

/// True when any issue carries error severity; exports still complete, the
/// exit code just reflects that review is mandatory.
pub fn has_error_issues(issues: &[ValidationIssue]) -> bool {
    count_issues(issues, IssueSeverity::Error) > 0
}

fn write_manifest(
    export_id: &str,
    work_dir: &Path,
    output_files: &[PathBuf],
    review_report: &Path,
) -> Result<PathBuf> {
    let mut artifacts = Vec::new();
    for path in output_files.iter().map(PathBuf::as_path).chain([review_report]) {
        let file = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        artifacts.push(ArtifactEntry {
            file,
            sha256: sha256_file(path)?,
        });
    }

    let manifest = ExportManifest {
        schema: MANIFEST_SCHEMA,
        schema_version: MANIFEST_SCHEMA_VERSION,
        export_id,
        generated_at: Utc::now().to_rfc3339(),
        artifacts,
    };
    let path = work_dir.join("export_manifest.json");
    let json = serde_json::to_string_pretty(&manifest).context("serialize manifest")?;
    std::fs::write(&path, format!("{json}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
