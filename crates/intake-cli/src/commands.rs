//! Command implementations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::info;

use intake_catalog::{build_step_groups, load_field_catalog};
use intake_model::RawAnswers;
use intake_normalize::normalize_answers;
use intake_store::{CaseStore, ExportRecord, new_export_id, sha256_file};
use intake_validate::validate_answers;

use crate::cli::{
    AnswerSourceArgs, CaseListArgs, CaseNewArgs, CaseSetArgs, ExportArgs, FieldsArgs,
    ValidateArgs,
};
use crate::pipeline::{execute_export, has_error_issues, load_config};
use crate::summary;

/// Read an answers file: either a bare JSON object of field id to value, or
/// a document with a top-level `answers` object.
fn load_answers_file(path: &Path) -> Result<RawAnswers> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read answers: {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parse answers: {}", path.display()))?;

    let object = match &value {
        serde_json::Value::Object(map) => match map.get("answers") {
            Some(serde_json::Value::Object(inner)) => inner,
            _ => map,
        },
        _ => bail!("answers file must contain a JSON object: {}", path.display()),
    };

    Ok(object
        .iter()
        .map(|(field_id, value)| (field_id.clone(), value.clone()))
        .collect())
}

/// Resolve raw answers from the configured source. Returns the store handle
/// and case id when the source is a stored case.
fn resolve_answers(source: &AnswerSourceArgs) -> Result<(RawAnswers, Option<(CaseStore, String)>)> {
    match (&source.case, &source.answers) {
        (Some(case_id), _) => {
            let store = CaseStore::open(&source.store)?;
            let raw = store.raw_answers(case_id)?;
            Ok((raw, Some((store, case_id.clone()))))
        }
        (None, Some(path)) => Ok((load_answers_file(path)?, None)),
        (None, None) => bail!("specify an answer source: --case <CASE_ID> or --answers <PATH>"),
    }
}

pub fn run_export(args: &ExportArgs) -> Result<i32> {
    let config = load_config(&args.config.catalog, &args.config.mapping)?;
    let (raw_answers, stored_case) = resolve_answers(&args.source)?;

    let export_id = new_export_id();
    let case_key = stored_case
        .as_ref()
        .map(|(_, case_id)| case_id.clone())
        .unwrap_or_else(|| "adhoc".to_string());
    let work_dir = args.output_dir.join(&case_key).join(&export_id);

    let outcome = execute_export(
        &config,
        &raw_answers,
        &export_id,
        &args.templates,
        &work_dir,
        args.debug_json,
    )?;

    if let Some((store, case_id)) = &stored_case {
        // Persist the freshly normalized answers and the artifact record.
        store.upsert_answers(case_id, &raw_answers, &outcome.normalized)?;
        store.record_export(
            case_id,
            ExportRecord {
                export_id: export_id.clone(),
                path: outcome.manifest.clone(),
                checksum_sha256: sha256_file(&outcome.manifest)?,
                created_at: Utc::now().to_rfc3339(),
            },
        )?;
        info!(case_id = %case_id, "export recorded");
    }

    summary::print_export_summary(&outcome);
    Ok(if has_error_issues(&outcome.issues) { 1 } else { 0 })
}

pub fn run_validate(args: &ValidateArgs) -> Result<i32> {
    let catalog = load_field_catalog(&args.config.catalog).context("load field catalog")?;
    let (raw_answers, _) = resolve_answers(&args.source)?;

    let normalized = normalize_answers(&raw_answers, catalog.fields());
    let issues = validate_answers(catalog.fields(), &normalized);
    summary::print_issues(&issues);
    Ok(if has_error_issues(&issues) { 1 } else { 0 })
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let catalog = load_field_catalog(&args.config.catalog).context("load field catalog")?;
    let groups = build_step_groups(catalog.fields());
    summary::print_fields(&groups);
    Ok(())
}

pub fn run_case_new(args: &CaseNewArgs) -> Result<()> {
    let store = CaseStore::open(&args.store)?;
    let case = store.create_case(&args.title)?;
    println!("{}  {}", case.case_id, case.title);
    Ok(())
}

pub fn run_case_list(args: &CaseListArgs) -> Result<()> {
    let store = CaseStore::open(&args.store)?;
    let cases = store.list_cases()?;
    summary::print_cases(&cases);
    Ok(())
}

pub fn run_case_set(args: &CaseSetArgs) -> Result<i32> {
    let catalog = load_field_catalog(&args.config.catalog).context("load field catalog")?;
    let store = CaseStore::open(&args.store)?;
    // Fails fast when the case does not exist.
    store.get_case(&args.case_id)?;

    let incoming = load_answers_file(&args.answers)?;
    let normalized = normalize_answers(&incoming, catalog.fields());
    let updated = store.upsert_answers(&args.case_id, &incoming, &normalized)?;
    info!(case_id = %args.case_id, updated, "answers updated");

    // Re-validate the merged answer set, not just the incoming slice.
    let merged_raw = store.raw_answers(&args.case_id)?;
    let merged = normalize_answers(&merged_raw, catalog.fields());
    let issues = validate_answers(catalog.fields(), &merged);
    summary::print_issues(&issues);
    Ok(if has_error_issues(&issues) { 1 } else { 0 })
}
