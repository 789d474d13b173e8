//! Case persistence.
//!
//! Cases, their answers and their export records live in one JSON document
//! per case under the store root. Raw answers are canonical; normalized
//! values are a cached derived view, recomputed before every export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use intake_model::{AnswerSet, RawAnswers};

/// Default title for a freshly created case.
pub const DEFAULT_CASE_TITLE: &str = "新規案件";

/// A case's lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Draft,
    Exported,
}

/// Case header data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub title: String,
    pub status: CaseStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// One recorded export artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    pub export_id: String,
    pub path: PathBuf,
    pub checksum_sha256: String,
    pub created_at: String,
}

/// The on-disk document for one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CaseDocument {
    case: CaseRecord,
    #[serde(default)]
    answers_raw: RawAnswers,
    #[serde(default)]
    answers_norm: AnswerSet,
    #[serde(default)]
    exports: Vec<ExportRecord>,
}

/// Directory-backed case store.
#[derive(Debug, Clone)]
pub struct CaseStore {
    root: PathBuf,
}

impl CaseStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)
            .with_context(|| format!("create case store: {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn case_path(&self, case_id: &str) -> PathBuf {
        self.root.join(format!("{case_id}.json"))
    }

    fn read_document(&self, case_id: &str) -> Result<CaseDocument> {
        let path = self.case_path(case_id);
        if !path.exists() {
            bail!("case not found: {case_id}");
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read case: {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse case: {}", path.display()))
    }

    fn write_document(&self, document: &CaseDocument) -> Result<()> {
        let path = self.case_path(&document.case.case_id);
        let json = serde_json::to_string_pretty(document).context("serialize case")?;
        std::fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("write case: {}", path.display()))?;
        Ok(())
    }

    /// Create a new draft case with a fresh id.
    pub fn create_case(&self, title: &str) -> Result<CaseRecord> {
        let title = title.trim();
        let title = if title.is_empty() {
            DEFAULT_CASE_TITLE
        } else {
            title
        };
        let now = Utc::now().to_rfc3339();
        let case = CaseRecord {
            case_id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            status: CaseStatus::Draft,
            created_at: now.clone(),
            updated_at: now,
        };
        self.write_document(&CaseDocument {
            case: case.clone(),
            answers_raw: RawAnswers::new(),
            answers_norm: AnswerSet::new(),
            exports: Vec::new(),
        })?;
        Ok(case)
    }

    pub fn get_case(&self, case_id: &str) -> Result<CaseRecord> {
        Ok(self.read_document(case_id)?.case)
    }

    /// All cases, newest update first.
    pub fn list_cases(&self) -> Result<Vec<CaseRecord>> {
        let mut cases = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read case: {}", path.display()))?;
            let document: CaseDocument = serde_json::from_str(&text)
                .with_context(|| format!("parse case: {}", path.display()))?;
            cases.push(document.case);
        }
        cases.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(cases)
    }

    /// Merge raw answers and their cached normalized forms into the case.
    pub fn upsert_answers(
        &self,
        case_id: &str,
        raw: &RawAnswers,
        normalized: &AnswerSet,
    ) -> Result<usize> {
        let mut document = self.read_document(case_id)?;
        for (field_id, value) in raw {
            document
                .answers_raw
                .insert(field_id.clone(), value.clone());
        }
        for (field_id, answer) in normalized {
            document
                .answers_norm
                .insert(field_id.clone(), answer.clone());
        }
        document.case.updated_at = Utc::now().to_rfc3339();
        self.write_document(&document)?;
        Ok(normalized.len())
    }

    pub fn raw_answers(&self, case_id: &str) -> Result<RawAnswers> {
        Ok(self.read_document(case_id)?.answers_raw)
    }

    pub fn normalized_answers(&self, case_id: &str) -> Result<AnswerSet> {
        Ok(self.read_document(case_id)?.answers_norm)
    }

    /// Record an export artifact and mark the case exported.
    pub fn record_export(&self, case_id: &str, export: ExportRecord) -> Result<()> {
        let mut document = self.read_document(case_id)?;
        document.exports.push(export);
        document.case.status = CaseStatus::Exported;
        document.case.updated_at = Utc::now().to_rfc3339();
        self.write_document(&document)
    }

    /// Export records, newest first.
    pub fn list_exports(&self, case_id: &str) -> Result<Vec<ExportRecord>> {
        let mut exports = self.read_document(case_id)?.exports;
        exports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(exports)
    }
}

/// Generate a fresh export identifier.
pub fn new_export_id() -> String {
    Uuid::new_v4().to_string()
}

/// SHA-256 checksum of a file, hex-encoded.
pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read for checksum: {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
