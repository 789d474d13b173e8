//! Field catalog loading.
//!
//! The catalog source is a JSON document with a top-level `fields` list,
//! produced offline by the schema-extraction tool. Loading is fail-fast:
//! a missing file, a missing list, or a duplicate field id aborts before
//! any pipeline stage runs.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use intake_model::FieldDef;

/// Free-text markers that make a field mandatory.
const REQUIRED_MARKERS: [&str; 5] = ["true", "1", "yes", "必須", "required"];

/// One field record as it appears in the catalog source. Extraction-side
/// extras (evidence, questionnaire text) are ignored here.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    field_id: String,
    #[serde(default)]
    form_file: String,
    #[serde(default)]
    form_name: Option<String>,
    #[serde(default)]
    sheet: Option<String>,
    #[serde(default)]
    cell_range: Option<String>,
    #[serde(default)]
    format: String,
    /// Stored as a boolean or as free text ("必須（営業所ごと）").
    #[serde(default)]
    required: serde_json::Value,
    #[serde(default)]
    step_key: Option<String>,
    #[serde(default)]
    step_title: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default, alias = "help")]
    help_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    fields: Vec<CatalogRecord>,
}

/// The read-only field catalog: every answerable field, in source order,
/// with a unique-id index.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: Vec<FieldDef>,
    index: BTreeMap<String, usize>,
}

impl FieldCatalog {
    /// Build a catalog from already-parsed field definitions, rejecting
    /// duplicate ids.
    pub fn new(fields: Vec<FieldDef>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (position, field) in fields.iter().enumerate() {
            if field.field_id.is_empty() {
                bail!("catalog field at position {position} has an empty field_id");
            }
            if index.insert(field.field_id.clone(), position).is_some() {
                bail!("duplicate field_id in catalog: {}", field.field_id);
            }
        }
        Ok(Self { fields, index })
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldDef> {
        self.index.get(field_id).map(|&position| &self.fields[position])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Derive the mandatory flag from a boolean or free-text marker value.
fn required_flag(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(n) => n.as_i64() == Some(1),
        serde_json::Value::String(text) => {
            let lowered = text.trim().to_lowercase();
            REQUIRED_MARKERS.contains(&lowered.as_str()) || text.contains("必須")
        }
        _ => false,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl From<CatalogRecord> for FieldDef {
    fn from(record: CatalogRecord) -> Self {
        let required = required_flag(&record.required);
        FieldDef {
            field_id: record.field_id.trim().to_string(),
            form_file: record.form_file.trim().to_string(),
            form_name: non_empty(record.form_name),
            sheet: non_empty(record.sheet),
            cell_range: non_empty(record.cell_range),
            format: record.format.trim().to_string(),
            required,
            step_key: non_empty(record.step_key),
            step_title: non_empty(record.step_title),
            example: non_empty(record.example),
            help_text: non_empty(record.help_text),
        }
    }
}

/// Load the field catalog from its JSON source.
pub fn load_field_catalog(path: &Path) -> Result<FieldCatalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read field catalog: {}", path.display()))?;
    let document: CatalogDocument = serde_json::from_str(&text)
        .with_context(|| format!("field catalog must contain a top-level `fields` list: {}", path.display()))?;

    let fields: Vec<FieldDef> = document
        .fields
        .into_iter()
        .map(FieldDef::from)
        .filter(|field| !field.field_id.is_empty())
        .collect();

    FieldCatalog::new(fields)
}
