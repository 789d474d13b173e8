//! Template mapping configuration.
//!
//! A mapping configuration is an ordered list of template specs. Each spec
//! names a source document, an output filename, an optional set of explicit
//! per-field cell overrides, and the catalog forms the template auto-consumes.
//! Loaded once per export and read-only during a run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::ValueType;

/// An explicit per-field placement override inside one template.
///
/// Explicit mappings always win over auto-mapping for the same field in the
/// same template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplicitMapping {
    /// Default sheet for bare cell segments in `cell`.
    pub sheet: Option<String>,
    /// Cell expression: `;`- or newline-separated `sheet!cell` segments, or
    /// bare cells resolved against `sheet`.
    pub cell: String,
    /// Value type used at denormalization time.
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
}

/// One output template in the mapping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Source document filename, resolved under the template directory.
    pub source_file: String,
    /// Output document filename; defaults to `filled_<source_file>`.
    #[serde(default)]
    pub output_file: Option<String>,
    /// Stable key used to scope mapping notes; defaults to `source_file`.
    #[serde(default)]
    pub template_key: Option<String>,
    /// Explicit field placements, keyed by field id.
    #[serde(default)]
    pub mappings: BTreeMap<String, ExplicitMapping>,
    /// Catalog form files this template auto-consumes; defaults to the
    /// source file itself.
    #[serde(default)]
    pub source_form_files: Option<Vec<String>>,
}

impl TemplateSpec {
    /// Note-scoping key for this template.
    pub fn key(&self) -> &str {
        match self.template_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => &self.source_file,
        }
    }

    /// Output filename for the filled document.
    pub fn output_name(&self) -> String {
        match self.output_file.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("filled_{}", self.source_file),
        }
    }

    /// Form files whose catalog fields the auto-mapping pass may place.
    pub fn auto_source_forms(&self) -> Vec<String> {
        match &self.source_form_files {
            Some(files) => files
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            None => vec![self.source_file.clone()],
        }
    }
}

/// The full, ordered mapping configuration for an export run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingConfig {
    #[serde(default)]
    pub templates: Vec<TemplateSpec>,
}
