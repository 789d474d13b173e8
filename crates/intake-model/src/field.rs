//! Field catalog definitions.
//!
//! A field is one answerable question in the intake questionnaire, bound to
//! one or more spreadsheet cell targets in a submission form.

use serde::{Deserialize, Serialize};

/// Definition of one answerable field from the field catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Unique field identifier (e.g. "APPLICANT_NAME").
    pub field_id: String,
    /// Source form file this field belongs to.
    pub form_file: String,
    /// Human-readable form name.
    pub form_name: Option<String>,
    /// Worksheet the field's cells live on.
    pub sheet: Option<String>,
    /// Target cell or rectangular range expression (may list several
    /// `sheet!cell` segments separated by `;` or newlines).
    pub cell_range: Option<String>,
    /// Free-text format tag the value type is inferred from
    /// (e.g. "数字", "YYYY-MM-DD", "和暦").
    pub format: String,
    /// Whether an answer is mandatory. Derived at load time from free-text
    /// markers in the catalog source.
    pub required: bool,
    /// Wizard step grouping key.
    pub step_key: Option<String>,
    /// Wizard step display title.
    pub step_title: Option<String>,
    /// Example answer shown to the applicant.
    pub example: Option<String>,
    /// Help text shown to the applicant.
    pub help_text: Option<String>,
}
