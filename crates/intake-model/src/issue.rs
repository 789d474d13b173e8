//! Diagnostics produced by validation and template mapping.
//!
//! Issues and notes are ordinary values, never errors: both stages
//! accumulate diagnostics and keep going so the export stays as complete as
//! possible for human review.

use serde::{Deserialize, Serialize};

/// Severity of a validation issue or mapping note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl IssueSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
        }
    }
}

/// A validation finding for one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field_id: String,
    pub severity: IssueSeverity,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            severity: IssueSeverity::Error,
            message: message.into(),
        }
    }

    pub fn warning(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            severity: IssueSeverity::Warning,
            message: message.into(),
        }
    }
}

/// A placement diagnostic from the template mapping engine, scoped to a
/// template and optionally a field (`field_id = "*"` for template-level
/// notes). Never silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingNote {
    pub field_id: String,
    pub template: String,
    pub level: IssueSeverity,
    pub message: String,
}

impl MappingNote {
    pub fn error(
        field_id: impl Into<String>,
        template: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            template: template.into(),
            level: IssueSeverity::Error,
            message: message.into(),
        }
    }

    pub fn warning(
        field_id: impl Into<String>,
        template: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            template: template.into(),
            level: IssueSeverity::Warning,
            message: message.into(),
        }
    }
}

/// Count issues of a given severity.
pub fn count_issues(issues: &[ValidationIssue], severity: IssueSeverity) -> usize {
    issues
        .iter()
        .filter(|issue| issue.severity == severity)
        .count()
}
