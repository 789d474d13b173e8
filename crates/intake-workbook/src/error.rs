//! Error types for workbook file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing workbook files.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Structurally invalid workbook XML.
    #[error("malformed workbook XML: {message}")]
    MalformedXml { message: String },

    /// Unparseable A1-style cell or range reference.
    #[error("invalid cell reference: {reference}")]
    InvalidCellRef { reference: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for workbook operations.
pub type Result<T> = std::result::Result<T, WorkbookError>;

impl WorkbookError {
    /// Create a MalformedXml error from any displayable cause.
    pub fn malformed_xml(message: impl std::fmt::Display) -> Self {
        Self::MalformedXml {
            message: message.to_string(),
        }
    }

    /// Create an InvalidCellRef error.
    pub fn invalid_cell_ref(reference: impl Into<String>) -> Self {
        Self::InvalidCellRef {
            reference: reference.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorkbookError::invalid_cell_ref("1A");
        assert_eq!(format!("{err}"), "invalid cell reference: 1A");

        let err = WorkbookError::malformed_xml("unexpected end of document");
        assert_eq!(
            format!("{err}"),
            "malformed workbook XML: unexpected end of document"
        );
    }
}
