//! Workbook model and codec for XML Spreadsheet 2003 documents.
//!
//! Submission templates are spreadsheet documents edited in place: load a
//! template into the sparse in-memory model, set answer cells, save the
//! result under a new name. Legacy binary workbooks are detected but not
//! editable; conversion is an external offline step.

mod cellref;
mod error;
mod reader;
mod sheet;
mod writer;

pub use cellref::{CellRef, RangeRef, column_label, parse_cell_ref, parse_range};
pub use error::{Result, WorkbookError};
pub use reader::{is_legacy_binary, read_workbook};
pub use sheet::{CellValue, Workbook, Worksheet};
pub use writer::write_workbook;
