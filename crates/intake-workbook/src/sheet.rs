//! In-memory workbook model.
//!
//! Sheets are sparse: only cells that carry a value are stored, keyed by
//! 1-based (row, column). Loading a template and saving it back rewrites
//! the document from this model.

use std::collections::BTreeMap;
use std::path::Path;

use crate::cellref::CellRef;
use crate::error::Result;
use crate::reader::read_workbook;
use crate::writer::write_workbook;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Render the value the way it appears in a cell.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) => format!("{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One worksheet: a name plus a sparse cell grid.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, row: u32, col: u32, value: impl Into<CellValue>) {
        self.cells.insert((row, col), value.into());
    }

    pub fn set_cell(&mut self, cell: CellRef, value: impl Into<CellValue>) {
        self.set(cell.row, cell.col, value);
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    pub fn get_cell(&self, cell: CellRef) -> Option<&CellValue> {
        self.get(cell.row, cell.col)
    }

    /// Iterate stored cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.cells
            .iter()
            .map(|(&(row, col), value)| (row, col, value))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// An ordered collection of worksheets.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a workbook from an XML Spreadsheet 2003 document.
    pub fn load(path: &Path) -> Result<Self> {
        read_workbook(path)
    }

    /// Save the workbook as an XML Spreadsheet 2003 document.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_workbook(path, self)
    }

    /// Append a sheet and return a mutable handle to it.
    pub fn add_sheet(&mut self, name: impl Into<String>) -> &mut Worksheet {
        self.sheets.push(Worksheet::new(name));
        self.sheets.last_mut().expect("sheet just pushed")
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet(name).is_some()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub(crate) fn push_sheet(&mut self, sheet: Worksheet) {
        self.sheets.push(sheet);
    }
}
