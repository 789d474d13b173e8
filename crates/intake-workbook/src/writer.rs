//! XML Spreadsheet 2003 writer.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use crate::error::{Result, WorkbookError};
use crate::sheet::{CellValue, Workbook};

const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";
const OFFICE_NS: &str = "urn:schemas-microsoft-com:office:office";
const EXCEL_NS: &str = "urn:schemas-microsoft-com:office:excel";

/// Write a workbook document to disk.
///
/// Rows and cells are emitted with explicit `ss:Index` attributes so the
/// sparse model round-trips without padding.
pub fn write_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut xml = Writer::new_with_indent(BufWriter::new(file), b' ', 1);

    emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(
        &mut xml,
        Event::PI(BytesPI::new("mso-application progid=\"Excel.Sheet\"")),
    )?;

    let mut root = BytesStart::new("Workbook");
    root.push_attribute(("xmlns", SPREADSHEET_NS));
    root.push_attribute(("xmlns:o", OFFICE_NS));
    root.push_attribute(("xmlns:x", EXCEL_NS));
    root.push_attribute(("xmlns:ss", SPREADSHEET_NS));
    emit(&mut xml, Event::Start(root))?;

    for sheet in workbook.sheets() {
        let mut ws = BytesStart::new("Worksheet");
        ws.push_attribute(("ss:Name", sheet.name.as_str()));
        emit(&mut xml, Event::Start(ws))?;
        emit(&mut xml, Event::Start(BytesStart::new("Table")))?;

        let mut current_row: Option<u32> = None;
        for (row, col, value) in sheet.cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    emit(&mut xml, Event::End(BytesEnd::new("Row")))?;
                }
                let mut row_el = BytesStart::new("Row");
                let index = row.to_string();
                row_el.push_attribute(("ss:Index", index.as_str()));
                emit(&mut xml, Event::Start(row_el))?;
                current_row = Some(row);
            }
            write_cell(&mut xml, col, value)?;
        }
        if current_row.is_some() {
            emit(&mut xml, Event::End(BytesEnd::new("Row")))?;
        }

        emit(&mut xml, Event::End(BytesEnd::new("Table")))?;
        emit(&mut xml, Event::End(BytesEnd::new("Worksheet")))?;
    }

    emit(&mut xml, Event::End(BytesEnd::new("Workbook")))?;
    Ok(())
}

fn write_cell<W: std::io::Write>(xml: &mut Writer<W>, col: u32, value: &CellValue) -> Result<()> {
    let mut cell = BytesStart::new("Cell");
    let index = col.to_string();
    cell.push_attribute(("ss:Index", index.as_str()));
    emit(xml, Event::Start(cell))?;

    let mut data = BytesStart::new("Data");
    let (type_name, body) = match value {
        CellValue::Number(n) => ("Number", format!("{n}")),
        CellValue::Text(text) => ("String", text.clone()),
    };
    data.push_attribute(("ss:Type", type_name));
    if body.is_empty() {
        // Self-closing so the indenting writer cannot pad the cell text.
        emit(xml, Event::Empty(data))?;
    } else {
        emit(xml, Event::Start(data))?;
        emit(xml, Event::Text(BytesText::new(&body)))?;
        emit(xml, Event::End(BytesEnd::new("Data")))?;
    }

    emit(xml, Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}

fn emit<W: std::io::Write>(xml: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    xml.write_event(event).map_err(WorkbookError::malformed_xml)
}
