//! XML Spreadsheet 2003 reader.
//!
//! Parses `<Workbook>/<Worksheet>/<Table>/<Row>/<Cell>/<Data>` documents
//! into the in-memory model. Sparse `ss:Index` attributes on rows and cells
//! are honored; anything outside that element skeleton (styles, print
//! setup, column widths) is skipped.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, WorkbookError};
use crate::sheet::{CellValue, Workbook, Worksheet};

/// OLE2 compound-file magic: the signature of legacy binary `.xls` files.
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// True if the file is a legacy binary workbook that cannot be edited in
/// place (detected by OLE2 magic bytes or a `.xls` extension).
pub fn is_legacy_binary(path: &Path) -> Result<bool> {
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xls"))
    {
        return Ok(true);
    }
    let mut file = std::fs::File::open(path)?;
    let mut magic = [0u8; 8];
    match std::io::Read::read_exact(&mut file, &mut magic) {
        Ok(()) => Ok(magic == OLE2_MAGIC),
        Err(error) if error.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(error) => Err(error.into()),
    }
}

/// Read a workbook document from disk.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(WorkbookError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = Reader::from_file(path).map_err(WorkbookError::malformed_xml)?;
    let mut buf = Vec::new();

    let mut workbook = Workbook::new();
    let mut sheet: Option<Worksheet> = None;
    let mut row: u32 = 0;
    let mut col: u32 = 0;
    let mut in_data = false;
    let mut data_is_number = false;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(WorkbookError::malformed_xml)?;
        match event {
            Event::Eof => break,
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"Worksheet" => {
                    let name = attr_value(e, "ss:Name")?.unwrap_or_default();
                    sheet = Some(Worksheet::new(name));
                    row = 0;
                }
                b"Row" => {
                    row = match attr_index(e, "ss:Index")? {
                        Some(index) => index,
                        None => row + 1,
                    };
                    col = 0;
                }
                b"Cell" => {
                    col = match attr_index(e, "ss:Index")? {
                        Some(index) => index,
                        None => col + 1,
                    };
                }
                b"Data" => {
                    in_data = true;
                    data_is_number = attr_value(e, "ss:Type")?.as_deref() == Some("Number");
                    text.clear();
                }
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"Row" => {
                    row = match attr_index(e, "ss:Index")? {
                        Some(index) => index,
                        None => row + 1,
                    };
                    col = 0;
                }
                b"Cell" => {
                    col = match attr_index(e, "ss:Index")? {
                        Some(index) => index,
                        None => col + 1,
                    };
                }
                b"Data" => {
                    if let Some(sheet) = sheet.as_mut() {
                        sheet.set(row.max(1), col.max(1), CellValue::Text(String::new()));
                    }
                }
                _ => {}
            },
            Event::Text(ref t) => {
                if in_data {
                    let chunk = t.decode().map_err(WorkbookError::malformed_xml)?;
                    text.push_str(&chunk);
                }
            }
            // Entity and character references inside cell text arrive as
            // their own events.
            Event::GeneralRef(ref e) => {
                if in_data {
                    let name = e.decode().map_err(WorkbookError::malformed_xml)?;
                    text.push_str(&resolve_reference(&name));
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"Data" => {
                    if in_data {
                        if let Some(sheet) = sheet.as_mut() {
                            sheet.set(row.max(1), col.max(1), parse_cell_value(&text, data_is_number));
                        }
                        in_data = false;
                    }
                }
                b"Worksheet" => {
                    if let Some(done) = sheet.take() {
                        workbook.push_sheet(done);
                    }
                }
                _ => {}
            },
            _ => {}
        }
        buf.clear();
    }

    Ok(workbook)
}

/// Resolve a predefined entity or character reference to its text. Unknown
/// named references are kept in their literal `&name;` form.
fn resolve_reference(name: &str) -> String {
    match name {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        _ => {
            if let Some(digits) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                if let Ok(code) = u32::from_str_radix(digits, 16)
                    && let Some(c) = char::from_u32(code)
                {
                    return c.to_string();
                }
            } else if let Some(digits) = name.strip_prefix('#')
                && let Ok(code) = digits.parse::<u32>()
                && let Some(c) = char::from_u32(code)
            {
                return c.to_string();
            }
            format!("&{name};")
        }
    }
}

fn parse_cell_value(text: &str, is_number: bool) -> CellValue {
    if is_number {
        if let Ok(n) = text.trim().parse::<f64>() {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(text.to_string())
}

/// Look up an attribute by its written name, accepting an unprefixed
/// variant for documents that bind the spreadsheet namespace as default.
fn attr_value(e: &BytesStart, name: &str) -> Result<Option<String>> {
    let bare = name.split(':').next_back().unwrap_or(name);
    for attr in e.attributes() {
        let attr = attr.map_err(WorkbookError::malformed_xml)?;
        let key = attr.key.as_ref();
        if key == name.as_bytes() || key == bare.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(WorkbookError::malformed_xml)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn attr_index(e: &BytesStart, name: &str) -> Result<Option<u32>> {
    match attr_value(e, name)? {
        Some(raw) => {
            let index = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| WorkbookError::malformed_xml(format!("bad index: {raw}")))?;
            Ok(Some(index))
        }
        None => Ok(None),
    }
}
