//! Target-list parsing.
//!
//! A cell expression names one or more write targets: `;`- or
//! newline-separated segments, each `sheet!cell` or a bare cell resolved
//! against a default sheet. Segments that resolve to nothing are dropped;
//! the caller notes an empty result.

/// A resolved (sheet name, cell-or-range expression) pair.
pub type Target = (String, String);

/// Split a cell expression into sheet-qualified targets.
pub fn parse_targets(cell_spec: &str, default_sheet: Option<&str>) -> Vec<Target> {
    let default_sheet = default_sheet.map(str::trim).filter(|s| !s.is_empty());
    cell_spec
        .replace('\n', ";")
        .split(';')
        .filter_map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return None;
            }
            match segment.split_once('!') {
                Some((sheet, cell)) => {
                    let sheet = sheet.trim();
                    let cell = cell.trim();
                    if sheet.is_empty() || cell.is_empty() {
                        return None;
                    }
                    Some((sheet.to_string(), cell.to_string()))
                }
                None => default_sheet.map(|sheet| (sheet.to_string(), segment.to_string())),
            }
        })
        .collect()
}
