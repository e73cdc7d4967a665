//! Read tabular rows from Excel format

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

/// First sheet of a workbook as header-keyed string rows.
#[derive(Debug, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

/// Read the first sheet of the workbook at `path`. Rows are keyed by the
/// header row; cells under an empty header are dropped, and rows with no
/// populated cells are skipped.
pub fn read_sheet(path: &str) -> Result<Sheet> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("Failed to open Excel file: {}", path))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Excel file has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let raw_rows: Vec<_> = range.rows().collect();
    if raw_rows.is_empty() {
        return Ok(Sheet::default());
    }

    let headers: Vec<String> = raw_rows[0]
        .iter()
        .map(|cell| cell_string(cell).unwrap_or_default())
        .collect();

    let mut rows = Vec::new();
    for row in raw_rows.iter().skip(1) {
        let mut entry = BTreeMap::new();
        for (col, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = row.get(col).and_then(cell_string) {
                entry.insert(header.clone(), value);
            }
        }
        if !entry.is_empty() {
            rows.push(entry);
        }
    }

    Ok(Sheet { headers, rows })
}

fn cell_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if !s.is_empty() => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
