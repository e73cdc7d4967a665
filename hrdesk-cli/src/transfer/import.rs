//! Bulk import: validate a parsed sheet, then create rows one by one
//!
//! There is no transaction: rows written before a failing row stay written.
//! The report carries the created count and every failed row with its
//! reason, so the caller sees exactly what happened.

use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::{Map, Value};

use super::excel::read_sheet;
use crate::api::DocumentStore;
use crate::entity::Entity;

/// Import failures that abort before any write.
#[derive(Debug, PartialEq, Eq)]
pub enum ImportError {
    /// Required columns absent from the header row, by wire name.
    MissingColumns(Vec<String>),
    /// The workbook parsed but held no data rows.
    Empty,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::MissingColumns(columns) => {
                write!(f, "Missing required fields: {}", columns.join(", "))
            }
            ImportError::Empty => write!(f, "No data found in the file"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Outcome of a bulk import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Rows successfully written to the store.
    pub created: usize,
    /// Rows that failed, in sheet order. Earlier successes are not rolled
    /// back.
    pub failed: Vec<RowError>,
}

/// One failed row. `row` is the 1-based sheet row (the header is row 1).
#[derive(Debug)]
pub struct RowError {
    pub row: usize,
    pub reason: String,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Which required columns the header row is missing, by wire name. A header
/// matches a column under either its wire name or its human-readable label,
/// so exported workbooks import back cleanly.
pub fn validate_columns<E: Entity>(headers: &[String]) -> Vec<String> {
    E::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| {
            !headers
                .iter()
                .any(|header| normalize_header::<E>(header) == Some(*required))
        })
        .map(str::to_string)
        .collect()
}

/// Map a sheet header to the wire name it addresses, accepting the wire
/// name itself or the declared column label. Unknown headers map to `None`
/// and their cells are ignored.
fn normalize_header<E: Entity>(header: &str) -> Option<&'static str> {
    E::COLUMNS
        .iter()
        .find(|(wire, label)| *wire == header || *label == header)
        .map(|(wire, _)| *wire)
}

/// Import the first sheet of the workbook at `path`. Validation failures
/// (empty sheet, missing required columns) abort before any write; row
/// failures during the run are collected and the run continues.
pub async fn import_workbook<E: Entity>(
    store: &dyn DocumentStore,
    path: &str,
    run_date: &str,
) -> Result<ImportReport> {
    let sheet = read_sheet(path)?;
    if sheet.rows.is_empty() {
        return Err(ImportError::Empty.into());
    }

    let missing = validate_columns::<E>(&sheet.headers);
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing).into());
    }

    let rows: Vec<BTreeMap<String, String>> = sheet
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .filter_map(|(header, value)| {
                    normalize_header::<E>(header).map(|wire| (wire.to_string(), value.clone()))
                })
                .collect()
        })
        .collect();

    Ok(import_rows::<E>(store, &rows, run_date).await)
}

/// Create one record per row, sequentially, stamping each with the run
/// date. Rows are keyed by wire name.
pub async fn import_rows<E: Entity>(
    store: &dyn DocumentStore,
    rows: &[BTreeMap<String, String>],
    run_date: &str,
) -> ImportReport {
    let mut report = ImportReport::default();

    for (idx, row) in rows.iter().enumerate() {
        let mut fields = Map::new();
        for (wire, value) in row {
            fields.insert(wire.clone(), Value::String(value.clone()));
        }
        let mut entity = E::from_fields(&fields);
        entity.stamp_created(run_date);

        // Row 1 is the header.
        let sheet_row = idx + 2;
        match store.create(E::COLLECTION, entity.to_fields()).await {
            Ok(_) => report.created += 1,
            Err(error) => {
                log::warn!("Import row {} failed: {:#}", sheet_row, error);
                report.failed.push(RowError {
                    row: sheet_row,
                    reason: format!("{:#}", error),
                });
            }
        }
    }

    log::info!(
        "Imported {} {} ({} failed)",
        report.created,
        E::NOUN_PLURAL,
        report.failed.len()
    );
    report
}
