//! Spreadsheet bulk transfer
//!
//! Import reads the first sheet of a workbook into header-keyed rows,
//! validates required columns, and writes rows one by one through the store
//! seam. Export projects the loaded collection into a fixed column layout.

pub mod excel;
pub mod import;

pub use excel::{read_sheet, write_sheet};
pub use import::{ImportError, ImportReport, RowError, import_workbook, validate_columns};
