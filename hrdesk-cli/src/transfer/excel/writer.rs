//! Write a collection to Excel format

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::entity::{Entity, field_str};

/// Write records to a workbook at `path`: one sheet named after the entity,
/// a header row from the entity's column layout, one row per record.
pub fn write_sheet<'a, E, I>(records: I, path: &str) -> Result<()>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(E::SHEET_NAME)?;

    for (col, (_, header)) in E::COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (row_idx, record) in records.into_iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let fields = record.to_fields();
        for (col_idx, (field, _)) in E::COLUMNS.iter().enumerate() {
            let value = field_str(&fields, field);
            if !value.is_empty() {
                worksheet.write_string(row, col_idx as u16, &value)?;
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path))?;

    Ok(())
}
