//! Spreadsheet export of the filtered rows.

use crate::errors::Result;
use crate::input::{Dataset, Record};
use log::info;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Write the filtered rows to an .xlsx file: one sheet, the source
/// columns in source order, bold header row first.
pub fn write_xlsx(path: &Path, dataset: &Dataset, view: &[&Record]) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    for (col, header) in dataset.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &bold)?;
    }
    for (row, record) in view.iter().enumerate() {
        for (col, header) in dataset.headers.iter().enumerate() {
            let value = record.field(header).unwrap_or_default();
            sheet.write_string((row + 1) as u32, col as u16, &value)?;
        }
    }
    workbook.save(path)?;
    info!(target: "laureates", "wrote {} rows: {}", view.len(), path.display());
    Ok(())
}
