//! Spreadsheet workbook output.

use galvani_types::PriceRecord;
use rust_xlsxwriter::Workbook;

use crate::{FormatError, columns};

/// Name of the single sheet holding the dataset.
pub const SHEET_NAME: &str = "PUN";

/// Writes the dataset into a real XLSX container and returns its bytes.
///
/// One sheet, the same header and rows as the delimited output: dates as
/// text, hours and prices as numbers, missing prices as empty cells.
///
/// # Errors
///
/// Returns an error if workbook construction fails.
pub fn encode_workbook(records: &[PriceRecord]) -> Result<Vec<u8>, FormatError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let columns = columns(records);
    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_string(row, 0, record.date.format("%Y-%m-%d").to_string())?;
        worksheet.write_number(row, 1, f64::from(record.hour))?;
        if let Some(pun) = record.pun {
            worksheet.write_number(row, 2, pun)?;
        }
        for (offset, zone) in columns[3..].iter().enumerate() {
            if let Some(value) = record.zone(zone) {
                worksheet.write_number(row, (offset + 3) as u16, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
