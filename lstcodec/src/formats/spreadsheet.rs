//! Support for spreadsheet workbooks.
//!
//! Reading goes through `calamine`, which handles `.xlsx`, `.xlsm`, `.xlsb`,
//! `.xls` and `.ods`. Writing always produces `.xlsx` through
//! `rust_xlsxwriter`.
//!
//! Excel drops empty strings, so empty text cells are written as formatted
//! blank cells. They carry no value but stay inside the worksheet dimension,
//! which the reader uses to restore the full row count.

use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use tracing::debug;

use crate::{
    error::Error,
    table::{Cell, Sheet, Workbook},
};

fn cell_from_data(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Other(other.to_string()),
    }
}

/// Copies a worksheet range into a sheet, keeping absolute cell positions.
fn sheet_from_range(name: String, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let (row_start, col_start) = range.start().unwrap_or((0, 0));
    for (row, col, value) in range.used_cells() {
        sheet.set_cell(
            row_start as usize + row,
            col_start as usize + col,
            cell_from_data(value),
        );
    }
    sheet
}

impl Workbook {
    /// Reads every worksheet of a spreadsheet file, in workbook order.
    pub fn read_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut source = open_workbook_auto(path.as_ref())?;
        let mut workbook = Workbook::new();
        for name in source.sheet_names() {
            let range = source.worksheet_range(&name)?;
            debug!("Loaded sheet {} ({:?} cells)", name, range.get_size());
            let mut sheet = sheet_from_range(name, &range);
            if let (Sheets::Xlsx(xlsx), false) = (&mut source, range.is_empty()) {
                // Blank cells are missing from the range; the dimension keeps them.
                let dimensions = xlsx
                    .worksheet_cells_reader(&sheet.name)
                    .map_err(calamine::Error::Xlsx)?
                    .dimensions();
                sheet.extend_rows(dimensions.end.0 as usize + 1);
            }
            workbook.push_sheet(sheet)?;
        }
        Ok(workbook)
    }

    /// Writes all sheets to an `.xlsx` file.
    pub fn write_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut out = XlsxWorkbook::new();
        let blank = Format::new().set_num_format("@");

        for sheet in self.sheets() {
            let worksheet = out.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (row, col, cell) in sheet.used_cells() {
                let row = u32::try_from(row).map_err(|_| too_large(&sheet.name, "row", row))?;
                let col = u16::try_from(col).map_err(|_| too_large(&sheet.name, "column", col))?;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(text) if text.is_empty() => {
                        worksheet.write_blank(row, col, &blank)?;
                    }
                    Cell::Text(text) | Cell::Other(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row, col, *n)?;
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                }
            }

            // Keep trailing rows that hold no cell at all.
            let last_row = sheet.row_count().checked_sub(1);
            if let Some(last_row) = last_row.filter(|&row| !sheet.has_cells(row)) {
                let row = u32::try_from(last_row)
                    .map_err(|_| too_large(&sheet.name, "row", last_row))?;
                worksheet.write_blank(row, 0, &blank)?;
            }
        }

        out.save(path.as_ref())?;
        Ok(())
    }
}

fn too_large(sheet: &str, what: &str, index: usize) -> Error {
    Error::InvalidData(format!(
        "{} index {} in sheet `{}` exceeds the spreadsheet limits",
        what, index, sheet
    ))
}
