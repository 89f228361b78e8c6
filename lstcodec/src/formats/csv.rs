//! Support for CSV translation tables.
//!
//! A CSV file is a workbook with exactly one sheet, named after the file stem.
//! Every field is read as text.
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::{
    error::Error,
    table::{Cell, Sheet, Workbook},
};

impl Sheet {
    /// Parse a headerless CSV table from any reader.
    pub fn from_csv_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self, Error> {
        let mut rdr = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut sheet = Sheet::new(name);
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            sheet.extend_rows(row + 1);
            for (col, field) in record.iter().enumerate() {
                if !field.is_empty() {
                    sheet.set_cell(row, col, Cell::text(field));
                }
            }
        }
        Ok(sheet)
    }

    /// Write the sheet as CSV (file, memory, etc.).
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = ::csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);
        for row in self.rows() {
            if row.is_empty() {
                // A lone empty field keeps the blank row in place.
                wtr.write_record([""])?;
            } else {
                wtr.write_record(row.iter().map(Cell::to_string))?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Workbook {
    /// Reads a CSV file as a single-sheet workbook.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let file = File::open(path)?;
        let mut workbook = Workbook::new();
        workbook.push_sheet(Sheet::from_csv_reader(name, BufReader::new(file))?)?;
        Ok(workbook)
    }

    /// Writes a single-sheet workbook as CSV.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let [sheet] = self.sheets() else {
            return Err(Error::UnsupportedFormat(format!(
                "CSV holds exactly one sheet, but the workbook has {}",
                self.sheets().len()
            )));
        };
        let file = File::create(path)?;
        sheet.to_csv_writer(BufWriter::new(file))
    }
}
