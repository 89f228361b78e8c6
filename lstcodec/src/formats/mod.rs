//! All supported file formats for lstcodec.
//!
//! This module provides the [`FormatType`] enum for generic format handling
//! and the format-specific readers and writers.

pub mod csv;
pub mod lst;
pub mod spreadsheet;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use lst::{lst_file_name, write_lines};

use crate::{Error, table::Workbook};

/// Represents all supported file formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Line-oriented LST localization file.
    Lst,
    /// Spreadsheet workbook; read from any format `calamine` knows, written as `.xlsx`.
    Spreadsheet,
    /// Single-sheet CSV table.
    Csv,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use lstcodec::formats::FormatType;
/// assert_eq!(FormatType::Lst.to_string(), "lst");
/// assert_eq!(FormatType::Spreadsheet.to_string(), "xlsx");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Accepts `"lst"`, `"xlsx"`/`"xlsm"`/`"xlsb"`/`"xls"`/`"ods"` and `"csv"`,
/// case-insensitively.
///
/// # Example
/// ```rust
/// use lstcodec::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("LST").unwrap(), FormatType::Lst);
/// assert_eq!(FormatType::from_str("ods").unwrap(), FormatType::Spreadsheet);
/// assert!(FormatType::from_str("strings").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "lst" => Ok(FormatType::Lst),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(FormatType::Spreadsheet),
            "csv" => Ok(FormatType::Csv),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the file extension used when writing this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Lst => "lst",
            FormatType::Spreadsheet => "xlsx",
            FormatType::Csv => "csv",
        }
    }

    /// Whether this format holds translation tables rather than LST lines.
    pub fn is_table(&self) -> bool {
        matches!(self, FormatType::Spreadsheet | FormatType::Csv)
    }
}

/// Infers the format of a file from its extension.
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

impl Workbook {
    /// Reads a workbook, choosing the reader from the file extension.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        match infer_format_from_extension(path) {
            Some(FormatType::Spreadsheet) => Workbook::read_spreadsheet(path),
            Some(FormatType::Csv) => Workbook::read_csv(path),
            _ => Err(Error::UnsupportedFormat(format!(
                "`{}` is not a spreadsheet or CSV file",
                path.display()
            ))),
        }
    }

    /// Writes a workbook, choosing the writer from the file extension.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => self.write_xlsx(path),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => self.write_csv(path),
            _ => Err(Error::UnsupportedFormat(format!(
                "cannot write a workbook to `{}`; use .xlsx or .csv",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_format_from_extension() {
        assert_eq!(
            infer_format_from_extension("Strings.LST"),
            Some(FormatType::Lst)
        );
        assert_eq!(
            infer_format_from_extension("book.xlsx"),
            Some(FormatType::Spreadsheet)
        );
        assert_eq!(
            infer_format_from_extension("dir/table.csv"),
            Some(FormatType::Csv)
        );
        assert_eq!(infer_format_from_extension("noext"), None);
        assert_eq!(infer_format_from_extension("a.txt"), None);
    }

    #[test]
    fn test_is_table() {
        assert!(!FormatType::Lst.is_table());
        assert!(FormatType::Spreadsheet.is_table());
        assert!(FormatType::Csv.is_table());
    }

    #[test]
    fn test_write_to_rejects_read_only_extension() {
        let err = Workbook::new().write_to("out.ods").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
