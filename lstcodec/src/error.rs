//! All error types for the lstcodec crate.
//!
//! Every failure aborts the document being converted; nothing is skipped or
//! retried, so each variant carries enough context to locate the bad input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("format error in `{source_name}` at {location}: {message}")]
    Format {
        /// File or sheet name the error was found in.
        source_name: String,
        /// Human-readable position, e.g. `line 7` or `cell B12`.
        location: String,
        message: String,
    },

    #[error("no ORIGINAL/TRANSLATION header found in sheet `{sheet}`")]
    NotFound { sheet: String },

    #[error(
        "count mismatch in `{name}`: {originals} original(s) but {translations} translation(s)"
    )]
    CountMismatch {
        name: String,
        originals: usize,
        translations: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook write error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Creates a format error for the given source and position.
    pub fn format_error(
        source_name: impl Into<String>,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Format {
            source_name: source_name.into(),
            location: location.into(),
            message: message.into(),
        }
    }

    /// Checks that two parallel sequences have the same length.
    pub(crate) fn check_counts(name: &str, originals: usize, translations: usize) -> Result<(), Self> {
        if originals == translations {
            Ok(())
        } else {
            Err(Error::CountMismatch {
                name: name.to_string(),
                originals,
                translations,
            })
        }
    }
}
