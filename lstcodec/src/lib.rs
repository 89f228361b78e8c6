#![forbid(unsafe_code)]
//! Lossless conversion between LST localization files and spreadsheet
//! translation tables.
//!
//! An LST file holds one entry per pair of lines: the original text, then its
//! translation. Each line may start with flag tokens such as `::VOICE::`, and
//! line breaks inside a text are stored as `::BREAKLINE::` / `::RETURNLINE::`
//! markers. In a workbook, every LST file becomes one sheet holding an
//! `ORIGINAL` / `TRANSLATION` table.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lstcodec::{WriteOptions, lst_to_workbook, workbook_to_lst};
//!
//! // Collect LST files into one workbook, one sheet per file
//! lst_to_workbook(&["Menu.lst", "Dialog.lst"], "Strings.xlsx", &WriteOptions::default())?;
//!
//! // And split a translated workbook back into `Strings-<Sheet>.lst` files
//! let written = workbook_to_lst("Strings.xlsx", "out", &WriteOptions::default())?;
//! # Ok::<(), lstcodec::Error>(())
//! ```
//!
//! # Working with documents directly
//!
//! ```rust
//! use lstcodec::{Document, Sheet, WriteOptions, read_sheet};
//!
//! let doc = Document::parse("Menu", "::TITLE::Start\n::TITLE::Beginnen\n")?;
//! let sheet = Sheet::from_document(&doc, &WriteOptions::default());
//! assert_eq!(read_sheet(&sheet)?, doc);
//! # Ok::<(), lstcodec::Error>(())
//! ```

pub mod converter;
pub mod error;
pub mod escape;
pub mod formats;
pub mod options;
pub mod table;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{convert_auto, lst_to_workbook, workbook_to_lst, write_lst_files, write_workbook},
    error::Error,
    escape::{escape_line_breaks, unescape_line_breaks},
    formats::{FormatType, infer_format_from_extension},
    options::{LineEnding, WriteOptions},
    table::{
        Cell, Sheet, TableLocation, Workbook, append_table, locate, read_sheet, read_table,
        write_table,
    },
    types::{Document, Entry, FlagSet, Line},
};
