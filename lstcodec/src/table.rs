//! In-memory translation tables.
//!
//! A [`Sheet`] is a grid of [`Cell`]s addressed by 0-based `(row, col)`. A
//! translation table inside a sheet starts at a header row holding
//! `ORIGINAL` and `TRANSLATION` in adjacent cells; every row below it, down
//! to the last row of the sheet, is one entry. The table may sit anywhere in
//! the sheet, so readers first [`locate`] the header.

use std::fmt::Display;

use tracing::debug;

use crate::{
    error::Error,
    escape::{escape_line_breaks, unescape_line_breaks},
    options::WriteOptions,
    types::{Document, Entry, Line},
};

/// Header above the original column.
pub const ORIGINAL_HEADER: &str = "ORIGINAL";
/// Header above the translation column.
pub const TRANSLATION_HEADER: &str = "TRANSLATION";

/// Header pairs [`locate`] accepts. Older workbooks carry the title-case pair.
const HEADER_PAIRS: [(&str, &str); 2] = [
    (ORIGINAL_HEADER, TRANSLATION_HEADER),
    ("Original", "Translation"),
];

/// The value of a single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Dates, durations, error values and anything else without a text form
    /// of its own, kept in its display form.
    Other(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// The string value, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Empty => "empty",
            Cell::Text(_) => "text",
            Cell::Number(_) => "number",
            Cell::Bool(_) => "boolean",
            Cell::Other(_) => "non-text value",
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) | Cell::Other(text) => f.write_str(text),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(true) => f.write_str("TRUE"),
            Cell::Bool(false) => f.write_str("FALSE"),
        }
    }
}

/// A named grid of cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    /// Builds a sheet holding `document` as a table at the top-left corner.
    pub fn from_document(document: &Document, options: &WriteOptions) -> Self {
        let mut sheet = Sheet::new(document.name.clone());
        let rows = document
            .entries
            .iter()
            .map(|entry| (entry.original.render(), entry.translation.render()));
        write_rows(&mut sheet, TableLocation::default(), rows, options);
        sheet
    }

    /// Number of rows in the sheet, including recorded rows without values.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Grows the sheet to at least `count` rows.
    ///
    /// Readers use this to keep rows that exist in the source file but hold
    /// no value, such as formatted blank cells.
    pub fn extend_rows(&mut self, count: usize) {
        if self.rows.len() < count {
            self.rows.resize_with(count, Vec::new);
        }
    }

    /// All rows, top to bottom. Rows may have different lengths.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    /// Sets a cell, growing the grid as needed.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.extend_rows(row + 1);
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        cells[col] = cell;
    }

    /// Whether `row` holds at least one non-empty cell.
    pub fn has_cells(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().any(|cell| !cell.is_empty()))
    }

    /// All non-empty cells in row-major order.
    pub fn used_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(col, cell)| (row, col, cell))
        })
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// An ordered set of uniquely named sheets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Finds a sheet by name, ignoring ASCII case as spreadsheet apps do.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name.eq_ignore_ascii_case(name))
    }

    /// Appends a sheet, rejecting a name that is already taken.
    pub fn push_sheet(&mut self, sheet: Sheet) -> Result<(), Error> {
        if self.sheet(&sheet.name).is_some() {
            return Err(Error::InvalidData(format!(
                "duplicate sheet name `{}`",
                sheet.name
            )));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    /// Returns the sheet with this name, appending an empty one if missing.
    pub fn sheet_mut_or_insert(&mut self, name: &str) -> &mut Sheet {
        let index = match self
            .sheets
            .iter()
            .position(|sheet| sheet.name.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                self.sheets.push(Sheet::new(name));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[index]
    }

    /// Appends a sheet holding `document` as a table.
    pub fn push_document(&mut self, document: &Document, options: &WriteOptions) -> Result<(), Error> {
        self.push_sheet(Sheet::from_document(document, options))
    }

    /// Reads the translation table of every sheet, in sheet order.
    ///
    /// Fails on the first sheet without a table or with a bad cell.
    pub fn documents(&self) -> Result<Vec<Document>, Error> {
        self.sheets.iter().map(read_sheet).collect()
    }
}

/// Position of the `ORIGINAL` header cell; `TRANSLATION` is one column right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TableLocation {
    pub row_offset: usize,
    pub col_offset: usize,
}

impl TableLocation {
    pub fn new(row_offset: usize, col_offset: usize) -> Self {
        TableLocation {
            row_offset,
            col_offset,
        }
    }
}

fn is_header_pair(original: Option<&Cell>, translation: Option<&Cell>) -> bool {
    match (
        original.and_then(Cell::as_text),
        translation.and_then(Cell::as_text),
    ) {
        (Some(original), Some(translation)) => HEADER_PAIRS
            .iter()
            .any(|&pair| pair == (original, translation)),
        _ => false,
    }
}

/// Finds the translation table header in `sheet`.
///
/// Scans top to bottom, then left to right, and returns the first match.
pub fn locate(sheet: &Sheet) -> Option<TableLocation> {
    if is_header_pair(sheet.cell(0, 0), sheet.cell(0, 1)) {
        return Some(TableLocation::default());
    }

    sheet.rows().enumerate().find_map(|(row_offset, cells)| {
        (0..cells.len().saturating_sub(1))
            .find(|&col| is_header_pair(cells.get(col), cells.get(col + 1)))
            .map(|col_offset| TableLocation::new(row_offset, col_offset))
    })
}

/// A1-style reference for a 0-based position, e.g. `(11, 1)` is `B12`.
pub fn cell_ref(row: usize, col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}

fn read_line(sheet: &Sheet, row: usize, col: usize) -> Result<Line, Error> {
    let location = || format!("cell {}", cell_ref(row, col));
    let text = match sheet.cell(row, col) {
        None | Some(Cell::Empty) => "",
        Some(Cell::Text(text)) => text.as_str(),
        Some(other) => {
            return Err(Error::format_error(
                &sheet.name,
                location(),
                format!("expected a text cell, found {}", other.type_name()),
            ));
        }
    };
    Line::parse(&escape_line_breaks(text))
        .map_err(|message| Error::format_error(&sheet.name, location(), message))
}

/// Rejects a row whose two table cells are blank while another cell holds a
/// value.
fn check_stray_row(sheet: &Sheet, row: usize, col: usize) -> Result<(), Error> {
    let is_blank = |c: usize| sheet.cell(row, c).is_none_or(Cell::is_empty);
    if !is_blank(col) || !is_blank(col + 1) {
        return Ok(());
    }
    let stray = sheet
        .rows
        .get(row)
        .and_then(|cells| cells.iter().position(|cell| !cell.is_empty()));
    match stray {
        Some(stray_col) => Err(Error::format_error(
            &sheet.name,
            format!("cell {}", cell_ref(row, stray_col)),
            "value below the table in a row without an entry",
        )),
        None => Ok(()),
    }
}

/// Reads every row below the header at `location` into a document named
/// after the sheet.
///
/// Blank cells read as empty strings, so rows without any value are entries
/// with two empty sides. A row with blank table cells but a value elsewhere
/// is a format error. Raw line breaks inside cells are replaced by marker
/// tokens.
pub fn read_table(sheet: &Sheet, location: TableLocation) -> Result<Document, Error> {
    let first_row = location.row_offset + 1;
    let entries = (first_row..sheet.row_count())
        .map(|row| {
            check_stray_row(sheet, row, location.col_offset)?;
            Ok(Entry::new(
                read_line(sheet, row, location.col_offset)?,
                read_line(sheet, row, location.col_offset + 1)?,
            ))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    debug!(
        "Read {} entries from sheet {} (table at {})",
        entries.len(),
        sheet.name,
        cell_ref(location.row_offset, location.col_offset)
    );
    Ok(Document::new(sheet.name.clone(), entries))
}

/// Locates and reads the translation table of `sheet`.
pub fn read_sheet(sheet: &Sheet) -> Result<Document, Error> {
    let location = locate(sheet).ok_or_else(|| Error::NotFound {
        sheet: sheet.name.clone(),
    })?;
    read_table(sheet, location)
}

fn write_cell_value(text: &str, options: &WriteOptions) -> Cell {
    if options.expand_line_breaks {
        Cell::Text(unescape_line_breaks(text))
    } else {
        Cell::text(text)
    }
}

fn write_rows<O, T>(
    sheet: &mut Sheet,
    location: TableLocation,
    rows: impl Iterator<Item = (O, T)>,
    options: &WriteOptions,
) where
    O: AsRef<str>,
    T: AsRef<str>,
{
    let TableLocation {
        row_offset,
        col_offset,
    } = location;
    sheet.set_cell(row_offset, col_offset, Cell::text(ORIGINAL_HEADER));
    sheet.set_cell(row_offset, col_offset + 1, Cell::text(TRANSLATION_HEADER));
    for (index, (original, translation)) in rows.enumerate() {
        let row = row_offset + 1 + index;
        sheet.set_cell(row, col_offset, write_cell_value(original.as_ref(), options));
        sheet.set_cell(
            row,
            col_offset + 1,
            write_cell_value(translation.as_ref(), options),
        );
    }
}

/// Writes a header row at `location` and one row per entry below it.
///
/// Fails with [`Error::CountMismatch`] if the sequences differ in length.
pub fn write_table<S: AsRef<str>>(
    sheet: &mut Sheet,
    location: TableLocation,
    originals: &[S],
    translations: &[S],
    options: &WriteOptions,
) -> Result<(), Error> {
    Error::check_counts(&sheet.name, originals.len(), translations.len())?;
    write_rows(sheet, location, originals.iter().zip(translations), options);
    Ok(())
}

/// Writes a table named `name` into `workbook`, replacing the contents of an
/// existing sheet with that name.
pub fn append_table<S: AsRef<str>>(
    workbook: &mut Workbook,
    name: &str,
    originals: &[S],
    translations: &[S],
    options: &WriteOptions,
) -> Result<(), Error> {
    Error::check_counts(name, originals.len(), translations.len())?;
    let sheet = workbook.sheet_mut_or_insert(name);
    sheet.clear();
    write_table(
        sheet,
        TableLocation::default(),
        originals,
        translations,
        options,
    )
}
