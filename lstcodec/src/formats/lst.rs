//! Support for the line-oriented LST format.
//!
//! An LST file stores each entry as two physical lines, the original and then
//! the translation. Each line may start with flag tokens (see
//! [`crate::types::FlagSet`]) and keeps its line breaks as marker tokens.
//!
//! ```text
//! ::VOICE::Good morning!
//! ::VOICE::Guten Morgen!
//! First line::BREAKLINE::Second line
//! Erste Zeile::BREAKLINE::Zweite Zeile
//! ```

use std::{
    fs::File,
    io::{BufReader, BufWriter, Cursor, Read, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    error::Error,
    escape::escape_line_breaks,
    options::WriteOptions,
    types::{Document, Entry, Line},
};

/// File name of the LST written for a document, e.g. `Strings-Menu.lst`.
pub fn lst_file_name(document_name: &str) -> String {
    format!("Strings-{}.lst", document_name)
}

impl Document {
    /// Parses LST text. `name` becomes the document name.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`, and are taken in pairs,
    /// original first. A lone trailing blank line is ignored; any other
    /// dangling line is a format error.
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self, Error> {
        let name = name.into();
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = split_lines(content);

        if lines.len() % 2 == 1 {
            if lines.last().is_some_and(|line| line.is_empty()) {
                lines.pop();
            } else {
                return Err(Error::format_error(
                    &name,
                    format!("line {}", lines.len()),
                    "original line has no matching translation line",
                ));
            }
        }

        let entries = lines
            .chunks_exact(2)
            .enumerate()
            .map(|(index, pair)| {
                let parse_side = |offset: usize| {
                    Line::parse(pair[offset]).map_err(|message| {
                        Error::format_error(&name, format!("line {}", index * 2 + offset + 1), message)
                    })
                };
                Ok(Entry::new(parse_side(0)?, parse_side(1)?))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        debug!("Parsed {} entries from {}", entries.len(), name);
        Ok(Document { name, entries })
    }

    /// Parses LST content from any reader. See [`Document::from_bytes`].
    pub fn from_reader<R: Read>(name: impl Into<String>, mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(Error::Io)?;
        Self::from_bytes(name, &bytes)
    }

    /// Parses LST content held in memory, decoding UTF-16 input when it
    /// carries a byte order mark.
    ///
    /// Malformed input is a format error, never replaced.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, Error> {
        let name = name.into();
        // Sniffs a UTF-8 or UTF-16 BOM, defaulting to UTF-8.
        let (decoded, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            return Err(Error::format_error(
                &name,
                "byte stream",
                "content is not valid UTF-8 or BOM-marked UTF-16",
            ));
        }
        Self::parse(name, &decoded)
    }

    /// Reads an LST file; the file stem becomes the document name.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(name, BufReader::new(file))
    }

    /// Writes the document as LST text.
    pub fn to_writer<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<(), Error> {
        write_lines(
            writer,
            &self.name,
            self.originals().as_slice(),
            self.translations().as_slice(),
            options,
        )
    }

    /// Writes the document to an LST file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<(), Error> {
        let file = File::create(path)?;
        self.to_writer(BufWriter::new(file), options)
    }

    /// Renders the document to an in-memory LST string.
    pub fn to_lst_string(&self, options: &WriteOptions) -> Result<String, Error> {
        let mut buffer = Cursor::new(Vec::new());
        self.to_writer(&mut buffer, options)?;
        String::from_utf8(buffer.into_inner()).map_err(|e| Error::InvalidData(e.to_string()))
    }
}

/// Splits on `\r\n`, `\n` or a lone `\r`. A final terminator does not start
/// another line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        let Some(end) = rest.find(['\r', '\n']) else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..end]);
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }
    lines
}

/// Writes parallel original/translation strings as LST, two lines per entry.
///
/// Each string is written as-is apart from raw line breaks, which become
/// marker tokens so an entry always spans exactly two lines. Fails with
/// [`Error::CountMismatch`] if the sequences differ in length.
pub fn write_lines<W: Write, S: AsRef<str>>(
    mut writer: W,
    name: &str,
    originals: &[S],
    translations: &[S],
    options: &WriteOptions,
) -> Result<(), Error> {
    Error::check_counts(name, originals.len(), translations.len())?;

    if options.write_bom {
        writer.write_all("\u{feff}".as_bytes())?;
    }

    let line_ending = options.line_ending.as_str();
    for (original, translation) in originals.iter().zip(translations) {
        for line in [original.as_ref(), translation.as_ref()] {
            writer.write_all(escape_line_breaks(line).as_bytes())?;
            writer.write_all(line_ending.as_bytes())?;
        }
    }

    writer.flush()?;
    Ok(())
}
