//! Core, format-agnostic types for lstcodec.
//! The LST parser and the table reader decode into these; both writers serialize these.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::escape::RESERVED_NAMES;

lazy_static! {
    // One complete flag token at the start of the remaining text.
    static ref FLAG_TOKEN_REGEX: Regex = Regex::new(r"^::([A-Z][A-Z0-9_]*)::").unwrap();
    // Anything that opens a flag token; it must then complete as one.
    static ref FLAG_START_REGEX: Regex = Regex::new(r"^::[A-Z]").unwrap();
}

/// Ordered flag tokens prefixed to an LST line, e.g. `::VOICE::::NOMASK::`.
///
/// Flag names are carried verbatim and never interpreted, so rendering a
/// parsed prefix reproduces it byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct FlagSet {
    names: Vec<String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a flag set from names, rejecting names that would not parse back.
    pub fn from_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();
        for name in &names {
            if !is_valid_flag_name(name) {
                return Err(format!("`{}` is not a valid flag name", name));
            }
        }
        Ok(FlagSet { names })
    }

    /// Splits a raw line into its flag prefix and the remaining payload.
    ///
    /// Returns an error message if the line opens a flag token that never
    /// closes or contains characters outside `[A-Z0-9_]`.
    pub fn parse_prefix(line: &str) -> Result<(FlagSet, &str), String> {
        let mut names = Vec::new();
        let mut rest = line;
        loop {
            if let Some(caps) = FLAG_TOKEN_REGEX.captures(rest) {
                let name = &caps[1];
                if RESERVED_NAMES.contains(&name) {
                    break;
                }
                names.push(name.to_string());
                rest = &rest[caps[0].len()..];
            } else if FLAG_START_REGEX.is_match(rest) {
                let offset = line.len() - rest.len();
                return Err(format!(
                    "malformed flag token at byte {}: `{}`",
                    offset,
                    rest.chars().take(24).collect::<String>()
                ));
            } else {
                break;
            }
        }
        Ok((FlagSet { names }, rest))
    }

    /// Renders the prefix exactly as it appeared in the source line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl Display for FlagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for name in &self.names {
            write!(f, "::{}::", name)?;
        }
        Ok(())
    }
}

fn is_valid_flag_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !RESERVED_NAMES.contains(&name)
}

/// One side of an entry: its flags and the payload text after them.
///
/// The payload is kept in escaped form, so it never contains a raw line break.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub flags: FlagSet,
    pub text: String,
}

impl Line {
    pub fn new(flags: FlagSet, text: impl Into<String>) -> Self {
        Line {
            flags,
            text: text.into(),
        }
    }

    /// A line without flags.
    pub fn plain(text: impl Into<String>) -> Self {
        Line::new(FlagSet::new(), text)
    }

    /// Parses a raw line into flags and payload.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (flags, text) = FlagSet::parse_prefix(raw)?;
        Ok(Line::new(flags, text))
    }

    /// Flags followed by payload, as written to an LST line or a table cell.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.flags, self.text)
    }
}

/// A single original/translation pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    pub original: Line,
    pub translation: Line,
}

impl Entry {
    pub fn new(original: Line, translation: Line) -> Self {
        Entry {
            original,
            translation,
        }
    }
}

/// A named, ordered list of entries: one LST file or one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// LST file stem, or sheet name.
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Document {
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Document {
            name: name.into(),
            entries,
        }
    }

    /// Builds a document from parallel rendered strings, as found in table
    /// cells or produced by older tooling.
    ///
    /// Fails with [`crate::Error::CountMismatch`] if the lengths differ.
    pub fn from_parallel<S: AsRef<str>>(
        name: impl Into<String>,
        originals: &[S],
        translations: &[S],
    ) -> Result<Self, crate::Error> {
        let name = name.into();
        crate::Error::check_counts(&name, originals.len(), translations.len())?;
        let mut entries = Vec::with_capacity(originals.len());
        for (index, (original, translation)) in originals.iter().zip(translations).enumerate() {
            let parse = |raw: &str| {
                Line::parse(raw)
                    .map_err(|msg| crate::Error::format_error(&name, format!("entry {}", index + 1), msg))
            };
            entries.push(Entry::new(
                parse(original.as_ref())?,
                parse(translation.as_ref())?,
            ));
        }
        Ok(Document { name, entries })
    }

    /// Rendered original strings, in entry order.
    pub fn originals(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.original.render()).collect()
    }

    /// Rendered translation strings, in entry order.
    pub fn translations(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.translation.render()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix_without_flags() {
        let (flags, rest) = FlagSet::parse_prefix("Hello").unwrap();
        assert!(flags.is_empty());
        assert_eq!(rest, "Hello");
    }

    #[test]
    fn test_parse_prefix_with_flags() {
        let (flags, rest) = FlagSet::parse_prefix("::VOICE::::NO_MASK2::Hi ::THERE::").unwrap();
        assert_eq!(flags.names().collect::<Vec<_>>(), vec!["VOICE", "NO_MASK2"]);
        assert!(flags.contains("VOICE"));
        assert_eq!(rest, "Hi ::THERE::");
    }

    #[test]
    fn test_render_is_inverse_of_parse() {
        for raw in [
            "",
            "plain",
            "::A::",
            "::A::::B_1::text",
            "::BREAKLINE::starts with a break",
            "::A::::RETURNLINE::x",
            "::) smile",
            "::lower:: case",
        ] {
            let line = Line::parse(raw).unwrap();
            assert_eq!(line.render(), raw, "round trip of {:?}", raw);
        }
    }

    #[test]
    fn test_reserved_marker_is_payload() {
        let line = Line::parse("::BREAKLINE::Second").unwrap();
        assert!(line.flags.is_empty());
        assert_eq!(line.text, "::BREAKLINE::Second");
    }

    #[test]
    fn test_malformed_prefix() {
        assert!(FlagSet::parse_prefix("::ABC").is_err());
        assert!(FlagSet::parse_prefix("::AB-C::text").is_err());
        assert!(FlagSet::parse_prefix("::OK::::Bad").is_err());
    }

    #[test]
    fn test_from_names_rejects_invalid() {
        assert!(FlagSet::from_names(["VOICE"]).is_ok());
        assert!(FlagSet::from_names(["voice"]).is_err());
        assert!(FlagSet::from_names(["BREAKLINE"]).is_err());
        assert!(FlagSet::from_names([""]).is_err());
    }

    #[test]
    fn test_document_from_parallel() {
        let doc = Document::from_parallel("Menu", &["::X::Start", "Quit"], &["Begin", "Leave"])
            .unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc.entries[0].original.flags.contains("X"));
        assert_eq!(doc.originals(), vec!["::X::Start", "Quit"]);
        assert_eq!(doc.translations(), vec!["Begin", "Leave"]);
    }

    #[test]
    fn test_document_from_parallel_count_mismatch() {
        let err = Document::from_parallel("Menu", &["a", "b"], &["c"]).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::CountMismatch {
                originals: 2,
                translations: 1,
                ..
            }
        ));
    }
}
