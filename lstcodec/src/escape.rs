//! Line-break escaping for payload text.
//!
//! An LST entry side must fit on one physical line, so raw line feeds and
//! carriage returns are stored as marker tokens. Both markers use the
//! `::NAME::` shape of flag tokens; their names are reserved and never
//! parsed as flags.

/// Stands in for `\n`.
pub const BREAKLINE_MARKER: &str = "::BREAKLINE::";
/// Stands in for `\r`.
pub const RETURNLINE_MARKER: &str = "::RETURNLINE::";

/// Marker names that can never be flag names.
pub(crate) const RESERVED_NAMES: [&str; 2] = ["BREAKLINE", "RETURNLINE"];

/// Replaces every `\n` and `\r` with its marker token.
///
/// The result never contains a raw line break.
pub fn escape_line_breaks(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '\n' => out.push_str(BREAKLINE_MARKER),
            '\r' => out.push_str(RETURNLINE_MARKER),
            other => out.push(other),
        }
    }
    out
}

/// Replaces every marker token with the raw byte it stands for.
///
/// Exact inverse of [`escape_line_breaks`] for text that did not already
/// contain a marker.
pub fn unescape_line_breaks(text: &str) -> String {
    if !text.contains("::") {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("::") {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);
        if let Some(after) = tail.strip_prefix(BREAKLINE_MARKER) {
            out.push('\n');
            rest = after;
        } else if let Some(after) = tail.strip_prefix(RETURNLINE_MARKER) {
            out.push('\r');
            rest = after;
        } else {
            out.push(':');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Whether `text` holds a marker token, or the start of one that escaping
/// could complete (`"::BREAKLINE"` followed by a line feed).
///
/// Such text is outside the domain where escaping round-trips exactly.
pub fn contains_marker(text: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|name| text.contains(&format!("::{name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_is_untouched() {
        assert_eq!(escape_line_breaks("Hello, world"), "Hello, world");
        assert_eq!(unescape_line_breaks("Hello, world"), "Hello, world");
    }

    #[test]
    fn test_escape_line_feed_and_carriage_return() {
        assert_eq!(
            escape_line_breaks("one\r\ntwo\nthree"),
            "one::RETURNLINE::::BREAKLINE::two::BREAKLINE::three"
        );
    }

    #[test]
    fn test_unescape_markers() {
        assert_eq!(
            unescape_line_breaks("one::RETURNLINE::::BREAKLINE::two::BREAKLINE::three"),
            "one\r\ntwo\nthree"
        );
    }

    #[test]
    fn test_unescape_keeps_unrelated_colons() {
        assert_eq!(unescape_line_breaks("a::b:::c::"), "a::b:::c::");
        assert_eq!(unescape_line_breaks(":::BREAKLINE::"), ":\n");
        assert_eq!(unescape_line_breaks("::breakline::"), "::breakline::");
    }

    #[test]
    fn test_round_trip_edges() {
        for text in ["", "\n", "\r", "\n\n\r", "::", ":\n:", "x\r\n"] {
            assert_eq!(unescape_line_breaks(&escape_line_breaks(text)), text);
        }
    }

    #[test]
    fn test_contains_marker() {
        assert!(contains_marker("x::BREAKLINE::y"));
        assert!(contains_marker("::RETURNLINE::"));
        assert!(contains_marker("::BREAKLINE\n"));
        assert!(!contains_marker("::BREAK::"));
        assert!(!contains_marker("BREAKLINE::"));
    }
}
