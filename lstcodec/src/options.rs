//! Options controlling how LST files and translation tables are written.

/// Line terminator used when writing LST files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Write behavior options for the LST writer and the table writer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Terminator after every LST line.
    pub line_ending: LineEnding,
    /// Emit a UTF-8 byte order mark at the start of LST files.
    pub write_bom: bool,
    /// Turn line-break markers into real line breaks inside table cells.
    pub expand_line_breaks: bool,
}

impl WriteOptions {
    /// Creates default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the LST line terminator.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Enables/disables the UTF-8 byte order mark.
    pub fn with_bom(mut self, write_bom: bool) -> Self {
        self.write_bom = write_bom;
        self
    }

    /// Enables/disables expanding markers into line breaks in table cells.
    pub fn with_expanded_line_breaks(mut self, expand_line_breaks: bool) -> Self {
        self.expand_line_breaks = expand_line_breaks;
        self
    }
}
