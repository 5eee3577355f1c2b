use std::fmt;

use crate::lexeme::TokenKind;

/// Error kinds for categorizing parse errors.
///
/// Every kind describes a lexeme line the scanner could not have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A lexeme was read after the end of the line
    UnexpectedEndOfLine,
    /// A lexeme that cannot start a phrase (e.g. an unresolved escape)
    UnexpectedLexeme,
    /// A line marker somewhere other than the start of the line
    MisplacedMarker,
}

/// A structural error in a hand-built lexeme line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// 1-based line the error occurred on, once known
    pub line: Option<usize>,
    /// Error categorization
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            message: message.into(),
            line: None,
            kind,
        }
    }

    /// Create an error for reading past the last lexeme of a line.
    pub fn unexpected_end_of_line() -> Self {
        Self::new(
            "unexpected end of line",
            ParseErrorKind::UnexpectedEndOfLine,
        )
    }

    /// Create an error for a lexeme that cannot appear where it was found.
    pub fn unexpected_lexeme(kind: TokenKind) -> Self {
        Self::new(
            format!("unexpected {} lexeme", kind),
            ParseErrorKind::UnexpectedLexeme,
        )
    }

    /// Create an error for a line marker after the start of a line.
    pub fn misplaced_marker(kind: TokenKind) -> Self {
        Self::new(
            format!("{} marker is only valid at the start of a line", kind),
            ParseErrorKind::MisplacedMarker,
        )
    }

    /// Attach the line number the error occurred on.
    pub fn on_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(line) = self.line {
            write!(f, " on line {}", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
