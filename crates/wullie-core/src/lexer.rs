//! Script scanner: splits a document into lines and scans each one.
//!
//! The scanner is a lazy, single pass iterator. Each call to `next` reads one
//! line and hands it to the line scanner, so lines are always produced in
//! source order and no line is scanned before the previous one.
//!
//! # Line splitting
//!
//! - `\r\n` and `\n` both end a line; a lone `\r` is ordinary text
//! - an empty document is a single empty line
//! - a trailing newline is followed by a final empty line
//!
//! so a document always has one more line than it has newlines.

use std::iter::FusedIterator;

use memchr::memchr;

use crate::lexeme::Lexeme;
use crate::scanner::scan_line;

/// A single line from the input with its line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without line ending).
    pub text: &'a str,
    /// 1-based line number.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// Scan the line into lexemes.
    #[inline]
    pub fn scan(&self) -> Vec<Lexeme<'a>> {
        scan_line(self.text)
    }
}

/// Pull based scanner over every line of a document.
///
/// Not restartable: scanning the same text again needs a new scanner.
pub struct ScriptScanner<'a> {
    /// The complete input text.
    input: &'a str,
    /// Input as bytes for newline scanning.
    bytes: &'a [u8],
    /// Byte offset of the next line.
    offset: usize,
    /// Number of lines produced so far.
    line_number: usize,
    /// Set once the final line has been produced.
    finished: bool,
}

impl<'a> ScriptScanner<'a> {
    /// Create a scanner for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            line_number: 0,
            finished: false,
        }
    }

    /// Check if another line remains.
    #[inline(always)]
    pub fn has_next(&self) -> bool {
        !self.finished
    }

    /// Number of the line most recently produced (0 before the first).
    #[inline(always)]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consume and return the next raw line without scanning it.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.finished {
            return None;
        }

        let start = self.offset;

        let text_end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => {
                let end = start + pos;
                self.offset = end + 1;
                // CRLF ends the line at the CR
                if end > start && self.bytes[end - 1] == b'\r' {
                    end - 1
                } else {
                    end
                }
            }
            None => {
                self.finished = true;
                self.offset = self.bytes.len();
                self.bytes.len()
            }
        };

        self.line_number += 1;

        Some(Line {
            text: &self.input[start..text_end],
            number: self.line_number,
        })
    }

    /// Get the remaining unconsumed input.
    #[inline(always)]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }
}

impl<'a> Iterator for ScriptScanner<'a> {
    type Item = Vec<Lexeme<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.next_line()?;
        let lexemes = line.scan();
        log::trace!("line {}: scanned {} lexemes", line.number, lexemes.len());
        Some(lexemes)
    }
}

impl FusedIterator for ScriptScanner<'_> {}

/// Scan every line of `text` into lexemes.
///
/// Never fails; the result has one entry per line.
///
/// # Example
///
/// ```rust
/// use wullie_core::lexeme::Lexeme;
/// use wullie_core::scan_all;
///
/// let lines = scan_all("\\#daft\r\n");
/// assert_eq!(lines, vec![vec![Lexeme::text("#daft")], vec![]]);
/// ```
pub fn scan_all(text: &str) -> Vec<Vec<Lexeme<'_>>> {
    let lines: Vec<_> = ScriptScanner::new(text).collect();
    log::debug!("scanned {} lines ({} bytes)", lines.len(), text.len());
    lines
}
