//! Line scanner: turns one line of raw text into lexemes.
//!
//! Scanning is greedy and left to right. Line markers (headings, points,
//! quotes) are only recognised at the start of the line, after leading
//! whitespace. Everything after a bullet or numbered marker, or the whole of
//! a markerless line, is scanned for inline control symbols.
//!
//! The raw lexemes then go through two passes:
//!
//! 1. escape resolution, which turns the lexeme after a `\` into plain text
//! 2. merging, which joins neighbouring text lexemes into one
//!
//! so the parser never sees an escape or two text lexemes in a row.

use memchr::{memchr2, memchr3};

use crate::lexeme::{Lexeme, TokenKind};

/// Inline control symbols in match order. Two byte symbols come before the
/// one byte symbols they start with.
const INLINE_SYMBOLS: [(&str, TokenKind); 6] = [
    ("\\", TokenKind::Escape),
    ("**", TokenKind::KeyPhrase),
    ("+", TokenKind::Positive),
    ("-", TokenKind::Negative),
    ("*", TokenKind::Strong),
    ("`", TokenKind::Snippet),
];

/// Heading markers, longest first.
const HEADING_MARKERS: [(&str, TokenKind); 3] = [
    ("###", TokenKind::H3),
    ("##", TokenKind::H2),
    ("#", TokenKind::H1),
];

/// Scan a single line of text into lexemes.
///
/// The line must not contain a newline. Scanning never fails: anything that
/// is not a recognised symbol is plain text.
///
/// # Example
///
/// ```rust
/// use wullie_core::lexeme::{Lexeme, TokenKind};
/// use wullie_core::scanner::scan_line;
///
/// let lexemes = scan_line("# Topic");
/// assert_eq!(
///     lexemes,
///     vec![Lexeme::new(TokenKind::H1, "#"), Lexeme::text(" Topic")]
/// );
/// ```
pub fn scan_line(line: &str) -> Vec<Lexeme<'_>> {
    LineScanner::new(line).scan()
}

struct LineScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> LineScanner<'a> {
    #[inline]
    fn new(line: &'a str) -> Self {
        let text = line.trim_start();
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn scan(mut self) -> Vec<Lexeme<'a>> {
        let mut lexemes = Vec::with_capacity(8);

        if self.is_eol() {
            return lexemes;
        }

        if let Some(marker) = self.scan_line_marker() {
            let kind = marker.kind;
            lexemes.push(marker);

            // Headings and quotes take the rest of the line verbatim.
            if matches!(
                kind,
                TokenKind::H1 | TokenKind::H2 | TokenKind::H3 | TokenKind::Quote
            ) {
                if !self.is_eol() {
                    let rest = self.bytes.len() - self.pos;
                    lexemes.push(self.take(TokenKind::Text, rest));
                }
                return lexemes;
            }
        }

        while !self.is_eol() {
            let lexeme = self.scan_inline();
            lexemes.push(lexeme);
        }

        merge_text(resolve_escapes(lexemes))
    }

    #[inline(always)]
    fn is_eol(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline(always)]
    fn starts_with(&self, symbol: &str) -> bool {
        self.bytes[self.pos..].starts_with(symbol.as_bytes())
    }

    /// Slice `len` bytes off the front of the remaining text.
    ///
    /// Panics if fewer than `len` bytes remain.
    #[inline]
    fn take(&mut self, kind: TokenKind, len: usize) -> Lexeme<'a> {
        let end = self.pos + len;
        let literal = &self.text[self.pos..end];
        self.pos = end;
        Lexeme::new(kind, literal)
    }

    fn scan_line_marker(&mut self) -> Option<Lexeme<'a>> {
        for (symbol, kind) in HEADING_MARKERS {
            if self.starts_with(symbol) {
                return Some(self.take(kind, symbol.len()));
            }
        }

        if self.starts_with(".") {
            return Some(self.take(TokenKind::BulletPoint, 1));
        }

        let digits = self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 0 && self.bytes.get(self.pos + digits) == Some(&b'.') {
            return Some(self.take(TokenKind::NumberedPoint, digits + 1));
        }

        if self.starts_with(">") {
            return Some(self.take(TokenKind::Quote, 1));
        }

        None
    }

    fn scan_inline(&mut self) -> Lexeme<'a> {
        for (symbol, kind) in INLINE_SYMBOLS {
            if self.starts_with(symbol) {
                return self.take(kind, symbol.len());
            }
        }

        let end = self.find_next_symbol();
        self.take(TokenKind::Text, end - self.pos)
    }

    /// Byte offset of the next inline control symbol, or the end of line.
    #[inline(always)]
    fn find_next_symbol(&self) -> usize {
        let remaining = &self.bytes[self.pos..];

        let common = memchr3(b'*', b'-', b'+', remaining);
        let rare = memchr2(b'\\', b'`', remaining);

        match (common, rare) {
            (Some(a), Some(b)) => self.pos + a.min(b),
            (Some(a), None) => self.pos + a,
            (None, Some(b)) => self.pos + b,
            (None, None) => self.bytes.len(),
        }
    }
}

/// Turn the lexeme following each escape into plain text.
///
/// `ESCAPE ANY` becomes `TEXT(ANY)`, so `\\` yields a literal backslash.
/// An escape at the end of the line is dropped.
fn resolve_escapes(lexemes: Vec<Lexeme<'_>>) -> Vec<Lexeme<'_>> {
    let mut out = Vec::with_capacity(lexemes.len());
    let mut iter = lexemes.into_iter();

    while let Some(lexeme) = iter.next() {
        if lexeme.kind != TokenKind::Escape {
            out.push(lexeme);
            continue;
        }

        if let Some(escaped) = iter.next() {
            out.push(Lexeme::text(escaped.literal));
        }
    }

    out
}

/// Join runs of text lexemes into a single lexeme.
fn merge_text(lexemes: Vec<Lexeme<'_>>) -> Vec<Lexeme<'_>> {
    let mut out: Vec<Lexeme<'_>> = Vec::with_capacity(lexemes.len());

    for lexeme in lexemes {
        match out.last_mut() {
            Some(last) if last.is_text() && lexeme.is_text() => {
                last.literal.to_mut().push_str(&lexeme.literal);
            }
            _ => out.push(lexeme),
        }
    }

    out
}
