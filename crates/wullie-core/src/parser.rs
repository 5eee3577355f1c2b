//! Recursive descent parser from lexeme lines to notes.
//!
//! Each lexeme line becomes exactly one line node:
//!
//! ```text
//! LINE   := ε                                 -> EmptyLine
//! LINE   := (H1 | H2 | H3) PHRASE*            -> H1 | H2 | H3
//! LINE   := QUOTE PHRASE*                     -> Quote
//! LINE   := BULLET_POINT PHRASE*              -> BulletPoint
//! LINE   := NUMBERED_POINT PHRASE*            -> NumberedPoint
//! LINE   := PHRASE*                           -> TextLine
//!
//! PHRASE := KEY_PHRASE PHRASE* [KEY_PHRASE]   -> KeyPhrase
//! PHRASE := POSITIVE   PHRASE* [POSITIVE]     -> Positive
//! PHRASE := NEGATIVE   PHRASE* [NEGATIVE]     -> Negative
//! PHRASE := STRONG     PHRASE* [STRONG]       -> Strong
//! PHRASE := SNIPPET    ANY*    [SNIPPET]      -> Snippet
//! PHRASE := TEXT                              -> Phrase
//! ```
//!
//! Closing markers are optional: the end of the line closes every open
//! decoration. The parser looks at one lexeme at a time and never backtracks.
//!
//! Lines produced by the scanner always parse. Hand-built lines that break
//! the scanner's guarantees (an unresolved escape, a line marker mid-line)
//! are rejected by the `try_` functions and panic everywhere else.

use std::borrow::Cow;
use std::iter::{FusedIterator, Peekable};

use crate::ast::{CowStr, Node, Notes};
use crate::error::ParseError;
use crate::lexeme::{Lexeme, TokenKind};
use crate::lexer::scan_all;

/// Lazy parser over a sequence of lexeme lines.
///
/// Iterating yields one node per line, in order. The `Iterator` impl panics
/// on a malformed line; use [`Parser::try_next`] to handle those instead.
pub struct Parser<I> {
    lines: I,
    line_number: usize,
}

impl<I: Iterator> Parser<I> {
    /// Create a parser over the given lexeme lines.
    #[inline]
    pub fn new<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            line_number: 0,
        }
    }

    /// Number of the line most recently parsed (0 before the first).
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<'a, I> Parser<I>
where
    I: Iterator<Item = Vec<Lexeme<'a>>>,
{
    /// Parse the next line, reporting malformed input as an error.
    ///
    /// Returns `None` once every line has been parsed.
    pub fn try_next(&mut self) -> Option<Result<Node<'a>, ParseError>> {
        let lexemes = self.lines.next()?;
        self.line_number += 1;

        let result = parse_line(lexemes).map_err(|e| e.on_line(self.line_number));
        if let Ok(node) = &result {
            log::trace!("line {}: parsed {}", self.line_number, node.kind());
        }
        Some(result)
    }
}

impl<'a, I> Iterator for Parser<I>
where
    I: Iterator<Item = Vec<Lexeme<'a>>>,
{
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.try_next()? {
            Ok(node) => Some(node),
            Err(error) => panic!("malformed lexeme line: {}", error),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

impl<'a, I> FusedIterator for Parser<I> where I: FusedIterator<Item = Vec<Lexeme<'a>>> {}

/// Parse every lexeme line into notes, one node per line.
///
/// # Panics
///
/// Panics if a line could not have come from the scanner. Output of
/// [`scan_all`] never panics.
///
/// # Example
///
/// ```rust
/// use wullie_core::{parse_all, scan_all, Node};
///
/// let notes = parse_all(scan_all("# Cheese"));
/// assert_eq!(notes.lines, vec![Node::h1([Node::phrase(" Cheese")])]);
/// ```
pub fn parse_all<'a, L>(lines: L) -> Notes<'a>
where
    L: IntoIterator<Item = Vec<Lexeme<'a>>>,
{
    match try_parse_all(lines) {
        Ok(notes) => notes,
        Err(error) => panic!("malformed lexeme line: {}", error),
    }
}

/// Parse every lexeme line into notes, stopping at the first malformed line.
pub fn try_parse_all<'a, L>(lines: L) -> Result<Notes<'a>, ParseError>
where
    L: IntoIterator<Item = Vec<Lexeme<'a>>>,
{
    let mut parser = Parser::new(lines);
    let notes = std::iter::from_fn(|| parser.try_next()).collect::<Result<Notes<'a>, _>>()?;
    log::debug!("parsed {} lines", notes.len());
    Ok(notes)
}

/// Scan and parse a whole document.
pub fn parse(text: &str) -> Notes<'_> {
    parse_all(scan_all(text))
}

/// Parse one lexeme line into its line node.
pub fn parse_line(lexemes: Vec<Lexeme<'_>>) -> Result<Node<'_>, ParseError> {
    let mut cursor = LexemeCursor::new(lexemes);

    let kind = match cursor.peek_kind() {
        Some(kind) => kind,
        None => return Ok(Node::EmptyLine),
    };

    if !kind.is_line_marker() {
        return Ok(Node::TextLine(parse_phrases(&mut cursor)?));
    }

    let marker = cursor.read()?;
    let children = parse_phrases(&mut cursor)?;

    let node = match kind {
        TokenKind::H1 => Node::H1(children),
        TokenKind::H2 => Node::H2(children),
        TokenKind::H3 => Node::H3(children),
        TokenKind::Quote => Node::Quote(children),
        TokenKind::BulletPoint => Node::BulletPoint(children),
        TokenKind::NumberedPoint => Node::NumberedPoint {
            label: marker.into_label().unwrap_or_default(),
            children,
        },
        other => return Err(ParseError::unexpected_lexeme(other)),
    };

    Ok(node)
}

/// `PHRASE*` up to the end of the line.
fn parse_phrases<'a>(cursor: &mut LexemeCursor<'a>) -> Result<Vec<Node<'a>>, ParseError> {
    let mut phrases = Vec::new();
    while !cursor.is_eol() {
        phrases.push(parse_phrase(cursor)?);
    }
    Ok(phrases)
}

fn parse_phrase<'a>(cursor: &mut LexemeCursor<'a>) -> Result<Node<'a>, ParseError> {
    let lexeme = cursor.read()?;

    let node = match lexeme.kind {
        TokenKind::Text => Node::Phrase(parse_text(cursor, lexeme.literal)),
        TokenKind::KeyPhrase => {
            Node::KeyPhrase(parse_phrases_until(cursor, TokenKind::KeyPhrase)?)
        }
        TokenKind::Positive => {
            Node::Positive(parse_phrases_until(cursor, TokenKind::Positive)?)
        }
        TokenKind::Negative => {
            Node::Negative(parse_phrases_until(cursor, TokenKind::Negative)?)
        }
        TokenKind::Strong => {
            Node::Strong(parse_phrases_until(cursor, TokenKind::Strong)?)
        }
        TokenKind::Snippet => Node::Snippet(parse_snippet_body(cursor)?),
        kind if kind.is_line_marker() => return Err(ParseError::misplaced_marker(kind)),
        kind => return Err(ParseError::unexpected_lexeme(kind)),
    };

    Ok(node)
}

/// Children of a decoration: phrases until `delim` or the end of the line.
///
/// The closing `delim` is consumed. Decorations of a different kind nest;
/// one of the same kind closes this one.
fn parse_phrases_until<'a>(
    cursor: &mut LexemeCursor<'a>,
    delim: TokenKind,
) -> Result<Vec<Node<'a>>, ParseError> {
    let mut phrases = Vec::new();
    while !cursor.is_eol() && !cursor.accept(delim) {
        phrases.push(parse_phrase(cursor)?);
    }
    Ok(phrases)
}

/// Literal body of a snippet up to the closing marker or end of line.
fn parse_snippet_body<'a>(cursor: &mut LexemeCursor<'a>) -> Result<CowStr<'a>, ParseError> {
    let mut body: CowStr<'a> = Cow::Borrowed("");
    while !cursor.is_eol() && !cursor.accept(TokenKind::Snippet) {
        let lexeme = cursor.read()?;
        append(&mut body, lexeme.literal);
    }
    Ok(body)
}

/// A text run, joining any text lexemes that directly follow `first`.
fn parse_text<'a>(cursor: &mut LexemeCursor<'a>, first: CowStr<'a>) -> CowStr<'a> {
    let mut text = first;
    while cursor.peek_kind() == Some(TokenKind::Text) {
        if let Some(lexeme) = cursor.next() {
            append(&mut text, lexeme.literal);
        }
    }
    text
}

/// Append `more` to `text`, keeping a borrow while `text` is empty.
fn append<'a>(text: &mut CowStr<'a>, more: CowStr<'a>) {
    if text.is_empty() {
        *text = more;
    } else {
        text.to_mut().push_str(&more);
    }
}

/// Single lookahead cursor over the lexemes of one line.
struct LexemeCursor<'a> {
    lexemes: Peekable<std::vec::IntoIter<Lexeme<'a>>>,
}

impl<'a> LexemeCursor<'a> {
    #[inline]
    fn new(lexemes: Vec<Lexeme<'a>>) -> Self {
        Self {
            lexemes: lexemes.into_iter().peekable(),
        }
    }

    #[inline]
    fn is_eol(&mut self) -> bool {
        self.lexemes.peek().is_none()
    }

    #[inline]
    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.lexemes.peek().map(|lexeme| lexeme.kind)
    }

    #[inline]
    fn next(&mut self) -> Option<Lexeme<'a>> {
        self.lexemes.next()
    }

    /// Consume the current lexeme, failing at the end of the line.
    #[inline]
    fn read(&mut self) -> Result<Lexeme<'a>, ParseError> {
        self.lexemes
            .next()
            .ok_or_else(ParseError::unexpected_end_of_line)
    }

    /// Consume the current lexeme if it is of the given kind.
    #[inline]
    fn accept(&mut self, kind: TokenKind) -> bool {
        self.lexemes.next_if(|lexeme| lexeme.kind == kind).is_some()
    }
}
