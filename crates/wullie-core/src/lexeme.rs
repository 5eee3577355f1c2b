//! Lexeme types produced by the scanner.
//!
//! A lexeme couples a slice of source text with the kind of symbol it was
//! recognised as. Literals borrow from the input unless the scanner had to
//! merge neighbouring text runs.

use std::borrow::Cow;
use std::fmt;

use crate::ast::CowStr;

/// Kind of symbol a lexeme represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain text.
    Text,
    /// `#` heading marker.
    H1,
    /// `##` heading marker.
    H2,
    /// `###` heading marker.
    H3,
    /// `.` bullet point marker.
    BulletPoint,
    /// `<digits>.` numbered point marker.
    NumberedPoint,
    /// `>` quote marker.
    Quote,
    /// `\` escape marker.
    Escape,
    /// `**` key phrase marker.
    KeyPhrase,
    /// `+` positive marker.
    Positive,
    /// `-` negative marker.
    Negative,
    /// `*` strong marker.
    Strong,
    /// `` ` `` snippet marker.
    Snippet,
}

impl TokenKind {
    /// Human readable name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Text => "Text",
            TokenKind::H1 => "H1",
            TokenKind::H2 => "H2",
            TokenKind::H3 => "H3",
            TokenKind::BulletPoint => "BulletPoint",
            TokenKind::NumberedPoint => "NumberedPoint",
            TokenKind::Quote => "Quote",
            TokenKind::Escape => "Escape",
            TokenKind::KeyPhrase => "KeyPhrase",
            TokenKind::Positive => "Positive",
            TokenKind::Negative => "Negative",
            TokenKind::Strong => "Strong",
            TokenKind::Snippet => "Snippet",
        }
    }

    /// Whether this kind may only appear as the first lexeme of a line.
    pub const fn is_line_marker(self) -> bool {
        matches!(
            self,
            TokenKind::H1
                | TokenKind::H2
                | TokenKind::H3
                | TokenKind::BulletPoint
                | TokenKind::NumberedPoint
                | TokenKind::Quote
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned symbol and the literal text it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    /// What the literal represents.
    pub kind: TokenKind,
    /// Source text of the lexeme.
    pub literal: CowStr<'a>,
}

impl<'a> Lexeme<'a> {
    /// Create a lexeme of the given kind.
    #[inline]
    pub fn new(kind: TokenKind, literal: impl Into<CowStr<'a>>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    /// Create a plain text lexeme.
    #[inline]
    pub fn text(literal: impl Into<CowStr<'a>>) -> Self {
        Self::new(TokenKind::Text, literal)
    }

    /// Check if this lexeme is plain text.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    /// The digit label of a numbered point marker (`"12."` gives `"12"`).
    ///
    /// Returns `None` for every other kind.
    pub fn into_label(self) -> Option<CowStr<'a>> {
        if self.kind != TokenKind::NumberedPoint {
            return None;
        }
        let label = match self.literal {
            Cow::Borrowed(s) => Cow::Borrowed(s.strip_suffix('.').unwrap_or(s)),
            Cow::Owned(mut s) => {
                if s.ends_with('.') {
                    s.pop();
                }
                Cow::Owned(s)
            }
        };
        Some(label)
    }

    /// Detach the lexeme from the input it borrows from.
    pub fn into_owned(self) -> Lexeme<'static> {
        Lexeme {
            kind: self.kind,
            literal: Cow::Owned(self.literal.into_owned()),
        }
    }
}

impl fmt::Display for Lexeme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.literal)
    }
}
