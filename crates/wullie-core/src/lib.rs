//! # Wullie Core
//!
//! Scanner, parser and node tree for Wullie notes: a line-oriented notation
//! of headings, points, quotes and inline decorations.
//!
//! ```text
//! # Heading 1
//! ## Heading 2
//! ### Heading 3
//! . Bullet point
//! 1. Numbered point
//! > Quote
//! **Key phrase** +positive+ -negative- *strong* `snippet`
//! ```
//!
//! The pipeline runs one line at a time:
//!
//! raw text → [`lexer::ScriptScanner`] → lexeme lines → [`parser::Parser`] → [`Notes`]
//!
//! ## Quick Start
//!
//! ```rust
//! use wullie_core::{parse_all, scan_all, Node};
//!
//! let input = "# Cheese\n> Cheese is tasty.\n*Strong +positive+ and -negative-*";
//! let notes = parse_all(scan_all(input));
//!
//! assert_eq!(notes.len(), 3);
//! assert_eq!(
//!     notes.to_plain_text(),
//!     "Cheese\nCheese is tasty.\nStrong positive and negative\n"
//! );
//! assert!(matches!(notes.lines[2], Node::TextLine(_)));
//! ```
//!
//! ## Walking the tree
//!
//! ```rust
//! use wullie_core::{parse, walk, Node};
//!
//! let notes = parse(". +Fun+ to climb\n. -Can fall- over");
//! let mut positives = 0;
//! walk(&notes, |node, _visit| {
//!     if let Node::Positive(_) = node {
//!         positives += 1;
//!     }
//! });
//! assert_eq!(positives, 1);
//! ```
//!
//! ## Malformed input
//!
//! Scanning never fails and the parser accepts everything the scanner
//! produces. Hand-built lexeme lines that the scanner could not have produced
//! make [`parse_all`] panic; [`try_parse_all`] reports them as a
//! [`ParseError`] instead.

pub mod ast;
pub mod error;
pub mod lexeme;
pub mod lexer;
pub mod parser;
pub mod scanner;

pub use ast::{
    collapse_blank_lines, to_canonical_text, to_plain_text, walk, Node, NodeKind, Notes, Visit,
};
pub use error::{ParseError, ParseErrorKind};
pub use lexeme::{Lexeme, TokenKind};
pub use lexer::{scan_all, ScriptScanner};
pub use parser::{parse, parse_all, try_parse_all, Parser};
