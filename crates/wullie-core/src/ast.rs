//! Node tree for parsed notes.
//!
//! A document parses into [`Notes`]: one line-level [`Node`] per source line.
//! Line-level nodes hold phrase-level nodes, which may nest further phrase
//! nodes but never a line-level one.
//!
//! The tree is:
//!
//! - **Zero-copy**: text is a `Cow<'a, str>` borrowing from the input when possible
//! - **Closed**: every kind is a variant of one enum, so consumers match exhaustively
//! - **Round-trippable**: `Display` re-emits control symbols and escapes literal ones

use std::borrow::Cow;
use std::fmt;
use std::iter::FusedIterator;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = Cow<'a, str>;

/// A node in a notes tree.
///
/// Leaf kinds carry text; parent kinds carry an ordered list of children,
/// which is empty rather than absent when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// `#` heading.
    H1(Vec<Node<'a>>),
    /// `##` heading.
    H2(Vec<Node<'a>>),
    /// `###` heading.
    H3(Vec<Node<'a>>),
    /// `>` quote line.
    Quote(Vec<Node<'a>>),
    /// `.` bullet point.
    BulletPoint(Vec<Node<'a>>),
    /// `<label>.` numbered point.
    NumberedPoint {
        /// Digits preceding the dot.
        label: CowStr<'a>,
        /// Phrases of the point.
        children: Vec<Node<'a>>,
    },
    /// Line with no line marker.
    TextLine(Vec<Node<'a>>),
    /// Line with no content.
    EmptyLine,
    /// Run of plain text.
    Phrase(CowStr<'a>),
    /// `**key phrase**`.
    KeyPhrase(Vec<Node<'a>>),
    /// `+positive+`.
    Positive(Vec<Node<'a>>),
    /// `-negative-`.
    Negative(Vec<Node<'a>>),
    /// `*strong*`.
    Strong(Vec<Node<'a>>),
    /// `` `snippet` `` with a literal body.
    Snippet(CowStr<'a>),
}

/// Fieldless mirror of the [`Node`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    H1,
    H2,
    H3,
    Quote,
    BulletPoint,
    NumberedPoint,
    TextLine,
    EmptyLine,
    Phrase,
    KeyPhrase,
    Positive,
    Negative,
    Strong,
    Snippet,
}

impl NodeKind {
    /// Human readable name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::H1 => "H1",
            NodeKind::H2 => "H2",
            NodeKind::H3 => "H3",
            NodeKind::Quote => "Quote",
            NodeKind::BulletPoint => "BulletPoint",
            NodeKind::NumberedPoint => "NumberedPoint",
            NodeKind::TextLine => "TextLine",
            NodeKind::EmptyLine => "EmptyLine",
            NodeKind::Phrase => "Phrase",
            NodeKind::KeyPhrase => "KeyPhrase",
            NodeKind::Positive => "Positive",
            NodeKind::Negative => "Negative",
            NodeKind::Strong => "Strong",
            NodeKind::Snippet => "Snippet",
        }
    }

    /// Whether the kind may only appear directly in [`Notes`].
    pub const fn is_line_level(self) -> bool {
        matches!(
            self,
            NodeKind::H1
                | NodeKind::H2
                | NodeKind::H3
                | NodeKind::Quote
                | NodeKind::BulletPoint
                | NodeKind::NumberedPoint
                | NodeKind::TextLine
                | NodeKind::EmptyLine
        )
    }

    /// Whether the kind may only appear nested inside another node.
    pub const fn is_phrase_level(self) -> bool {
        !self.is_line_level()
    }

    /// Whether the kind is any of the three heading levels.
    pub const fn is_heading(self) -> bool {
        matches!(self, NodeKind::H1 | NodeKind::H2 | NodeKind::H3)
    }

    /// Control symbols written before and after the children of this kind.
    ///
    /// Numbered points open with their label, which is not known here.
    const fn markers(self) -> (&'static str, &'static str) {
        match self {
            NodeKind::H1 => ("#", ""),
            NodeKind::H2 => ("##", ""),
            NodeKind::H3 => ("###", ""),
            NodeKind::Quote => (">", ""),
            NodeKind::BulletPoint => (".", ""),
            NodeKind::KeyPhrase => ("**", "**"),
            NodeKind::Positive => ("+", "+"),
            NodeKind::Negative => ("-", "-"),
            NodeKind::Strong => ("*", "*"),
            NodeKind::Snippet => ("`", "`"),
            NodeKind::NumberedPoint
            | NodeKind::TextLine
            | NodeKind::EmptyLine
            | NodeKind::Phrase => ("", ""),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> Node<'a> {
    pub fn empty_line() -> Self {
        Node::EmptyLine
    }

    pub fn phrase(text: impl Into<CowStr<'a>>) -> Self {
        Node::Phrase(text.into())
    }

    pub fn snippet(text: impl Into<CowStr<'a>>) -> Self {
        Node::Snippet(text.into())
    }

    pub fn h1(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::H1(children.into_iter().collect())
    }

    pub fn h2(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::H2(children.into_iter().collect())
    }

    pub fn h3(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::H3(children.into_iter().collect())
    }

    pub fn quote(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::Quote(children.into_iter().collect())
    }

    pub fn bullet_point(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::BulletPoint(children.into_iter().collect())
    }

    pub fn numbered_point(
        label: impl Into<CowStr<'a>>,
        children: impl IntoIterator<Item = Node<'a>>,
    ) -> Self {
        Node::NumberedPoint {
            label: label.into(),
            children: children.into_iter().collect(),
        }
    }

    pub fn text_line(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::TextLine(children.into_iter().collect())
    }

    pub fn key_phrase(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::KeyPhrase(children.into_iter().collect())
    }

    pub fn positive(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::Positive(children.into_iter().collect())
    }

    pub fn negative(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::Negative(children.into_iter().collect())
    }

    pub fn strong(children: impl IntoIterator<Item = Node<'a>>) -> Self {
        Node::Strong(children.into_iter().collect())
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::H1(_) => NodeKind::H1,
            Node::H2(_) => NodeKind::H2,
            Node::H3(_) => NodeKind::H3,
            Node::Quote(_) => NodeKind::Quote,
            Node::BulletPoint(_) => NodeKind::BulletPoint,
            Node::NumberedPoint { .. } => NodeKind::NumberedPoint,
            Node::TextLine(_) => NodeKind::TextLine,
            Node::EmptyLine => NodeKind::EmptyLine,
            Node::Phrase(_) => NodeKind::Phrase,
            Node::KeyPhrase(_) => NodeKind::KeyPhrase,
            Node::Positive(_) => NodeKind::Positive,
            Node::Negative(_) => NodeKind::Negative,
            Node::Strong(_) => NodeKind::Strong,
            Node::Snippet(_) => NodeKind::Snippet,
        }
    }

    /// Human readable name of the node's kind.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Children of a parent node, or `None` for leaf nodes.
    pub fn children(&self) -> Option<&[Node<'a>]> {
        match self {
            Node::H1(children)
            | Node::H2(children)
            | Node::H3(children)
            | Node::Quote(children)
            | Node::BulletPoint(children)
            | Node::NumberedPoint { children, .. }
            | Node::TextLine(children)
            | Node::KeyPhrase(children)
            | Node::Positive(children)
            | Node::Negative(children)
            | Node::Strong(children) => Some(children),
            Node::EmptyLine | Node::Phrase(_) | Node::Snippet(_) => None,
        }
    }

    /// Check if this node carries children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        self.children().is_some()
    }

    /// Text of the node with all control symbols removed.
    ///
    /// For parent nodes this is the concatenated text of the children; an
    /// empty line is a single `"\n"`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Append the node's text to `out`.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Node::EmptyLine => out.push('\n'),
            Node::Phrase(text) | Node::Snippet(text) => out.push_str(text),
            parent => {
                for child in parent.children().unwrap_or_default() {
                    child.write_text(out);
                }
            }
        }
    }

    /// Detach the node from the input it borrows from.
    pub fn into_owned(self) -> Node<'static> {
        fn own(children: Vec<Node<'_>>) -> Vec<Node<'static>> {
            children.into_iter().map(Node::into_owned).collect()
        }

        match self {
            Node::H1(c) => Node::H1(own(c)),
            Node::H2(c) => Node::H2(own(c)),
            Node::H3(c) => Node::H3(own(c)),
            Node::Quote(c) => Node::Quote(own(c)),
            Node::BulletPoint(c) => Node::BulletPoint(own(c)),
            Node::NumberedPoint { label, children } => Node::NumberedPoint {
                label: Cow::Owned(label.into_owned()),
                children: own(children),
            },
            Node::TextLine(c) => Node::TextLine(own(c)),
            Node::EmptyLine => Node::EmptyLine,
            Node::Phrase(text) => Node::Phrase(Cow::Owned(text.into_owned())),
            Node::KeyPhrase(c) => Node::KeyPhrase(own(c)),
            Node::Positive(c) => Node::Positive(own(c)),
            Node::Negative(c) => Node::Negative(own(c)),
            Node::Strong(c) => Node::Strong(own(c)),
            Node::Snippet(text) => Node::Snippet(Cow::Owned(text.into_owned())),
        }
    }
}

/// Canonical notation of the node.
///
/// Decorations are always closed, even when the source left them open.
/// Phrase and snippet text is escaped so it reads back as text; heading and
/// quote text is written as is, since those lines are never scanned inline.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::EmptyLine => Ok(()),
            Node::Phrase(text) => write_escaped(f, text, INLINE_CONTROLS),
            Node::Snippet(text) => {
                f.write_str("`")?;
                write_escaped(f, text, SNIPPET_CONTROLS)?;
                f.write_str("`")
            }
            Node::H1(children)
            | Node::H2(children)
            | Node::H3(children)
            | Node::Quote(children) => {
                f.write_str(self.kind().markers().0)?;
                for child in children {
                    match child {
                        Node::Phrase(text) => f.write_str(text)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                Ok(())
            }
            Node::TextLine(children) => {
                if let Some(Node::Phrase(text)) = children.first() {
                    if reads_as_line_start(text) {
                        f.write_str("\\")?;
                    }
                }
                children.iter().try_for_each(|child| write!(f, "{}", child))
            }
            Node::NumberedPoint { label, children } => {
                write!(f, "{}.", label)?;
                children.iter().try_for_each(|child| write!(f, "{}", child))
            }
            parent => {
                let (open, close) = parent.kind().markers();
                f.write_str(open)?;
                for child in parent.children().unwrap_or_default() {
                    write!(f, "{}", child)?;
                }
                f.write_str(close)
            }
        }
    }
}

/// Bytes escaped in phrase text.
const INLINE_CONTROLS: &[u8] = b"\\*+-`";

/// Bytes escaped in a snippet body. Other symbols are read back literally.
const SNIPPET_CONTROLS: &[u8] = b"\\`";

/// Write `text` with a backslash before every byte in `controls`.
fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, controls: &[u8]) -> fmt::Result {
    let mut start = 0;
    for (i, byte) in text.bytes().enumerate() {
        if controls.contains(&byte) {
            f.write_str(&text[start..i])?;
            f.write_str("\\")?;
            start = i;
        }
    }
    f.write_str(&text[start..])
}

/// Whether text at the start of a line would be dropped as leading
/// whitespace or read as a line marker.
fn reads_as_line_start(text: &str) -> bool {
    match text.chars().next() {
        Some('#' | '.' | '>') => true,
        Some(c) if c.is_whitespace() => true,
        Some(c) if c.is_ascii_digit() => {
            let digits = text.bytes().take_while(u8::is_ascii_digit).count();
            text.as_bytes().get(digits) == Some(&b'.')
        }
        _ => false,
    }
}

/// Position of a node reported during depth-first traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// 1-based source line the node came from.
    pub line: usize,
    /// Nesting depth: 0 for line nodes, +1 per phrase level.
    pub depth: usize,
    /// Index of the node among its siblings.
    pub order: usize,
}

/// A parsed document: one line-level node per source line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notes<'a> {
    /// Line nodes in document order.
    pub lines: Vec<Node<'a>>,
}

impl<'a> Notes<'a> {
    /// Wrap a list of line nodes.
    #[inline]
    pub fn new(lines: Vec<Node<'a>>) -> Self {
        Self { lines }
    }

    /// Number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the line nodes.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Node<'a>> {
        self.lines.iter()
    }

    /// Plain text of the notes: each line trimmed and newline terminated.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        let mut line = String::new();
        for node in &self.lines {
            line.clear();
            node.write_text(&mut line);
            out.push_str(line.trim());
            out.push('\n');
        }
        out
    }

    /// Canonical notation of the notes, one newline terminated line per node.
    ///
    /// Parsing the result gives back the same lines followed by one empty
    /// line. Star markers that touch (`***`) cannot be told apart when read
    /// back, so trees built with them do not survive the trip.
    pub fn to_canonical_text(&self) -> String {
        self.to_string()
    }

    /// Collapse every run of empty lines into a single empty line.
    pub fn collapse_blank_lines(mut self) -> Self {
        self.lines
            .dedup_by(|a, b| matches!((a, b), (Node::EmptyLine, Node::EmptyLine)));
        self
    }

    /// Visit every node depth first, parents before children.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<'a>, Visit),
    {
        for (node, position) in self.iter_depth_first() {
            visit(node, position);
        }
    }

    /// Iterate over every node depth first, parents before children.
    pub fn iter_depth_first(&self) -> DepthFirst<'_, 'a> {
        let stack = self
            .lines
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| {
                (
                    node,
                    Visit {
                        line: i + 1,
                        depth: 0,
                        order: i,
                    },
                )
            })
            .collect();
        DepthFirst { stack }
    }

    /// Detach the notes from the input they borrow from.
    pub fn into_owned(self) -> Notes<'static> {
        Notes {
            lines: self.lines.into_iter().map(Node::into_owned).collect(),
        }
    }
}

impl fmt::Display for Notes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.lines {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<Node<'a>> for Notes<'a> {
    fn from_iter<T: IntoIterator<Item = Node<'a>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for Notes<'a> {
    type Item = Node<'a>;
    type IntoIter = std::vec::IntoIter<Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'n, 'a> IntoIterator for &'n Notes<'a> {
    type Item = &'n Node<'a>;
    type IntoIter = std::slice::Iter<'n, Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Pre-order iterator over every node of a [`Notes`].
pub struct DepthFirst<'n, 'a> {
    stack: Vec<(&'n Node<'a>, Visit)>,
}

impl<'n, 'a> Iterator for DepthFirst<'n, 'a> {
    type Item = (&'n Node<'a>, Visit);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, visit) = self.stack.pop()?;

        if let Some(children) = node.children() {
            let depth = visit.depth + 1;
            self.stack.extend(children.iter().enumerate().rev().map(|(order, child)| {
                (
                    child,
                    Visit {
                        line: visit.line,
                        depth,
                        order,
                    },
                )
            }));
        }

        Some((node, visit))
    }
}

impl FusedIterator for DepthFirst<'_, '_> {}

/// Plain text of `notes`. See [`Notes::to_plain_text`].
pub fn to_plain_text(notes: &Notes<'_>) -> String {
    notes.to_plain_text()
}

/// Canonical notation of `notes`. See [`Notes::to_canonical_text`].
pub fn to_canonical_text(notes: &Notes<'_>) -> String {
    notes.to_canonical_text()
}

/// Collapse runs of empty lines. See [`Notes::collapse_blank_lines`].
pub fn collapse_blank_lines(notes: Notes<'_>) -> Notes<'_> {
    notes.collapse_blank_lines()
}

/// Depth-first traversal. See [`Notes::walk`].
pub fn walk<'a, F>(notes: &Notes<'a>, visit: F)
where
    F: FnMut(&Node<'a>, Visit),
{
    notes.walk(visit)
}
