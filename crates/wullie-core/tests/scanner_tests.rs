//! Integration tests for the line and script scanners

use wullie_core::lexeme::{Lexeme, TokenKind};
use wullie_core::lexer::ScriptScanner;
use wullie_core::scanner::scan_line;
use wullie_core::scan_all;

fn lex(kind: TokenKind, literal: &str) -> Lexeme<'_> {
    Lexeme::new(kind, literal)
}

fn text(literal: &str) -> Lexeme<'_> {
    Lexeme::text(literal)
}

// ============================================================================
// Escape Tests
// ============================================================================

#[test]
fn test_escape_line_marker() {
    assert_eq!(scan_all(r"\#daft"), vec![vec![text("#daft")]]);
}

#[test]
fn test_escape_plain_text() {
    assert_eq!(scan_all(r"\da\ft"), vec![vec![text("daft")]]);
}

#[test]
fn test_escaped_backslash() {
    assert_eq!(scan_all(r"da\\ft"), vec![vec![text(r"da\ft")]]);
}

#[test]
fn test_escape_every_control_symbol() {
    for symbol in [r"\", "**", "+", "-", "*", "`"] {
        let input = format!(r"\{}", symbol);
        assert_eq!(scan_line(&input), vec![text(symbol)], "input: {}", input);
    }
}

#[test]
fn test_escape_merges_with_surrounding_text() {
    assert_eq!(scan_line(r"a \*b\* c"), vec![text("a *b* c")]);
}

#[test]
fn test_trailing_escape_is_dropped() {
    assert_eq!(scan_line(r"daft\"), vec![text("daft")]);
    assert_eq!(scan_line(r"\"), Vec::<Lexeme>::new());
}

#[test]
fn test_escape_only_applies_to_next_lexeme() {
    assert_eq!(
        scan_line(r"\++"),
        vec![text("+"), lex(TokenKind::Positive, "+")]
    );
}

// ============================================================================
// Line Marker Tests
// ============================================================================

#[test]
fn test_heading_1() {
    assert_eq!(
        scan_line("# Topic"),
        vec![lex(TokenKind::H1, "#"), text(" Topic")]
    );
}

#[test]
fn test_heading_keeps_inner_whitespace() {
    assert_eq!(
        scan_line("  #  Topic  "),
        vec![lex(TokenKind::H1, "#"), text("  Topic  ")]
    );
}

#[test]
fn test_heading_2() {
    assert_eq!(
        scan_line("## Sub topic"),
        vec![lex(TokenKind::H2, "##"), text(" Sub topic")]
    );
}

#[test]
fn test_heading_3() {
    assert_eq!(
        scan_line("### Heading"),
        vec![lex(TokenKind::H3, "###"), text(" Heading")]
    );
}

#[test]
fn test_heading_content_is_not_decorated() {
    assert_eq!(
        scan_line(r"# *Not* strong \ or escaped"),
        vec![lex(TokenKind::H1, "#"), text(r" *Not* strong \ or escaped")]
    );
}

#[test]
fn test_heading_without_content() {
    assert_eq!(scan_line("#"), vec![lex(TokenKind::H1, "#")]);
}

#[test]
fn test_bullet_point() {
    assert_eq!(
        scan_line(". Point"),
        vec![lex(TokenKind::BulletPoint, "."), text(" Point")]
    );
}

#[test]
fn test_bullet_point_with_decorations() {
    assert_eq!(
        scan_line(". Burnable -(Wildfires)-"),
        vec![
            lex(TokenKind::BulletPoint, "."),
            text(" Burnable "),
            lex(TokenKind::Negative, "-"),
            text("(Wildfires)"),
            lex(TokenKind::Negative, "-"),
        ]
    );
}

#[test]
fn test_numbered_point() {
    let lexemes = scan_line("123. Point");
    assert_eq!(
        lexemes,
        vec![lex(TokenKind::NumberedPoint, "123."), text(" Point")]
    );
    assert_eq!(lexemes[0].clone().into_label().as_deref(), Some("123"));
    assert_eq!(lexemes[1].clone().into_label(), None);
}

#[test]
fn test_digits_without_dot_are_text() {
    assert_eq!(scan_line("123 apples"), vec![text("123 apples")]);
    assert_eq!(
        scan_line("2-1"),
        vec![text("2"), lex(TokenKind::Negative, "-"), text("1")]
    );
}

#[test]
fn test_quote() {
    assert_eq!(
        scan_line("> Fly high through apocalypse skies"),
        vec![
            lex(TokenKind::Quote, ">"),
            text(" Fly high through apocalypse skies")
        ]
    );
}

#[test]
fn test_marker_only_at_line_start() {
    assert_eq!(scan_line("a # b > c"), vec![text("a # b > c")]);
}

#[test]
fn test_leading_whitespace_discarded() {
    assert_eq!(
        scan_line(" \t . Point"),
        vec![lex(TokenKind::BulletPoint, "."), text(" Point")]
    );
    assert_eq!(scan_line("   plain"), vec![text("plain")]);
}

#[test]
fn test_blank_line_is_empty() {
    assert_eq!(scan_line(""), Vec::<Lexeme>::new());
    assert_eq!(scan_line(" \t  "), Vec::<Lexeme>::new());
}

// ============================================================================
// Inline Symbol Tests
// ============================================================================

#[test]
fn test_all_inline_symbols() {
    assert_eq!(
        scan_line("**+-*`"),
        vec![
            lex(TokenKind::KeyPhrase, "**"),
            lex(TokenKind::Positive, "+"),
            lex(TokenKind::Negative, "-"),
            lex(TokenKind::Strong, "*"),
            lex(TokenKind::Snippet, "`"),
        ]
    );
}

#[test]
fn test_key_phrase_before_strong() {
    assert_eq!(
        scan_line("***"),
        vec![
            lex(TokenKind::KeyPhrase, "**"),
            lex(TokenKind::Strong, "*"),
        ]
    );
}

#[test]
fn test_decorated_sentence() {
    assert_eq!(
        scan_line("* +positive+ and -negative- *"),
        vec![
            lex(TokenKind::Strong, "*"),
            text(" "),
            lex(TokenKind::Positive, "+"),
            text("positive"),
            lex(TokenKind::Positive, "+"),
            text(" and "),
            lex(TokenKind::Negative, "-"),
            text("negative"),
            lex(TokenKind::Negative, "-"),
            text(" "),
            lex(TokenKind::Strong, "*"),
        ]
    );
}

#[test]
fn test_unicode_text() {
    assert_eq!(
        scan_line("Ça +marche+ très bien"),
        vec![
            text("Ça "),
            lex(TokenKind::Positive, "+"),
            text("marche"),
            lex(TokenKind::Positive, "+"),
            text(" très bien"),
        ]
    );
}

#[test]
fn test_lexeme_display() {
    let lexemes = scan_line("*a*");
    let rendered: Vec<String> = lexemes.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec![r#"Strong("*")"#, r#"Text("a")"#, r#"Strong("*")"#]);
}

// ============================================================================
// Script Scanner Tests
// ============================================================================

#[test]
fn test_multiple_lines() {
    let input = "\n### Trees:\n\n\n. Central to *ecosystems*\n.+ Fun to climb\n";
    let expected = vec![
        vec![],
        vec![lex(TokenKind::H3, "###"), text(" Trees:")],
        vec![],
        vec![],
        vec![
            lex(TokenKind::BulletPoint, "."),
            text(" Central to "),
            lex(TokenKind::Strong, "*"),
            text("ecosystems"),
            lex(TokenKind::Strong, "*"),
        ],
        vec![
            lex(TokenKind::BulletPoint, "."),
            lex(TokenKind::Positive, "+"),
            text(" Fun to climb"),
        ],
        vec![],
    ];
    assert_eq!(scan_all(input), expected);
}

#[test]
fn test_crlf_line_endings() {
    let input = "> I aten't ded\r\nA quote by whom?\r\n";
    let expected = vec![
        vec![lex(TokenKind::Quote, ">"), text(" I aten't ded")],
        vec![text("A quote by whom?")],
        vec![],
    ];
    assert_eq!(scan_all(input), expected);
}

#[test]
fn test_lone_carriage_return_is_text() {
    assert_eq!(scan_all("a\rb"), vec![vec![text("a\rb")]]);
}

#[test]
fn test_empty_input_is_one_empty_line() {
    assert_eq!(scan_all(""), vec![Vec::<Lexeme>::new()]);
}

#[test]
fn test_script_scanner_pull_interface() {
    let mut scanner = ScriptScanner::new("one\ntwo");

    assert!(scanner.has_next());
    assert_eq!(scanner.next(), Some(vec![text("one")]));
    assert_eq!(scanner.line_number(), 1);
    assert_eq!(scanner.remaining(), "two");

    assert!(scanner.has_next());
    assert_eq!(scanner.next(), Some(vec![text("two")]));
    assert_eq!(scanner.line_number(), 2);

    assert!(!scanner.has_next());
    assert_eq!(scanner.next(), None);
    assert_eq!(scanner.next(), None);
}

#[test]
fn test_script_scanner_raw_lines() {
    let mut scanner = ScriptScanner::new("  \r\nx");
    let first = scanner.next_line().unwrap();
    assert_eq!(first.text, "  ");
    assert_eq!(first.number, 1);
    assert_eq!(first.scan(), Vec::<Lexeme>::new());

    let second = scanner.next_line().unwrap();
    assert_eq!(second.text, "x");
    assert_eq!(second.scan(), vec![text("x")]);
    assert!(scanner.next_line().is_none());
}
