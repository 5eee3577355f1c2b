//! Integration tests for the wullie command line tool

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Run the binary with `args`, feeding `input` on standard input.
fn wullie(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_wullie"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start wullie");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for wullie")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn test_tree_is_default_command() {
    let output = wullie(&["-"], "# Cheese\n\n. +Tasty+ pie");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "H1\n  Phrase(\"Cheese\")\nBulletPoint\n  Phrase(\"\")\n  Positive\n    Phrase(\"Tasty\")\n  Phrase(\"pie\")\n"
    );
}

#[test]
fn test_plain_command() {
    let output = wullie(&["plain", "-"], "#  Cheese\n. *Tasty*");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Cheese\nTasty\n");
}

#[test]
fn test_fmt_with_collapse() {
    let output = wullie(&["-c", "fmt", "-"], "a\n\n\n*b");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\n\n*b*\n");
}

#[test]
fn test_tokens_command() {
    let output = wullie(&["tokens", "-"], "# A\n+b+");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "1: H1(\"#\") Text(\" A\")\n2: Positive(\"+\") Text(\"b\") Positive(\"+\")\n"
    );
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_stats_json() {
    let output = wullie(&["stats", "--json", "-"], "# H\n. +a+ -b- +c+\n\n1. `x`");
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(stats["lines"], 4);
    assert_eq!(stats["headings"], 1);
    assert_eq!(stats["positives"], 2);
    assert_eq!(stats["negatives"], 1);
    assert_eq!(stats["numbered_points"], 1);
    assert_eq!(stats["snippets"], 1);
    assert_eq!(stats["empty_lines"], 1);
}

#[test]
fn test_tree_json() {
    let output = wullie(&["-j", "-"], "3. *x*");
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let point = &tree["lines"][0];
    assert_eq!(point["type"], "NumberedPoint");
    assert_eq!(point["label"], "3");
    assert_eq!(point["children"][1]["type"], "Strong");
    assert_eq!(point["children"][1]["children"][0]["text"], "x");
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_unknown_option() {
    let output = wullie(&["--bogus", "-"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: unknown option: --bogus"));
}

#[test]
fn test_missing_file() {
    let output = wullie(&["tree"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no input file specified"));
}
