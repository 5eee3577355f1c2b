//! Wullie CLI - Inspect, reformat and summarise Wullie notes
//!
//! Usage:
//!   wullie [OPTIONS] [COMMAND] <FILE>
//!
//! Commands:
//!   tree      Show the node tree (default)
//!   plain     Print the notes as plain text
//!   fmt       Print the notes in canonical notation
//!   tokens    Show the lexemes of every line
//!   stats     Show note statistics

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use log::LevelFilter;
use serde::Serialize;
use wullie_core::{scan_all, try_parse_all, Lexeme, Node, NodeKind, Notes, ScriptScanner};

fn main() {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;
    init_logging(config.verbose);

    let input = read_input(&config.file)?;
    log::debug!("read {} bytes from '{}'", input.len(), config.file);

    match config.command {
        Command::Tree => cmd_tree(&input, &config),
        Command::Plain => cmd_plain(&input, &config),
        Command::Fmt => cmd_fmt(&input, &config),
        Command::Tokens => cmd_tokens(&input, &config),
        Command::Stats => cmd_stats(&input, &config),
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    collapse: bool,
    verbose: bool,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Tree,
    Plain,
    Fmt,
    Tokens,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Tree;
    let mut format = OutputFormat::Text;
    let mut collapse = false;
    let mut verbose = false;
    let mut file = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("wullie {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "-c" | "--collapse" => collapse = true,
            "tree" => command = Command::Tree,
            "plain" => command = Command::Plain,
            "fmt" => command = Command::Fmt,
            "tokens" => command = Command::Tokens,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if file.is_some() {
                    return Err("multiple files specified".to_string());
                }
                file = Some(arg.clone());
            }
        }
    }

    let file = file.ok_or_else(|| "no input file specified".to_string())?;

    Ok(Config {
        command,
        file,
        format,
        collapse,
        verbose,
    })
}

fn print_help() {
    eprintln!(
        r#"wullie - Wullie notes scanner and parser

USAGE:
    wullie [OPTIONS] [COMMAND] <FILE>

COMMANDS:
    tree        Show the node tree (default)
    plain       Print the notes as plain text
    fmt         Print the notes in canonical notation
    tokens      Show the lexemes of every line
    stats       Show note statistics

OPTIONS:
    -j, --json       Output in JSON format
    -c, --collapse   Collapse runs of empty lines
    -v, --verbose    Enable debug logging (RUST_LOG overrides)
    -h, --help       Print help information
    -V, --version    Print version information

Use '-' as FILE to read from standard input.

EXAMPLES:
    wullie notes.wul            Show the node tree
    wullie -j notes.wul         Output the node tree as JSON
    wullie -c fmt notes.wul     Reformat with blank lines collapsed
    wullie stats - < notes.wul  Count decorations read from stdin
"#
    );
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_input(file: &str) -> Result<String, String> {
    if file == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(|e| format!("failed to read standard input: {}", e))?;
        return Ok(input);
    }

    fs::read_to_string(file).map_err(|e| format!("failed to read '{}': {}", file, e))
}

fn load_notes<'a>(input: &'a str, config: &Config) -> Result<Notes<'a>, String> {
    let notes = try_parse_all(scan_all(input)).map_err(|e| e.to_string())?;

    if config.collapse {
        let before = notes.len();
        let notes = notes.collapse_blank_lines();
        log::debug!("collapsed {} empty lines", before - notes.len());
        Ok(notes)
    } else {
        Ok(notes)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("failed to write JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Tree Command
// =============================================================================

fn cmd_tree(input: &str, config: &Config) -> Result<(), String> {
    let notes = load_notes(input, config)?;

    match config.format {
        OutputFormat::Json => print_json(&convert_notes(&notes)),
        OutputFormat::Text => {
            print_tree(&notes);
            Ok(())
        }
    }
}

fn print_tree(notes: &Notes) {
    notes.walk(|node, visit| {
        let indent = "  ".repeat(visit.depth);
        match node {
            Node::EmptyLine => {}
            Node::Phrase(_) | Node::Snippet(_) => {
                println!("{}{}({:?})", indent, node.name(), node.text().trim())
            }
            Node::Quote(_) => println!("{}{} {:?}", indent, node.name(), node.text().trim()),
            Node::NumberedPoint { label, .. } => println!("{}{} {}", indent, node.name(), label),
            _ => println!("{}{}", indent, node.name()),
        }
    });
}

// =============================================================================
// Plain and Fmt Commands
// =============================================================================

fn cmd_plain(input: &str, config: &Config) -> Result<(), String> {
    let notes = load_notes(input, config)?;
    print_text(notes.to_plain_text(), config.format)
}

fn cmd_fmt(input: &str, config: &Config) -> Result<(), String> {
    let notes = load_notes(input, config)?;
    print_text(notes.to_canonical_text(), config.format)
}

fn print_text(text: String, format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "text": text })),
        OutputFormat::Text => {
            print!("{}", text);
            Ok(())
        }
    }
}

// =============================================================================
// Tokens Command
// =============================================================================

fn cmd_tokens(input: &str, config: &Config) -> Result<(), String> {
    let lines: Vec<Vec<Lexeme>> = ScriptScanner::new(input).collect();

    match config.format {
        OutputFormat::Json => {
            let json: Vec<JsonTokenLine> = lines
                .iter()
                .enumerate()
                .map(|(i, lexemes)| JsonTokenLine {
                    line: i + 1,
                    lexemes: lexemes.iter().map(convert_lexeme).collect(),
                })
                .collect();
            print_json(&json)
        }
        OutputFormat::Text => {
            let width = lines.len().to_string().len();
            for (i, lexemes) in lines.iter().enumerate() {
                let rendered: Vec<String> = lexemes.iter().map(ToString::to_string).collect();
                println!("{:>width$}: {}", i + 1, rendered.join(" "), width = width);
            }
            Ok(())
        }
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(input: &str, config: &Config) -> Result<(), String> {
    let notes = load_notes(input, config)?;
    let stats = NoteStats::from_notes(&notes, input);

    if let OutputFormat::Json = config.format {
        return print_json(&stats);
    }

    println!("Note Statistics");
    println!("---------------");
    println!("Lines:          {}", stats.lines);
    println!("  Empty:        {}", stats.empty_lines);
    println!();
    println!("Structure:");
    println!("  Headings:       {}", stats.headings);
    println!("  Bullet points:  {}", stats.bullet_points);
    println!("  Numbered:       {}", stats.numbered_points);
    println!("  Quotes:         {}", stats.quotes);
    println!();
    println!("Decorations:");
    println!("  Key phrases:    {}", stats.key_phrases);
    println!("  Positives:      {}", stats.positives);
    println!("  Negatives:      {}", stats.negatives);
    println!("  Strong:         {}", stats.strong);
    println!("  Snippets:       {}", stats.snippets);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);

    Ok(())
}

#[derive(Debug, Default, Serialize)]
struct NoteStats {
    lines: usize,
    empty_lines: usize,
    headings: usize,
    bullet_points: usize,
    numbered_points: usize,
    quotes: usize,
    key_phrases: usize,
    positives: usize,
    negatives: usize,
    strong: usize,
    snippets: usize,
    chars: usize,
    words: usize,
}

impl NoteStats {
    fn from_notes(notes: &Notes, input: &str) -> Self {
        let mut stats = Self {
            lines: notes.len(),
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            ..Self::default()
        };

        notes.walk(|node, _| stats.count(node.kind()));
        stats
    }

    fn count(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::H1 | NodeKind::H2 | NodeKind::H3 => self.headings += 1,
            NodeKind::BulletPoint => self.bullet_points += 1,
            NodeKind::NumberedPoint => self.numbered_points += 1,
            NodeKind::Quote => self.quotes += 1,
            NodeKind::EmptyLine => self.empty_lines += 1,
            NodeKind::KeyPhrase => self.key_phrases += 1,
            NodeKind::Positive => self.positives += 1,
            NodeKind::Negative => self.negatives += 1,
            NodeKind::Strong => self.strong += 1,
            NodeKind::Snippet => self.snippets += 1,
            NodeKind::TextLine | NodeKind::Phrase => {}
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonNotes<'a> {
    lines: Vec<JsonNode<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonNode<'a> {
    H1 {
        children: Vec<JsonNode<'a>>,
    },
    H2 {
        children: Vec<JsonNode<'a>>,
    },
    H3 {
        children: Vec<JsonNode<'a>>,
    },
    Quote {
        children: Vec<JsonNode<'a>>,
    },
    BulletPoint {
        children: Vec<JsonNode<'a>>,
    },
    NumberedPoint {
        label: &'a str,
        children: Vec<JsonNode<'a>>,
    },
    TextLine {
        children: Vec<JsonNode<'a>>,
    },
    EmptyLine,
    Phrase {
        text: &'a str,
    },
    KeyPhrase {
        children: Vec<JsonNode<'a>>,
    },
    Positive {
        children: Vec<JsonNode<'a>>,
    },
    Negative {
        children: Vec<JsonNode<'a>>,
    },
    Strong {
        children: Vec<JsonNode<'a>>,
    },
    Snippet {
        text: &'a str,
    },
}

#[derive(Serialize)]
struct JsonTokenLine<'a> {
    line: usize,
    lexemes: Vec<JsonLexeme<'a>>,
}

#[derive(Serialize)]
struct JsonLexeme<'a> {
    kind: &'static str,
    literal: &'a str,
}

fn convert_notes<'a>(notes: &'a Notes) -> JsonNotes<'a> {
    JsonNotes {
        lines: notes.iter().map(convert_node).collect(),
    }
}

fn convert_node<'a>(node: &'a Node) -> JsonNode<'a> {
    match node {
        Node::H1(c) => JsonNode::H1 { children: children(c) },
        Node::H2(c) => JsonNode::H2 { children: children(c) },
        Node::H3(c) => JsonNode::H3 { children: children(c) },
        Node::Quote(c) => JsonNode::Quote { children: children(c) },
        Node::BulletPoint(c) => JsonNode::BulletPoint { children: children(c) },
        Node::NumberedPoint { label, children: c } => JsonNode::NumberedPoint {
            label,
            children: children(c),
        },
        Node::TextLine(c) => JsonNode::TextLine { children: children(c) },
        Node::EmptyLine => JsonNode::EmptyLine,
        Node::Phrase(text) => JsonNode::Phrase { text },
        Node::KeyPhrase(c) => JsonNode::KeyPhrase { children: children(c) },
        Node::Positive(c) => JsonNode::Positive { children: children(c) },
        Node::Negative(c) => JsonNode::Negative { children: children(c) },
        Node::Strong(c) => JsonNode::Strong { children: children(c) },
        Node::Snippet(text) => JsonNode::Snippet { text },
    }
}

fn children<'a>(nodes: &'a [Node]) -> Vec<JsonNode<'a>> {
    nodes.iter().map(convert_node).collect()
}

fn convert_lexeme<'a>(lexeme: &'a Lexeme) -> JsonLexeme<'a> {
    JsonLexeme {
        kind: lexeme.kind.name(),
        literal: &lexeme.literal,
    }
}
