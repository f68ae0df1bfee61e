use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Classification of a [`ParseError`], without location details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MalformedLine,
    ExpectedBlockOpen,
    UnmatchedBraces,
    NoActiveBlock,
}

/// Errors produced while building a tree from lines.
///
/// Line numbers are 1-indexed positions in the input sequence.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: unrecognized line `{text}`")]
    #[diagnostic(
        code(kvtree::parse::malformed_line),
        help("expected a quoted key/value pair, a quoted tag, or a closing brace")
    )]
    MalformedLine { line: usize, text: String },

    #[error("line {line}: expected `{{` after tag \"{tag}\", {}", describe_found(.found))]
    #[diagnostic(
        code(kvtree::parse::expected_block_open),
        help("a tag line must be followed by a line holding only an opening brace")
    )]
    ExpectedBlockOpen {
        line: usize,
        tag: String,
        found: Option<String>,
    },

    #[error("unmatched number of braces (depth {depth} at end of input)")]
    #[diagnostic(
        code(kvtree::parse::unmatched_braces),
        help("every opened block needs exactly one closing brace")
    )]
    UnmatchedBraces { depth: isize },

    #[error("line {line}: no open block to receive this entry")]
    #[diagnostic(
        code(kvtree::parse::no_active_block),
        help("open a block with a quoted tag before adding entries")
    )]
    NoActiveBlock { line: usize },
}

fn describe_found(found: &Option<String>) -> String {
    match found {
        Some(text) => format!("found `{}`", text),
        None => "found end of input".to_string(),
    }
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::MalformedLine { .. } => ParseErrorKind::MalformedLine,
            ParseError::ExpectedBlockOpen { .. } => ParseErrorKind::ExpectedBlockOpen,
            ParseError::UnmatchedBraces { .. } => ParseErrorKind::UnmatchedBraces,
            ParseError::NoActiveBlock { .. } => ParseErrorKind::NoActiveBlock,
        }
    }

    /// The input line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedLine { line, .. }
            | ParseError::ExpectedBlockOpen { line, .. }
            | ParseError::NoActiveBlock { line } => Some(*line),
            ParseError::UnmatchedBraces { .. } => None,
        }
    }
}

/// Main error type for kvtree operations
#[derive(Error, Diagnostic, Debug)]
pub enum KvError {
    #[error("IO error: {0}")]
    #[diagnostic(code(kvtree::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(kvtree::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error in {}", .path.display())]
    #[diagnostic(code(kvtree::parse))]
    Parse {
        path: PathBuf,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] ParseError),

    #[error("Extension error: {} is not one of: {}", .path.display(), .accepted.join(", "))]
    #[diagnostic(code(kvtree::extension))]
    UnsupportedExtension { path: PathBuf, accepted: Vec<String> },

    #[error("JSON error: {0}")]
    #[diagnostic(code(kvtree::json))]
    Json(#[from] serde_json::Error),

    #[error("Config error: {message}")]
    #[diagnostic(code(kvtree::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Check failed: {message}")]
    #[diagnostic(code(kvtree::check))]
    Check {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, KvError>;
