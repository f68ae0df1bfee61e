//! kvtree - parser and inspector for brace-delimited key-value files
//!
//! Reads the line-oriented `"tag" { "key" "value" }` format used by game
//! configuration files such as Steam `.acf` and `.vdf` manifests, builds a
//! tree of named blocks, and renders it for inspection.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod tree;
pub mod validation;

pub use discovery::{load_config, load_tree, Config, OutputFormat};
pub use error::{KvError, ParseError, ParseErrorKind, Result};
pub use parser::{normalize_line, parse_lines, parse_str, Parser};
pub use tree::{NodeId, NodeRef, Overwrite, ReplacedRoot, TableOptions, Tree};
pub use validation::{lint_tree, Diagnostic, Severity, ValidationResult};
