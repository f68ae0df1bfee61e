//! Parser for brace-delimited key-value files.
//!
//! Input is a sequence of lines. Each line is normalized, classified, and
//! fed to a builder that assembles the block tree.
//!
//! # Format
//!
//! ```text
//! "AppState"
//! {
//!     "appid"     "228980"
//!     "UserConfig"
//!     {
//!         "language"  "english"
//!     }
//! }
//! ```
//!
//! - A line with two quoted segments is a key/value pair for the open block
//! - A line with one quoted segment names a block; the next line must be `{`
//! - A lone `}` closes the innermost block
//! - A block opened at depth zero becomes the root, replacing any earlier
//!   root; entries after the root closes still land on the root
//! - Blank lines are skipped
//!
//! Quoted text may only contain ASCII letters, digits, and `\ : - ( ) _ .`
//! or spaces.
//!
//! # Usage
//!
//! ```ignore
//! use kvtree::parser::parse_str;
//!
//! let source = std::fs::read_to_string("appmanifest_228980.acf")?;
//! let tree = parse_str(&source)?;
//! ```

mod builder;
pub mod line;
mod normalize;

pub use builder::Parser;
pub use line::{classify, quoted_segments, Line};
pub use normalize::normalize_line;

use crate::error::ParseError;
use crate::tree::Tree;

/// Parse a buffered sequence of lines (without line terminators).
pub fn parse_lines<I, S>(lines: I) -> Result<Tree, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<S> = lines.into_iter().collect();
    Parser::new().parse(&lines)
}

/// Parse a whole document held in memory.
pub fn parse_str(source: &str) -> Result<Tree, ParseError> {
    parse_lines(source.lines())
}
