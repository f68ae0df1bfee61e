//! Human-readable and JSON renderings of a tree.

use std::io::{self, Write};

use super::Tree;

/// Column width for attribute keys in the table view.
pub const DEFAULT_KEY_WIDTH: usize = 10;

const RULE: &str = "----------------------------------------";

/// Options for the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Keys shorter than this are padded so values line up.
    pub key_width: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            key_width: DEFAULT_KEY_WIDTH,
        }
    }
}

/// Write the level/tag/elements table for `tree`.
///
/// Each block prints as `level<TAB>tag`, followed by one indented line per
/// attribute. An empty tree writes nothing.
pub fn write_table<W: Write>(out: &mut W, tree: &Tree, options: &TableOptions) -> io::Result<()> {
    if tree.is_empty() {
        return Ok(());
    }

    writeln!(out, "Level\tTag\tElements")?;
    writeln!(out, "{}", RULE)?;

    let width = options.key_width;
    for (level, node) in tree.walk() {
        writeln!(out, "{}\t{}", level, node.name())?;
        for (key, value) in node.attributes() {
            writeln!(out, "\t\t{:<width$}: {}", key, value)?;
        }
    }

    Ok(())
}

/// Render the table view to a string.
pub fn render_table(tree: &Tree, options: &TableOptions) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_table(&mut buf, tree, options);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Render the tree as pretty-printed JSON (`null` for an empty tree).
pub fn render_json(tree: &Tree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tree)
}
