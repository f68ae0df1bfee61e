//! Lint checks for parsed trees.
//!
//! Each check takes a `&Tree` and returns a `ValidationResult`. None of
//! them make the tree invalid; they point at things that parse but are
//! probably mistakes.

use std::collections::HashMap;

use crate::tree::Tree;

use super::warning::{Diagnostic, ValidationResult};

/// Keys assigned more than once in the same block. The last value wins.
pub fn check_duplicate_keys(tree: &Tree) -> ValidationResult {
    let mut result = ValidationResult::new();

    for overwrite in tree.overwrites() {
        let block = tree
            .get(overwrite.node)
            .map(|n| n.name())
            .unwrap_or_default();

        result.push(
            Diagnostic::warning(
                "kvtree::lint::duplicate-key",
                format!(
                    "Key '{}' in block '{}' assigned again; previous value '{}' is replaced",
                    overwrite.key, block, overwrite.previous
                ),
            )
            .at_line(overwrite.line)
            .with_help("Remove the earlier assignment"),
        );
    }

    result
}

/// Top-level blocks dropped because a later one opened after them.
pub fn check_replaced_roots(tree: &Tree) -> ValidationResult {
    let mut result = ValidationResult::new();

    for replaced in tree.replaced_roots() {
        result.push(
            Diagnostic::warning(
                "kvtree::lint::replaced-root",
                format!(
                    "Block '{}' from line {} is discarded; a new top-level block opens here",
                    replaced.name, replaced.line
                ),
            )
            .at_line(replaced.replaced_at)
            .with_help("Only the last top-level block is kept; nest the blocks under one root"),
        );
    }

    result
}

/// Sibling blocks sharing a tag. Lookups by name only reach the first one.
pub fn check_duplicate_blocks(tree: &Tree) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (_, node) in tree.walk() {
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for child in node.children() {
            if let Some(first_line) = seen.get(child.name()) {
                result.push(
                    Diagnostic::warning(
                        "kvtree::lint::duplicate-block",
                        format!(
                            "Block '{}' inside '{}' repeats the block opened on line {}",
                            child.name(),
                            node.name(),
                            first_line
                        ),
                    )
                    .at_line(child.line()),
                );
            } else {
                seen.insert(child.name(), child.line());
            }
        }
    }

    result
}

/// Empty keys or tags (`""`).
pub fn check_empty_names(tree: &Tree) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (_, node) in tree.walk() {
        if node.name().is_empty() {
            result.push(
                Diagnostic::warning("kvtree::lint::empty-tag", "Block has an empty tag")
                    .at_line(node.line()),
            );
        }

        if node.attributes().contains_key("") {
            result.push(
                Diagnostic::warning(
                    "kvtree::lint::empty-key",
                    format!("Block '{}' has an attribute with an empty key", node.name()),
                )
                .at_line(node.line()),
            );
        }
    }

    result
}

/// A document with no root block at all.
pub fn check_empty_document(tree: &Tree) -> ValidationResult {
    let mut result = ValidationResult::new();

    if tree.is_empty() {
        result.push(
            Diagnostic::warning("kvtree::lint::empty-document", "Document has no blocks")
                .with_help("The file is empty or contains only blank lines"),
        );
    }

    result
}
