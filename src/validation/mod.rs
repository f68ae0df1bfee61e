//! Lint checks and diagnostics for `kvtree check`.
//!
//! Parse failures are fatal for a file and become a single error
//! diagnostic. Files that parse are run through the lint checks, which only
//! ever produce warnings.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use std::path::Path;

use crate::output::{display_path, Printer};
use crate::tree::Tree;

/// Run all lint checks against a parsed tree.
pub fn lint_tree(tree: &Tree) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_empty_document(tree));
    result.merge(checks::check_replaced_roots(tree));
    result.merge(checks::check_duplicate_keys(tree));
    result.merge(checks::check_duplicate_blocks(tree));
    result.merge(checks::check_empty_names(tree));

    result
}

/// Print the diagnostics for one file.
pub fn print_diagnostics(path: &Path, result: &ValidationResult, printer: &Printer) {
    let shown = display_path(path);

    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        let location = match d.line {
            Some(line) => format!("{}:{}", shown, line),
            None => shown.clone(),
        };
        printer.message(&format!("{}[{}]: {}", label, d.code, d.message));
        printer.message(&format!("  {} {}", printer.dim("-->"), location));
        if let Some(help) = &d.help {
            printer.message(&format!("  {} {}", printer.dim("help:"), help));
        }
    }
}
