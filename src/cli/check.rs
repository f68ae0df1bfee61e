//! Check command implementation.
//!
//! Parses every accepted file under the given paths and runs the lint
//! checks on the ones that parse.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{load_tree, scan_paths, Config};
use crate::error::{KvError, Result};
use crate::output::{display_path, plural, Printer};
use crate::validation::{lint_tree, print_diagnostics, Diagnostic, ValidationResult};

/// Parse and lint files or directories
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Treat lint warnings as failures
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Totals across all checked files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub failed: usize,
    pub warnings: usize,
}

pub fn run(args: CheckArgs, config: &Config, printer: &Printer) -> Result<CheckSummary> {
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };

    let scan = scan_paths(&paths, config);

    for path in &scan.rejected {
        printer.warning(
            "Skipping",
            &format!("{} (extension not accepted)", display_path(path)),
        );
    }

    if scan.total() == 0 {
        return Err(KvError::Check {
            message: "no input files found".to_string(),
            help: Some(format!(
                "Accepted extensions: {}",
                config.extensions.join(", ")
            )),
        });
    }

    let mut summary = CheckSummary::default();

    for file in &scan.files {
        printer.status("Checking", &display_path(file));

        let result = check_file(file, config);
        print_diagnostics(file, &result, printer);

        summary.files += 1;
        summary.warnings += result.warning_count();
        if result.has_errors() {
            summary.failed += 1;
        }
    }

    let checked = plural(summary.files, "file", "files");
    let warnings = plural(summary.warnings, "warning", "warnings");

    if summary.failed > 0 {
        printer.error("Failed", &format!("{} of {} ({})", summary.failed, checked, warnings));
        return Err(KvError::Check {
            message: format!("{} could not be parsed", plural(summary.failed, "file", "files")),
            help: None,
        });
    }

    if args.deny_warnings && summary.warnings > 0 {
        printer.error("Failed", &format!("{} ({} denied)", checked, warnings));
        return Err(KvError::Check {
            message: format!("{} reported", warnings),
            help: Some("Fix the warnings or drop --deny-warnings".to_string()),
        });
    }

    printer.status("Finished", &format!("{} ({})", checked, warnings));
    Ok(summary)
}

/// Parse and lint one file, folding any failure into the result.
pub fn check_file(path: &Path, config: &Config) -> ValidationResult {
    match load_tree(path, config) {
        Ok(tree) => lint_tree(&tree),
        Err(KvError::Parse { source, .. }) => {
            let mut result = ValidationResult::new();
            result.push(Diagnostic::from_parse_error(&source));
            result
        }
        Err(other) => {
            let mut result = ValidationResult::new();
            result.push(Diagnostic::error("kvtree::io", other.to_string()));
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn quiet() -> Printer {
        Printer::new().quiet(true)
    }

    #[test]
    fn test_check_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.acf"), "\"A\"\n{\n\"k\" \"v\"\n}\n").unwrap();
        fs::write(dir.path().join("b.vdf"), "\"B\"\n{\n\"k\" \"1\"\n\"k\" \"2\"\n}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not parsed").unwrap();

        let args = CheckArgs {
            paths: vec![dir.path().to_path_buf()],
            deny_warnings: false,
        };
        let summary = run(args, &Config::default(), &quiet()).unwrap();

        assert_eq!(
            summary,
            CheckSummary {
                files: 2,
                failed: 0,
                warnings: 1
            }
        );
    }

    #[test]
    fn test_check_fails_on_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.acf"), "\"A\"\n{\n}\n").unwrap();
        fs::write(dir.path().join("bad.acf"), "\"A\"\n{\n").unwrap();

        let args = CheckArgs {
            paths: vec![dir.path().to_path_buf()],
            deny_warnings: false,
        };
        let err = run(args, &Config::default(), &quiet()).unwrap_err();
        assert!(matches!(err, KvError::Check { .. }));
        assert!(err.to_string().contains("1 file could not be parsed"));
    }

    #[test]
    fn test_check_deny_warnings() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.acf"), "\"A\"\n{\n\"k\" \"1\"\n\"k\" \"2\"\n}\n").unwrap();

        let args = CheckArgs {
            paths: vec![dir.path().to_path_buf()],
            deny_warnings: true,
        };
        assert!(run(args, &Config::default(), &quiet()).is_err());
    }

    #[test]
    fn test_check_no_files() {
        let dir = tempdir().unwrap();

        let args = CheckArgs {
            paths: vec![dir.path().to_path_buf()],
            deny_warnings: false,
        };
        let err = run(args, &Config::default(), &quiet()).unwrap_err();
        assert!(err.to_string().contains("no input files found"));
    }

    #[test]
    fn test_check_file_reports_parse_error_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.acf");
        fs::write(&path, "\"A\"\n{\n\"x\" \"y\" \"z\"\n}\n").unwrap();

        let result = check_file(&path, &Config::default());
        let d = result.iter().next().unwrap();
        assert_eq!(d.code, "kvtree::parse::malformed-line");
        assert_eq!(d.line, Some(3));
    }
}
