//! File system scanner for key-value files.
//!
//! Recursively scans directories for files whose extension the config
//! accepts (`.acf` and `.vdf` by default).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::config::Config;

/// Result of scanning paths for input files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Files to parse, sorted.
    pub files: Vec<PathBuf>,
    /// Explicitly named files with an unaccepted extension.
    pub rejected: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files to parse.
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.files.extend(other.files);
        self.rejected.extend(other.rejected);
    }

    fn finish(mut self) -> Self {
        self.files.sort();
        self.files.dedup();
        self
    }
}

/// Scan a directory for accepted files.
pub fn scan_directory(root: &Path, config: &Config) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() || config.is_excluded(path) {
            continue;
        }

        if config.accepts(path) {
            result.files.push(path.to_path_buf());
        }
    }

    result.finish()
}

/// Scan a mix of files and directories.
///
/// Directories are walked; files are taken as given, or recorded in
/// `rejected` when their extension is not accepted. Missing paths are
/// ignored.
pub fn scan_paths(paths: &[PathBuf], config: &Config) -> ScanResult {
    let mut result = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            result.merge(scan_directory(path, config));
        } else if path.is_file() {
            if config.accepts(path) {
                result.files.push(path.clone());
            } else {
                result.rejected.push(path.clone());
            }
        }
    }

    result.finish()
}
