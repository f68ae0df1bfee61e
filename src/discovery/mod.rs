//! Locating, reading, and loading input files.
//!
//! The parser itself never touches the file system. This module does the
//! surrounding work: finding the config, checking extensions, scanning
//! directories, and reading a file into lines.
//!
//! # Example
//!
//! ```ignore
//! use kvtree::discovery::{load_config, load_tree};
//!
//! let config = load_config(None, Path::new("."))?;
//! let tree = load_tree(Path::new("appmanifest_228980.acf"), &config)?;
//! ```

mod config;
mod scanner;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{KvError, Result};
use crate::parser::parse_lines;
use crate::tree::Tree;

pub use config::{Config, OutputFormat};
pub use scanner::{scan_directory, scan_paths, ScanResult};

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "kvtree.yaml";

/// Load the effective config.
///
/// An explicit path must exist. Otherwise `dir/kvtree.yaml` is used when
/// present, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let path = dir.join(CONFIG_FILENAME);
    if path.exists() {
        Config::load(&path)
    } else {
        Ok(Config::default())
    }
}

/// Fail unless `path` has one of the configured extensions.
pub fn check_extension(path: &Path, config: &Config) -> Result<()> {
    if config.accepts(path) {
        Ok(())
    } else {
        Err(KvError::UnsupportedExtension {
            path: path.to_path_buf(),
            accepted: config.extensions.iter().map(|e| format!(".{}", e)).collect(),
        })
    }
}

/// Read a file into lines without their terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| KvError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to open file: {}", e),
    })?;

    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| KvError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })
}

/// Check, read, and parse a single file.
pub fn load_tree(path: &Path, config: &Config) -> Result<Tree> {
    check_extension(path, config)?;
    let lines = read_lines(path)?;

    parse_lines(&lines).map_err(|source| KvError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
