//! Project configuration (kvtree.yaml) parsing.
//!
//! Every field is optional; a missing file behaves like an empty one.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{KvError, Result};
use crate::tree::DEFAULT_KEY_WIDTH;

/// How `kvtree print` renders a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Level/tag/elements table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Configuration loaded from kvtree.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Accepted file extensions, without the leading dot.
    pub extensions: Vec<String>,

    /// Patterns to exclude from directory scans.
    pub excludes: Vec<String>,

    /// Column width for attribute keys in table output.
    pub key_width: usize,

    /// Default output format for `print`.
    pub format: OutputFormat,
}

fn default_extensions() -> Vec<String> {
    vec!["acf".to_string(), "vdf".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excludes: vec![],
            key_width: DEFAULT_KEY_WIDTH,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Load config from a kvtree.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KvError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content).map_err(|e| KvError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Check kvtree.yaml syntax".to_string()),
        })?;

        if config.extensions.is_empty() {
            return Err(KvError::Config {
                message: "extensions must not be empty".to_string(),
                help: Some("List at least one extension, e.g. [acf, vdf]".to_string()),
            });
        }

        Ok(config)
    }

    /// Whether `path` ends in one of the accepted extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|accepted| accepted == ext))
            .unwrap_or(false)
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Serialize to YAML (used by `kvtree init`).
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| KvError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }
}

/// Simple glob pattern matching.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        // **/dir/* matches anything inside dir anywhere in the path
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir))
                || path.contains(&format!("/{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix))
            || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
