//! Init command implementation.
//!
//! Writes a `kvtree.yaml` holding the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{Config, CONFIG_FILENAME};
use crate::error::{KvError, Result};
use crate::output::{display_path, Printer};

const HEADER: &str = "# kvtree configuration\n";

/// Write a default kvtree.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write the config into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing kvtree.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(KvError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = format!("{}{}", HEADER, Config::default().to_yaml()?);

    fs::write(&config_path, yaml).map_err(|e| KvError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&config_path));

    Ok(())
}
