//! Print command implementation.
//!
//! Parses one file and writes its tree to stdout.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{load_tree, Config, OutputFormat};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::tree::{render_json, write_table, TableOptions};

/// Parse a file and print its tree
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// File to parse (.acf or .vdf by default)
    pub file: PathBuf,

    /// Output format (defaults to the config value, then `table`)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Column width for attribute keys in table output
    #[arg(long)]
    pub key_width: Option<usize>,
}

pub fn run<W: Write>(args: PrintArgs, config: &Config, printer: &Printer, out: &mut W) -> Result<()> {
    printer.status("Parsing", &display_path(&args.file));

    let tree = load_tree(&args.file, config)?;
    printer.status(
        "Finished",
        &format!("Parse Success! ({})", plural(tree.len(), "block", "blocks")),
    );

    match args.format.unwrap_or(config.format) {
        OutputFormat::Table => {
            if tree.is_empty() {
                printer.info("Empty", "(empty document)");
            } else {
                let options = TableOptions {
                    key_width: args.key_width.unwrap_or(config.key_width),
                };
                write_table(out, &tree, &options)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", render_json(&tree)?)?;
        }
    }

    Ok(())
}
