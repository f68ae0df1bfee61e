pub mod check;
pub mod completions;
pub mod init;
pub mod print;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// kvtree - parse and inspect brace-delimited key-value files
#[derive(Parser, Debug)]
#[command(name = "kvtree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress status output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Config file to use instead of ./kvtree.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a file and print its tree
    Print(print::PrintArgs),

    /// Parse and lint files or directories
    Check(check::CheckArgs),

    /// Write a default kvtree.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
