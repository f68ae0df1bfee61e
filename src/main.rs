use std::path::Path;

use clap::Parser;
use kvtree::cli::{Cli, Commands};
use kvtree::discovery::load_config;
use kvtree::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Print(args) => {
            let config = load_config(cli.config.as_deref(), Path::new("."))?;
            kvtree::cli::print::run(args, &config, &printer, &mut std::io::stdout().lock())?
        }
        Commands::Check(args) => {
            let config = load_config(cli.config.as_deref(), Path::new("."))?;
            kvtree::cli::check::run(args, &config, &printer)?;
        }
        Commands::Init(args) => kvtree::cli::init::run(args, &printer)?,
        Commands::Completions(args) => {
            kvtree::cli::completions::run(args, &mut std::io::stdout().lock())?
        }
    }

    Ok(())
}
