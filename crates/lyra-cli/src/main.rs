//! Lyra CLI
//!
//! Command-line interface for the Lyra programming language.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

/// The Lyra programming language interpreter
#[derive(Parser, Debug)]
#[clap(name = "lyra", version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lex, parse, type-check, and execute a source file
    Run {
        /// Lyra source file to run
        file: PathBuf,

        /// Show verbose output
        #[clap(short, long)]
        verbose: bool,
    },
    /// Lex, parse, and type-check a source file without running it
    Check {
        /// Lyra source file to check
        file: PathBuf,

        /// Show verbose output
        #[clap(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Command::Run { verbose, .. } | Command::Check { verbose, .. } => *verbose,
    };
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();

    match cli.command {
        Command::Run { file, verbose } => commands::run::execute(file, verbose),
        Command::Check { file, verbose } => commands::check::execute(file, verbose),
    }
}
