mod commands;
mod error;
mod io;

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use commands::{check::handle_check, machine::handle_machine, tokens::handle_tokens};

#[derive(Parser, Debug)]
#[command(name = "movlib")]
#[command(about = "Tokenizer and machine tools for the MovLib assembly language", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the token stream of a source file
    Tokens {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check a source file for lexical errors
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Load a machine description and list its slots
    Machine {
        /// Machine description (TOML)
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Command::Tokens { file } => handle_tokens(&file)?,
        Command::Check { file } => handle_check(&file)?,
        Command::Machine { config } => handle_machine(&config)?,
    }
    Ok(())
}
