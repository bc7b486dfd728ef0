//! Command-line interface definitions.

pub mod check;
pub mod evaluate;
pub mod matrix;
pub mod output;
pub mod rules;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::Result;

/// Matchedge - Football odds de-margining and rule-based opportunity detection.
#[derive(Parser, Debug)]
#[command(name = "matchedge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate every match in the store and print recommendations
    Evaluate(EvaluateArgs),

    /// Print the scoreline probability grid for one match
    Matrix(MatrixArgs),

    /// List configured detection rules
    Rules(ConfigPathArg),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `matchedge check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration and store files
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Emit machine-readable JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Include non-winning candidates in the output
    #[arg(long)]
    pub all_candidates: bool,
}

/// Arguments for the `matrix` subcommand.
#[derive(Parser, Debug)]
pub struct MatrixArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Match id to print the grid for
    pub match_id: String,
}

/// Route a parsed command line to its handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Evaluate(args) => evaluate::run(args).await,
        Commands::Matrix(args) => matrix::run(args).await,
        Commands::Rules(args) => rules::run(args).await,
        Commands::Check(CheckCommand::Config(args)) => check::config(&args),
    }
}
