use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::convert::ConvertArgs;
use commands::generate::GenerateArgs;
use commands::tiers::TiersArgs;
use commands::validate::ValidateArgs;

/// Star catalog conversion and QA.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a source catalog into one JSON catalog per tier
    Convert(ConvertArgs),
    /// Generate synthetic star catalogs
    Generate(GenerateArgs),
    /// Check catalog documents; exits non-zero if any file fails
    Validate(ValidateArgs),
    /// Print the effective tier configuration as TOML
    Tiers(TiersArgs),
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries reports.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => commands::convert::run(args).map(|_| ExitCode::SUCCESS),
        Command::Generate(args) => commands::generate::run(args).map(|_| ExitCode::SUCCESS),
        Command::Validate(args) => commands::validate::run(args),
        Command::Tiers(args) => commands::tiers::run(args).map(|_| ExitCode::SUCCESS),
    }
}
