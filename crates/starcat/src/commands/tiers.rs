use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use starcat_core::TruncationMode;
use starcat_parser::SourceFormat;

use super::tier_selection;

#[derive(Args, Debug)]
pub struct TiersArgs {
    /// fk5, hyg, sao or synthetic
    #[arg(long, default_value_t = SourceFormat::Hyg)]
    format: SourceFormat,
    #[arg(long)]
    tiers: Option<PathBuf>,
    #[arg(long)]
    truncation: Option<TruncationMode>,
}

pub fn run(args: TiersArgs) -> Result<()> {
    let config = tier_selection(args.tiers)
        .resolve(args.format)
        .context("failed to load tier configuration")?
        .with_truncation(args.truncation);

    print!("{}", config.to_toml_string()?);
    Ok(())
}
