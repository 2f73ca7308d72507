use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use starcat_core::pipelines::DEFAULT_SEED;
use starcat_core::{generate_synthetic, GenerateRequest, TruncationMode};

use super::{print_written, tier_selection};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(short, long)]
    output_dir: PathBuf,
    /// Stars to generate; defaults to the largest tier
    #[arg(long)]
    count: Option<usize>,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    #[arg(long)]
    tiers: Option<PathBuf>,
    #[arg(long)]
    truncation: Option<TruncationMode>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let request = GenerateRequest {
        output_dir: args.output_dir,
        count: args.count,
        seed: args.seed,
        tiers: tier_selection(args.tiers),
        truncation: args.truncation,
    };

    let written = generate_synthetic(&request).context("failed to generate synthetic catalogs")?;
    print_written(&written);
    Ok(())
}
