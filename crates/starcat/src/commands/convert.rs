use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use starcat_core::{convert_file, ConvertRequest, TruncationMode};
use starcat_parser::{AngleEncoding, MagnitudePolicy, ParseOptions, SourceFormat};

use super::{print_written, tier_selection};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Auto,
    Fk5,
    Hyg,
    Sao,
}

impl FormatArg {
    fn source_format(self) -> Option<SourceFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Fk5 => Some(SourceFormat::Fk5CrossIndex),
            FormatArg::Hyg => Some(SourceFormat::Hyg),
            FormatArg::Sao => Some(SourceFormat::SaoCsv),
        }
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source catalog file
    #[arg(short, long)]
    input: PathBuf,
    /// Directory receiving one JSON file per tier
    #[arg(short, long)]
    output_dir: PathBuf,
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,
    /// Tier configuration file (falls back to STARCAT_TIERS, then built-in tiers)
    #[arg(long)]
    tiers: Option<PathBuf>,
    /// after-sort or during-accumulation
    #[arg(long)]
    truncation: Option<TruncationMode>,
    /// faint-sentinel or reject; overrides the format's own policy
    #[arg(long)]
    magnitude_policy: Option<MagnitudePolicy>,
    /// Read decimal RA as hours instead of degrees
    #[arg(long)]
    ra_hours: bool,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let request = ConvertRequest {
        input: args.input.clone(),
        output_dir: args.output_dir,
        format: args.format.source_format(),
        options: ParseOptions {
            magnitude_policy: args.magnitude_policy,
            ra_encoding: args.ra_hours.then_some(AngleEncoding::DecimalHours),
        },
        tiers: tier_selection(args.tiers),
        truncation: args.truncation,
    };

    let written = convert_file(&request)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    print_written(&written);
    Ok(())
}
