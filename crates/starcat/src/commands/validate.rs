use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::Table;
use tracing::info;

use starcat_core::validation::REFERENCE_STARS;
use starcat_core::{validate_file, ValidationReport};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog files or glob patterns
    #[arg(required = true)]
    paths: Vec<String>,
}

pub fn run(args: ValidateArgs) -> Result<ExitCode> {
    let files = expand_paths(&args.paths)?;

    let mut failed = 0;
    for path in &files {
        let report = validate_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        print_report(path, &report);
        info!(
            path = %path.display(),
            passed = report.passed(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Validated catalog"
        );
        if !report.passed() {
            failed += 1;
        }
    }

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{failed} of {} catalogs failed validation", files.len());
        Ok(ExitCode::FAILURE)
    }
}

fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let literal = Path::new(pattern);
        if literal.exists() {
            files.push(literal.to_path_buf());
            continue;
        }

        let before = files.len();
        for entry in glob::glob(pattern).with_context(|| format!("invalid pattern '{pattern}'"))? {
            let path = entry.with_context(|| format!("could not read a match of '{pattern}'"))?;
            if path.is_file() {
                files.push(path);
            }
        }
        if files.len() == before {
            bail!("no catalog files match '{pattern}'");
        }
    }
    Ok(files)
}

fn print_report(path: &Path, report: &ValidationReport) {
    let stats = &report.statistics;

    println!("Validating {}", path.display());
    println!("Total stars: {}", stats.total);
    if stats.total == 0 {
        println!("  note: catalog contains no stars");
    }

    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Stars", "Share"]);
    let magnitude_range = match (stats.min_magnitude, stats.max_magnitude) {
        (Some(min), Some(max)) => format!("{min:.2} to {max:.2}"),
        _ => "n/a".to_string(),
    };
    table.add_row(vec!["Magnitude range".to_string(), magnitude_range, String::new()]);
    for (label, count) in [
        ("With names", stats.with_name),
        ("With spectral types", stats.with_spectral_type),
        ("With SAO numbers", stats.with_sao),
        ("With HD numbers", stats.with_hd),
        ("With FK5 numbers", stats.with_fk5),
    ] {
        table.add_row(vec![
            label.to_string(),
            count.to_string(),
            format!("{:.1}%", stats.percentage(count)),
        ]);
    }
    println!("{table}");

    println!(
        "Reference stars found: {}/{}: {}",
        stats.reference_stars.len(),
        REFERENCE_STARS.len(),
        stats.reference_stars.join(", ")
    );

    for issue in &report.issues {
        println!("  {issue}");
    }

    if report.passed() {
        println!("PASSED ({} warnings)\n", report.warning_count());
    } else {
        println!(
            "FAILED ({} errors, {} warnings)\n",
            report.error_count(),
            report.warning_count()
        );
    }
}
