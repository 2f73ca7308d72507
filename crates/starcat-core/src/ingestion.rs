use std::io;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use tracing::{debug, info, warn};

use starcat_parser::{
    parse_catalog_with, parser_for, IngestReport, ParseOptions, ParsedCatalog, SourceFormat,
};

use crate::error::{PipelineError, Result};

/// Skipped rows beyond this many are only logged at debug level.
const WARN_SKIPPED_ROWS: usize = 5;

/// Raw source text plus the hash recorded in output provenance.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub path: PathBuf,
    pub hash: String,
    pub content: String,
}

pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize().to_hex().to_string()
}

pub fn read_source(path: &Path) -> Result<SourceText> {
    let bytes = std::fs::read(path)?;
    let hash = compute_hash(&bytes);
    let content = String::from_utf8(bytes).map_err(|err| {
        PipelineError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{} is not valid UTF-8 (invalid byte at offset {})",
                path.display(),
                err.utf8_error().valid_up_to()
            ),
        ))
    })?;

    debug!(path = %path.display(), hash = %hash, bytes = content.len(), "Read source");
    Ok(SourceText {
        path: path.to_path_buf(),
        hash,
        content,
    })
}

/// Parses `source` as `format`, or detects the format when `format` is `None`.
pub fn parse_source(
    source: &SourceText,
    format: Option<SourceFormat>,
    options: &ParseOptions,
) -> Result<ParsedCatalog> {
    let parsed = match format {
        Some(format) => {
            let parser = parser_for(format, options).ok_or_else(|| {
                PipelineError::Config(format!("format '{format}' is generated, not parsed"))
            })?;
            debug!(parser = parser.name(), format = %parser.format(), "Using requested parser");
            parser.parse(&source.content)?
        }
        None => parse_catalog_with(&source.content, options)?,
    };

    log_ingest_report(&source.path.display().to_string(), parsed.format(), &parsed.report);
    Ok(parsed)
}

pub fn log_ingest_report(source: &str, format: SourceFormat, report: &IngestReport) {
    for (idx, skipped) in report.skipped.iter().enumerate() {
        if idx < WARN_SKIPPED_ROWS {
            warn!(source, line = skipped.line, reason = %skipped.reason, "Skipped source row");
        } else {
            debug!(source, line = skipped.line, reason = %skipped.reason, "Skipped source row");
        }
    }

    info!(
        source,
        format = %format,
        accepted = report.accepted,
        skipped = report.skipped_count(),
        "Parsed source"
    );
}
