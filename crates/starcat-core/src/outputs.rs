use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::builder::TierOutput;
use crate::document::CatalogDocument;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenTier {
    pub label: String,
    pub path: PathBuf,
    pub star_count: usize,
}

/// Writes pretty-printed JSON, replacing any existing file.
pub fn write_document(path: &Path, document: &CatalogDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn write_tiers(output_dir: &Path, outputs: &[TierOutput]) -> Result<Vec<WrittenTier>> {
    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = output_dir.join(&output.tier.file_name);
        write_document(&path, &output.document)?;
        info!(
            tier = %output.tier.label,
            path = %path.display(),
            stars = output.document.star_count,
            "Wrote catalog"
        );
        written.push(WrittenTier {
            label: output.tier.label.clone(),
            path,
            star_count: output.document.star_count,
        });
    }
    Ok(written)
}
