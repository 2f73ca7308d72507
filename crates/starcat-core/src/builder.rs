use tracing::{debug, info};

use starcat_parser::ParsedCatalog;

use crate::config::{Tier, TierConfig};
use crate::document::{CatalogDocument, GenerationParameters};
use crate::filter::{filter_and_sort, TruncationMode};

#[derive(Debug, Clone)]
pub struct TierOutput {
    pub tier: Tier,
    pub document: CatalogDocument,
}

/// Cuts any number of tiers from one parsed source. The source is parsed
/// once; every tier filters the same record set.
pub struct CatalogBuilder<'a> {
    parsed: &'a ParsedCatalog,
    source_hash: Option<String>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(parsed: &'a ParsedCatalog) -> Self {
        Self {
            parsed,
            source_hash: None,
        }
    }

    pub fn with_source_hash(mut self, hash: impl Into<String>) -> Self {
        self.source_hash = Some(hash.into());
        self
    }

    pub fn build_tier(&self, tier: &Tier, truncation: TruncationMode) -> CatalogDocument {
        let descriptor = &self.parsed.descriptor;
        // Filtering sees full precision so rounding cannot push a star onto the origin.
        let outcome = filter_and_sort(&self.parsed.records, &tier.filter_policy(truncation));

        debug!(
            tier = %tier.label,
            kept = outcome.records.len(),
            at_origin = outcome.dropped_at_origin,
            too_faint = outcome.dropped_too_faint,
            over_count = outcome.dropped_over_count,
            "Filtered tier"
        );

        CatalogDocument {
            catalog: format!(
                "{} (magnitude ≤ {})",
                descriptor.description, tier.max_magnitude
            ),
            source: descriptor.source.to_string(),
            source_hash: self.source_hash.clone(),
            star_count: outcome.records.len(),
            parameters: GenerationParameters {
                format: descriptor.format,
                tier: tier.label.clone(),
                max_magnitude: tier.max_magnitude,
                max_count: tier.max_count,
                truncation,
                magnitude_policy: descriptor.magnitude_policy,
                seed: self.parsed.seed,
            },
            objects: outcome
                .records
                .iter()
                .map(|record| record.rounded(descriptor.precision))
                .collect(),
        }
    }

    pub fn build_all(&self, config: &TierConfig) -> Vec<TierOutput> {
        config
            .tiers
            .iter()
            .map(|tier| {
                let document = self.build_tier(tier, config.truncation);
                info!(
                    tier = %tier.label,
                    stars = document.star_count,
                    "Built tier"
                );
                TierOutput {
                    tier: tier.clone(),
                    document,
                }
            })
            .collect()
    }
}
