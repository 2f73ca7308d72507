use serde::{Deserialize, Serialize};

use starcat_parser::{CanonicalStarRecord, MagnitudePolicy, SourceFormat};

use crate::filter::TruncationMode;

/// How a tier was cut, recorded so a catalog can be regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub format: SourceFormat,
    pub tier: String,
    pub max_magnitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    pub truncation: TruncationMode,
    pub magnitude_policy: MagnitudePolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// The persisted catalog. `objects` is serialized last and is always
/// ordered brightest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub catalog: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    pub star_count: usize,
    pub parameters: GenerationParameters,
    pub objects: Vec<CanonicalStarRecord>,
}
