pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod ingestion;
pub mod outputs;
pub mod pipelines;
pub mod validation;

pub use builder::{CatalogBuilder, TierOutput};
pub use config::{Tier, TierConfig, TierSelection, TIERS_ENV_VAR};
pub use document::{CatalogDocument, GenerationParameters};
pub use error::{PipelineError, Result};
pub use filter::{filter_and_sort, FilterOutcome, FilterPolicy, TruncationMode};
pub use pipelines::{convert_file, generate_synthetic, ConvertRequest, GenerateRequest};
pub use validation::{validate, validate_file, validate_str, Severity, ValidationReport};
