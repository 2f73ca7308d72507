//! Tier configuration: which catalogs to cut from one parsed source.
//!
//! A configuration is a TOML document with an optional top level
//! `truncation` key and one `[[tier]]` table per output catalog. Every
//! source format has a built-in default set so a conversion runs without
//! any configuration file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use starcat_parser::SourceFormat;

use crate::error::{PipelineError, Result};
use crate::filter::{FilterPolicy, TruncationMode};
use crate::validation::{MAX_PLAUSIBLE_MAGNITUDE, MIN_PLAUSIBLE_MAGNITUDE};

/// Environment variable naming a tier configuration file.
pub const TIERS_ENV_VAR: &str = "STARCAT_TIERS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tier {
    pub label: String,
    pub file_name: String,
    #[serde(default)]
    pub description: String,
    pub max_magnitude: f64,
    /// `None` keeps every record under the magnitude ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
}

impl Tier {
    pub fn new(
        label: &str,
        file_name: &str,
        description: &str,
        max_magnitude: f64,
        max_count: Option<usize>,
    ) -> Self {
        Self {
            label: label.to_string(),
            file_name: file_name.to_string(),
            description: description.to_string(),
            max_magnitude,
            max_count,
        }
    }

    pub fn filter_policy(&self, truncation: TruncationMode) -> FilterPolicy {
        FilterPolicy {
            max_magnitude: self.max_magnitude,
            max_count: self.max_count,
            truncation,
        }
    }
}

/// Where a run takes its tiers from. Discovery needs the source format, which
/// is only known once the source has been parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum TierSelection {
    Discover { path: Option<PathBuf> },
    Explicit(TierConfig),
}

impl Default for TierSelection {
    fn default() -> Self {
        TierSelection::Discover { path: None }
    }
}

impl TierSelection {
    pub fn resolve(&self, format: SourceFormat) -> Result<TierConfig> {
        let config = match self {
            TierSelection::Discover { path } => TierConfig::discover(path.as_deref(), format)?,
            TierSelection::Explicit(config) => config.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    #[serde(default)]
    pub truncation: TruncationMode,
    #[serde(rename = "tier", default)]
    pub tiers: Vec<Tier>,
}

impl TierConfig {
    /// The tier sets the original per-format converters produced.
    pub fn defaults_for(format: SourceFormat) -> Self {
        let tiers = match format {
            SourceFormat::Fk5CrossIndex => vec![Tier::new(
                "sao_fk5",
                "stars_sao_fk5.json",
                "FK5-SAO-HD Cross Index",
                11.0,
                None,
            )],
            SourceFormat::Hyg => vec![
                Tier::new("1k", "stars_1k.json", "1,000 Brightest Stars", 4.5, Some(1_000)),
                Tier::new("5k", "stars_5k.json", "5,000 Bright Stars", 6.0, Some(5_000)),
                Tier::new("10k", "stars_10k.json", "10,000 Stars", 7.0, Some(10_000)),
                Tier::new("25k", "stars_25k.json", "25,000 Stars", 8.0, Some(25_000)),
                Tier::new("50k", "stars_50k.json", "50,000 Stars", 9.0, Some(50_000)),
                Tier::new("100k", "stars_100k.json", "100,000 Stars", 10.0, Some(100_000)),
                Tier::new("full", "stars_full.json", "Full HYG Catalog", 15.0, Some(200_000)),
            ],
            SourceFormat::SaoCsv => vec![Tier::new(
                "sao",
                "stars_sao.json",
                "SAO Star Catalog",
                15.0,
                None,
            )],
            SourceFormat::Synthetic => vec![
                Tier::new("1k", "stars_1k.json", "1,000 Synthetic Stars", 15.0, Some(1_000)),
                Tier::new("10k", "stars_10k.json", "10,000 Synthetic Stars", 15.0, Some(10_000)),
                Tier::new("100k", "stars_100k.json", "100,000 Synthetic Stars", 15.0, Some(100_000)),
            ],
        };

        Self {
            truncation: TruncationMode::default(),
            tiers,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TierConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|err| match err {
            PipelineError::Config(message) => {
                PipelineError::Config(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Picks the explicit file, then `STARCAT_TIERS`, then the format defaults.
    pub fn discover(explicit: Option<&Path>, format: SourceFormat) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "Loading tier configuration from flag");
            return Self::load(path);
        }

        match std::env::var(TIERS_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => {
                let path = PathBuf::from(value.trim());
                debug!(path = %path.display(), "Loading tier configuration from {TIERS_ENV_VAR}");
                Self::load(&path)
            }
            _ => {
                debug!(format = %format, "Using built-in tier configuration");
                Ok(Self::defaults_for(format))
            }
        }
    }

    pub fn with_truncation(mut self, truncation: Option<TruncationMode>) -> Self {
        if let Some(mode) = truncation {
            self.truncation = mode;
        }
        self
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Largest bounded tier, or `None` if any tier is unbounded.
    pub fn largest_count(&self) -> Option<usize> {
        let mut largest = 0;
        for tier in &self.tiers {
            largest = largest.max(tier.max_count?);
        }
        Some(largest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(PipelineError::Config(
                "at least one [[tier]] is required".to_string(),
            ));
        }

        let mut labels = HashSet::new();
        let mut file_names = HashSet::new();

        for tier in &self.tiers {
            if tier.label.trim().is_empty() {
                return Err(PipelineError::Config("tier label must not be empty".to_string()));
            }
            if tier.file_name.trim().is_empty() {
                return Err(PipelineError::Config(format!(
                    "tier '{}' has an empty file_name",
                    tier.label
                )));
            }
            if !labels.insert(tier.label.as_str()) {
                return Err(PipelineError::Config(format!(
                    "duplicate tier label '{}'",
                    tier.label
                )));
            }
            if !file_names.insert(tier.file_name.as_str()) {
                return Err(PipelineError::Config(format!(
                    "duplicate tier file_name '{}'",
                    tier.file_name
                )));
            }
            if !tier.max_magnitude.is_finite()
                || tier.max_magnitude < MIN_PLAUSIBLE_MAGNITUDE
                || tier.max_magnitude > MAX_PLAUSIBLE_MAGNITUDE
            {
                return Err(PipelineError::Config(format!(
                    "tier '{}' max_magnitude {} must lie within [{MIN_PLAUSIBLE_MAGNITUDE}, {MAX_PLAUSIBLE_MAGNITUDE}]",
                    tier.label, tier.max_magnitude
                )));
            }
            if tier.max_count == Some(0) {
                return Err(PipelineError::Config(format!(
                    "tier '{}' max_count must be at least 1",
                    tier.label
                )));
            }
        }

        Ok(())
    }
}
