use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::errors::ParserError;
use crate::model::{CanonicalStarRecord, IngestReport, ParsedCatalog, SourceFormat};
use crate::normalize::{resolve_name, spectral_class};

const GREEK_PREFIXES: [&str; 16] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi",
];

const CONSTELLATIONS: [&str; 26] = [
    "Andromedae",
    "Aquarii",
    "Arietis",
    "Bootis",
    "Cancri",
    "Capricorni",
    "Cassiopeiae",
    "Centauri",
    "Cephei",
    "Ceti",
    "Cygni",
    "Draconis",
    "Geminorum",
    "Leonis",
    "Librae",
    "Lyrae",
    "Orionis",
    "Pegasi",
    "Persei",
    "Piscium",
    "Sagittarii",
    "Scorpii",
    "Tauri",
    "Ursae Majoris",
    "Ursae Minoris",
    "Virginis",
];

// Hot classes are rare, cool dwarfs dominate.
const SPECTRAL_TYPES: [&str; 13] = [
    "O5", "B0", "B5", "A0", "A5", "F0", "F5", "G0", "G5", "K0", "K5", "M0", "M5",
];
const SPECTRAL_WEIGHTS: [f64; 13] = [
    0.00003, 0.13, 0.6, 3.0, 7.6, 12.1, 23.4, 100.0, 76.5, 121.0, 850.0, 234.0, 1000.0,
];

const MAGNITUDE_MEAN: f64 = 4.0;
const MAGNITUDE_STD_DEV: f64 = 1.5;
const MAGNITUDE_RANGE: (f64, f64) = (-1.5, 6.5);
const NAMED_FRACTION: f64 = 0.3;

/// Seeded generator of plausible-looking star fields for load testing the
/// downstream renderer. Identical `(count, seed)` produce identical records.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticGenerator {
    count: usize,
    seed: u64,
}

impl SyntheticGenerator {
    const NAME: &'static str = "SYNTHETIC";

    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }

    pub fn generate(&self) -> Result<ParsedCatalog, ParserError> {
        if self.count == 0 {
            return Err(ParserError::Generator {
                parser: Self::NAME,
                message: "star count must be at least 1".to_string(),
            });
        }

        let descriptor = SourceFormat::Synthetic.descriptor();
        let magnitude = Normal::new(MAGNITUDE_MEAN, MAGNITUDE_STD_DEV).map_err(|err| {
            ParserError::Generator {
                parser: Self::NAME,
                message: format!("invalid magnitude distribution: {err}"),
            }
        })?;
        let spectral = WeightedIndex::new(SPECTRAL_WEIGHTS).map_err(|err| ParserError::Generator {
            parser: Self::NAME,
            message: format!("invalid spectral weights: {err}"),
        })?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut records = Vec::with_capacity(self.count);

        for index in 1..=self.count {
            let ra: f64 = rng.gen_range(0.0..24.0);
            // Uniform on the sphere: sin(dec) is uniform.
            let dec = rng.gen_range(-1.0f64..=1.0).asin().to_degrees();
            let mag = magnitude
                .sample(&mut rng)
                .clamp(MAGNITUDE_RANGE.0, MAGNITUDE_RANGE.1);

            let raw_name = if rng.gen_bool(NAMED_FRACTION) {
                let prefix = GREEK_PREFIXES[rng.gen_range(0..GREEK_PREFIXES.len())];
                let constellation = CONSTELLATIONS[rng.gen_range(0..CONSTELLATIONS.len())];
                format!("{prefix} {constellation} {index}")
            } else {
                format!("Star {index}")
            };
            let raw_spectral = SPECTRAL_TYPES[spectral.sample(&mut rng)];

            let row = [("name", raw_name.as_str())];
            let name = resolve_name(
                descriptor.name_chain,
                &row[..],
                descriptor.tag,
                &index.to_string(),
            );

            records.push(CanonicalStarRecord {
                ra,
                dec,
                mag,
                name,
                spectral_type: spectral_class(raw_spectral),
            });
        }

        let report = IngestReport {
            accepted: records.len(),
            skipped: Vec::new(),
        };

        Ok(ParsedCatalog {
            descriptor,
            records,
            report,
            seed: Some(self.seed),
        })
    }
}
