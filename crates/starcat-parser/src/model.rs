use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RowError;
use crate::normalize::{round_hours, round_to};

/// Magnitude assigned to rows whose magnitude is unknown under
/// [`MagnitudePolicy::FaintSentinel`].
pub const FAINT_MAGNITUDE: f64 = 99.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleRole {
    RightAscension,
    Declination,
}

impl AngleRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleRole::RightAscension => "right ascension",
            AngleRole::Declination => "declination",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            AngleRole::RightAscension => "[0, 24) hours",
            AngleRole::Declination => "[-90, 90] degrees",
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match self {
            AngleRole::RightAscension => (0.0..24.0).contains(&value),
            AngleRole::Declination => (-90.0..=90.0).contains(&value),
        }
    }
}

impl fmt::Display for AngleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleEncoding {
    /// Whitespace separated `H M S` or `D M S` triplet.
    Sexagesimal,
    /// Decimal degrees. Right ascension is divided by 15.
    DecimalDegrees,
    /// Decimal hours, right ascension only.
    DecimalHours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MagnitudePolicy {
    /// Unparseable or blank magnitudes become [`FAINT_MAGNITUDE`].
    FaintSentinel,
    /// Unparseable or blank magnitudes drop the row.
    Reject,
}

impl MagnitudePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MagnitudePolicy::FaintSentinel => "faint-sentinel",
            MagnitudePolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for MagnitudePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MagnitudePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "faint-sentinel" | "sentinel" | "faint" => Ok(MagnitudePolicy::FaintSentinel),
            "reject" | "drop" => Ok(MagnitudePolicy::Reject),
            other => Err(format!("unknown magnitude policy '{other}'")),
        }
    }
}

/// Decimal places kept for each canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    pub ra: u32,
    pub dec: u32,
    pub mag: u32,
}

/// One step of a name fallback chain, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Proper(&'static str),
    CrossIdentifier(&'static str),
    Catalog {
        prefix: &'static str,
        column: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub column: &'static str,
    pub encoding: AngleEncoding,
}

/// Everything the shared normalizer needs to know about one source format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatDescriptor {
    pub format: SourceFormat,
    pub tag: &'static str,
    pub description: &'static str,
    pub source: &'static str,
    pub ra: ColumnSpec,
    pub dec: ColumnSpec,
    pub magnitude_column: &'static str,
    pub magnitude_policy: MagnitudePolicy,
    pub spectral_column: Option<&'static str>,
    pub id_column: Option<&'static str>,
    pub name_chain: &'static [NameField],
    pub precision: Precision,
}

impl FormatDescriptor {
    pub fn required_columns(&self) -> [&'static str; 3] {
        [self.ra.column, self.dec.column, self.magnitude_column]
    }

    pub fn with_magnitude_policy(mut self, policy: MagnitudePolicy) -> Self {
        self.magnitude_policy = policy;
        self
    }

    pub fn with_ra_encoding(mut self, encoding: AngleEncoding) -> Self {
        self.ra.encoding = encoding;
        self
    }
}

const FK5_DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: SourceFormat::Fk5CrossIndex,
    tag: "FK5",
    description: "FK5-SAO-HD Cross Index",
    source: "VizieR FK5-SAO-HD cross index (ASU pipe-delimited export)",
    ra: ColumnSpec {
        column: "RAJ2000",
        encoding: AngleEncoding::Sexagesimal,
    },
    dec: ColumnSpec {
        column: "DEJ2000",
        encoding: AngleEncoding::Sexagesimal,
    },
    magnitude_column: "Vmag",
    magnitude_policy: MagnitudePolicy::FaintSentinel,
    spectral_column: Some("Sp"),
    id_column: Some("FK5"),
    name_chain: &[
        NameField::Proper("name"),
        NameField::Catalog {
            prefix: "HD",
            column: "HD",
        },
        NameField::Catalog {
            prefix: "SAO",
            column: "SAO",
        },
    ],
    precision: Precision {
        ra: 6,
        dec: 5,
        mag: 2,
    },
};

const HYG_DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: SourceFormat::Hyg,
    tag: "HYG",
    description: "HYG Database",
    source: "https://github.com/astronexus/HYG-Database",
    ra: ColumnSpec {
        column: "ra",
        encoding: AngleEncoding::DecimalDegrees,
    },
    dec: ColumnSpec {
        column: "dec",
        encoding: AngleEncoding::DecimalDegrees,
    },
    magnitude_column: "mag",
    magnitude_policy: MagnitudePolicy::Reject,
    spectral_column: Some("spect"),
    id_column: Some("id"),
    name_chain: &[
        NameField::Proper("proper"),
        NameField::CrossIdentifier("bf"),
        NameField::Catalog {
            prefix: "HR",
            column: "hr",
        },
        NameField::Catalog {
            prefix: "HD",
            column: "hd",
        },
    ],
    precision: Precision {
        ra: 6,
        dec: 6,
        mag: 2,
    },
};

const SAO_DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: SourceFormat::SaoCsv,
    tag: "SAO",
    description: "SAO Star Catalog",
    source: "SAO-StarCatalog.csv",
    ra: ColumnSpec {
        column: "ra",
        encoding: AngleEncoding::DecimalDegrees,
    },
    dec: ColumnSpec {
        column: "dec",
        encoding: AngleEncoding::DecimalDegrees,
    },
    magnitude_column: "vmag",
    magnitude_policy: MagnitudePolicy::Reject,
    spectral_column: Some("class"),
    id_column: None,
    name_chain: &[
        NameField::Proper("name"),
        NameField::Catalog {
            prefix: "HD",
            column: "hd",
        },
    ],
    precision: Precision {
        ra: 4,
        dec: 2,
        mag: 1,
    },
};

const SYNTHETIC_DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: SourceFormat::Synthetic,
    tag: "Star",
    description: "Synthetic Star Field",
    source: "synthetic",
    ra: ColumnSpec {
        column: "ra",
        encoding: AngleEncoding::DecimalHours,
    },
    dec: ColumnSpec {
        column: "dec",
        encoding: AngleEncoding::DecimalDegrees,
    },
    magnitude_column: "mag",
    magnitude_policy: MagnitudePolicy::Reject,
    spectral_column: Some("spectralType"),
    id_column: None,
    name_chain: &[NameField::Proper("name")],
    precision: Precision {
        ra: 4,
        dec: 2,
        mag: 1,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    Fk5CrossIndex,
    Hyg,
    SaoCsv,
    Synthetic,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Fk5CrossIndex,
        SourceFormat::Hyg,
        SourceFormat::SaoCsv,
        SourceFormat::Synthetic,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SourceFormat::Fk5CrossIndex => "fk5",
            SourceFormat::Hyg => "hyg",
            SourceFormat::SaoCsv => "sao",
            SourceFormat::Synthetic => "synthetic",
        }
    }

    pub fn descriptor(&self) -> FormatDescriptor {
        match self {
            SourceFormat::Fk5CrossIndex => FK5_DESCRIPTOR,
            SourceFormat::Hyg => HYG_DESCRIPTOR,
            SourceFormat::SaoCsv => SAO_DESCRIPTOR,
            SourceFormat::Synthetic => SYNTHETIC_DESCRIPTOR,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fk5" | "fk5-cross-index" | "asu" => Ok(SourceFormat::Fk5CrossIndex),
            "hyg" => Ok(SourceFormat::Hyg),
            "sao" | "sao-csv" => Ok(SourceFormat::SaoCsv),
            "synthetic" => Ok(SourceFormat::Synthetic),
            other => Err(format!("unknown source format '{other}'")),
        }
    }
}

/// The canonical output unit: RA in hours, Dec in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalStarRecord {
    pub ra: f64,
    pub dec: f64,
    pub mag: f64,
    pub name: String,
    #[serde(
        rename = "spectralType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub spectral_type: Option<String>,
}

impl CanonicalStarRecord {
    /// The record as written out, at the format's output precision.
    pub fn rounded(&self, precision: Precision) -> Self {
        Self {
            ra: round_hours(self.ra, precision.ra),
            dec: round_to(self.dec, precision.dec),
            mag: round_to(self.mag, precision.mag),
            name: self.name.clone(),
            spectral_type: self.spectral_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: RowError,
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: Vec<SkippedRow>,
}

impl IngestReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn total_rows(&self) -> usize {
        self.accepted + self.skipped.len()
    }

    pub(crate) fn record(
        &mut self,
        line: usize,
        outcome: Result<CanonicalStarRecord, RowError>,
        records: &mut Vec<CanonicalStarRecord>,
    ) {
        match outcome {
            Ok(record) => {
                self.accepted += 1;
                records.push(record);
            }
            Err(reason) => self.skipped.push(SkippedRow { line, reason }),
        }
    }
}

/// One source parsed once, ready to be filtered into any number of tiers.
#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    pub descriptor: FormatDescriptor,
    pub records: Vec<CanonicalStarRecord>,
    pub report: IngestReport,
    pub seed: Option<u64>,
}

impl ParsedCatalog {
    pub fn format(&self) -> SourceFormat {
        self.descriptor.format
    }
}
