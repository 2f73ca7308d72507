//! Derivation of canonical fields from inconsistently populated source columns.

use crate::angle::parse_angle;
use crate::errors::{MagnitudeError, RowError};
use crate::model::{
    AngleRole, CanonicalStarRecord, FormatDescriptor, MagnitudePolicy, NameField, FAINT_MAGNITUDE,
};

const SPECTRAL_CLASSES: [char; 7] = ['O', 'B', 'A', 'F', 'G', 'K', 'M'];

/// Classification values some catalogs use to mean "no spectral data".
const NO_CLASSIFICATION: &[&str] = &["STAR"];

/// Read access to one source row by column name.
pub trait RowView {
    fn field(&self, column: &str) -> Option<&str>;
}

/// Upper-cases a name and collapses whitespace runs. Blank input yields `None`.
pub fn clean_name(raw: &str) -> Option<String> {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Walks the fallback chain and returns the first non-empty candidate,
/// falling back to `"<tag> <record_id>"`.
pub fn resolve_name<R>(chain: &[NameField], row: &R, tag: &str, record_id: &str) -> String
where
    R: RowView + ?Sized,
{
    for field in chain {
        let candidate = match field {
            NameField::Proper(column) | NameField::CrossIdentifier(column) => {
                row.field(column).and_then(clean_name)
            }
            NameField::Catalog { prefix, column } => row
                .field(column)
                .map(str::trim)
                .filter(|number| !number.is_empty())
                .and_then(|number| clean_name(&format!("{prefix}{number}"))),
        };
        if let Some(name) = candidate {
            return name;
        }
    }

    clean_name(&format!("{tag} {record_id}")).unwrap_or_else(|| tag.to_uppercase())
}

pub fn parse_magnitude(raw: Option<&str>, policy: MagnitudePolicy) -> Result<f64, MagnitudeError> {
    let parsed = match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Err(MagnitudeError::Missing),
        Some(value) => match value.parse::<f64>() {
            Ok(mag) if mag.is_finite() => Ok(mag),
            _ => Err(MagnitudeError::NotNumeric {
                raw: value.to_string(),
            }),
        },
    };

    match (parsed, policy) {
        (Ok(mag), _) => Ok(mag),
        (Err(_), MagnitudePolicy::FaintSentinel) => Ok(FAINT_MAGNITUDE),
        (Err(err), MagnitudePolicy::Reject) => Err(err),
    }
}

/// Longest prefix of one class letter followed by at most two digits.
pub fn spectral_class(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || NO_CLASSIFICATION
            .iter()
            .any(|word| trimmed.eq_ignore_ascii_case(word))
    {
        return None;
    }

    let mut chars = trimmed.chars();
    let letter = chars.next().filter(|c| SPECTRAL_CLASSES.contains(c))?;
    let digits: String = chars.take_while(|c| c.is_ascii_digit()).take(2).collect();
    Some(format!("{letter}{digits}"))
}

pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Rounds right ascension, wrapping a value that rounds up to 24h back to 0h.
pub fn round_hours(value: f64, places: u32) -> f64 {
    let rounded = round_to(value, places);
    if rounded >= 24.0 {
        0.0
    } else {
        rounded
    }
}

/// Turns one source row into a canonical record, or explains why it cannot be.
pub fn normalize_row<R>(
    descriptor: &FormatDescriptor,
    row: &R,
    line: usize,
) -> Result<CanonicalStarRecord, RowError>
where
    R: RowView + ?Sized,
{
    let ra_column = descriptor.ra.column;
    let ra = parse_angle(
        required(row, ra_column)?,
        AngleRole::RightAscension,
        descriptor.ra.encoding,
    )
    .map_err(|source| RowError::Coordinate {
        column: ra_column,
        source,
    })?;

    let dec_column = descriptor.dec.column;
    let dec = parse_angle(
        required(row, dec_column)?,
        AngleRole::Declination,
        descriptor.dec.encoding,
    )
    .map_err(|source| RowError::Coordinate {
        column: dec_column,
        source,
    })?;

    let mag_column = descriptor.magnitude_column;
    let mag = parse_magnitude(row.field(mag_column), descriptor.magnitude_policy).map_err(
        |source| RowError::Magnitude {
            column: mag_column,
            source,
        },
    )?;

    let spectral_type = descriptor
        .spectral_column
        .and_then(|column| row.field(column))
        .and_then(spectral_class);

    let record_id = descriptor
        .id_column
        .and_then(|column| row.field(column))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| line.to_string());
    let name = resolve_name(descriptor.name_chain, row, descriptor.tag, &record_id);

    Ok(CanonicalStarRecord {
        ra,
        dec,
        mag,
        name,
        spectral_type,
    })
}

fn required<'r, R>(row: &'r R, column: &'static str) -> Result<&'r str, RowError>
where
    R: RowView + ?Sized,
{
    row.field(column).ok_or(RowError::MissingField { column })
}

impl<'a> RowView for [(&'a str, &'a str)] {
    fn field(&self, column: &str) -> Option<&str> {
        self.iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| *value)
    }
}
