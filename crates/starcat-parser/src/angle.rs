//! Conversion of source angle encodings into canonical decimal values.
//!
//! Right ascension always comes out in hours `[0, 24)` and declination in
//! degrees `[-90, 90]`. Anything that cannot be read, or that lands outside
//! the role's range, is an [`AngleError`]; nothing is clamped or zeroed.

use std::fmt;

use crate::errors::AngleError;
use crate::model::{AngleEncoding, AngleRole};

const DEGREES_PER_HOUR: f64 = 15.0;

pub fn parse_angle(
    raw: &str,
    role: AngleRole,
    encoding: AngleEncoding,
) -> Result<f64, AngleError> {
    let cleaned = raw.trim().trim_matches('"').trim();
    if cleaned.is_empty() {
        return Err(AngleError::Empty { role });
    }

    let value = match encoding {
        AngleEncoding::Sexagesimal => parse_sexagesimal(cleaned, role)?,
        AngleEncoding::DecimalDegrees => {
            let degrees = parse_number(cleaned, role)?;
            match role {
                AngleRole::RightAscension => degrees / DEGREES_PER_HOUR,
                AngleRole::Declination => degrees,
            }
        }
        // Declination has no hour form; it passes through as degrees.
        AngleEncoding::DecimalHours => parse_number(cleaned, role)?,
    };

    // Collapse -0.0 so a zero angle always serializes the same way.
    let value = if value == 0.0 { 0.0 } else { value };

    if !role.contains(value) {
        return Err(AngleError::OutOfRange {
            role,
            value,
            range: role.range_label(),
        });
    }

    Ok(value)
}

fn parse_sexagesimal(cleaned: &str, role: AngleRole) -> Result<f64, AngleError> {
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(AngleError::NotTriplet {
            role,
            raw: cleaned.to_string(),
            found: tokens.len(),
        });
    }

    let first = parse_number(tokens[0], role)?;
    let minutes = parse_component(tokens[1], role)?;
    let seconds = parse_component(tokens[2], role)?;

    let magnitude = first.abs() + minutes / 60.0 + seconds / 3600.0;
    let negative = first.is_sign_negative() || cleaned.starts_with('-');

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_component(token: &str, role: AngleRole) -> Result<f64, AngleError> {
    if token.starts_with('-') || token.starts_with('+') {
        return Err(AngleError::SignedComponent {
            role,
            token: token.to_string(),
        });
    }
    parse_number(token, role)
}

fn parse_number(token: &str, role: AngleRole) -> Result<f64, AngleError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AngleError::NotNumeric {
            role,
            token: token.to_string(),
        }),
    }
}

/// A decimal angle split back into whole units, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub whole: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Sexagesimal {
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.whole as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{sign}{:02} {:02} {:06.3}",
            self.whole, self.minutes, self.seconds
        )
    }
}

pub fn to_sexagesimal(value: f64) -> Sexagesimal {
    let total_seconds = value.abs() * 3600.0;
    let whole = (total_seconds / 3600.0).floor();
    let remainder = total_seconds - whole * 3600.0;
    let minutes = (remainder / 60.0).floor();
    let seconds = remainder - minutes * 60.0;

    Sexagesimal {
        negative: value < 0.0,
        whole: whole as u32,
        minutes: minutes as u32,
        seconds,
    }
}
