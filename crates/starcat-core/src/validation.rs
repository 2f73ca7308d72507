//! Read-only QA of a serialized catalog document.
//!
//! The validator works on raw JSON rather than [`crate::CatalogDocument`] so
//! that documents from any producer can be checked and every structural
//! problem becomes an issue instead of a deserialization failure.

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;

pub const MIN_PLAUSIBLE_MAGNITUDE: f64 = -2.0;
pub const MAX_PLAUSIBLE_MAGNITUDE: f64 = 15.0;

/// Prominent stars whose absence hints that a conversion lost rows.
pub const REFERENCE_STARS: [&str; 10] = [
    "SIRIUS",
    "VEGA",
    "ARCTURUS",
    "CAPELLA",
    "RIGEL",
    "PROCYON",
    "BETELGEUSE",
    "POLARIS",
    "ANTARES",
    "DENEB",
];

const REQUIRED_NUMERIC: [&str; 3] = ["ra", "dec", "mag"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Index into `objects`, when the issue concerns one record.
    pub index: Option<usize>,
    pub message: String,
}

impl ValidationIssue {
    fn error(index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            index,
            message: message.into(),
        }
    }

    fn warning(index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            index,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}: star {index}: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStatistics {
    pub total: usize,
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
    pub with_name: usize,
    pub with_spectral_type: usize,
    pub with_sao: usize,
    pub with_hd: usize,
    pub with_fk5: usize,
    /// Reference stars found, in [`REFERENCE_STARS`] order.
    pub reference_stars: Vec<&'static str>,
}

impl CatalogStatistics {
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total as f64
        }
    }

    pub fn missing_reference_stars(&self) -> Vec<&'static str> {
        REFERENCE_STARS
            .iter()
            .copied()
            .filter(|star| !self.reference_stars.contains(star))
            .collect()
    }

    fn observe_magnitude(&mut self, mag: f64) {
        self.min_magnitude = Some(self.min_magnitude.map_or(mag, |min| min.min(mag)));
        self.max_magnitude = Some(self.max_magnitude.map_or(mag, |max| max.max(mag)));
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub statistics: CatalogStatistics,
}

impl ValidationReport {
    /// Warnings are advisory; only errors fail a document.
    pub fn passed(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

pub fn validate(document: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(root) = document.as_object() else {
        report
            .issues
            .push(ValidationIssue::error(None, "document is not a JSON object"));
        return report;
    };

    let objects = match root.get("objects") {
        None => {
            report
                .issues
                .push(ValidationIssue::error(None, "missing 'objects' key"));
            return report;
        }
        Some(Value::Array(objects)) => objects,
        Some(_) => {
            report
                .issues
                .push(ValidationIssue::error(None, "'objects' is not an array"));
            return report;
        }
    };

    // An empty tier is a legitimate build result; `statistics.total` reports it.
    report.statistics.total = objects.len();

    let mut previous_mag: Option<f64> = None;
    let mut order_reported = false;

    for (index, value) in objects.iter().enumerate() {
        let Some(star) = value.as_object() else {
            report
                .issues
                .push(ValidationIssue::error(Some(index), "record is not a JSON object"));
            continue;
        };

        check_star(index, star, &mut report);

        if let Some(mag) = star.get("mag").and_then(Value::as_f64) {
            report.statistics.observe_magnitude(mag);
            if !order_reported && previous_mag.is_some_and(|previous| mag < previous) {
                report.issues.push(ValidationIssue::warning(
                    Some(index),
                    "records are not ordered by magnitude",
                ));
                order_reported = true;
            }
            previous_mag = Some(mag);
        }
    }

    report
        .statistics
        .reference_stars
        .sort_by_key(|star| REFERENCE_STARS.iter().position(|reference| reference == star));
    report
}

pub fn validate_str(content: &str) -> ValidationReport {
    match serde_json::from_str::<Value>(content) {
        Ok(document) => validate(&document),
        Err(err) => ValidationReport {
            issues: vec![ValidationIssue::error(
                None,
                format!("document is not valid JSON: {err}"),
            )],
            statistics: CatalogStatistics::default(),
        },
    }
}

/// Only an unreadable file is an `Err`; everything else is an issue.
pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let content = std::fs::read_to_string(path)?;
    Ok(validate_str(&content))
}

fn check_star(index: usize, star: &Map<String, Value>, report: &mut ValidationReport) {
    for field in REQUIRED_NUMERIC {
        match star.get(field) {
            None => report.issues.push(ValidationIssue::error(
                Some(index),
                format!("missing required field '{field}'"),
            )),
            Some(value) if value.as_f64().is_none() => report.issues.push(ValidationIssue::error(
                Some(index),
                format!("field '{field}' is not numeric"),
            )),
            Some(_) => {}
        }
    }

    if let Some(ra) = star.get("ra").and_then(Value::as_f64) {
        if !(0.0..24.0).contains(&ra) {
            report.issues.push(ValidationIssue::error(
                Some(index),
                format!("RA out of range: {ra}"),
            ));
        }
    }

    if let Some(dec) = star.get("dec").and_then(Value::as_f64) {
        if !(-90.0..=90.0).contains(&dec) {
            report.issues.push(ValidationIssue::error(
                Some(index),
                format!("Dec out of range: {dec}"),
            ));
        }
    }

    if let Some(mag) = star.get("mag").and_then(Value::as_f64) {
        if !(MIN_PLAUSIBLE_MAGNITUDE..=MAX_PLAUSIBLE_MAGNITUDE).contains(&mag) {
            report.issues.push(ValidationIssue::warning(
                Some(index),
                format!("magnitude suspicious: {mag}"),
            ));
        }
    }

    let stats = &mut report.statistics;
    match star.get("name") {
        None => report.issues.push(ValidationIssue::error(
            Some(index),
            "missing required field 'name'",
        )),
        Some(Value::String(name)) if !name.trim().is_empty() => {
            stats.with_name += 1;
            let upper = name.to_uppercase();
            for reference in REFERENCE_STARS {
                if upper.contains(reference) && !stats.reference_stars.contains(&reference) {
                    stats.reference_stars.push(reference);
                }
            }
        }
        Some(Value::String(_)) => report
            .issues
            .push(ValidationIssue::error(Some(index), "name is empty")),
        Some(_) => report
            .issues
            .push(ValidationIssue::error(Some(index), "name is not a string")),
    }

    match star.get("spectralType") {
        None => {}
        Some(Value::String(_)) => report.statistics.with_spectral_type += 1,
        Some(_) => report.issues.push(ValidationIssue::warning(
            Some(index),
            "spectralType is not a string",
        )),
    }

    let stats = &mut report.statistics;
    if star.contains_key("sao") {
        stats.with_sao += 1;
    }
    if star.contains_key("hd") {
        stats.with_hd += 1;
    }
    if star.contains_key("fk5") {
        stats.with_fk5 += 1;
    }
}
