use std::fmt;

use thiserror::Error;

use crate::model::AngleRole;

#[derive(Debug, Clone)]
pub struct ParserAttempt {
    pub parser: &'static str,
    pub message: String,
}

impl ParserAttempt {
    pub fn new(parser: &'static str, message: impl Into<String>) -> Self {
        Self {
            parser,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParserAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parser, self.message)
    }
}

/// Failures that reject an entire source document.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{parser} format mismatch: {reason}")]
    FormatMismatch {
        parser: &'static str,
        reason: String,
    },

    #[error("{parser} header is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        parser: &'static str,
        columns: Vec<&'static str>,
    },

    #[error("{parser} CSV error: {source}")]
    Csv {
        parser: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{parser} source did not contain any data rows")]
    EmptyData { parser: &'static str },

    #[error("{parser} generator configuration invalid: {message}")]
    Generator {
        parser: &'static str,
        message: String,
    },

    #[error("no parser recognized this source; attempts: {attempts:?}")]
    NoMatchingParser { attempts: Vec<ParserAttempt> },
}

/// Coordinate parse failures. The parser never clamps or defaults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AngleError {
    #[error("{role} is empty")]
    Empty { role: AngleRole },

    #[error("{role} '{raw}' must have exactly three components, found {found}")]
    NotTriplet {
        role: AngleRole,
        raw: String,
        found: usize,
    },

    #[error("{role} component '{token}' is not numeric")]
    NotNumeric { role: AngleRole, token: String },

    #[error("{role} component '{token}' must not carry its own sign")]
    SignedComponent { role: AngleRole, token: String },

    #[error("{role} value {value} is outside {range}")]
    OutOfRange {
        role: AngleRole,
        value: f64,
        range: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MagnitudeError {
    #[error("magnitude is missing")]
    Missing,

    #[error("magnitude '{raw}' is not a finite number")]
    NotNumeric { raw: String },
}

/// Failures that drop a single source row. Counted and reported, never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("expected at least {expected} fields but found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column '{column}' is missing or empty")]
    MissingField { column: &'static str },

    #[error("column '{column}': {source}")]
    Coordinate {
        column: &'static str,
        #[source]
        source: AngleError,
    },

    #[error("column '{column}': {source}")]
    Magnitude {
        column: &'static str,
        #[source]
        source: MagnitudeError,
    },

    #[error("unreadable row: {message}")]
    Malformed { message: String },
}
