use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use starcat_parser::CanonicalStarRecord;

/// Where the record-count cap is applied relative to the magnitude sort.
///
/// `AfterSort` keeps the `max_count` brightest records that pass the
/// magnitude ceiling. `DuringAccumulation` keeps the first `max_count`
/// passing records in source order and only then sorts them, so the result
/// depends on how the source happens to be ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TruncationMode {
    #[default]
    AfterSort,
    DuringAccumulation,
}

impl TruncationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruncationMode::AfterSort => "after-sort",
            TruncationMode::DuringAccumulation => "during-accumulation",
        }
    }
}

impl fmt::Display for TruncationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TruncationMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "after-sort" => Ok(TruncationMode::AfterSort),
            "during-accumulation" => Ok(TruncationMode::DuringAccumulation),
            other => Err(format!("unknown truncation mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPolicy {
    pub max_magnitude: f64,
    pub max_count: Option<usize>,
    pub truncation: TruncationMode,
}

#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub records: Vec<CanonicalStarRecord>,
    pub dropped_at_origin: usize,
    pub dropped_too_faint: usize,
    pub dropped_over_count: usize,
}

fn at_origin(record: &CanonicalStarRecord) -> bool {
    record.ra == 0.0 && record.dec == 0.0
}

/// Applies the validity gate, magnitude ceiling and count cap, returning the
/// survivors ordered brightest first. Equal magnitudes keep input order.
pub fn filter_and_sort(records: &[CanonicalStarRecord], policy: &FilterPolicy) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut kept = Vec::new();

    for record in records {
        if at_origin(record) {
            outcome.dropped_at_origin += 1;
            continue;
        }
        if record.mag > policy.max_magnitude {
            outcome.dropped_too_faint += 1;
            continue;
        }
        if policy.truncation == TruncationMode::DuringAccumulation
            && policy.max_count.is_some_and(|cap| kept.len() >= cap)
        {
            outcome.dropped_over_count += 1;
            continue;
        }
        kept.push(record.clone());
    }

    // `sort_by` is stable, which the equal-magnitude ordering relies on.
    kept.sort_by(|a, b| a.mag.total_cmp(&b.mag));

    if let Some(cap) = policy.max_count {
        if kept.len() > cap {
            outcome.dropped_over_count += kept.len() - cap;
            kept.truncate(cap);
        }
    }

    outcome.records = kept;
    outcome
}
