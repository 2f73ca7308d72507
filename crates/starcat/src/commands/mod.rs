pub mod convert;
pub mod generate;
pub mod tiers;
pub mod validate;

use std::path::PathBuf;

use starcat_core::outputs::WrittenTier;
use starcat_core::TierSelection;

pub(crate) fn tier_selection(path: Option<PathBuf>) -> TierSelection {
    TierSelection::Discover { path }
}

pub(crate) fn print_written(written: &[WrittenTier]) {
    for tier in written {
        println!(
            "{}: {} stars -> {}",
            tier.label,
            tier.star_count,
            tier.path.display()
        );
    }
}
