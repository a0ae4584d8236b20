//! Cross-checking a parsed chart against itself and its directory

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::language::{Chart, ChartModel};

mod checks;
mod errors;

pub use checks::{expected_beat, BEAT_TOLERANCE};
pub use errors::*;

/// What the validator knows about the filesystem: which paths exist.
pub trait Listing {
    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem.
pub struct Disk;

impl Listing for Disk {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A fixed set of paths, standing in for a directory listing.
impl Listing for BTreeSet<PathBuf> {
    fn exists(&self, path: &Path) -> bool {
        self.contains(path)
    }
}

/// Run every check on the model and return the first problem found.
pub fn validate(model: &ChartModel, listing: &impl Listing) -> Result<(), ValidationError> {
    match validate_with_recovery(model, listing) {
        Ok(()) => Ok(()),
        Err(mut problems) => Err(problems.remove(0)),
    }
}

/// Run every check on the model and return all problems found, in check
/// order.
pub fn validate_with_recovery(
    model: &ChartModel,
    listing: &impl Listing,
) -> Result<(), Vec<ValidationError>> {
    debug!("Validating {}", model.filename.display());
    let problems = checks::check_model(model, listing);

    if problems.is_empty() {
        Ok(())
    } else {
        debug!("problems: {}", problems.len());
        Err(problems)
    }
}

/// As validate(), and additionally check the audio and video resolved when
/// the chart was parsed.
pub fn validate_chart(chart: &Chart, listing: &impl Listing) -> Result<(), ValidationError> {
    match validate_chart_with_recovery(chart, listing) {
        Ok(()) => Ok(()),
        Err(mut problems) => Err(problems.remove(0)),
    }
}

pub fn validate_chart_with_recovery(
    chart: &Chart,
    listing: &impl Listing,
) -> Result<(), Vec<ValidationError>> {
    let problems = checks::check_chart(chart, listing);

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
