//! The individual checks, applied in a fixed order so that the first
//! problem reported for a given chart is always the same one.

use std::path::Path;
use tracing::debug;

use crate::language::{Chart, ChartModel};

use super::{Companion, Listing, Reference, ValidationError};

/// A background change this far or further from the beat implied by the
/// offset is reported. Anything closer is rounding.
pub const BEAT_TOLERANCE: f64 = 1.0;

pub fn check_model(model: &ChartModel, listing: &impl Listing) -> Vec<ValidationError> {
    let mut problems = Vec::new();
    let directory = model.directory();

    if !listing.exists(&model.filename) {
        problems.push(ValidationError::ChartMissing(
            model
                .filename
                .clone(),
        ));
    }

    check_required(Reference::Banner, &model.banner, directory, listing, &mut problems);
    check_required(Reference::Background, &model.background, directory, listing, &mut problems);
    if let Some(jacket) = &model.jacket {
        check_required(Reference::Jacket, jacket, directory, listing, &mut problems);
    }

    check_optional(Reference::CdTitle, &model.cd_title, directory, listing, &mut problems);
    check_optional(Reference::LyricsPath, &model.lyrics_path, directory, listing, &mut problems);

    check_offset(model, &mut problems);
    check_background_change(model, &mut problems);

    if !model
        .unknown
        .is_empty()
    {
        problems.push(ValidationError::UnknownDirectives(
            model
                .unknown
                .clone(),
        ));
    }

    problems
}

/// The model checks followed by the media resolved for the chart: audio has
/// to have been found and has to exist; video is optional but has to exist
/// if one was named or found.
pub fn check_chart(chart: &Chart, listing: &impl Listing) -> Vec<ValidationError> {
    let mut problems = check_model(&chart.model, listing);

    match &chart.audio {
        None => problems.push(ValidationError::CompanionNotFound(Companion::Audio)),
        Some(path) if !listing.exists(path) => {
            problems.push(ValidationError::CompanionMissing(Companion::Audio, path.clone()))
        }
        Some(_) => {}
    }

    if let Some(path) = &chart.video {
        if !listing.exists(path) {
            problems.push(ValidationError::CompanionMissing(Companion::Video, path.clone()));
        }
    }

    problems
}

fn check_required(
    reference: Reference,
    filename: &str,
    directory: &Path,
    listing: &impl Listing,
    problems: &mut Vec<ValidationError>,
) {
    if filename.is_empty() {
        problems.push(ValidationError::Unspecified(reference));
    } else {
        check_optional(reference, filename, directory, listing, problems);
    }
}

fn check_optional(
    reference: Reference,
    filename: &str,
    directory: &Path,
    listing: &impl Listing,
    problems: &mut Vec<ValidationError>,
) {
    if filename.is_empty() {
        return;
    }

    let path = directory.join(filename);
    if !listing.exists(&path) {
        problems.push(ValidationError::FileMissing(reference, path));
    }
}

/// The beat a background change should start on so that a video recorded
/// alongside the audio stays in sync: seconds times beats per second, to
/// three decimal places.
pub fn expected_beat(offset: f64, bpm: f64) -> f64 {
    round3(offset * bpm / 60.0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn check_offset(model: &ChartModel, problems: &mut Vec<ValidationError>) {
    let offset = model.offset;
    if offset == 0.0 {
        return;
    }

    let bpm = match model.first_bpm() {
        Some(bpm) => bpm,
        None => {
            problems.push(ValidationError::NoTempo { offset });
            return;
        }
    };

    let expected = expected_beat(offset, bpm);
    debug!(offset, bpm, expected, "Calculated background change beat");

    let actual = model.bg_changes_beat;
    if actual == 0.0 {
        problems.push(ValidationError::ZeroBeat { offset, expected });
        return;
    }

    let difference = (actual - expected).abs();
    if difference >= BEAT_TOLERANCE {
        problems.push(ValidationError::BeatMismatch {
            offset,
            expected,
            actual,
            difference,
        });
    }
}

fn check_background_change(model: &ChartModel, problems: &mut Vec<ValidationError>) {
    let beat = model.bg_changes_beat;
    if beat == 0.0 {
        return;
    }

    if model
        .bg_changes_file
        .is_empty()
    {
        problems.push(ValidationError::BackgroundWithoutFile { beat });
    }

    if !model.bg_changes_stretch_no_loop
        && !model
            .bg_changes_effect
            .contains("StretchNoLoop")
    {
        problems.push(ValidationError::BackgroundLoops { beat });
    }
}
