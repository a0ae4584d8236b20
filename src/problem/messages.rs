use stepchart::parsing::ParsingError;
use stepchart::validation::{Companion, Reference, ValidationError};

/// Generate problem and detail messages for parsing errors
pub fn parsing_error_message(error: &ParsingError) -> (String, String) {
    match error {
        ParsingError::UnsupportedFormat(_) => (
            "Unsupported chart format".to_string(),
            r#"
Only StepMania charts can be read: legacy files ending in .sm and modern
files ending in .ssc.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::InvalidNumber(_, directive, value) => (
            format!("Invalid number in #{}:", directive),
            format!(
                r#"
The value '{}' could not be read as a number. #{}: takes a decimal
number such as 1.898 or -0.25; leave it empty to use 0.
                "#,
                value, directive
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::InvalidBpmPair(_, pair) => (
            "Invalid tempo change".to_string(),
            format!(
                r#"
The entry '{}' is not a valid tempo change. #BPMS: is a comma separated
list of beat=bpm pairs, for example:

    #BPMS:0.000=160.002,64.000=180.000;
                "#,
                pair
            )
            .trim_ascii()
            .to_string(),
        ),
    }
}

/// Generate problem and detail messages for validation errors
pub fn validation_error_message(error: &ValidationError) -> (String, String) {
    match error {
        ValidationError::ChartMissing(path) => (
            "Chart file missing".to_string(),
            format!(
                "The chart file {} no longer exists on disk.",
                path.display()
            ),
        ),
        ValidationError::Unspecified(reference) => (
            format!("No {} specified", reference.description()),
            format!(
                r#"
Every chart needs a #{}: directive naming a file in the chart's directory.
                "#,
                reference.directive()
            )
            .trim_ascii()
            .to_string(),
        ),
        ValidationError::FileMissing(reference, path) => (
            format!("Missing {} file", reference.description()),
            match reference {
                Reference::CdTitle | Reference::LyricsPath => format!(
                    "#{}: is optional, but names {} which does not exist.",
                    reference.directive(),
                    path.display()
                ),
                _ => format!(
                    "#{}: names {} which does not exist.",
                    reference.directive(),
                    path.display()
                ),
            },
        ),
        ValidationError::NoTempo { offset } => (
            "Offset without tempo".to_string(),
            format!(
                "#OFFSET: is {} but #BPMS: is empty, so the background change beat cannot be checked.",
                offset
            ),
        ),
        ValidationError::ZeroBeat { offset, expected } => (
            "Background change starts at beat 0".to_string(),
            format!(
                r#"
The chart has an offset of {} seconds, so a video recorded alongside the
audio will be out of sync unless the background change starts later.
The beat implied by the offset and the first tempo is {}.
                "#,
                offset, expected
            )
            .trim_ascii()
            .to_string(),
        ),
        ValidationError::BeatMismatch {
            offset,
            expected,
            actual,
            difference,
        } => (
            "Background change beat does not match offset".to_string(),
            format!(
                r#"
The background change starts at beat {} but an offset of {} seconds at
the first tempo implies beat {}. They differ by {:.3} beats; the audio
and video will visibly drift apart.
                "#,
                actual, offset, expected, difference
            )
            .trim_ascii()
            .to_string(),
        ),
        ValidationError::BackgroundWithoutFile { beat } => (
            "Background change without a file".to_string(),
            format!(
                "#BGCHANGES: sets beat {} but names no file to show from it.",
                beat
            ),
        ),
        ValidationError::BackgroundLoops { beat } => (
            "Background video will loop".to_string(),
            format!(
                r#"
The background change at beat {} neither sets the stretch-no-loop flag
nor uses the StretchNoLoop effect, so the video restarts when it ends.
                "#,
                beat
            )
            .trim_ascii()
            .to_string(),
        ),
        ValidationError::UnknownDirectives(unknown) => {
            let lines = unknown
                .iter()
                .map(|(_, line)| format!("    {}", line))
                .collect::<Vec<_>>()
                .join("\n");
            (
                "Unknown directives".to_string(),
                format!(
                    r#"
These directives are not part of this chart format and were not read:

{}
                    "#,
                    lines
                )
                .trim_ascii()
                .to_string(),
            )
        }
        ValidationError::CompanionNotFound(companion) => (
            format!("No {} found", companion),
            match companion {
                Companion::Audio => {
                    "#MUSIC: is empty and no .flac, .mp3, .ogg or .wav file is in the chart directory."
                        .to_string()
                }
                Companion::Video => "No .avi or .mp4 file is in the chart directory.".to_string(),
            },
        ),
        ValidationError::CompanionMissing(companion, path) => (
            format!("Missing {} file", companion),
            format!("The chart refers to {} which does not exist.", path.display()),
        ),
    }
}
