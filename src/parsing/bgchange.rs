//! Decoding the `#BGCHANGES:` record
//!
//! A background change record is eleven `=` separated positions:
//!
//! ```text
//! beat=file=update_rate=crossfade=stretch_rewind=stretch_no_loop=effect=file2=transition=color1=color2
//! ```
//!
//! for example `-0.506=sengoku3.mp4=1.000=1=0=1=====`. The directive holds a
//! comma separated list of these records; only the first one is decoded.

use crate::language::ChartModel;

use super::parser::ParsingError;

const DIRECTIVE: &str = "BGCHANGES";

/// Reduce a raw `#BGCHANGES:` payload to its first record, dropping the
/// directive token and trailing semicolon if they are still attached.
pub fn first_record(payload: &str) -> &str {
    let payload = payload
        .strip_prefix("#BGCHANGES:")
        .unwrap_or(payload);
    let payload = payload
        .strip_suffix(';')
        .unwrap_or(payload);

    payload
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
}

/// Decode one background change record onto the `bg_changes_*` fields of
/// the model. Positions that are missing or empty leave the field at its
/// default; only a non-empty value overwrites it. The `offset` is where the
/// record starts in the source and is only used for error reporting.
pub fn decode_background_change(
    record: &str,
    offset: usize,
    model: &mut ChartModel,
) -> Result<(), ParsingError> {
    for (position, part) in record
        .split('=')
        .enumerate()
    {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match position {
            0 => model.bg_changes_beat = number(part, offset)?,
            1 => model.bg_changes_file = part.to_string(),
            2 => model.bg_changes_update_rate = number(part, offset)?,
            3 => model.bg_changes_crossfade = flag(part),
            4 => model.bg_changes_stretch_rewind = flag(part),
            5 => model.bg_changes_stretch_no_loop = flag(part),
            6 => model.bg_changes_effect = part.to_string(),
            7 => model.bg_changes_file2 = part.to_string(),
            8 => model.bg_changes_transition = part.to_string(),
            9 => model.bg_changes_color1 = part.to_string(),
            10 => model.bg_changes_color2 = part.to_string(),
            _ => break,
        }
    }
    Ok(())
}

fn number(part: &str, offset: usize) -> Result<f64, ParsingError> {
    part.parse::<f64>()
        .map_err(|_| ParsingError::InvalidNumber(offset, DIRECTIVE, part.to_string()))
}

// Only the literal "1" switches a flag on.
fn flag(part: &str) -> bool {
    part == "1"
}
