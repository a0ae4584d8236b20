//! The two chart file dialects and the directive vocabulary each accepts

use serde::Serialize;
use std::path::Path;

/// Which of the two sibling file formats a chart was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Format {
    /// StepMania `.sm`, the legacy format.
    Legacy,
    /// StepMania `.ssc`, the modern format.
    Modern,
}

impl Format {
    /// Select a format by file extension. Matching ignores ASCII case, so
    /// `SONG.SM` is still a legacy chart.
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())?;

        [&LEGACY, &MODERN]
            .into_iter()
            .find(|dialect| {
                dialect
                    .extension
                    .eq_ignore_ascii_case(extension)
            })
            .map(|dialect| dialect.format)
    }

    pub fn dialect(self) -> &'static Dialect {
        match self {
            Format::Legacy => &LEGACY,
            Format::Modern => &MODERN,
        }
    }
}

/// Header directives common to both formats. Every one of these is decoded
/// onto its own field of the chart model.
pub const HEADER_DIRECTIVES: &[&str] = &[
    "TITLE",
    "SUBTITLE",
    "ARTIST",
    "TITLETRANSLIT",
    "SUBTITLETRANSLIT",
    "ARTISTTRANSLIT",
    "GENRE",
    "CREDIT",
    "MENUCOLOR",
    "METERTYPE",
    "BANNER",
    "BACKGROUND",
    "LYRICSPATH",
    "CDTITLE",
    "MUSIC",
    "OFFSET",
    "SAMPLESTART",
    "SAMPLELENGTH",
    "SELECTABLE",
    "LISTSORT",
    "BPMS",
    "STOPS",
    "BGCHANGES",
    "FGCHANGES",
    "ATTACKS",
];

pub const JACKET_DIRECTIVE: &str = "JACKET";

// Note-section directives are accepted but their content is not decoded.
const LEGACY_NOTE_DIRECTIVES: &[&str] = &["NOTES"];

const MODERN_NOTE_DIRECTIVES: &[&str] = &[
    "NOTEDATA",
    "STEPSTYPE",
    "DESCRIPTION",
    "DIFFICULTY",
    "METER",
    "NOTES",
];

/// Everything that differs between the two formats. The parser and the
/// validator are written once and consult one of these.
#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    pub format: Format,
    pub extension: &'static str,
    pub jacket: bool,
    pub note_directives: &'static [&'static str],
}

pub static LEGACY: Dialect = Dialect {
    format: Format::Legacy,
    extension: "sm",
    jacket: false,
    note_directives: LEGACY_NOTE_DIRECTIVES,
};

pub static MODERN: Dialect = Dialect {
    format: Format::Modern,
    extension: "ssc",
    jacket: true,
    note_directives: MODERN_NOTE_DIRECTIVES,
};

impl Dialect {
    /// Is the named directive part of this dialect's vocabulary?
    pub fn accepts(&self, name: &str) -> bool {
        HEADER_DIRECTIVES.contains(&name)
            || (self.jacket && name == JACKET_DIRECTIVE)
            || self
                .note_directives
                .contains(&name)
    }
}
