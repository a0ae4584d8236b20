use std::fmt;
use std::path::PathBuf;

use crate::language::{ErrorKind, UnknownDirectives};

/// The header fields that name a file in the chart directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Banner,
    Background,
    Jacket,
    CdTitle,
    LyricsPath,
}

impl Reference {
    pub fn directive(self) -> &'static str {
        match self {
            Reference::Banner => "BANNER",
            Reference::Background => "BACKGROUND",
            Reference::Jacket => "JACKET",
            Reference::CdTitle => "CDTITLE",
            Reference::LyricsPath => "LYRICSPATH",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Reference::Banner => "banner",
            Reference::Background => "background",
            Reference::Jacket => "jacket",
            Reference::CdTitle => "CD title",
            Reference::LyricsPath => "lyrics",
        }
    }
}

/// Media resolved for a chart at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    Audio,
    Video,
}

impl fmt::Display for Companion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Companion::Audio => f.write_str("audio"),
            Companion::Video => f.write_str("video"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    ChartMissing(PathBuf),
    Unspecified(Reference),
    FileMissing(Reference, PathBuf),
    NoTempo {
        offset: f64,
    },
    ZeroBeat {
        offset: f64,
        expected: f64,
    },
    BeatMismatch {
        offset: f64,
        expected: f64,
        actual: f64,
        difference: f64,
    },
    BackgroundWithoutFile {
        beat: f64,
    },
    BackgroundLoops {
        beat: f64,
    },
    UnknownDirectives(UnknownDirectives),
    CompanionNotFound(Companion),
    CompanionMissing(Companion, PathBuf),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::ChartMissing(_) => ErrorKind::IoFailure,
            ValidationError::Unspecified(_) => ErrorKind::FieldUnspecified,
            ValidationError::FileMissing(_, _) => ErrorKind::FileReferenceMissing,
            ValidationError::NoTempo { .. } => ErrorKind::ConsistencyWarning,
            ValidationError::ZeroBeat { .. } => ErrorKind::ConsistencyWarning,
            ValidationError::BeatMismatch { .. } => ErrorKind::ConsistencyWarning,
            ValidationError::BackgroundWithoutFile { .. } => ErrorKind::ConsistencyWarning,
            ValidationError::BackgroundLoops { .. } => ErrorKind::ConsistencyWarning,
            ValidationError::UnknownDirectives(_) => ErrorKind::UnknownDirective,
            ValidationError::CompanionNotFound(_) => ErrorKind::FileReferenceMissing,
            ValidationError::CompanionMissing(_, _) => ErrorKind::FileReferenceMissing,
        }
    }

    /// The directive the problem was found in, if it can be pinned to one.
    pub fn directive(&self) -> Option<&'static str> {
        match self {
            ValidationError::Unspecified(reference) => Some(reference.directive()),
            ValidationError::FileMissing(reference, _) => Some(reference.directive()),
            ValidationError::NoTempo { .. } => Some("BPMS"),
            ValidationError::ZeroBeat { .. }
            | ValidationError::BeatMismatch { .. }
            | ValidationError::BackgroundWithoutFile { .. }
            | ValidationError::BackgroundLoops { .. } => Some("BGCHANGES"),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationError::ChartMissing(path) => {
                format!("chart file {} does not exist", path.display())
            }
            ValidationError::Unspecified(reference) => {
                format!("no file specified for #{}:", reference.directive())
            }
            ValidationError::FileMissing(reference, path) => format!(
                "{} file {} does not exist",
                reference.description(),
                path.display()
            ),
            ValidationError::NoTempo { offset } => format!(
                "offset is not zero ({}) but there is no tempo in #BPMS: to check it against",
                offset
            ),
            ValidationError::ZeroBeat { offset, expected } => format!(
                "offset is not zero ({}) but background change beat is 0, likely audio/video desync; expected beat {}",
                offset, expected
            ),
            ValidationError::BeatMismatch {
                offset,
                expected,
                actual,
                difference,
            } => format!(
                "background change beat {} does not match offset {}, likely audio/video desync; expected beat {}, off by {:.3}",
                actual, offset, expected, difference
            ),
            ValidationError::BackgroundWithoutFile { beat } => {
                format!("background change at beat {} has no file", beat)
            }
            ValidationError::BackgroundLoops { beat } => format!(
                "background change at beat {} is not StretchNoLoop, video will loop at end",
                beat
            ),
            ValidationError::UnknownDirectives(unknown) => format!(
                "unknown directive{}: {}",
                if unknown.len() == 1 { "" } else { "s" },
                unknown
                    .names()
                    .map(|name| format!("#{}", name))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ValidationError::CompanionNotFound(companion) => {
                format!("no {} file found for chart", companion)
            }
            ValidationError::CompanionMissing(companion, path) => {
                format!("{} file {} does not exist", companion, path.display())
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationError {}
