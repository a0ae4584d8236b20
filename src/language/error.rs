use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError {
    pub problem: String,
    pub details: String,
    pub filename: PathBuf,
}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}: {}", self.filename.display(), self.problem)
        } else {
            write!(
                f,
                "{}: {}: {}",
                self.filename.display(),
                self.problem,
                self.details
            )
        }
    }
}

impl std::error::Error for LoadingError {}

/// Broad classification of everything that can go wrong with a chart, so
/// callers can tell a missing file from inconsistent fields from an
/// unrecognized directive without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IoFailure,
    MalformedField,
    FileReferenceMissing,
    FieldUnspecified,
    ConsistencyWarning,
    UnknownDirective,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::IoFailure => "i/o failure",
            ErrorKind::MalformedField => "malformed field",
            ErrorKind::FileReferenceMissing => "missing file",
            ErrorKind::FieldUnspecified => "unspecified field",
            ErrorKind::ConsistencyWarning => "inconsistent fields",
            ErrorKind::UnknownDirective => "unknown directive",
        };
        f.write_str(name)
    }
}
