//! parser for StepMania chart files

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::language::{Chart, ErrorKind, Format, LoadingError};

pub mod bgchange;
pub mod extract;
pub mod parser;
pub mod resolve;

pub use parser::ParsingError;

/// Read a file and return an owned String.
pub fn load(filename: &Path) -> Result<String, LoadingError> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename: filename.to_path_buf(),
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename: filename.to_path_buf(),
                }),
            }
        }
    }
}

/// Parse the text of a chart. The format is chosen by the filename's
/// extension.
pub fn parse(filename: &Path, content: &str) -> Result<Chart, ParsingError> {
    let format = Format::from_path(filename)
        .ok_or_else(|| ParsingError::UnsupportedFormat(filename.to_path_buf()))?;

    debug!("Parsing {} as {:?}", filename.display(), format);
    parser::parse_with_dialect(filename, content, format.dialect())
}

/// Anything that stops a chart from being read: either the file could not
/// be loaded or its content could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    Loading(LoadingError),
    Parsing(ParsingError),
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::Loading(_) => ErrorKind::IoFailure,
            ChartError::Parsing(error) => error.kind(),
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::Loading(error) => write!(f, "{}", error),
            ChartError::Parsing(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<LoadingError> for ChartError {
    fn from(error: LoadingError) -> Self {
        ChartError::Loading(error)
    }
}

impl From<ParsingError> for ChartError {
    fn from(error: ParsingError) -> Self {
        ChartError::Parsing(error)
    }
}

/// Load and parse a chart in one step. The format is checked before the file
/// is read.
pub fn read(filename: &Path) -> Result<Chart, ChartError> {
    if Format::from_path(filename).is_none() {
        return Err(ParsingError::UnsupportedFormat(filename.to_path_buf()).into());
    }

    let content = load(filename)?;
    let chart = parse(filename, &content)?;
    Ok(chart)
}

/// Whether the path names a chart file. Only the extension is consulted.
pub fn is_chart_file(path: &Path) -> bool {
    Format::from_path(path).is_some()
}

/// Every chart file under the directory, recursively, in a stable order.
/// Symbolic links are followed, both to chart files and to directories of
/// songs. Entries that cannot be read below the top level (including link
/// loops) are skipped with a warning; an unreadable top level directory is
/// an error.
pub fn list_chart_files(directory: &Path) -> Result<Vec<PathBuf>, LoadingError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if error.depth() == 0 => {
                return Err(LoadingError {
                    problem: "Unable to read directory".to_string(),
                    details: error.to_string(),
                    filename: directory.to_path_buf(),
                });
            }
            Err(error) => {
                warn!("Skipping: {}", error);
                continue;
            }
        };

        if entry
            .file_type()
            .is_file()
            && is_chart_file(entry.path())
        {
            files.push(entry.into_path());
        }
    }

    debug!(
        "Found {} chart file{} under {}",
        files.len(),
        if files.len() == 1 { "" } else { "s" },
        directory.display()
    );
    Ok(files)
}
