//! Settings for the command line tool, read from `stepchart.toml`

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILENAME: &str = "stepchart.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_level: String,
    pub check: CheckConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "warn".to_string(),
            check: CheckConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Report every problem with each chart rather than only the first.
    pub all: bool,
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<ReportFormat> {
        match name {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    pub filename: PathBuf,
    pub problem: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.filename.display(), self.problem)
    }
}

/// Load settings. With no explicit path the default file in the current
/// directory is tried and its absence is not an error; the `Option` returned
/// is `None` in that case so the caller can mention it once logging is up.
pub fn load(explicit: Option<&Path>) -> Result<Option<Config>, ConfigError> {
    let filename = explicit.unwrap_or(Path::new(DEFAULT_FILENAME));

    let content = match std::fs::read_to_string(filename) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(None);
        }
        Err(error) => {
            return Err(ConfigError {
                filename: filename.to_path_buf(),
                problem: error.to_string(),
            });
        }
    };

    parse(&content)
        .map(Some)
        .map_err(|problem| ConfigError {
            filename: filename.to_path_buf(),
            problem,
        })
}

pub fn parse(content: &str) -> Result<Config, String> {
    toml::from_str(content).map_err(|error| {
        error
            .message()
            .to_string()
    })
}
