//! Finding the audio and video files that accompany a chart

use std::path::{Path, PathBuf};
use tracing::debug;

/// Audio extensions in order of preference: lossless first, then the lossy
/// formats, then uncompressed.
pub const AUDIO_EXTENSIONS: &[&str] = &["flac", "mp3", "ogg", "wav"];

/// Video container extensions in order of preference.
pub const VIDEO_EXTENSIONS: &[&str] = &["avi", "mp4"];

/// Resolve a companion file for the chart in `directory`. An explicit
/// filename from the chart wins and is taken relative to the directory
/// (whether or not it exists; that is for the validator to judge).
/// Otherwise the directory is searched for the first file carrying one of
/// the given extensions.
pub fn resolve_companion(directory: &Path, explicit: &str, extensions: &[&str]) -> Option<PathBuf> {
    if explicit.is_empty() {
        find_by_extension(directory, extensions)
    } else {
        Some(directory.join(explicit))
    }
}

/// Search `directory` (not its subdirectories) for a file with one of the
/// given extensions, trying each extension in turn. When several files share
/// an extension the first in directory listing order is returned; that order
/// depends on the filesystem and is deliberately left unsorted. Extensions
/// are compared ignoring ASCII case. An unreadable directory finds nothing.
pub fn find_by_extension(directory: &Path, extensions: &[&str]) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(?error, "Unable to list {}", directory.display());
            return None;
        }
    };

    let files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    for extension in extensions {
        let found = files
            .iter()
            .find(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|s| s.eq_ignore_ascii_case(extension))
            });

        if let Some(path) = found {
            return Some(path.clone());
        }
    }
    None
}
