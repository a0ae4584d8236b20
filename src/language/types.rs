//! Types representing a parsed step chart

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{Dialect, Format};

/// A tempo change: from `beat` onwards the song plays at `bpm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BpmPair {
    pub beat: f64,
    pub bpm: f64,
}

/// Directives found in a chart that are outside its dialect's vocabulary,
/// keyed by name and holding the source line they appeared on. Entries keep
/// file order; a repeated name replaces the earlier line in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnknownDirectives(Vec<(String, String)>);

impl UnknownDirectives {
    pub fn new() -> UnknownDirectives {
        UnknownDirectives(Vec::new())
    }

    pub fn insert(&mut self, name: &str, line: &str) {
        match self
            .0
            .iter_mut()
            .find(|(existing, _)| existing == name)
        {
            Some((_, previous)) => *previous = line.to_string(),
            None => self
                .0
                .push((name.to_string(), line.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, line)| line.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, line)| (name.as_str(), line.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.0
            .is_empty()
    }
}

/// Everything decoded from the header of one chart file.
///
/// The background-change record is not kept as a value of its own; only the
/// first record of the `#BGCHANGES:` list is decoded and its eleven
/// positions are spread over the `bg_changes_*` fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub filename: PathBuf,
    pub format: Format,

    pub title: String,
    pub subtitle: String,
    pub artist: String,
    pub title_translit: String,
    pub subtitle_translit: String,
    pub artist_translit: String,
    pub genre: String,
    pub credit: String,
    pub menu_color: String,
    pub meter_type: String,
    pub banner: String,
    pub background: String,
    pub lyrics_path: String,
    pub cd_title: String,
    pub music: String,
    /// Only the modern format carries a jacket; `None` for legacy charts.
    pub jacket: Option<String>,

    /// Seconds.
    pub offset: f64,
    pub sample_start: f64,
    pub sample_length: f64,

    pub selectable: String,
    pub list_sort: String,

    pub bpms: Vec<BpmPair>,
    pub stops: String,

    pub bg_changes: String,
    pub bg_changes_beat: f64,
    pub bg_changes_file: String,
    pub bg_changes_update_rate: f64,
    pub bg_changes_crossfade: bool,
    pub bg_changes_stretch_rewind: bool,
    pub bg_changes_stretch_no_loop: bool,
    pub bg_changes_effect: String,
    pub bg_changes_file2: String,
    pub bg_changes_transition: String,
    pub bg_changes_color1: String,
    pub bg_changes_color2: String,

    pub fg_changes: String,
    pub attacks: String,
    pub notes: Vec<String>,

    pub unknown: UnknownDirectives,
}

impl ChartModel {
    /// A model with every field at its default, ready to be filled in by
    /// the parser.
    pub fn new(filename: &Path, dialect: &Dialect) -> ChartModel {
        ChartModel {
            filename: filename.to_path_buf(),
            format: dialect.format,
            title: String::new(),
            subtitle: String::new(),
            artist: String::new(),
            title_translit: String::new(),
            subtitle_translit: String::new(),
            artist_translit: String::new(),
            genre: String::new(),
            credit: String::new(),
            menu_color: String::new(),
            meter_type: String::new(),
            banner: String::new(),
            background: String::new(),
            lyrics_path: String::new(),
            cd_title: String::new(),
            music: String::new(),
            jacket: if dialect.jacket {
                Some(String::new())
            } else {
                None
            },
            offset: 0.0,
            sample_start: 0.0,
            sample_length: 0.0,
            selectable: String::new(),
            list_sort: String::new(),
            bpms: Vec::new(),
            stops: String::new(),
            bg_changes: String::new(),
            bg_changes_beat: 0.0,
            bg_changes_file: String::new(),
            bg_changes_update_rate: 1.0,
            bg_changes_crossfade: false,
            bg_changes_stretch_rewind: false,
            bg_changes_stretch_no_loop: false,
            bg_changes_effect: String::new(),
            bg_changes_file2: String::new(),
            bg_changes_transition: String::new(),
            bg_changes_color1: String::new(),
            bg_changes_color2: String::new(),
            fg_changes: String::new(),
            attacks: String::new(),
            notes: Vec::new(),
            unknown: UnknownDirectives::new(),
        }
    }

    /// The directory holding the chart; every relative filename in the
    /// chart is resolved against it.
    pub fn directory(&self) -> &Path {
        self.filename
            .parent()
            .filter(|parent| {
                !parent
                    .as_os_str()
                    .is_empty()
            })
            .unwrap_or(Path::new("."))
    }

    /// The tempo in effect at the first entry of `#BPMS:`.
    pub fn first_bpm(&self) -> Option<f64> {
        self.bpms
            .first()
            .map(|pair| pair.bpm)
    }
}

/// The result of parsing a chart file: the model plus the audio and video
/// companions found for it. The companion paths are resolved once, at parse
/// time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub model: ChartModel,
    pub audio: Option<PathBuf>,
    pub video: Option<PathBuf>,
}
