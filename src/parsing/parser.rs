use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::language::*;

use super::bgchange::{decode_background_change, first_record};
use super::extract::{directive_lines, extract_value, find_directive};
use super::resolve::{resolve_companion, AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    UnsupportedFormat(PathBuf),
    InvalidNumber(usize, &'static str, String),
    InvalidBpmPair(usize, String),
}

impl ParsingError {
    /// Byte position in the source the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::UnsupportedFormat(_) => 0,
            ParsingError::InvalidNumber(offset, _, _) => *offset,
            ParsingError::InvalidBpmPair(offset, _) => *offset,
        }
    }

    /// The directive whose payload could not be decoded.
    pub fn directive(&self) -> Option<&'static str> {
        match self {
            ParsingError::UnsupportedFormat(_) => None,
            ParsingError::InvalidNumber(_, directive, _) => Some(directive),
            ParsingError::InvalidBpmPair(_, _) => Some("BPMS"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParsingError::UnsupportedFormat(_) => ErrorKind::IoFailure,
            ParsingError::InvalidNumber(_, _, _) => ErrorKind::MalformedField,
            ParsingError::InvalidBpmPair(_, _) => ErrorKind::MalformedField,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::UnsupportedFormat(path) => format!(
                "unsupported chart format '{}'",
                path.extension()
                    .map(|s| s.to_string_lossy())
                    .unwrap_or_default()
            ),
            ParsingError::InvalidNumber(_, directive, value) => {
                format!("invalid number '{}' in #{}:", value, directive)
            }
            ParsingError::InvalidBpmPair(_, pair) => {
                format!("invalid beat=bpm pair '{}' in #BPMS:", pair)
            }
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ParsingError {}

/// Parse the text of a chart in the given dialect. The filename is recorded
/// on the model and its directory is searched for companion media.
pub fn parse_with_dialect(
    filename: &Path,
    content: &str,
    dialect: &'static Dialect,
) -> Result<Chart, ParsingError> {
    let mut input = Parser::new(dialect);
    input.initialize(content);

    let model = input.read_model(filename)?;

    let directory = model.directory();
    let video = resolve_companion(directory, &model.bg_changes_file, VIDEO_EXTENSIONS);
    let audio = resolve_companion(directory, &model.music, AUDIO_EXTENSIONS);
    debug!(?audio, ?video);

    Ok(Chart {
        model,
        audio,
        video,
    })
}

#[derive(Debug)]
pub struct Parser<'i> {
    source: &'i str,
    dialect: &'static Dialect,
}

impl<'i> Parser<'i> {
    pub fn new(dialect: &'static Dialect) -> Parser<'i> {
        Parser { source: "", dialect }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.source = content;
    }

    /// Extract every known directive into a fresh model, then sweep the text
    /// for directives outside the vocabulary.
    pub fn read_model(&self, filename: &Path) -> Result<ChartModel, ParsingError> {
        let mut model = ChartModel::new(filename, self.dialect);

        model.title = self.read_text("TITLE");
        model.subtitle = self.read_text("SUBTITLE");
        model.artist = self.read_text("ARTIST");
        model.title_translit = self.read_text("TITLETRANSLIT");
        model.subtitle_translit = self.read_text("SUBTITLETRANSLIT");
        model.artist_translit = self.read_text("ARTISTTRANSLIT");
        model.genre = self.read_text("GENRE");
        model.credit = self.read_text("CREDIT");
        model.menu_color = self.read_text("MENUCOLOR");
        model.meter_type = self.read_text("METERTYPE");
        model.banner = self.read_text("BANNER");
        model.background = self.read_text("BACKGROUND");
        model.lyrics_path = self.read_text("LYRICSPATH");
        model.cd_title = self.read_text("CDTITLE");
        model.music = self.read_text("MUSIC");

        if self
            .dialect
            .jacket
        {
            model.jacket = Some(self.read_text(JACKET_DIRECTIVE));
        }

        model.offset = self.read_number("OFFSET")?;
        model.sample_start = self.read_number("SAMPLESTART")?;
        model.sample_length = self.read_number("SAMPLELENGTH")?;

        model.selectable = self.read_selectable();
        model.list_sort = self.read_text("LISTSORT");

        model.bpms = self.read_bpms()?;
        model.stops = self.read_text("STOPS");

        model.bg_changes = self.read_text("BGCHANGES");
        self.read_background_change(&mut model)?;

        model.fg_changes = self.read_text("FGCHANGES");
        model.attacks = self.read_text("ATTACKS");

        model.unknown = self.read_unknown();

        let tempos = model
            .bpms
            .len();
        debug!(
            "Found {} tempo change{}",
            tempos,
            if tempos == 1 { "" } else { "s" }
        );
        if !model
            .unknown
            .is_empty()
        {
            debug!("Unrecognized directives: {}", model.unknown.len());
        }

        Ok(model)
    }

    pub fn read_text(&self, name: &str) -> String {
        extract_value(self.source, name).to_string()
    }

    /// Numeric directives default to 0.0 when absent or empty; anything else
    /// has to parse as a float.
    pub fn read_number(&self, name: &'static str) -> Result<f64, ParsingError> {
        let directive = match find_directive(self.source, name) {
            Some(directive) if !directive
                .value
                .is_empty() =>
            {
                directive
            }
            _ => return Ok(0.0),
        };

        directive
            .value
            .parse::<f64>()
            .map_err(|_| {
                ParsingError::InvalidNumber(
                    directive.offset,
                    name,
                    directive
                        .value
                        .to_string(),
                )
            })
    }

    /// An absent `#SELECTABLE:` leaves the field empty; one that is present
    /// but empty means the default, "YES".
    pub fn read_selectable(&self) -> String {
        match find_directive(self.source, "SELECTABLE") {
            None => String::new(),
            Some(directive) if directive
                .value
                .is_empty() =>
            {
                "YES".to_string()
            }
            Some(directive) => directive
                .value
                .to_string(),
        }
    }

    /// `#BPMS:` is a comma separated list of `beat=bpm` pairs. A single
    /// trailing comma is allowed; every other entry, blank ones included,
    /// has to be exactly two numbers.
    pub fn read_bpms(&self) -> Result<Vec<BpmPair>, ParsingError> {
        let directive = match find_directive(self.source, "BPMS") {
            Some(directive) => directive,
            None => return Ok(Vec::new()),
        };

        let value = directive
            .value
            .strip_suffix(',')
            .unwrap_or(directive.value);
        if value.is_empty() {
            return Ok(Vec::new());
        }

        let mut pairs = Vec::new();

        for chunk in value.split(',') {
            let chunk = chunk.trim();
            let offset = self.position(chunk);
            let invalid = || ParsingError::InvalidBpmPair(offset, chunk.to_string());

            let mut halves = chunk.split('=');
            let (beat, bpm) = match (halves.next(), halves.next(), halves.next()) {
                (Some(beat), Some(bpm), None) => (beat.trim(), bpm.trim()),
                _ => return Err(invalid()),
            };

            let beat = beat
                .parse::<f64>()
                .map_err(|_| invalid())?;
            let bpm = bpm
                .parse::<f64>()
                .map_err(|_| invalid())?;

            pairs.push(BpmPair { beat, bpm });
        }

        Ok(pairs)
    }

    pub fn read_background_change(&self, model: &mut ChartModel) -> Result<(), ParsingError> {
        let directive = match find_directive(self.source, "BGCHANGES") {
            Some(directive) => directive,
            None => return Ok(()),
        };

        let record = first_record(directive.value);
        decode_background_change(record, directive.offset, model)
    }

    /// Directive names observed in the source minus those in the dialect's
    /// vocabulary. The whole line is kept so it can be reported verbatim.
    pub fn read_unknown(&self) -> UnknownDirectives {
        let mut unknown = UnknownDirectives::new();

        for (name, line) in directive_lines(self.source) {
            if !self
                .dialect
                .accepts(name)
            {
                unknown.insert(name, line);
            }
        }
        unknown
    }

    // Byte position of a slice borrowed from the source.
    fn position(&self, fragment: &str) -> usize {
        fragment.as_ptr() as usize - self
            .source
            .as_ptr() as usize
    }
}
