//! Output generation for the stepchart CLI application

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use stepchart::language::{Chart, Format};
use stepchart::parsing::{ChartError, ParsingError};
use stepchart::validation::ValidationError;
use tinytemplate::TinyTemplate;
use tracing::{debug, info};

static SUMMARY: &str = r#"{filename}
  format      {format}
  title       {title}
  artist      {artist}
  genre       {genre}
  credit      {credit}
  banner      {banner}
  background  {background}{{ if jacket }}
  jacket      {jacket}{{ endif }}
  offset      {offset}
  sample      {sample}
  selectable  {selectable}
  bpms       {{ for bpm in bpms }} {bpm}{{ endfor }}
  bgchange    {bgchange}
  audio       {audio}
  video       {video}{{ if unknown }}
  unknown{{ for line in unknown }}
    {line}{{ endfor }}{{ endif }}
"#;

#[derive(Serialize)]
struct Summary {
    filename: String,
    format: &'static str,
    title: String,
    artist: String,
    genre: String,
    credit: String,
    banner: String,
    background: String,
    jacket: Option<String>,
    offset: String,
    sample: String,
    selectable: String,
    bpms: Vec<String>,
    bgchange: String,
    audio: String,
    video: String,
    unknown: Vec<String>,
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path
            .display()
            .to_string(),
        None => "(none found)".to_string(),
    }
}

fn summarize(chart: &Chart) -> Summary {
    let model = &chart.model;

    let title = if model
        .subtitle
        .is_empty()
    {
        model
            .title
            .clone()
    } else {
        format!("{} {}", model.title, model.subtitle)
    };

    let bgchange = if model
        .bg_changes_file
        .is_empty()
    {
        "(none)".to_string()
    } else {
        format!(
            "{} at beat {}{}",
            model.bg_changes_file,
            model.bg_changes_beat,
            if model.bg_changes_stretch_no_loop {
                ", no loop"
            } else {
                ""
            }
        )
    };

    Summary {
        filename: model
            .filename
            .display()
            .to_string(),
        format: match model.format {
            Format::Legacy => "sm",
            Format::Modern => "ssc",
        },
        title,
        artist: model
            .artist
            .clone(),
        genre: model
            .genre
            .clone(),
        credit: model
            .credit
            .clone(),
        banner: model
            .banner
            .clone(),
        background: model
            .background
            .clone(),
        jacket: model
            .jacket
            .clone(),
        offset: format!("{}", model.offset),
        sample: format!("{} + {}", model.sample_start, model.sample_length),
        selectable: model
            .selectable
            .clone(),
        bpms: model
            .bpms
            .iter()
            .map(|pair| format!("{}={}", pair.beat, pair.bpm))
            .collect(),
        bgchange,
        audio: describe(&chart.audio),
        video: describe(&chart.video),
        unknown: model
            .unknown
            .iter()
            .map(|(_, line)| line.to_string())
            .collect(),
    }
}

/// Render a human readable description of a parsed chart.
pub fn render_summary(chart: &Chart) -> Result<String, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("summary", SUMMARY)?;

    let context = summarize(chart);
    tt.render("summary", &context)
}

/// One problem with a chart, flattened for machine readable output.
#[derive(Serialize)]
pub struct Problem {
    pub kind: String,
    pub directive: Option<&'static str>,
    pub message: String,
}

impl Problem {
    pub fn from_chart_error(error: &ChartError) -> Problem {
        let directive = match error {
            ChartError::Parsing(error) => error.directive(),
            ChartError::Loading(_) => None,
        };
        Problem {
            kind: error
                .kind()
                .to_string(),
            directive,
            message: error.to_string(),
        }
    }

    pub fn from_parsing_error(error: &ParsingError) -> Problem {
        Problem {
            kind: error
                .kind()
                .to_string(),
            directive: error.directive(),
            message: error.message(),
        }
    }

    pub fn from_validation_error(error: &ValidationError) -> Problem {
        Problem {
            kind: error
                .kind()
                .to_string(),
            directive: error.directive(),
            message: error.message(),
        }
    }
}

/// The outcome of checking one chart.
#[derive(Serialize)]
pub struct Report {
    pub filename: PathBuf,
    pub valid: bool,
    pub problems: Vec<Problem>,
    pub chart: Option<Chart>,
}

pub fn reports_to_json(reports: &[Report]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

/// Write the successfully parsed charts out as JSON.
pub fn write_charts(filename: &Path, reports: &[Report]) -> std::io::Result<()> {
    info!("Writing parsed charts to {}", filename.display());

    let charts: Vec<&Chart> = reports
        .iter()
        .filter_map(|report| {
            report
                .chart
                .as_ref()
        })
        .collect();

    let json = serde_json::to_string_pretty(&charts)?;

    let mut file = std::fs::File::create(filename)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    debug!("Wrote {} chart{}", charts.len(), if charts.len() == 1 { "" } else { "s" });
    Ok(())
}
