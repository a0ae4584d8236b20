use clap::{value_parser, Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use stepchart::parsing::{self, ChartError};
use stepchart::validation::{self, Disk};

mod config;
mod output;
mod problem;

use config::{Config, ReportFormat};
use output::{Problem, Report};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("stepchart")
        .version(VERSION)
        .propagate_version(true)
        .about("Check StepMania step charts for problems.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Settings file to use instead of stepchart.toml in the current directory."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more detail; repeat for even more."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse and validate a chart, or every chart under a directory")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Report every problem with each chart, not just the first."),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["text", "json"])
                        .help("How to report results."),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also write the parsed charts to this file as JSON."),
                )
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("A .sm or .ssc chart file, or a directory to search for them."),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Print the fields decoded from a chart")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The .sm or .ssc chart file to describe."),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List every chart file under a directory")
                .arg(
                    Arg::new("directory")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The directory to search."),
                ),
        )
        .get_matches();

    let explicit = matches.get_one::<PathBuf>("config");
    let loaded = match config::load(explicit.map(PathBuf::as_path)) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    };
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    setup_logging(matches.get_count("verbose"), &config);
    if !found {
        warn!("Config file {} not found, using defaults", config::DEFAULT_FILENAME);
    }

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let path = submatches
                .get_one::<PathBuf>("path")
                .unwrap();

            let all = submatches.get_flag("all") || config.check.all;
            let format = submatches
                .get_one::<String>("format")
                .and_then(|name| ReportFormat::from_name(name))
                .unwrap_or(config.check.format);
            let target = submatches.get_one::<PathBuf>("output");

            let code = run_check(path, all, format, target.map(PathBuf::as_path));
            std::process::exit(code);
        }
        Some(("show", submatches)) => {
            let filename = submatches
                .get_one::<PathBuf>("filename")
                .unwrap();

            let code = run_show(filename);
            std::process::exit(code);
        }
        Some(("list", submatches)) => {
            let directory = submatches
                .get_one::<PathBuf>("directory")
                .unwrap();

            match parsing::list_chart_files(directory) {
                Ok(files) => {
                    for file in files {
                        println!("{}", file.display());
                    }
                }
                Err(error) => {
                    eprintln!("{}", problem::concise_loading_error(&error));
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: stepchart [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

// RUST_LOG wins if set, then -v, then the config file.
fn setup_logging(verbosity: u8, config: &Config) {
    let level = match verbosity {
        0 => config
            .log_level
            .as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(path: &Path, all: bool, format: ReportFormat, target: Option<&Path>) -> i32 {
    let (files, single) = if path.is_dir() {
        match parsing::list_chart_files(path) {
            Ok(files) => (files, false),
            Err(error) => {
                eprintln!("{}", problem::concise_loading_error(&error));
                return 1;
            }
        }
    } else {
        (vec![path.to_path_buf()], true)
    };

    info!("Found {} chart files to check", files.len());

    let mut reports = Vec::new();
    for file in &files {
        let report = check_chart(file, all, format == ReportFormat::Text, single);
        reports.push(report);
    }

    let valid = reports
        .iter()
        .filter(|report| report.valid)
        .count();

    match format {
        ReportFormat::Text => {
            if !single {
                println!("Found {} of {} valid charts", valid, files.len());
            }
        }
        ReportFormat::Json => match output::reports_to_json(&reports) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("{}: {}", "error".bright_red(), error);
                return 1;
            }
        },
    }

    if let Some(target) = target {
        if let Err(error) = output::write_charts(target, &reports) {
            eprintln!("{}: {}: {}", "error".bright_red(), target.display(), error);
            return 1;
        }
    }

    if valid == reports.len() {
        0
    } else {
        1
    }
}

/// Parse and validate one chart. A failure here is confined to this chart;
/// the caller carries on with the next one.
fn check_chart(file: &Path, all: bool, print: bool, detailed: bool) -> Report {
    debug!("Checking {}", file.display());

    let content = match parsing::load(file) {
        Ok(content) => content,
        Err(error) => {
            if print {
                eprintln!("{}", problem::concise_loading_error(&error));
            }
            return Report {
                filename: file.to_path_buf(),
                valid: false,
                problems: vec![Problem::from_chart_error(&ChartError::Loading(error))],
                chart: None,
            };
        }
    };

    let chart = match parsing::parse(file, &content) {
        Ok(chart) => chart,
        Err(error) => {
            if print {
                if detailed {
                    eprintln!("{}", problem::full_parsing_error(&error, file, &content));
                } else {
                    eprintln!("{}", problem::concise_parsing_error(&error, file, &content));
                }
            }
            return Report {
                filename: file.to_path_buf(),
                valid: false,
                problems: vec![Problem::from_parsing_error(&error)],
                chart: None,
            };
        }
    };

    let problems = match validation::validate_chart_with_recovery(&chart, &Disk) {
        Ok(()) => Vec::new(),
        Err(mut problems) => {
            if !all {
                problems.truncate(1);
            }
            problems
        }
    };

    if print {
        for error in &problems {
            if detailed {
                eprintln!("{}\n", problem::full_validation_error(error, file));
            } else {
                eprintln!("{}", problem::concise_validation_error(error, file));
            }
        }
    }

    Report {
        filename: file.to_path_buf(),
        valid: problems.is_empty(),
        problems: problems
            .iter()
            .map(Problem::from_validation_error)
            .collect(),
        chart: Some(chart),
    }
}

fn run_show(filename: &Path) -> i32 {
    let chart = match parsing::read(filename) {
        Ok(chart) => chart,
        Err(ChartError::Loading(error)) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return 1;
        }
        Err(ChartError::Parsing(error)) => {
            // read() only fails to parse after a successful load
            let content = parsing::load(filename).unwrap_or_default();
            eprintln!("{}", problem::full_parsing_error(&error, filename, &content));
            return 1;
        }
    };

    match output::render_summary(&chart) {
        Ok(summary) => {
            print!("{}", summary);
            0
        }
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            1
        }
    }
}
