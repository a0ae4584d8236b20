use super::messages::{parsing_error_message, validation_error_message};
use owo_colors::OwoColorize;
use std::path::Path;
use stepchart::{language::LoadingError, parsing::ParsingError, validation::ValidationError};

/// Describe a directive that could not be decoded, quoting the line it is
/// on with a caret under the start of the bad value.
pub fn full_parsing_error(error: &ParsingError, filename: &Path, source: &str) -> String {
    let (problem, details) = parsing_error_message(error);
    let (line, column) = locate(source, error.offset());

    let code = source
        .lines()
        .nth(line - 1)
        .unwrap_or("?");
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// One line per chart, for batch runs.
pub fn concise_parsing_error(error: &ParsingError, filename: &Path, source: &str) -> String {
    let (problem, _) = parsing_error_message(error);
    let (line, column) = locate(source, error.offset());

    format!(
        "{}: {}:{}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
    )
}

pub fn concise_loading_error(error: &LoadingError) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

/// Format a validation problem with its explanation
pub fn full_validation_error(error: &ValidationError, filename: &Path) -> String {
    let (problem, details) = validation_error_message(error);

    format!(
        r#"
{}: {}: {}

{}
        "#,
        label(error),
        filename.to_string_lossy(),
        problem.bold(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a validation problem on one line
pub fn concise_validation_error(error: &ValidationError, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        label(error),
        filename.to_string_lossy(),
        error
            .message()
            .bold()
    )
}

// Consistency and vocabulary problems are warnings about a chart that can
// still be played; the rest are errors.
fn label(error: &ValidationError) -> String {
    use stepchart::language::ErrorKind;

    match error.kind() {
        ErrorKind::ConsistencyWarning | ErrorKind::UnknownDirective => "warning"
            .bright_yellow()
            .to_string(),
        _ => "error"
            .bright_red()
            .to_string(),
    }
}

// Line and column, both counted from 1, of a byte offset into the source.
// Columns count characters, not bytes.
fn locate(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];

    let line = before
        .matches('\n')
        .count()
        + 1;
    let start = before
        .rfind('\n')
        .map_or(0, |i| i + 1);
    let column = before[start..]
        .chars()
        .count()
        + 1;

    (line, column)
}
