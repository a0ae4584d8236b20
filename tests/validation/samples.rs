use std::path::Path;

use stepchart::parsing;
use stepchart::validation::{self, Disk};

#[test]
fn ensure_samples_validate() {
    let files = parsing::list_chart_files(Path::new("tests/samples/"))
        .expect("Failed to list samples directory");

    assert!(!files.is_empty(), "No chart files found in samples directory");

    let mut failures = Vec::new();

    for file in &files {
        let chart = parsing::read(file)
            .unwrap_or_else(|e| panic!("Failed to read file {:?}: {:?}", file, e));

        if let Err(problems) = validation::validate_chart_with_recovery(&chart, &Disk) {
            println!("File {:?} failed validation: {:?}", file, problems);
            failures.push(file.clone());
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample files should validate, but {} files failed",
            failures.len()
        );
    }
}

#[test]
fn missing_chart_file() {
    let dir = tempfile::tempdir().unwrap();
    let filename = dir
        .path()
        .join("song.sm");
    std::fs::write(&filename, "#TITLE:Song;\n").unwrap();

    let chart = parsing::read(&filename).unwrap();
    std::fs::remove_file(&filename).unwrap();

    match validation::validate(&chart.model, &Disk) {
        Err(validation::ValidationError::ChartMissing(path)) => assert_eq!(path, filename),
        other => panic!("expected the chart to be missing, got {:?}", other),
    }
}
