use std::path::{Path, PathBuf};

use stepchart::parsing;

#[test]
fn ensure_samples_parse() {
    let dir = Path::new("tests/samples/");

    assert!(dir.exists(), "samples directory missing");

    let files = parsing::list_chart_files(dir).expect("Failed to list samples directory");

    assert_eq!(
        files,
        vec![
            PathBuf::from("tests/samples/bamboo/bamboo.ssc"),
            PathBuf::from("tests/samples/plain/plain.sm"),
        ]
    );

    let mut failures = Vec::new();

    for file in &files {
        match parsing::read(file) {
            Ok(_) => {}
            Err(e) => {
                println!("File {:?} failed to parse: {:?}", file, e);
                failures.push(file.clone());
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample files should parse successfully, but {} files failed",
            failures.len()
        );
    }
}

#[test]
fn ensure_broken_fail() {
    let dir = Path::new("tests/broken/");

    assert!(dir.exists(), "broken directory missing");

    let files = parsing::list_chart_files(dir).expect("Failed to list broken directory");

    assert!(!files.is_empty(), "No chart files found in broken directory");

    let mut unexpected_successes = Vec::new();

    for file in &files {
        let content = parsing::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        match parsing::parse(file, &content) {
            Ok(_) => {
                println!("File {:?} unexpectedly parsed successfully", file);
                unexpected_successes.push(file.clone());
            }
            Err(_) => {}
        }
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken files should not parse successfully, but {} files passed",
            unexpected_successes.len()
        );
    }
}

#[test]
fn sample_fields() {
    let chart = parsing::read(Path::new("tests/samples/bamboo/bamboo.ssc")).unwrap();
    let model = &chart.model;

    assert_eq!(model.title, "Bamboo Blade");
    assert_eq!(model.jacket, Some("jacket.png".to_string()));
    assert_eq!(model.offset, 1.898);
    assert_eq!(model.bg_changes_beat, 5.0);
    assert!(model
        .unknown
        .is_empty());
    assert_eq!(
        chart.audio,
        Some(PathBuf::from("tests/samples/bamboo/bamboo.ogg"))
    );
    assert_eq!(
        chart.video,
        Some(PathBuf::from("tests/samples/bamboo/video.mp4"))
    );

    let chart = parsing::read(Path::new("tests/samples/plain/plain.sm")).unwrap();

    assert_eq!(chart.model.jacket, None);
    assert_eq!(chart.model.selectable, "YES");
    assert_eq!(
        chart.audio,
        Some(PathBuf::from("tests/samples/plain/plain.mp3"))
    );
    assert_eq!(chart.video, None);
}

#[test]
fn listing_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let gone = dir
        .path()
        .join("gone");

    assert!(parsing::list_chart_files(&gone).is_err());
}

#[cfg(unix)]
#[test]
fn listing_follows_links() {
    use std::os::unix::fs::symlink;

    let store = tempfile::tempdir().unwrap();
    let pack = store
        .path()
        .join("pack");
    std::fs::create_dir(&pack).unwrap();
    std::fs::write(pack.join("a.sm"), "#TITLE:A;\n").unwrap();
    std::fs::write(
        store
            .path()
            .join("b.sm"),
        "#TITLE:B;\n",
    )
    .unwrap();

    let songs = tempfile::tempdir().unwrap();
    symlink(&pack, songs.path().join("pack")).unwrap();
    symlink(
        store
            .path()
            .join("b.sm"),
        songs
            .path()
            .join("b.sm"),
    )
    .unwrap();

    let files = parsing::list_chart_files(songs.path()).unwrap();

    assert_eq!(
        files,
        vec![
            songs
                .path()
                .join("b.sm"),
            songs
                .path()
                .join("pack")
                .join("a.sm"),
        ]
    );
}
