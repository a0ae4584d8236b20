use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use stepchart::language::*;
use stepchart::parsing;
use stepchart::validation::*;

const BAMBOO: &str = r#"
#TITLE:Bamboo Blade;
#BANNER:banner.png;
#BACKGROUND:bg.png;
#JACKET:jacket.png;
#MUSIC:bamboo.ogg;
#OFFSET:1.898;
#BPMS:0.000=160.002;
#BGCHANGES:5.000=video.mp4=1.000=0=1=1;
"#;

fn parse(filename: &str, content: &str) -> Chart {
    parsing::parse(Path::new(filename), content).unwrap()
}

fn listing(paths: &[&str]) -> BTreeSet<PathBuf> {
    paths
        .iter()
        .map(PathBuf::from)
        .collect()
}

fn complete() -> BTreeSet<PathBuf> {
    listing(&[
        "songs/bamboo/bamboo.ssc",
        "songs/bamboo/banner.png",
        "songs/bamboo/bg.png",
        "songs/bamboo/jacket.png",
        "songs/bamboo/bamboo.ogg",
        "songs/bamboo/video.mp4",
    ])
}

#[test]
fn offset_matches_background_change() {
    let chart = parse("songs/bamboo/bamboo.ssc", BAMBOO);

    assert_eq!(validate(&chart.model, &complete()), Ok(()));
    assert_eq!(validate_chart(&chart, &complete()), Ok(()));
}

#[test]
fn background_change_at_zero() {
    let content = BAMBOO.replace("#BGCHANGES:5.000=", "#BGCHANGES:0.000=");
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate(&chart.model, &complete()),
        Err(ValidationError::ZeroBeat {
            offset: 1.898,
            expected: 5.061
        })
    );
}

#[test]
fn background_change_too_far() {
    let content = BAMBOO.replace("#BGCHANGES:5.000=", "#BGCHANGES:7.000=");
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    match validate(&chart.model, &complete()) {
        Err(ValidationError::BeatMismatch {
            expected,
            actual,
            difference,
            ..
        }) => {
            assert_eq!(expected, 5.061);
            assert_eq!(actual, 7.0);
            assert!(difference >= BEAT_TOLERANCE);
        }
        other => panic!("expected a beat mismatch, got {:?}", other),
    }
}

#[test]
fn offset_without_tempo() {
    let content = BAMBOO.replace("#BPMS:0.000=160.002;", "#BPMS:;");
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate(&chart.model, &complete()),
        Err(ValidationError::NoTempo { offset: 1.898 })
    );
}

#[test]
fn missing_banner() {
    let chart = parse("songs/bamboo/bamboo.ssc", BAMBOO);
    let mut files = complete();
    files.remove(Path::new("songs/bamboo/banner.png"));

    let error = validate(&chart.model, &files).unwrap_err();

    assert_eq!(
        error,
        ValidationError::FileMissing(
            Reference::Banner,
            PathBuf::from("songs/bamboo/banner.png")
        )
    );
    assert_eq!(error.kind(), ErrorKind::FileReferenceMissing);
    assert_eq!(error.directive(), Some("BANNER"));
}

#[test]
fn unspecified_references() {
    let content = BAMBOO.replace("#BANNER:banner.png;", "#BANNER:;");
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate(&chart.model, &complete()),
        Err(ValidationError::Unspecified(Reference::Banner))
    );

    let content = BAMBOO.replace("#JACKET:jacket.png;\n", "");
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate(&chart.model, &complete()),
        Err(ValidationError::Unspecified(Reference::Jacket))
    );
}

#[test]
fn legacy_charts_need_no_jacket() {
    let content = BAMBOO.replace("#JACKET:jacket.png;\n", "");
    let chart = parse("songs/bamboo/bamboo.sm", &content);
    let mut files = complete();
    files.insert(PathBuf::from("songs/bamboo/bamboo.sm"));

    assert_eq!(validate(&chart.model, &files), Ok(()));
}

#[test]
fn optional_references_checked_when_named() {
    let content = format!("{}#CDTITLE:cd.png;\n", BAMBOO);
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate(&chart.model, &complete()),
        Err(ValidationError::FileMissing(
            Reference::CdTitle,
            PathBuf::from("songs/bamboo/cd.png")
        ))
    );
}

#[test]
fn optional_references_in_order() {
    let content = format!("{}#LYRICSPATH:lyrics.lrc;\n", BAMBOO);
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate(&chart.model, &complete()),
        Err(ValidationError::FileMissing(
            Reference::LyricsPath,
            PathBuf::from("songs/bamboo/lyrics.lrc")
        ))
    );

    let content = format!("{}#LYRICSPATH:lyrics.lrc;\n#CDTITLE:cd.png;\n", BAMBOO);
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate_with_recovery(&chart.model, &complete()),
        Err(vec![
            ValidationError::FileMissing(
                Reference::CdTitle,
                PathBuf::from("songs/bamboo/cd.png")
            ),
            ValidationError::FileMissing(
                Reference::LyricsPath,
                PathBuf::from("songs/bamboo/lyrics.lrc")
            ),
        ])
    );

    let mut files = complete();
    files.insert(PathBuf::from("songs/bamboo/lyrics.lrc"));
    files.insert(PathBuf::from("songs/bamboo/cd.png"));

    assert_eq!(validate(&chart.model, &files), Ok(()));
}

#[test]
fn unknown_directive_reported() {
    let content = format!("{}#FUTUREOPTION:foo;\n", BAMBOO);
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    let error = validate(&chart.model, &complete()).unwrap_err();

    match &error {
        ValidationError::UnknownDirectives(unknown) => {
            assert_eq!(
                unknown
                    .names()
                    .collect::<Vec<_>>(),
                vec!["FUTUREOPTION"]
            );
        }
        other => panic!("expected unknown directives, got {:?}", other),
    }
    assert_eq!(error.kind(), ErrorKind::UnknownDirective);
    assert!(error
        .message()
        .contains("#FUTUREOPTION"));
}

#[test]
fn background_change_flags() {
    let content = BAMBOO.replace(
        "#BGCHANGES:5.000=video.mp4=1.000=0=1=1;",
        "#BGCHANGES:5.000==1.000=0=0=0;",
    );
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(
        validate_with_recovery(&chart.model, &complete()),
        Err(vec![
            ValidationError::BackgroundWithoutFile { beat: 5.0 },
            ValidationError::BackgroundLoops { beat: 5.0 },
        ])
    );

    let content = BAMBOO.replace(
        "#BGCHANGES:5.000=video.mp4=1.000=0=1=1;",
        "#BGCHANGES:5.000=video.mp4=1.000=0=0=0=StretchNoLoop;",
    );
    let chart = parse("songs/bamboo/bamboo.ssc", &content);

    assert_eq!(validate(&chart.model, &complete()), Ok(()));
}

#[test]
fn problems_in_check_order() {
    let content = format!(
        "{}#FUTUREOPTION:foo;\n",
        BAMBOO
            .replace("#BACKGROUND:bg.png;", "#BACKGROUND:;")
            .replace("#BGCHANGES:5.000=", "#BGCHANGES:0.000=")
    );
    let chart = parse("songs/bamboo/bamboo.ssc", &content);
    let files = listing(&["songs/bamboo/jacket.png"]);

    let problems = validate_with_recovery(&chart.model, &files).unwrap_err();
    let kinds: Vec<ErrorKind> = problems
        .iter()
        .map(ValidationError::kind)
        .collect();

    assert_eq!(
        kinds,
        vec![
            ErrorKind::IoFailure,
            ErrorKind::FileReferenceMissing,
            ErrorKind::FieldUnspecified,
            ErrorKind::ConsistencyWarning,
            ErrorKind::UnknownDirective,
        ]
    );
    assert_eq!(
        validate(&chart.model, &files),
        Err(problems[0].clone())
    );
}

#[test]
fn companion_media() {
    let chart = parse("songs/bamboo/bamboo.ssc", BAMBOO);
    let mut files = complete();
    files.remove(Path::new("songs/bamboo/bamboo.ogg"));
    files.remove(Path::new("songs/bamboo/video.mp4"));

    assert_eq!(
        validate_chart_with_recovery(&chart, &files),
        Err(vec![
            ValidationError::CompanionMissing(
                Companion::Audio,
                PathBuf::from("songs/bamboo/bamboo.ogg")
            ),
            ValidationError::CompanionMissing(
                Companion::Video,
                PathBuf::from("songs/bamboo/video.mp4")
            ),
        ])
    );

    let mut chart = chart;
    chart.audio = None;
    chart.video = None;

    assert_eq!(
        validate_chart(&chart, &complete()),
        Err(ValidationError::CompanionNotFound(Companion::Audio))
    );
}
