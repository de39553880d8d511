// tests/scanner_test.rs
use changelog2version::{ChangelogParser, Changelog2VersionError, SemanticVersion};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_parse_changelog_file() {
    let cases = vec![
        ("changelog_with_date.md", "## [1.2.3] - 2022-07-31"),
        (
            "changelog_with_date_and_time.md",
            "## [93.10.1] - 2022-07-31 12:34:56",
        ),
    ];

    let parser = ChangelogParser::new();
    for (file_name, expected) in cases {
        let changelog = Path::new("tests/fixtures/valid").join(file_name);
        let result = parser.parse_changelog(&changelog).unwrap();
        assert_eq!(result, expected, "file: {}", file_name);
    }
}

#[test]
fn test_parse_changelog_missing_file() {
    let parser = ChangelogParser::new();
    let err = parser
        .parse_changelog(Path::new("tests/fixtures/does_not_exist.md"))
        .unwrap_err();
    assert!(matches!(err, Changelog2VersionError::Io(_)));
}

#[test]
fn test_parse_changelog_all_with_annotation() {
    let mut parser = ChangelogParser::new();
    let headers = parser
        .parse_changelog_all(Path::new("tests/fixtures/valid/changelog_with_date.md"), false)
        .unwrap();

    assert_eq!(
        headers,
        vec![
            "## [1.2.3] - 2022-07-31",
            "## [1.2.2] - 2022-07-30",
            "## [0.1.0] - 2022-07-01",
        ]
    );

    let annotations = parser.latest_annotations();
    assert_eq!(annotations["type"], "bugfix");
    assert_eq!(annotations["scope"][0], "internal");
    assert_eq!(
        parser.latest_description(),
        "### Fixed\n- Version line is found even if the date is followed by a time"
    );
    assert!(!parser
        .latest_description_lines()
        .iter()
        .any(|line| line.starts_with("## [")));
}

#[test]
fn test_parse_all_two_headers_round_trip() {
    let document = "\
intro
## [2.0.0] - 2020-01-01
first
second
## [1.0.0] - 2019-01-01
older
";
    let mut parser = ChangelogParser::new();
    let headers = parser.parse_all(document.as_bytes(), false).unwrap();
    assert_eq!(headers, vec!["## [2.0.0] - 2020-01-01", "## [1.0.0] - 2019-01-01"]);
    assert_eq!(parser.latest_description_lines(), &["first", "second"]);
    assert!(parser.latest_annotations().is_empty());
}

#[test]
fn test_parse_all_malformed_latest_annotation_fails() {
    let document = "\
## [2.0.0] - 2020-01-01
<!-- meta = {not json} -->
## [1.0.0] - 2019-01-01
";
    let mut parser = ChangelogParser::new();
    let err = parser.parse_all(document.as_bytes(), false).unwrap_err();
    assert!(matches!(err, Changelog2VersionError::AnnotationParse(_)));
}

#[test]
fn test_releases_from_file() {
    let mut parser = ChangelogParser::new();
    let records = parser
        .parse_releases(Path::new("tests/fixtures/valid/changelog_with_date_and_time.md"))
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].version, SemanticVersion::new(93, 10, 1));
    assert_eq!(records[0].date.as_str(), "2022-07-31 12:34:56");
    assert_eq!(records[0].date.time(), Some("12:34:56"));
    assert_eq!(records[1].date.as_str(), "2022-07-30T08:00:00");
    assert_eq!(
        records[1].description_text(),
        "### Added\n- Support `T` as date/time separator"
    );
}

#[test]
fn test_releases_accept_single_quoted_annotations() {
    let mut parser = ChangelogParser::new();
    let records = parser
        .parse_releases(Path::new("tests/fixtures/valid/changelog_with_date.md"))
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].annotations["type"], "bugfix");
    assert_eq!(records[1].version_text, "1.2.2");
    assert_eq!(records[1].annotations["scope"][0], "docs");
    assert_eq!(records[1].description_text(), "### Fixed\n- Typo in README");
    assert!(records[2].annotations.is_empty());
}

#[test]
fn test_releases_with_oversized_version_numbers() {
    let major = "999999999999999999999999999999999999999999";
    let document = format!(
        "## [{}.0.0] - 2020-01-01\n- Huge\n## [1.0.0] - 2019-01-01\n",
        major
    );

    let mut parser = ChangelogParser::new();
    let records = parser.releases(document.as_bytes()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].version.major, major);
    assert_eq!(records[0].version_text, format!("{}.0.0", major));
    assert_eq!(parser.semver_data().to_string(), format!("{}.0.0", major));
}

#[test]
fn test_scan_first_stops_reading_after_match() {
    // everything after the header is not valid UTF-8 and must never be read
    let document: &[u8] = b"## [1.0.0] - 2020-01-01\n\xff\xfe\n## [0.9.0] - 2019-01-01\n";

    let parser = ChangelogParser::new();
    let header = parser.scan_first(document).unwrap();
    assert_eq!(header, "## [1.0.0] - 2020-01-01");

    let mut parser = ChangelogParser::new();
    let err = parser.parse_all(document, false).unwrap_err();
    assert!(matches!(err, Changelog2VersionError::Io(_)));
}

#[test]
fn test_releases_fail_on_any_malformed_annotation() {
    let mut parser = ChangelogParser::new();
    let err = parser
        .parse_releases(Path::new("tests/fixtures/invalid/malformed_annotation.md"))
        .unwrap_err();
    assert!(matches!(err, Changelog2VersionError::AnnotationParse(_)));
}

#[test]
fn test_releases_with_crlf_line_endings() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"## [1.0.0] - 2019-01-01\r\n- Windows line\r\n")
        .unwrap();
    temp_file.flush().unwrap();

    let mut parser = ChangelogParser::new();
    let records = parser.parse_releases(temp_file.path()).unwrap();
    assert_eq!(records[0].raw_header_line, "## [1.0.0] - 2019-01-01");
    assert_eq!(records[0].description, vec!["- Windows line"]);
}

#[test]
fn test_parsers_with_different_rules_coexist() {
    let document = "# v3.1.4 2021-03-14\n## [1.0.0] - 2019-01-01\n";

    let mut custom = ChangelogParser::new();
    custom
        .patterns_mut()
        .set_header(r"^# v[0-9.]+ [0-9-]+")
        .unwrap();
    let default = ChangelogParser::new();

    assert_eq!(custom.scan_first(document.as_bytes()).unwrap(), "# v3.1.4 2021-03-14");
    assert_eq!(
        default.scan_first(document.as_bytes()).unwrap(),
        "## [1.0.0] - 2019-01-01"
    );
}
