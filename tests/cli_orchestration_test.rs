// tests/cli_orchestration_test.rs
use changelog2version::cli::orchestration::{
    run_workflow, ConversionArgs, VersionFileAction, VersionFileType,
};
use changelog2version::config::{load_config, Config};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn changelog(name: &str) -> PathBuf {
    PathBuf::from("tests/fixtures/valid").join(name)
}

#[test]
fn test_workflow_without_outputs() {
    let args = ConversionArgs {
        changelog_file: changelog("changelog_with_date.md"),
        ..Default::default()
    };

    let result = run_workflow(&args, &Config::default()).unwrap();
    assert_eq!(result.release.version_text, "1.2.3");
    assert_eq!(result.release_count, 3);
    assert_eq!(result.version_file, VersionFileAction::Untouched);
    assert_eq!(result.report_file, None);
}

#[test]
fn test_workflow_missing_changelog() {
    let args = ConversionArgs {
        changelog_file: PathBuf::from("tests/fixtures/missing.md"),
        ..Default::default()
    };

    let err = run_workflow(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_workflow_renders_version_file_type() {
    let dir = TempDir::new().unwrap();
    let version_file = dir.path().join("version.py");
    let args = ConversionArgs {
        changelog_file: changelog("changelog_with_date_and_time.md"),
        version_file: Some(version_file.clone()),
        version_file_type: Some(VersionFileType::Py),
        ..Default::default()
    };

    let result = run_workflow(&args, &Config::default()).unwrap();
    assert_eq!(result.version_file, VersionFileAction::Rendered(version_file.clone()));

    let content = fs::read_to_string(&version_file).unwrap();
    assert!(content.contains(r#"("93", "10", "1")"#));
    assert!(content.contains("2022-07-31 12:34:56"));
}

#[test]
fn test_workflow_updates_version_file_in_place() {
    let dir = TempDir::new().unwrap();
    let version_file = dir.path().join("version.py");
    fs::write(&version_file, "__version_info__ = ('0', '0', '0')\n").unwrap();

    let args = ConversionArgs {
        changelog_file: changelog("changelog_with_date.md"),
        version_file: Some(version_file.clone()),
        ..Default::default()
    };

    let result = run_workflow(&args, &Config::default()).unwrap();
    assert_eq!(result.version_file, VersionFileAction::Updated(version_file.clone()));
    assert_eq!(
        fs::read_to_string(&version_file).unwrap(),
        "__version_info__ = ('1', '2', '3')\n"
    );
}

#[test]
fn test_workflow_writes_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("reports").join("changelog.json");
    let args = ConversionArgs {
        changelog_file: changelog("changelog_with_date.md"),
        output: Some(report.clone()),
        ..Default::default()
    };

    run_workflow(&args, &Config::default()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["info"]["version"], "1.2.3");
    assert_eq!(value["releases"]["1.2.2"][0]["upload_time"], "2022-07-30");
    assert_eq!(value["releases"].as_object().unwrap().len(), 3);
}

#[test]
fn test_workflow_rejects_invalid_regex_argument() {
    let args = ConversionArgs {
        changelog_file: changelog("changelog_with_date.md"),
        semver_regex: Some("[".to_string()),
        ..Default::default()
    };

    let err = run_workflow(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("Invalid regex pattern"));
}

#[test]
fn test_workflow_with_custom_header_from_config() {
    let dir = TempDir::new().unwrap();
    let changelog_file = dir.path().join("CHANGES.md");
    fs::write(
        &changelog_file,
        "# Changes\n### [4.5.6] 2024-02-29\n- Leap day release\n",
    )
    .unwrap();

    let config = load_config(Some("tests/fixtures/config_with_patterns.toml")).unwrap();
    let version_file = dir.path().join("VERSION");
    let args = ConversionArgs {
        changelog_file,
        version_file: Some(version_file.clone()),
        template_file: Some("VERSION.txt".to_string()),
        ..Default::default()
    };

    let result = run_workflow(&args, &config).unwrap();
    assert_eq!(result.release.version_text, "4.5.6");
    assert_eq!(
        fs::read_to_string(&version_file).unwrap(),
        "4.5.6 (2024-02-29) -> VERSION via VERSION\n"
    );
}

#[test]
fn test_workflow_without_releases_uses_sentinel() {
    let dir = TempDir::new().unwrap();
    let changelog_file = dir.path().join("CHANGELOG.md");
    fs::write(&changelog_file, "# Changelog\n\n## [Unreleased]\n").unwrap();

    let args = ConversionArgs {
        changelog_file,
        ..Default::default()
    };

    let result = run_workflow(&args, &Config::default()).unwrap();
    assert_eq!(result.release.version_text, "0.0.0");
    assert_eq!(result.release.date.as_str(), "1970-01-01");
    assert_eq!(result.release_count, 0);
}
