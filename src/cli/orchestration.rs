//! Main workflow orchestration logic
//!
//! Separates the changelog-to-version-file workflow from clap so it can be
//! driven programmatically and tested without spawning the binary.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{Annotations, ReleaseDate, ReleaseRecord, SemanticVersion};
use crate::extract::SENTINEL_VERSION;
use crate::patterns::Rule;
use crate::render::{self, version_context};
use crate::report::ReleaseReport;
use crate::scanner::ChangelogParser;

/// Kind of version file to generate from a built-in template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFileType {
    Py,
    C,
    Json,
}

impl VersionFileType {
    /// Name of the built-in template for this type
    pub fn template_name(&self) -> &'static str {
        match self {
            VersionFileType::Py => "py",
            VersionFileType::C => "c",
            VersionFileType::Json => "json",
        }
    }
}

/// Arguments for the conversion workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionArgs {
    /// Changelog to read
    pub changelog_file: PathBuf,

    /// Version file to render or update
    pub version_file: Option<PathBuf>,

    /// Built-in template selection
    pub version_file_type: Option<VersionFileType>,

    /// Template file or built-in template name, wins over `version_file_type`
    pub template_file: Option<String>,

    pub header_regex: Option<String>,
    pub semver_regex: Option<String>,
    pub date_regex: Option<String>,

    /// Where to write the JSON release report
    pub output: Option<PathBuf>,
}

impl ConversionArgs {
    fn template(&self) -> Option<&str> {
        self.template_file
            .as_deref()
            .or_else(|| self.version_file_type.map(|t| t.template_name()))
    }
}

/// What happened to the version file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionFileAction {
    Rendered(PathBuf),
    Updated(PathBuf),
    Untouched,
}

/// Result of a successful conversion workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The current release
    pub release: ReleaseRecord,

    /// Number of releases found in the changelog
    pub release_count: usize,

    pub version_file: VersionFileAction,

    /// Report file written, if requested
    pub report_file: Option<PathBuf>,
}

fn unreleased() -> ReleaseRecord {
    ReleaseRecord {
        version: SemanticVersion::default(),
        version_text: SENTINEL_VERSION.to_string(),
        date: ReleaseDate::default(),
        description: Vec::new(),
        annotations: Annotations::new(),
        raw_header_line: String::new(),
    }
}

/// Main conversion workflow
///
/// 1. Build the matching rules from config and argument overrides
/// 2. Parse every release of the changelog
/// 3. Render or update the version file from the current release
/// 4. Write the JSON report
pub fn run_workflow(args: &ConversionArgs, config: &Config) -> Result<WorkflowResult> {
    if !args.changelog_file.is_file() {
        bail!(
            "The file {} does not exist!",
            args.changelog_file.display()
        );
    }

    let mut patterns = config.patterns.pattern_set()?;
    let overrides = [
        (Rule::Header, args.header_regex.as_deref()),
        (Rule::Semver, args.semver_regex.as_deref()),
        (Rule::Date, args.date_regex.as_deref()),
    ];
    for (rule, pattern) in overrides {
        if let Some(pattern) = pattern {
            tracing::debug!("Use this regex for the {} rule: {}", rule.name(), pattern);
            patterns.set(rule, pattern)?;
        }
    }

    let mut parser = ChangelogParser::with_patterns(patterns);
    let records = parser
        .parse_releases(&args.changelog_file)
        .with_context(|| format!("Failed to parse '{}'", args.changelog_file.display()))?;

    let release = match records.first() {
        Some(record) => record.clone(),
        None => {
            tracing::warn!(
                "No release version line found in '{}'",
                args.changelog_file.display()
            );
            unreleased()
        }
    };

    let version_file = match (&args.version_file, args.template()) {
        (Some(path), Some(template)) => {
            let renderer = config.render.renderer()?;
            renderer
                .render_file(path, &version_context(&release), template)
                .with_context(|| format!("Failed to render '{}'", path.display()))?;
            VersionFileAction::Rendered(path.clone())
        }
        (Some(path), None) => {
            render::update_version_file(path, &release.version)
                .with_context(|| format!("Failed to update '{}'", path.display()))?;
            VersionFileAction::Updated(path.clone())
        }
        (None, Some(template)) => {
            tracing::warn!("Template '{}' given without a version file, nothing rendered", template);
            VersionFileAction::Untouched
        }
        (None, None) => VersionFileAction::Untouched,
    };

    let report_file = match &args.output {
        Some(path) => {
            ReleaseReport::from_records(&records)
                .write_to(path)
                .with_context(|| format!("Failed to write report '{}'", path.display()))?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(WorkflowResult {
        release,
        release_count: records.len(),
        version_file,
        report_file,
    })
}
