//! Field extractors for header lines and release bodies

use crate::domain::{Annotations, ReleaseDate, SemanticVersion};
use crate::error::{Changelog2VersionError, Result};
use crate::patterns::{PatternSet, ANNOTATION_PAYLOAD_GROUP};
use once_cell::sync::Lazy;
use regex::Regex;

/// Version text returned when a line carries no semantic version
pub const SENTINEL_VERSION: &str = "0.0.0";

static BRACKET_CONTENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("Invalid regex"));

/// Outcome of semver extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemverMatch {
    /// Matched text, or `0.0.0` when nothing matched
    pub text: String,
    /// Decomposed version, present only for a valid match
    pub version: Option<SemanticVersion>,
}

impl SemverMatch {
    fn sentinel() -> Self {
        SemverMatch {
            text: SENTINEL_VERSION.to_string(),
            version: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.version.is_some()
    }

    /// Decomposed version, or the `0.0.0` sentinel
    pub fn version_or_default(&self) -> SemanticVersion {
        self.version.clone().unwrap_or_default()
    }
}

/// Extract the semantic version from the first `[...]` of a line.
///
/// No brackets or no match of the semver rule yields the `0.0.0` sentinel.
/// Text matched by the rule that is not a valid semantic version is a
/// validation error. The matched text is returned unchanged.
pub fn extract_semver(patterns: &PatternSet, line: &str) -> Result<SemverMatch> {
    let potential_semver = match BRACKET_CONTENT.captures(line).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => return Ok(SemverMatch::sentinel()),
    };

    let matched = match patterns.semver().find(potential_semver) {
        Some(m) => m.as_str(),
        None => {
            tracing::warn!("No SemVer string found in given release version line: '{}'", line);
            return Ok(SemverMatch::sentinel());
        }
    };

    let version = SemanticVersion::parse(matched).map_err(|e| {
        tracing::error!("Parsed SemVer string is invalid, check the changelog format");
        e
    })?;
    tracing::debug!("Extracted SemVer string: '{}'", matched);

    Ok(SemverMatch {
        text: matched.to_string(),
        version: Some(version),
    })
}

/// Extract the first date-shaped text of a line, with its time if present.
///
/// Only the shape is checked. Returns `1970-01-01` when nothing matches.
pub fn extract_date(patterns: &PatternSet, line: &str) -> ReleaseDate {
    match patterns.date().find(line) {
        Some(m) => ReleaseDate::new(m.as_str()),
        None => ReleaseDate::default(),
    }
}

/// Index of the first body line matching the annotation rule
pub fn annotation_line_index<S: AsRef<str>>(patterns: &PatternSet, body: &[S]) -> Option<usize> {
    body.iter()
        .position(|line| patterns.annotation().is_match(line.as_ref()))
}

/// Parse the annotation block of a release body.
///
/// A body without an annotation line gives an empty mapping. The payload is
/// read as JSON5, so single-quoted strings and unquoted keys are accepted
/// alongside plain JSON. A payload that does not parse to an object is an
/// error.
pub fn extract_annotations<S: AsRef<str>>(patterns: &PatternSet, body: &[S]) -> Result<Annotations> {
    let line = match annotation_line_index(patterns, body) {
        Some(index) => body[index].as_ref(),
        None => return Ok(Annotations::new()),
    };

    let payload = patterns
        .annotation()
        .captures(line)
        .and_then(|c| c.name(ANNOTATION_PAYLOAD_GROUP))
        .map(|m| m.as_str())
        .unwrap_or_default();

    let value: serde_json::Value = json5::from_str(payload).map_err(|e| {
        Changelog2VersionError::annotation_parse(format!(
            "Cannot parse annotation '{}': {}",
            payload, e
        ))
    })?;

    match value {
        serde_json::Value::Object(map) => {
            tracing::debug!("Extracted annotation with {} keys", map.len());
            Ok(map)
        }
        other => Err(Changelog2VersionError::annotation_parse(format!(
            "Annotation must be an object, got '{}'",
            other
        ))),
    }
}

/// Trimmed body lines, without the annotation line
pub fn extract_description<S: AsRef<str>>(patterns: &PatternSet, body: &[S]) -> Vec<String> {
    let skip = annotation_line_index(patterns, body);
    body.iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .map(|(_, line)| line.as_ref().trim().to_string())
        .collect()
}
