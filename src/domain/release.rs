use crate::domain::version::SemanticVersion;
use std::fmt;

/// Structured annotation block attached to a release
pub type Annotations = serde_json::Map<String, serde_json::Value>;

/// Date placeholder used when no date-shaped text is found
pub const SENTINEL_DATE: &str = "1970-01-01";

/// A line recognised as a release boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    /// Zero-based line number in the document
    pub index: usize,
    /// Matched header text
    pub text: String,
}

/// Release date as found in the changelog.
///
/// Holds the matched text unchanged: a date, optionally followed by a
/// `T` or space separated time. No calendar validation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDate(String);

impl ReleaseDate {
    pub fn new(text: impl Into<String>) -> Self {
        ReleaseDate(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date part
    pub fn date(&self) -> &str {
        match self.0.find(['T', ' ']) {
            Some(pos) => &self.0[..pos],
            None => &self.0,
        }
    }

    /// The time of day, if one followed the date
    pub fn time(&self) -> Option<&str> {
        self.0.find(['T', ' ']).map(|pos| &self.0[pos + 1..])
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == SENTINEL_DATE
    }
}

impl Default for ReleaseDate {
    fn default() -> Self {
        ReleaseDate(SENTINEL_DATE.to_string())
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything extracted for one release entry
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRecord {
    /// Decomposed version, `0.0.0` when the tag is not a semantic version
    pub version: SemanticVersion,
    /// Version text exactly as written in the changelog
    pub version_text: String,
    pub date: ReleaseDate,
    /// Body lines, trimmed, without the annotation line
    pub description: Vec<String>,
    pub annotations: Annotations,
    pub raw_header_line: String,
}

impl ReleaseRecord {
    /// Description lines joined into a single block of text
    pub fn description_text(&self) -> String {
        self.description.join("\n").trim().to_string()
    }
}
