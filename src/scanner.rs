//! Release header scanning and release assembly
//!
//! [`ChangelogParser`] walks a changelog line by line, finds release headers
//! and hands header lines and release bodies to the extractors in
//! [`crate::extract`]. It caches the description and annotations of the most
//! recent release from the last parse; the cache is rebuilt on every call,
//! so one instance should not be shared by concurrent parses.

use crate::domain::{Annotations, HeaderLine, ReleaseDate, ReleaseRecord, SemanticVersion};
use crate::error::{Changelog2VersionError, Result};
use crate::extract::{self, SemverMatch};
use crate::patterns::PatternSet;
use crate::segment::{split_segments, Segment};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Extracts release information from a changelog
#[derive(Debug, Clone, Default)]
pub struct ChangelogParser {
    patterns: PatternSet,
    semver_data: SemanticVersion,
    latest_description_lines: Vec<String>,
    latest_description: Vec<String>,
    latest_annotations: Annotations,
}

impl ChangelogParser {
    /// Create a parser with the built-in rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom rules
    pub fn with_patterns(patterns: PatternSet) -> Self {
        ChangelogParser {
            patterns,
            ..Self::default()
        }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn patterns_mut(&mut self) -> &mut PatternSet {
        &mut self.patterns
    }

    fn match_header<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.patterns.header().find(line).map(|m| m.as_str())
    }

    /// Return the first release header of the document, or an empty string.
    ///
    /// Stops reading at the first match.
    pub fn scan_first<R: BufRead>(&self, reader: R) -> Result<String> {
        for line in reader.lines() {
            let line = line?;
            if let Some(header) = self.match_header(&line) {
                tracing::debug!("First matching release version line: '{}'", header);
                return Ok(header.to_string());
            }
        }

        tracing::debug!("No release version line found");
        Ok(String::new())
    }

    /// Locate release headers in already loaded lines
    pub fn scan_headers(&self, lines: &[String], stop_after_first: bool) -> Vec<HeaderLine> {
        let mut headers = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            if let Some(text) = self.match_header(line) {
                headers.push(HeaderLine {
                    index,
                    text: text.to_string(),
                });
                if stop_after_first {
                    break;
                }
            }
        }
        headers
    }

    /// Return every release header in document order.
    ///
    /// With `stop_after_first` this reads only up to the first header and
    /// returns at most one line. Also rebuilds the cached description and
    /// annotations of the most recent release from the lines between the
    /// first and second header. Fails as a whole if that release carries a
    /// malformed annotation.
    pub fn parse_all<R: BufRead>(&mut self, reader: R, stop_after_first: bool) -> Result<Vec<String>> {
        let mut headers: Vec<String> = Vec::new();
        let mut captured: Vec<String> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if let Some(header) = self.match_header(&line) {
                headers.push(header.to_string());
                if stop_after_first {
                    break;
                }
            }
            if headers.len() == 1 {
                captured.push(line);
            }
        }

        // first captured line is the header itself
        let description_lines: Vec<String> = captured.into_iter().skip(1).collect();
        let annotations = extract::extract_annotations(&self.patterns, &description_lines)?;

        self.latest_description = extract::extract_description(&self.patterns, &description_lines);
        self.latest_description_lines = description_lines;
        self.latest_annotations = annotations;

        tracing::debug!("Found {} release version lines", headers.len());
        Ok(headers)
    }

    /// [`scan_first`](Self::scan_first) over a file
    pub fn parse_changelog(&self, changelog_file: &Path) -> Result<String> {
        let file = File::open(changelog_file)?;
        self.scan_first(BufReader::new(file))
    }

    /// [`parse_all`](Self::parse_all) over a file
    pub fn parse_changelog_all(
        &mut self,
        changelog_file: &Path,
        stop_after_first: bool,
    ) -> Result<Vec<String>> {
        let file = File::open(changelog_file)?;
        self.parse_all(BufReader::new(file), stop_after_first)
    }

    /// Build one record per release header, newest first.
    ///
    /// The first record is the current release; its version becomes the
    /// current semantic version and its body refreshes the latest
    /// description cache.
    pub fn releases<R: BufRead>(&mut self, reader: R) -> Result<Vec<ReleaseRecord>> {
        let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
        let headers = self.scan_headers(&lines, false);
        let segments = split_segments(&lines, &headers);

        let records = segments
            .iter()
            .map(|segment| self.assemble(segment))
            .collect::<Result<Vec<ReleaseRecord>>>()?;

        if let Some((segment, record)) = segments.first().zip(records.first()) {
            if !record.version.is_sentinel() {
                self.semver_data = record.version.clone();
            }
            self.latest_description_lines = segment.body.to_vec();
            self.latest_description = record.description.clone();
            self.latest_annotations = record.annotations.clone();
        } else {
            self.latest_description_lines.clear();
            self.latest_description.clear();
            self.latest_annotations.clear();
        }

        Ok(records)
    }

    /// [`releases`](Self::releases) over a file
    pub fn parse_releases(&mut self, changelog_file: &Path) -> Result<Vec<ReleaseRecord>> {
        let file = File::open(changelog_file)?;
        self.releases(BufReader::new(file))
    }

    fn assemble(&self, segment: &Segment<'_>) -> Result<ReleaseRecord> {
        let header = &segment.header.text;
        let semver = extract::extract_semver(&self.patterns, header)?;

        Ok(ReleaseRecord {
            version: semver.version_or_default(),
            version_text: semver.text,
            date: extract::extract_date(&self.patterns, header),
            description: extract::extract_description(&self.patterns, segment.body),
            annotations: extract::extract_annotations(&self.patterns, segment.body)?,
            raw_header_line: header.clone(),
        })
    }

    /// Extract the semantic version of a release line.
    ///
    /// A valid version also replaces the current semantic version.
    pub fn extract_semver(&mut self, release_version_line: &str) -> Result<SemverMatch> {
        let result = extract::extract_semver(&self.patterns, release_version_line)?;
        if let Some(version) = &result.version {
            self.semver_data = version.clone();
        }
        Ok(result)
    }

    /// Extract the release date of a release line
    pub fn extract_date(&self, release_version_line: &str) -> ReleaseDate {
        extract::extract_date(&self.patterns, release_version_line)
    }

    /// Current semantic version, `0.0.0` until a valid version was extracted
    pub fn semver_data(&self) -> &SemanticVersion {
        &self.semver_data
    }

    pub fn set_semver_data(&mut self, version: SemanticVersion) {
        self.semver_data = version;
    }

    /// Set the current semantic version from text
    pub fn set_current_version(&mut self, value: &str) -> Result<()> {
        let version = SemanticVersion::parse(value).map_err(|_| {
            Changelog2VersionError::type_mismatch(format!(
                "Value '{}' is not a semantic version",
                value
            ))
        })?;
        self.semver_data = version;
        Ok(())
    }

    /// Raw lines between the first and second release header of the last parse
    pub fn latest_description_lines(&self) -> &[String] {
        &self.latest_description_lines
    }

    /// Description of the most recent release, annotation line removed
    pub fn latest_description(&self) -> String {
        self.latest_description.join("\n").trim().to_string()
    }

    /// Annotations of the most recent release, empty when none were given
    pub fn latest_annotations(&self) -> &Annotations {
        &self.latest_annotations
    }
}
