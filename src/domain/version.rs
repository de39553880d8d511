use crate::error::{Changelog2VersionError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use semver::{BuildMetadata, Prerelease};
use std::fmt;
use std::str::FromStr;

/// Canonical semantic version grammar (semver.org, 2.0.0)
pub const SEMVER_GRAMMAR: &str = concat!(
    r"^(?P<major>0|[1-9][0-9]*)\.",
    r"(?P<minor>0|[1-9][0-9]*)\.",
    r"(?P<patch>0|[1-9][0-9]*)",
    r"(?:-(?P<prerelease>(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
    r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
);

static CANONICAL: Lazy<Regex> = Lazy::new(|| Regex::new(SEMVER_GRAMMAR).expect("Invalid regex"));

/// Semantic version decomposed into its parts.
///
/// Numeric parts hold the digits exactly as matched by the grammar, so any
/// grammatically valid version decomposes regardless of magnitude. Prerelease
/// and build metadata reuse the identifier types of the `semver` crate.
///
/// The default value `0.0.0` is the "not found or invalid" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub pre: Prerelease,
    pub build: BuildMetadata,
}

impl Default for SemanticVersion {
    fn default() -> Self {
        SemanticVersion::new(0, 0, 0)
    }
}

impl SemanticVersion {
    /// Create a plain release version without prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major: major.to_string(),
            minor: minor.to_string(),
            patch: patch.to_string(),
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }

    /// Parse a complete semantic version string.
    ///
    /// The whole input must match the canonical grammar; anything else is a
    /// validation error.
    pub fn parse(text: &str) -> Result<Self> {
        let captures = CANONICAL.captures(text).ok_or_else(|| {
            Changelog2VersionError::validation(format!("Invalid SemVer string: '{}'", text))
        })?;

        let numeric = |name: &str| -> Result<String> {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| {
                    Changelog2VersionError::validation(format!(
                        "Missing {} version in '{}'",
                        name, text
                    ))
                })
        };

        let pre = match captures.name("prerelease") {
            Some(m) => Prerelease::new(m.as_str()).map_err(|e| {
                Changelog2VersionError::validation(format!(
                    "Invalid prerelease '{}': {}",
                    m.as_str(),
                    e
                ))
            })?,
            None => Prerelease::EMPTY,
        };

        let build = match captures.name("buildmetadata") {
            Some(m) => BuildMetadata::new(m.as_str()).map_err(|e| {
                Changelog2VersionError::validation(format!(
                    "Invalid build metadata '{}': {}",
                    m.as_str(),
                    e
                ))
            })?,
            None => BuildMetadata::EMPTY,
        };

        Ok(SemanticVersion {
            major: numeric("major")?,
            minor: numeric("minor")?,
            patch: numeric("patch")?,
            pre,
            build,
        })
    }

    /// Check a string against the canonical grammar without decomposing it
    pub fn is_valid(text: &str) -> bool {
        CANONICAL.is_match(text)
    }

    /// True for the `0.0.0` sentinel
    pub fn is_sentinel(&self) -> bool {
        *self == SemanticVersion::default()
    }

    /// Dot-separated prerelease identifiers in order
    pub fn prerelease_identifiers(&self) -> Vec<&str> {
        identifiers(self.pre.as_str())
    }

    /// Dot-separated build metadata identifiers in order
    pub fn build_identifiers(&self) -> Vec<&str> {
        identifiers(self.build.as_str())
    }
}

fn identifiers(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('.').collect()
    }
}

impl FromStr for SemanticVersion {
    type Err = Changelog2VersionError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}
