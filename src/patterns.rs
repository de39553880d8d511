//! Matching rules used to read a changelog
//!
//! A [`PatternSet`] is owned by each parser instance, so parsers with
//! different rules can coexist. Every setter compiles the new pattern first
//! and leaves the set untouched when compilation fails.

use crate::domain::SEMVER_GRAMMAR;
use crate::error::{Changelog2VersionError, Result};
use regex::Regex;

/// Release header, e.g. `## [1.2.3] - 2022-07-31` or `## [1.2.3] - 2022-07-31T12:34:56`
pub const DEFAULT_HEADER_PATTERN: &str = concat!(
    r"^## ",
    r"\[(?P<potential_semver>[0-9]+\.[0-9]+\.[0-9]+[0-9A-Za-z.+-]*)\]",
    r" - ",
    r"(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})",
    r"(?:[T ](?P<time>[0-9]{2,}:[0-9]{2,}:[0-9]{2,}))?",
);

/// Date with optional time. The year is deliberately loose (two to four digits).
pub const DEFAULT_DATE_PATTERN: &str = concat!(
    r"(?P<date>[0-9]{2,4}-[0-9]{2}-[0-9]{2})",
    r"(?:[T ](?P<time>[0-9]{2,}:[0-9]{2,}:[0-9]{2,}))?",
);

/// Single-line HTML comment carrying a JSON object, e.g. `<!-- meta = {"type": "feature"} -->`
pub const DEFAULT_ANNOTATION_PATTERN: &str =
    r"^\s*<!--\s*meta\s*=\s*(?P<payload>\{.*\})\s*-->\s*$";

/// Capture group the annotation rule must define
pub const ANNOTATION_PAYLOAD_GROUP: &str = "payload";

/// Identifies one of the replaceable rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Header,
    Semver,
    Date,
    Annotation,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Header => "header",
            Rule::Semver => "semver",
            Rule::Date => "date",
            Rule::Annotation => "annotation",
        }
    }
}

/// The four matching rules of a changelog parser
#[derive(Debug, Clone)]
pub struct PatternSet {
    header: Regex,
    semver: Regex,
    date: Regex,
    annotation: Regex,
}

impl PatternSet {
    /// Create a pattern set with the built-in rules
    pub fn new() -> Self {
        PatternSet {
            header: Regex::new(DEFAULT_HEADER_PATTERN).expect("Invalid regex"),
            semver: Regex::new(SEMVER_GRAMMAR).expect("Invalid regex"),
            date: Regex::new(DEFAULT_DATE_PATTERN).expect("Invalid regex"),
            annotation: Regex::new(DEFAULT_ANNOTATION_PATTERN).expect("Invalid regex"),
        }
    }

    pub fn header(&self) -> &Regex {
        &self.header
    }

    pub fn semver(&self) -> &Regex {
        &self.semver
    }

    pub fn date(&self) -> &Regex {
        &self.date
    }

    pub fn annotation(&self) -> &Regex {
        &self.annotation
    }

    /// Replace the release boundary rule
    pub fn set_header(&mut self, pattern: &str) -> Result<()> {
        self.header = compile(Rule::Header, pattern)?;
        Ok(())
    }

    /// Replace the semver validity rule
    pub fn set_semver(&mut self, pattern: &str) -> Result<()> {
        self.semver = compile(Rule::Semver, pattern)?;
        Ok(())
    }

    /// Replace the date shape rule
    pub fn set_date(&mut self, pattern: &str) -> Result<()> {
        self.date = compile(Rule::Date, pattern)?;
        Ok(())
    }

    /// Replace the annotation rule. The pattern must define a `payload` group.
    pub fn set_annotation(&mut self, pattern: &str) -> Result<()> {
        let re = compile(Rule::Annotation, pattern)?;
        if !re
            .capture_names()
            .any(|name| name == Some(ANNOTATION_PAYLOAD_GROUP))
        {
            return Err(Changelog2VersionError::configuration(format!(
                "Annotation pattern '{}' has no '{}' capture group",
                pattern, ANNOTATION_PAYLOAD_GROUP
            )));
        }
        self.annotation = re;
        Ok(())
    }

    /// Replace a rule by name
    pub fn set(&mut self, rule: Rule, pattern: &str) -> Result<()> {
        match rule {
            Rule::Header => self.set_header(pattern),
            Rule::Semver => self.set_semver(pattern),
            Rule::Date => self.set_date(pattern),
            Rule::Annotation => self.set_annotation(pattern),
        }
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(rule: Rule, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        Changelog2VersionError::configuration(format!(
            "Invalid regex pattern for {} rule: {}",
            rule.name(),
            e
        ))
    })
}
