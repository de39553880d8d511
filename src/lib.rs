pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod patterns;
pub mod render;
pub mod report;
pub mod scanner;
pub mod segment;
pub mod ui;

pub use domain::{ReleaseDate, ReleaseRecord, SemanticVersion};
pub use error::{Changelog2VersionError, Result};
pub use patterns::PatternSet;
pub use scanner::ChangelogParser;
