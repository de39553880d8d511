//! Domain types - values produced by parsing a changelog

pub mod release;
pub mod version;

pub use release::{Annotations, HeaderLine, ReleaseDate, ReleaseRecord, SENTINEL_DATE};
pub use version::{SemanticVersion, SEMVER_GRAMMAR};
