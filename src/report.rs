//! JSON summary of the releases found in a changelog
//!
//! Shape: `{"info": {"version": "..."}, "releases": {"<version>": [{"upload_time": "..."}]}}`

use crate::domain::ReleaseRecord;
use crate::error::Result;
use crate::extract::SENTINEL_VERSION;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportInfo {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseReport {
    pub info: ReportInfo,
    /// Uploads per version, in document order
    pub releases: Map<String, Value>,
}

impl ReleaseReport {
    /// Build the report; the first record is the current version
    pub fn from_records(records: &[ReleaseRecord]) -> Self {
        let mut releases = Map::new();
        for record in records {
            let upload = json!({ "upload_time": record.date.to_string() });
            match releases
                .entry(record.version_text.clone())
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                Value::Array(uploads) => uploads.push(upload),
                other => *other = Value::Array(vec![upload]),
            }
        }

        let version = records
            .first()
            .map(|r| r.version_text.clone())
            .unwrap_or_else(|| SENTINEL_VERSION.to_string());

        ReleaseReport {
            info: ReportInfo { version },
            releases,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        tracing::debug!("Release report written to '{}'", path.display());
        Ok(())
    }
}
