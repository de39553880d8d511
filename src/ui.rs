//! Terminal output for the command-line tool
//!
//! Status output goes to stderr so that stdout carries only what `--print`
//! asks for.

use crate::domain::ReleaseRecord;
use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// One-line summary of a release plus its annotations
pub fn display_release(record: &ReleaseRecord) {
    eprintln!(
        "\n{} {} ({})",
        style("Latest release:").bold(),
        style(&record.version_text).green(),
        record.date
    );
    for (key, value) in &record.annotations {
        eprintln!("  {}: {}", style(key).underlined(), value);
    }
}

/// Plain-text version line for stdout
pub fn format_version_line(record: &ReleaseRecord) -> String {
    record.version_text.clone()
}
