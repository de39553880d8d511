use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use changelog2version::cli::orchestration::{
    run_workflow, ConversionArgs, VersionFileAction, VersionFileType,
};
use changelog2version::{config, ui};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FileTypeArg {
    Py,
    C,
    Json,
}

impl From<FileTypeArg> for VersionFileType {
    fn from(arg: FileTypeArg) -> Self {
        match arg {
            FileTypeArg::Py => VersionFileType::Py,
            FileTypeArg::C => VersionFileType::C,
            FileTypeArg::Json => VersionFileType::Json,
        }
    }
}

#[derive(clap::Parser)]
#[command(
    name = "changelog2version",
    version,
    about = "Update version info file based on changelog entry"
)]
struct Args {
    #[arg(long, alias = "changelog_file", help = "Path to changelog file")]
    changelog_file: PathBuf,

    #[arg(long, alias = "version_file", help = "Path to version file")]
    version_file: Option<PathBuf>,

    #[arg(
        long,
        alias = "version_file_type",
        value_enum,
        help = "Type of version file to generate"
    )]
    version_file_type: Option<FileTypeArg>,

    #[arg(
        long,
        alias = "template_file",
        help = "Template file or built-in template name to render the version file"
    )]
    template_file: Option<String>,

    #[arg(
        long,
        alias = "version_line_regex",
        help = "Regex to extract complete version line from a changelog"
    )]
    header_regex: Option<String>,

    #[arg(
        long,
        alias = "semver_line_regex",
        help = "Regex to extract semver part of from a version line"
    )]
    semver_regex: Option<String>,

    #[arg(long, help = "Regex to extract the release date from a version line")]
    date_regex: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Print the latest changelog version to stdout")]
    print: bool,

    #[arg(short, long, help = "Write a JSON report of all releases to this file")]
    output: Option<PathBuf>,

    #[arg(short, long, help = "Output debug log messages to stderr")]
    debug: bool,
}

impl Args {
    fn workflow_args(&self) -> ConversionArgs {
        ConversionArgs {
            changelog_file: self.changelog_file.clone(),
            version_file: self.version_file.clone(),
            version_file_type: self.version_file_type.map(VersionFileType::from),
            template_file: self.template_file.clone(),
            header_regex: self.header_regex.clone(),
            semver_regex: self.semver_regex.clone(),
            date_regex: self.date_regex.clone(),
            output: self.output.clone(),
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let result = match run_workflow(&args.workflow_args(), &config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if args.print {
        println!("{}", ui::format_version_line(&result.release));
    }

    if args.debug {
        ui::display_release(&result.release);
    }

    match &result.version_file {
        VersionFileAction::Rendered(path) => {
            ui::display_success(&format!("Rendered version file {}", path.display()))
        }
        VersionFileAction::Updated(path) => {
            ui::display_success(&format!("Updated version file {}", path.display()))
        }
        VersionFileAction::Untouched => {}
    }

    if let Some(path) = &result.report_file {
        ui::display_status(&format!(
            "Wrote report of {} releases to {}",
            result.release_count,
            path.display()
        ));
    }

    Ok(())
}
