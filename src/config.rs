use crate::error::{Changelog2VersionError, Result};
use crate::patterns::{PatternSet, Rule};
use crate::render::TemplateRenderer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "changelog2version.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE_NAME: &str = ".changelog2version.toml";

/// Represents the complete configuration for changelog2version.
///
/// Contains optional overrides of the matching rules and rendering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub patterns: PatternsConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Replacement regexes for the changelog matching rules.
///
/// Unset entries keep the built-in rule.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PatternsConfig {
    #[serde(default)]
    pub header: Option<String>,

    #[serde(default)]
    pub semver: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub annotation: Option<String>,
}

impl PatternsConfig {
    fn overrides(&self) -> [(Rule, Option<&str>); 4] {
        [
            (Rule::Header, self.header.as_deref()),
            (Rule::Semver, self.semver.as_deref()),
            (Rule::Date, self.date.as_deref()),
            (Rule::Annotation, self.annotation.as_deref()),
        ]
    }

    /// Built-in rules with the configured overrides applied
    pub fn pattern_set(&self) -> Result<PatternSet> {
        let mut patterns = PatternSet::new();
        for (rule, pattern) in self.overrides() {
            if let Some(pattern) = pattern {
                tracing::debug!("Using custom {} regex: {}", rule.name(), pattern);
                patterns.set(rule, pattern)?;
            }
        }
        Ok(patterns)
    }
}

/// Configuration for version file rendering.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RenderConfig {
    /// Extra directory searched for templates
    #[serde(default)]
    pub template_dir: Option<String>,
}

impl RenderConfig {
    pub fn renderer(&self) -> Result<TemplateRenderer> {
        match &self.template_dir {
            Some(dir) => TemplateRenderer::with_template_dir(dir),
            None => Ok(TemplateRenderer::new()),
        }
    }
}

/// Parses configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| Changelog2VersionError::configuration(format!("Invalid config file: {}", e)))?;
    // fail on bad regexes at load time
    config.patterns.pattern_set()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog2version.toml` in current directory
/// 3. `.changelog2version.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
