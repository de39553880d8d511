//! Version file generation
//!
//! Templates are Jinja templates rendered with `minijinja` from a
//! [`RenderContext`]. Trailing newlines are kept and no output escaping is
//! applied. Templates loaded from disk may include or extend their siblings.
//! Besides rendering, a Python version file can be updated in place by
//! rewriting its `__version_info__` line.

use crate::domain::{ReleaseRecord, SemanticVersion};
use crate::error::{Changelog2VersionError, Result};
use minijinja::{path_loader, AutoEscape, Environment};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Values available to templates
pub type RenderContext = BTreeMap<String, String>;

/// Prefix of the line rewritten by [`update_version_info`]
pub const VERSION_INFO_PREFIX: &str = "__version_info__ = ";

const BUILTIN_TEMPLATES: &[(&str, &str, &str)] = &[
    ("py", "version.py", include_str!("../templates/version.py")),
    ("c", "version.h", include_str!("../templates/version.h")),
    ("json", "version.json", include_str!("../templates/version.json")),
];

/// A loaded template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// File name of the template, e.g. `version.py`
    pub name: String,
    pub content: String,
    /// Directory the template was loaded from, `None` for built-ins
    pub dir: Option<PathBuf>,
}

impl Template {
    fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

/// Look up a built-in template by short name (`py`) or file name (`version.py`)
pub fn builtin_template(name: &str) -> Option<Template> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(short, file, _)| *short == name || *file == name)
        .map(|(_, file, content)| Template {
            name: file.to_string(),
            content: content.to_string(),
            dir: None,
        })
}

/// Template values derived from a release
pub fn version_context(record: &ReleaseRecord) -> RenderContext {
    let version = &record.version;
    let mut context = RenderContext::new();
    context.insert("major_version".to_string(), version.major.to_string());
    context.insert("minor_version".to_string(), version.minor.to_string());
    context.insert("patch_version".to_string(), version.patch.to_string());
    context.insert("prerelease_data".to_string(), version.pre.to_string());
    context.insert("build_data".to_string(), version.build.to_string());
    context.insert("semver_string".to_string(), record.version_text.clone());
    context.insert("release_date".to_string(), record.date.to_string());
    context.insert("description".to_string(), record.description_text());
    context
}

fn template_error(e: minijinja::Error) -> Changelog2VersionError {
    Changelog2VersionError::template(format!("Failed to render template: {}", e))
}

/// Render a template with the given context.
///
/// Undefined variables render as empty text.
pub fn render_template(template: &Template, context: &RenderContext) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    if let Some(dir) = &template.dir {
        env.set_loader(path_loader(dir));
    }
    env.add_template_owned(template.name.clone(), template.content.clone())
        .map_err(template_error)?;

    env.get_template(&template.name)
        .and_then(|t| t.render(context))
        .map_err(template_error)
}

/// Finds and renders templates
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    template_dir: Option<PathBuf>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` as an additional template search directory
    pub fn with_template_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            return Err(Changelog2VersionError::template(format!(
                "Specified directory '{}' doesn't exist",
                dir.display()
            )));
        }
        if !dir.is_dir() {
            return Err(Changelog2VersionError::template(
                "Template path can only be a directory",
            ));
        }
        Ok(TemplateRenderer {
            template_dir: Some(dir),
        })
    }

    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    /// Resolve a template.
    ///
    /// Lookup order: path as given, path inside the template directory,
    /// built-in template name.
    pub fn find_template(&self, template: &str) -> Result<Template> {
        let candidates = std::iter::once(PathBuf::from(template))
            .chain(self.template_dir.iter().map(|dir| dir.join(template)));

        for path in candidates {
            if path.is_dir() {
                return Err(Changelog2VersionError::template(
                    "Can not render a directory, please specify a single template file",
                ));
            }
            if path.is_file() {
                tracing::debug!("Template '{}' found", path.display());
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(template)
                    .to_string();
                return Ok(Template {
                    name,
                    content: fs::read_to_string(&path)?,
                    dir: path.parent().map(Path::to_path_buf),
                });
            }
        }

        if let Some(builtin) = builtin_template(template) {
            tracing::debug!("Using built-in template '{}'", builtin.name);
            return Ok(builtin);
        }

        tracing::error!("Template '{}' neither found on disk nor built in", template);
        Err(Changelog2VersionError::template(format!(
            "Template path/file '{}' does not exist",
            template
        )))
    }

    /// Render `template` into `file_path` and return the rendered text.
    ///
    /// Adds `file_name`, `file_name_without_suffix`, `template_name` and
    /// `template_name_without_suffix` to the context.
    pub fn render_file(
        &self,
        file_path: &Path,
        context: &RenderContext,
        template: &str,
    ) -> Result<String> {
        let template = self.find_template(template)?;

        let mut context = context.clone();
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let file_stem = file_path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        context.insert("file_name".to_string(), file_name.to_string());
        context.insert("file_name_without_suffix".to_string(), file_stem.to_string());
        context.insert("template_name".to_string(), template.name.clone());
        context.insert(
            "template_name_without_suffix".to_string(),
            template.stem().to_string(),
        );

        let rendered = render_template(&template, &context)?;

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if file_path.exists() {
            tracing::info!("Overwriting file '{}'", file_path.display());
        }
        fs::write(file_path, &rendered)?;

        Ok(rendered)
    }
}

/// `__version_info__ = ('1', '2', '3')`
pub fn version_info_line(version: &SemanticVersion) -> String {
    format!(
        "{}('{}', '{}', '{}')",
        VERSION_INFO_PREFIX, version.major, version.minor, version.patch
    )
}

/// Replace every `__version_info__` line, keeping all other lines and line endings
pub fn update_version_info(content: &str, version: &SemanticVersion) -> String {
    let new_line = version_info_line(version);
    content
        .split_inclusive('\n')
        .map(|line| {
            if line.starts_with(VERSION_INFO_PREFIX) {
                let body = line.trim_end_matches(['\r', '\n']);
                let ending = match &line[body.len()..] {
                    "" => "\n",
                    ending => ending,
                };
                format!("{}{}", new_line, ending)
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Rewrite the `__version_info__` line of a version file in place
pub fn update_version_file(version_file: &Path, version: &SemanticVersion) -> Result<()> {
    let content = fs::read_to_string(version_file)?;
    fs::write(version_file, update_version_info(&content, version))?;
    tracing::debug!(
        "Version file '{}' updated with '{}'",
        version_file.display(),
        version_info_line(version)
    );
    Ok(())
}
