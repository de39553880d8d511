use thiserror::Error;

/// Unified error type for changelog2version operations
#[derive(Error, Debug)]
pub enum Changelog2VersionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Annotation parse error: {0}")]
    AnnotationParse(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in changelog2version
pub type Result<T> = std::result::Result<T, Changelog2VersionError>;

impl Changelog2VersionError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        Changelog2VersionError::Configuration(msg.into())
    }

    /// Create a type mismatch error with context
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Changelog2VersionError::TypeMismatch(msg.into())
    }

    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        Changelog2VersionError::Validation(msg.into())
    }

    /// Create an annotation parse error with context
    pub fn annotation_parse(msg: impl Into<String>) -> Self {
        Changelog2VersionError::AnnotationParse(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        Changelog2VersionError::Template(msg.into())
    }
}
