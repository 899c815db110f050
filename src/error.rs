//! Error types for template rendering and generation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid condition in {file}: '{expression}': {message}")]
    Condition {
        file: String,
        expression: String,
        message: String,
    },

    #[error("Invalid parameters for function '{function}' in {file}: {message}")]
    InvalidParameters {
        file: String,
        function: String,
        message: String,
    },

    #[error("Invalid mapping '{mapping}': expected NAME:VALUE")]
    InvalidMapping { mapping: String },

    #[error("Invalid escape character '{escape}': {message}")]
    InvalidEscape { escape: String, message: String },

    #[error("Invalid variable '{name}': {message}")]
    InvalidVariable { name: String, message: String },

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

pub type Result<T> = std::result::Result<T, TemplateError>;

impl TemplateError {
    pub fn condition(
        file: impl Into<String>,
        expression: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Condition {
            file: file.into(),
            expression: expression.into(),
            message: message.into(),
        }
    }

    pub fn invalid_parameters(
        file: impl Into<String>,
        function: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameters {
            file: file.into(),
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn invalid_mapping(mapping: impl Into<String>) -> Self {
        Self::InvalidMapping {
            mapping: mapping.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}
