use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

#[derive(Error, Debug)]
pub enum CfmlLintError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Rule {rule_id} failed: {message}")]
    Rule { rule_id: String, message: String },

    #[error("Unknown output format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CfmlLintError {
    /// Short category label used in CLI error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::ConfigParse { .. } | Self::TomlParse(_) => "Config",
            Self::FileRead { .. } | Self::Io(_) => "IO",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Parse(_) => "Parse",
            Self::Rule { .. } => "Rule",
            Self::UnsupportedFormat(_) => "Format",
            Self::Json(_) => "JSON",
        }
    }

    /// Underlying cause, when the error wraps another one.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::FileRead { source, .. } => Some(source.to_string()),
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// True for errors that must stop the run before any file is processed.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::ConfigParse { .. }
                | Self::InvalidPattern { .. }
                | Self::UnsupportedFormat(_)
                | Self::TomlParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CfmlLintError>;

/// Text carried by a caught panic payload.
#[must_use]
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
