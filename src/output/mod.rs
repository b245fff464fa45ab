mod bitbucket;
mod csv;
mod error_output;
mod json;
mod progress;
mod sarif;
mod text;

pub use bitbucket::BitbucketFormatter;
pub use csv::CsvFormatter;
pub use error_output::ErrorOutput;
pub use json::JsonFormatter;
pub use progress::RunProgress;
pub use sarif::SarifFormatter;
pub use text::TextFormatter;

use std::io::IsTerminal;

use crate::error::{CfmlLintError, Result};
use crate::result::ToolboxResult;

pub const TOOL_NAME: &str = "cfml-lint";
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Renders a finished run. Renderers never modify the result.
pub trait OutputFormatter {
    /// Format the run result into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, result: &ToolboxResult) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
    Csv,
    Bitbucket,
}

impl std::str::FromStr for OutputFormat {
    type Err = CfmlLintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "console" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            "csv" => Ok(Self::Csv),
            "bitbucket" => Ok(Self::Bitbucket),
            _ => Err(CfmlLintError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Colors when the stream is a TTY and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves the mode against stdout.
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        }
    }
}

/// ANSI color codes
pub(crate) mod ansi {
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

/// The renderer for `format`.
#[must_use]
pub fn create_formatter(format: OutputFormat, color: ColorMode, verbose: u8) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::with_verbose(color, verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Sarif => Box::new(SarifFormatter::new()),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Bitbucket => Box::new(BitbucketFormatter),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
