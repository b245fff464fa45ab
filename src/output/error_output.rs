//! Fatal error and warning output for the CLI.
//!
//! Format: `✖ Type: message` / `  × detail` / `  help: suggestion`

use std::io::{IsTerminal, Write};

use crate::error::CfmlLintError;

use super::{ColorMode, ansi};

/// Error output formatter with color support.
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    /// Resolves `mode` against stderr.
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal(),
        };
        Self { use_colors }
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Next step to offer for an error, if there is an obvious one.
    #[must_use]
    pub const fn suggestion(error: &CfmlLintError) -> Option<&'static str> {
        match error {
            CfmlLintError::Config(_) | CfmlLintError::ConfigParse { .. } | CfmlLintError::TomlParse(_) => {
                Some("Run 'cfml-lint config validate' to list every problem")
            }
            CfmlLintError::InvalidPattern { .. } => Some("Patterns support '*', '**' and '?'"),
            CfmlLintError::UnsupportedFormat(_) => Some("Use one of: text, console, json, sarif, csv, bitbucket"),
            _ => None,
        }
    }

    /// Prints `error` to stderr.
    pub fn report(&self, error: &CfmlLintError) {
        let mut stderr = std::io::stderr().lock();
        self.write_report(&mut stderr, error);
    }

    pub fn write_report<W: Write>(&self, w: &mut W, error: &CfmlLintError) {
        self.write_error(
            w,
            error.error_type(),
            &error.to_string(),
            error.detail().as_deref(),
            Self::suggestion(error),
        );
    }

    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        // Write failures on stderr are ignored; there is nowhere left to report them.
        if self.use_colors {
            let _ = writeln!(w, "{}{}✖ {error_type}:{} {message}", ansi::BOLD, ansi::RED, ansi::RESET);
        } else {
            let _ = writeln!(w, "✖ {error_type}: {message}");
        }
        self.write_tail(w, detail, suggestion);
    }

    pub fn write_warning<W: Write>(&self, w: &mut W, message: &str, detail: Option<&str>) {
        if self.use_colors {
            let _ = writeln!(w, "{}{}⚠ Warning:{} {message}", ansi::BOLD, ansi::YELLOW, ansi::RESET);
        } else {
            let _ = writeln!(w, "⚠ Warning: {message}");
        }
        self.write_tail(w, detail, None);
    }

    fn write_tail<W: Write>(&self, w: &mut W, detail: Option<&str>, suggestion: Option<&str>) {
        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }
        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
