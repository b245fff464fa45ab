use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::ColorMode;
use crate::parser::ParserMode;
use crate::result::Severity;
use crate::rules::RuleSelection;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cfml-lint")]
#[command(author, version, about = "Linter and formatter for CFML / Lucee sources")]
#[command(long_about = "Lints and formats CFML (.cfm, .cfc, .cfml) sources.\n\n\
    Exit codes:\n  \
    0 - No findings\n  \
    1 - Violations or file errors found\n  \
    2 - Configuration, output format or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress and log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Settings document (JSON or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip loading any settings document and use the built-in defaults
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// Built-in rule set merged over the settings: standard, minimal, strict
    #[arg(long, global = true)]
    pub rule_set: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the lint rules over files
    Lint(LintArgs),

    /// Normalize whitespace and line endings
    Format(FormatArgs),

    /// Lint, then format, and report both
    Both(BothArgs),

    /// List the available rules
    Rules,

    /// Configuration utilities
    Config(ConfigArgs),
}

/// Options shared by every file-processing command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// File or directory to process
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format: text (console), json, sarif, csv, bitbucket
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads (overrides performance.maxThreads)
    #[arg(long)]
    pub max_threads: Option<usize>,

    /// Extra include glob, added to the configured list (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Extra exclude glob, added to the configured list (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LintOptions {
    /// Parser backend: auto, boxlang, lucee, regex
    #[arg(long, default_value = "auto")]
    pub parser: ParserMode,

    /// Enable or disable rules by id, e.g. "+MAX_LINE_LENGTH,-FILE_NAMING"
    #[arg(long, allow_hyphen_values = true)]
    pub rules: Option<RuleSelection>,

    /// Drop violations below this severity: info, warning, error
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Exit 0 when only violations (no errors) were found
    #[arg(long)]
    pub ignore_violations: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub lint: LintOptions,
}

#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report changes without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BothArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub lint: LintOptions,

    /// Report formatting changes without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show a summary of the resolved settings
    Show {
        /// Print the full resolved document as JSON instead
        #[arg(long)]
        json: bool,

        /// Directory to search for a settings document
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Check the resolved settings and list every problem
    Validate {
        /// Directory to search for a settings document
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
