//! Command handlers. Each returns the process exit code.

mod config;
mod run;
mod rules;

pub use config::{run_config, run_config_impl};
pub use rules::{format_rule_list, run_rules};
pub use run::{run_both, run_format, run_lint};

use std::fs;
use std::path::Path;

use crate::cli::{Cli, InputArgs, LintOptions};
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::engine::RunOptions;
use crate::error::{CfmlLintError, Result};
use crate::logging::Verbosity;
use crate::output::{ColorMode, ErrorOutput, OutputFormat, create_formatter};
use crate::result::ToolboxResult;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS};

/// Resolves the settings for a run rooted at `input`.
///
/// # Errors
/// Returns an error if a found document is malformed or the rule set is unknown.
pub fn load_config(cli: &Cli, input: &Path) -> Result<Config> {
    let loader = FileConfigLoader::new();
    let config = if cli.no_config {
        loader.defaults()
    } else if let Some(path) = &cli.config {
        loader.load_from_path(path)?
    } else {
        let search_dir = if input.is_file() { input.parent() } else { Some(input) };
        loader.load(search_dir)?
    };
    match &cli.rule_set {
        Some(name) => config.with_rule_set(name),
        None => Ok(config),
    }
}

/// Resolves the settings for a run and rejects them when validation finds problems.
///
/// # Errors
/// Returns `Config` listing every issue, or any error from [`load_config`].
pub fn load_valid_config(cli: &Cli, input: &Path) -> Result<Config> {
    let config = load_config(cli, input)?;
    let issues = config.validate();
    if issues.is_empty() {
        return Ok(config);
    }
    let listed: Vec<String> = issues.iter().map(ToString::to_string).collect();
    Err(CfmlLintError::Config(listed.join("; ")))
}

#[must_use]
pub fn run_options(cli: &Cli, input: &InputArgs, lint: Option<&LintOptions>) -> RunOptions {
    let mut options = RunOptions {
        max_threads: input.max_threads,
        includes: input.include.clone(),
        excludes: input.exclude.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.verbose),
        ..RunOptions::default()
    };
    if let Some(lint) = lint {
        options.parser_mode = lint.parser.clone();
        options.rules = lint.rules.clone().unwrap_or_default();
    }
    options
}

/// Renders `result` and writes it to `--output` or stdout.
///
/// # Errors
/// Returns an error if rendering or writing the report fails.
pub fn emit(cli: &Cli, format: OutputFormat, output: Option<&Path>, result: &ToolboxResult) -> Result<()> {
    let color = match output {
        Some(_) => ColorMode::Never,
        None => cli.color.into(),
    };
    let rendered = create_formatter(format, color, cli.verbose).format(result)?;
    match output {
        Some(path) => {
            fs::write(path, &rendered)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[must_use]
pub fn exit_code(result: &ToolboxResult, ignore_violations: bool) -> i32 {
    if result.is_failure(ignore_violations) {
        EXIT_VIOLATIONS
    } else {
        EXIT_SUCCESS
    }
}

/// Reports a fatal error on stderr and maps it to the exit code.
pub(crate) fn fail(cli: &Cli, error: &CfmlLintError) -> i32 {
    ErrorOutput::new(cli.color.into()).report(error);
    EXIT_CONFIG_ERROR
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
