use crate::cli::{BothArgs, Cli, FormatArgs, InputArgs, LintArgs, LintOptions};
use crate::engine::LintingEngine;
use crate::error::Result;
use crate::formatter::FormattingEngine;
use crate::output::OutputFormat;
use crate::result::ToolboxResult;

use super::{emit, exit_code, fail, load_valid_config, run_options};

#[must_use]
pub fn run_lint(args: &LintArgs, cli: &Cli) -> i32 {
    execute(cli, &args.input, |format| {
        let result = lint(cli, &args.input, &args.lint)?;
        emit(cli, format, args.input.output.as_deref(), &result)?;
        Ok(exit_code(&result, args.lint.ignore_violations))
    })
}

#[must_use]
pub fn run_format(args: &FormatArgs, cli: &Cli) -> i32 {
    execute(cli, &args.input, |format| {
        let result = format_files(cli, &args.input, args.dry_run)?;
        emit(cli, format, args.input.output.as_deref(), &result)?;
        Ok(exit_code(&result, false))
    })
}

/// Lints first, then formats, and reports the merged result.
#[must_use]
pub fn run_both(args: &BothArgs, cli: &Cli) -> i32 {
    execute(cli, &args.input, |format| {
        let mut result = lint(cli, &args.input, &args.lint)?;
        result.merge_with(format_files(cli, &args.input, args.dry_run)?);
        result.set_metadata("mode", "both");
        emit(cli, format, args.input.output.as_deref(), &result)?;
        Ok(exit_code(&result, args.lint.ignore_violations))
    })
}

/// Parses the output format before any file is touched, then runs `body`.
fn execute(cli: &Cli, input: &InputArgs, body: impl FnOnce(OutputFormat) -> Result<i32>) -> i32 {
    match input.format.parse::<OutputFormat>().and_then(body) {
        Ok(code) => code,
        Err(e) => fail(cli, &e),
    }
}

fn lint(cli: &Cli, input: &InputArgs, options: &LintOptions) -> Result<ToolboxResult> {
    let config = load_valid_config(cli, &input.path)?;
    let engine = LintingEngine::new(config, run_options(cli, input, Some(options)));
    let mut result = engine.lint_path(&input.path)?;
    if let Some(min) = options.severity {
        result.retain_min_severity(min);
    }
    Ok(result)
}

fn format_files(cli: &Cli, input: &InputArgs, dry_run: bool) -> Result<ToolboxResult> {
    let config = load_valid_config(cli, &input.path)?;
    FormattingEngine::new(config, run_options(cli, input, None), dry_run).format_path(&input.path)
}
