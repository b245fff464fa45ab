use std::io::Write;

use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::error::Result;
use crate::output::ErrorOutput;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::{fail, load_config};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    let mut stdout = std::io::stdout().lock();
    match run_config_impl(&args.action, cli, &mut stdout) {
        Ok(code) => code,
        Err(e) => fail(cli, &e),
    }
}

/// Writes the requested view of the resolved settings to `out`.
///
/// # Errors
/// Returns an error if the settings cannot be loaded or written.
pub fn run_config_impl<W: Write>(action: &ConfigAction, cli: &Cli, out: &mut W) -> Result<i32> {
    match action {
        ConfigAction::Show { json, dir } => {
            let config = load_config(cli, dir)?;
            if *json {
                writeln!(out, "{}", config.export()?)?;
            } else {
                write!(out, "{}", config.summary())?;
            }
            Ok(EXIT_SUCCESS)
        }
        ConfigAction::Validate { dir } => {
            let config = load_config(cli, dir)?;
            let issues = config.validate();
            if issues.is_empty() {
                writeln!(out, "Configuration is valid")?;
                return Ok(EXIT_SUCCESS);
            }
            let errors = ErrorOutput::new(cli.color.into());
            let mut stderr = std::io::stderr().lock();
            for issue in &issues {
                errors.write_error(&mut stderr, "Config", &issue.to_string(), None, None);
            }
            writeln!(out, "Configuration has {} problem(s)", issues.len())?;
            Ok(EXIT_CONFIG_ERROR)
        }
    }
}
