//! Run coordination: file selection, per-file units and result aggregation.

mod coordinator;
mod unit;

pub use coordinator::Coordinator;
pub use unit::{LintUnit, code_snippet, exceeds_size_limit};

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::encoding::EncodingReader;
use crate::error::Result;
use crate::logging::Verbosity;
use crate::output::RunProgress;
use crate::parser::{ParserFactory, ParserMode};
use crate::result::ToolboxResult;
use crate::rules::{RuleEngine, RuleSelection};
use crate::scanner::select_files;

/// Command-line adjustments layered over the configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub parser_mode: ParserMode,
    pub rules: RuleSelection,
    /// Overrides `performance.maxThreads`.
    pub max_threads: Option<usize>,
    /// Appended to the configured include patterns.
    pub includes: Vec<String>,
    /// Appended to the configured exclude patterns.
    pub excludes: Vec<String>,
    pub verbosity: Verbosity,
}

impl RunOptions {
    /// Worker count for a run over `file_count` files; 1 means sequential.
    #[must_use]
    pub fn workers(&self, config: &Config, file_count: usize) -> usize {
        if !config.parallel_processing() || file_count <= 1 {
            return 1;
        }
        self.max_threads
            .unwrap_or_else(|| usize::try_from(config.max_threads()).unwrap_or(1))
            .max(1)
    }
}

/// The files a run covers. A file root is returned as-is.
///
/// # Errors
/// Returns an error if a pattern is invalid or `root` does not exist.
pub fn select_inputs(root: &Path, config: &Config, options: &RunOptions) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut includes = config.include_patterns();
    includes.extend(options.includes.iter().cloned());
    let mut excludes = config.exclude_patterns();
    excludes.extend(options.excludes.iter().cloned());
    select_files(root, &includes, &excludes, config.base_dir())
}

/// Lints files and directories.
pub struct LintingEngine {
    config: Config,
    options: RunOptions,
    reader: EncodingReader,
    factory: ParserFactory,
    rules: RuleEngine,
}

impl LintingEngine {
    #[must_use]
    pub fn new(config: Config, options: RunOptions) -> Self {
        let reader = EncodingReader::new(config.encoding());
        let factory = ParserFactory::from_config(&config);
        let rules = RuleEngine::from_config(&config, &options.rules);
        Self {
            config,
            options,
            reader,
            factory,
            rules,
        }
    }

    /// Replaces the parser factory, e.g. to plug in a script engine.
    #[must_use]
    pub fn with_factory(mut self, factory: ParserFactory) -> Self {
        self.factory = factory;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Lints `root`, a file or a directory.
    ///
    /// # Errors
    /// Returns an error only for run-fatal problems: a missing root or an invalid
    /// pattern. File-level failures are recorded on the result.
    pub fn lint_path(&self, root: &Path) -> Result<ToolboxResult> {
        let started = Instant::now();
        let single_file = root.is_file();
        let files = select_inputs(root, &self.config, &self.options)?;
        tracing::info!("Linting {} files under {}", files.len(), root.display());
        tracing::debug!(
            "Parser timeout of {}ms is advisory and not enforced",
            self.config.parser_timeout_ms()
        );

        let mut result = self.lint_files(&files, single_file);
        result.set_metadata("mode", "lint");
        result.set_metadata("inputPath", root.display().to_string());
        result.set_metadata("rules", self.rules.rule_ids().len());
        result.stats_mut().set_execution_time(started.elapsed());
        tracing::info!(
            "Linted {} files: {} violations, {} errors",
            result.stats().files_processed,
            result.violations().len(),
            result.errors().len()
        );
        Ok(result)
    }

    /// Lints an explicit file list; snippets are attached when `single_file` is set.
    #[must_use]
    pub fn lint_files(&self, files: &[PathBuf], single_file: bool) -> ToolboxResult {
        let unit = LintUnit {
            config: &self.config,
            reader: &self.reader,
            factory: &self.factory,
            mode: &self.options.parser_mode,
            rules: &self.rules,
            snippets: single_file,
        };
        let progress = RunProgress::new(
            "Linting",
            files.len() as u64,
            self.options.verbosity.is_quiet(),
        );
        let workers = self.options.workers(&self.config, files.len());
        Coordinator::new(workers, "lint", &progress).run(files, |file| unit.process(file))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
