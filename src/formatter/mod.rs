//! Whitespace formatter.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::encoding::EncodingReader;
use crate::engine::{Coordinator, RunOptions, exceeds_size_limit, select_inputs};
use crate::error::Result;
use crate::output::RunProgress;
use crate::result::{FormattingChange, ToolboxResult};

const CHANGE_TYPE: &str = "formatting";

/// Normalizes line endings and whitespace.
///
/// CRLF and CR become LF, tabs expand to `indent_size` spaces, trailing blanks are
/// stripped, runs of blank lines collapse to one, and the text ends with exactly one
/// newline. Blank-only content formats to the empty string.
#[must_use]
pub fn format_content(content: &str, indent_size: usize) -> String {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let tab = " ".repeat(indent_size.max(1));
    let mut out = String::with_capacity(normalized.len());
    let mut blank_run = 0;
    for line in normalized.split('\n') {
        let expanded = line.replace('\t', &tab);
        let line = expanded.trim_end_matches([' ', '\t']);
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    let body = out.trim_end_matches('\n');
    if body.trim().is_empty() {
        return String::new();
    }
    format!("{body}\n")
}

/// Formats files in place, or only reports changes in dry-run mode.
pub struct FormattingEngine {
    config: Config,
    options: RunOptions,
    dry_run: bool,
    reader: EncodingReader,
}

impl FormattingEngine {
    #[must_use]
    pub fn new(config: Config, options: RunOptions, dry_run: bool) -> Self {
        let reader = EncodingReader::new(config.encoding());
        Self {
            config,
            options,
            dry_run,
            reader,
        }
    }

    /// Formats `root`, a file or a directory.
    ///
    /// # Errors
    /// Returns an error for a missing root or an invalid pattern.
    pub fn format_path(&self, root: &Path) -> Result<ToolboxResult> {
        let started = Instant::now();
        let files = select_inputs(root, &self.config, &self.options)?;
        tracing::info!("Formatting {} files under {}", files.len(), root.display());

        let mut result = self.format_files(&files);
        result.set_metadata("mode", "format");
        result.set_metadata("dryRun", self.dry_run);
        result.stats_mut().set_execution_time(started.elapsed());
        Ok(result)
    }

    #[must_use]
    pub fn format_files(&self, files: &[PathBuf]) -> ToolboxResult {
        let progress = RunProgress::new(
            "Formatting",
            files.len() as u64,
            self.options.verbosity.is_quiet(),
        );
        let workers = self.options.workers(&self.config, files.len());
        Coordinator::new(workers, "format", &progress).run(files, |file| self.format_file(file))
    }

    fn format_file(&self, file: &Path) -> ToolboxResult {
        let mut partial = ToolboxResult::new();
        if exceeds_size_limit(file, self.config.max_file_size()) {
            partial.add_warning(format!("Skipped large file: {}", file.display()));
            return partial;
        }
        let (original, detection) = match self.reader.read_detected(file) {
            Ok(decoded) => decoded,
            Err(e) => {
                let detail = e.detail().unwrap_or_else(|| e.to_string());
                partial.add_error(format!("Failed to read {}: {detail}", file.display()));
                return partial;
            }
        };

        let indent = usize::try_from(self.config.formatting_indent_size()).unwrap_or(1);
        let formatted = format_content(&original, indent);
        partial.stats_mut().increment_files_processed();
        if formatted == original {
            return partial;
        }

        if !self.dry_run {
            let Some(bytes) = detection.encode(&formatted) else {
                partial.add_warning(format!(
                    "Not rewriting {}: its encoding cannot be reproduced",
                    file.display()
                ));
                return partial;
            };
            if let Err(e) = fs::write(file, bytes) {
                partial.add_error(format!("Failed to write {}: {e}", file.display()));
                return partial;
            }
        }
        tracing::debug!("Formatted {}", file.display());
        partial.add_formatting_change(FormattingChange::new(
            file.display().to_string(),
            original,
            formatted,
            CHANGE_TYPE,
            "Normalized whitespace and line endings",
        ));
        partial
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
