use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::encoding::EncodingReader;
use crate::parser::{ParserFactory, ParserMode, split_lines};
use crate::result::{LintingViolation, ToolboxResult};
use crate::rules::RuleEngine;

const SNIPPET_CONTEXT: usize = 3;

/// Read, parse and analyze one file into a private partial result.
pub struct LintUnit<'a> {
    pub config: &'a Config,
    pub reader: &'a EncodingReader,
    pub factory: &'a ParserFactory,
    pub mode: &'a ParserMode,
    pub rules: &'a RuleEngine,
    /// Attach code snippets to violations (single-file runs).
    pub snippets: bool,
}

impl LintUnit<'_> {
    pub fn process(&self, file: &Path) -> ToolboxResult {
        let mut partial = ToolboxResult::new();
        if exceeds_size_limit(file, self.config.max_file_size()) {
            tracing::warn!("Skipping {}: larger than parser.maxFileSize", file.display());
            partial.add_warning(format!("Skipped large file: {}", file.display()));
            return partial;
        }

        let content = match self.reader.read(file) {
            Ok(content) => content,
            Err(e) => {
                let detail = e.detail().unwrap_or_else(|| e.to_string());
                partial.add_error(format!("Failed to read {}: {detail}", file.display()));
                return partial;
            }
        };

        let tag = self.mode.select_tag(
            &content,
            &self.config.primary_parser(),
            &self.config.fallback_parser(),
        );
        let Some(parser) = self.factory.create(&tag) else {
            partial.add_error(format!("No parser available for: {}", file.display()));
            return partial;
        };
        tracing::debug!("Parsing {} with {}", file.display(), parser.parser_type());

        let parsed = match parser.parse(&content, file) {
            Ok(parsed) => parsed,
            Err(e) => {
                partial.add_error(format!("Parse error in {}: {e}", file.display()));
                return partial;
            }
        };

        if self.config.linting_enabled() {
            let mut violations = self.rules.analyze(&parsed, self.config);
            if self.snippets {
                let lines = split_lines(&parsed.content);
                attach_snippets(&mut violations, &lines);
            }
            partial.add_violations(violations);
        }
        partial.stats_mut().increment_files_processed();
        partial.stats_mut().record_parser_usage(parser.parser_type());
        partial
    }
}

/// True when `file` is larger than `max` bytes. A limit of zero disables the check.
#[must_use]
pub fn exceeds_size_limit(file: &Path, max: u64) -> bool {
    max > 0 && fs::metadata(file).is_ok_and(|meta| meta.len() > max)
}

fn attach_snippets(violations: &mut [LintingViolation], lines: &[&str]) {
    for violation in violations {
        if let Some(snippet) = code_snippet(lines, violation.line) {
            violation.code_snippet = Some(snippet);
        }
    }
}

/// Lines around `line`, the offending one marked with `➤ `.
#[must_use]
pub fn code_snippet(lines: &[&str], line: usize) -> Option<String> {
    if line == 0 || line > lines.len() {
        return None;
    }
    let first = line.saturating_sub(SNIPPET_CONTEXT).max(1);
    let last = (line + SNIPPET_CONTEXT).min(lines.len());
    Some(
        lines
            .iter()
            .enumerate()
            .map(|(i, text)| (i + 1, text))
            .filter(|(number, _)| (first..=last).contains(number))
            .map(|(number, text)| {
                let marker = if number == line { "➤ " } else { "  " };
                format!("{marker}{number:4}: {text}\n")
            })
            .collect(),
    )
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
