use std::fmt::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::result::{LintingViolation, Severity, ToolboxResult};

use super::{ColorMode, OutputFormatter, ansi};

/// Human-readable report grouped by file.
pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: mode.use_colors(),
            verbose,
        }
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
            Severity::Info => ansi::CYAN,
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn write_violations(&self, out: &mut String, violations: &[LintingViolation]) {
        let mut by_file: IndexMap<&str, Vec<&LintingViolation>> = IndexMap::new();
        for violation in violations {
            by_file.entry(&violation.file_path).or_default().push(violation);
        }

        for (file, mut items) in by_file {
            items.sort_by_key(|v| (v.line, v.column));
            writeln!(out, "{}", self.paint(file, ansi::BOLD)).ok();
            for v in items {
                let severity = self.paint(v.severity.as_str(), Self::severity_color(v.severity));
                let rule = self.paint(&format!("[{}]", v.rule_id), ansi::DIM);
                writeln!(out, "  {}:{}  {severity}  {}  {rule}", v.line, v.column, v.message).ok();
                if let Some(snippet) = &v.code_snippet {
                    for line in snippet.lines() {
                        writeln!(out, "      {line}").ok();
                    }
                }
            }
            out.push('\n');
        }
    }

    fn write_messages(&self, out: &mut String, title: &str, icon: &str, color: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        writeln!(out, "{}", self.paint(title, ansi::BOLD)).ok();
        for item in items {
            writeln!(out, "  {} {item}", self.paint(icon, color)).ok();
        }
        out.push('\n');
    }

    fn write_summary(&self, out: &mut String, result: &ToolboxResult) {
        let stats = result.stats();
        let status = if result.is_failure(false) {
            self.paint("✗", ansi::RED)
        } else {
            self.paint("✓", ansi::GREEN)
        };
        writeln!(
            out,
            "{status} Summary: {} files processed, {} violations ({} errors, {} warnings, {} info), {} formatting changes in {} ms",
            stats.files_processed,
            stats.total_violations,
            stats.error_count,
            stats.warning_count,
            stats.info_count,
            stats.formatting_changes,
            stats.execution_time_ms,
        )
        .ok();

        if self.verbose > 0 && !stats.parser_usage.is_empty() {
            let usage: Vec<String> = stats
                .parser_usage
                .iter()
                .map(|(parser, count)| format!("{parser}={count}"))
                .collect();
            writeln!(out, "Parser usage: {}", usage.join(", ")).ok();
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &ToolboxResult) -> Result<String> {
        let mut out = String::new();
        self.write_violations(&mut out, result.violations());

        if !result.formatting_changes().is_empty() {
            writeln!(out, "{}", self.paint("Formatting changes:", ansi::BOLD)).ok();
            for change in result.formatting_changes() {
                writeln!(
                    out,
                    "  {} (lines {}-{}): {}",
                    change.file_path, change.start_line, change.end_line, change.description
                )
                .ok();
            }
            out.push('\n');
        }

        self.write_messages(&mut out, "Errors:", "✗", ansi::RED, result.errors());
        self.write_messages(&mut out, "Warnings:", "⚠", ansi::YELLOW, result.warnings());
        self.write_summary(&mut out, result);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
