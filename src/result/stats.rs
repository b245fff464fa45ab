use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use super::Severity;

/// Counters for one run, or one slice of a run before merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    pub files_processed: usize,
    pub total_violations: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub formatting_changes: usize,
    pub execution_time_ms: u64,
    pub parser_usage: BTreeMap<String, usize>,
}

impl ExecutionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn increment_files_processed(&mut self) {
        self.files_processed += 1;
    }

    pub const fn record_violation(&mut self, severity: Severity) {
        self.total_violations += 1;
        match severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => self.info_count += 1,
        }
    }

    pub const fn increment_formatting_changes(&mut self) {
        self.formatting_changes += 1;
    }

    pub fn record_parser_usage(&mut self, parser_type: &str) {
        *self.parser_usage.entry(parser_type.to_string()).or_default() += 1;
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn set_execution_time(&mut self, elapsed: Duration) {
        self.execution_time_ms = elapsed.as_millis().min(u128::from(u64::MAX)) as u64;
    }

    /// Clears the violation counters so they can be rebuilt from a filtered list.
    pub(crate) const fn reset_violation_counts(&mut self) {
        self.total_violations = 0;
        self.error_count = 0;
        self.warning_count = 0;
        self.info_count = 0;
    }

    /// Sums every counter, including execution time, and unions parser usage.
    pub fn merge(&mut self, other: &Self) {
        self.files_processed += other.files_processed;
        self.total_violations += other.total_violations;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
        self.formatting_changes += other.formatting_changes;
        self.execution_time_ms = self.execution_time_ms.saturating_add(other.execution_time_ms);
        for (parser, count) in &other.parser_usage {
            *self.parser_usage.entry(parser.clone()).or_default() += count;
        }
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
