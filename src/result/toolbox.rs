use indexmap::IndexMap;
use serde_json::Value;

use super::{ExecutionStats, FormattingChange, LintingViolation, Severity};

/// Aggregate of every finding, change and counter for a run.
///
/// Renderers receive it by shared reference only.
#[derive(Debug, Clone, Default)]
pub struct ToolboxResult {
    violations: Vec<LintingViolation>,
    formatting_changes: Vec<FormattingChange>,
    errors: Vec<String>,
    warnings: Vec<String>,
    metadata: IndexMap<String, Value>,
    stats: ExecutionStats,
}

impl ToolboxResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_violation(&mut self, violation: LintingViolation) {
        self.stats.record_violation(violation.severity);
        self.violations.push(violation);
    }

    pub fn add_violations(&mut self, violations: impl IntoIterator<Item = LintingViolation>) {
        for violation in violations {
            self.add_violation(violation);
        }
    }

    pub fn add_formatting_change(&mut self, change: FormattingChange) {
        self.stats.increment_formatting_changes();
        self.formatting_changes.push(change);
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    #[must_use]
    pub const fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    #[must_use]
    pub fn violations(&self) -> &[LintingViolation] {
        &self.violations
    }

    #[must_use]
    pub fn formatting_changes(&self) -> &[FormattingChange] {
        &self.formatting_changes
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub const fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    pub const fn stats_mut(&mut self) -> &mut ExecutionStats {
        &mut self.stats
    }

    /// True when a bare error was recorded or any violation is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Whether the run should signal failure to the caller.
    #[must_use]
    pub fn is_failure(&self, ignore_violations: bool) -> bool {
        self.has_errors() || (!ignore_violations && self.has_violations())
    }

    /// Keeps only violations at or above `min`, rebuilding the severity counters.
    pub fn retain_min_severity(&mut self, min: Severity) {
        self.violations.retain(|v| v.severity >= min);
        self.stats.reset_violation_counts();
        for violation in &self.violations {
            self.stats.record_violation(violation.severity);
        }
    }

    /// Moves everything from `other` into `self`.
    ///
    /// Lists are appended, counters and execution time are summed, and metadata keys
    /// from `other` overwrite existing ones.
    pub fn merge_with(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.formatting_changes.extend(other.formatting_changes);
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.metadata.extend(other.metadata);
        self.stats.merge(&other.stats);
    }
}

#[cfg(test)]
#[path = "toolbox_tests.rs"]
mod tests;
