use std::fmt;

use globset::Glob;

use super::Config;
use super::defaults::{KNOWN_INDENT_TYPES, KNOWN_PARSERS};

/// One problem found in a resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub path: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl Config {
    /// Checks cross-field constraints and returns every issue found.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        validate_parsers(self, &mut issues);
        validate_numbers(self, &mut issues);
        validate_patterns(self, &mut issues);
        issues
    }
}

fn validate_parsers(config: &Config, issues: &mut Vec<ConfigIssue>) {
    let primary = config.primary_parser();
    if !KNOWN_PARSERS.contains(&primary.as_str()) {
        issues.push(ConfigIssue::new(
            "parser.primary",
            format!(
                "Invalid primary parser '{primary}', expected one of: {}",
                KNOWN_PARSERS.join(", ")
            ),
        ));
    }
    let fallback = config.fallback_parser();
    if !KNOWN_PARSERS.contains(&fallback.as_str()) {
        issues.push(ConfigIssue::new(
            "parser.fallback",
            format!(
                "Invalid fallback parser '{fallback}', expected one of: {}",
                KNOWN_PARSERS.join(", ")
            ),
        ));
    }
}

fn validate_numbers(config: &Config, issues: &mut Vec<ConfigIssue>) {
    if config.max_threads() < 1 {
        issues.push(ConfigIssue::new(
            "performance.maxThreads",
            "maxThreads must be at least 1",
        ));
    }
    if config.indent_size() < 1 {
        issues.push(ConfigIssue::new(
            "linting.rules.whitespace.indentSize",
            "indentSize must be at least 1",
        ));
    }
    let indent_type = config.indent_type();
    if !KNOWN_INDENT_TYPES.contains(&indent_type.as_str()) {
        issues.push(ConfigIssue::new(
            "linting.rules.whitespace.indentType",
            format!("indentType must be 'spaces' or 'tabs', got '{indent_type}'"),
        ));
    }
}

fn validate_patterns(config: &Config, issues: &mut Vec<ConfigIssue>) {
    let groups = [
        ("includes", config.include_patterns()),
        ("excludes", config.exclude_patterns()),
    ];
    for (key, patterns) in groups {
        for pattern in patterns {
            if let Err(e) = Glob::new(&pattern) {
                issues.push(ConfigIssue::new(
                    key,
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
