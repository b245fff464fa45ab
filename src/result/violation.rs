use serde::Serialize;

use super::Severity;

/// A single rule finding against one file location.
///
/// Line and column are 1-based. Zero inputs are clamped to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintingViolation {
    pub rule_id: String,
    pub message: String,
    pub severity: Severity,
    #[serde(rename = "file")]
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
}

impl LintingViolation {
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        file_path: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        let line = line.max(1);
        let column = column.max(1);
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            severity,
            file_path: file_path.into(),
            line,
            column,
            end_line: line,
            end_column: column + 1,
            category: None,
            code_snippet: None,
            suggested_fix: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.code_snippet = Some(snippet.into());
        self
    }

    #[must_use]
    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }
}

/// A rewrite produced by the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingChange {
    #[serde(rename = "file")]
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(skip)]
    pub original_text: String,
    #[serde(skip)]
    pub formatted_text: String,
    pub change_type: String,
    pub description: String,
}

impl FormattingChange {
    #[must_use]
    pub fn new(
        file_path: impl Into<String>,
        original_text: impl Into<String>,
        formatted_text: impl Into<String>,
        change_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let original_text = original_text.into();
        let end_line = original_text.split('\n').count().max(1);
        Self {
            file_path: file_path.into(),
            start_line: 1,
            end_line,
            original_text,
            formatted_text: formatted_text.into(),
            change_type: change_type.into(),
            description: description.into(),
        }
    }
}
