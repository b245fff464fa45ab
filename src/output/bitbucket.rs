use serde::Serialize;

use crate::error::Result;
use crate::result::{Severity, ToolboxResult};

use super::{OutputFormatter, TOOL_NAME};

/// Bitbucket Code Insights accepts at most this many annotations per report.
pub const MAX_ANNOTATIONS: usize = 1000;

/// Code Insights report: one annotation per violation plus a pass/fail summary.
pub struct BitbucketFormatter;

#[derive(Serialize)]
struct Report<'a> {
    annotations: Vec<Annotation<'a>>,
    summary: Summary,
}

#[derive(Serialize)]
struct Annotation<'a> {
    path: &'a str,
    line: usize,
    message: &'a str,
    severity: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "externalId")]
    rule_id: &'a str,
}

#[derive(Serialize)]
struct Summary {
    title: String,
    details: String,
    result: &'static str,
}

const fn insight_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "HIGH",
        Severity::Warning => "MEDIUM",
        Severity::Info => "LOW",
    }
}

impl OutputFormatter for BitbucketFormatter {
    fn format(&self, result: &ToolboxResult) -> Result<String> {
        let annotations = result
            .violations()
            .iter()
            .take(MAX_ANNOTATIONS)
            .map(|v| Annotation {
                path: &v.file_path,
                line: v.line,
                message: &v.message,
                severity: insight_severity(v.severity),
                kind: "BUG",
                rule_id: &v.rule_id,
            })
            .collect();

        let stats = result.stats();
        let report = Report {
            annotations,
            summary: Summary {
                title: format!("{TOOL_NAME} analysis"),
                details: format!(
                    "Analysis completed. Found {} violations in {} files. Errors: {}, Warnings: {}, Info: {}",
                    stats.total_violations,
                    stats.files_processed,
                    stats.error_count,
                    stats.warning_count,
                    stats.info_count
                ),
                result: if result.has_errors() { "FAILED" } else { "PASSED" },
            },
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
#[path = "bitbucket_tests.rs"]
mod tests;
