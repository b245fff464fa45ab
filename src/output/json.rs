use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::result::{ExecutionStats, FormattingChange, LintingViolation, ToolboxResult};

use super::{OutputFormatter, TOOL_NAME, TOOL_VERSION};

pub struct JsonFormatter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    tool: &'static str,
    version: &'static str,
    statistics: &'a ExecutionStats,
    violations: &'a [LintingViolation],
    formatting_changes: &'a [FormattingChange],
    errors: &'a [String],
    warnings: &'a [String],
    metadata: &'a IndexMap<String, Value>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &ToolboxResult) -> Result<String> {
        let output = JsonOutput {
            tool: TOOL_NAME,
            version: TOOL_VERSION,
            statistics: result.stats(),
            violations: result.violations(),
            formatting_changes: result.formatting_changes(),
            errors: result.errors(),
            warnings: result.warnings(),
            metadata: result.metadata(),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
