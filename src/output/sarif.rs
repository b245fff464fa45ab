use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::result::{LintingViolation, Severity, ToolboxResult};
use crate::rules::builtin_rules;

use super::{OutputFormatter, TOOL_NAME, TOOL_VERSION};

/// SARIF 2.1.0 output for code-scanning integrations.
pub struct SarifFormatter {
    descriptions: BTreeMap<&'static str, &'static str>,
}

impl SarifFormatter {
    #[must_use]
    pub fn new() -> Self {
        let descriptions = builtin_rules()
            .iter()
            .map(|rule| (rule.rule_id(), rule.description()))
            .collect();
        Self { descriptions }
    }
}

impl Default for SarifFormatter {
    fn default() -> Self {
        Self::new()
    }
}

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

#[derive(Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct Tool {
    driver: ToolDriver,
}

#[derive(Serialize)]
struct ToolDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Serialize)]
struct ReportingDescriptor {
    id: String,
    #[serde(rename = "shortDescription")]
    short_description: Message,
}

#[derive(Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    #[serde(rename = "ruleIndex")]
    rule_index: usize,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

#[derive(Serialize)]
struct Location {
    #[serde(rename = "physicalLocation")]
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
struct PhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
struct ArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
}

const fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

/// Forward slashes so the URI is stable across platforms.
fn artifact_uri(path: &str) -> String {
    path.replace('\\', "/")
}

impl SarifFormatter {
    fn describe(&self, rule_id: &str) -> String {
        self.descriptions
            .get(rule_id)
            .map_or_else(|| rule_id.to_string(), |d| (*d).to_string())
    }

    fn convert(violation: &LintingViolation, rule_index: usize) -> SarifResult {
        SarifResult {
            rule_id: violation.rule_id.clone(),
            rule_index,
            level: level(violation.severity),
            message: Message {
                text: violation.message.clone(),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: artifact_uri(&violation.file_path),
                    },
                    region: Region {
                        start_line: violation.line,
                        start_column: violation.column,
                        end_line: violation.end_line,
                        end_column: violation.end_column,
                    },
                },
            }],
        }
    }
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, result: &ToolboxResult) -> Result<String> {
        let mut rule_ids: Vec<&str> = Vec::new();
        let results = result
            .violations()
            .iter()
            .map(|violation| {
                let index = rule_ids
                    .iter()
                    .position(|id| *id == violation.rule_id)
                    .unwrap_or_else(|| {
                        rule_ids.push(&violation.rule_id);
                        rule_ids.len() - 1
                    });
                Self::convert(violation, index)
            })
            .collect();

        let rules = rule_ids
            .iter()
            .map(|id| ReportingDescriptor {
                id: (*id).to_string(),
                short_description: Message {
                    text: self.describe(id),
                },
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules,
                    },
                },
                results,
            }],
        };
        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
