use serde_json::{Value, json};

use crate::error::{CfmlLintError, Result};

use super::Config;

/// Built-in rule set names.
pub const AVAILABLE_RULE_SETS: &[&str] = &["standard", "minimal", "strict"];

/// Rule ids switched off by the `minimal` rule set.
const MINIMAL_DISABLED: &[&str] = &[
    "COMPONENT_NAMING",
    "FUNCTION_NAMING",
    "VARIABLE_NAMING",
    "CONSTANT_NAMING",
    "FILE_NAMING",
    "INTERFACE_PREFIX",
    "ABSTRACT_SUFFIX",
    "REQUIRE_CURLY_BRACES",
    "MAX_FUNCTION_LENGTH",
    "MAX_FILE_LENGTH",
    "REQUIRE_INIT",
    "REQUIRE_RETURN_TYPES",
    "REQUIRE_ARGUMENT_TYPES",
    "USE_ACCESSORS",
    "CURLY_BRACE_STYLE",
];

/// Overlay document for a built-in rule set.
///
/// # Errors
/// Returns an error if the name is not a built-in rule set.
pub fn builtin_overlay(name: &str) -> Result<Value> {
    match name {
        "standard" => Ok(json!({})),
        "minimal" => Ok(json!({ "linting": { "disabledRules": MINIMAL_DISABLED } })),
        "strict" => Ok(json!({
            "linting": { "rules": {
                "whitespace": { "maxEmptyLines": 1 },
                "codeStructure": {
                    "maxFunctionLength": 30,
                    "maxLineLength": 100,
                    "maxFileLength": 500
                }
            } }
        })),
        _ => Err(CfmlLintError::Config(format!(
            "Unknown rule set: '{name}'. Available rule sets: {}",
            AVAILABLE_RULE_SETS.join(", ")
        ))),
    }
}

impl Config {
    /// Activates a rule set.
    ///
    /// Built-in names apply their overlay. Other names must exist under
    /// `customRules.<name>`; its optional `overrides` object is merged and its
    /// `disabled` list is honored by [`Config::disabled_rules`].
    ///
    /// # Errors
    /// Returns an error if the name is neither built in nor defined in `customRules`.
    pub fn with_rule_set(self, name: &str) -> Result<Self> {
        let overlay = if AVAILABLE_RULE_SETS.contains(&name) {
            builtin_overlay(name)?
        } else {
            let custom = self
                .get(&format!("customRules.{name}"))
                .filter(|v| v.is_object())
                .ok_or_else(|| {
                    CfmlLintError::Config(format!(
                        "Unknown rule set: '{name}'. Available rule sets: {} or a customRules entry",
                        AVAILABLE_RULE_SETS.join(", ")
                    ))
                })?;
            custom.get("overrides").cloned().unwrap_or_else(|| json!({}))
        };
        Ok(self
            .with_overlay(overlay)
            .with_overlay(json!({ "linting": { "ruleSet": name } })))
    }
}

#[cfg(test)]
#[path = "rule_sets_tests.rs"]
mod tests;
