use regex::Regex;

use crate::error::{CfmlLintError, Result};
use crate::result::{LintingViolation, Severity};

use super::case::{is_camel_case, is_lifecycle_method, is_pascal_case, is_upper_case};
use super::{CATEGORY_NAMING, LintRule, RuleContext};

/// Scope names that never follow the variable convention.
const BUILTIN_SCOPES: &[&str] = &[
    "arguments",
    "variables",
    "local",
    "this",
    "super",
    "session",
    "application",
    "request",
    "form",
    "url",
    "cookie",
    "server",
    "client",
    "cgi",
];

fn is_builtin_scope(name: &str) -> bool {
    BUILTIN_SCOPES.iter().any(|s| s.eq_ignore_ascii_case(name))
}

pub struct ComponentNamingRule {
    declaration: Regex,
    name_attribute: Regex,
}

impl Default for ComponentNamingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentNamingRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: Regex::new(r"(?im)^\s*component\b([^{\n]*)").expect("Invalid regex"),
            name_attribute: Regex::new(r#"(?i)\bname\s*=\s*["']?([^\s"'{]+)"#)
                .expect("Invalid regex"),
        }
    }
}

impl LintRule for ComponentNamingRule {
    fn rule_id(&self) -> &'static str {
        "COMPONENT_NAMING"
    }

    fn category(&self) -> &'static str {
        CATEGORY_NAMING
    }

    fn description(&self) -> &'static str {
        "Component file names and name attributes must be PascalCase"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let mut violations = Vec::new();
        if !ctx.parsed.is_component_file()
            || ctx.config.naming("componentCase", "PascalCase") != "PascalCase"
        {
            return Ok(violations);
        }

        let stem = ctx.parsed.file_stem();
        if !is_pascal_case(stem) {
            violations.push(self.violation(
                ctx,
                Severity::Warning,
                (1, 1),
                format!("Component filename '{stem}' should be PascalCase"),
            ));
        }

        for caps in self.declaration.captures_iter(ctx.content()) {
            let (Some(whole), Some(attributes)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(declared) = self
                .name_attribute
                .captures(attributes.as_str())
                .and_then(|c| c.get(1))
            else {
                continue;
            };
            if !is_pascal_case(declared.as_str()) {
                violations.push(self.violation(
                    ctx,
                    Severity::Warning,
                    (ctx.line_of(whole.start() + leading_ws(whole.as_str())), 1),
                    format!(
                        "Component name attribute '{}' should be PascalCase",
                        declared.as_str()
                    ),
                ));
            }
        }
        Ok(violations)
    }
}

fn leading_ws(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

pub struct FunctionNamingRule;

impl LintRule for FunctionNamingRule {
    fn rule_id(&self) -> &'static str {
        "FUNCTION_NAMING"
    }

    fn category(&self) -> &'static str {
        CATEGORY_NAMING
    }

    fn description(&self) -> &'static str {
        "Function names must be camelCase"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if ctx.config.naming("functionCase", "camelCase") != "camelCase" {
            return Ok(Vec::new());
        }
        Ok(ctx
            .functions
            .iter()
            .filter(|f| !is_lifecycle_method(&f.name) && !is_camel_case(&f.name))
            .map(|f| {
                self.violation(
                    ctx,
                    Severity::Warning,
                    ctx.position(f.name_offset),
                    format!("Function name '{}' should be camelCase", f.name),
                )
            })
            .collect())
    }
}

pub struct VariableNamingRule {
    declaration: Regex,
}

impl Default for VariableNamingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableNamingRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: Regex::new(
                r"(?im)(?:^|\s)(?:var\s+|local\.|variables\.)([a-zA-Z_][a-zA-Z0-9_]*)\s*=",
            )
            .expect("Invalid regex"),
        }
    }
}

impl LintRule for VariableNamingRule {
    fn rule_id(&self) -> &'static str {
        "VARIABLE_NAMING"
    }

    fn category(&self) -> &'static str {
        CATEGORY_NAMING
    }

    fn description(&self) -> &'static str {
        "Local variables and function arguments must be camelCase"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let mut violations = Vec::new();
        if ctx.config.naming("variableCase", "camelCase") != "camelCase" {
            return Ok(violations);
        }

        for name in self
            .declaration
            .captures_iter(&ctx.masked)
            .filter_map(|caps| caps.get(1))
        {
            if !is_builtin_scope(name.as_str()) && !is_camel_case(name.as_str()) {
                violations.push(self.violation(
                    ctx,
                    Severity::Warning,
                    ctx.position(name.start()),
                    format!("Variable name '{}' should be camelCase", name.as_str()),
                ));
            }
        }

        for param in ctx.functions.iter().flat_map(|f| &f.params) {
            if !is_builtin_scope(&param.name) && !is_camel_case(&param.name) {
                violations.push(self.violation(
                    ctx,
                    Severity::Warning,
                    ctx.position(param.offset),
                    format!("Function argument '{}' should be camelCase", param.name),
                ));
            }
        }
        Ok(violations)
    }
}

/// Flags literal-valued identifiers that look like constants but are not UPPER_CASE.
///
/// An identifier looks like a constant when it is assigned exactly once and carries
/// at least two capitals or an underscore.
pub struct ConstantNamingRule {
    assignment: Regex,
}

impl Default for ConstantNamingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantNamingRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            assignment: Regex::new(
                r#"(?im)(?:^|\s)(?:variables\.|this\.|local\.)?([a-zA-Z_][a-zA-Z0-9_]*)\s*=\s*(?:["'][^"']*["']|\d+|true|false)"#,
            )
            .expect("Invalid regex"),
        }
    }

    fn looks_constant(&self, masked: &str, name: &str) -> Result<bool> {
        if name.contains('_') && name.to_uppercase() == name {
            return Ok(true);
        }
        let capitals = name.chars().filter(char::is_ascii_uppercase).count();
        if capitals < 2 && !name.contains('_') {
            return Ok(false);
        }
        let pattern = format!(r"(?i)\b{}\s*=", regex::escape(name));
        let assignments = Regex::new(&pattern).map_err(|e| CfmlLintError::Rule {
            rule_id: self.rule_id().to_string(),
            message: e.to_string(),
        })?;
        Ok(assignments.find_iter(masked).count() == 1)
    }
}

impl LintRule for ConstantNamingRule {
    fn rule_id(&self) -> &'static str {
        "CONSTANT_NAMING"
    }

    fn category(&self) -> &'static str {
        CATEGORY_NAMING
    }

    fn description(&self) -> &'static str {
        "Constants must be UPPER_CASE"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let mut violations = Vec::new();
        if ctx.config.naming("constantCase", "UPPER_CASE") != "UPPER_CASE" {
            return Ok(violations);
        }
        for name in self
            .assignment
            .captures_iter(&ctx.masked)
            .filter_map(|caps| caps.get(1))
        {
            if is_upper_case(name.as_str()) || !self.looks_constant(&ctx.masked, name.as_str())? {
                continue;
            }
            violations.push(self.violation(
                ctx,
                Severity::Warning,
                ctx.position(name.start()),
                format!("Constant '{}' should be UPPER_CASE", name.as_str()),
            ));
        }
        Ok(violations)
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
