use regex::Regex;

use crate::error::Result;
use crate::result::{LintingViolation, Severity};

use super::case::{is_camel_case, is_pascal_case};
use super::{CATEGORY_NAMING, LintRule, RuleContext};

/// Template names that keep their conventional spelling.
const SPECIAL_TEMPLATES: &[&str] = &["Application", "index", "error", "404", "500"];

pub struct FileNamingRule;

impl FileNamingRule {
    fn check_component(&self, ctx: &RuleContext<'_>, stem: &str) -> Vec<LintingViolation> {
        let mut messages = Vec::new();
        if !is_pascal_case(stem) {
            messages.push(format!("CFC filename '{stem}' should be PascalCase"));
        }
        if stem.contains('_') {
            messages.push(format!(
                "CFC filename '{stem}' should not contain underscores, use PascalCase instead"
            ));
        }
        if stem.contains('-') {
            messages.push(format!(
                "CFC filename '{stem}' should not contain hyphens, use PascalCase instead"
            ));
        }
        messages
            .into_iter()
            .map(|m| self.violation(ctx, Severity::Warning, (1, 1), m))
            .collect()
    }

    fn check_template(&self, ctx: &RuleContext<'_>, stem: &str) -> Vec<LintingViolation> {
        let mut violations = Vec::new();
        let expected = ctx.config.naming("cfmFileCase", "camelCase");
        if expected == "camelCase" && !SPECIAL_TEMPLATES.contains(&stem) && !is_camel_case(stem) {
            violations.push(self.violation(
                ctx,
                Severity::Warning,
                (1, 1),
                format!("CFM filename '{stem}' should be camelCase"),
            ));
        }
        if stem.contains('_') && stem != "Application" && stem != "OnRequestEnd" {
            violations.push(self.violation(
                ctx,
                Severity::Info,
                (1, 1),
                format!("CFM filename '{stem}' should avoid underscores, use camelCase instead"),
            ));
        }
        violations
    }
}

impl LintRule for FileNamingRule {
    fn rule_id(&self) -> &'static str {
        "FILE_NAMING"
    }

    fn category(&self) -> &'static str {
        CATEGORY_NAMING
    }

    fn description(&self) -> &'static str {
        "Components are PascalCase files, templates camelCase files"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let stem = ctx.parsed.file_stem();
        Ok(match ctx.parsed.extension().as_str() {
            "cfc" => self.check_component(ctx, stem),
            "cfm" | "cfml" => self.check_template(ctx, stem),
            _ => Vec::new(),
        })
    }
}

pub struct InterfacePrefixRule {
    declaration: Regex,
}

impl Default for InterfacePrefixRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfacePrefixRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: Regex::new(
                r"(?im)^\s*interface\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*(?:extends\s+[^{]*)?\{",
            )
            .expect("Invalid regex"),
        }
    }

    /// Bodiless declarations only, and at least one of them.
    fn looks_like_interface(ctx: &RuleContext<'_>) -> bool {
        !ctx.functions.is_empty() && ctx.functions.iter().all(|f| !f.has_body())
    }
}

impl LintRule for InterfacePrefixRule {
    fn rule_id(&self) -> &'static str {
        "INTERFACE_PREFIX"
    }

    fn category(&self) -> &'static str {
        CATEGORY_NAMING
    }

    fn description(&self) -> &'static str {
        "Interfaces start with the configured prefix"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let mut violations = Vec::new();
        let prefix = ctx.config.interface_prefix();
        if !ctx.parsed.is_component_file() || prefix.is_empty() {
            return Ok(violations);
        }

        for name in self
            .declaration
            .captures_iter(&ctx.masked)
            .filter_map(|caps| caps.get(1))
        {
            if !name.as_str().starts_with(&prefix) {
                violations.push(self.violation(
                    ctx,
                    Severity::Info,
                    ctx.position(name.start()),
                    format!(
                        "Interface name '{}' should start with prefix '{prefix}'",
                        name.as_str()
                    ),
                ));
            }
        }

        let stem = ctx.parsed.file_stem();
        if Self::looks_like_interface(ctx) && !stem.starts_with(&prefix) {
            violations.push(self.violation(
                ctx,
                Severity::Info,
                (1, 1),
                format!(
                    "Component '{stem}' appears to be an interface and should start with prefix '{prefix}'"
                ),
            ));
        }
        Ok(violations)
    }
}

const BASE_NAME_HINTS: &[&str] = &["base", "abstract", "parent", "template"];
const BASE_TEXT_HINTS: &[&str] = &["base class", "abstract class", "extend this", "parent class"];

pub struct AbstractSuffixRule {
    abstract_component: Regex,
    abstract_method: Regex,
}

impl Default for AbstractSuffixRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AbstractSuffixRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            abstract_component: Regex::new(
                r#"(?im)^\s*component\s+[^{]*\babstract\s*=\s*["']?true["']?[^{]*\{"#,
            )
            .expect("Invalid regex"),
            abstract_method: Regex::new(
                r"(?im)(?:^|\s)(?:public|private|package|remote)?\s*abstract\s+function\s+[a-zA-Z_][a-zA-Z0-9_]*\s*\(",
            )
            .expect("Invalid regex"),
        }
    }

    fn looks_like_base_class(ctx: &RuleContext<'_>) -> bool {
        let file_name = ctx.parsed.file_name().to_lowercase();
        if BASE_NAME_HINTS.iter().any(|hint| file_name.contains(hint)) {
            return true;
        }
        let lower = ctx.content().to_lowercase();
        if BASE_TEXT_HINTS.iter().any(|hint| lower.contains(hint)) {
            return true;
        }

        let bodies: Vec<&str> = ctx
            .functions
            .iter()
            .filter_map(|f| f.body.clone())
            .map(|range| ctx.masked.get(range).unwrap_or(""))
            .collect();
        let placeholders = bodies
            .iter()
            .filter(|body| body.trim().is_empty() || body.to_lowercase().contains("throw"))
            .count();
        !bodies.is_empty() && placeholders > bodies.len() / 2
    }

    fn reasons(&self, ctx: &RuleContext<'_>) -> Vec<&'static str> {
        let mut reasons = Vec::new();
        if self.abstract_component.is_match(ctx.content()) {
            reasons.push("explicitly abstract");
        }
        if self.abstract_method.is_match(&ctx.masked) {
            reasons.push("contains abstract methods");
        }
        if Self::looks_like_base_class(ctx) {
            reasons.push("appears to be a base class");
        }
        reasons
    }
}

impl LintRule for AbstractSuffixRule {
    fn rule_id(&self) -> &'static str {
        "ABSTRACT_SUFFIX"
    }

    fn category(&self) -> &'static str {
        CATEGORY_NAMING
    }

    fn description(&self) -> &'static str {
        "Abstract and base components end with the configured suffix"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let suffix = ctx.config.abstract_suffix();
        let stem = ctx.parsed.file_stem();
        if !ctx.parsed.is_component_file() || suffix.is_empty() || stem.ends_with(&suffix) {
            return Ok(Vec::new());
        }
        Ok(self
            .reasons(ctx)
            .into_iter()
            .map(|reason| {
                self.violation(
                    ctx,
                    Severity::Info,
                    (1, 1),
                    format!("Component '{stem}' {reason} and should end with suffix '{suffix}'"),
                )
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "conventions_tests.rs"]
mod tests;
