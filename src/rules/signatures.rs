use regex::Regex;

use crate::error::Result;
use crate::result::{LintingViolation, Severity};

use super::case::is_lifecycle_method;
use super::{CATEGORY_BEST_PRACTICE, LintRule, RuleContext};

pub struct RequireInitRule {
    component: Regex,
    interface: Regex,
}

impl Default for RequireInitRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireInitRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            component: Regex::new(r"(?im)^\s*component\b").expect("Invalid regex"),
            interface: Regex::new(r"(?im)^\s*interface\b").expect("Invalid regex"),
        }
    }

    fn is_interface(&self, ctx: &RuleContext<'_>) -> bool {
        self.interface.is_match(&ctx.masked)
            || (!ctx.functions.is_empty() && ctx.functions.iter().all(|f| !f.has_body()))
    }
}

impl LintRule for RequireInitRule {
    fn rule_id(&self) -> &'static str {
        "REQUIRE_INIT"
    }

    fn category(&self) -> &'static str {
        CATEGORY_BEST_PRACTICE
    }

    fn description(&self) -> &'static str {
        "Components define an init() constructor"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if !ctx.config.structure_flag("requireInit")
            || !ctx.parsed.is_component_file()
            || !self.component.is_match(&ctx.masked)
            || self.is_interface(ctx)
            || ctx.functions.iter().any(|f| f.name.eq_ignore_ascii_case("init"))
        {
            return Ok(Vec::new());
        }
        Ok(vec![self.violation(
            ctx,
            Severity::Warning,
            (1, 1),
            "Component should have an init() method for proper initialization".to_string(),
        )])
    }
}

pub struct RequireReturnTypesRule;

impl LintRule for RequireReturnTypesRule {
    fn rule_id(&self) -> &'static str {
        "REQUIRE_RETURN_TYPES"
    }

    fn category(&self) -> &'static str {
        CATEGORY_BEST_PRACTICE
    }

    fn description(&self) -> &'static str {
        "Functions declare a return type"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if !ctx.config.structure_flag("requireReturnTypes") {
            return Ok(Vec::new());
        }
        Ok(ctx
            .functions
            .iter()
            .filter(|f| f.return_type.is_none() && !is_lifecycle_method(&f.name))
            .map(|f| {
                self.violation(
                    ctx,
                    Severity::Warning,
                    ctx.position(f.start),
                    format!("Function '{}' should specify a return type", f.name),
                )
            })
            .collect())
    }
}

pub struct RequireArgumentTypesRule;

impl LintRule for RequireArgumentTypesRule {
    fn rule_id(&self) -> &'static str {
        "REQUIRE_ARGUMENT_TYPES"
    }

    fn category(&self) -> &'static str {
        CATEGORY_BEST_PRACTICE
    }

    fn description(&self) -> &'static str {
        "Function arguments declare a type"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if !ctx.config.structure_flag("requireArgumentTypes") {
            return Ok(Vec::new());
        }
        Ok(ctx
            .functions
            .iter()
            .flat_map(|f| &f.params)
            .filter(|p| p.type_name.is_none())
            .map(|p| {
                self.violation(
                    ctx,
                    Severity::Warning,
                    ctx.position(p.offset),
                    format!("Function argument '{}' should specify a type", p.name),
                )
            })
            .collect())
    }
}

pub struct UseAccessorsRule {
    property: Regex,
    declaration: Regex,
    accessors: Regex,
}

impl Default for UseAccessorsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl UseAccessorsRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            property: Regex::new(r"(?im)^\s*property\s+").expect("Invalid regex"),
            declaration: Regex::new(r"(?im)^\s*component\b[^{]*").expect("Invalid regex"),
            accessors: Regex::new(r#"(?i)\baccessors\s*=\s*["']?true\b"#).expect("Invalid regex"),
        }
    }
}

impl LintRule for UseAccessorsRule {
    fn rule_id(&self) -> &'static str {
        "USE_ACCESSORS"
    }

    fn category(&self) -> &'static str {
        CATEGORY_BEST_PRACTICE
    }

    fn description(&self) -> &'static str {
        "Components with properties enable generated accessors"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if !ctx.config.structure_flag("useAccessors")
            || !ctx.parsed.is_component_file()
            || !self.property.is_match(&ctx.masked)
        {
            return Ok(Vec::new());
        }
        // Attribute values are blanked in the masked text, so read the raw declaration.
        let declaration = self
            .declaration
            .find(ctx.content())
            .map_or(ctx.content(), |m| m.as_str());
        if self.accessors.is_match(declaration) {
            return Ok(Vec::new());
        }
        Ok(vec![self.violation(
            ctx,
            Severity::Info,
            (1, 1),
            r#"Component with properties should use accessors="true""#.to_string(),
        )])
    }
}

#[cfg(test)]
#[path = "signatures_tests.rs"]
mod tests;
