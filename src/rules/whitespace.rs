use crate::error::Result;
use crate::result::{LintingViolation, Severity};

use super::{CATEGORY_STYLE, LintRule, RuleContext};

pub struct TrailingWhitespaceRule;

impl LintRule for TrailingWhitespaceRule {
    fn rule_id(&self) -> &'static str {
        "TRAILING_WHITESPACE"
    }

    fn category(&self) -> &'static str {
        CATEGORY_STYLE
    }

    fn description(&self) -> &'static str {
        "Lines must not end in whitespace"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if !ctx.config.trim_trailing_whitespace() {
            return Ok(Vec::new());
        }
        Ok(ctx
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.ends_with(char::is_whitespace))
            .map(|(i, line)| {
                self.violation(
                    ctx,
                    Severity::Warning,
                    (i + 1, line.chars().count()),
                    "Line has trailing whitespace".to_string(),
                )
                .with_suggested_fix("Remove the trailing whitespace")
            })
            .collect())
    }
}

pub struct ExcessiveEmptyLinesRule;

impl LintRule for ExcessiveEmptyLinesRule {
    fn rule_id(&self) -> &'static str {
        "EXCESSIVE_EMPTY_LINES"
    }

    fn category(&self) -> &'static str {
        CATEGORY_STYLE
    }

    fn description(&self) -> &'static str {
        "Limits runs of consecutive blank lines"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let max = usize::try_from(ctx.config.max_empty_lines()).unwrap_or(0);
        let mut violations = Vec::new();
        let mut run = 0usize;
        for (i, line) in ctx.lines.iter().enumerate() {
            if line.trim().is_empty() {
                run += 1;
                continue;
            }
            if run > max {
                violations.push(self.violation(
                    ctx,
                    Severity::Info,
                    (i + 1, 1),
                    format!("Too many consecutive empty lines ({run}, max {max})"),
                ));
            }
            run = 0;
        }
        Ok(violations)
    }
}

#[cfg(test)]
#[path = "whitespace_tests.rs"]
mod tests;
