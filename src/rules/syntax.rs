use crate::error::Result;
use crate::result::{LintingViolation, Severity};

use super::{CATEGORY_SYNTAX, LintRule, RuleContext};

/// Reports error-level issues raised while parsing.
pub struct SyntaxErrorRule;

impl LintRule for SyntaxErrorRule {
    fn rule_id(&self) -> &'static str {
        "SYNTAX_ERROR"
    }

    fn category(&self) -> &'static str {
        CATEGORY_SYNTAX
    }

    fn description(&self) -> &'static str {
        "Syntax problems found by the parser"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        Ok(ctx
            .parsed
            .issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .map(|issue| {
                self.violation(
                    ctx,
                    Severity::Error,
                    (issue.line, issue.column),
                    issue.message.clone(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "syntax_tests.rs"]
mod tests;
