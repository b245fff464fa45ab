//! Rule registry and evaluation.
//!
//! Every rule is a stateless value implementing [`LintRule`]. [`RuleEngine`] runs the
//! registered rules in order against one [`RuleContext`] per file and converts any rule
//! failure into a `RULE_EXECUTION_ERROR` warning.

mod conventions;
mod naming;
mod signatures;
pub mod source;
mod structure;
mod syntax;
mod whitespace;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::str::FromStr;

use crate::config::Config;
use crate::error::{CfmlLintError, Result, panic_message};
use crate::parser::{LineIndex, ParseResult};
use crate::result::{LintingViolation, Severity};

use source::{FunctionDecl, FunctionScanner, mask_comments_and_strings};

pub const CATEGORY_NAMING: &str = "NAMING_CONVENTION";
pub const CATEGORY_STYLE: &str = "STYLE_GUIDE";
pub const CATEGORY_BEST_PRACTICE: &str = "BEST_PRACTICE";
pub const CATEGORY_SYNTAX: &str = "SYNTAX_ERROR";

pub const RULE_EXECUTION_ERROR: &str = "RULE_EXECUTION_ERROR";

/// Everything a rule may look at for one file.
pub struct RuleContext<'a> {
    pub parsed: &'a ParseResult,
    pub config: &'a Config,
    /// Lines without their terminators; trailing empty lines are dropped.
    pub lines: Vec<&'a str>,
    /// Content with comments and string bodies blanked out.
    pub masked: String,
    pub functions: Vec<FunctionDecl>,
    index: LineIndex<'a>,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub fn new(parsed: &'a ParseResult, config: &'a Config, scanner: &FunctionScanner) -> Self {
        let masked = mask_comments_and_strings(&parsed.content);
        let functions = scanner.scan(&masked);
        Self {
            parsed,
            config,
            lines: parsed.lines(),
            masked,
            functions,
            index: LineIndex::new(&parsed.content),
        }
    }

    #[must_use]
    pub fn content(&self) -> &'a str {
        &self.parsed.content
    }

    /// 1-based line and column of a byte offset in the content.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        self.index.position(offset)
    }

    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.index.position(offset).0
    }
}

/// A single independent check.
pub trait LintRule: Send + Sync {
    fn rule_id(&self) -> &'static str;

    fn category(&self) -> &'static str;

    /// One-line summary for rule listings.
    fn description(&self) -> &'static str;

    /// Runs the check against one file.
    ///
    /// # Errors
    /// Returns an error when the rule cannot evaluate this file.
    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>>;

    /// A violation of this rule at `position`.
    fn violation(
        &self,
        ctx: &RuleContext<'_>,
        severity: Severity,
        position: (usize, usize),
        message: String,
    ) -> LintingViolation {
        LintingViolation::new(
            self.rule_id(),
            message,
            severity,
            ctx.parsed.file_path(),
            position.0,
            position.1,
        )
        .with_category(self.category())
    }
}

/// The built-in rules, in evaluation order.
#[must_use]
pub fn builtin_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(syntax::SyntaxErrorRule),
        Box::new(whitespace::TrailingWhitespaceRule),
        Box::new(whitespace::ExcessiveEmptyLinesRule),
        Box::new(naming::ComponentNamingRule::new()),
        Box::new(naming::FunctionNamingRule),
        Box::new(naming::VariableNamingRule::new()),
        Box::new(naming::ConstantNamingRule::new()),
        Box::new(conventions::FileNamingRule),
        Box::new(conventions::InterfacePrefixRule::new()),
        Box::new(conventions::AbstractSuffixRule::new()),
        Box::new(structure::RequireCurlyBracesRule::new()),
        Box::new(structure::MaxFunctionLengthRule),
        Box::new(structure::MaxLineLengthRule),
        Box::new(structure::MaxFileLengthRule),
        Box::new(signatures::RequireInitRule::new()),
        Box::new(signatures::RequireReturnTypesRule),
        Box::new(signatures::RequireArgumentTypesRule),
        Box::new(signatures::UseAccessorsRule::new()),
        Box::new(structure::CurlyBraceStyleRule::new()),
    ]
}

/// Rule ids switched on or off from the command line, as in `+ID,-ID`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSelection {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

impl FromStr for RuleSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut selection = Self::default();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (target, id) = match item.strip_prefix('-') {
                Some(id) => (&mut selection.disabled, id),
                None => (
                    &mut selection.enabled,
                    item.strip_prefix('+').unwrap_or(item),
                ),
            };
            let id = id.trim();
            if id.is_empty() {
                return Err(format!("Invalid rule selection: {item}"));
            }
            target.push(id.to_ascii_uppercase());
        }
        Ok(selection)
    }
}

impl RuleSelection {
    /// Whether `rule_id` stays active given the ids disabled by configuration.
    #[must_use]
    pub fn is_active(&self, rule_id: &str, config_disabled: &[String]) -> bool {
        let matches = |ids: &[String]| ids.iter().any(|id| id.eq_ignore_ascii_case(rule_id));
        if matches(&self.disabled) {
            return false;
        }
        matches(&self.enabled) || !matches(config_disabled)
    }
}

/// Runs the active rules against parsed files.
pub struct RuleEngine {
    rules: Vec<Box<dyn LintRule>>,
    scanner: FunctionScanner,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_rules(builtin_rules())
    }
}

impl RuleEngine {
    #[must_use]
    pub fn with_rules(rules: Vec<Box<dyn LintRule>>) -> Self {
        Self {
            rules,
            scanner: FunctionScanner::new(),
        }
    }

    /// The built-in rules minus those disabled by `config` or `selection`.
    #[must_use]
    pub fn from_config(config: &Config, selection: &RuleSelection) -> Self {
        let disabled = config.disabled_rules();
        let rules: Vec<Box<dyn LintRule>> = builtin_rules()
            .into_iter()
            .filter(|rule| selection.is_active(rule.rule_id(), &disabled))
            .collect();
        tracing::debug!("{} rules active", rules.len());
        Self::with_rules(rules)
    }

    #[must_use]
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.rule_id()).collect()
    }

    /// Violations from every rule, in registry order.
    #[must_use]
    pub fn analyze(&self, parsed: &ParseResult, config: &Config) -> Vec<LintingViolation> {
        let ctx = RuleContext::new(parsed, config, &self.scanner);
        let mut violations = Vec::new();
        for rule in &self.rules {
            let outcome = catch_unwind(AssertUnwindSafe(|| rule.analyze(&ctx)))
                .unwrap_or_else(|payload| {
                    Err(CfmlLintError::Rule {
                        rule_id: rule.rule_id().to_string(),
                        message: panic_message(payload.as_ref()),
                    })
                });
            match outcome {
                Ok(found) => violations.extend(found),
                Err(e) => {
                    tracing::warn!("Rule {} failed on {}: {e}", rule.rule_id(), ctx.parsed.file_path());
                    violations.push(execution_error(rule.as_ref(), &e, &ctx));
                }
            }
        }
        violations
    }
}

fn execution_error(
    rule: &dyn LintRule,
    error: &CfmlLintError,
    ctx: &RuleContext<'_>,
) -> LintingViolation {
    let message = match error {
        CfmlLintError::Rule { message, .. } => message.clone(),
        other => other.to_string(),
    };
    LintingViolation::new(
        RULE_EXECUTION_ERROR,
        format!("Rule {} failed: {message}", rule.rule_id()),
        Severity::Warning,
        ctx.parsed.file_path(),
        1,
        1,
    )
}

/// Shared case conventions.
pub(crate) mod case {
    #[must_use]
    pub fn is_pascal_case(name: &str) -> bool {
        let mut chars = name.chars();
        chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphanumeric())
    }

    #[must_use]
    pub fn is_camel_case(name: &str) -> bool {
        let mut chars = name.chars();
        chars.next().is_some_and(|c| c.is_ascii_lowercase()) && chars.all(|c| c.is_ascii_alphanumeric())
    }

    #[must_use]
    pub fn is_upper_case(name: &str) -> bool {
        let mut chars = name.chars();
        chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    }

    /// `init` and `onXxx` lifecycle handlers.
    #[must_use]
    pub fn is_lifecycle_method(name: &str) -> bool {
        name == "init"
            || (name.starts_with("on") && name[2..].chars().next().is_some_and(char::is_uppercase))
    }
}

/// Runs one rule over `content` as if it were read from `file`.
#[cfg(test)]
pub(crate) fn check(
    rule: &dyn LintRule,
    file: &str,
    content: &str,
    config: &Config,
) -> Vec<LintingViolation> {
    let parsed = ParseResult::new(file, content, true);
    let ctx = RuleContext::new(&parsed, config, &FunctionScanner::new());
    rule.analyze(&ctx).expect("rule should not fail")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
