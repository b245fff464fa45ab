use regex::Regex;

use crate::error::Result;
use crate::result::{LintingViolation, Severity};

use super::source::matching_close;
use super::{CATEGORY_BEST_PRACTICE, CATEGORY_STYLE, LintRule, RuleContext};

/// True for lines that carry code rather than blanks or comment text.
fn is_code_line(line: &str, skip_star_lines: bool) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !trimmed.starts_with("//")
        && !trimmed.starts_with("/*")
        && trimmed != "*/"
        && !(skip_star_lines && trimmed.starts_with('*'))
}

fn limit(value: i32) -> Option<usize> {
    usize::try_from(value).ok().filter(|&v| v > 0)
}

pub struct RequireCurlyBracesRule {
    keyword: Regex,
}

impl Default for RequireCurlyBracesRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireCurlyBracesRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            keyword: Regex::new(r"(?i)\b(if|else|for|while|try|catch)\b").expect("Invalid regex"),
        }
    }

    fn message(keyword: &str) -> &'static str {
        match keyword {
            "if" => "If statement should use curly braces",
            "else" => "Else statement should use curly braces",
            "for" => "For loop should use curly braces",
            "while" => "While loop should use curly braces",
            "try" => "Try statement should use curly braces",
            _ => "Catch statement should use curly braces",
        }
    }

    /// Offset where the controlled statement starts, if the keyword has one.
    fn body_start(masked: &str, keyword: &str, end: usize) -> Option<usize> {
        let after = skip_whitespace(masked, end);
        match keyword {
            "else" | "try" => Some(after),
            _ => {
                if masked.as_bytes().get(after) != Some(&b'(') {
                    return None;
                }
                matching_close(masked, after).map(|close| skip_whitespace(masked, close + 1))
            }
        }
    }

    /// A braceless statement ends with `;` on the line where it starts.
    fn is_braceless_statement(masked: &str, keyword: &str, start: usize) -> bool {
        let rest = &masked[start..];
        if rest.starts_with(['{', ';']) || rest.is_empty() {
            return false;
        }
        if keyword == "else" && starts_with_word(rest, "if") {
            return false;
        }
        let line = rest.split('\n').next().unwrap_or("");
        line.find(';').is_some_and(|i| i > 0)
    }
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    text.get(from..)
        .map_or(text.len(), |rest| from + (rest.len() - rest.trim_start().len()))
}

fn starts_with_word(text: &str, word: &str) -> bool {
    text.get(..word.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(word))
        && !text[word.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

impl LintRule for RequireCurlyBracesRule {
    fn rule_id(&self) -> &'static str {
        "REQUIRE_CURLY_BRACES"
    }

    fn category(&self) -> &'static str {
        CATEGORY_BEST_PRACTICE
    }

    fn description(&self) -> &'static str {
        "Control structures must use braces"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if !ctx.config.structure_flag("requireCurlyBraces") {
            return Ok(Vec::new());
        }
        let masked = ctx.masked.as_str();
        let mut violations = Vec::new();
        for found in self.keyword.find_iter(masked) {
            let keyword = found.as_str().to_ascii_lowercase();
            let Some(start) = Self::body_start(masked, &keyword, found.end()) else {
                continue;
            };
            if Self::is_braceless_statement(masked, &keyword, start) {
                violations.push(self.violation(
                    ctx,
                    Severity::Warning,
                    ctx.position(found.start()),
                    Self::message(&keyword).to_string(),
                ));
            }
        }
        Ok(violations)
    }
}

pub struct MaxFunctionLengthRule;

impl LintRule for MaxFunctionLengthRule {
    fn rule_id(&self) -> &'static str {
        "MAX_FUNCTION_LENGTH"
    }

    fn category(&self) -> &'static str {
        CATEGORY_BEST_PRACTICE
    }

    fn description(&self) -> &'static str {
        "Limits code lines per function body"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let Some(max) = limit(ctx.config.max_function_length()) else {
            return Ok(Vec::new());
        };
        let mut violations = Vec::new();
        for function in &ctx.functions {
            let Some(body) = function.body.clone().and_then(|r| ctx.content().get(r)) else {
                continue;
            };
            let count = body.lines().filter(|line| is_code_line(line, false)).count();
            if count > max {
                violations.push(self.violation(
                    ctx,
                    Severity::Warning,
                    (ctx.line_of(function.start), 1),
                    format!(
                        "Function '{}' is too long ({count} lines, max {max})",
                        function.name
                    ),
                ));
            }
        }
        Ok(violations)
    }
}

/// Display width with tabs advancing to the next multiple of `tab`.
#[must_use]
pub fn display_width(line: &str, tab: usize) -> usize {
    let tab = tab.max(1);
    line.chars().fold(0, |width, c| {
        if c == '\t' {
            width + tab - (width % tab)
        } else {
            width + 1
        }
    })
}

pub struct MaxLineLengthRule;

impl LintRule for MaxLineLengthRule {
    fn rule_id(&self) -> &'static str {
        "MAX_LINE_LENGTH"
    }

    fn category(&self) -> &'static str {
        CATEGORY_STYLE
    }

    fn description(&self) -> &'static str {
        "Limits the display width of a line"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let Some(max) = limit(ctx.config.max_line_length()) else {
            return Ok(Vec::new());
        };
        let tab = usize::try_from(ctx.config.indent_size()).unwrap_or(1);
        Ok(ctx
            .lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let width = display_width(line, tab);
                (width > max).then(|| {
                    self.violation(
                        ctx,
                        Severity::Warning,
                        (i + 1, width),
                        format!("Line is too long ({width} characters, max {max})"),
                    )
                })
            })
            .collect())
    }
}

pub struct MaxFileLengthRule;

impl LintRule for MaxFileLengthRule {
    fn rule_id(&self) -> &'static str {
        "MAX_FILE_LENGTH"
    }

    fn category(&self) -> &'static str {
        CATEGORY_BEST_PRACTICE
    }

    fn description(&self) -> &'static str {
        "Limits code lines per file"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        let Some(max) = limit(ctx.config.max_file_length()) else {
            return Ok(Vec::new());
        };
        let count = ctx.lines.iter().filter(|line| is_code_line(line, true)).count();
        if count <= max {
            return Ok(Vec::new());
        }
        Ok(vec![self.violation(
            ctx,
            Severity::Warning,
            (1, 1),
            format!("File is too long ({count} lines, max {max})"),
        )])
    }
}

pub struct CurlyBraceStyleRule {
    brace_on_next_line: Regex,
}

impl Default for CurlyBraceStyleRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CurlyBraceStyleRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            brace_on_next_line: Regex::new(
                r"(?i)\b(if|else|for|while|function|component|try|catch)\b[^{}\n]*\n\s*\{",
            )
            .expect("Invalid regex"),
        }
    }
}

impl LintRule for CurlyBraceStyleRule {
    fn rule_id(&self) -> &'static str {
        "CURLY_BRACE_STYLE"
    }

    fn category(&self) -> &'static str {
        CATEGORY_STYLE
    }

    fn description(&self) -> &'static str {
        "Opening braces sit on the same line as their statement"
    }

    fn analyze(&self, ctx: &RuleContext<'_>) -> Result<Vec<LintingViolation>> {
        if ctx.config.curly_brace_style() != "same-line" {
            return Ok(Vec::new());
        }
        Ok(self
            .brace_on_next_line
            .captures_iter(&ctx.masked)
            .filter_map(|caps| caps.get(1))
            .map(|keyword| {
                self.violation(
                    ctx,
                    Severity::Info,
                    ctx.position(keyword.start()),
                    format!(
                        "{} statement should have opening brace on same line",
                        keyword.as_str()
                    ),
                )
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
