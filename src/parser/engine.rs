use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use regex::Regex;
use thiserror::Error;

use crate::result::Severity;

use super::{ENGINE_TAG, ParseError, ParseIssue, ParseResult, Parser};

/// A syntax error reported by a script engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
pub struct EngineError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// An embeddable engine able to validate CFML source.
pub trait ScriptEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the syntax errors found in `content`; empty when it is valid.
    ///
    /// # Errors
    /// Returns an error when the engine itself cannot be run.
    fn validate(&self, content: &str) -> std::io::Result<Vec<EngineError>>;
}

/// Runs an external command with the source on stdin.
///
/// A zero exit status means valid. Otherwise the combined output is the error message,
/// and a `line N` / `column N` mention in it gives the location.
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    line_pattern: Regex,
    column_pattern: Regex,
}

impl CommandEngine {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            line_pattern: Regex::new(r"(?i)\bline[:\s]+(\d+)").expect("Invalid regex"),
            column_pattern: Regex::new(r"(?i)\b(?:col|column)[:\s]+(\d+)")
                .expect("Invalid regex"),
        }
    }

    /// Builds an engine from `[program, args...]`; `None` when empty.
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self::new(program.clone(), args.to_vec()))
    }

    fn capture_number(pattern: &Regex, text: &str) -> usize {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1)
    }
}

impl ScriptEngine for CommandEngine {
    fn name(&self) -> &str {
        &self.program
    }

    fn validate(&self, content: &str) -> std::io::Result<Vec<EngineError>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        let stdin = child.stdin.take();
        // Output is drained while stdin is written; a full pipe would otherwise block both sides.
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => match stdin.write_all(content.as_bytes()) {
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                },
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (written, output)
        });
        let output = output?;
        written?;
        if output.status.success() {
            return Ok(Vec::new());
        }

        let mut text = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if text.is_empty() {
            text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
        if text.is_empty() {
            text = format!("{} exited with {}", self.program, output.status);
        }
        Ok(vec![EngineError {
            line: Self::capture_number(&self.line_pattern, &text),
            column: Self::capture_number(&self.column_pattern, &text),
            message: text,
        }])
    }
}

/// Validates through a script engine when one is configured, otherwise through
/// lightweight content checks.
#[derive(Clone, Default)]
pub struct EngineValidator {
    engine: Option<Arc<dyn ScriptEngine>>,
}

impl EngineValidator {
    #[must_use]
    pub fn new(engine: Option<Arc<dyn ScriptEngine>>) -> Self {
        Self { engine }
    }

    fn heuristic_issues(content: &str) -> Vec<ParseIssue> {
        let mut issues = Vec::new();
        if content.trim().is_empty() {
            issues.push(ParseIssue::new("Empty CFML content", Severity::Warning, 1, 1));
            return issues;
        }
        if content.contains("<%") && !content.contains("%>") {
            issues.push(syntax_issue("Unclosed tag syntax", 1, 1));
        }
        if content.contains("<cf") && !content.contains('>') {
            issues.push(syntax_issue("Unclosed CF tag", 1, 1));
        }
        let opens = content.matches('{').count();
        let closes = content.matches('}').count();
        if opens != closes {
            issues.push(syntax_issue("Unmatched braces", 1, 1));
        }
        issues
    }
}

fn syntax_issue(message: &str, line: usize, column: usize) -> ParseIssue {
    ParseIssue::new(message, Severity::Error, line, column).with_rule("SYNTAX_ERROR")
}

impl Parser for EngineValidator {
    fn parser_type(&self) -> &'static str {
        ENGINE_TAG
    }

    fn can_parse(&self, content: &str) -> bool {
        !content.trim().is_empty()
    }

    fn parse(&self, content: &str, path: &Path) -> Result<ParseResult, ParseError> {
        let issues = match &self.engine {
            None => Self::heuristic_issues(content),
            Some(engine) => engine
                .validate(content)
                .map_err(|e| {
                    ParseError::new(
                        path.display().to_string(),
                        1,
                        1,
                        format!("Script engine '{}' failed: {e}", engine.name()),
                    )
                })?
                .into_iter()
                .map(|err| {
                    syntax_issue(&format!("Syntax error: {}", err.message), err.line, err.column)
                })
                .collect(),
        };
        Ok(ParseResult::new(path, content, true).with_issues(issues))
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
