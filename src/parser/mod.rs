//! Interchangeable content-interpretation backends.
//!
//! Every backend implements [`Parser`]. [`ParserFactory`] maps the string tags used in
//! configuration (`boxlang`, `lucee`, `regex`) to backends, and [`ParserMode`] decides
//! which tag a given file goes to.

mod engine;
mod permissive;
mod structural;

pub use engine::{CommandEngine, EngineError, EngineValidator, ScriptEngine};
pub use permissive::PermissiveParser;
pub use structural::StructuralParser;

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::result::Severity;

pub const STRUCTURAL_TAG: &str = "boxlang";
pub const ENGINE_TAG: &str = "lucee";
pub const PERMISSIVE_TAG: &str = "regex";

/// A file that could not be interpreted at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {file}:{line}:{column}")]
pub struct ParseError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: line.max(1),
            column: column.max(1),
            message: message.into(),
        }
    }
}

/// A located problem reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub message: String,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    pub rule: Option<String>,
}

impl ParseIssue {
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            severity,
            line: line.max(1),
            column: column.max(1),
            rule: None,
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`
    SingleLine,
    /// `/* ... */`
    MultiLine,
    /// `/** ... */`
    Doc,
    /// `<!-- ... -->`
    Html,
    /// `<!--- ... --->`
    Cfml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseComment {
    /// Comment body without its delimiters.
    pub text: String,
    pub kind: CommentKind,
    pub span: Span,
}

/// Opaque tree handed over by a tree-building backend.
pub type SyntaxTree = Arc<dyn Any + Send + Sync>;

/// Outcome of interpreting one file. Read-only once built.
#[derive(Clone)]
pub struct ParseResult {
    pub path: PathBuf,
    pub content: String,
    pub success: bool,
    pub errors: Vec<String>,
    pub syntax_tree: Option<SyntaxTree>,
    pub issues: Vec<ParseIssue>,
    pub comments: Vec<ParseComment>,
}

impl fmt::Debug for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResult")
            .field("path", &self.path)
            .field("success", &self.success)
            .field("errors", &self.errors)
            .field("has_syntax_tree", &self.syntax_tree.is_some())
            .field("issues", &self.issues)
            .field("comments", &self.comments.len())
            .finish_non_exhaustive()
    }
}

impl ParseResult {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, success: bool) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            success,
            errors: Vec::new(),
            syntax_tree: None,
            issues: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Attaches issues. Error issues also land in `errors` and clear `success`.
    #[must_use]
    pub fn with_issues(mut self, issues: Vec<ParseIssue>) -> Self {
        for issue in issues.iter().filter(|i| i.severity == Severity::Error) {
            self.errors.push(format!(
                "{} at line {}, column {}",
                issue.message, issue.line, issue.column
            ));
            self.success = false;
        }
        self.issues.extend(issues);
        self
    }

    #[must_use]
    pub fn with_comments(mut self, comments: Vec<ParseComment>) -> Self {
        self.comments = comments;
        self
    }

    #[must_use]
    pub fn with_syntax_tree(mut self, tree: SyntaxTree) -> Self {
        self.syntax_tree = Some(tree);
        self
    }

    /// Path as it appears in findings.
    #[must_use]
    pub fn file_path(&self) -> String {
        self.path.display().to_string()
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }

    /// File name without its extension.
    #[must_use]
    pub fn file_stem(&self) -> &str {
        self.path.file_stem().and_then(|n| n.to_str()).unwrap_or("")
    }

    /// Lower-cased extension, empty when there is none.
    #[must_use]
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }

    #[must_use]
    pub fn is_component_file(&self) -> bool {
        self.extension() == "cfc"
    }

    /// Lines split on `\n` or `\r\n`, without trailing empty lines.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.content)
    }
}

/// Splits on `\n` or `\r\n` and drops trailing empty strings.
#[must_use]
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Maps byte offsets to 1-based line and column numbers.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    content: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        Self { content, starts }
    }

    /// Line and column of `offset`. Columns count characters, not bytes.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let line = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts[line - 1];
        let column = self
            .content
            .get(start..offset)
            .map_or(offset - start, |s| s.chars().count());
        (line, column + 1)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

/// 1-based line and column of a byte offset.
#[must_use]
pub fn position_at(content: &str, offset: usize) -> (usize, usize) {
    LineIndex::new(content).position(offset)
}

/// A content-interpretation backend.
pub trait Parser: Send + Sync {
    /// Stable identifier used for usage statistics.
    fn parser_type(&self) -> &'static str;

    fn can_parse(&self, content: &str) -> bool;

    /// Interprets `content` read from `path`.
    ///
    /// # Errors
    /// Returns a `ParseError` when the content cannot be interpreted at all.
    fn parse(&self, content: &str, path: &Path) -> Result<ParseResult, ParseError>;
}

/// How each file is routed to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserMode {
    /// Heuristic choice between the configured primary and fallback tags.
    #[default]
    Auto,
    Explicit(String),
}

impl std::str::FromStr for ParserMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        match tag.as_str() {
            "auto" => Ok(Self::Auto),
            STRUCTURAL_TAG | ENGINE_TAG | PERMISSIVE_TAG => Ok(Self::Explicit(tag)),
            _ => Err(format!(
                "Unknown parser: {s} (expected auto, boxlang, lucee or regex)"
            )),
        }
    }
}

/// True when content looks like a component, an interface or tag markup.
#[must_use]
pub fn prefers_primary(content: &str) -> bool {
    content.contains("component")
        || content.contains("interface")
        || content.contains("<cf")
        || content.contains("</cf")
}

impl ParserMode {
    /// The backend tag for `content`.
    #[must_use]
    pub fn select_tag(&self, content: &str, primary: &str, fallback: &str) -> String {
        match self {
            Self::Explicit(tag) => tag.clone(),
            Self::Auto if prefers_primary(content) => primary.to_string(),
            Self::Auto => fallback.to_string(),
        }
    }
}

/// Builds backends from their tags.
#[derive(Clone, Default)]
pub struct ParserFactory {
    engine: Option<Arc<dyn ScriptEngine>>,
}

impl fmt::Debug for ParserFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserFactory")
            .field("engine", &self.engine.as_ref().map(|e| e.name().to_string()))
            .finish()
    }
}

impl ParserFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_engine(engine: Arc<dyn ScriptEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Uses `parser.lucee.command` as an external validation engine when set.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let command = config.get_string_list("parser.lucee.command", &[]);
        CommandEngine::from_argv(&command).map_or_else(Self::new, |engine| {
            tracing::debug!("Using external engine: {}", engine.name());
            Self::with_engine(Arc::new(engine))
        })
    }

    /// Returns the backend registered under `tag`, or `None` for unknown tags.
    #[must_use]
    pub fn create(&self, tag: &str) -> Option<Box<dyn Parser>> {
        match tag.to_lowercase().as_str() {
            STRUCTURAL_TAG => Some(Box::new(StructuralParser::new())),
            ENGINE_TAG => Some(Box::new(EngineValidator::new(self.engine.clone()))),
            PERMISSIVE_TAG => Some(Box::new(PermissiveParser::new())),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
