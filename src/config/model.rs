use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::defaults::{
    self, DEFAULT_ABSTRACT_SUFFIX, DEFAULT_CACHE_DIRECTORY, DEFAULT_CURLY_BRACE_STYLE,
    DEFAULT_ENCODING, DEFAULT_EXCLUDES, DEFAULT_FALLBACK_PARSER, DEFAULT_INCLUDES,
    DEFAULT_INDENT_SIZE, DEFAULT_INDENT_TYPE, DEFAULT_INTERFACE_PREFIX, DEFAULT_MAX_EMPTY_LINES,
    DEFAULT_MAX_FILE_LENGTH, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FUNCTION_LENGTH,
    DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_THREADS, DEFAULT_PARSER_TIMEOUT_MS,
    DEFAULT_PRIMARY_PARSER,
};

const NAMING: &str = "linting.rules.naming";
const WHITESPACE: &str = "linting.rules.whitespace";
const STRUCTURE: &str = "linting.rules.codeStructure";

/// Resolved settings for one run.
///
/// The tree is addressed with dot-separated paths such as
/// `linting.rules.whitespace.maxEmptyLines`. Every getter returns its default when a
/// segment is missing or holds a value of the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    document: Value,
    base_dir: PathBuf,
    source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_document(defaults::default_document(), PathBuf::from("."))
    }
}

impl Config {
    /// Wraps a settings tree as-is, without layering it over the defaults.
    #[must_use]
    pub const fn from_document(document: Value, base_dir: PathBuf) -> Self {
        Self {
            document,
            base_dir,
            source: None,
        }
    }

    /// Layers `document` over the embedded defaults.
    #[must_use]
    pub fn layered(document: Value, base_dir: PathBuf) -> Self {
        Self::from_document(
            defaults::merge_documents(defaults::default_document(), document),
            base_dir,
        )
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns a copy with `overlay` deep-merged on top.
    #[must_use]
    pub fn with_overlay(self, overlay: Value) -> Self {
        Self {
            document: defaults::merge_documents(self.document, overlay),
            ..self
        }
    }

    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Walks `path` one segment at a time.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.document, |node, segment| node.as_object()?.get(segment))
    }

    #[must_use]
    pub fn get_str(&self, path: &str, default: &str) -> String {
        match self.get(path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    #[must_use]
    pub fn get_long(&self, path: &str, default: i64) -> i64 {
        match self.get(path) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    #[must_use]
    pub fn get_int(&self, path: &str, default: i32) -> i32 {
        i32::try_from(self.get_long(path, i64::from(default))).unwrap_or(default)
    }

    #[must_use]
    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        match self.get(path) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    #[must_use]
    pub fn get_string_list(&self, path: &str, default: &[&str]) -> Vec<String> {
        match self.get(path) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => default.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    // Parser

    #[must_use]
    pub fn primary_parser(&self) -> String {
        self.get_str("parser.primary", DEFAULT_PRIMARY_PARSER)
    }

    #[must_use]
    pub fn fallback_parser(&self) -> String {
        self.get_str("parser.fallback", DEFAULT_FALLBACK_PARSER)
    }

    /// Per-file parser timeout in milliseconds. Stored only; nothing enforces it.
    #[must_use]
    pub fn parser_timeout_ms(&self) -> i64 {
        self.get_long("parser.timeout", DEFAULT_PARSER_TIMEOUT_MS)
    }

    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        u64::try_from(self.get_long("parser.maxFileSize", DEFAULT_MAX_FILE_SIZE)).unwrap_or(0)
    }

    #[must_use]
    pub fn encoding(&self) -> String {
        self.get_str("parser.encoding", DEFAULT_ENCODING)
    }

    // Performance

    #[must_use]
    pub fn parallel_processing(&self) -> bool {
        self.get_bool("performance.parallelProcessing", true)
    }

    #[must_use]
    pub fn max_threads(&self) -> i32 {
        self.get_int("performance.maxThreads", DEFAULT_MAX_THREADS)
    }

    #[must_use]
    pub fn caching_enabled(&self) -> bool {
        self.get_bool("performance.enableCaching", true)
    }

    #[must_use]
    pub fn cache_directory(&self) -> String {
        self.get_str("performance.cacheDirectory", DEFAULT_CACHE_DIRECTORY)
    }

    // Linting

    #[must_use]
    pub fn linting_enabled(&self) -> bool {
        self.get_bool("linting.enabled", true)
    }

    /// Rule categories mapped to `severity` (`error`, `warning` or `info`).
    #[must_use]
    pub fn severity_categories(&self, severity: &str) -> Vec<String> {
        self.get_string_list(&format!("linting.severity.{severity}"), &[])
    }

    /// Rule ids switched off by `linting.disabledRules` and the active custom rule set.
    #[must_use]
    pub fn disabled_rules(&self) -> Vec<String> {
        let mut disabled = self.get_string_list("linting.disabledRules", &[]);
        let rule_set = self.get_str("linting.ruleSet", "");
        if !rule_set.is_empty() {
            disabled.extend(self.get_string_list(&format!("customRules.{rule_set}.disabled"), &[]));
        }
        disabled
    }

    #[must_use]
    pub fn naming(&self, key: &str, default: &str) -> String {
        self.get_str(&format!("{NAMING}.{key}"), default)
    }

    #[must_use]
    pub fn interface_prefix(&self) -> String {
        self.naming("interfacePrefix", DEFAULT_INTERFACE_PREFIX)
    }

    #[must_use]
    pub fn abstract_suffix(&self) -> String {
        self.naming("abstractSuffix", DEFAULT_ABSTRACT_SUFFIX)
    }

    #[must_use]
    pub fn indent_size(&self) -> i32 {
        self.get_int(&format!("{WHITESPACE}.indentSize"), DEFAULT_INDENT_SIZE)
    }

    #[must_use]
    pub fn indent_type(&self) -> String {
        self.get_str(&format!("{WHITESPACE}.indentType"), DEFAULT_INDENT_TYPE)
    }

    #[must_use]
    pub fn trim_trailing_whitespace(&self) -> bool {
        self.get_bool(&format!("{WHITESPACE}.trimTrailingWhitespace"), true)
    }

    #[must_use]
    pub fn max_empty_lines(&self) -> i32 {
        self.get_int(&format!("{WHITESPACE}.maxEmptyLines"), DEFAULT_MAX_EMPTY_LINES)
    }

    /// Boolean toggle under `linting.rules.codeStructure`.
    #[must_use]
    pub fn structure_flag(&self, key: &str) -> bool {
        self.get_bool(&format!("{STRUCTURE}.{key}"), true)
    }

    #[must_use]
    pub fn curly_brace_style(&self) -> String {
        self.get_str(&format!("{STRUCTURE}.curlyBraceStyle"), DEFAULT_CURLY_BRACE_STYLE)
    }

    #[must_use]
    pub fn max_function_length(&self) -> i32 {
        self.get_int(&format!("{STRUCTURE}.maxFunctionLength"), DEFAULT_MAX_FUNCTION_LENGTH)
    }

    #[must_use]
    pub fn max_line_length(&self) -> i32 {
        self.get_int(&format!("{STRUCTURE}.maxLineLength"), DEFAULT_MAX_LINE_LENGTH)
    }

    #[must_use]
    pub fn max_file_length(&self) -> i32 {
        self.get_int(&format!("{STRUCTURE}.maxFileLength"), DEFAULT_MAX_FILE_LENGTH)
    }

    // Formatting

    #[must_use]
    pub fn formatting_indent_size(&self) -> i32 {
        self.get_int("formatting.indentation.size", DEFAULT_INDENT_SIZE)
    }

    // Selection

    #[must_use]
    pub fn include_patterns(&self) -> Vec<String> {
        self.get_string_list("includes", DEFAULT_INCLUDES)
    }

    #[must_use]
    pub fn exclude_patterns(&self) -> Vec<String> {
        self.get_string_list("excludes", DEFAULT_EXCLUDES)
    }

    /// Pretty JSON rendering of the resolved tree.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn export(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Short human-readable overview of the settings that drive a run.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let source = self
            .source
            .as_ref()
            .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
        let _ = writeln!(out, "Configuration: {source}");
        let _ = writeln!(out, "Base directory: {}", self.base_dir.display());
        let _ = writeln!(
            out,
            "Parser: primary={} fallback={} encoding={} maxFileSize={}",
            self.primary_parser(),
            self.fallback_parser(),
            self.encoding(),
            self.max_file_size()
        );
        let _ = writeln!(
            out,
            "Performance: parallel={} maxThreads={}",
            self.parallel_processing(),
            self.max_threads()
        );
        let _ = writeln!(out, "Linting enabled: {}", self.linting_enabled());
        let _ = writeln!(out, "Includes: {}", self.include_patterns().join(", "));
        let _ = writeln!(out, "Excludes: {}", self.exclude_patterns().join(", "));
        let disabled = self.disabled_rules();
        if !disabled.is_empty() {
            let _ = writeln!(out, "Disabled rules: {}", disabled.join(", "));
        }
        out
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
