use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use super::*;

struct Fixture {
    _dir: TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        Self { _dir: dir, root }
    }

    fn write(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

fn run(config: &Config, mode: &ParserMode, file: &Path, snippets: bool) -> ToolboxResult {
    let reader = EncodingReader::new(config.encoding());
    let factory = ParserFactory::new();
    let rules = RuleEngine::default();
    LintUnit {
        config,
        reader: &reader,
        factory: &factory,
        mode,
        rules: &rules,
        snippets,
    }
    .process(file)
}

#[test]
fn component_file_is_parsed_and_analyzed() {
    let fx = Fixture::new();
    let file = fx.write("userService.cfc", b"component {\n}\n");
    let result = run(&Config::default(), &ParserMode::Auto, &file, false);

    assert!(result.errors().is_empty());
    assert!(result
        .violations()
        .iter()
        .any(|v| v.rule_id == "COMPONENT_NAMING" && v.message.contains("userService")));
    assert_eq!(result.stats().files_processed, 1);
    assert_eq!(result.stats().parser_usage.get("boxlang"), Some(&1));
    assert!(result.violations().iter().all(|v| v.code_snippet.is_none()));
}

#[test]
fn plain_template_routes_to_fallback() {
    let fx = Fixture::new();
    let file = fx.write("page.cfm", b"<p>Hello</p>\n");
    let result = run(&Config::default(), &ParserMode::Auto, &file, false);
    assert_eq!(result.stats().parser_usage.get("regex"), Some(&1));
}

#[test]
fn oversized_file_is_skipped_with_one_warning() {
    let fx = Fixture::new();
    let file = fx.write("big.cfm", &[b'a'; 64]);
    let config = Config::default().with_overlay(json!({ "parser": { "maxFileSize": 16 } }));
    let result = run(&config, &ParserMode::Auto, &file, false);

    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].contains(&file.display().to_string()));
    assert!(result.warnings()[0].starts_with("Skipped large file: "));
    assert_eq!(result.stats().files_processed, 0);
}

#[test]
fn unreadable_file_is_an_error_entry() {
    let fx = Fixture::new();
    let missing = fx.root.join("gone.cfm");
    let result = run(&Config::default(), &ParserMode::Auto, &missing, false);
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].starts_with(&format!("Failed to read {}: ", missing.display())));
}

#[test]
fn unknown_parser_tag_is_reported() {
    let fx = Fixture::new();
    let file = fx.write("page.cfm", b"x");
    let mode = ParserMode::Explicit("cobol".to_string());
    let result = run(&Config::default(), &mode, &file, false);
    assert_eq!(
        result.errors(),
        [format!("No parser available for: {}", file.display())]
    );
}

#[test]
fn parse_failure_is_reported_and_file_not_counted() {
    let fx = Fixture::new();
    let file = fx.write("Bin.cfc", b"component {\0}");
    let mode = ParserMode::Explicit("boxlang".to_string());
    let result = run(&Config::default(), &mode, &file, false);
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].starts_with(&format!("Parse error in {}: ", file.display())));
    assert_eq!(result.stats().files_processed, 0);
}

#[test]
fn disabled_linting_still_counts_file() {
    let fx = Fixture::new();
    let file = fx.write("bad_name.cfm", b"x = 1;   \n");
    let config = Config::default().with_overlay(json!({ "linting": { "enabled": false } }));
    let result = run(&config, &ParserMode::Auto, &file, false);
    assert!(result.violations().is_empty());
    assert_eq!(result.stats().files_processed, 1);
}

#[test]
fn single_file_mode_attaches_snippets() {
    let fx = Fixture::new();
    let file = fx.write("page.cfm", b"a = 1;\nb = 2;   \nc = 3;\n");
    let result = run(&Config::default(), &ParserMode::Auto, &file, true);
    let trailing = result
        .violations()
        .iter()
        .find(|v| v.rule_id == "TRAILING_WHITESPACE")
        .unwrap();
    assert_eq!(
        trailing.code_snippet.as_deref(),
        Some("     1: a = 1;\n➤    2: b = 2;   \n     3: c = 3;\n")
    );
}

#[test]
fn snippet_window_is_clamped_to_file() {
    let lines: Vec<String> = (1..=10).map(|n| format!("line {n}")).collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();

    let middle = code_snippet(&lines, 5).unwrap();
    assert_eq!(middle.lines().count(), 7);
    assert!(middle.starts_with("     2: line 2\n"));
    assert!(middle.contains("➤    5: line 5\n"));

    let first = code_snippet(&lines, 1).unwrap();
    assert_eq!(first.lines().count(), 4);
    assert!(first.starts_with("➤    1: line 1\n"));

    assert!(code_snippet(&lines, 11).is_none());
    assert!(code_snippet(&[], 1).is_none());
}

#[test]
fn zero_size_limit_disables_check() {
    let fx = Fixture::new();
    let file = fx.write("a.cfm", b"abc");
    assert!(!exceeds_size_limit(&file, 0));
    assert!(exceeds_size_limit(&file, 2));
    assert!(!exceeds_size_limit(&file, 3));
}
