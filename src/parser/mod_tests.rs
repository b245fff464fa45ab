use std::path::Path;

use serde_json::json;

use super::*;

#[test]
fn parse_error_display_includes_location() {
    let err = ParseError::new("a.cfm", 3, 7, "Unmatched braces");
    assert_eq!(err.to_string(), "Unmatched braces at a.cfm:3:7");
}

#[test]
fn parse_error_clamps_zero_positions() {
    let err = ParseError::new("a.cfm", 0, 0, "x");
    assert_eq!((err.line, err.column), (1, 1));
}

#[test]
fn factory_knows_three_tags() {
    let factory = ParserFactory::new();
    assert_eq!(factory.create("boxlang").unwrap().parser_type(), "boxlang");
    assert_eq!(factory.create("LUCEE").unwrap().parser_type(), "lucee");
    assert_eq!(factory.create("regex").unwrap().parser_type(), "regex");
    assert!(factory.create("antlr").is_none());
}

#[test]
fn factory_from_config_without_command_has_no_engine() {
    let factory = ParserFactory::from_config(&Config::default());
    assert!(format!("{factory:?}").contains("None"));
}

#[test]
fn factory_from_config_reads_engine_command() {
    let config = Config::default().with_overlay(json!({
        "parser": { "lucee": { "command": ["lucee-check", "--stdin"] } }
    }));
    let factory = ParserFactory::from_config(&config);
    assert!(format!("{factory:?}").contains("lucee-check"));
}

#[test]
fn auto_mode_prefers_primary_for_components_and_tags() {
    let mode = ParserMode::Auto;
    assert_eq!(mode.select_tag("component {}", "boxlang", "regex"), "boxlang");
    assert_eq!(mode.select_tag("interface {}", "boxlang", "regex"), "boxlang");
    assert_eq!(mode.select_tag("<cfset x=1>", "boxlang", "regex"), "boxlang");
    assert_eq!(mode.select_tag("x = 1;", "boxlang", "regex"), "regex");
}

#[test]
fn auto_heuristic_is_case_sensitive() {
    assert!(!prefers_primary("COMPONENT {}"));
    assert!(!prefers_primary("<CFSET x=1>"));
}

#[test]
fn explicit_mode_ignores_content() {
    let mode: ParserMode = "Lucee".parse().unwrap();
    assert_eq!(mode, ParserMode::Explicit("lucee".to_string()));
    assert_eq!(mode.select_tag("component {}", "boxlang", "regex"), "lucee");
}

#[test]
fn parser_mode_parsing() {
    assert_eq!("auto".parse::<ParserMode>().unwrap(), ParserMode::Auto);
    assert!("antlr".parse::<ParserMode>().is_err());
}

#[test]
fn split_lines_drops_trailing_empties() {
    assert_eq!(split_lines("a\r\nb\n\n\n"), vec!["a", "b"]);
    assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    assert!(split_lines("").is_empty());
}

#[test]
fn line_index_positions() {
    let content = "ab\nçd\nx";
    let index = LineIndex::new(content);
    assert_eq!(index.position(0), (1, 1));
    assert_eq!(index.position(3), (2, 1));
    // 'd' follows a two-byte character
    assert_eq!(index.position(5), (2, 2));
    assert_eq!(index.position(content.len()), (3, 2));
    assert_eq!(index.line_count(), 3);
}

#[test]
fn with_issues_marks_failure_only_for_errors() {
    let result = ParseResult::new("a.cfm", "", true).with_issues(vec![ParseIssue::new(
        "meh",
        Severity::Warning,
        1,
        1,
    )]);
    assert!(result.success);
    assert!(result.errors.is_empty());

    let result = result.with_issues(vec![ParseIssue::new("bad", Severity::Error, 2, 3)]);
    assert!(!result.success);
    assert_eq!(result.errors, vec!["bad at line 2, column 3".to_string()]);
}

#[test]
fn path_helpers() {
    let result = ParseResult::new(Path::new("dir/UserService.CFC"), "", true);
    assert_eq!(result.file_name(), "UserService.CFC");
    assert_eq!(result.file_stem(), "UserService");
    assert_eq!(result.extension(), "cfc");
    assert!(result.is_component_file());
}

#[test]
fn permissive_always_succeeds() {
    let parser = PermissiveParser::new();
    let result = parser.parse("{{{ <% <cf", Path::new("x.cfm")).unwrap();
    assert!(result.success);
    assert!(result.issues.is_empty());
    assert!(parser.can_parse(""));
}

#[test]
fn syntax_tree_is_opaque() {
    let result = ParseResult::new("a.cfm", "", true).with_syntax_tree(Arc::new(42_u32));
    let tree = result.syntax_tree.as_ref().unwrap();
    assert_eq!(tree.downcast_ref::<u32>(), Some(&42));
}
