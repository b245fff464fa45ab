use serde_json::json;

use super::*;
use crate::config::Config;
use crate::rules::check;

#[test]
fn trailing_spaces_report_line_length_column() {
    let found = check(&TrailingWhitespaceRule, "a.cfm", "ok\nfoo   \nbar\n", &Config::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rule_id, "TRAILING_WHITESPACE");
    assert_eq!((found[0].line, found[0].column), (2, 6));
    assert_eq!(found[0].severity, Severity::Warning);
    assert_eq!(found[0].message, "Line has trailing whitespace");
    assert_eq!(
        found[0].suggested_fix.as_deref(),
        Some("Remove the trailing whitespace")
    );
}

#[test]
fn crlf_endings_are_not_trailing_whitespace() {
    let found = check(&TrailingWhitespaceRule, "a.cfm", "one\r\ntwo\r\n", &Config::default());
    assert!(found.is_empty());
}

#[test]
fn trailing_tab_counts() {
    let found = check(&TrailingWhitespaceRule, "a.cfm", "x\t", &Config::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].column, 2);
}

#[test]
fn trailing_check_can_be_disabled() {
    let config = Config::default().with_overlay(json!({
        "linting": { "rules": { "whitespace": { "trimTrailingWhitespace": false } } }
    }));
    assert!(check(&TrailingWhitespaceRule, "a.cfm", "foo  \n", &config).is_empty());
}

#[test]
fn four_blank_lines_reported_on_following_line() {
    let found = check(
        &ExcessiveEmptyLinesRule,
        "a.cfm",
        "a\n\n\n\n\nb\n",
        &Config::default(),
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].line, 6);
    assert_eq!(found[0].column, 1);
    assert_eq!(found[0].message, "Too many consecutive empty lines (4, max 1)");
    assert_eq!(found[0].severity, Severity::Info);
}

#[test]
fn blank_runs_within_limit_pass() {
    let found = check(&ExcessiveEmptyLinesRule, "a.cfm", "a\n\nb\n  \nc\n", &Config::default());
    assert!(found.is_empty());
}

#[test]
fn trailing_blank_lines_are_not_reported() {
    let found = check(&ExcessiveEmptyLinesRule, "a.cfm", "a\n\n\n\n\n", &Config::default());
    assert!(found.is_empty());
}

#[test]
fn configured_limit_applies() {
    let config = Config::default().with_overlay(json!({
        "linting": { "rules": { "whitespace": { "maxEmptyLines": 3 } } }
    }));
    let found = check(&ExcessiveEmptyLinesRule, "a.cfm", "a\n\n\n\n\nb", &config);
    assert_eq!(found[0].message, "Too many consecutive empty lines (4, max 3)");
}
