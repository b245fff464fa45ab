use serde_json::json;

use super::*;
use crate::config::Config;
use crate::rules::check;

fn messages(found: &[LintingViolation]) -> Vec<&str> {
    found.iter().map(|v| v.message.as_str()).collect()
}

fn structure(settings: serde_json::Value) -> Config {
    Config::default().with_overlay(json!({ "linting": { "rules": { "codeStructure": settings } } }))
}

#[test]
fn braceless_if_is_flagged_at_keyword() {
    let content = "function f(x) {\n    if (x) return 1;\n    return 0;\n}\n";
    let found = check(&RequireCurlyBracesRule::new(), "a.cfc", content, &Config::default());
    assert_eq!(messages(&found), vec!["If statement should use curly braces"]);
    assert_eq!((found[0].line, found[0].column), (2, 5));
    assert_eq!(found[0].severity, Severity::Warning);
}

#[test]
fn braced_blocks_and_else_if_pass() {
    let content = concat!(
        "if (a) {\n    x = 1;\n} else if (b) {\n    x = 2;\n} else {\n    x = 3;\n}\n",
        "try {\n    run();\n} catch (any e) {\n    log(e);\n}\n",
        "do {\n    x++;\n} while (x < 3);\n",
    );
    assert!(check(&RequireCurlyBracesRule::new(), "a.cfm", content, &Config::default()).is_empty());
}

#[test]
fn for_loop_with_semicolons_in_header() {
    let content = "for (i = 1; i <= 3; i++) total += i;\n";
    let found = check(&RequireCurlyBracesRule::new(), "a.cfm", content, &Config::default());
    assert_eq!(messages(&found), vec!["For loop should use curly braces"]);
}

#[test]
fn statement_on_next_line_is_flagged() {
    let content = "while (running)\n    tick();\nelse\n    stop();\n";
    let found = check(&RequireCurlyBracesRule::new(), "a.cfm", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec![
            "While loop should use curly braces",
            "Else statement should use curly braces"
        ]
    );
}

#[test]
fn keywords_in_strings_and_tags_are_ignored() {
    let content = "<cfif x>\n<cfset msg = \"if (x) y;\">\n</cfif>\n";
    assert!(check(&RequireCurlyBracesRule::new(), "a.cfm", content, &Config::default()).is_empty());
}

#[test]
fn curly_brace_check_can_be_disabled() {
    let config = structure(json!({ "requireCurlyBraces": false }));
    assert!(check(&RequireCurlyBracesRule::new(), "a.cfm", "if (x) y();\n", &config).is_empty());
}

#[test]
fn long_function_counts_code_lines_only() {
    let content = concat!(
        "component {\n",
        "    function build() {\n",
        "        // setup\n",
        "        a = 1;\n",
        "\n",
        "        b = 2;\n",
        "        /* note */\n",
        "        c = 3;\n",
        "        return a + b + c;\n",
        "    }\n",
        "}\n",
    );
    let config = structure(json!({ "maxFunctionLength": 3 }));
    let found = check(&MaxFunctionLengthRule, "Builder.cfc", content, &config);
    assert_eq!(
        messages(&found),
        vec!["Function 'build' is too long (4 lines, max 3)"]
    );
    assert_eq!((found[0].line, found[0].column), (2, 1));

    let relaxed = structure(json!({ "maxFunctionLength": 4 }));
    assert!(check(&MaxFunctionLengthRule, "Builder.cfc", content, &relaxed).is_empty());
}

#[test]
fn non_positive_function_limit_disables_rule() {
    let config = structure(json!({ "maxFunctionLength": 0 }));
    let content = "function f() {\n a = 1;\n b = 2;\n}\n";
    assert!(check(&MaxFunctionLengthRule, "a.cfc", content, &config).is_empty());
}

#[test]
fn display_width_expands_tabs_to_stops() {
    assert_eq!(display_width("\tx", 4), 5);
    assert_eq!(display_width("ab\tx", 4), 5);
    assert_eq!(display_width("abcd", 0), 4);
}

#[test]
fn long_line_reports_width_as_column() {
    let config = structure(json!({ "maxLineLength": 10 }));
    let content = "short\n\tx = 12345;\n";
    let found = check(&MaxLineLengthRule, "a.cfm", content, &config);
    assert_eq!(messages(&found), vec!["Line is too long (14 characters, max 10)"]);
    assert_eq!((found[0].line, found[0].column), (2, 14));
}

#[test]
fn file_length_ignores_comments_and_blanks() {
    let config = structure(json!({ "maxFileLength": 2 }));
    let content = "/**\n * doc\n */\na = 1;\n\n// note\nb = 2;\n";
    assert!(check(&MaxFileLengthRule, "a.cfm", content, &config).is_empty());

    let longer = format!("{content}c = 3;\n");
    let found = check(&MaxFileLengthRule, "a.cfm", &longer, &config);
    assert_eq!(messages(&found), vec!["File is too long (3 lines, max 2)"]);
    assert_eq!((found[0].line, found[0].column), (1, 1));
}

#[test]
fn brace_on_next_line_is_info() {
    let content = "function run()\n{\n    if (x)\n    {\n        y();\n    }\n}\n";
    let found = check(&CurlyBraceStyleRule::new(), "a.cfm", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec![
            "function statement should have opening brace on same line",
            "if statement should have opening brace on same line",
        ]
    );
    assert_eq!(found[0].severity, Severity::Info);
    assert_eq!(found[1].line, 3);
}

#[test]
fn brace_style_other_than_same_line_is_not_checked() {
    let config = structure(json!({ "curlyBraceStyle": "new-line" }));
    let content = "function run()\n{\n}\n";
    assert!(check(&CurlyBraceStyleRule::new(), "a.cfm", content, &config).is_empty());
}
