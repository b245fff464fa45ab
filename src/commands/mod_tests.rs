use std::fs;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::cli::{Commands, ConfigAction};
use crate::parser::ParserMode;
use crate::result::{LintingViolation, Severity};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

fn config_action(cli: &Cli) -> &ConfigAction {
    match &cli.command {
        Commands::Config(args) => &args.action,
        _ => panic!("expected config command"),
    }
}

#[test]
fn local_document_is_found_from_input_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cfml-lint.json"),
        r#"{ "performance": { "maxThreads": 7 } }"#,
    )
    .unwrap();
    let config = load_config(&cli(&["cfml-lint", "rules"]), dir.path()).unwrap();
    assert_eq!(config.max_threads(), 7);

    let file = dir.path().join("page.cfm");
    fs::write(&file, "x").unwrap();
    let config = load_config(&cli(&["cfml-lint", "rules"]), &file).unwrap();
    assert_eq!(config.max_threads(), 7);
}

#[test]
fn no_config_ignores_local_document() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cfml-lint.json"),
        r#"{ "performance": { "maxThreads": 7 } }"#,
    )
    .unwrap();
    let config = load_config(&cli(&["cfml-lint", "--no-config", "rules"]), dir.path()).unwrap();
    assert_eq!(config.max_threads(), 4);
}

#[test]
fn malformed_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cfml-lint.json"), "{ nope").unwrap();
    let err = load_config(&cli(&["cfml-lint", "rules"]), dir.path()).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn unknown_rule_set_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_config(&cli(&["cfml-lint", "--no-config", "--rule-set", "lax", "rules"]), dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("Unknown rule set"));
}

#[test]
fn run_options_carry_lint_flags() {
    let parsed = cli(&["cfml-lint", "-q", "lint", "--parser", "regex", "--rules", "-FILE_NAMING"]);
    let Commands::Lint(args) = &parsed.command else {
        panic!("expected lint");
    };
    let options = run_options(&parsed, &args.input, Some(&args.lint));
    assert_eq!(options.parser_mode, ParserMode::Explicit("regex".to_string()));
    assert_eq!(options.rules.disabled, vec!["FILE_NAMING"]);
    assert!(options.verbosity.is_quiet());

    let formatting = run_options(&parsed, &args.input, None);
    assert_eq!(formatting.parser_mode, ParserMode::Auto);
}

#[test]
fn exit_codes_follow_failure_rules() {
    let mut result = ToolboxResult::new();
    assert_eq!(exit_code(&result, false), EXIT_SUCCESS);

    result.add_violation(LintingViolation::new("X", "m", Severity::Warning, "a.cfm", 1, 1));
    assert_eq!(exit_code(&result, false), EXIT_VIOLATIONS);
    assert_eq!(exit_code(&result, true), EXIT_SUCCESS);

    result.add_error("Parse error in a.cfm: bad");
    assert_eq!(exit_code(&result, true), EXIT_VIOLATIONS);
}

#[test]
fn report_is_written_to_output_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("report.csv");
    emit(&cli(&["cfml-lint", "rules"]), OutputFormat::Csv, Some(&target), &ToolboxResult::new()).unwrap();
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "file,line,column,severity,rule,message\r\n"
    );
}

#[test]
fn rule_list_names_every_rule() {
    let listing = format_rule_list();
    assert_eq!(listing.lines().count(), 19);
    assert!(listing.starts_with("SYNTAX_ERROR"));
    assert!(listing.contains("CURLY_BRACE_STYLE"));
}

#[test]
fn config_show_and_validate() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_str().unwrap();

    let parsed = cli(&["cfml-lint", "--no-config", "config", "show", root]);
    let mut out = Vec::new();
    assert_eq!(run_config_impl(config_action(&parsed), &parsed, &mut out).unwrap(), EXIT_SUCCESS);
    assert!(String::from_utf8(out).unwrap().contains("Configuration: built-in defaults"));

    let parsed = cli(&["cfml-lint", "--no-config", "config", "show", "--json", root]);
    let mut out = Vec::new();
    run_config_impl(config_action(&parsed), &parsed, &mut out).unwrap();
    let exported: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(exported["parser"]["primary"], "boxlang");

    let parsed = cli(&["cfml-lint", "--no-config", "config", "validate", root]);
    let mut out = Vec::new();
    assert_eq!(run_config_impl(config_action(&parsed), &parsed, &mut out).unwrap(), EXIT_SUCCESS);
}

#[test]
fn invalid_settings_fail_validation() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cfml-lint.json"),
        r#"{ "parser": { "primary": "antlr" }, "performance": { "maxThreads": 0 } }"#,
    )
    .unwrap();
    let parsed = cli(&["cfml-lint", "config", "validate", dir.path().to_str().unwrap()]);
    let mut out = Vec::new();
    assert_eq!(
        run_config_impl(config_action(&parsed), &parsed, &mut out).unwrap(),
        EXIT_CONFIG_ERROR
    );
    assert!(String::from_utf8(out).unwrap().contains("problem(s)"));
}

#[test]
fn run_settings_are_validated_before_use() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cfml-lint.json"),
        r#"{ "parser": { "primary": "antlr" }, "performance": { "maxThreads": 0 } }"#,
    )
    .unwrap();
    let err = load_valid_config(&cli(&["cfml-lint", "rules"]), dir.path()).unwrap_err();
    assert!(err.is_fatal());
    let message = err.to_string();
    assert!(message.contains("parser.primary"), "{message}");
    assert!(message.contains("performance.maxThreads"), "{message}");

    assert!(load_valid_config(&cli(&["cfml-lint", "--no-config", "rules"]), dir.path()).is_ok());
}
