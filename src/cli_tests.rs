use clap::CommandFactory;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn lint_defaults() {
    let cli = parse(&["cfml-lint", "lint"]);
    let Commands::Lint(args) = cli.command else {
        panic!("expected lint");
    };
    assert_eq!(args.input.path, PathBuf::from("."));
    assert_eq!(args.input.format, "text");
    assert_eq!(args.lint.parser, ParserMode::Auto);
    assert!(args.lint.rules.is_none());
    assert!(!args.lint.ignore_violations);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn lint_options_parse_into_domain_types() {
    let cli = parse(&[
        "cfml-lint",
        "-vv",
        "lint",
        "src",
        "--parser",
        "lucee",
        "--rules",
        "-FILE_NAMING,+max_line_length",
        "--severity",
        "warn",
        "--include",
        "**/*.bxs",
        "--include",
        "**/*.bxm",
        "--max-threads",
        "2",
    ]);
    assert_eq!(cli.verbose, 2);
    let Commands::Lint(args) = cli.command else {
        panic!("expected lint");
    };
    assert_eq!(args.lint.parser, ParserMode::Explicit("lucee".to_string()));
    let rules = args.lint.rules.unwrap();
    assert_eq!(rules.disabled, vec!["FILE_NAMING"]);
    assert_eq!(rules.enabled, vec!["MAX_LINE_LENGTH"]);
    assert_eq!(args.lint.severity, Some(Severity::Warning));
    assert_eq!(args.input.include.len(), 2);
    assert_eq!(args.input.max_threads, Some(2));
}

#[test]
fn unknown_parser_is_rejected() {
    assert!(Cli::try_parse_from(["cfml-lint", "lint", "--parser", "antlr"]).is_err());
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&["cfml-lint", "format", "--dry-run", "--no-config", "--color", "never", "-q"]);
    assert!(cli.no_config);
    assert!(cli.quiet);
    assert!(matches!(ColorMode::from(cli.color), ColorMode::Never));
    let Commands::Format(args) = cli.command else {
        panic!("expected format");
    };
    assert!(args.dry_run);
}

#[test]
fn config_and_no_config_conflict() {
    assert!(Cli::try_parse_from(["cfml-lint", "--config", "a.json", "--no-config", "rules"]).is_err());
}

#[test]
fn config_subcommands() {
    let cli = parse(&["cfml-lint", "config", "show", "--json"]);
    let Commands::Config(args) = cli.command else {
        panic!("expected config");
    };
    assert!(matches!(args.action, ConfigAction::Show { json: true, .. }));

    let cli = parse(&["cfml-lint", "--rule-set", "strict", "config", "validate", "proj"]);
    assert_eq!(cli.rule_set.as_deref(), Some("strict"));
    let Commands::Config(args) = cli.command else {
        panic!("expected config");
    };
    assert!(matches!(args.action, ConfigAction::Validate { ref dir } if dir == &PathBuf::from("proj")));
}
