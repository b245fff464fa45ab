use super::*;
use crate::result::{LintingViolation, Severity};

fn sample() -> ToolboxResult {
    let mut result = ToolboxResult::new();
    result.add_violation(LintingViolation::new(
        "TRAILING_WHITESPACE",
        "Line has trailing whitespace",
        Severity::Warning,
        "a.cfm",
        2,
        7,
    ));
    result.stats_mut().increment_files_processed();
    result
}

#[test]
fn format_names_parse_case_insensitively() {
    assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("console".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!(" Sarif ".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
    assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    assert_eq!("Bitbucket".parse::<OutputFormat>().unwrap(), OutputFormat::Bitbucket);
}

#[test]
fn unknown_format_is_unsupported() {
    let err = "xml".parse::<OutputFormat>().unwrap_err();
    assert!(matches!(err, CfmlLintError::UnsupportedFormat(ref name) if name == "xml"));
    assert!(err.is_fatal());
    for name in ["junit", "html"] {
        assert!(name.parse::<OutputFormat>().is_err(), "{name}");
    }
}

#[test]
fn every_format_renders_the_same_result() {
    let result = sample();
    for format in [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Sarif,
        OutputFormat::Csv,
        OutputFormat::Bitbucket,
    ] {
        let rendered = create_formatter(format, ColorMode::Never, 0).format(&result).unwrap();
        assert!(rendered.contains("TRAILING_WHITESPACE"), "{format:?}: {rendered}");
    }
}

#[test]
fn explicit_color_modes() {
    assert!(ColorMode::Always.use_colors());
    assert!(!ColorMode::Never.use_colors());
}
