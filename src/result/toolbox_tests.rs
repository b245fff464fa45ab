use super::*;

fn violation(rule: &str, severity: Severity, line: usize) -> LintingViolation {
    LintingViolation::new(rule, "message", severity, "file.cfm", line, 1)
}

#[test]
fn empty_result_has_no_errors_or_violations() {
    let result = ToolboxResult::new();
    assert!(!result.has_errors());
    assert!(!result.has_violations());
    assert!(!result.is_failure(false));
}

#[test]
fn add_violation_updates_counters() {
    let mut result = ToolboxResult::new();
    result.add_violation(violation("A", Severity::Warning, 1));
    result.add_violation(violation("B", Severity::Info, 2));
    assert_eq!(result.stats().total_violations, 2);
    assert_eq!(result.stats().warning_count, 1);
    assert_eq!(result.stats().info_count, 1);
    assert!(result.has_violations());
    assert!(!result.has_errors());
}

#[test]
fn error_violation_counts_as_error() {
    let mut result = ToolboxResult::new();
    result.add_violation(violation("A", Severity::Error, 1));
    assert!(result.has_errors());
}

#[test]
fn bare_error_counts_as_error() {
    let mut result = ToolboxResult::new();
    result.add_error("Parse error in a.cfm: boom");
    assert!(result.has_errors());
    assert!(!result.has_violations());
    assert!(result.is_failure(true));
}

#[test]
fn ignore_violations_only_masks_non_errors() {
    let mut result = ToolboxResult::new();
    result.add_violation(violation("A", Severity::Warning, 1));
    assert!(result.is_failure(false));
    assert!(!result.is_failure(true));
}

#[test]
fn warnings_do_not_fail_the_run() {
    let mut result = ToolboxResult::new();
    result.add_warning("Skipped large file: big.cfm");
    assert!(!result.is_failure(false));
}

#[test]
fn merge_doubles_identical_results() {
    let mut base = ToolboxResult::new();
    base.add_violation(violation("A", Severity::Error, 3));
    base.add_violation(violation("B", Severity::Info, 4));
    base.add_error("e");
    base.add_warning("w");
    base.add_formatting_change(FormattingChange::new("f", "a", "b", "formatting", "d"));
    base.stats_mut().increment_files_processed();
    base.stats_mut().execution_time_ms = 25;

    let mut merged = base.clone();
    merged.merge_with(base.clone());

    assert_eq!(merged.violations().len(), 4);
    assert_eq!(merged.errors().len(), 2);
    assert_eq!(merged.warnings().len(), 2);
    assert_eq!(merged.formatting_changes().len(), 2);
    assert_eq!(merged.stats().total_violations, 4);
    assert_eq!(merged.stats().error_count, 2);
    assert_eq!(merged.stats().info_count, 2);
    assert_eq!(merged.stats().formatting_changes, 2);
    assert_eq!(merged.stats().files_processed, 2);
    assert_eq!(merged.stats().execution_time_ms, 50);
}

#[test]
fn merge_metadata_last_writer_wins() {
    let mut a = ToolboxResult::new();
    a.set_metadata("mode", "lint");
    a.set_metadata("keep", true);
    let mut b = ToolboxResult::new();
    b.set_metadata("mode", "format");
    a.merge_with(b);
    assert_eq!(a.metadata_value("mode"), Some(&Value::from("format")));
    assert_eq!(a.metadata_value("keep"), Some(&Value::from(true)));
}

#[test]
fn merge_is_associative_for_counters() {
    let make = |severity| {
        let mut r = ToolboxResult::new();
        r.add_violation(violation("X", severity, 1));
        r.stats_mut().increment_files_processed();
        r
    };
    let mut left = make(Severity::Error);
    let mut bc = make(Severity::Warning);
    bc.merge_with(make(Severity::Info));
    left.merge_with(bc);

    let mut right = make(Severity::Error);
    right.merge_with(make(Severity::Warning));
    right.merge_with(make(Severity::Info));

    assert_eq!(left.stats(), right.stats());
}

#[test]
fn retain_min_severity_rebuilds_counts() {
    let mut result = ToolboxResult::new();
    result.add_violation(violation("A", Severity::Info, 1));
    result.add_violation(violation("B", Severity::Warning, 2));
    result.add_violation(violation("C", Severity::Error, 3));
    result.retain_min_severity(Severity::Warning);
    assert_eq!(result.violations().len(), 2);
    assert_eq!(result.stats().total_violations, 2);
    assert_eq!(result.stats().info_count, 0);
    assert_eq!(result.stats().warning_count, 1);
    assert_eq!(result.stats().error_count, 1);
}
