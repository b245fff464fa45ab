use super::*;

#[test]
fn quiet_overrides_verbose_count() {
    assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
    assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
    assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Verbose(2));
}

#[test]
fn directives_follow_flag_count() {
    assert_eq!(Verbosity::Quiet.directive(), "error");
    assert_eq!(Verbosity::Normal.directive(), "warn");
    assert_eq!(Verbosity::Verbose(1).directive(), "info");
    assert_eq!(Verbosity::Verbose(2).directive(), "debug");
    assert_eq!(Verbosity::Verbose(7).directive(), "trace");
}

#[test]
fn with_logging_returns_closure_value() {
    let value = with_logging(Verbosity::Quiet, || {
        tracing::info!("suppressed");
        42
    });
    assert_eq!(value, 42);
}

#[test]
fn only_quiet_is_quiet() {
    assert!(Verbosity::Quiet.is_quiet());
    assert!(!Verbosity::default().is_quiet());
}
