use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = CfmlLintError::Config("maxThreads must be at least 1".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration error: maxThreads must be at least 1"
    );
}

#[test]
fn error_display_file_read() {
    let err = CfmlLintError::FileRead {
        path: PathBuf::from("Widget.cfc"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("Widget.cfc"));
    assert_eq!(err.detail().as_deref(), Some("file not found"));
}

#[test]
fn error_display_unsupported_format() {
    let err = CfmlLintError::UnsupportedFormat("yaml".to_string());
    assert_eq!(err.to_string(), "Unknown output format: yaml");
    assert_eq!(err.error_type(), "Format");
}

#[test]
fn error_display_rule() {
    let err = CfmlLintError::Rule {
        rule_id: "MAX_LINE_LENGTH".to_string(),
        message: "boom".to_string(),
    };
    assert_eq!(err.to_string(), "Rule MAX_LINE_LENGTH failed: boom");
}

#[test]
fn parse_error_is_transparent() {
    let err: CfmlLintError = ParseError::new("a.cfm", 3, 7, "Unmatched braces").into();
    assert_eq!(err.to_string(), "Unmatched braces at a.cfm:3:7");
    assert_eq!(err.error_type(), "Parse");
}

#[test]
fn fatal_classification() {
    assert!(CfmlLintError::Config("x".to_string()).is_fatal());
    assert!(CfmlLintError::UnsupportedFormat("x".to_string()).is_fatal());
    assert!(!CfmlLintError::Io(std::io::Error::other("x")).is_fatal());
    assert!(
        !CfmlLintError::Rule {
            rule_id: "X".to_string(),
            message: "y".to_string()
        }
        .is_fatal()
    );
}

#[test]
fn io_error_converts() {
    let err: CfmlLintError = std::io::Error::other("disk").into();
    assert_eq!(err.error_type(), "IO");
    assert!(err.detail().is_none());
}

#[test]
fn panic_message_reads_common_payloads() {
    let payload = std::panic::catch_unwind(|| panic!("static text")).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "static text");

    let payload = std::panic::catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "formatted 42");

    let payload = std::panic::catch_unwind(|| std::panic::panic_any(7_u8)).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "unknown panic");
}
