// tests/unit_config.rs
use std::fs;
use std::path::Path;

use stimtrace_core::config::{ClassifierConfig, Config, RollupConfig};
use stimtrace_core::error::StimtraceError;

#[test]
fn test_load_explicit_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("custom.toml");
    fs::write(
        &path,
        "[markup]\nerror_class = \"log-error\"\n[classifier]\nprevious_actions_limit = 5\n",
    )
    .unwrap();
    let c = Config::load(Some(&path)).unwrap();
    assert_eq!(c.markup.error_class, "log-error");
    assert_eq!(c.markup.failure_class, "text-fail");
    assert_eq!(c.classifier.previous_actions_limit, 5);
    assert_eq!(c.classifier.continuation_threshold, 200);
}

#[test]
fn test_defaults() {
    let c = ClassifierConfig::default();
    assert_eq!(c.continuation_threshold, 200);
    assert_eq!(c.previous_actions_limit, 3);
    assert_eq!(RollupConfig::default().excluded_test_case_pattern, r"^\d{2}_\d{2}$");
}

#[test]
fn test_missing_explicit_file_is_io() {
    let err = Config::load(Some(Path::new("/nonexistent/stimtrace.toml"))).unwrap_err();
    assert!(matches!(err, StimtraceError::Io { .. }));
}

#[test]
fn test_zero_threshold_rejected() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("stimtrace.toml");
    fs::write(&path, "[classifier]\ncontinuation_threshold = 0\n").unwrap();
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, StimtraceError::Config(_)));
}

#[test]
fn test_zero_previous_actions_limit_rejected() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("stimtrace.toml");
    fs::write(&path, "[classifier]\nprevious_actions_limit = 0\n").unwrap();
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, StimtraceError::Config(msg) if msg.contains("previous_actions_limit")));
}

#[test]
fn test_bad_pattern_rejected() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("stimtrace.toml");
    fs::write(&path, "[rollup]\nexcluded_test_case_pattern = \"[\"\n").unwrap();
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, StimtraceError::Regex(_)));
}
