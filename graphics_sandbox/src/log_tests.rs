//! Unit tests for log.rs
//!
//! Tests LogSeverity, DefaultLogger formatting, the global logger and the
//! minimum-severity filter.

use crate::log::{
    CaptureLogger, DefaultLogger, LogEntry, LogSeverity,
    emit, min_severity, reset_logger, set_min_severity,
};
use serial_test::serial;
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "sandbox::Flattener".to_string(),
        message: "Flattened 2 submeshes".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_from_u8() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(LogSeverity::from_u8(severity as u8), severity);
    }
    assert_eq!(LogSeverity::from_u8(200), LogSeverity::Error);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_format_entry_without_file_line() {
    colored::control::set_override(false);
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("[sandbox::Flattener]"));
    assert!(line.ends_with("Flattened 2 submeshes"));
}

#[test]
fn test_format_entry_with_file_line() {
    colored::control::set_override(false);
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Error, Some("flattener.rs"), Some(42)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(flattener.rs:42)"));
}

// ============================================================================
// GLOBAL LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_routes_entries() {
    let capture = CaptureLogger::install();

    crate::engine_info!("sandbox::LogTest", "hello {}", 1);
    crate::engine_warn!("sandbox::LogTest", "careful");

    let infos = capture.from_source(LogSeverity::Info, "sandbox::LogTest");
    let warns = capture.from_source(LogSeverity::Warn, "sandbox::LogTest");
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].message, "hello 1");
    assert!(infos[0].file.is_none());
    assert_eq!(warns.len(), 1);

    reset_logger();
}

#[test]
#[serial]
fn test_error_macro_carries_file_line() {
    let capture = CaptureLogger::install();

    crate::engine_error!("sandbox::LogTest", "broken");

    let errors = capture.from_source(LogSeverity::Error, "sandbox::LogTest");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].file.unwrap().ends_with("log_tests.rs"));
    assert!(errors[0].line.is_some());

    reset_logger();
}

#[test]
#[serial]
fn test_min_severity_filters_entries() {
    let capture = CaptureLogger::install();
    assert_eq!(min_severity(), LogSeverity::Info);

    emit(LogSeverity::Debug, "sandbox::LogTest", "hidden".to_string());
    set_min_severity(LogSeverity::Trace);
    crate::engine_trace!("sandbox::LogTest", "visible");
    set_min_severity(LogSeverity::Info);

    let entries: Vec<_> = capture
        .entries()
        .into_iter()
        .filter(|e| e.source == "sandbox::LogTest")
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "visible");

    reset_logger();
}
