//! Internal logging system for the graphics sandbox
//!
//! This module provides a small logging layer with:
//! - Customizable logger via the `Logger` trait
//! - Severity levels (Trace, Debug, Info, Warn, Error) and a minimum-severity filter
//! - Colored console output by default
//! - File and line information for ERROR logs

use std::sync::{OnceLock, RwLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::SystemTime;
use chrono::{DateTime, Local};
use colored::*;

/// Logger trait for custom logging implementations
///
/// Implement this trait to route sandbox logs elsewhere (file, test capture, ...).
///
/// # Example
///
/// ```no_run
/// use graphics_sandbox::sandbox::log::{Logger, LogEntry};
///
/// struct FileLogger;
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// graphics_sandbox::sandbox::log::set_logger(FileLogger);
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g., "sandbox::Flattener", "sandbox::FrameEmitter")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose information (per-frame traces)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (degraded but recoverable)
    Warn,

    /// Error messages (with file:line details)
    Error,
}

impl LogSeverity {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry the way it is printed (without colors when the
    /// terminal does not support them)
    pub fn format_entry(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            ),
            _ => format!(
                "[{}] [{}] [{}] {}",
                timestamp, severity_str, source, entry.message
            ),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let line = Self::format_entry(entry);
        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ===== GLOBAL LOGGER =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Replace the global logger
pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
    if let Ok(mut lock) = logger().write() {
        *lock = Box::new(logger_impl);
    }
}

/// Reset the global logger to `DefaultLogger`
pub fn reset_logger() {
    if let Ok(mut lock) = logger().write() {
        *lock = Box::new(DefaultLogger);
    }
}

/// Set the minimum severity that reaches the logger (default: Info)
pub fn set_min_severity(severity: LogSeverity) {
    MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
}

/// Current minimum severity
pub fn min_severity() -> LogSeverity {
    LogSeverity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
}

/// Internal logging entry point (used by engine_info!, engine_warn!, ...)
pub fn emit(severity: LogSeverity, source: &str, message: String) {
    dispatch(severity, source, message, None, None);
}

/// Internal logging entry point with file:line (used by engine_error!)
pub fn emit_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    dispatch(severity, source, message, Some(file), Some(line));
}

fn dispatch(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: Option<&'static str>,
    line: Option<u32>,
) {
    if severity < min_severity() {
        return;
    }
    if let Ok(lock) = logger().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file,
            line,
        });
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, filtered out by default)
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::emit(
            $crate::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::emit(
            $crate::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
///
/// # Example
///
/// ```ignore
/// engine_info!("sandbox::MeshLoader", "Loaded '{}' ({} submeshes)", name, count);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::emit(
            $crate::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::emit(
            $crate::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::emit_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

// ===== TEST CAPTURE =====

/// Logger that keeps entries in memory, for tests that assert on log output.
/// Tests installing it must be `#[serial]`.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CaptureLogger {
    entries: std::sync::Arc<std::sync::Mutex<Vec<LogEntry>>>,
}

#[cfg(test)]
impl CaptureLogger {
    /// Install a fresh capture logger globally and return a handle on it
    pub(crate) fn install() -> Self {
        let capture = Self::default();
        set_logger(capture.clone());
        capture
    }

    pub(crate) fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Entries of the given severity coming from `source`
    pub(crate) fn from_source(&self, severity: LogSeverity, source: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.severity == severity && e.source == source)
            .collect()
    }
}

#[cfg(test)]
impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
