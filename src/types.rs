use std::str::FromStr;
use serde::Deserialize;

/// How much call-site context a [`Failure`](crate::Failure) records when it is
/// constructed.
///
/// - `Location`: only the `file:line:column` of the code that built the error
///   (default, cheap).
/// - `Backtrace`: the location followed by a forced `std::backtrace` capture,
///   truncated to `max_stack_lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackCapture {
    Location,
    Backtrace,
}

impl Default for StackCapture {
    fn default() -> Self {
        StackCapture::Location
    }
}

impl FromStr for StackCapture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "location" => Ok(StackCapture::Location),
            "backtrace" | "full" => Ok(StackCapture::Backtrace),
            other => Err(format!(
                "invalid stack_capture: {other} (expected \"location\" or \"backtrace\")"
            )),
        }
    }
}

/// Log verbosity accepted by [`init_logging`](crate::logging::init_logging)
/// and the `[logging]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("invalid log level: {other}")),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
