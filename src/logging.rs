// src/logging.rs

//! Logging setup for `returnit` using `tracing` + `tracing-subscriber`.
//!
//! The library itself only emits `tracing` events; applications that don't
//! install their own subscriber can call [`init_logging`].
//!
//! Priority for determining the log level:
//! 1. explicit `level` argument (if provided)
//! 2. `RETURNIT_LOG` environment variable (e.g. "info", "debug")
//! 3. `[logging].level` of the installed config (never fixes the config, so
//!    `config::install` may still follow)
//! 4. default to `info`
//!
//! Logs are sent to STDERR.

use tracing_subscriber::fmt;

use crate::config;
use crate::config::loader::LOG_LEVEL_ENV;
use crate::errors::{Result, ReturnitError};
use crate::types::LogLevel;

/// Initialise global logging subscriber.
///
/// Returns [`ReturnitError::Logging`] if a global subscriber is already set.
pub fn init_logging(level: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(level, std::env::var(LOG_LEVEL_ENV).ok().as_deref());

    fmt()
        .with_max_level(tracing::Level::from(level))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ReturnitError::Logging(e.to_string()))
}

fn resolve_level(explicit: Option<LogLevel>, env: Option<&str>) -> LogLevel {
    explicit
        .or_else(|| env.and_then(|s| s.parse().ok()))
        .or_else(|| config::installed().and_then(|cfg| cfg.log_level))
        .unwrap_or(LogLevel::Info)
}
