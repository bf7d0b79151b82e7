// src/config/model.rs

use serde::Deserialize;

use crate::types::{LogLevel, StackCapture};

/// Configuration as read from TOML, before validation.
///
/// ```toml
/// [diagnostics]
/// stack_capture = "backtrace"
/// max_stack_lines = 32
///
/// [logging]
/// level = "debug"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub diagnostics: DiagnosticsSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[diagnostics]` section: how much context a `Failure` captures.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsSection {
    #[serde(default)]
    pub stack_capture: StackCapture,

    /// Upper bound on the number of lines kept from a captured backtrace.
    /// Ignored in `location` mode.
    #[serde(default = "default_max_stack_lines")]
    pub max_stack_lines: usize,
}

fn default_max_stack_lines() -> usize {
    64
}

impl Default for DiagnosticsSection {
    fn default() -> Self {
        Self {
            stack_capture: StackCapture::default(),
            max_stack_lines: default_max_stack_lines(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    pub level: Option<LogLevel>,
}

/// Validated configuration.
///
/// `TryFrom<RawConfig>` validates; a config built field by field can be
/// checked with [`Config::validate`], which [`install`](super::install) always
/// runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub stack_capture: StackCapture,
    pub max_stack_lines: usize,
    pub log_level: Option<LogLevel>,
}

impl Config {
    pub(crate) fn new_unchecked(raw: RawConfig) -> Self {
        Self {
            stack_capture: raw.diagnostics.stack_capture,
            max_stack_lines: raw.diagnostics.max_stack_lines,
            log_level: raw.logging.level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new_unchecked(RawConfig::default())
    }
}
