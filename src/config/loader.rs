// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::config::model::{Config, RawConfig};
use crate::errors::{Result, ReturnitError};
use crate::types::{LogLevel, StackCapture};

pub const STACK_ENV: &str = "RETURNIT_STACK";
pub const MAX_STACK_LINES_ENV: &str = "RETURNIT_MAX_STACK_LINES";
pub const LOG_LEVEL_ENV: &str = "RETURNIT_LOG";

/// Load a configuration file from a given path and return the raw `RawConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let raw_config = load_from_path(&path)?;
    Config::try_from(raw_config)
}

/// Parse and validate an in-memory TOML document.
pub fn from_toml_str(contents: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(contents)?;
    Config::try_from(raw)
}

/// Build a config from `RETURNIT_*` environment variables on top of defaults.
///
/// Any invalid variable fails the whole load.
pub fn from_env() -> Result<Config> {
    from_vars(|key| std::env::var(key).ok())
}

/// Like [`from_env`], but an invalid variable is skipped with a warning and
/// the valid ones still apply.
pub fn from_env_lossy() -> Config {
    from_vars_lossy(|key| std::env::var(key).ok())
}

type Setter = fn(&mut RawConfig, &str) -> Result<()>;

const SETTERS: [(&str, Setter); 3] = [
    (STACK_ENV, set_stack_capture),
    (MAX_STACK_LINES_ENV, set_max_stack_lines),
    (LOG_LEVEL_ENV, set_log_level),
];

fn set_stack_capture(raw: &mut RawConfig, s: &str) -> Result<()> {
    raw.diagnostics.stack_capture = s
        .parse::<StackCapture>()
        .map_err(|e| ReturnitError::ConfigError(format!("{STACK_ENV}: {e}")))?;
    Ok(())
}

fn set_max_stack_lines(raw: &mut RawConfig, s: &str) -> Result<()> {
    raw.diagnostics.max_stack_lines = s.trim().parse().map_err(|_| {
        ReturnitError::ConfigError(format!(
            "{MAX_STACK_LINES_ENV}: expected a positive integer, got {s:?}"
        ))
    })?;
    Ok(())
}

fn set_log_level(raw: &mut RawConfig, s: &str) -> Result<()> {
    raw.logging.level = Some(
        s.parse::<LogLevel>()
            .map_err(|e| ReturnitError::ConfigError(format!("{LOG_LEVEL_ENV}: {e}")))?,
    );
    Ok(())
}

fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut raw = RawConfig::default();
    for (key, set) in SETTERS {
        if let Some(s) = lookup(key) {
            set(&mut raw, &s)?;
        }
    }
    Config::try_from(raw)
}

fn from_vars_lossy(lookup: impl Fn(&str) -> Option<String>) -> Config {
    let mut raw = RawConfig::default();
    for (key, set) in SETTERS {
        let Some(s) = lookup(key) else { continue };

        let mut candidate = raw.clone();
        let applied = set(&mut candidate, &s)
            .and_then(|()| Config::try_from(candidate.clone()).map(drop));
        match applied {
            Ok(()) => raw = candidate,
            Err(e) => warn!(var = key, error = %e, "ignoring invalid environment variable"),
        }
    }
    Config::new_unchecked(raw)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_env_gives_defaults() {
        assert_eq!(from_vars(vars(&[])).unwrap(), Config::default());
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = from_vars(vars(&[
            (STACK_ENV, "backtrace"),
            (MAX_STACK_LINES_ENV, "8"),
            (LOG_LEVEL_ENV, "debug"),
        ]))
        .unwrap();

        assert_eq!(cfg.stack_capture, StackCapture::Backtrace);
        assert_eq!(cfg.max_stack_lines, 8);
        assert_eq!(cfg.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn bad_env_value_is_config_error() {
        let err = from_vars(vars(&[(MAX_STACK_LINES_ENV, "lots")])).unwrap_err();
        assert!(matches!(err, ReturnitError::ConfigError(ref m) if m.contains("lots")));

        let err = from_vars(vars(&[(MAX_STACK_LINES_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ReturnitError::ConfigError(_)));
    }

    #[test]
    fn lossy_env_skips_only_the_invalid_variable() {
        let cfg = from_vars_lossy(vars(&[
            (STACK_ENV, "backtrace"),
            (MAX_STACK_LINES_ENV, "0"),
            (LOG_LEVEL_ENV, "chatty"),
        ]));

        assert_eq!(cfg.stack_capture, StackCapture::Backtrace);
        assert_eq!(cfg.max_stack_lines, 64);
        assert_eq!(cfg.log_level, None);
    }

    #[test]
    fn lossy_env_matches_strict_when_all_valid() {
        let pairs = [(STACK_ENV, "location"), (MAX_STACK_LINES_ENV, "12"), (LOG_LEVEL_ENV, "warn")];
        assert_eq!(from_vars_lossy(vars(&pairs)), from_vars(vars(&pairs)).unwrap());
    }

    #[test]
    fn toml_sections_are_optional() {
        let cfg = from_toml_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(cfg.log_level, Some(LogLevel::Warn));
        assert_eq!(cfg.stack_capture, StackCapture::Location);
    }

    #[test]
    fn unknown_stack_mode_is_toml_error() {
        let err = from_toml_str("[diagnostics]\nstack_capture = \"everything\"\n").unwrap_err();
        assert!(matches!(err, ReturnitError::TomlError(_)));
    }
}
