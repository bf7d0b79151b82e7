// src/config/validate.rs

use crate::config::model::{Config, RawConfig};
use crate::errors::{Result, ReturnitError};

impl TryFrom<RawConfig> for Config {
    type Error = ReturnitError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(Config::new_unchecked(raw))
    }
}

impl Config {
    /// Re-check a config that may have been assembled field by field.
    pub fn validate(&self) -> Result<()> {
        validate_max_stack_lines(self.max_stack_lines)
    }
}

fn validate_raw_config(cfg: &RawConfig) -> Result<()> {
    // stack_capture and level are strongly typed and validated during
    // deserialization.
    validate_max_stack_lines(cfg.diagnostics.max_stack_lines)
}

fn validate_max_stack_lines(lines: usize) -> Result<()> {
    if lines == 0 {
        return Err(ReturnitError::ConfigError(
            "[diagnostics].max_stack_lines must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
