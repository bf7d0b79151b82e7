// src/config/global.rs

//! Process-wide configuration read by `Failure` construction.

use std::sync::OnceLock;

use tracing::debug;

use crate::config::loader::from_env_lossy;
use crate::config::model::Config;
use crate::errors::{Result, ReturnitError};

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Install the process-wide config.
///
/// Must happen before the first error is constructed; afterwards the config
/// is fixed and this returns [`ReturnitError::AlreadyInstalled`]. An invalid
/// config is rejected with [`ReturnitError::ConfigError`] and leaves nothing
/// installed.
pub fn install(config: Config) -> Result<()> {
    config.validate()?;
    CONFIG
        .set(config)
        .map_err(|_| ReturnitError::AlreadyInstalled)?;
    debug!(config = ?current(), "returnit config installed");
    Ok(())
}

/// The active config, initialised from the environment on first use when
/// nothing was installed. Invalid `RETURNIT_*` variables are skipped.
///
/// After this, [`install`] is rejected.
pub fn current() -> &'static Config {
    CONFIG.get_or_init(from_env_lossy)
}

/// The installed config, if any, without fixing it.
pub fn installed() -> Option<&'static Config> {
    CONFIG.get()
}
