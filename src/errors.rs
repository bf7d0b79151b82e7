// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! These are the crate's *own* operational failures (loading config,
//! installing the log subscriber). Failures of caller operations travel as
//! [`Failure`](crate::Failure) values instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReturnitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration already installed")]
    AlreadyInstalled,

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ReturnitError>;
