// src/config/mod.rs

//! Configuration loading and validation for returnit.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config from disk, a string, or the environment (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).
//! - Hold the process-wide config that error construction reads (`global.rs`).

pub mod global;
pub mod loader;
pub mod model;
pub mod validate;

pub use global::{current, install, installed};
pub use loader::{from_env, from_env_lossy, from_toml_str, load_and_validate, load_from_path};
pub use model::{Config, DiagnosticsSection, LoggingSection, RawConfig};
