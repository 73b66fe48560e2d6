// src/config/mod.rs

//! Configuration loading and validation for runwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate the webhook settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{resolve_interval, ConfigFile, RawConfigFile, DEFAULT_EMOJI, DEFAULT_INTERVAL_SECS};
pub use validate::validate_config;
