//! Configuration management for the thumbnailer
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//! 4. The plain `PORT` variable (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use thumbnailer::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `THUMBNAILER__<section>__<key>`
//!
//! Examples:
//! - `THUMBNAILER__SERVER__BIND_ADDR=127.0.0.1:9000`
//! - `THUMBNAILER__CONVERTER__PROGRAM=/usr/bin/convert`
//! - `THUMBNAILER__CONVERTER__TIMEOUT=10s`
//!
//! `PORT=3000` replaces only the port of `server.bind_addr`.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/thumbnailer.toml`.
//! This can be overridden using the `THUMBNAILER_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{Config, ConverterConfig, ServerConfig};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed, `PORT` is not
    /// a port number, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load from an explicit file, still applying environment overrides
    pub fn load_with_overrides(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_with_env(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
