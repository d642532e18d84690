//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Log level outside the accepted set.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Log format outside the accepted set.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// No schema directory configured.
    #[error("Schema directory cannot be empty")]
    EmptySchemaDir,

    /// The pipeline has no transitions at all.
    #[error("Pipeline must declare at least one transition")]
    NoTransitions,

    /// A transition names a role outside the closed agent set.
    #[error("Unknown agent role in pipeline transitions: {0}")]
    UnknownAgentRole(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .stagegate/config.yaml (project config, created by init)
    /// 3. .stagegate/local.yaml (project local overrides, optional)
    /// 4. Environment variables (STAGEGATE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".stagegate/config.yaml"))
            .merge(Yaml::file(".stagegate/local.yaml"))
            .merge(Env::prefixed("STAGEGATE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("STAGEGATE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.schema_dir.is_empty() {
            return Err(ConfigError::EmptySchemaDir);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.pipeline.transitions.is_empty() {
            return Err(ConfigError::NoTransitions);
        }
        config
            .pipeline
            .to_graph()
            .map_err(ConfigError::UnknownAgentRole)?;

        Ok(())
    }
}
