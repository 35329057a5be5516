//! Configuration System
//!
//! Broadcaster and logging settings, layered from built-in defaults, an optional
//! TOML file, and `OPCAST__`-prefixed environment variables (highest precedence).

use crate::broadcast::FailurePolicy;
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge_policy;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// How the broadcaster reacts to a failing listener
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl BroadcastConfig {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`BroadcastConfig`] through the `config` crate.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then `path` if given and present, then environment.
    pub fn load(path: Option<&Path>) -> Result<BroadcastConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = path {
            builder = sources::file::add_to_builder(builder, path, false)?;
        }
        builder = sources::env::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Defaults, then `path` (which must exist), then environment.
    pub fn load_from_file(path: &Path) -> Result<BroadcastConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::file::add_to_builder(builder, path, true)?;
        Self::finish(sources::env::add_to_builder(builder))
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<BroadcastConfig, ConfigError> {
        let config: BroadcastConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfigError::Invalid(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
