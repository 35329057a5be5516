//! TOML config file source.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Add `path` to builder. A missing optional file is skipped.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !required && !path.exists() {
        debug!(config_path = %path.display(), "config file not found; using defaults");
        return Ok(builder);
    }

    Ok(builder.add_source(
        File::from(path)
            .format(FileFormat::Toml)
            .required(required),
    ))
}
