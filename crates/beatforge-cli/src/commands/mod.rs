//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod generate;
pub mod info;
pub mod play;

use std::path::Path;

use anyhow::{Context, Result};
use beatforge_core::Config;
use tracing::info;

/// Load the engine config, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}
