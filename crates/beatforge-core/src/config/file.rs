use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{playfield, timing};
use crate::error::{Error, Result};

/// Tunable engine settings. Every field has a default, so a config file
/// only needs the keys it wants to override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Margin kept free along every playfield edge
    pub edge_padding: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            edge_padding: playfield::EDGE_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub hit_window_ms: f64,
    pub miss_threshold_ms: f64,
    pub completion_delay_ms: f64,
    pub default_approach_ms: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hit_window_ms: timing::HIT_WINDOW_MS,
            miss_threshold_ms: timing::MISS_THRESHOLD_MS,
            completion_delay_ms: timing::COMPLETION_DELAY_MS,
            default_approach_ms: timing::DEFAULT_APPROACH_MS,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))?;

        let padding = config.generator.edge_padding;
        if !padding.is_finite() || padding < 0.0 || padding * 2.0 >= playfield::HEIGHT {
            return Err(Error::ConfigParseError(format!(
                "edge_padding {} leaves no room on the playfield",
                padding
            )));
        }
        config.session.validate()?;

        Ok(config)
    }
}

impl SessionConfig {
    /// Every window must be a finite, non-negative number of milliseconds
    fn validate(&self) -> Result<()> {
        let fields = [
            ("hit_window_ms", self.hit_window_ms),
            ("miss_threshold_ms", self.miss_threshold_ms),
            ("completion_delay_ms", self.completion_delay_ms),
            ("default_approach_ms", self.default_approach_ms),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::ConfigParseError(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
