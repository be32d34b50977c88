//! Game configuration loaded from RON
//!
//! ```ron
//! (
//!     player: (move_speed: 5.0, climb_speed: 3.0, jump_speed: 7.0),
//!     engine: (title: "Climber", fixed_timestep: 0.02, max_fixed_steps: 5),
//! )
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::EngineConfig;
use crate::player::PlayerConfig;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid RON for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A value parsed but is out of range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player movement tuning
    pub player: PlayerConfig,
    /// Host loop settings
    pub engine: EngineConfig,
}

impl GameConfig {
    /// Parse and validate a RON document.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate()?;
        self.engine.validate()
    }
}
