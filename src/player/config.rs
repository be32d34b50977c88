//! Player tuning values

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Per-player movement configuration. Immutable once the controller is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed on the ground and in the air
    pub move_speed: f32,
    /// Vertical speed per overlapping climbable volume
    pub climb_speed: f32,
    /// Upward speed applied when a jump starts
    pub jump_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            climb_speed: 3.0,
            jump_speed: 7.0,
        }
    }
}

impl PlayerConfig {
    /// Set move speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set climb speed
    pub fn with_climb_speed(mut self, speed: f32) -> Self {
        self.climb_speed = speed;
        self
    }

    /// Set jump speed
    pub fn with_jump_speed(mut self, speed: f32) -> Self {
        self.jump_speed = speed;
        self
    }

    /// Reject negative or non-finite speeds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("player.move_speed", self.move_speed),
            ("player.climb_speed", self.climb_speed),
            ("player.jump_speed", self.jump_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite, non-negative speed, got {value}"),
                });
            }
        }
        Ok(())
    }
}
