//! Velocity intents produced by player states

use crate::physics::VelocitySink;

/// What the player states want done to the body this tick.
///
/// Each field is an override: `None` leaves that component to the physics
/// collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionIntent {
    /// Horizontal velocity override
    pub velocity_x: Option<f32>,
    /// Vertical velocity override
    pub velocity_y: Option<f32>,
    /// Gravity on/off
    pub gravity: Option<bool>,
}

impl MotionIntent {
    /// Fold `later` into `self`; fields set in `later` win.
    pub fn merge(&mut self, later: MotionIntent) {
        self.velocity_x = later.velocity_x.or(self.velocity_x);
        self.velocity_y = later.velocity_y.or(self.velocity_y);
        self.gravity = later.gravity.or(self.gravity);
    }

    /// Whether this intent changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the overrides into `sink`.
    pub fn apply(&self, sink: &mut impl VelocitySink) {
        if let Some(enabled) = self.gravity {
            sink.set_gravity(enabled);
        }
        if let Some(x) = self.velocity_x {
            sink.set_velocity_x(x);
        }
        if let Some(y) = self.velocity_y {
            sink.set_velocity_y(y);
        }
    }
}
