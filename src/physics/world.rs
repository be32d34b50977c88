//! Kinematic physics for a single controllable body
//!
//! Integrates gravity, clamps against a flat ground plane, probes for ground
//! contact and reports overlaps with climbable volumes. Gameplay code never
//! writes here directly; it hands over velocity intents through
//! [`VelocitySink`].

use glam::Vec2;

/// Receiver of velocity intents.
///
/// Anything that owns a velocity (a rigid body, a network proxy, a test
/// double) can implement this.
pub trait VelocitySink {
    /// Override the horizontal velocity component.
    fn set_velocity_x(&mut self, x: f32);

    /// Override the vertical velocity component.
    fn set_velocity_y(&mut self, y: f32);

    /// Enable or disable gravity.
    fn set_gravity(&mut self, enabled: bool);
}

/// Axis-aligned box, used for climbable trigger volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from two corners in any order.
    #[must_use]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from its centre and half extents.
    #[must_use]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Check if two boxes overlap (touching edges count).
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// A dynamic body with a box shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Centre position
    pub position: Vec2,
    /// Linear velocity
    pub velocity: Vec2,
    /// Half size of the collision box
    pub half_extents: Vec2,
    /// Whether gravity applies
    pub use_gravity: bool,
}

impl Body {
    /// Create a resting body at `position` with a 1x2 box.
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents: Vec2::new(0.5, 1.0),
            use_gravity: true,
        }
    }

    /// Collision box at the current position.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }
}

impl VelocitySink for Body {
    fn set_velocity_x(&mut self, x: f32) {
        self.velocity.x = x;
    }

    fn set_velocity_y(&mut self, y: f32) {
        self.velocity.y = y;
    }

    fn set_gravity(&mut self, enabled: bool) {
        self.use_gravity = enabled;
    }
}

/// Physics world: gravity, a ground plane and climbable volumes.
#[derive(Debug, Clone)]
pub struct Physics {
    /// Gravity vector
    pub gravity: Vec2,
    /// Height of the ground plane
    pub ground_height: f32,
    /// Length of the downward ground probe, measured from the body centre
    pub ground_probe: f32,
    /// Climbable trigger volumes
    climbables: Vec<Aabb>,
}

impl Physics {
    /// Create a physics world with default gravity
    #[must_use]
    pub fn new() -> Self {
        Self::with_gravity(Vec2::new(0.0, -9.81))
    }

    /// Create a physics world with custom gravity
    #[must_use]
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity,
            ground_height: 0.0,
            ground_probe: 1.6,
            climbables: Vec::new(),
        }
    }

    /// Add a climbable volume.
    pub fn add_climbable(&mut self, volume: Aabb) {
        self.climbables.push(volume);
    }

    /// Number of climbable volumes.
    #[must_use]
    pub fn climbable_count(&self) -> usize {
        self.climbables.len()
    }

    /// Step the simulation for one body.
    pub fn step(&self, body: &mut Body, dt: f32) {
        if body.use_gravity {
            body.velocity += self.gravity * dt;
        }
        body.position += body.velocity * dt;

        // Resolve against the ground plane
        let floor = self.ground_height + body.half_extents.y;
        if body.position.y < floor {
            body.position.y = floor;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }

    /// Cast a ray straight down from the body centre and report whether it
    /// hits the ground within `ground_probe`.
    #[must_use]
    pub fn is_grounded(&self, body: &Body) -> bool {
        let distance = body.position.y - self.ground_height;
        (0.0..=self.ground_probe).contains(&distance)
    }

    /// Number of climbable volumes the body currently overlaps.
    #[must_use]
    pub fn overlapping_climbables(&self, body: &Body) -> u32 {
        let bounds = body.bounds();
        self.climbables
            .iter()
            .filter(|volume| volume.overlaps(&bounds))
            .count() as u32
    }
}

impl Default for Physics {
    fn default() -> Self {
        Self::new()
    }
}
