//! Physics module
//!
//! Minimal kinematic simulation and the velocity sink seam gameplay writes to.

mod world;

pub use world::{Aabb, Body, Physics, VelocitySink};
