//! Predicate-driven state machines for player characters
//!
//! This crate provides:
//! - A generic finite state machine with ordered, predicate-guarded transitions
//! - Input signals with scoped subscriptions
//! - Ground, climb and jump player states wired into a controller
//! - A headless fixed-step host loop and a minimal kinematic physics stand-in

pub mod config;
pub mod core;
pub mod fsm;
pub mod input;
pub mod physics;
pub mod player;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{ConfigError, GameConfig};
    pub use crate::core::{
        Engine, EngineConfig, EngineContext, EventQueue, Game, GameEvent, GameResult, Session,
        Time,
    };
    pub use crate::fsm::{FsmError, IntentFlag, Predicate, State, StateMachine, Step, Switch};
    pub use crate::input::{InputEvent, InputProcessor, InputSignal, Subscription};
    pub use crate::physics::{Aabb, Body, Physics, VelocitySink};
    pub use crate::player::{
        ControllerError, MotionIntent, PlayerConfig, PlayerController, PlayerStateId,
    };
    pub use glam::Vec2;
}
