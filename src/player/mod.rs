//! Player character module
//!
//! Movement states, the controller that wires them into a state machine and
//! the sensor values they share.

mod config;
mod controller;
mod intent;
mod signals;
mod states;

pub use config::PlayerConfig;
pub use controller::{ControllerError, PlayerController};
pub use intent::MotionIntent;
pub use signals::PlayerSignals;
pub use states::{Climb, GroundMove, Jump, PlayerState, PlayerStateId, StateContext};
