//! Core engine module
//!
//! Contains the headless game loop, frame timing, the per-run session and
//! the event queue

mod engine;
mod events;
mod session;
mod time;

pub use engine::{Engine, EngineConfig, EngineContext, Game, GameResult};
pub use events::{EventQueue, GameEvent};
pub use session::Session;
pub use time::Time;
