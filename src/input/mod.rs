//! Input handling module
//!
//! Provides the signal source gameplay states subscribe to.

mod processor;

pub use processor::{InputEvent, InputProcessor, InputSignal, Subscription};
