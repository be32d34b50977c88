//! Finite state machine engine
//!
//! A registry of states keyed by identity, an ordered transition graph with
//! "any" transitions that take priority, and per-frame / fixed-step dispatch.

mod flag;
mod machine;
mod state;
mod transition;

pub use flag::IntentFlag;
pub use machine::{FsmError, StateMachine, Step, Switch};
pub use state::State;
pub use transition::{Predicate, Transition};
