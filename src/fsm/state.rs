//! State lifecycle contract

use std::fmt;
use std::hash::Hash;

/// A state in the finite state machine.
///
/// States are created once, registered with a [`StateMachine`](super::StateMachine)
/// and reused for the lifetime of the machine. The lifecycle is:
///
/// 1. `start()` - Called once each time the state becomes active
/// 2. `update()` - Called each frame while active
/// 3. `fixed_update()` - Called each fixed physics step while active
/// 4. `exit()` - Called once when leaving this state
///
/// Hooks never touch the outside world directly. They write what they want
/// to happen into an [`Intent`](State::Intent) that the machine hands back
/// to the caller, which applies it to whatever engine it drives.
pub trait State: fmt::Debug {
    /// Stable key identifying this state in the registry.
    type Id: Copy + Eq + Hash + fmt::Debug;

    /// Output collected from lifecycle hooks.
    type Intent: Default;

    /// Registry key of this state.
    fn id(&self) -> Self::Id;

    /// State name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Called when entering this state.
    fn start(&mut self, _intent: &mut Self::Intent) {}

    /// Called each frame while in this state, after transitions are evaluated.
    fn update(&mut self, _intent: &mut Self::Intent) {}

    /// Called each fixed step while in this state.
    fn fixed_update(&mut self, _intent: &mut Self::Intent) {}

    /// Called when exiting this state.
    fn exit(&mut self, _intent: &mut Self::Intent) {}
}
