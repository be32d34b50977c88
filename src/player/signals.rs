//! Controller-owned values that player states read

use std::cell::Cell;

use glam::Vec2;

/// Shared player sensors.
///
/// Written by the controller (from input and physics), read by the states.
/// States only ever receive a shared reference and the setters are crate
/// private, so nothing outside the controller can change them.
#[derive(Debug, Default)]
pub struct PlayerSignals {
    input_direction: Cell<Vec2>,
    grounded: Cell<bool>,
    vine_count: Cell<u32>,
}

impl PlayerSignals {
    /// Last move direction reported by input.
    #[must_use]
    pub fn input_direction(&self) -> Vec2 {
        self.input_direction.get()
    }

    /// Whether the last physics step found ground below the player.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded.get()
    }

    /// Number of climbable volumes the player overlaps.
    #[must_use]
    pub fn vine_count(&self) -> u32 {
        self.vine_count.get()
    }

    pub(crate) fn set_input_direction(&self, direction: Vec2) {
        self.input_direction.set(direction);
    }

    pub(crate) fn set_grounded(&self, grounded: bool) {
        self.grounded.set(grounded);
    }

    pub(crate) fn enter_vine(&self) {
        self.vine_count.set(self.vine_count.get() + 1);
    }

    pub(crate) fn exit_vine(&self) {
        match self.vine_count.get().checked_sub(1) {
            Some(count) => self.vine_count.set(count),
            None => log::warn!("Vine exit without matching enter, count stays at 0"),
        }
    }
}
