//! Intent flags shared between input callbacks and transition predicates

use std::cell::Cell;
use std::rc::Rc;

use super::Predicate;

/// A boolean owned by a state, raised by input callbacks and read by
/// transition predicates on the next tick.
///
/// Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct IntentFlag(Rc<Cell<bool>>);

impl IntentFlag {
    /// Create a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag.
    #[inline]
    pub fn raise(&self) {
        self.0.set(true);
    }

    /// Lower the flag.
    #[inline]
    pub fn clear(&self) {
        self.0.set(false);
    }

    /// Whether the flag is currently raised.
    #[must_use]
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.get()
    }

    /// Predicate satisfied while this flag is raised.
    #[must_use]
    pub fn predicate(&self) -> Predicate {
        let flag = self.clone();
        Predicate::new(move || flag.is_raised())
    }
}
