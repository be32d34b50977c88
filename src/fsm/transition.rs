//! Predicates and guarded transitions

use std::fmt;
use std::rc::Rc;

// ============================================================================
// Predicate
// ============================================================================

/// Zero-argument boolean check guarding a transition.
///
/// Predicates only read data owned elsewhere (a state's intent flag, the
/// controller's grounded flag). Cloning is cheap and clones share the same
/// closure, so one predicate may guard several transitions.
#[derive(Clone)]
pub struct Predicate(Rc<dyn Fn() -> bool>);

impl Predicate {
    /// Wrap a closure as a predicate.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self(Rc::new(check))
    }

    /// Predicate that is always satisfied.
    #[must_use]
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Predicate that is never satisfied.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|| false)
    }

    /// Predicate satisfied exactly when `self` is not.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::new(move || !self.evaluate())
    }

    /// Evaluate the predicate now.
    #[inline]
    pub fn evaluate(&self) -> bool {
        (self.0)()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({:p})", Rc::as_ptr(&self.0))
    }
}

// ============================================================================
// Transition
// ============================================================================

/// Edge of the transition graph: a destination and the predicate guarding it.
#[derive(Debug, Clone)]
pub struct Transition<Id> {
    to: Id,
    predicate: Predicate,
}

impl<Id: Copy> Transition<Id> {
    /// Create a transition to `to`, guarded by `predicate`.
    pub fn new(to: Id, predicate: Predicate) -> Self {
        Self { to, predicate }
    }

    /// Destination state.
    #[must_use]
    pub fn to(&self) -> Id {
        self.to
    }

    /// Guarding predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Whether the guard is currently satisfied.
    #[inline]
    pub fn fires(&self) -> bool {
        self.predicate.evaluate()
    }
}
