//! State registry, transition graph and tick dispatch

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use super::{Predicate, State, Transition};

// ============================================================================
// Errors
// ============================================================================

/// Errors raised by [`StateMachine`] operations.
///
/// All of them are setup mistakes rather than runtime faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsmError {
    /// An operation referenced a state identity that was never registered.
    #[error("state {0} is not registered")]
    UnknownState(String),

    /// The machine was ticked before an initial state was set.
    #[error("no initial state; call set_initial_state before ticking")]
    NotStarted,

    /// `set_initial_state` was called on a machine that is already running.
    #[error("initial state already set (current state is {0})")]
    AlreadyStarted(String),
}

impl FsmError {
    fn unknown(id: impl fmt::Debug) -> Self {
        Self::UnknownState(format!("{id:?}"))
    }
}

// ============================================================================
// Step results
// ============================================================================

/// A completed state switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch<Id> {
    /// State that was exited
    pub from: Id,
    /// State that was started
    pub to: Id,
}

/// Outcome of a per-frame tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<Id, I> {
    /// The switch performed this tick, if any
    pub switched: Option<Switch<Id>>,
    /// Intent written by the hooks that ran this tick, in call order
    pub intent: I,
}

// ============================================================================
// State Node
// ============================================================================

/// One registered state and its outgoing edges.
struct StateNode<S: State> {
    state: S,
    transitions: SmallVec<[Transition<S::Id>; 4]>,
}

impl<S: State> StateNode<S> {
    fn new(state: S) -> Self {
        Self {
            state,
            transitions: SmallVec::new(),
        }
    }
}

// ============================================================================
// State Machine
// ============================================================================

/// A predicate-driven finite state machine.
///
/// Owns every state, the per-state transition edges and a set of "any"
/// transitions checked from every state. Edges are evaluated in registration
/// order and the first satisfied one wins; any-transitions are always checked
/// before the current state's own edges. At most one switch happens per tick.
///
/// # Example
///
/// ```ignore
/// let mut fsm = StateMachine::new();
/// let idle = fsm.add_state(Idle::default());
/// let run = fsm.add_state(Run::default());
/// fsm.add_transition(idle, run, moving.predicate())?;
/// fsm.set_initial_state(idle)?;
///
/// // Each frame:
/// let step = fsm.tick()?;
/// // Each physics step:
/// let intent = fsm.fixed_tick()?;
/// ```
pub struct StateMachine<S: State> {
    nodes: FxHashMap<S::Id, StateNode<S>>,
    any_transitions: Vec<Transition<S::Id>>,
    current: Option<S::Id>,
}

impl<S: State> StateMachine<S> {
    /// Create an empty state machine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            any_transitions: Vec::new(),
            current: None,
        }
    }

    /// Register a state and return its identity.
    ///
    /// The first instance registered for an identity is the one the machine
    /// keeps; later instances with the same identity are dropped.
    pub fn add_state(&mut self, state: S) -> S::Id {
        let id = state.id();
        if self.nodes.contains_key(&id) {
            log::debug!("State {:?} already registered, keeping original", id);
        } else {
            self.nodes.insert(id, StateNode::new(state));
        }
        id
    }

    /// Add an edge `from -> to` guarded by `predicate`.
    ///
    /// Both states must already be registered. Registering the same pair
    /// twice adds a second edge; edges out of a state are checked in the
    /// order they were added.
    pub fn add_transition(
        &mut self,
        from: S::Id,
        to: S::Id,
        predicate: Predicate,
    ) -> Result<(), FsmError> {
        self.node(to)?;
        let node = self
            .nodes
            .get_mut(&from)
            .ok_or_else(|| FsmError::unknown(from))?;
        node.transitions.push(Transition::new(to, predicate));
        Ok(())
    }

    /// Add an edge to `to` that is checked from every state.
    pub fn add_any_transition(&mut self, to: S::Id, predicate: Predicate) -> Result<(), FsmError> {
        self.node(to)?;
        self.any_transitions.push(Transition::new(to, predicate));
        Ok(())
    }

    /// Start the machine in `id`.
    ///
    /// Runs only the initial state's `start`; there is nothing to exit yet.
    /// Fails if the machine already has a current state.
    pub fn set_initial_state(&mut self, id: S::Id) -> Result<S::Intent, FsmError> {
        if let Some(current) = self.current {
            return Err(FsmError::AlreadyStarted(format!("{current:?}")));
        }

        let node = self.nodes.get_mut(&id).ok_or_else(|| FsmError::unknown(id))?;
        let mut intent = S::Intent::default();
        node.state.start(&mut intent);
        self.current = Some(id);

        log::debug!("State machine started in {}", node.state.name());
        Ok(intent)
    }

    /// Switch to `id` immediately, outside of predicate evaluation.
    ///
    /// Switching to the current state does nothing.
    pub fn change_state(&mut self, id: S::Id) -> Result<Step<S::Id, S::Intent>, FsmError> {
        let mut intent = S::Intent::default();
        let switched = self.switch_to(id, &mut intent)?;
        Ok(Step { switched, intent })
    }

    /// Per-frame tick.
    ///
    /// Evaluates any-transitions, then the current state's edges, switches on
    /// the first satisfied predicate and finally updates the (possibly new)
    /// current state.
    pub fn tick(&mut self) -> Result<Step<S::Id, S::Intent>, FsmError> {
        let current = self.current.ok_or(FsmError::NotStarted)?;
        let mut intent = S::Intent::default();

        let switched = match self.find_transition(current)? {
            Some(to) => self.switch_to(to, &mut intent)?,
            None => None,
        };

        let active = switched.map_or(current, |s| s.to);
        self.node_mut(active)?.state.update(&mut intent);

        Ok(Step { switched, intent })
    }

    /// Fixed-step tick.
    ///
    /// Forwards to the current state only; transitions are not evaluated.
    pub fn fixed_tick(&mut self) -> Result<S::Intent, FsmError> {
        let current = self.current.ok_or(FsmError::NotStarted)?;
        let mut intent = S::Intent::default();
        self.node_mut(current)?.state.fixed_update(&mut intent);
        Ok(intent)
    }

    /// Identity of the current state, if started.
    #[must_use]
    pub fn current_state(&self) -> Option<S::Id> {
        self.current
    }

    /// Name of the current state, if started.
    #[must_use]
    pub fn current_state_name(&self) -> Option<&'static str> {
        self.current
            .and_then(|id| self.nodes.get(&id))
            .map(|node| node.state.name())
    }

    /// Check if the machine is currently in `id`.
    #[must_use]
    pub fn is_in_state(&self, id: S::Id) -> bool {
        self.current == Some(id)
    }

    /// Borrow a registered state.
    #[must_use]
    pub fn state(&self, id: S::Id) -> Option<&S> {
        self.nodes.get(&id).map(|node| &node.state)
    }

    /// Borrow a registered state mutably.
    pub fn state_mut(&mut self, id: S::Id) -> Option<&mut S> {
        self.nodes.get_mut(&id).map(|node| &mut node.state)
    }

    /// Check if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: S::Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of registered states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no states are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges leaving `from`, or `None` if it is not registered.
    #[must_use]
    pub fn transition_count(&self, from: S::Id) -> Option<usize> {
        self.nodes.get(&from).map(|node| node.transitions.len())
    }

    /// Number of any-transitions.
    #[must_use]
    pub fn any_transition_count(&self) -> usize {
        self.any_transitions.len()
    }

    fn node(&self, id: S::Id) -> Result<&StateNode<S>, FsmError> {
        self.nodes.get(&id).ok_or_else(|| FsmError::unknown(id))
    }

    fn node_mut(&mut self, id: S::Id) -> Result<&mut StateNode<S>, FsmError> {
        self.nodes.get_mut(&id).ok_or_else(|| FsmError::unknown(id))
    }

    /// First satisfied edge: any-transitions first, then the current node's.
    fn find_transition(&self, current: S::Id) -> Result<Option<S::Id>, FsmError> {
        if let Some(transition) = self.any_transitions.iter().find(|t| t.fires()) {
            return Ok(Some(transition.to()));
        }

        let node = self.node(current)?;
        Ok(node
            .transitions
            .iter()
            .find(|t| t.fires())
            .map(Transition::to))
    }

    /// Exit the current state and start `to`. No-op if `to` is current.
    fn switch_to(
        &mut self,
        to: S::Id,
        intent: &mut S::Intent,
    ) -> Result<Option<Switch<S::Id>>, FsmError> {
        let from = self.current.ok_or(FsmError::NotStarted)?;
        if from == to {
            return Ok(None);
        }

        // Look the destination up before touching the current state.
        self.node(to)?;

        let old = self.node_mut(from)?;
        old.state.exit(intent);
        let from_name = old.state.name();

        self.current = Some(to);
        let new = self.node_mut(to)?;
        new.state.start(intent);

        log::debug!("State changed: {} -> {}", from_name, new.state.name());
        Ok(Some(Switch { from, to }))
    }
}

impl<S: State> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current_state_name())
            .field("states", &self.nodes.len())
            .field("any_transitions", &self.any_transitions.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
