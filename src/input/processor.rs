//! Input Signal Source
//!
//! This module turns logical input actions into synchronous signals that
//! gameplay code subscribes to. Device mapping happens upstream; this layer
//! only knows about the three actions the player controller cares about.
//!
//! # Design Principles
//!
//! - **Scoped Subscriptions**: `subscribe` returns a guard that unsubscribes on drop
//! - **Synchronous Dispatch**: Callbacks run immediately, in subscription order
//! - **Shared Handle**: Cloning an `InputProcessor` shares one listener registry
//!
//! # Example
//!
//! ```ignore
//! let input = InputProcessor::new();
//! let jumped = IntentFlag::new();
//!
//! let flag = jumped.clone();
//! let subscription = input.subscribe(InputSignal::Jump, move |_| flag.raise());
//!
//! input.jump();
//! assert!(jumped.is_raised());
//!
//! drop(subscription); // no longer notified
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use glam::Vec2;
use rustc_hash::FxHashMap;

// ============================================================================
// Signals
// ============================================================================

/// Kinds of input signal a callback can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSignal {
    /// Move direction changed
    Move,
    /// Interact was pressed
    Interact,
    /// Jump was pressed
    Jump,
}

/// A single input occurrence delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// New move direction (each axis in -1.0..=1.0)
    Move(Vec2),
    /// Interact pressed
    Interact,
    /// Jump pressed
    Jump,
}

impl InputEvent {
    /// Signal this event is delivered on.
    #[must_use]
    pub const fn signal(&self) -> InputSignal {
        match self {
            Self::Move(_) => InputSignal::Move,
            Self::Interact => InputSignal::Interact,
            Self::Jump => InputSignal::Jump,
        }
    }
}

// ============================================================================
// Listener Registry
// ============================================================================

type Callback = Rc<dyn Fn(InputEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    by_signal: FxHashMap<InputSignal, Vec<(u64, Callback)>>,
}

impl Listeners {
    fn insert(&mut self, signal: InputSignal, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.by_signal
            .entry(signal)
            .or_default()
            .push((id, callback));
        id
    }

    fn remove(&mut self, signal: InputSignal, id: u64) {
        if let Some(list) = self.by_signal.get_mut(&signal) {
            list.retain(|(listener, _)| *listener != id);
        }
    }

    fn snapshot(&self, signal: InputSignal) -> Vec<Callback> {
        self.by_signal
            .get(&signal)
            .map(|list| list.iter().map(|(_, cb)| Rc::clone(cb)).collect())
            .unwrap_or_default()
    }

    fn count(&self, signal: InputSignal) -> usize {
        self.by_signal.get(&signal).map_or(0, Vec::len)
    }
}

// ============================================================================
// Input Processor
// ============================================================================

/// Source of move, interact and jump signals.
///
/// Cheap to clone; all clones share the same listeners and enabled flag.
#[derive(Clone)]
pub struct InputProcessor {
    listeners: Rc<RefCell<Listeners>>,
    enabled: Rc<Cell<bool>>,
}

impl InputProcessor {
    /// Create an enabled processor with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners::default())),
            enabled: Rc::new(Cell::new(true)),
        }
    }

    /// Subscribe `callback` to `signal`.
    ///
    /// The callback stays registered until the returned [`Subscription`]
    /// is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, signal: InputSignal, callback: F) -> Subscription
    where
        F: Fn(InputEvent) + 'static,
    {
        let id = self.listeners.borrow_mut().insert(signal, Rc::new(callback));
        log::trace!("Subscribed listener {} to {:?}", id, signal);
        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            signal,
            id,
        }
    }

    /// Deliver `event` to every listener of its signal.
    ///
    /// Ignored while the processor is disabled.
    pub fn dispatch(&self, event: InputEvent) {
        if !self.enabled.get() {
            log::trace!("Input disabled, dropping {:?}", event);
            return;
        }

        // Release the registry borrow before running callbacks so they can
        // subscribe or unsubscribe.
        let callbacks = self.listeners.borrow().snapshot(event.signal());
        for callback in callbacks {
            callback(event);
        }
    }

    /// Report a new move direction.
    pub fn move_to(&self, direction: Vec2) {
        self.dispatch(InputEvent::Move(direction));
    }

    /// Report an interact press.
    pub fn interact(&self) {
        self.dispatch(InputEvent::Interact);
    }

    /// Report a jump press.
    pub fn jump(&self) {
        self.dispatch(InputEvent::Jump);
    }

    /// Resume delivering events.
    pub fn enable(&self) {
        self.enabled.set(true);
    }

    /// Stop delivering events until re-enabled.
    pub fn disable(&self) {
        if self.enabled.replace(false) {
            log::info!("Input disabled");
        }
    }

    /// Whether events are currently delivered.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Number of live listeners on `signal`.
    #[must_use]
    pub fn listener_count(&self, signal: InputSignal) -> usize {
        self.listeners.borrow().count(signal)
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        f.debug_struct("InputProcessor")
            .field("enabled", &self.enabled.get())
            .field("move", &listeners.count(InputSignal::Move))
            .field("interact", &listeners.count(InputSignal::Interact))
            .field("jump", &listeners.count(InputSignal::Jump))
            .finish()
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// Guard for a registered callback. Unsubscribes when dropped.
pub struct Subscription {
    listeners: Weak<RefCell<Listeners>>,
    signal: InputSignal,
    id: u64,
}

impl Subscription {
    /// Signal this subscription listens to.
    #[must_use]
    pub fn signal(&self) -> InputSignal {
        self.signal
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(self.signal, self.id);
            log::trace!("Unsubscribed listener {} from {:?}", self.id, self.signal);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("signal", &self.signal)
            .field("id", &self.id)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
