//! Event Queue for Gameplay Notifications
//!
//! Gameplay code pushes events (state switches, key pickups, score ticks)
//! during a frame; UI and audio read them on the next one. Events are passed
//! around explicitly inside the [`Session`](super::Session) rather than
//! through a process-wide registry.
//!
//! # Example
//!
//! ```ignore
//! // Frame N
//! session.events.push(GameEvent::KeyCollected);
//!
//! // Frame N+1, after the host swapped buffers
//! for event in session.events.iter() {
//!     if let GameEvent::KeyCollected = event {
//!         show_win_screen();
//!     }
//! }
//! ```

use std::collections::VecDeque;

// ============================================================================
// Event Types
// ============================================================================

/// Things that happened during a frame.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GameEvent {
    /// The player picked up the level key; the run is over.
    KeyCollected,

    /// Elapsed-time score advanced.
    ScoreChanged {
        /// New score value
        score: u32,
    },

    /// The player's movement state switched.
    PlayerStateChanged {
        /// State that was exited
        from: &'static str,
        /// State that was started
        to: &'static str,
    },

    /// The session was reset for another run.
    Restarted,
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue.
///
/// Events pushed during frame N become readable after the `swap()` at the
/// end of frame N and stay readable until the next swap.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this frame
    pending: VecDeque<GameEvent>,
    /// Events from previous frame, ready for processing
    processing: VecDeque<GameEvent>,
}

impl EventQueue {
    const DEFAULT_CAPACITY: usize = 16;

    /// Create a new event queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            processing: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }

    /// Push an event to be read next frame.
    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        log::trace!("Event queued: {:?}", event);
        self.pending.push_back(event);
    }

    /// Make this frame's events readable and start a fresh pending buffer.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the previous frame.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.processing.iter()
    }

    /// Take ownership of the previous frame's events.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.processing.drain(..)
    }

    /// Whether there is nothing to read.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Number of readable events.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Number of events written this frame.
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drop everything, pending and readable.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processing.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
