//! Per-run game state shared with gameplay code by reference

use super::{EventQueue, GameEvent};

/// State of the current run: whether it is over, the time score and the
/// events raised this frame.
///
/// The host owns the session and lends it to whatever needs it each frame;
/// anything interested in the run ending polls [`is_over`](Self::is_over) or
/// reads [`GameEvent::KeyCollected`] from the queue.
#[derive(Debug, Default)]
pub struct Session {
    /// Events raised during the run
    pub events: EventQueue,
    elapsed: f32,
    score: u32,
    key_collected: bool,
}

impl Session {
    /// Start a fresh run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The player reached the key. Ends the run; repeated calls are ignored.
    pub fn collect_key(&mut self) {
        if self.key_collected {
            return;
        }
        self.key_collected = true;
        log::info!("Key collected after {:.2}s, score {}", self.elapsed, self.score);
        self.events.push(GameEvent::KeyCollected);
    }

    /// Whether the run has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.key_collected
    }

    /// Advance the run clock. The score is the number of whole seconds
    /// elapsed and freezes once the run is over.
    pub fn advance(&mut self, dt: f32) {
        if self.key_collected {
            return;
        }
        self.elapsed += dt.max(0.0);

        let score = self.elapsed as u32;
        if score != self.score {
            self.score = score;
            self.events.push(GameEvent::ScoreChanged { score });
        }
    }

    /// Seconds since the run started.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Reset for another run.
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.elapsed = 0.0;
        self.score = 0;
        self.key_collected = false;
        self.events.clear();
        self.events.push(GameEvent::Restarted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_counts_whole_seconds() {
        let mut session = Session::new();
        session.advance(0.6);
        assert_eq!(session.score(), 0);
        session.advance(0.6);
        assert_eq!(session.score(), 1);

        session.events.swap();
        let events: Vec<_> = session.events.iter().collect();
        assert_eq!(events, vec![&GameEvent::ScoreChanged { score: 1 }]);
    }

    #[test]
    fn test_collect_key_is_idempotent() {
        let mut session = Session::new();
        session.collect_key();
        session.collect_key();
        assert!(session.is_over());

        session.events.swap();
        assert_eq!(session.events.len(), 1);
    }

    #[test]
    fn test_score_freezes_when_over() {
        let mut session = Session::new();
        session.advance(2.5);
        session.collect_key();
        session.advance(10.0);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_restart_resets() {
        let mut session = Session::new();
        session.advance(3.0);
        session.collect_key();

        session.restart();
        assert!(!session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.elapsed(), 0.0);

        session.events.swap();
        assert_eq!(session.events.iter().next(), Some(&GameEvent::Restarted));
    }
}
