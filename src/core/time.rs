//! Frame time and fixed-step accumulator

/// Tracks frame deltas and decides how many fixed steps each frame runs.
#[derive(Debug, Clone)]
pub struct Time {
    delta: f32,
    elapsed: f64,
    frame_count: u64,
    fixed_timestep: f32,
    max_fixed_steps: u32,
    accumulator: f32,
}

impl Time {
    /// Create a clock with the given fixed step and per-frame step cap.
    #[must_use]
    pub fn new(fixed_timestep: f32, max_fixed_steps: u32) -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            fixed_timestep,
            max_fixed_steps,
            accumulator: 0.0,
        }
    }

    /// Record a frame of `dt` seconds and return how many fixed steps to run.
    ///
    /// If the backlog exceeds `max_fixed_steps`, the remainder is dropped so
    /// a slow frame cannot snowball.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta = dt;
        self.elapsed += f64::from(dt);
        self.frame_count += 1;

        if self.fixed_timestep <= 0.0 {
            return 0;
        }

        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= self.fixed_timestep && steps < self.max_fixed_steps {
            self.accumulator -= self.fixed_timestep;
            steps += 1;
        }

        if self.accumulator >= self.fixed_timestep {
            log::warn!(
                "Dropping {:.3}s of fixed-step backlog after {} steps",
                self.accumulator,
                steps
            );
            self.accumulator = 0.0;
        }
        steps
    }

    /// Duration of the last frame in seconds.
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Total time since start in seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames recorded.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Length of one fixed step in seconds.
    #[must_use]
    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Fraction of a fixed step carried over to the next frame.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        if self.fixed_timestep > 0.0 {
            self.accumulator / self.fixed_timestep
        } else {
            0.0
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(1.0 / 50.0, 5)
    }
}
