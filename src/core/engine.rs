//! Core Engine struct and headless game loop

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::core::{Session, Time};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name used in logs
    pub title: String,
    /// Length of one fixed physics step in seconds
    pub fixed_timestep: f32,
    /// Maximum fixed steps run in a single frame
    pub max_fixed_steps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::from("Climber"),
            fixed_timestep: 1.0 / 50.0,
            max_fixed_steps: 5,
        }
    }
}

impl EngineConfig {
    /// Create a new config with a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the fixed step length
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }

    /// Set the per-frame fixed step cap
    pub fn with_max_fixed_steps(mut self, steps: u32) -> Self {
        self.max_fixed_steps = steps;
        self
    }

    /// Reject a non-positive step or a zero step cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "engine.fixed_timestep",
                reason: format!("expected a positive step, got {}", self.fixed_timestep),
            });
        }
        if self.max_fixed_steps == 0 {
            return Err(ConfigError::Invalid {
                field: "engine.max_fixed_steps",
                reason: String::from("must allow at least one step per frame"),
            });
        }
        Ok(())
    }
}

/// Boxed error returned from game callbacks
pub type GameResult = Result<(), Box<dyn std::error::Error>>;

/// Game trait that users implement
pub trait Game {
    /// Called once before the first frame
    fn init(&mut self, ctx: &mut EngineContext) -> GameResult;

    /// Called once per fixed physics step, before `update`
    fn fixed_update(&mut self, ctx: &mut EngineContext) -> GameResult;

    /// Called once per frame
    fn update(&mut self, ctx: &mut EngineContext) -> GameResult;

    /// Called when the loop stops
    fn shutdown(&mut self, _ctx: &mut EngineContext) {}
}

/// Context passed to game callbacks
#[derive(Debug)]
pub struct EngineContext {
    /// Time tracking
    pub time: Time,
    /// Current run
    pub session: Session,
    /// Should the engine quit
    should_quit: bool,
}

impl EngineContext {
    fn new(config: &EngineConfig) -> Self {
        Self {
            time: Time::new(config.fixed_timestep, config.max_fixed_steps),
            session: Session::new(),
            should_quit: false,
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Check if engine should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Main engine struct
pub struct Engine<G: Game> {
    config: EngineConfig,
    game: G,
    context: EngineContext,
    initialized: bool,
}

impl<G: Game> Engine<G> {
    /// Create a new engine with the given game.
    ///
    /// Fails if `config` does not pass [`EngineConfig::validate`].
    pub fn new(config: EngineConfig, game: G) -> Result<Self, ConfigError> {
        config.validate()?;
        let context = EngineContext::new(&config);
        Ok(Self {
            config,
            game,
            context,
            initialized: false,
        })
    }

    /// Run one frame per entry of `frame_deltas`, or until the game quits.
    ///
    /// Returns the number of frames that ran.
    pub fn run<I>(&mut self, frame_deltas: I) -> Result<u64, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = f32>,
    {
        // Tests may have installed a logger already
        let _ = env_logger::try_init();
        log::info!("Starting engine: {}", self.config.title);

        let mut frames = 0;
        for dt in frame_deltas {
            if self.context.should_quit() {
                break;
            }
            self.frame(dt)?;
            frames += 1;
        }

        log::info!("Shutting down after {} frames", frames);
        self.game.shutdown(&mut self.context);
        Ok(frames)
    }

    /// Run a single frame of `dt` seconds.
    ///
    /// Fixed steps run first, then the per-frame update, then the session
    /// clock advances and the event buffers swap.
    pub fn frame(&mut self, dt: f32) -> GameResult {
        if !self.initialized {
            self.game.init(&mut self.context)?;
            self.initialized = true;
            log::info!("Engine initialized successfully");
        }

        let steps = self.context.time.advance(dt);
        for _ in 0..steps {
            self.game.fixed_update(&mut self.context)?;
        }

        self.game.update(&mut self.context)?;

        let dt = self.context.time.delta_seconds();
        self.context.session.advance(dt);
        self.context.session.events.swap();
        Ok(())
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared context
    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    /// Shared context, mutably
    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.context
    }

    /// The running game
    pub fn game(&self) -> &G {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        inits: u32,
        fixed: u32,
        frames: u32,
        shutdowns: u32,
        quit_after: Option<u32>,
    }

    impl Game for Counter {
        fn init(&mut self, _ctx: &mut EngineContext) -> GameResult {
            self.inits += 1;
            Ok(())
        }

        fn fixed_update(&mut self, _ctx: &mut EngineContext) -> GameResult {
            self.fixed += 1;
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext) -> GameResult {
            self.frames += 1;
            if self.quit_after == Some(self.frames) {
                ctx.quit();
            }
            Ok(())
        }

        fn shutdown(&mut self, _ctx: &mut EngineContext) {
            self.shutdowns += 1;
        }
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
            .with_fixed_timestep(0.25)
            .with_max_fixed_steps(4)
    }

    #[test]
    fn test_frames_drive_fixed_steps() {
        let mut engine = Engine::new(config(), Counter::default()).unwrap();
        let frames = engine.run([0.5, 0.125, 0.125]).unwrap();

        assert_eq!(frames, 3);
        let game = engine.game();
        assert_eq!(game.inits, 1);
        assert_eq!(game.frames, 3);
        assert_eq!(game.fixed, 3);
        assert_eq!(game.shutdowns, 1);
    }

    #[test]
    fn test_quit_stops_loop() {
        let game = Counter {
            quit_after: Some(2),
            ..Default::default()
        };
        let mut engine = Engine::new(config(), game).unwrap();
        let frames = engine.run(std::iter::repeat(0.1).take(10)).unwrap();
        assert_eq!(frames, 2);
    }

    #[test]
    fn test_session_clock_advances() {
        let mut engine = Engine::new(config(), Counter::default()).unwrap();
        engine.run([0.75, 0.75]).unwrap();
        assert_eq!(engine.context().session.score(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let zero_steps = config().with_max_fixed_steps(0);
        assert!(matches!(
            Engine::new(zero_steps, Counter::default()),
            Err(ConfigError::Invalid {
                field: "engine.max_fixed_steps",
                ..
            })
        ));

        let nan_step = config().with_fixed_timestep(f32::NAN);
        assert!(matches!(
            Engine::new(nan_step, Counter::default()),
            Err(ConfigError::Invalid {
                field: "engine.fixed_timestep",
                ..
            })
        ));
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(
            EngineConfig::default()
                .with_fixed_timestep(0.0)
                .validate()
                .is_err()
        );
        assert!(
            EngineConfig::default()
                .with_max_fixed_steps(0)
                .validate()
                .is_err()
        );
    }
}
