//! Player controller: owns the movement state machine and its sensors

use std::rc::Rc;

use glam::Vec2;
use thiserror::Error;

use crate::config::ConfigError;
use crate::core::{GameEvent, Session};
use crate::fsm::{FsmError, Predicate, State, StateMachine};
use crate::input::{InputEvent, InputProcessor, InputSignal, Subscription};

use super::{
    Climb, GroundMove, Jump, MotionIntent, PlayerConfig, PlayerSignals, PlayerState,
    PlayerStateId, StateContext,
};

/// Errors raised while building a [`PlayerController`].
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The movement tuning is out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transition graph could not be wired.
    #[error(transparent)]
    Fsm(#[from] FsmError),
}

/// Drives a player character through ground movement, climbing and jumping.
///
/// The controller is the single owner of the state machine. The host loop
/// calls [`update`](Self::update) once per frame and
/// [`fixed_update`](Self::fixed_update) once per physics step, then applies
/// the returned [`MotionIntent`] to the player's body.
///
/// Transition graph:
///
/// | From       | To         | When                         |
/// |------------|------------|------------------------------|
/// | GroundMove | Climb      | GroundMove interact flag     |
/// | Climb      | GroundMove | Climb interact flag          |
/// | GroundMove | Jump       | GroundMove jump flag         |
/// | Climb      | Jump       | Climb jump flag              |
/// | Jump       | GroundMove | grounded                     |
/// | Jump       | Climb      | Jump interact flag           |
#[derive(Debug)]
pub struct PlayerController {
    config: PlayerConfig,
    input: InputProcessor,
    signals: Rc<PlayerSignals>,
    machine: StateMachine<PlayerState>,
    /// Intent from the initial state's start, delivered with the first update
    pending: MotionIntent,
    _move_subscription: Subscription,
}

impl PlayerController {
    /// Build the controller, wire the transition graph and start on the ground.
    ///
    /// Fails if `config` does not pass [`PlayerConfig::validate`].
    pub fn new(config: PlayerConfig, input: InputProcessor) -> Result<Self, ControllerError> {
        config.validate()?;
        let signals = Rc::new(PlayerSignals::default());

        let move_signals = Rc::clone(&signals);
        let move_subscription = input.subscribe(InputSignal::Move, move |event| {
            if let InputEvent::Move(direction) = event {
                move_signals.set_input_direction(direction);
            }
        });

        let ctx = StateContext {
            config,
            signals: Rc::clone(&signals),
            input: input.clone(),
        };
        let ground = GroundMove::new(ctx.clone());
        let climb = Climb::new(ctx.clone());
        let jump = Jump::new(ctx);

        let ground_interact = ground.interact_flag().predicate();
        let ground_jump = ground.jump_flag().predicate();
        let climb_interact = climb.interact_flag().predicate();
        let climb_jump = climb.jump_flag().predicate();
        let jump_interact = jump.interact_flag().predicate();
        let grounded = {
            let signals = Rc::clone(&signals);
            Predicate::new(move || signals.is_grounded())
        };

        let mut machine: StateMachine<PlayerState> = StateMachine::new();
        let ground = machine.add_state(ground.into());
        let climb = machine.add_state(climb.into());
        let jump = machine.add_state(jump.into());

        machine.add_transition(ground, climb, ground_interact)?;
        machine.add_transition(climb, ground, climb_interact)?;
        machine.add_transition(ground, jump, ground_jump)?;
        machine.add_transition(climb, jump, climb_jump)?;
        machine.add_transition(jump, ground, grounded)?;
        machine.add_transition(jump, climb, jump_interact)?;

        let pending = machine.set_initial_state(ground)?;
        log::info!("Player controller ready: {:?}", config);

        Ok(Self {
            config,
            input,
            signals,
            machine,
            pending,
            _move_subscription: move_subscription,
        })
    }

    /// Per-frame update.
    ///
    /// Disables input once the session is over, evaluates transitions and
    /// reports any switch to the session's event queue.
    pub fn update(&mut self, session: &mut Session) -> Result<MotionIntent, FsmError> {
        if session.is_over() && self.input.is_enabled() {
            log::info!("Session over, disabling player input");
            self.input.disable();
            // A held move never gets its release once input is off.
            self.signals.set_input_direction(Vec2::ZERO);
        }

        let step = self.machine.tick()?;
        if let Some(switch) = step.switched {
            session.events.push(GameEvent::PlayerStateChanged {
                from: self.state_name(switch.from),
                to: self.state_name(switch.to),
            });
        }

        let mut intent = std::mem::take(&mut self.pending);
        intent.merge(step.intent);
        Ok(intent)
    }

    /// Fixed-step update.
    ///
    /// `grounded` is this step's ground probe result from physics.
    pub fn fixed_update(&mut self, grounded: bool) -> Result<MotionIntent, FsmError> {
        self.signals.set_grounded(grounded);
        self.machine.fixed_tick()
    }

    /// Update the grounded sample without running a fixed step.
    pub fn set_grounded(&self, grounded: bool) {
        self.signals.set_grounded(grounded);
    }

    /// The player started overlapping a climbable volume.
    pub fn enter_vines(&self) {
        self.signals.enter_vine();
    }

    /// The player stopped overlapping a climbable volume.
    pub fn exit_vines(&self) {
        self.signals.exit_vine();
    }

    /// Current movement state.
    #[must_use]
    pub fn current_state(&self) -> PlayerStateId {
        let current = self.machine.current_state();
        debug_assert!(current.is_some(), "controller machine is started in new");
        current.unwrap_or(PlayerStateId::GroundMove)
    }

    /// Movement configuration.
    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Sensors the states read.
    #[must_use]
    pub fn signals(&self) -> &PlayerSignals {
        &self.signals
    }

    /// Input source the controller listens to.
    #[must_use]
    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// The underlying state machine.
    #[must_use]
    pub fn machine(&self) -> &StateMachine<PlayerState> {
        &self.machine
    }

    fn state_name(&self, id: PlayerStateId) -> &'static str {
        self.machine.state(id).map_or("?", |state| state.name())
    }
}
