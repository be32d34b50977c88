//! Player movement states
//!
//! Three states drive the player: walking on the ground, climbing vines and
//! jumping. Each one subscribes to the input signals it cares about while it
//! is active and raises intent flags that the controller's transition
//! predicates read on the next frame.

use std::rc::Rc;

use smallvec::{SmallVec, smallvec};

use super::{MotionIntent, PlayerConfig, PlayerSignals};
use crate::fsm::{IntentFlag, State};
use crate::input::{InputProcessor, InputSignal, Subscription};

// ============================================================================
// Shared pieces
// ============================================================================

/// Identity of a player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStateId {
    /// Walking on the ground
    GroundMove,
    /// Holding on to a climbable volume
    Climb,
    /// Airborne after a jump
    Jump,
}

/// Everything a player state needs from its owner.
#[derive(Debug, Clone)]
pub struct StateContext {
    /// Movement tuning
    pub config: PlayerConfig,
    /// Controller-owned sensors
    pub signals: Rc<PlayerSignals>,
    /// Input signal source
    pub input: InputProcessor,
}

type Subscriptions = SmallVec<[Subscription; 2]>;

/// Subscribe `flag` to `signal`, raising it only while `gate` holds.
fn raise_on(
    input: &InputProcessor,
    signal: InputSignal,
    flag: &IntentFlag,
    gate: impl Fn() -> bool + 'static,
) -> Subscription {
    let flag = flag.clone();
    input.subscribe(signal, move |_| {
        if gate() {
            flag.raise();
        }
    })
}

fn on_vine(signals: &Rc<PlayerSignals>) -> impl Fn() -> bool + 'static {
    let signals = Rc::clone(signals);
    move || signals.vine_count() > 0
}

fn on_ground(signals: &Rc<PlayerSignals>) -> impl Fn() -> bool + 'static {
    let signals = Rc::clone(signals);
    move || signals.is_grounded()
}

// ============================================================================
// Ground Move
// ============================================================================

/// Walking state. Interact grabs a vine, jump leaves the ground.
#[derive(Debug)]
pub struct GroundMove {
    ctx: StateContext,
    interact: IntentFlag,
    jump: IntentFlag,
    subscriptions: Subscriptions,
}

impl GroundMove {
    /// Create the state; it subscribes to nothing until started.
    #[must_use]
    pub fn new(ctx: StateContext) -> Self {
        Self {
            ctx,
            interact: IntentFlag::new(),
            jump: IntentFlag::new(),
            subscriptions: SmallVec::new(),
        }
    }

    /// Raised by interact while overlapping a vine.
    #[must_use]
    pub fn interact_flag(&self) -> &IntentFlag {
        &self.interact
    }

    /// Raised by jump while grounded.
    #[must_use]
    pub fn jump_flag(&self) -> &IntentFlag {
        &self.jump
    }
}

impl State for GroundMove {
    type Id = PlayerStateId;
    type Intent = MotionIntent;

    fn id(&self) -> PlayerStateId {
        PlayerStateId::GroundMove
    }

    fn name(&self) -> &'static str {
        "GroundMove"
    }

    fn start(&mut self, _intent: &mut MotionIntent) {
        self.interact.clear();
        self.jump.clear();

        let input = &self.ctx.input;
        self.subscriptions = smallvec![
            raise_on(
                input,
                InputSignal::Interact,
                &self.interact,
                on_vine(&self.ctx.signals)
            ),
            raise_on(
                input,
                InputSignal::Jump,
                &self.jump,
                on_ground(&self.ctx.signals)
            ),
        ];
    }

    fn fixed_update(&mut self, intent: &mut MotionIntent) {
        let direction = self.ctx.signals.input_direction();
        intent.velocity_x = Some(direction.x * self.ctx.config.move_speed);
    }

    fn exit(&mut self, _intent: &mut MotionIntent) {
        self.subscriptions.clear();
        self.interact.clear();
        self.jump.clear();
    }
}

// ============================================================================
// Climb
// ============================================================================

/// Climbing state. Gravity is off; interact lets go, jump leaps off.
#[derive(Debug)]
pub struct Climb {
    ctx: StateContext,
    interact: IntentFlag,
    jump: IntentFlag,
    subscriptions: Subscriptions,
}

impl Climb {
    /// Create the state; it subscribes to nothing until started.
    #[must_use]
    pub fn new(ctx: StateContext) -> Self {
        Self {
            ctx,
            interact: IntentFlag::new(),
            jump: IntentFlag::new(),
            subscriptions: SmallVec::new(),
        }
    }

    /// Raised by any interact press.
    #[must_use]
    pub fn interact_flag(&self) -> &IntentFlag {
        &self.interact
    }

    /// Raised by any jump press.
    #[must_use]
    pub fn jump_flag(&self) -> &IntentFlag {
        &self.jump
    }
}

impl State for Climb {
    type Id = PlayerStateId;
    type Intent = MotionIntent;

    fn id(&self) -> PlayerStateId {
        PlayerStateId::Climb
    }

    fn name(&self) -> &'static str {
        "Climb"
    }

    fn start(&mut self, intent: &mut MotionIntent) {
        self.interact.clear();
        self.jump.clear();

        intent.gravity = Some(false);
        intent.velocity_x = Some(0.0);
        intent.velocity_y = Some(0.0);

        let input = &self.ctx.input;
        self.subscriptions = smallvec![
            raise_on(input, InputSignal::Interact, &self.interact, || true),
            raise_on(input, InputSignal::Jump, &self.jump, || true),
        ];
    }

    fn fixed_update(&mut self, intent: &mut MotionIntent) {
        // Overlapping volumes stack: two vines climb twice as fast.
        let direction = self.ctx.signals.input_direction();
        let vines = self.ctx.signals.vine_count() as f32;
        intent.velocity_y = Some(direction.y * self.ctx.config.climb_speed * vines);
    }

    fn exit(&mut self, intent: &mut MotionIntent) {
        self.subscriptions.clear();
        self.interact.clear();
        self.jump.clear();
        intent.gravity = Some(true);
    }
}

// ============================================================================
// Jump
// ============================================================================

/// Airborne state. Starts with an upward impulse; horizontal air control.
#[derive(Debug)]
pub struct Jump {
    ctx: StateContext,
    interact: IntentFlag,
    subscriptions: Subscriptions,
}

impl Jump {
    /// Create the state; it subscribes to nothing until started.
    #[must_use]
    pub fn new(ctx: StateContext) -> Self {
        Self {
            ctx,
            interact: IntentFlag::new(),
            subscriptions: SmallVec::new(),
        }
    }

    /// Raised by interact while overlapping a vine (mid-air grab).
    #[must_use]
    pub fn interact_flag(&self) -> &IntentFlag {
        &self.interact
    }
}

impl State for Jump {
    type Id = PlayerStateId;
    type Intent = MotionIntent;

    fn id(&self) -> PlayerStateId {
        PlayerStateId::Jump
    }

    fn name(&self) -> &'static str {
        "Jump"
    }

    fn start(&mut self, intent: &mut MotionIntent) {
        intent.velocity_y = Some(self.ctx.config.jump_speed);

        self.interact.clear();
        self.subscriptions = smallvec![raise_on(
            &self.ctx.input,
            InputSignal::Interact,
            &self.interact,
            on_vine(&self.ctx.signals)
        )];
    }

    fn fixed_update(&mut self, intent: &mut MotionIntent) {
        let direction = self.ctx.signals.input_direction();
        intent.velocity_x = Some(direction.x * self.ctx.config.move_speed);
    }

    fn exit(&mut self, _intent: &mut MotionIntent) {
        self.subscriptions.clear();
        self.interact.clear();
    }
}

// ============================================================================
// Player State
// ============================================================================

type DynPlayerState = dyn State<Id = PlayerStateId, Intent = MotionIntent>;

/// Closed set of player states.
#[derive(Debug)]
pub enum PlayerState {
    /// Walking
    GroundMove(GroundMove),
    /// Climbing
    Climb(Climb),
    /// Jumping
    Jump(Jump),
}

impl PlayerState {
    fn inner(&self) -> &DynPlayerState {
        match self {
            Self::GroundMove(state) => state,
            Self::Climb(state) => state,
            Self::Jump(state) => state,
        }
    }

    fn inner_mut(&mut self) -> &mut DynPlayerState {
        match self {
            Self::GroundMove(state) => state,
            Self::Climb(state) => state,
            Self::Jump(state) => state,
        }
    }

    /// The ground state, if this is one.
    #[must_use]
    pub fn as_ground_move(&self) -> Option<&GroundMove> {
        match self {
            Self::GroundMove(state) => Some(state),
            _ => None,
        }
    }

    /// The climb state, if this is one.
    #[must_use]
    pub fn as_climb(&self) -> Option<&Climb> {
        match self {
            Self::Climb(state) => Some(state),
            _ => None,
        }
    }

    /// The jump state, if this is one.
    #[must_use]
    pub fn as_jump(&self) -> Option<&Jump> {
        match self {
            Self::Jump(state) => Some(state),
            _ => None,
        }
    }
}

impl State for PlayerState {
    type Id = PlayerStateId;
    type Intent = MotionIntent;

    fn id(&self) -> PlayerStateId {
        self.inner().id()
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn start(&mut self, intent: &mut MotionIntent) {
        self.inner_mut().start(intent);
    }

    fn update(&mut self, intent: &mut MotionIntent) {
        self.inner_mut().update(intent);
    }

    fn fixed_update(&mut self, intent: &mut MotionIntent) {
        self.inner_mut().fixed_update(intent);
    }

    fn exit(&mut self, intent: &mut MotionIntent) {
        self.inner_mut().exit(intent);
    }
}

impl From<GroundMove> for PlayerState {
    fn from(state: GroundMove) -> Self {
        Self::GroundMove(state)
    }
}

impl From<Climb> for PlayerState {
    fn from(state: Climb) -> Self {
        Self::Climb(state)
    }
}

impl From<Jump> for PlayerState {
    fn from(state: Jump) -> Self {
        Self::Jump(state)
    }
}

// ============================================================================
// Tests
// ============================================================================
