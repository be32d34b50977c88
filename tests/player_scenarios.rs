//! End-to-end player controller scenarios.

use climber::fsm::{Predicate, State, StateMachine};
use std::rc::Rc;

use climber::player::{Climb, GroundMove, Jump, PlayerSignals, PlayerState, StateContext};
use climber::prelude::*;

fn setup(config: PlayerConfig) -> (PlayerController, InputProcessor, Session) {
    let input = InputProcessor::new();
    let controller = PlayerController::new(config, input.clone()).unwrap();
    (controller, input, Session::new())
}

fn ground_move(controller: &PlayerController) -> &GroundMove {
    controller
        .machine()
        .state(PlayerStateId::GroundMove)
        .and_then(|state| state.as_ground_move())
        .unwrap()
}

fn climb(controller: &PlayerController) -> &Climb {
    controller
        .machine()
        .state(PlayerStateId::Climb)
        .and_then(|state| state.as_climb())
        .unwrap()
}

fn jump(controller: &PlayerController) -> &Jump {
    controller
        .machine()
        .state(PlayerStateId::Jump)
        .and_then(|state| state.as_jump())
        .unwrap()
}

#[test]
fn jump_from_ground_applies_impulse() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default().with_jump_speed(8.0));
    controller.set_grounded(true);

    input.jump();
    assert!(ground_move(&controller).jump_flag().is_raised());

    let intent = controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Jump);
    assert_eq!(intent.velocity_y, Some(8.0));
}

#[test]
fn jump_needs_ground() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());

    input.jump();
    assert!(!ground_move(&controller).jump_flag().is_raised());

    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::GroundMove);
}

#[test]
fn mid_air_interact_without_vines_keeps_jumping() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.set_grounded(true);
    input.jump();
    controller.update(&mut session).unwrap();
    controller.set_grounded(false);

    input.interact();
    assert!(!jump(&controller).interact_flag().is_raised());

    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Jump);
}

#[test]
fn mid_air_interact_on_vine_grabs() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.set_grounded(true);
    input.jump();
    controller.update(&mut session).unwrap();
    controller.set_grounded(false);

    controller.enter_vines();
    input.interact();
    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Climb);
}

#[test]
fn interact_on_vines_starts_climbing() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.enter_vines();
    controller.enter_vines();

    input.interact();
    assert!(ground_move(&controller).interact_flag().is_raised());

    let intent = controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Climb);
    assert_eq!(intent.gravity, Some(false));
    assert_eq!(intent.velocity_x, Some(0.0));
    assert_eq!(intent.velocity_y, Some(0.0));
}

#[test]
fn climb_speed_scales_with_overlapping_vines() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default().with_climb_speed(3.0));
    controller.enter_vines();
    controller.enter_vines();
    input.interact();
    controller.update(&mut session).unwrap();

    input.move_to(Vec2::new(0.0, 1.0));
    let intent = controller.fixed_update(false).unwrap();
    assert_eq!(intent.velocity_y, Some(6.0));

    let intent = controller.update(&mut session).unwrap();
    assert!(intent.is_empty());
    assert_eq!(controller.current_state(), PlayerStateId::Climb);
}

#[test]
fn letting_go_of_vine_restores_gravity() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.enter_vines();
    input.interact();
    controller.update(&mut session).unwrap();

    input.interact();
    let intent = controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::GroundMove);
    assert_eq!(intent.gravity, Some(true));
}

#[test]
fn jump_off_vine() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default().with_jump_speed(6.0));
    controller.enter_vines();
    input.interact();
    controller.update(&mut session).unwrap();

    input.jump();
    let intent = controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Jump);
    assert_eq!(intent.gravity, Some(true));
    assert_eq!(intent.velocity_y, Some(6.0));
}

#[test]
fn landing_wins_over_grab() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.set_grounded(true);
    input.jump();
    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Jump);

    // Both of Jump's edges are satisfied; landing was registered first.
    controller.enter_vines();
    input.interact();
    assert!(jump(&controller).interact_flag().is_raised());

    controller.fixed_update(true).unwrap();
    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::GroundMove);
}

#[test]
fn grounded_sample_only_counts_on_next_frame() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.set_grounded(true);
    input.jump();
    controller.update(&mut session).unwrap();
    controller.set_grounded(false);
    controller.update(&mut session).unwrap();

    controller.fixed_update(true).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Jump);

    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::GroundMove);
}

#[test]
fn flags_do_not_survive_exit() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.enter_vines();
    input.interact();
    controller.update(&mut session).unwrap();

    // Raise both Climb flags; the interact edge is checked first.
    input.jump();
    input.interact();
    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::GroundMove);
    assert!(!climb(&controller).jump_flag().is_raised());
    assert!(!climb(&controller).interact_flag().is_raised());

    // Re-entering Climb must not jump straight off.
    input.interact();
    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Climb);
    controller.update(&mut session).unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Climb);
}

#[test]
fn only_active_state_listens() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.set_grounded(true);
    input.jump();
    controller.update(&mut session).unwrap();

    // Jump listens to interact only.
    assert_eq!(input.listener_count(InputSignal::Interact), 1);
    assert_eq!(input.listener_count(InputSignal::Jump), 0);

    input.jump();
    assert!(!ground_move(&controller).jump_flag().is_raised());
}

#[test]
fn air_control_follows_input() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default().with_move_speed(4.0));
    controller.set_grounded(true);
    input.jump();
    controller.update(&mut session).unwrap();

    input.move_to(Vec2::new(-1.0, 0.0));
    let intent = controller.fixed_update(false).unwrap();
    assert_eq!(intent.velocity_x, Some(-4.0));
    assert_eq!(intent.velocity_y, None);
}

#[test]
fn state_switches_reach_event_queue() {
    let (mut controller, input, mut session) = setup(PlayerConfig::default());
    controller.enter_vines();
    input.interact();
    controller.update(&mut session).unwrap();
    session.events.swap();

    let events: Vec<_> = session.events.drain().collect();
    assert_eq!(
        events,
        vec![GameEvent::PlayerStateChanged {
            from: "GroundMove",
            to: "Climb"
        }]
    );
}

#[test]
fn any_transition_beats_local_for_player_states() {
    // Same states, but landing wired as an any-transition.
    let input = InputProcessor::new();
    let ctx = StateContext {
        config: PlayerConfig::default(),
        signals: Rc::new(PlayerSignals::default()),
        input: input.clone(),
    };
    let ground = GroundMove::new(ctx.clone());
    let jump = Jump::new(ctx.clone());
    let climb = Climb::new(ctx);
    let grab = jump.interact_flag().clone();
    let landed = IntentFlag::new();

    let mut fsm: StateMachine<PlayerState> = StateMachine::new();
    let ground = fsm.add_state(ground.into());
    let jump = fsm.add_state(jump.into());
    let climb = fsm.add_state(climb.into());
    fsm.add_transition(jump, climb, grab.predicate()).unwrap();
    fsm.add_any_transition(ground, landed.predicate()).unwrap();
    fsm.set_initial_state(jump).unwrap();

    grab.raise();
    landed.raise();
    let step = fsm.tick().unwrap();
    assert_eq!(step.switched.map(|s| s.to), Some(ground));
    assert_eq!(fsm.current_state_name(), Some("GroundMove"));

    // From GroundMove the any-transition targets the current state and
    // blocks every local edge.
    fsm.add_transition(ground, climb, Predicate::always()).unwrap();
    let step = fsm.tick().unwrap();
    assert!(step.switched.is_none());
    assert_eq!(fsm.state(ground).map(State::id), Some(ground));
}

#[test]
fn headless_run_reaches_key() {
    struct Climber {
        input: InputProcessor,
        controller: Option<PlayerController>,
        physics: Physics,
        body: Body,
        key: Aabb,
        touching: u32,
        frame: u32,
    }

    impl Game for Climber {
        fn init(&mut self, _ctx: &mut EngineContext) -> GameResult {
            self.controller = Some(PlayerController::new(
                PlayerConfig::default(),
                self.input.clone(),
            )?);
            Ok(())
        }

        fn fixed_update(&mut self, ctx: &mut EngineContext) -> GameResult {
            let controller = self.controller.as_mut().ok_or(FsmError::NotStarted)?;
            let grounded = self.physics.is_grounded(&self.body);
            controller.fixed_update(grounded)?.apply(&mut self.body);
            self.physics.step(&mut self.body, ctx.time.fixed_timestep());

            let overlapping = self.physics.overlapping_climbables(&self.body);
            for _ in self.touching..overlapping {
                controller.enter_vines();
            }
            for _ in overlapping..self.touching {
                controller.exit_vines();
            }
            self.touching = overlapping;
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext) -> GameResult {
            match self.frame {
                0 => self.input.move_to(Vec2::X),
                50 => {
                    self.input.move_to(Vec2::ZERO);
                    self.input.interact();
                }
                52 => self.input.move_to(Vec2::Y),
                _ => {}
            }
            self.frame += 1;

            let controller = self.controller.as_mut().ok_or(FsmError::NotStarted)?;
            controller.update(&mut ctx.session)?.apply(&mut self.body);
            if self.body.bounds().overlaps(&self.key) {
                ctx.session.collect_key();
                ctx.quit();
            }
            Ok(())
        }
    }

    let mut physics = Physics::new();
    physics.add_climbable(Aabb::new(Vec2::new(3.0, 0.0), Vec2::new(4.0, 10.0)));
    let game = Climber {
        input: InputProcessor::new(),
        controller: None,
        physics,
        body: Body::new(Vec2::new(0.0, 1.0)),
        key: Aabb::from_center(Vec2::new(3.5, 6.0), Vec2::splat(0.5)),
        touching: 0,
        frame: 0,
    };

    let mut engine = Engine::new(EngineConfig::default(), game).unwrap();
    let frames = engine.run(std::iter::repeat_n(1.0 / 60.0, 600)).unwrap();

    assert!(frames < 600, "key never reached");
    assert!(engine.context().session.is_over());
    let controller = engine.game().controller.as_ref().unwrap();
    assert_eq!(controller.current_state(), PlayerStateId::Climb);
}
