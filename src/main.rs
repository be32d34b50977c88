//! Headless demo: walk to a vine, jump, grab it, climb to the key

use climber::prelude::*;

/// Scripted input at a given frame
#[derive(Debug, Clone, Copy)]
enum Cue {
    Move(Vec2),
    Jump,
    Interact,
}

const SCRIPT: &[(u64, Cue)] = &[
    (0, Cue::Move(Vec2::new(1.0, 0.0))),
    (20, Cue::Jump),
    (70, Cue::Move(Vec2::ZERO)),
    (72, Cue::Interact),
    (75, Cue::Move(Vec2::new(0.0, 1.0))),
];

const FRAME_TIME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 600;

/// Demo game driving one player through a small level
struct DemoGame {
    config: PlayerConfig,
    input: InputProcessor,
    controller: Option<PlayerController>,
    physics: Physics,
    body: Body,
    key: Aabb,
    vines_touching: u32,
    frame: u64,
}

impl DemoGame {
    fn new(config: PlayerConfig) -> Self {
        let mut physics = Physics::new();
        physics.add_climbable(Aabb::new(Vec2::new(5.5, 0.0), Vec2::new(6.5, 12.0)));

        Self {
            config,
            input: InputProcessor::new(),
            controller: None,
            physics,
            body: Body::new(Vec2::new(0.0, 1.0)),
            key: Aabb::from_center(Vec2::new(6.0, 9.0), Vec2::splat(0.5)),
            vines_touching: 0,
            frame: 0,
        }
    }

    fn controller(&mut self) -> Result<&mut PlayerController, FsmError> {
        self.controller.as_mut().ok_or(FsmError::NotStarted)
    }

    /// Forward overlap changes as enter/exit notifications.
    fn sync_vines(&mut self) -> Result<(), FsmError> {
        let overlapping = self.physics.overlapping_climbables(&self.body);
        let touching = self.vines_touching;
        let controller = self.controller()?;

        for _ in touching..overlapping {
            controller.enter_vines();
        }
        for _ in overlapping..touching {
            controller.exit_vines();
        }
        self.vines_touching = overlapping;
        Ok(())
    }
}

impl Game for DemoGame {
    fn init(&mut self, _ctx: &mut EngineContext) -> GameResult {
        log::info!("Initializing demo game");
        self.controller = Some(PlayerController::new(self.config, self.input.clone())?);
        Ok(())
    }

    fn fixed_update(&mut self, ctx: &mut EngineContext) -> GameResult {
        let grounded = self.physics.is_grounded(&self.body);
        let intent = self.controller()?.fixed_update(grounded)?;
        intent.apply(&mut self.body);

        self.physics.step(&mut self.body, ctx.time.fixed_timestep());
        self.sync_vines()?;
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext) -> GameResult {
        for (_, cue) in SCRIPT.iter().filter(|(frame, _)| *frame == self.frame) {
            match *cue {
                Cue::Move(direction) => self.input.move_to(direction),
                Cue::Jump => self.input.jump(),
                Cue::Interact => self.input.interact(),
            }
        }
        self.frame += 1;

        for event in ctx.session.events.iter() {
            log::info!("[frame {}] {:?}", self.frame, event);
        }

        let intent = self.controller()?.update(&mut ctx.session)?;
        intent.apply(&mut self.body);

        if self.body.bounds().overlaps(&self.key) {
            ctx.session.collect_key();
        }
        if ctx.session.is_over() && !self.input.is_enabled() {
            ctx.quit();
        }
        Ok(())
    }

    fn shutdown(&mut self, ctx: &mut EngineContext) {
        let state = self
            .controller
            .as_ref()
            .map(PlayerController::current_state);
        log::info!(
            "Demo finished: state {:?}, position {:?}, score {}, key {}",
            state,
            self.body.position,
            ctx.session.score(),
            ctx.session.is_over()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let game = DemoGame::new(config.player);
    let mut engine = Engine::new(config.engine, game)?;
    engine.run(std::iter::repeat_n(FRAME_TIME, MAX_FRAMES))?;

    Ok(())
}
