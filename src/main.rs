//! Space Ninja entry point
//!
//! Headless driver: runs a demo-mode session on the fixed-timestep loop and
//! prints the final snapshot as JSON. Pass a JSON config path as the first
//! argument to override the defaults.

use space_ninja::consts::*;
use space_ninja::sim::{GameEvent, GamePhase, GameSimulation, TickInput, step};
use space_ninja::SimConfig;

/// Simulated time cap for one demo session (seconds)
const SESSION_LIMIT: f32 = 180.0;
/// Frame time the headless loop pretends the display runs at
const FRAME_DT: f32 = 1.0 / 144.0;

/// Driver state around the simulation
struct Game {
    sim: GameSimulation,
    input: TickInput,
    accumulator: f32,
    elapsed: f32,
}

impl Game {
    fn new(config: SimConfig) -> Self {
        Self {
            sim: GameSimulation::new(config),
            input: TickInput {
                start: true,
                demo_mode: true,
                ..Default::default()
            },
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;
        self.elapsed += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            step(&mut self.sim, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.switch_color = false;
        }

        for event in self.sim.drain_events() {
            match event {
                GameEvent::Scored { score } => log::info!("Score: {}", score),
                GameEvent::SpeedChanged { speed } => log::info!("Speed: {:.2}", speed),
                GameEvent::GameOver { final_score, grade } => {
                    log::info!("Final score {} - {}", final_score, grade)
                }
                other => log::trace!("{:?}", other),
            }
        }
    }
}

fn load_config() -> SimConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimConfig::default();
    };
    match SimConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Could not load config {}: {} - using defaults", path, e);
            SimConfig::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Space Ninja (headless) starting...");

    let mut game = Game::new(load_config());
    while game.elapsed < SESSION_LIMIT {
        game.update(FRAME_DT);
        if game.sim.phase() == GamePhase::GameOver {
            break;
        }
    }

    match game.sim.result() {
        Some(result) => println!("Game over: {} ({})", result.final_score, result.grade),
        None => println!(
            "Still running after {:.0}s with score {}",
            game.elapsed,
            game.sim.score()
        ),
    }

    match serde_json::to_string_pretty(&game.sim.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
