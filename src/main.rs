//! Ion Drift entry point
//!
//! Headless driver: plays every level with its default charge layout at a
//! fixed 60 Hz frame delta and reports how each run ends. Rendering and
//! pointer input live outside this crate.
//!
//! Usage: `ion-drift [levels.json] [tuning.json]`

use std::process::ExitCode;

use ion_drift::sim::{GameEvent, GameState, SimulationOutcome};
use ion_drift::{LevelSet, PhysicsTuning, Result};

/// Frame delta of a 60 Hz display (ms)
const FRAME_DT: f32 = 1000.0 / 60.0;
/// Give up on a run after this many frames (one minute)
const MAX_FRAMES: u32 = 60 * 60;

fn load(args: &[String]) -> Result<GameState> {
    let levels = match args.first() {
        Some(path) => LevelSet::from_json(&std::fs::read_to_string(path)?)?,
        None => LevelSet::bundled(),
    };
    let tuning = match args.get(1) {
        Some(path) => PhysicsTuning::from_json(&std::fs::read_to_string(path)?)?,
        None => PhysicsTuning::default(),
    };
    GameState::new(levels, tuning)
}

fn run_level(state: &mut GameState) -> (SimulationOutcome, u32) {
    state.start();
    for frame in 1..=MAX_FRAMES {
        let outcome = state.tick(FRAME_DT);
        if outcome.is_terminal() {
            return (outcome, frame);
        }
    }
    state.stop();
    (SimulationOutcome::Continue, MAX_FRAMES)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ion Drift (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut state = match load(&args) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for index in 0..state.levels().len() {
        if let Err(e) = state.select_level(index) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
        let (outcome, frames) = run_level(&mut state);
        let name = state.level().map(|l| l.name.clone()).unwrap_or_default();
        let pos = state.mobile.pos;
        println!(
            "level {} '{}': {:?} after {} frames at ({:.1}, {:.1})",
            index + 1,
            name,
            outcome,
            frames,
            pos.x,
            pos.y
        );

        for event in state.drain_events() {
            log::debug!("event: {:?}", event);
            if event == GameEvent::Won {
                log::info!("Level {} solved by the default layout", index + 1);
            }
        }
    }

    ExitCode::SUCCESS
}
