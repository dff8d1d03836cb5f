//! Game state and the run state machine
//!
//! `Idle -> Running -> {Won, Lost}`, with `Paused` for a stopped run and
//! `reset` returning to `Idle` from anywhere. Terminal phases are sticky:
//! ticks do nothing until the game is reset or a level is selected.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::point_in_circle;
use super::field::FieldSample;
use super::tick::{Scene, SimulationOutcome, StepInput, simulate};
use crate::consts::*;
use crate::error::{Result, SimError};
use crate::level::{LevelData, LevelSet, boundary_walls};
use crate::tuning::PhysicsTuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh level or after reset; bodies may be dragged
    Idle,
    /// Simulation advancing every tick
    Running,
    /// Run stopped mid-way; position and velocity kept
    Paused,
    Won,
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Signals for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Stopped,
    Won,
    Lost,
    Reset,
    LevelSelected(usize),
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub tuning: PhysicsTuning,
    levels: LevelSet,
    level_index: usize,
    /// Spawn point of the current level
    start: Vec2,
    /// The one body that moves
    pub mobile: Body,
    pub charges: Vec<Body>,
    /// Level obstacles followed by the boundary walls
    pub obstacles: Vec<Body>,
    pub goals: Vec<Body>,
    /// Per-source forces on the mobile charge from the latest tick or refresh
    pub samples: Vec<FieldSample>,
    /// Simulation ticks while running, since the last reset
    pub time_ticks: u64,
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a game on the first level of `levels`
    ///
    /// Every spawn point must be clear of obstacles at the tuned collision radius.
    pub fn new(levels: LevelSet, tuning: PhysicsTuning) -> Result<Self> {
        tuning.validate()?;
        levels.validate_with_radius(tuning.collision_radius)?;
        Ok(Self::build(levels, tuning))
    }

    /// Bundled levels with default tuning
    pub fn bundled() -> Self {
        Self::build(LevelSet::bundled(), PhysicsTuning::default())
    }

    fn build(levels: LevelSet, tuning: PhysicsTuning) -> Self {
        let radius = tuning.collision_radius;
        let mut state = Self {
            phase: GamePhase::Idle,
            tuning,
            levels,
            level_index: 0,
            start: MOBILE_START,
            mobile: Body::mobile(0, MOBILE_START, MOBILE_CHARGE, MOBILE_MASS, radius),
            charges: Vec::new(),
            obstacles: Vec::new(),
            goals: Vec::new(),
            samples: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.load_level(0);
        state.reset();
        state.events.clear();
        state
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace every body with the layout of level `index` (must exist)
    fn load_level(&mut self, index: usize) {
        let Some(level) = self.levels.get(index).cloned() else {
            return;
        };
        let LevelData { name, difficulty, start, obstacles, goals, charges } = level;
        log::info!("Loading level {} '{}' ({:?})", index, name, difficulty);

        let radius = self.tuning.collision_radius;
        let mobile_id = self.next_entity_id();
        self.mobile = Body::mobile(mobile_id, start, MOBILE_CHARGE, MOBILE_MASS, radius);
        self.start = start;

        self.charges = charges
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let id = self.next_entity_id();
                let label = if c.charge >= 0.0 { "Positive" } else { "Negative" };
                Body::fixed_charge(id, format!("{} {}", label, i + 1), c.pos(), c.charge, radius)
            })
            .collect();

        let mut rects = Vec::with_capacity(obstacles.len() + 4);
        for (i, r) in obstacles.iter().enumerate() {
            let id = self.next_entity_id();
            rects.push(Body::obstacle(id, format!("Collider {}", i + 1), r.top_left(), r.size()));
        }
        for (i, r) in boundary_walls().iter().enumerate() {
            let id = self.next_entity_id();
            rects.push(Body::obstacle(id, format!("Bound {}", i + 1), r.top_left(), r.size()));
        }
        self.obstacles = rects;

        self.goals = goals
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let id = self.next_entity_id();
                Body::goal(id, format!("Goal {}", i + 1), r.top_left(), r.size())
            })
            .collect();

        self.level_index = index;
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> Option<&LevelData> {
        self.levels.get(self.level_index)
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Spawn point the mobile charge returns to on reset
    pub fn start_position(&self) -> Vec2 {
        self.start
    }

    /// Outcome implied by the current phase
    pub fn outcome(&self) -> SimulationOutcome {
        match self.phase {
            GamePhase::Won => SimulationOutcome::Won,
            GamePhase::Lost => SimulationOutcome::Lost,
            _ => SimulationOutcome::Continue,
        }
    }

    /// Begin or resume the run
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Idle | GamePhase::Paused => {
                log::debug!("{:?} -> Running", self.phase);
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Started);
            }
            GamePhase::Running => {}
            GamePhase::Won | GamePhase::Lost => {
                log::warn!("start ignored in {:?}; reset first", self.phase);
            }
        }
    }

    /// Pause the run, keeping position and velocity
    pub fn stop(&mut self) {
        if self.phase == GamePhase::Running {
            log::debug!("Running -> Paused");
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Stopped);
        }
    }

    /// Advance one frame of `dt` ms of wall time
    pub fn tick(&mut self, dt: f32) -> SimulationOutcome {
        if self.phase != GamePhase::Running {
            return self.outcome();
        }
        self.time_ticks += 1;

        let scene = Scene {
            charges: &self.charges,
            obstacles: &self.obstacles,
            goals: &self.goals,
        };
        let report = simulate(&mut self.mobile, &scene, &self.tuning, &StepInput { dt, active: true });
        self.samples = report.samples;

        match report.outcome {
            SimulationOutcome::Continue => {}
            SimulationOutcome::Lost => {
                log::info!(
                    "Run lost on level {} after {} ticks (hit body {:?})",
                    self.level_index,
                    self.time_ticks,
                    report.contact
                );
                self.phase = GamePhase::Lost;
                self.events.push(GameEvent::Lost);
            }
            SimulationOutcome::Won => {
                log::info!(
                    "Run won on level {} after {} ticks",
                    self.level_index,
                    self.time_ticks
                );
                self.phase = GamePhase::Won;
                self.events.push(GameEvent::Won);
            }
        }
        report.outcome
    }

    /// Recompute the force diagnostics without moving anything
    pub fn refresh_field(&mut self) {
        let scene = Scene {
            charges: &self.charges,
            obstacles: &self.obstacles,
            goals: &self.goals,
        };
        let report = simulate(&mut self.mobile, &scene, &self.tuning, &StepInput::default());
        self.samples = report.samples;
    }

    /// Respawn the mobile charge at rest on its start position and return to Idle
    ///
    /// Fixed charges keep wherever they were dragged.
    pub fn reset(&mut self) {
        log::debug!("{:?} -> Idle (reset)", self.phase);
        self.mobile.pos = self.start;
        self.mobile.vel = Vec2::ZERO;
        self.mobile.clear_forces();
        self.phase = GamePhase::Idle;
        self.time_ticks = 0;
        self.events.push(GameEvent::Reset);
        self.refresh_field();
    }

    /// Try the current level again
    pub fn retry(&mut self) {
        self.reset();
    }

    /// Switch level; an unknown index leaves the current level untouched
    pub fn select_level(&mut self, index: usize) -> Result<()> {
        if index >= self.levels.len() {
            log::warn!("Rejected selection of unknown level {}", index);
            return Err(SimError::UnknownLevel {
                index,
                count: self.levels.len(),
            });
        }
        self.load_level(index);
        self.events.push(GameEvent::LevelSelected(index));
        self.reset();
        Ok(())
    }

    /// Advance to the following level, wrapping after the last one
    pub fn next_level(&mut self) -> Result<()> {
        let next = (self.level_index + 1)
            .checked_rem(self.levels.len())
            .unwrap_or_default();
        self.select_level(next)
    }

    /// Every body in draw order: mobile, charges, obstacles, goals
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.mobile)
            .chain(self.charges.iter())
            .chain(self.obstacles.iter())
            .chain(self.goals.iter())
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies().find(|b| b.id == id)
    }

    /// Draggable body under the pointer; the mobile charge is checked first
    pub fn body_at(&self, point: Vec2) -> Option<u32> {
        std::iter::once(&self.mobile)
            .chain(self.charges.iter())
            .find(|b| b.kind.is_draggable() && point_in_circle(point, b.pos, b.radius()))
            .map(|b| b.id)
    }

    /// Reposition a charge from pointer input
    ///
    /// Fixed charges move in any phase but `Running`; the mobile charge only
    /// before the run starts (`Idle`). Velocity is never touched.
    pub fn move_body(&mut self, id: u32, pos: Vec2) -> Result<()> {
        if self.phase == GamePhase::Running {
            return Err(SimError::RunInProgress);
        }
        if self.mobile.id == id {
            if self.phase != GamePhase::Idle {
                log::warn!("Rejected drag of the mobile charge in {:?}", self.phase);
                return Err(SimError::RunInProgress);
            }
            self.mobile.pos = pos;
        } else if let Some(body) = self.charges.iter_mut().find(|b| b.id == id) {
            body.pos = pos;
        } else if self.body(id).is_some() {
            return Err(SimError::NotDraggable(id));
        } else {
            return Err(SimError::UnknownBody(id));
        }
        self.refresh_field();
        Ok(())
    }

    /// Hand queued events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::bundled()
    }
}
