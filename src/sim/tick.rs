//! Per-tick simulation step
//!
//! Advances the mobile charge through one frame of wall time: the frame is
//! split into fixed sub-steps, the net force is recomputed at the start of
//! each sub-step, and the body is tested against obstacles and goals after
//! every position update.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::first_overlap;
use super::field::{FieldSample, ForceLaw, field_samples, record_forces};
use super::integrate::{SubSteps, integrate};
use crate::tuning::PhysicsTuning;

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationOutcome {
    Continue,
    /// Mobile charge touched an obstacle or wall
    Lost,
    /// Mobile charge reached a goal
    Won,
}

impl SimulationOutcome {
    pub fn is_terminal(self) -> bool {
        self != SimulationOutcome::Continue
    }
}

/// Static bodies the mobile charge interacts with
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub charges: &'a [Body],
    pub obstacles: &'a [Body],
    pub goals: &'a [Body],
}

/// Inputs for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    /// Wall time since the previous tick (ms)
    pub dt: f32,
    /// Play/pause flag; when off only the force diagnostics are refreshed
    pub active: bool,
}

/// What a tick did
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub outcome: SimulationOutcome,
    /// Per-source forces at the mobile charge's final position
    pub samples: Vec<FieldSample>,
    /// Sub-steps actually integrated
    pub substeps: u32,
    /// Id of the obstacle or goal that ended the run
    pub contact: Option<u32>,
}

/// Obstacles win over goals when both overlap
fn classify(mobile: &Body, scene: &Scene) -> (SimulationOutcome, Option<u32>) {
    if let Some(hit) = first_overlap(mobile, scene.obstacles) {
        return (SimulationOutcome::Lost, Some(hit.id));
    }
    if let Some(goal) = first_overlap(mobile, scene.goals) {
        return (SimulationOutcome::Won, Some(goal.id));
    }
    (SimulationOutcome::Continue, None)
}

/// Advance the mobile charge by one tick
///
/// Never touches the scene's bodies. A paused tick recomputes the force
/// diagnostics at the current position and does nothing else.
pub fn simulate(
    mobile: &mut Body,
    scene: &Scene,
    tuning: &PhysicsTuning,
    input: &StepInput,
) -> StepReport {
    let law = ForceLaw::from_tuning(tuning);

    if !input.active {
        let samples = field_samples(&law, mobile, mobile.pos, scene.charges);
        record_forces(mobile, &samples);
        return StepReport {
            outcome: SimulationOutcome::Continue,
            samples,
            substeps: 0,
            contact: None,
        };
    }

    let dt = if input.dt > tuning.max_frame_dt {
        log::warn!("Frame delta {:.1} clamped to {:.1}", input.dt, tuning.max_frame_dt);
        tuning.max_frame_dt
    } else {
        input.dt
    };

    let mut substeps = 0;
    let mut result = (SimulationOutcome::Continue, None);
    for h in SubSteps::new(dt, tuning.substep) {
        let samples = field_samples(&law, mobile, mobile.pos, scene.charges);
        let force: Vec2 = record_forces(mobile, &samples) * tuning.force_scale;

        let (pos, vel) = integrate(
            mobile.pos,
            mobile.vel,
            force,
            mobile.mass,
            tuning.step_fraction(h),
            tuning.max_acceleration,
        );
        mobile.pos = pos;
        mobile.vel = vel;
        substeps += 1;

        result = classify(mobile, scene);
        if result.0.is_terminal() {
            break;
        }
    }

    // A zero-length frame still reports where the body stands
    if substeps == 0 {
        result = classify(mobile, scene);
    }

    let samples = field_samples(&law, mobile, mobile.pos, scene.charges);
    record_forces(mobile, &samples);

    StepReport {
        outcome: result.0,
        samples,
        substeps,
        contact: result.1,
    }
}
