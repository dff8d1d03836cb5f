//! Data-driven physics tuning
//!
//! Every gameplay constant the simulation reads lives in [`PhysicsTuning`].
//! Defaults mirror [`crate::consts`]; a JSON document may override any
//! subset of fields, missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Runtime-tunable physics constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Coulomb-like constant
    pub coulomb_k: f32,
    /// Force-to-play-field conversion, calibrated for one reference step
    pub force_scale: f32,
    /// Softening threshold for the near field
    pub min_force_distance: f32,
    /// Acceleration ceiling applied every sub-step
    pub max_acceleration: f32,
    /// Sub-step length (time units)
    pub substep: f32,
    /// Step length `force_scale` was calibrated against
    pub reference_step: f32,
    /// Frame delta clamp (time units)
    pub max_frame_dt: f32,
    /// Collision radius of circular bodies
    pub collision_radius: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            coulomb_k: COULOMB_K,
            force_scale: FORCE_SCALE,
            min_force_distance: MIN_FORCE_DISTANCE,
            max_acceleration: MAX_ACCELERATION,
            substep: SUBSTEP,
            reference_step: REFERENCE_STEP,
            max_frame_dt: MAX_FRAME_DT,
            collision_radius: CHARGE_RADIUS,
        }
    }
}

impl PhysicsTuning {
    /// Parse and validate tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded physics tuning overrides");
        Ok(tuning)
    }

    /// Reject values that would break the integrator or the force law
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("coulomb_k", self.coulomb_k),
            ("force_scale", self.force_scale),
            ("min_force_distance", self.min_force_distance),
            ("max_acceleration", self.max_acceleration),
            ("substep", self.substep),
            ("reference_step", self.reference_step),
            ("max_frame_dt", self.max_frame_dt),
            ("collision_radius", self.collision_radius),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidTuning { field, value });
            }
        }
        Ok(())
    }

    /// Integration `dt` of one sub-step of length `step`
    ///
    /// Time measured in `reference_step` units, the step `force_scale` was
    /// calibrated against. Summed over a tick's sub-steps it equals the
    /// tick's own length, so the impulse does not depend on the sub-step size.
    #[inline]
    pub fn step_fraction(&self, step: f32) -> f32 {
        step / self.reference_step
    }
}
