//! Electrostatic-style force field
//!
//! Force on A from B: `k * qA * qB / d^2` along the displacement from B to A.
//! Positive means "away from B", so like charges repel and opposite charges
//! attract. Inside `min_distance` the magnitude is softened by
//! `(d / min_distance)^5`, which takes the force smoothly to zero at
//! coincidence instead of diverging.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::try_unit_vector;
use crate::tuning::PhysicsTuning;

/// Coulomb constant and softening radius for one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceLaw {
    pub k: f32,
    pub min_distance: f32,
}

impl ForceLaw {
    pub fn from_tuning(tuning: &PhysicsTuning) -> Self {
        Self {
            k: tuning.coulomb_k,
            min_distance: tuning.min_force_distance,
        }
    }

    /// Force on charge A at `pos_a` due to charge B at `pos_b`
    ///
    /// Coincident positions have no direction and yield zero.
    pub fn force_on(&self, charge_a: f32, pos_a: Vec2, charge_b: f32, pos_b: Vec2) -> Vec2 {
        let displacement = pos_a - pos_b;
        let Some(dir) = try_unit_vector(displacement) else {
            return Vec2::ZERO;
        };
        let distance = displacement.length();

        // Field magnitude of B evaluated at A. The softened branch is
        // k*q/d^2 * (d/min)^5 folded into one expression so tiny separations
        // cannot produce inf * 0.
        let field = if distance < self.min_distance {
            self.k * charge_b * distance.powi(3) / self.min_distance.powi(5)
        } else {
            self.k * charge_b / (distance * distance)
        };

        dir * (field * charge_a)
    }
}

/// One source's contribution, kept for force-arrow rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    /// Id of the fixed charge producing this contribution
    pub source: u32,
    /// Sign of the source, for arrow coloring
    pub source_charge: f32,
    pub force: Vec2,
}

/// Free-function form of [`ForceLaw::force_on`]
pub fn force_on(
    law: &ForceLaw,
    charge_a: f32,
    pos_a: Vec2,
    charge_b: f32,
    pos_b: Vec2,
) -> Vec2 {
    law.force_on(charge_a, pos_a, charge_b, pos_b)
}

/// Per-source contributions on `body` at `pos` from every field source
pub fn field_samples(law: &ForceLaw, body: &Body, pos: Vec2, sources: &[Body]) -> Vec<FieldSample> {
    sources
        .iter()
        .filter(|s| s.kind.is_field_source() && s.id != body.id)
        .map(|s| FieldSample {
            source: s.id,
            source_charge: s.charge,
            force: law.force_on(body.charge, pos, s.charge, s.pos),
        })
        .collect()
}

/// Vector sum of the contributions
pub fn net_force(samples: &[FieldSample]) -> Vec2 {
    samples.iter().fold(Vec2::ZERO, |acc, s| acc + s.force)
}

/// Store the diagnostics on the body: non-zero contributions and their sum
pub fn record_forces(body: &mut Body, samples: &[FieldSample]) -> Vec2 {
    let combined = net_force(samples);
    body.force_vectors.clear();
    body.force_vectors
        .extend(samples.iter().map(|s| s.force).filter(|f| *f != Vec2::ZERO));
    body.combined_force = combined;
    combined
}
