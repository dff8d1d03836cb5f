//! Ion Drift - a charged-particle puzzle sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (force field, integration, collisions, game state)
//! - `level`: Level data, boundary walls and bundled levels
//! - `tuning`: Data-driven physics constants
//! - `error`: Error type shared by the fallible operations

pub mod error;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::{Result, SimError};
pub use level::{Difficulty, LevelData, LevelSet};
pub use tuning::PhysicsTuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Thickness of the four boundary walls
    pub const WALL_THICKNESS: f32 = 5.0;

    /// Collision radius shared by all circular bodies
    pub const CHARGE_RADIUS: f32 = 10.0;

    /// Mobile charge defaults
    pub const MOBILE_START: Vec2 = Vec2::new(100.0, 300.0);
    pub const MOBILE_CHARGE: f32 = 1.0;
    pub const MOBILE_MASS: f32 = 25.0;

    /// Fixed charge defaults
    pub const FIXED_CHARGE: f32 = -1.0;
    pub const FIXED_MASS: f32 = 1.0;

    /// Coulomb-like constant (tuned for feel, not physics)
    pub const COULOMB_K: f32 = 8.99e9;
    /// Converts Coulomb-scale forces into play-field units per reference step
    pub const FORCE_SCALE: f32 = 1e-7;
    /// Below this separation the field is softened
    pub const MIN_FORCE_DISTANCE: f32 = 20.0;
    /// Hard ceiling on acceleration magnitude (units per step squared)
    ///
    /// A unit charge pair reaches it at about 42 units apart; the softened
    /// peak is roughly 0.09.
    pub const MAX_ACCELERATION: f32 = 0.02;

    /// Integration sub-step (time units; one unit = one millisecond of wall time)
    pub const SUBSTEP: f32 = 0.25;
    /// Step length the force scale is calibrated against
    pub const REFERENCE_STEP: f32 = 1.0;
    /// Largest frame delta accepted by a tick (ms); longer stalls are clamped
    pub const MAX_FRAME_DT: f32 = 100.0;
}

/// Scale `v` to unit length.
///
/// The zero vector has no direction: the result is non-finite. Use
/// [`try_unit_vector`] unless the input is known to be non-zero.
#[inline]
pub fn unit_vector(v: Vec2) -> Vec2 {
    v / v.length()
}

/// Unit vector in the direction of `v`, or `None` for a zero (or non-finite) vector
#[inline]
pub fn try_unit_vector(v: Vec2) -> Option<Vec2> {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// Clamp `value` into `[min, max]`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
