//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick(dt)`
//! - Stable iteration order (level order, then boundary walls)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod field;
pub mod integrate;
pub mod state;
pub mod tick;

pub use body::{Body, BodyKind, Shape};
pub use collision::{body_overlaps, circle_rect_overlap, first_overlap, point_in_circle};
pub use field::{FieldSample, ForceLaw, field_samples, force_on, net_force, record_forces};
pub use integrate::{SubSteps, clamp_acceleration, integrate};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Scene, SimulationOutcome, StepInput, StepReport, simulate};
