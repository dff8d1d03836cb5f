//! Body model
//!
//! One struct for every simulation entity. The kind decides what a body can
//! do (move, drag, collide); the shape decides how it is tested for overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What role a body plays in the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// The single player-steered particle
    MobileCharge,
    /// Stationary source of the force field
    FixedCharge,
    /// Rectangle that ends the run in a loss
    Obstacle,
    /// Rectangle that ends the run in a win
    Goal,
}

impl BodyKind {
    pub fn is_circular(self) -> bool {
        matches!(self, BodyKind::MobileCharge | BodyKind::FixedCharge)
    }

    pub fn is_rectangular(self) -> bool {
        matches!(self, BodyKind::Obstacle | BodyKind::Goal)
    }

    /// Integrated and collision-checked each tick
    pub fn is_mobile(self) -> bool {
        self == BodyKind::MobileCharge
    }

    /// Pointer input may reposition it between runs
    pub fn is_draggable(self) -> bool {
        self.is_circular()
    }

    /// Contributes to the force field acting on the mobile charge
    pub fn is_field_source(self) -> bool {
        self == BodyKind::FixedCharge
    }
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Extends right/down from the body position (top-left corner)
    Rect { width: f32, height: f32 },
}

/// A simulation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub name: String,
    pub kind: BodyKind,
    pub shape: Shape,
    /// Center for circles, top-left corner for rectangles
    pub pos: Vec2,
    pub vel: Vec2,
    /// Signed; like charges repel
    pub charge: f32,
    pub mass: f32,
    /// Last per-source force contributions (diagnostic only)
    #[serde(skip)]
    pub force_vectors: Vec<Vec2>,
    /// Last net force (diagnostic only)
    #[serde(skip)]
    pub combined_force: Vec2,
}

impl Body {
    fn new(id: u32, name: impl Into<String>, kind: BodyKind, shape: Shape, pos: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            shape,
            pos,
            vel: Vec2::ZERO,
            charge: 0.0,
            mass: 0.0,
            force_vectors: Vec::new(),
            combined_force: Vec2::ZERO,
        }
    }

    /// The player's charge. `mass` must be positive.
    pub fn mobile(id: u32, pos: Vec2, charge: f32, mass: f32, radius: f32) -> Self {
        debug_assert!(mass > 0.0, "mobile charge needs positive mass");
        let mut body = Self::new(id, "Mobile", BodyKind::MobileCharge, Shape::Circle { radius }, pos);
        body.charge = charge;
        body.mass = mass;
        body
    }

    pub fn fixed_charge(id: u32, name: impl Into<String>, pos: Vec2, charge: f32, radius: f32) -> Self {
        let mut body = Self::new(id, name, BodyKind::FixedCharge, Shape::Circle { radius }, pos);
        body.charge = charge;
        body.mass = crate::consts::FIXED_MASS;
        body
    }

    pub fn obstacle(id: u32, name: impl Into<String>, top_left: Vec2, size: Vec2) -> Self {
        Self::new(
            id,
            name,
            BodyKind::Obstacle,
            Shape::Rect { width: size.x, height: size.y },
            top_left,
        )
    }

    pub fn goal(id: u32, name: impl Into<String>, top_left: Vec2, size: Vec2) -> Self {
        Self::new(
            id,
            name,
            BodyKind::Goal,
            Shape::Rect { width: size.x, height: size.y },
            top_left,
        )
    }

    /// Circle radius, zero for rectangles
    pub fn radius(&self) -> f32 {
        match self.shape {
            Shape::Circle { radius } => radius,
            Shape::Rect { .. } => 0.0,
        }
    }

    /// Rectangle extent, `None` for circles
    pub fn rect_size(&self) -> Option<Vec2> {
        match self.shape {
            Shape::Rect { width, height } => Some(Vec2::new(width, height)),
            Shape::Circle { .. } => None,
        }
    }

    /// Drop the diagnostic vectors
    pub fn clear_forces(&mut self) {
        self.force_vectors.clear();
        self.combined_force = Vec2::ZERO;
    }
}
