//! Collision detection for circles against axis-aligned rectangles
//!
//! The mobile charge is a circle; obstacles, walls and goals are
//! rectangles anchored at their top-left corner.

use glam::Vec2;

use super::body::{Body, Shape};
use crate::clamp;

/// Check overlap between a circle and an axis-aligned rectangle
///
/// The closest point of the rectangle to the circle center is found by
/// clamping each axis independently. Tangency (distance == radius) is not an
/// overlap.
pub fn circle_rect_overlap(
    circle_center: Vec2,
    circle_radius: f32,
    rect_top_left: Vec2,
    rect_width: f32,
    rect_height: f32,
) -> bool {
    let closest = Vec2::new(
        clamp(circle_center.x, rect_top_left.x, rect_top_left.x + rect_width),
        clamp(circle_center.y, rect_top_left.y, rect_top_left.y + rect_height),
    );
    circle_center.distance_squared(closest) < circle_radius * circle_radius
}

/// Overlap of a circular body against a rectangular one
///
/// Any other shape pairing never overlaps.
pub fn body_overlaps(circle: &Body, rect: &Body) -> bool {
    match (circle.shape, rect.shape) {
        (Shape::Circle { radius }, Shape::Rect { width, height }) => {
            circle_rect_overlap(circle.pos, radius, rect.pos, width, height)
        }
        _ => false,
    }
}

/// First rectangle in `rects` the circle overlaps
pub fn first_overlap<'a>(circle: &Body, rects: &'a [Body]) -> Option<&'a Body> {
    rects.iter().find(|rect| body_overlaps(circle, rect))
}

/// Pointer hit-test against a circular body (edge inclusive)
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}
