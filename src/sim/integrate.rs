//! Constant-acceleration integrator with an acceleration ceiling
//!
//! There is no damping: velocity carries from step to step and the clamp is
//! the only thing that removes energy.

use glam::Vec2;

/// Rescale `accel` to `max` magnitude if it exceeds it, keeping direction
#[inline]
pub fn clamp_acceleration(accel: Vec2, max: f32) -> Vec2 {
    let magnitude = accel.length();
    if magnitude > max {
        accel * (max / magnitude)
    } else {
        accel
    }
}

/// Advance one step under a constant force
///
/// `a = clamp(F / m)`, `x' = x + v*dt + a*dt^2/2`, `v' = v + a*dt`.
/// Returns `(new_pos, new_vel)`.
pub fn integrate(
    pos: Vec2,
    vel: Vec2,
    force: Vec2,
    mass: f32,
    dt: f32,
    max_acceleration: f32,
) -> (Vec2, Vec2) {
    let accel = clamp_acceleration(force / mass, max_acceleration);
    let new_pos = pos + vel * dt + 0.5 * accel * dt * dt;
    let new_vel = vel + accel * dt;
    (new_pos, new_vel)
}

/// Splits a frame delta into fixed-size steps, the last one taking the remainder
#[derive(Debug, Clone, Copy)]
pub struct SubSteps {
    remaining: f32,
    step: f32,
}

impl SubSteps {
    /// Yields nothing for a non-positive or non-finite `total` or `step`
    pub fn new(total: f32, step: f32) -> Self {
        let usable = total.is_finite() && step.is_finite() && step > 0.0;
        let remaining = if usable { total.max(0.0) } else { 0.0 };
        Self { remaining, step }
    }
}

impl Iterator for SubSteps {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        // Ignore float dust left after the last full step
        if self.remaining <= self.step * 1e-4 {
            return None;
        }
        let h = self.remaining.min(self.step);
        self.remaining -= h;
        Some(h)
    }
}
