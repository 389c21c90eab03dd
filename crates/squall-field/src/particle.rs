//! Kinematic state of a single particle.

/// A single rain drop, snow flake or cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position of the leading corner.
    pub x: f32,
    /// Vertical position, growing downwards.
    pub y: f32,
    /// Length along the fall axis (rain) or diameter (snow, clouds).
    pub size: f32,
    /// Cross-axis extent. Streak width for rain, equal to `size` otherwise.
    pub breadth: f32,
    /// Horizontal velocity per step.
    pub dx: f32,
    /// Vertical velocity per step.
    pub dy: f32,
}

impl Particle {
    /// Move by one step of velocity.
    pub fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }
}
