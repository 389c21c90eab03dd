//! Direction of travel derived from a fall angle.

use rand::Rng;
use squall_core::VERTICAL_DIRECTION;

/// Unit direction vector and the flags derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    /// Fall angle in degrees.
    pub degrees: i32,
    pub cos: f32,
    pub sin: f32,
    /// Particles travel leftwards (angle above 90).
    pub to_left: bool,
    /// Particles fall straight down (angle exactly 90).
    pub vertical: bool,
}

impl Heading {
    /// Build the heading for an angle in degrees.
    pub fn from_degrees(degrees: i32) -> Self {
        let radians = f64::from(degrees).to_radians();
        Self {
            degrees,
            cos: radians.cos() as f32,
            sin: radians.sin() as f32,
            to_left: degrees > VERTICAL_DIRECTION,
            vertical: degrees == VERTICAL_DIRECTION,
        }
    }

    /// Rotation of a rain streak relative to upright, in degrees.
    pub fn tilt_degrees(&self) -> f32 {
        (self.degrees - VERTICAL_DIRECTION) as f32
    }

    /// Random horizontal sway used while falling straight down.
    ///
    /// Ranges over `(20 - 30·sin .. 40 - 30·sin) / divisor`.
    pub fn jitter<R: Rng + ?Sized>(&self, rng: &mut R, divisor: f32) -> f32 {
        (rng.random_range(0..=20) as f32 + 20.0 - self.sin * 30.0) / divisor
    }
}
