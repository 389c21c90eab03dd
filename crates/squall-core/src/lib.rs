//! Core types shared by the squall crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted fall direction in degrees (drifting right).
pub const MIN_DIRECTION: i32 = 0;

/// Highest accepted fall direction in degrees (drifting left).
pub const MAX_DIRECTION: i32 = 180;

/// Straight down.
pub const VERTICAL_DIRECTION: i32 = 90;

/// The kind of particle a field is made of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Rain,
    #[default]
    Snow,
    Cloud,
    CloudDark,
}

impl ParticleKind {
    /// Cycle to the next particle kind.
    pub fn next(self) -> Self {
        match self {
            ParticleKind::Rain => ParticleKind::Snow,
            ParticleKind::Snow => ParticleKind::Cloud,
            ParticleKind::Cloud => ParticleKind::CloudDark,
            ParticleKind::CloudDark => ParticleKind::Rain,
        }
    }

    /// Whether particles of this kind drift horizontally only.
    pub fn is_cloud(self) -> bool {
        matches!(self, ParticleKind::Cloud | ParticleKind::CloudDark)
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Rain => "rain",
            ParticleKind::Snow => "snow",
            ParticleKind::Cloud => "cloud",
            ParticleKind::CloudDark => "dark cloud",
        }
    }
}

/// Playback state of a particle field run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationState {
    Play,
    Pause,
    #[default]
    Stop,
}

/// Size of the surface particles move across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reject negative or non-finite dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Errors raised when a field is configured with out of range values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Direction outside of 0..=180 degrees.
    #[error("invalid direction {0}: must be between 0 and 180")]
    InvalidDirection(i32),

    /// Negative or non-finite speed.
    #[error("invalid speed {0}: must be a finite value of zero or greater")]
    InvalidSpeed(f32),

    /// Unit scale that is not a finite positive value.
    #[error("invalid unit scale {0}: must be a finite value greater than zero")]
    InvalidUnitScale(f32),

    /// Negative or non-finite bounds.
    #[error("invalid bounds {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
}

/// Parameters of one particle field run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles spawned.
    pub count: usize,
    /// Base speed in length units per step.
    pub speed: f32,
    /// Fall direction in degrees, 0 is rightwards, 90 straight down, 180 leftwards.
    pub direction: i32,
    /// Particle kind.
    pub kind: ParticleKind,
    /// Field units per density independent length unit (rain and snow sizes).
    pub unit_scale: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 200,
            speed: 5.0,
            direction: VERTICAL_DIRECTION,
            kind: ParticleKind::default(),
            unit_scale: 1.0,
        }
    }
}

impl FieldConfig {
    /// Check direction, speed and unit scale ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DIRECTION..=MAX_DIRECTION).contains(&self.direction) {
            return Err(ConfigError::InvalidDirection(self.direction));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(ConfigError::InvalidUnitScale(self.unit_scale));
        }
        Ok(())
    }
}
