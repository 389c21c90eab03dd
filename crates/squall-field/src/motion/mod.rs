//! Per-kind spawn, exit and re-entry rules.

mod cloud;
mod rain;
mod snow;

use rand::{Rng, distr::weighted};
use squall_core::{Bounds, FieldConfig, ParticleKind};

use crate::{entry_line::EntryLine, heading::Heading, particle::Particle, size_table::SizeTable};

/// Everything the motion rules read about a field. Fixed for one run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Geometry {
    pub speed: f32,
    pub unit_scale: f32,
    pub heading: Heading,
    pub bounds: Bounds,
    pub entry: EntryLine,
}

impl Geometry {
    pub fn new(config: &FieldConfig, bounds: Bounds) -> Self {
        let heading = Heading::from_degrees(config.direction);
        Self {
            speed: config.speed,
            unit_scale: config.unit_scale,
            heading,
            bounds,
            entry: EntryLine::derive(&heading, bounds),
        }
    }

    /// Uniform position inside the field.
    fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> (f32, f32) {
        (
            rng.random_range(0.0..=self.bounds.width),
            rng.random_range(0.0..=self.bounds.height),
        )
    }

    /// Uniform point on the entry line.
    fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> (f32, f32) {
        self.entry.point_at(rng.random_range(0.0..=1.0))
    }
}

/// Motion rules of one particle kind, chosen once per field.
#[derive(Debug, Clone)]
pub(crate) enum Motion {
    Rain,
    Snow(SizeTable),
    Cloud(SizeTable),
}

impl Motion {
    pub fn for_kind(kind: ParticleKind) -> Result<Self, weighted::Error> {
        Ok(match kind {
            ParticleKind::Rain => Motion::Rain,
            ParticleKind::Snow => Motion::Snow(SizeTable::snow()?),
            ParticleKind::Cloud | ParticleKind::CloudDark => Motion::Cloud(SizeTable::cloud()?),
        })
    }

    pub fn spawn<R: Rng + ?Sized>(&self, geometry: &Geometry, rng: &mut R) -> Particle {
        match self {
            Motion::Rain => rain::spawn(geometry, rng),
            Motion::Snow(sizes) => snow::spawn(sizes, geometry, rng),
            Motion::Cloud(divisors) => cloud::spawn(divisors, geometry, rng),
        }
    }

    /// Whether the particle has left the visible field.
    pub fn has_exited(&self, p: &Particle, geometry: &Geometry) -> bool {
        let Bounds { width, height } = geometry.bounds;
        let heading = &geometry.heading;

        if p.y > height
            || (heading.to_left && p.x < -p.size)
            || (!heading.to_left && p.x > width + p.size)
        {
            return true;
        }

        // vertical clouds may sway either way
        matches!(self, Motion::Cloud(_))
            && heading.vertical
            && ((p.dx > 0.0 && p.x > width + p.size) || (p.dx < 0.0 && p.x < -p.size))
    }

    pub fn respawn<R: Rng + ?Sized>(&self, p: &mut Particle, geometry: &Geometry, rng: &mut R) {
        match self {
            Motion::Rain => rain::respawn(p, geometry, rng),
            Motion::Snow(_) => snow::respawn(p, geometry, rng),
            Motion::Cloud(_) => cloud::respawn(p, geometry, rng),
        }
    }
}
