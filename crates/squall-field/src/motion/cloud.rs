//! Clouds: drift horizontally in the top third of the field.

use rand::Rng;

use super::Geometry;
use crate::{particle::Particle, size_table::SizeTable};

/// Divisor for the sway of straight-down clouds.
const SWAY_DIVISOR: f32 = 40.0;

fn vertical_drift(size: f32, geometry: &Geometry, jitter: f32) -> f32 {
    ((size / 100.0 * geometry.speed * geometry.heading.cos) + geometry.speed * jitter) / 10.0
}

fn random_band_y<R: Rng + ?Sized>(geometry: &Geometry, rng: &mut R) -> f32 {
    rng.random_range(0.0..=geometry.bounds.height / 3.0)
}

pub(super) fn spawn<R: Rng + ?Sized>(
    divisors: &SizeTable,
    geometry: &Geometry,
    rng: &mut R,
) -> Particle {
    let size = geometry.bounds.width / divisors.sample(rng);
    let x = rng.random_range(0.0..=geometry.bounds.width);
    let y = random_band_y(geometry, rng);
    let dx = if geometry.heading.vertical {
        let jitter = geometry.heading.jitter(rng, SWAY_DIVISOR);
        vertical_drift(size, geometry, jitter)
    } else {
        size / 1000.0 * geometry.speed * geometry.heading.cos
    };

    Particle {
        x,
        y,
        size,
        breadth: size,
        dx,
        dy: 0.0,
    }
}

pub(super) fn respawn<R: Rng + ?Sized>(p: &mut Particle, geometry: &Geometry, rng: &mut R) {
    let width = geometry.bounds.width;
    let jitter = geometry.heading.jitter(rng, SWAY_DIVISOR);

    if geometry.heading.vertical {
        p.dx = vertical_drift(p.size, geometry, jitter);
        // enter from the side it is drifting away from
        p.x = if jitter > 0.0 { -p.size } else { width };
    } else {
        p.x = if geometry.heading.to_left { width } else { -p.size };
    }
    p.y = random_band_y(geometry, rng);
}
