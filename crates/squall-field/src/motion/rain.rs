//! Rain streaks: long, thin and fast.

use rand::Rng;

use super::Geometry;
use crate::particle::Particle;

pub(super) fn spawn<R: Rng + ?Sized>(geometry: &Geometry, rng: &mut R) -> Particle {
    let size = (20.0 + geometry.speed * 2.0) * geometry.unit_scale;
    // one streak in six is drawn twice as wide
    let breadth = (if rng.random_range(0..=5) == 0 { 2.0 } else { 1.0 }) * geometry.unit_scale;
    let (x, y) = geometry.random_position(rng);
    let velocity = geometry.speed + 15.0;

    Particle {
        x,
        y,
        size,
        breadth,
        dx: velocity * geometry.heading.cos,
        dy: velocity * geometry.heading.sin,
    }
}

pub(super) fn respawn<R: Rng + ?Sized>(p: &mut Particle, geometry: &Geometry, rng: &mut R) {
    (p.x, p.y) = geometry.random_entry(rng);
}
