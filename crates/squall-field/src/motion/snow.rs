//! Snow flakes: size-dependent fall speed with sway when falling straight.

use rand::Rng;

use super::Geometry;
use crate::{particle::Particle, size_table::SizeTable};

fn drift<R: Rng + ?Sized>(size: f32, geometry: &Geometry, rng: &mut R) -> f32 {
    let heading = &geometry.heading;
    let base = size * geometry.speed * heading.cos / 40.0;
    if heading.vertical {
        base + geometry.speed * heading.jitter(rng, 80.0)
    } else {
        base
    }
}

pub(super) fn spawn<R: Rng + ?Sized>(sizes: &SizeTable, geometry: &Geometry, rng: &mut R) -> Particle {
    let size = (4.0 + sizes.sample(rng)) * geometry.unit_scale;
    let (x, y) = geometry.random_position(rng);

    Particle {
        x,
        y,
        size,
        breadth: size,
        dx: drift(size, geometry, rng),
        dy: size * geometry.speed * geometry.heading.sin / 40.0,
    }
}

pub(super) fn respawn<R: Rng + ?Sized>(p: &mut Particle, geometry: &Geometry, rng: &mut R) {
    if geometry.heading.vertical {
        p.dx = drift(p.size, geometry, rng);
    }
    (p.x, p.y) = geometry.random_entry(rng);
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use squall_core::{Bounds, FieldConfig, ParticleKind};

    use super::*;

    const SPEED: f32 = 5.0;

    fn geometry_for(direction: i32) -> Geometry {
        let config = FieldConfig {
            speed: SPEED,
            direction,
            kind: ParticleKind::Snow,
            ..Default::default()
        };
        Geometry::new(&config, Bounds::new(400.0, 800.0))
    }

    /// Sway step count behind a straight-down drift, checked to be a whole number.
    fn sway_steps(dx: f32) -> i32 {
        let steps = dx * 80.0 / SPEED;
        assert!((steps - steps.round()).abs() < 1e-3, "dx {dx} off the sway grid");
        steps.round() as i32
    }

    #[test]
    fn test_fall_speed_scales_with_size() {
        let mut rng = StdRng::seed_from_u64(21);
        let sizes = SizeTable::snow().unwrap();
        for direction in [0, 60, 90, 150] {
            let geometry = geometry_for(direction);
            let heading = geometry.heading;
            for _ in 0..200 {
                let p = spawn(&sizes, &geometry, &mut rng);
                let dy = p.size * SPEED * heading.sin / 40.0;
                assert!((p.dy - dy).abs() < 1e-5, "{direction}: {p:?}");
                if !heading.vertical {
                    let dx = p.size * SPEED * heading.cos / 40.0;
                    assert!((p.dx - dx).abs() < 1e-5, "{direction}: {p:?}");
                }
            }
        }
    }

    #[test]
    fn test_straight_down_sway_range() {
        let mut rng = StdRng::seed_from_u64(22);
        let sizes = SizeTable::snow().unwrap();
        let geometry = geometry_for(90);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..2_000 {
            seen.insert(sway_steps(spawn(&sizes, &geometry, &mut rng).dx));
        }
        // (0..=20 + 20 - 30) steps of speed / 80
        assert_eq!(seen.first(), Some(&-10));
        assert_eq!(seen.last(), Some(&10));
    }

    #[test]
    fn test_respawn_redraws_sway_only_when_straight_down() {
        let mut rng = StdRng::seed_from_u64(23);
        let sizes = SizeTable::snow().unwrap();

        let geometry = geometry_for(90);
        let mut p = spawn(&sizes, &geometry, &mut rng);
        p.dx = 99.0;
        respawn(&mut p, &geometry, &mut rng);
        assert!((-10..=10).contains(&sway_steps(p.dx)));
        assert_eq!(p.y, 0.0);

        let geometry = geometry_for(60);
        let mut p = spawn(&sizes, &geometry, &mut rng);
        p.dx = 99.0;
        respawn(&mut p, &geometry, &mut rng);
        assert_eq!(p.dx, 99.0);
    }
}
