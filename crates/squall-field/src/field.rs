//! The particle field simulator.

use rand::Rng;
use squall_core::{Bounds, FieldConfig, ParticleKind};
use tracing::debug;

use crate::{
    entry_line::EntryLine,
    error::FieldError,
    heading::Heading,
    motion::{Geometry, Motion},
    particle::Particle,
};

/// A set of particles moving across a rectangular field.
#[derive(Debug, Clone)]
pub struct Field {
    config: FieldConfig,
    geometry: Geometry,
    motion: Motion,
    particles: Vec<Particle>,
}

impl Field {
    /// Validate the configuration and spawn `config.count` particles inside `bounds`.
    ///
    /// Out of range direction, speed or bounds produce an error and no particles.
    pub fn initialize<R: Rng + ?Sized>(
        config: FieldConfig,
        bounds: Bounds,
        rng: &mut R,
    ) -> Result<Self, FieldError> {
        config.validate()?;
        bounds.validate()?;

        let geometry = Geometry::new(&config, bounds);
        let motion = Motion::for_kind(config.kind)?;
        let particles: Vec<Particle> = (0..config.count)
            .map(|_| motion.spawn(&geometry, rng))
            .collect();

        debug!(
            kind = config.kind.name(),
            count = particles.len(),
            direction = config.direction,
            speed = config.speed,
            width = bounds.width,
            height = bounds.height,
            "field initialized"
        );

        Ok(Self {
            config,
            geometry,
            motion,
            particles,
        })
    }

    /// Advance every particle by one step, recycling the ones that left the field.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for p in &mut self.particles {
            p.advance();
            if self.motion.has_exited(p, &self.geometry) {
                self.motion.respawn(p, &self.geometry, rng);
            }
        }
    }

    /// Current particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn kind(&self) -> ParticleKind {
        self.config.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.geometry.bounds
    }

    pub fn heading(&self) -> Heading {
        self.geometry.heading
    }

    /// Segment wrapped rain and snow re-enter on.
    pub fn entry_line(&self) -> EntryLine {
        self.geometry.entry
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use squall_core::ConfigError;

    use super::*;

    const KINDS: [ParticleKind; 4] = [
        ParticleKind::Rain,
        ParticleKind::Snow,
        ParticleKind::Cloud,
        ParticleKind::CloudDark,
    ];

    fn config(kind: ParticleKind, direction: i32, speed: f32) -> FieldConfig {
        FieldConfig {
            count: 150,
            speed,
            direction,
            kind,
            unit_scale: 1.0,
        }
    }

    fn field(kind: ParticleKind, direction: i32, rng: &mut StdRng) -> Field {
        Field::initialize(config(kind, direction, 5.0), Bounds::new(400.0, 800.0), rng)
            .expect("valid config")
    }

    fn in_field(p: &Particle, bounds: Bounds) -> bool {
        (0.0..=bounds.width).contains(&p.x) && (0.0..=bounds.height).contains(&p.y)
    }

    #[test]
    fn test_initialize_spawns_count_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for kind in KINDS {
            for direction in [0, 45, 90, 135, 180] {
                let field = field(kind, direction, &mut rng);
                assert_eq!(field.particles().len(), 150);
                for p in field.particles() {
                    assert!(in_field(p, field.bounds()), "{kind:?} {direction}: {p:?}");
                    if kind.is_cloud() {
                        assert!(p.y <= 800.0 / 3.0);
                        assert_eq!(p.dy, 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_invalid_config_spawns_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let bounds = Bounds::new(400.0, 800.0);

        let err = Field::initialize(config(ParticleKind::Snow, 200, 5.0), bounds, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            FieldError::Config(ConfigError::InvalidDirection(200))
        ));

        let err = Field::initialize(config(ParticleKind::Rain, 90, -1.0), bounds, &mut rng)
            .unwrap_err();
        assert!(matches!(err, FieldError::Config(ConfigError::InvalidSpeed(_))));

        let mut cfg = config(ParticleKind::Cloud, 90, f32::INFINITY);
        let err = Field::initialize(cfg, bounds, &mut rng).unwrap_err();
        assert!(matches!(err, FieldError::Config(ConfigError::InvalidSpeed(_))));

        cfg.speed = 5.0;
        cfg.kind = ParticleKind::Snow;
        for unit_scale in [f32::NAN, 0.0, -1.0] {
            cfg.unit_scale = unit_scale;
            let err = Field::initialize(cfg, bounds, &mut rng).unwrap_err();
            assert!(matches!(
                err,
                FieldError::Config(ConfigError::InvalidUnitScale(_))
            ));
        }

        let err = Field::initialize(
            config(ParticleKind::Rain, 90, 1.0),
            Bounds::new(-5.0, 10.0),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FieldError::Config(ConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_zero_count_and_zero_speed() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut cfg = config(ParticleKind::Snow, 90, 0.0);
        cfg.count = 0;
        let mut empty = Field::initialize(cfg, Bounds::new(10.0, 10.0), &mut rng).unwrap();
        empty.step(&mut rng);
        assert!(empty.particles().is_empty());

        cfg.count = 20;
        let mut still = Field::initialize(cfg, Bounds::new(10.0, 10.0), &mut rng).unwrap();
        let before = still.particles().to_vec();
        still.step(&mut rng);
        assert_eq!(still.particles(), before.as_slice());
    }

    #[test]
    fn test_snow_falling_straight_down_wraps_to_top() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = field(ParticleKind::Snow, 90, &mut rng);
        assert!(field.particles.iter().all(|p| p.dy > 0.0));

        for p in &mut field.particles {
            p.y = 799.0;
        }
        let falling: Vec<f32> = field.particles.iter().map(|p| p.dy).collect();
        field.step(&mut rng);

        for (p, dy) in field.particles().iter().zip(falling) {
            if dy > 1.0 {
                assert_eq!(p.y, 0.0, "fast flake should re-enter at the top");
                assert!((0.0..=400.0).contains(&p.x));
            } else {
                assert_eq!(p.y, 799.0 + dy);
            }
        }
    }

    #[test]
    fn test_respawn_stays_inside_for_axis_headings() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(400.0, 800.0);
        for kind in [ParticleKind::Rain, ParticleKind::Snow] {
            for direction in [0, 90, 180] {
                let mut field = field(kind, direction, &mut rng);
                for p in &mut field.particles {
                    match direction {
                        0 => p.x = bounds.width + p.size + 50.0,
                        180 => p.x = -p.size - 50.0,
                        _ => p.y = bounds.height + 50.0,
                    }
                }
                field.step(&mut rng);
                for p in field.particles() {
                    assert!(in_field(p, bounds), "{kind:?} {direction}: {p:?}");
                }
            }
        }
    }

    #[test]
    fn test_oblique_respawn_lands_on_entry_line() {
        let mut rng = StdRng::seed_from_u64(12);
        for (kind, direction) in [(ParticleKind::Rain, 45), (ParticleKind::Snow, 120)] {
            let mut field = field(kind, direction, &mut rng);
            let EntryLine { start, end } = field.entry_line();
            for p in &mut field.particles {
                p.y = 850.0;
            }
            field.step(&mut rng);

            let (ex, ey) = (end.0 - start.0, end.1 - start.1);
            let length = ex.hypot(ey);
            for p in field.particles() {
                let (px, py) = (p.x - start.0, p.y - start.1);
                // distance from the line, then position along it
                assert!((px * ey - py * ex).abs() / length < 1e-2, "{p:?}");
                let t = (px * ex + py * ey) / (length * length);
                assert!((-1e-4..=1.0 + 1e-4).contains(&t), "{p:?}");
            }
        }
    }

    #[test]
    fn test_cloud_respawn_enters_top_band_from_the_edge() {
        let mut rng = StdRng::seed_from_u64(6);
        for (direction, entry_left) in [(0, true), (180, false)] {
            let mut field = field(ParticleKind::Cloud, direction, &mut rng);
            for p in &mut field.particles {
                p.x = if entry_left { 400.0 + p.size + 1.0 } else { -p.size - 1.0 };
            }
            field.step(&mut rng);
            for p in field.particles() {
                assert!((0.0..=800.0 / 3.0).contains(&p.y));
                if entry_left {
                    assert_eq!(p.x, -p.size);
                } else {
                    assert_eq!(p.x, 400.0);
                }
            }
        }
    }

    #[test]
    fn test_vertical_clouds_wrap_on_either_side() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = field(ParticleKind::CloudDark, 90, &mut rng);
        for p in &mut field.particles {
            p.dx = -1.0;
            p.x = -p.size - 0.5;
        }
        field.step(&mut rng);
        for p in field.particles() {
            assert!(p.x == -p.size || p.x == 400.0, "{p:?}");
            assert!((0.0..=800.0 / 3.0).contains(&p.y));
        }
    }

    #[test]
    fn test_sideways_clouds_keep_constant_drift() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut field = field(ParticleKind::Cloud, 0, &mut rng);
        assert!(!field.heading().to_left);
        assert!(!field.heading().vertical);

        let drift: Vec<f32> = field.particles().iter().map(|p| p.dx).collect();
        assert!(drift.iter().all(|dx| *dx > 0.0));

        for _ in 0..200 {
            let before = field.particles().to_vec();
            field.step(&mut rng);
            for ((p, old), dx) in field.particles().iter().zip(&before).zip(&drift) {
                assert_eq!(p.dx, *dx);
                assert_eq!(p.dy, 0.0);
                if p.x > old.x {
                    assert_eq!(p.y, old.y);
                }
            }
        }
    }

    #[test]
    fn test_rain_displacement_is_linear_before_exit() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = field(ParticleKind::Rain, 60, &mut rng);
        field.particles[0].x = 0.0;
        field.particles[0].y = 0.0;
        let Particle { dx, dy, .. } = field.particles[0];

        let steps = 10;
        for _ in 0..steps {
            field.step(&mut rng);
        }

        let p = field.particles[0];
        assert!((p.x - dx * steps as f32).abs() < 1e-3);
        assert!((p.y - dy * steps as f32).abs() < 1e-3);
        assert!((dx - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_field() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut field = field(ParticleKind::Snow, 90, &mut rng);
            for _ in 0..500 {
                field.step(&mut rng);
            }
            field.particles().to_vec()
        };
        assert_eq!(run(11), run(11));
        assert_ne!(run(11), run(12));
    }

    #[test]
    fn test_unit_scale_multiplies_rain_and_snow_sizes() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut cfg = config(ParticleKind::Rain, 90, 5.0);
        cfg.unit_scale = 2.0;
        let rain = Field::initialize(cfg, Bounds::new(400.0, 800.0), &mut rng).unwrap();
        assert!(rain.particles().iter().all(|p| p.size == 60.0));
        assert!(
            rain.particles()
                .iter()
                .all(|p| p.breadth == 2.0 || p.breadth == 4.0)
        );

        cfg.kind = ParticleKind::Snow;
        let snow = Field::initialize(cfg, Bounds::new(400.0, 800.0), &mut rng).unwrap();
        assert!(
            snow.particles()
                .iter()
                .all(|p| (10.0..=38.0).contains(&p.size))
        );
    }
}
