//! Playback lifecycle of a particle field.

use rand::Rng;
use squall_core::{AnimationState, Bounds, ConfigError, FieldConfig, ParticleKind};
use tracing::{debug, info, warn};

use crate::{error::FieldError, field::Field, particle::Particle};

/// A field driven by a frame scheduler.
///
/// Spawning waits for [`FieldRun::surface_ready`], which supplies the field
/// size once the host surface is laid out. [`FieldRun::tick`] is the
/// per-frame callback and only steps while playing.
#[derive(Debug)]
pub struct FieldRun<R> {
    config: FieldConfig,
    state: AnimationState,
    bounds: Option<Bounds>,
    field: Option<Field>,
    rng: R,
}

impl<R: Rng> FieldRun<R> {
    /// Create a stopped run, rejecting out of range configurations.
    pub fn new(config: FieldConfig, rng: R) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected field configuration");
            return Err(err);
        }

        Ok(Self {
            config,
            state: AnimationState::Stop,
            bounds: None,
            field: None,
            rng,
        })
    }

    /// The host surface has a (new) size. Respawns the field if the size changed.
    pub fn surface_ready(&mut self, bounds: Bounds) -> Result<(), FieldError> {
        if self.bounds == Some(bounds) && self.field.is_some() {
            return Ok(());
        }
        bounds.validate()?;
        self.bounds = Some(bounds);
        if self.state != AnimationState::Stop {
            self.spawn()?;
        }
        Ok(())
    }

    /// Replace the configuration. The run is stopped and respawned on the next start.
    ///
    /// An invalid configuration leaves the run untouched.
    pub fn reconfigure(&mut self, config: FieldConfig) -> Result<(), ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected field configuration");
            return Err(err);
        }
        self.stop();
        self.config = config;
        debug!(kind = config.kind.name(), "field reconfigured");
        Ok(())
    }

    /// Stop -> Play. Spawns particles if the surface size is known.
    pub fn start(&mut self) -> Result<(), FieldError> {
        if self.state == AnimationState::Stop {
            if self.bounds.is_some() {
                self.spawn()?;
            }
            self.state = AnimationState::Play;
            info!(kind = self.config.kind.name(), "field started");
        }
        Ok(())
    }

    /// Play -> Pause. Particles are kept as they are.
    pub fn pause(&mut self) {
        if self.state == AnimationState::Play {
            self.state = AnimationState::Pause;
            debug!("field paused");
        }
    }

    /// Pause -> Play.
    pub fn resume(&mut self) {
        if self.state == AnimationState::Pause {
            self.state = AnimationState::Play;
            debug!("field resumed");
        }
    }

    /// Play or Pause -> Stop. All particles are discarded.
    pub fn stop(&mut self) {
        if self.state != AnimationState::Stop {
            self.state = AnimationState::Stop;
            self.field = None;
            info!("field stopped");
        }
    }

    /// Frame callback. Returns whether the field was stepped.
    pub fn tick(&mut self) -> bool {
        if self.state != AnimationState::Play {
            return false;
        }
        match self.field.as_mut() {
            Some(field) => {
                field.step(&mut self.rng);
                true
            }
            None => false,
        }
    }

    fn spawn(&mut self) -> Result<(), FieldError> {
        let Some(bounds) = self.bounds else {
            return Ok(());
        };
        self.field = Some(Field::initialize(self.config, bounds, &mut self.rng)?);
        Ok(())
    }
}

impl<R> FieldRun<R> {
    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn kind(&self) -> ParticleKind {
        self.config.kind
    }

    /// The running field, if spawned.
    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    /// Particles to draw, empty until spawned and after stop.
    pub fn particles(&self) -> &[Particle] {
        self.field.as_ref().map(Field::particles).unwrap_or_default()
    }
}
