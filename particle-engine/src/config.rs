// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Simulation tunables and configuration errors
//!
//! [`SimulationConfig`] gathers every knob the presentation layer may set
//! before a world is built. The defaults reproduce the classic demo: an
//! 800×600 world, a single attractor in the middle, bursts of 100 particles
//! at speed 30, and a 60 Hz tick.

use crate::batch::MAX_BATCH_CAPACITY;
use crate::field::Field;
use crate::world::Bounds;
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;

/// Default fixed timestep in seconds (60 ticks per second)
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Default speed given to particles spawned by a burst
pub const DEFAULT_MAX_PARTICLE_SPEED: f32 = 30.0;

/// Default number of particles emitted by one spawn burst
pub const DEFAULT_PARTICLES_PER_SPAWN: usize = 100;

/// Errors raised while validating configuration or building the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Timestep is zero, negative, NaN, infinite, or outside what a
    /// nanosecond clock can hold
    #[error("invalid timestep {0}: must be positive and finite, between 1ns and u64::MAX seconds")]
    InvalidTimestep(f32),

    /// Bounds are non-finite or have no area
    #[error("invalid bounds {min:?}..{max:?}: must be finite with max > min")]
    InvalidBounds {
        /// Lower corner
        min: Vec2,
        /// Upper corner
        max: Vec2,
    },

    /// Batches need at least one slot
    #[error("batch capacity must be non-zero")]
    ZeroBatchCapacity,

    /// Spawn speed is negative, NaN or infinite
    #[error("invalid particle speed {0}: must be non-negative and finite")]
    InvalidSpeed(f32),

    /// A field has a non-finite origin or intensity
    #[error("field {index} has a non-finite origin or intensity")]
    InvalidField {
        /// Position of the field in the configured list
        index: usize,
    },

    /// The scheduler needs at least one worker
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    /// The worker thread pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Tunables for a particle world
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use particle_engine::config::SimulationConfig;
/// use particle_engine::field::Field;
/// use particle_engine::world::Bounds;
///
/// let config = SimulationConfig::new(Bounds::from_size(0.0, 0.0, 1024.0, 768.0))
///     .with_batch_capacity(256)
///     .with_field(Field::new(Vec2::new(512.0, 384.0), 800.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Particles outside this rectangle are removed
    pub bounds: Bounds,
    /// Slots per batch
    pub batch_capacity: usize,
    /// Speed of particles emitted by a spawn burst
    pub max_particle_speed: f32,
    /// Particles emitted by one spawn burst
    pub particles_per_spawn: usize,
    /// Fixed tick length in seconds
    pub timestep: f32,
    /// Point sources acting on every particle
    pub fields: Vec<Field>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let bounds = Bounds::from_size(0.0, 0.0, 800.0, 600.0);
        SimulationConfig {
            fields: vec![Field::new(bounds.center(), 500.0)],
            ..SimulationConfig::new(bounds)
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with default tunables, the given bounds and
    /// no fields
    pub fn new(bounds: Bounds) -> Self {
        SimulationConfig {
            bounds,
            batch_capacity: MAX_BATCH_CAPACITY,
            max_particle_speed: DEFAULT_MAX_PARTICLE_SPEED,
            particles_per_spawn: DEFAULT_PARTICLES_PER_SPAWN,
            timestep: DEFAULT_TIMESTEP,
            fields: Vec::new(),
        }
    }

    /// Set the number of slots per batch
    pub fn with_batch_capacity(mut self, capacity: usize) -> Self {
        self.batch_capacity = capacity;
        self
    }

    /// Set the speed of burst-spawned particles
    pub fn with_max_particle_speed(mut self, speed: f32) -> Self {
        self.max_particle_speed = speed;
        self
    }

    /// Set the number of particles per spawn burst
    pub fn with_particles_per_spawn(mut self, count: usize) -> Self {
        self.particles_per_spawn = count;
        self
    }

    /// Set the fixed tick length in seconds
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Add a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Remove every configured field
    pub fn without_fields(mut self) -> Self {
        self.fields.clear();
        self
    }

    /// Check every tunable
    ///
    /// Questionable but usable timesteps are accepted with a warning, see
    /// [`SimulationConfig::validate_timestep`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_timestep()?;

        if !self.bounds.is_valid() {
            return Err(ConfigError::InvalidBounds {
                min: self.bounds.min(),
                max: self.bounds.max(),
            });
        }

        if self.batch_capacity == 0 {
            return Err(ConfigError::ZeroBatchCapacity);
        }

        if !(self.max_particle_speed >= 0.0 && self.max_particle_speed.is_finite()) {
            return Err(ConfigError::InvalidSpeed(self.max_particle_speed));
        }

        if let Some(index) = self.fields.iter().position(|f| !f.is_valid()) {
            return Err(ConfigError::InvalidField { index });
        }

        Ok(())
    }

    /// Validate the timestep for stability
    ///
    /// Rejects non-positive or non-finite values, and values that round to
    /// a zero or overflowing [`Duration`] for the frame clock. Very small
    /// timesteps lose precision in `f32` and very large ones make the
    /// integration unstable; both are logged but allowed.
    pub fn validate_timestep(&self) -> Result<(), ConfigError> {
        let dt = self.timestep;

        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ConfigError::InvalidTimestep(dt));
        }

        match Duration::try_from_secs_f32(dt) {
            Ok(step) if !step.is_zero() => {}
            _ => return Err(ConfigError::InvalidTimestep(dt)),
        }

        if dt < 1e-6 {
            log::warn!(
                "Timestep {} is extremely small and may lose precision with f32",
                dt
            );
        } else if dt > 1.0 {
            log::warn!("Timestep {} is large and may cause instability", dt);
        }

        Ok(())
    }
}
