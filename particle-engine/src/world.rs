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
//! World management
//!
//! The World owns every batch, the field list and the simulation bounds.
//! Particles enter through [`World::spawn`] and leave when a tick finds them
//! outside the bounds.

use crate::batch::Batch;
use crate::config::{ConfigError, SimulationConfig};
use crate::field::Field;
use glam::Vec2;
use rand::Rng;

/// Axis-aligned simulation rectangle
///
/// Containment is half-open: the lower edges are inside, the upper edges
/// are not. NaN coordinates are never contained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    /// Create bounds from two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Bounds { min, max }
    }

    /// Create bounds from a top-left corner and a size
    pub fn from_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Bounds::new(Vec2::new(left, top), Vec2::new(left + width, top + height))
    }

    /// Lower corner
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Upper corner
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Horizontal extent
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Midpoint of the rectangle
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Check whether `point` lies inside
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    /// Check that both corners are finite and the area is non-empty
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max.x > self.min.x && self.max.y > self.min.y
    }
}

/// Location of a particle: batch index and slot within the batch
///
/// Slots are reused after compaction, so a reference is only meaningful
/// until the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleRef {
    /// Index of the owning batch
    pub batch: usize,
    /// Slot within that batch
    pub slot: usize,
}

/// The particle world
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use particle_engine::config::SimulationConfig;
/// use particle_engine::world::World;
///
/// let mut world = World::new(SimulationConfig::default()).unwrap();
/// let particle = world.spawn(Vec2::new(100.0, 100.0), Vec2::new(5.0, 0.0));
/// assert_eq!((particle.batch, particle.slot), (0, 0));
/// assert_eq!(world.particle_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct World {
    bounds: Bounds,
    batches: Vec<Batch>,
    fields: Vec<Field>,
    batch_capacity: usize,
    max_particle_speed: f32,
    particles_per_spawn: usize,
    timestep: f32,
}

impl World {
    /// Create an empty world from a validated configuration
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        log::info!(
            "Created world {:?}..{:?} with {} field(s), batch capacity {}",
            config.bounds.min(),
            config.bounds.max(),
            config.fields.len(),
            config.batch_capacity
        );

        Ok(World {
            bounds: config.bounds,
            batches: Vec::new(),
            fields: config.fields,
            batch_capacity: config.batch_capacity,
            max_particle_speed: config.max_particle_speed,
            particles_per_spawn: config.particles_per_spawn,
            timestep: config.timestep,
        })
    }

    /// Simulation bounds
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Fields acting on the particles
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Add a field
    ///
    /// Fields are read by workers during a tick; taking `&mut self` keeps
    /// edits out of an in-flight tick.
    pub fn add_field(&mut self, field: Field) -> Result<(), ConfigError> {
        if !field.is_valid() {
            return Err(ConfigError::InvalidField {
                index: self.fields.len(),
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Slots per batch
    pub fn batch_capacity(&self) -> usize {
        self.batch_capacity
    }

    /// Fixed tick length in seconds
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Spawn one particle
    ///
    /// The particle goes into the last batch, or into a fresh batch when the
    /// last one is full or none exists yet.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2) -> ParticleRef {
        if self.batches.last().map_or(true, Batch::is_full) {
            self.batches.push(Batch::with_capacity(self.batch_capacity));
            log::trace!("Allocated batch {}", self.batches.len() - 1);
        }

        let batch = self.batches.len() - 1;
        let slot = self.batches[batch].append(position, velocity);
        ParticleRef { batch, slot }
    }

    /// Spawn a burst of particles at `position` flying in random directions
    ///
    /// Emits the configured number of particles, each at the configured
    /// speed along an angle drawn uniformly from [0°, 360°). The y component
    /// is negated so angles run counter-clockwise in screen coordinates.
    /// Returns the number of particles spawned.
    pub fn spawn_burst<R: Rng>(&mut self, position: Vec2, rng: &mut R) -> usize {
        let speed = self.max_particle_speed;
        for _ in 0..self.particles_per_spawn {
            let angle = rng.random_range(0.0f32..360.0).to_radians();
            let velocity = Vec2::new(speed * angle.cos(), -speed * angle.sin());
            self.spawn(position, velocity);
        }
        self.particles_per_spawn
    }

    /// Total number of live particles
    pub fn particle_count(&self) -> usize {
        self.batches.iter().map(Batch::population).sum()
    }

    /// Number of allocated batches, including empty ones
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Batches in spawn order, for per-batch drawing
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Positions of every particle inside the bounds
    ///
    /// A particle carried out of the bounds by the last tick stays in its
    /// batch until the next tick removes it; it is left out here. Must be
    /// called between ticks, which the borrow on `self` guarantees.
    pub fn snapshot(&self) -> impl Iterator<Item = (Vec2, ParticleRef)> + '_ {
        let bounds = self.bounds;
        self.batches
            .iter()
            .enumerate()
            .flat_map(|(batch, b)| {
                b.positions()
                    .iter()
                    .enumerate()
                    .map(move |(slot, &position)| (position, ParticleRef { batch, slot }))
            })
            .filter(move |(position, _)| bounds.contains(*position))
    }

    /// Remove every particle and batch
    pub fn clear(&mut self) {
        self.batches.clear();
    }

    /// Split the world into the parts a tick needs
    pub(crate) fn tick_parts(&mut self) -> (&mut [Batch], &[Field], Bounds) {
        (self.batches.as_mut_slice(), &self.fields, self.bounds)
    }
}
