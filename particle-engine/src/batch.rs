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
//! Fixed-capacity particle batches
//!
//! A [`Batch`] stores particle state column-wise (one array per attribute)
//! in buffers that are allocated once and never grow. Slots `[0, population)`
//! hold live particles; slots past the population are stale and must not be
//! read. Batches are the unit of work handed to scheduler workers, so each
//! one is owned by exactly one thread during a tick.
//!
//! # Removal Order
//!
//! [`Batch::remove_at`] shifts every particle above the removed slot down by
//! one. Any pass that removes particles while walking a batch must visit
//! slots from `population - 1` down to `0`: a shift only moves particles that
//! were already visited, so nothing is skipped and nothing is tested twice.

use glam::Vec2;

/// Default number of particle slots in a batch
pub const MAX_BATCH_CAPACITY: usize = 1000;

/// Fixed-capacity column store for a block of particles
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use particle_engine::batch::Batch;
///
/// let mut batch = Batch::with_capacity(4);
/// let slot = batch.append(Vec2::new(1.0, 2.0), Vec2::ZERO);
/// assert_eq!(slot, 0);
/// assert_eq!(batch.population(), 1);
///
/// batch.remove_at(slot);
/// assert!(batch.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Batch {
    positions: Box<[Vec2]>,
    previous_positions: Box<[Vec2]>,
    velocities: Box<[Vec2]>,
    accelerations: Box<[Vec2]>,
    population: usize,
}

/// Mutable view of the integrated attributes of one live particle
pub(crate) struct ParticleMut<'a> {
    pub position: &'a mut Vec2,
    pub velocity: &'a mut Vec2,
    pub acceleration: &'a mut Vec2,
}

impl Batch {
    /// Create an empty batch with [`MAX_BATCH_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(MAX_BATCH_CAPACITY)
    }

    /// Create an empty batch with the given number of slots
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Batch capacity must be non-zero");
        let column = || vec![Vec2::ZERO; capacity].into_boxed_slice();
        Batch {
            positions: column(),
            previous_positions: column(),
            velocities: column(),
            accelerations: column(),
            population: 0,
        }
    }

    /// Number of slots in this batch
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of live particles
    pub fn population(&self) -> usize {
        self.population
    }

    /// Check whether the batch holds no live particles
    pub fn is_empty(&self) -> bool {
        self.population == 0
    }

    /// Check whether every slot is taken
    pub fn is_full(&self) -> bool {
        self.population == self.capacity()
    }

    /// Append a particle and return its slot
    ///
    /// Acceleration starts at zero and the previous position is set to
    /// `position`. The caller must check [`Batch::is_full`] first; appending
    /// to a full batch trips a debug assertion.
    pub fn append(&mut self, position: Vec2, velocity: Vec2) -> usize {
        debug_assert!(
            !self.is_full(),
            "append into a full batch (capacity {})",
            self.capacity()
        );

        let slot = self.population;
        self.positions[slot] = position;
        self.previous_positions[slot] = position;
        self.velocities[slot] = velocity;
        self.accelerations[slot] = Vec2::ZERO;
        self.population += 1;
        slot
    }

    /// Remove the particle at `slot`, shifting later particles down by one
    ///
    /// Relative order of the remaining particles is preserved. Removing a
    /// slot past the population trips a debug assertion and is ignored in
    /// release builds.
    pub fn remove_at(&mut self, slot: usize) {
        debug_assert!(
            slot < self.population,
            "remove_at slot {} outside population {}",
            slot,
            self.population
        );
        if slot >= self.population {
            return;
        }

        let live = self.population;
        self.positions.copy_within(slot + 1..live, slot);
        self.previous_positions.copy_within(slot + 1..live, slot);
        self.velocities.copy_within(slot + 1..live, slot);
        self.accelerations.copy_within(slot + 1..live, slot);
        self.population -= 1;
    }

    /// Remove every live particle
    pub fn clear(&mut self) {
        self.population = 0;
    }

    /// Positions of live particles
    pub fn positions(&self) -> &[Vec2] {
        &self.positions[..self.population]
    }

    /// Spawn-time positions of live particles
    ///
    /// Written on append and carried through compaction, never read by the
    /// integrator.
    pub fn previous_positions(&self) -> &[Vec2] {
        &self.previous_positions[..self.population]
    }

    /// Velocities of live particles
    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities[..self.population]
    }

    /// Accelerations of live particles (from the last tick's field sum)
    pub fn accelerations(&self) -> &[Vec2] {
        &self.accelerations[..self.population]
    }

    pub(crate) fn particle_mut(&mut self, slot: usize) -> ParticleMut<'_> {
        debug_assert!(slot < self.population);
        ParticleMut {
            position: &mut self.positions[slot],
            velocity: &mut self.velocities[slot],
            acceleration: &mut self.accelerations[slot],
        }
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}
