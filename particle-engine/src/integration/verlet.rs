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
//! Velocity Verlet integrator with in-place compaction
//!
//! # Algorithm
//!
//! For every live particle, walking each batch from the highest slot down:
//!
//! ```text
//! if p(t) outside bounds: remove particle, continue
//! p(t + dt) = p(t) + v(t)*dt + a(t)*dt²
//! a(t + dt) = Σ fields at p(t + dt)
//! v(t + dt) = v(t) + 0.5*(a(t) + a(t + dt))*dt
//! ```
//!
//! The displacement uses the full `a*dt²` term rather than the textbook
//! `0.5*a*dt²`; trajectories are tuned against that form.
//!
//! Removal happens the moment a particle is found outside the bounds, so
//! the scan must run high to low (see [`crate::batch`]). A particle pushed
//! out of the bounds by this tick is removed on the next one.
//!
//! # References
//!
//! - Swope, W. C., Andersen, H. C., Berens, P. H., & Wilson, K. R. (1982).
//!   The Journal of Chemical Physics, 76(1), 637-649.

use crate::batch::{Batch, ParticleMut};
use crate::field::{force_at, Field};
use crate::world::Bounds;

/// Velocity Verlet integrator for particle batches
///
/// # Example
///
/// ```
/// use particle_engine::integration::VelocityVerlet;
///
/// let integrator = VelocityVerlet::new(1.0 / 60.0);
/// assert_eq!(integrator.timestep(), 1.0 / 60.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityVerlet {
    timestep: f32,
    timestep_sq: f32,
}

impl VelocityVerlet {
    /// Create an integrator with the given timestep in seconds
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    pub fn new(timestep: f32) -> Self {
        assert!(
            timestep > 0.0 && timestep.is_finite(),
            "Timestep must be positive and finite"
        );
        VelocityVerlet {
            timestep,
            timestep_sq: timestep * timestep,
        }
    }

    /// Get the timestep used by this integrator
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Advance one batch by one tick, compacting out-of-bounds particles
    ///
    /// Returns the number of particles removed.
    pub fn integrate_batch(&self, batch: &mut Batch, bounds: &Bounds, fields: &[Field]) -> usize {
        let mut removed = 0;

        for slot in (0..batch.population()).rev() {
            if !bounds.contains(batch.positions()[slot]) {
                batch.remove_at(slot);
                removed += 1;
                continue;
            }

            self.step_particle(batch.particle_mut(slot), fields);
        }

        removed
    }

    /// Advance a contiguous run of batches; returns the number removed
    pub fn integrate_range(&self, batches: &mut [Batch], bounds: &Bounds, fields: &[Field]) -> usize {
        batches
            .iter_mut()
            .map(|batch| self.integrate_batch(batch, bounds, fields))
            .sum()
    }

    #[inline]
    fn step_particle(&self, particle: ParticleMut<'_>, fields: &[Field]) {
        let ParticleMut {
            position,
            velocity,
            acceleration,
        } = particle;

        *position += *velocity * self.timestep + *acceleration * self.timestep_sq;

        let force = force_at(fields, *position);
        *velocity += 0.5 * (*acceleration + force) * self.timestep;
        *acceleration = force;
    }
}
