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
//! Numerical integration for particle batches
//!
//! This module advances particle state by one fixed tick and compacts away
//! particles that left the world bounds in the same pass.
//!
//! # Timestep Guidelines
//!
//! - The default is dt = 1/60 s, one tick per frame at 60 FPS
//! - Frames of any length are converted into whole ticks by
//!   [`FixedTimestep`], keeping physics independent of the frame rate
//! - Particles passing close to a field origin pick up very large forces;
//!   smaller timesteps keep those encounters stable

mod timestep;
mod verlet;

pub use timestep::FixedTimestep;
pub use verlet::VelocityVerlet;

use crate::batch::Batch;

/// Kinetic energy of every live particle in `batches`, with unit mass
///
/// KE = Σ 0.5 * v²
pub fn total_kinetic_energy(batches: &[Batch]) -> f64 {
    batches
        .iter()
        .flat_map(|batch| batch.velocities())
        .map(|v| 0.5 * f64::from(v.length_squared()))
        .sum()
}
