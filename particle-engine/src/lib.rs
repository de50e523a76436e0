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
//! # Particle Engine
//!
//! A fixed-timestep 2D particle integrator for thousands of point particles
//! moving under superposed point-source fields, updated in parallel across
//! fixed-capacity batches.
//!
//! ## Features
//!
//! - **Batched storage**: column arrays in fixed-capacity batches, indexed by
//!   `(batch, slot)`
//! - **Point-source fields**: inverse-distance attraction and repulsion
//! - **Velocity Verlet**: averaged-acceleration velocity update at a fixed dt
//! - **In-place compaction**: particles leaving the bounds are removed during
//!   integration, shifting the rest of their batch down
//! - **Fork-join ticks**: one task per worker over contiguous batch ranges,
//!   joined at a barrier; Rayon-backed with the `parallel` feature
//!
//! Windowing, input and drawing are left to the caller, which spawns
//! particles and reads [`World::snapshot`] between ticks.
//!
//! ## Example
//!
//! ```rust
//! use glam::Vec2;
//! use particle_engine::config::SimulationConfig;
//! use particle_engine::scheduler::Scheduler;
//! use particle_engine::world::World;
//!
//! let mut world = World::new(SimulationConfig::default()).unwrap();
//! world.spawn(Vec2::new(200.0, 300.0), Vec2::new(0.0, -30.0));
//!
//! let mut scheduler = Scheduler::new().unwrap();
//! scheduler.step_once(&mut world);
//!
//! for (position, particle) in world.snapshot() {
//!     println!("{:?} at {:?}", particle, position);
//! }
//! ```

#![warn(missing_docs)]

/// Fixed-capacity particle batches
pub mod batch;

/// Simulation tunables and errors
pub mod config;

/// Point-source force fields
pub mod field;

/// Numerical integration and fixed-timestep clock
pub mod integration;

/// Fork-join tick scheduling
pub mod scheduler;

/// Frame-loop facade
pub mod simulation;

/// World container
pub mod world;

pub use config::{ConfigError, SimulationConfig};
pub use simulation::Simulation;
pub use world::{Bounds, ParticleRef, World};
