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
//! Frame-loop facade
//!
//! [`Simulation`] bundles a world, a scheduler and a fixed-timestep clock so
//! the presentation layer only has to spawn, call [`Simulation::update`]
//! with the frame time, and draw the snapshot.

use crate::config::{ConfigError, SimulationConfig};
use crate::integration::FixedTimestep;
use crate::scheduler::{Scheduler, TickStats};
use crate::world::{ParticleRef, World};
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

/// A world driven by a scheduler at a fixed rate
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use glam::Vec2;
/// use particle_engine::config::SimulationConfig;
/// use particle_engine::Simulation;
///
/// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
/// sim.spawn(Vec2::new(100.0, 100.0), Vec2::new(0.0, 20.0));
///
/// let ticks = sim.update(Duration::from_millis(40));
/// assert_eq!(ticks, 2);
/// assert_eq!(sim.snapshot().count(), 1);
/// ```
pub struct Simulation {
    world: World,
    scheduler: Scheduler,
    clock: FixedTimestep,
}

impl Simulation {
    /// Build a simulation using every hardware execution unit
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        let scheduler = Scheduler::new()?;
        Ok(Self::from_parts(world, scheduler))
    }

    /// Build a simulation with a fixed worker count
    pub fn with_workers(config: SimulationConfig, workers: usize) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        let scheduler = Scheduler::with_workers(workers)?;
        Ok(Self::from_parts(world, scheduler))
    }

    /// Combine an existing world and scheduler
    pub fn from_parts(world: World, scheduler: Scheduler) -> Self {
        let clock = FixedTimestep::from_secs_f32(world.timestep());
        Simulation {
            world,
            scheduler,
            clock,
        }
    }

    /// The simulated world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world between ticks
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The tick scheduler
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The fixed-timestep clock
    pub fn clock(&self) -> &FixedTimestep {
        &self.clock
    }

    /// Spawn one particle
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2) -> ParticleRef {
        self.world.spawn(position, velocity)
    }

    /// Spawn a burst of particles at `position`, see [`World::spawn_burst`]
    pub fn spawn_burst<R: Rng>(&mut self, position: Vec2, rng: &mut R) -> usize {
        self.world.spawn_burst(position, rng)
    }

    /// Run exactly one tick, ignoring the clock
    pub fn step_once(&mut self) -> TickStats {
        self.scheduler.step_once(&mut self.world)
    }

    /// Feed `elapsed` frame time into the clock and run every tick now due
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            self.scheduler.step_once(&mut self.world);
        }
        ticks
    }

    /// Positions of every particle inside the bounds, see [`World::snapshot`]
    pub fn snapshot(&self) -> impl Iterator<Item = (Vec2, ParticleRef)> + '_ {
        self.world.snapshot()
    }
}
