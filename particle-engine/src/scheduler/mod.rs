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
//! Fork-join tick scheduler
//!
//! Each call to [`Scheduler::step_once`] runs one tick:
//!
//! 1. **Dispatched**: the batch list is cut into one contiguous range per
//!    worker ([`partition`]) and one task is started per range.
//! 2. **AwaitingBarrier**: the calling thread blocks in
//!    [`TickBarrier::wait`] until every task has arrived.
//! 3. **Complete**: the barrier resets and control returns to the caller.
//!
//! Tasks own disjoint `&mut [Batch]` sub-slices and share the fields
//! read-only, so no locking happens inside a range. Ticks are strictly
//! ordered because `step_once` borrows the world mutably.
//!
//! With the `parallel` feature (default) tasks run on a persistent Rayon
//! pool sized to the worker count. Without it, every tick spawns fresh
//! scoped threads. Either way the tasks are joined before `step_once`
//! returns.

mod barrier;
mod partition;

pub use barrier::{Arrival, TickBarrier};
pub use partition::partition;

use crate::batch::Batch;
use crate::config::ConfigError;
use crate::integration::VelocityVerlet;
use crate::world::World;
use partition::split_ranges;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of hardware execution units, or 1 if it cannot be queried
pub fn hardware_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Particles removed for being outside the bounds
    pub removed: usize,
    /// Particles alive after the tick
    ///
    /// Includes particles that left the bounds during this tick; they are
    /// only removed on the next tick, and [`World::snapshot`] already skips
    /// them, so this can exceed `snapshot().count()`.
    pub live: usize,
}

/// Dispatches ticks over a fixed number of workers
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use particle_engine::config::SimulationConfig;
/// use particle_engine::scheduler::Scheduler;
/// use particle_engine::world::World;
///
/// let mut world = World::new(SimulationConfig::default()).unwrap();
/// world.spawn(Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0));
///
/// let mut scheduler = Scheduler::with_workers(2).unwrap();
/// let stats = scheduler.step_once(&mut world);
/// assert_eq!(stats.live, 1);
/// ```
pub struct Scheduler {
    workers: usize,
    barrier: TickBarrier,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
    ticks: u64,
}

impl Scheduler {
    /// Create a scheduler with one worker per hardware execution unit
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_workers(hardware_workers())
    }

    /// Create a scheduler with exactly `workers` workers
    pub fn with_workers(workers: usize) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("particle-worker-{}", index))
            .build()
            .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;

        log::info!("Scheduler started with {} worker(s)", workers);

        Ok(Scheduler {
            workers,
            barrier: TickBarrier::new(workers),
            #[cfg(feature = "parallel")]
            pool,
            ticks: 0,
        })
    }

    /// Number of workers (and tasks per tick)
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one full tick over `world`: dispatch, integrate, barrier
    pub fn step_once(&mut self, world: &mut World) -> TickStats {
        let integrator = VelocityVerlet::new(world.timestep());
        let (batches, fields, bounds) = world.tick_parts();

        let ranges = partition(batches.len(), self.workers);
        let removed = AtomicUsize::new(0);

        self.dispatch(split_ranges(batches, &ranges), |range| {
            let count = integrator.integrate_range(range, &bounds, fields);
            removed.fetch_add(count, Ordering::Relaxed);
        });

        self.ticks += 1;
        let stats = TickStats {
            tick: self.ticks,
            removed: removed.into_inner(),
            live: world.particle_count(),
        };

        log::debug!(
            "Tick {}: {} live, {} removed",
            stats.tick,
            stats.live,
            stats.removed
        );

        stats
    }

    /// Run `work` once per range on the worker pool and wait at the barrier
    #[cfg(feature = "parallel")]
    fn dispatch<F>(&self, ranges: Vec<&mut [Batch]>, work: F)
    where
        F: Fn(&mut [Batch]) + Sync,
    {
        debug_assert_eq!(ranges.len(), self.barrier.parties());
        let barrier = &self.barrier;
        let work = &work;

        // in_place_scope keeps the dispatcher on the calling thread, so all
        // pool threads are free for the tasks while it waits.
        self.pool.in_place_scope(|scope| {
            for range in ranges {
                scope.spawn(move |_| {
                    let _arrival = barrier.arrival();
                    work(range);
                });
            }
            barrier.wait();
        });
    }

    /// Run `work` once per range on fresh scoped threads and wait at the
    /// barrier
    #[cfg(not(feature = "parallel"))]
    fn dispatch<F>(&self, ranges: Vec<&mut [Batch]>, work: F)
    where
        F: Fn(&mut [Batch]) + Sync,
    {
        debug_assert_eq!(ranges.len(), self.barrier.parties());
        let barrier = &self.barrier;
        let work = &work;

        std::thread::scope(|scope| {
            for range in ranges {
                scope.spawn(move || {
                    let _arrival = barrier.arrival();
                    work(range);
                });
            }
            barrier.wait();
        });
    }
}
