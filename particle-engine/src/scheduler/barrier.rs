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
//! End-of-tick completion barrier
//!
//! Workers signal with [`TickBarrier::arrive`]; the dispatcher blocks in
//! [`TickBarrier::wait`] until every worker has arrived, then the counter
//! resets so the barrier can be reused for the next tick.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Counting barrier for one dispatcher and a fixed number of workers
///
/// Unlike [`std::sync::Barrier`], workers do not block: they arrive and
/// move on. Only the dispatcher waits.
///
/// # Examples
///
/// ```
/// use particle_engine::scheduler::TickBarrier;
///
/// let barrier = TickBarrier::new(2);
/// std::thread::scope(|scope| {
///     for _ in 0..2 {
///         scope.spawn(|| barrier.arrive());
///     }
///     barrier.wait();
/// });
/// assert_eq!(barrier.arrived(), 0);
/// ```
#[derive(Debug)]
pub struct TickBarrier {
    parties: usize,
    arrived: Mutex<usize>,
    all_arrived: Condvar,
}

/// Arrives at its barrier when dropped, including during a panic unwind
#[must_use = "the arrival is signalled when the guard is dropped"]
pub struct Arrival<'a> {
    barrier: &'a TickBarrier,
}

impl TickBarrier {
    /// Create a barrier released by `parties` arrivals
    ///
    /// # Panics
    ///
    /// Panics if `parties` is zero
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "worker count must be at least 1");
        TickBarrier {
            parties,
            arrived: Mutex::new(0),
            all_arrived: Condvar::new(),
        }
    }

    /// Number of arrivals that release the barrier
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Number of workers that have arrived since the last release
    pub fn arrived(&self) -> usize {
        *self.lock()
    }

    /// Signal that one worker has finished
    pub fn arrive(&self) {
        let mut arrived = self.lock();
        *arrived += 1;
        self.all_arrived.notify_all();
    }

    /// Guard that calls [`TickBarrier::arrive`] when dropped
    pub fn arrival(&self) -> Arrival<'_> {
        Arrival { barrier: self }
    }

    /// Block until every party has arrived, then reset the counter
    pub fn wait(&self) {
        let guard = self.lock();
        let mut arrived = self
            .all_arrived
            .wait_while(guard, |arrived| *arrived < self.parties)
            .unwrap_or_else(PoisonError::into_inner);
        *arrived = 0;
    }

    // The counter is always consistent, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.arrived.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Arrival<'_> {
    fn drop(&mut self) {
        self.barrier.arrive();
    }
}
