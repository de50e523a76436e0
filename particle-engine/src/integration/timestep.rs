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
//! Semi-fixed timestep accumulator
//!
//! Frame time is accumulated and converted into whole simulation ticks;
//! whatever is left over carries into the next frame. Physics therefore
//! advances at the same rate regardless of frame rate.

use std::time::Duration;

/// Converts real elapsed time into a number of fixed ticks
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use particle_engine::integration::FixedTimestep;
///
/// let mut clock = FixedTimestep::new(Duration::from_millis(10));
/// assert_eq!(clock.advance(Duration::from_millis(25)), 2);
/// assert_eq!(clock.remainder(), Duration::from_millis(5));
/// assert_eq!(clock.advance(Duration::from_millis(5)), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimestep {
    step: Duration,
    accumulated: Duration,
}

impl FixedTimestep {
    /// Create an accumulator for ticks of length `step`
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero
    pub fn new(step: Duration) -> Self {
        assert!(!step.is_zero(), "Timestep must be positive and finite");
        FixedTimestep {
            step,
            accumulated: Duration::ZERO,
        }
    }

    /// Create an accumulator from a tick length in seconds
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is non-positive, NaN, or infinite
    pub fn from_secs_f32(seconds: f32) -> Self {
        assert!(
            seconds > 0.0 && seconds.is_finite(),
            "Timestep must be positive and finite"
        );
        Self::new(Duration::from_secs_f32(seconds))
    }

    /// Length of one tick
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time carried over that does not yet add up to a tick
    pub fn remainder(&self) -> Duration {
        self.accumulated
    }

    /// Add `elapsed` and return how many whole ticks are now due
    ///
    /// The due ticks are consumed from the accumulator.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;

        let mut ticks = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Drop any carried-over time
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_one_step() {
        let mut clock = FixedTimestep::new(Duration::from_millis(16));
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.remainder(), Duration::from_millis(10));
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = FixedTimestep::new(Duration::from_millis(16));
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.remainder(), Duration::from_millis(4));
    }

    #[test]
    fn test_exact_multiple() {
        let mut clock = FixedTimestep::new(Duration::from_millis(5));
        assert_eq!(clock.advance(Duration::from_millis(20)), 4);
        assert_eq!(clock.remainder(), Duration::ZERO);
    }

    #[test]
    fn test_long_frame_drains_many_ticks() {
        let mut clock = FixedTimestep::from_secs_f32(1.0 / 60.0);
        let frame = clock.step() * 60 + clock.step() / 2;
        assert_eq!(clock.advance(frame), 60);
        assert!(clock.remainder() < clock.step());
    }

    #[test]
    fn test_reset() {
        let mut clock = FixedTimestep::new(Duration::from_millis(16));
        clock.advance(Duration::from_millis(15));
        clock.reset();
        assert_eq!(clock.remainder(), Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "Timestep must be positive and finite")]
    fn test_zero_step() {
        FixedTimestep::new(Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "Timestep must be positive and finite")]
    fn test_negative_seconds() {
        FixedTimestep::from_secs_f32(-1.0);
    }
}
