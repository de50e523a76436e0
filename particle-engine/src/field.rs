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
//! Point-source force fields
//!
//! Each [`Field`] pulls particles toward its origin (positive intensity) or
//! pushes them away (negative intensity) with a strength that falls off with
//! the inverse of the distance:
//!
//! **F = (origin - p) / |origin - p|² · intensity**
//!
//! The direction vector is not normalized, so the magnitude is
//! `|intensity| / r`. Contributions from every field are summed.
//!
//! # Singularity
//!
//! No softening is applied. A particle sitting exactly on an origin divides
//! zero by zero and picks up a NaN force. The NaN spreads into its position
//! on the next tick, fails the bounds check, and the particle is removed.

use glam::Vec2;

/// A point source exerting an inverse-distance force on every particle
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use particle_engine::field::Field;
///
/// let field = Field::new(Vec2::new(10.0, 0.0), 5.0);
/// let force = field.force_on(Vec2::ZERO);
/// assert_eq!(force, Vec2::new(0.5, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    origin: Vec2,
    intensity: f32,
}

impl Field {
    /// Create a field at `origin`; negative intensity repels
    pub fn new(origin: Vec2, intensity: f32) -> Self {
        Field { origin, intensity }
    }

    /// Create a repelling field with strength `intensity.abs()`
    pub fn repulsor(origin: Vec2, intensity: f32) -> Self {
        Field::new(origin, -intensity.abs())
    }

    /// Location of the source
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Signed strength of the source
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Check if this field attracts particles
    pub fn is_attractive(&self) -> bool {
        self.intensity > 0.0
    }

    /// Check if origin and intensity are finite
    pub fn is_valid(&self) -> bool {
        self.origin.is_finite() && self.intensity.is_finite()
    }

    /// Force this field exerts on a particle at `position`
    #[inline]
    pub fn force_on(&self, position: Vec2) -> Vec2 {
        let r = self.origin - position;
        let r2 = r.length_squared();
        r / r2 * self.intensity
    }
}

/// Sum the forces of all `fields` at `position`
///
/// Fields are visited in slice order so the result is reproducible bit for
/// bit. Returns zero when `fields` is empty.
#[inline]
pub fn force_at(fields: &[Field], position: Vec2) -> Vec2 {
    fields
        .iter()
        .fold(Vec2::ZERO, |total, field| total + field.force_on(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let field = Field::new(Vec2::new(400.0, 300.0), 500.0);
        assert_eq!(field.origin(), Vec2::new(400.0, 300.0));
        assert_eq!(field.intensity(), 500.0);
        assert!(field.is_attractive());
        assert!(field.is_valid());
    }

    #[test]
    fn test_repulsor_is_negative() {
        let field = Field::repulsor(Vec2::ZERO, 50.0);
        assert_eq!(field.intensity(), -50.0);
        assert!(!field.is_attractive());

        let already_negative = Field::repulsor(Vec2::ZERO, -50.0);
        assert_eq!(already_negative.intensity(), -50.0);
    }

    #[test]
    fn test_invalid_field() {
        assert!(!Field::new(Vec2::new(f32::NAN, 0.0), 1.0).is_valid());
        assert!(!Field::new(Vec2::ZERO, f32::INFINITY).is_valid());
    }

    #[test]
    fn test_attraction_points_at_origin() {
        let field = Field::new(Vec2::new(0.0, 0.0), 100.0);
        let force = field.force_on(Vec2::new(10.0, 0.0));
        // r = (-10, 0), r² = 100 → (-0.1, 0) * 100
        assert!((force.x + 10.0).abs() < 1e-5);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_repulsion_points_away() {
        let field = Field::new(Vec2::ZERO, -100.0);
        let force = field.force_on(Vec2::new(0.0, 5.0));
        assert!(force.y > 0.0);
        assert_eq!(force.x, 0.0);
    }

    #[test]
    fn test_magnitude_falls_off_with_distance() {
        let field = Field::new(Vec2::ZERO, 1.0);
        let near = field.force_on(Vec2::new(1.0, 0.0)).length();
        let far = field.force_on(Vec2::new(4.0, 0.0)).length();
        assert!((near / far - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_superposition() {
        let a = Field::new(Vec2::new(-10.0, 0.0), 20.0);
        let b = Field::new(Vec2::new(10.0, 0.0), 20.0);
        let fields = [a, b];

        // Symmetric pair cancels at the midpoint
        assert_eq!(force_at(&fields, Vec2::ZERO), Vec2::ZERO);

        let p = Vec2::new(3.0, 4.0);
        let expected = a.force_on(p) + b.force_on(p);
        assert_eq!(force_at(&fields, p), expected);
    }

    #[test]
    fn test_no_fields_no_force() {
        assert_eq!(force_at(&[], Vec2::new(12.0, 34.0)), Vec2::ZERO);
    }

    #[test]
    fn test_zero_distance_is_nan() {
        let field = Field::new(Vec2::new(400.0, 300.0), 500.0);
        let force = field.force_on(Vec2::new(400.0, 300.0));
        assert!(force.x.is_nan());
        assert!(force.y.is_nan());
    }
}
