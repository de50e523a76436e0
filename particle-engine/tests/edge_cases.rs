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
//! Edge case tests
//!
//! Tests boundary conditions, extreme values, and unusual scenarios

use glam::Vec2;
use particle_engine::field::Field;
use particle_engine::integration::VelocityVerlet;
use particle_engine::scheduler::{partition, Scheduler};
use particle_engine::{Bounds, ConfigError, ParticleRef, SimulationConfig, World};

fn screen_config() -> SimulationConfig {
    SimulationConfig::new(Bounds::from_size(0.0, 0.0, 800.0, 600.0))
}

#[test]
#[should_panic(expected = "Timestep must be positive and finite")]
fn test_verlet_zero_timestep() {
    VelocityVerlet::new(0.0);
}

#[test]
#[should_panic(expected = "Timestep must be positive and finite")]
fn test_verlet_infinite_timestep() {
    VelocityVerlet::new(f32::INFINITY);
}

#[test]
fn test_world_rejects_invalid_timestep() {
    let result = World::new(screen_config().with_timestep(-1.0));
    assert_eq!(result.err(), Some(ConfigError::InvalidTimestep(-1.0)));
}

#[test]
fn test_world_rejects_nan_field() {
    let result = World::new(screen_config().with_field(Field::new(Vec2::new(f32::NAN, 0.0), 1.0)));
    assert_eq!(result.err(), Some(ConfigError::InvalidField { index: 0 }));
}

#[test]
fn test_scheduler_rejects_zero_workers() {
    assert!(matches!(
        Scheduler::with_workers(0),
        Err(ConfigError::ZeroWorkers)
    ));
}

#[test]
fn test_capacity_one_batches() {
    let mut world = World::new(screen_config().with_batch_capacity(1)).unwrap();
    for i in 0..5 {
        let particle = world.spawn(Vec2::new(10.0 * i as f32, 10.0), Vec2::ZERO);
        assert_eq!(particle, ParticleRef { batch: i, slot: 0 });
    }

    let mut scheduler = Scheduler::with_workers(2).unwrap();
    scheduler.step_once(&mut world);
    assert_eq!(world.particle_count(), 5);
    assert_eq!(world.batch_count(), 5);
}

#[test]
fn test_many_more_workers_than_batches() {
    let mut world = World::new(screen_config()).unwrap();
    world.spawn(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));

    let mut scheduler = Scheduler::with_workers(32).unwrap();
    for _ in 0..10 {
        scheduler.step_once(&mut world);
    }
    assert_eq!(world.particle_count(), 1);
    assert_eq!(scheduler.ticks(), 10);
}

#[test]
fn test_emptied_batches_stay_allocated() {
    let mut world = World::new(screen_config().with_batch_capacity(2)).unwrap();
    world.spawn(Vec2::new(-1.0, 0.0), Vec2::ZERO);
    world.spawn(Vec2::new(-1.0, 0.0), Vec2::ZERO);
    world.spawn(Vec2::new(10.0, 10.0), Vec2::ZERO);

    let mut scheduler = Scheduler::with_workers(2).unwrap();
    scheduler.step_once(&mut world);

    assert_eq!(world.batch_count(), 2);
    assert!(world.batches()[0].is_empty());

    // New particles still go to the last batch
    let particle = world.spawn(Vec2::new(20.0, 20.0), Vec2::ZERO);
    assert_eq!(particle, ParticleRef { batch: 1, slot: 1 });
}

#[test]
fn test_lower_edge_is_inside_upper_edge_is_outside() {
    let mut world = World::new(screen_config()).unwrap();
    world.spawn(Vec2::new(0.0, 0.0), Vec2::ZERO);
    world.spawn(Vec2::new(800.0, 0.0), Vec2::ZERO);
    world.spawn(Vec2::new(0.0, 600.0), Vec2::ZERO);

    let stats = Scheduler::with_workers(1).unwrap().step_once(&mut world);
    assert_eq!(stats.removed, 2);
    assert_eq!(world.batches()[0].positions(), &[Vec2::ZERO]);
}

#[test]
fn test_infinite_velocity_is_removed() {
    let mut world = World::new(screen_config()).unwrap();
    world.spawn(Vec2::new(100.0, 100.0), Vec2::new(f32::INFINITY, 0.0));

    let mut scheduler = Scheduler::with_workers(1).unwrap();
    scheduler.step_once(&mut world);
    assert_eq!(world.snapshot().count(), 0);

    let stats = scheduler.step_once(&mut world);
    assert_eq!(stats.removed, 1);
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn test_partition_large_counts() {
    let ranges = partition(1_000_003, 7);
    assert_eq!(ranges.len(), 7);
    assert_eq!(ranges[0], 0..142_857);
    assert_eq!(ranges[6], 857_142..1_000_003);
    let covered: usize = ranges.iter().map(|r| r.len()).sum();
    assert_eq!(covered, 1_000_003);
}

#[test]
fn test_previous_position_is_not_touched_by_ticks() {
    let mut world = World::new(screen_config()).unwrap();
    world.spawn(Vec2::new(100.0, 100.0), Vec2::new(30.0, 0.0));

    let mut scheduler = Scheduler::with_workers(1).unwrap();
    for _ in 0..5 {
        scheduler.step_once(&mut world);
    }

    let batch = &world.batches()[0];
    assert_eq!(batch.previous_positions(), &[Vec2::new(100.0, 100.0)]);
    assert_ne!(batch.positions()[0], Vec2::new(100.0, 100.0));
}
