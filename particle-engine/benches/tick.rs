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
//! Benchmarks for tick throughput
//!
//! These benchmarks measure:
//! - Tick throughput for different particle counts
//! - Scaling with the worker count
//! - Field summation cost per particle

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec2;
use particle_engine::field::{force_at, Field};
use particle_engine::scheduler::{hardware_workers, Scheduler};
use particle_engine::{SimulationConfig, World};

// Particles on a grid around the default attractor, slow enough to stay in
// bounds for the duration of a benchmark run
fn setup_world(particle_count: usize) -> World {
    let mut world = World::new(SimulationConfig::default()).unwrap();
    let side = (particle_count as f32).sqrt().ceil() as usize;
    for i in 0..particle_count {
        let x = 150.0 + (i % side) as f32 * 500.0 / side as f32;
        let y = 50.0 + (i / side) as f32 * 500.0 / side as f32;
        world.spawn(Vec2::new(x, y), Vec2::new(0.5, -0.5));
    }
    world
}

fn bench_tick_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_throughput");
    let workers = hardware_workers();

    for particle_count in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*particle_count as u64));

        group.bench_with_input(
            BenchmarkId::new("step_once", particle_count),
            particle_count,
            |b, &particle_count| {
                let mut scheduler = Scheduler::with_workers(workers).unwrap();
                b.iter_batched_ref(
                    || setup_world(particle_count),
                    |world| scheduler.step_once(black_box(world)),
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_scaling");
    let particle_count = 50_000;
    group.throughput(Throughput::Elements(particle_count as u64));

    let mut worker_counts = vec![1, 2, 4];
    worker_counts.push(hardware_workers());
    worker_counts.sort_unstable();
    worker_counts.dedup();

    for workers in worker_counts {
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            let mut scheduler = Scheduler::with_workers(workers).unwrap();
            b.iter_batched_ref(
                || setup_world(particle_count),
                |world| scheduler.step_once(black_box(world)),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_field_summation(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_summation");

    for field_count in [1, 4, 16].iter() {
        let fields: Vec<Field> = (0..*field_count)
            .map(|i| Field::new(Vec2::new(50.0 * i as f32, 300.0), if i % 2 == 0 { 500.0 } else { -500.0 }))
            .collect();

        group.bench_with_input(BenchmarkId::new("force_at", field_count), &fields, |b, fields| {
            b.iter(|| force_at(black_box(fields), black_box(Vec2::new(123.0, 456.0))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tick_throughput,
    bench_worker_scaling,
    bench_field_summation
);
criterion_main!(benches);
