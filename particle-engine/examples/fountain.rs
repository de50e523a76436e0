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
//! Headless particle fountain
//!
//! Stands in for a windowed frontend: every frame a burst is spawned at a
//! moving emitter, the simulation is advanced by the frame time, and the
//! snapshot is "drawn" by folding it into a coarse occupancy grid.
//!
//! Run with `RUST_LOG=debug` to see per-tick statistics.

use glam::Vec2;
use particle_engine::field::Field;
use particle_engine::integration::total_kinetic_energy;
use particle_engine::{Simulation, SimulationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const FRAMES: u32 = 600;
const GRID_W: usize = 40;
const GRID_H: usize = 15;

fn main() {
    env_logger::init();

    println!("Particle Engine - Headless Fountain");
    println!("===================================\n");

    let config = SimulationConfig::default().with_field(Field::repulsor(Vec2::new(600.0, 150.0), 300.0));
    let bounds = config.bounds;
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!("Workers: {}", sim.scheduler().workers());

    let mut rng = StdRng::seed_from_u64(42);
    // Slightly uneven frame times, as a real frame loop would produce
    let frame_times = [16, 17, 16, 18, 15].map(Duration::from_millis);

    for frame in 0..FRAMES {
        if frame % 4 == 0 {
            let t = frame as f32 / FRAMES as f32;
            let emitter = Vec2::new(100.0 + 600.0 * t, 450.0);
            sim.spawn_burst(emitter, &mut rng);
        }

        sim.update(frame_times[frame as usize % frame_times.len()]);

        if frame % 120 == 0 {
            println!(
                "frame {:4}: {:6} particles in {:3} batches, KE {:.1}",
                frame,
                sim.world().particle_count(),
                sim.world().batch_count(),
                total_kinetic_energy(sim.world().batches())
            );
        }
    }

    let mut grid = [[0u32; GRID_W]; GRID_H];
    for (position, _) in sim.snapshot() {
        let col = ((position.x - bounds.min().x) / bounds.width() * GRID_W as f32) as usize;
        let row = ((position.y - bounds.min().y) / bounds.height() * GRID_H as f32) as usize;
        grid[row.min(GRID_H - 1)][col.min(GRID_W - 1)] += 1;
    }

    println!("\nFinal density after {} ticks:", sim.scheduler().ticks());
    for row in &grid {
        let line: String = row
            .iter()
            .map(|&n| match n {
                0 => ' ',
                1..=4 => '.',
                5..=19 => 'o',
                _ => '#',
            })
            .collect();
        println!("|{}|", line);
    }
}
