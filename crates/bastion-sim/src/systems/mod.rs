//! Simulation systems, run once per tick in a fixed order:
//! wave spawning, enemy movement, combat, cleanup, snapshot.

pub mod cleanup;
pub mod combat;
pub mod movement;
pub mod snapshot;
pub mod wave_spawner;
