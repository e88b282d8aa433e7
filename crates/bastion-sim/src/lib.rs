//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs the systems once per tick, and
//! produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
