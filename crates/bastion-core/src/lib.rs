//! Core types and definitions for the BASTION simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, errors, and constants.
//! It has no dependency on any terminal or rendering runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod error;
pub mod events;
pub mod map;
pub mod state;
pub mod types;
