//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world through the entity registry, runs systems once per
//! frame, and produces GameStateSnapshots for whatever is presenting them.

pub mod engine;
pub mod mission;
pub mod random;
pub mod registry;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::{Bridges, SimConfig, SimulationEngine};
pub use random::{RandomSource, SequenceSource};
pub use systems::fire_control::{LaunchError, LaunchReport};
