//! Systems that advance the simulation each tick.
//!
//! Systems are free functions over the registry and mission state. They do
//! not own state; the engine passes in what each one needs.

pub mod collision;
pub mod detonation;
pub mod fire_control;
pub mod movement;
pub mod snapshot;
pub mod wave_spawner;
pub mod wave_state;
