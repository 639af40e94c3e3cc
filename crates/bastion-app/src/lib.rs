//! BASTION headless application.
//!
//! Wires the simulation to a game loop thread, a file-backed high score
//! store and a log-backed audio bridge.

pub mod audio_log;
pub mod autofire;
pub mod config;
pub mod game_loop;
pub mod highscore;
pub mod state;

pub use bastion_core as core;
