//! Core types and definitions for the BASTION missile-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, audio cues, collaborator
//! contracts, and tuning constants. It has no runtime framework dependency.

pub mod bridges;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
