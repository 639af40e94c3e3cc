//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, so a mission
//! reset never lands in the middle of a collision pass.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Reset every entity and begin wave 1. Valid from any phase.
    StartMission,
    /// Fire an interceptor at a world-space aim point. The point is clamped
    /// into the playfield. `base` requests a specific base by index; when
    /// that base cannot fire, the nearest armed base is used instead.
    Launch {
        x: f64,
        y: f64,
        #[serde(default)]
        base: Option<usize>,
    },
}
