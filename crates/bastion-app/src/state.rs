//! State shared between the game loop thread and whoever drives it.

use std::sync::{Arc, Mutex};

use bastion_core::commands::PlayerCommand;
use bastion_core::state::GameStateSnapshot;

/// Commands sent from the controlling thread to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Most recent snapshot, written by the loop after every tick.
///
/// `None` until the first tick has run.
#[derive(Debug, Clone, Default)]
pub struct LatestSnapshot(Arc<Mutex<Option<GameStateSnapshot>>>);

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, snapshot: GameStateSnapshot) {
        if let Ok(mut lock) = self.0.lock() {
            *lock = Some(snapshot);
        }
    }

    /// Clone of the latest snapshot. A poisoned lock reads as empty.
    pub fn get(&self) -> Option<GameStateSnapshot> {
        self.0.lock().ok().and_then(|lock| lock.clone())
    }
}
