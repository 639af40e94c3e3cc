//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

/// Fire-and-forget sound cues, collected per tick and handed to the audio bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioCue {
    /// A fresh mission was started.
    NewMission,
    /// Player interceptor left its base.
    PlayerLaunch,
    /// Enemy warhead appeared.
    EnemyLaunch,
    /// An enemy missile was caught by a blast (scored).
    Intercept,
    /// Enemy warhead reached the ground.
    EnemyImpact,
    /// A city or base was destroyed.
    StructureDestroyed,
    WaveStart { wave: u32 },
    WaveClear { wave: u32, bonus: u32 },
    /// Launch requested with every base empty or destroyed.
    NoAmmo,
    GameOver,
}
