//! Audio bridge that writes cues to the log instead of a sound device.

use bastion_core::bridges::{AudioBridge, BridgeError};
use bastion_core::events::AudioCue;

/// Logs every cue. Mission-level cues go to `info`, combat chatter to `trace`.
#[derive(Debug, Default)]
pub struct LogAudio {
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cues played so far.
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioBridge for LogAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), BridgeError> {
        self.played += 1;
        match cue {
            AudioCue::NewMission
            | AudioCue::WaveStart { .. }
            | AudioCue::WaveClear { .. }
            | AudioCue::GameOver => log::info!("audio: {cue:?}"),
            AudioCue::NoAmmo | AudioCue::StructureDestroyed => log::debug!("audio: {cue:?}"),
            _ => log::trace!("audio: {cue:?}"),
        }
        Ok(())
    }
}
