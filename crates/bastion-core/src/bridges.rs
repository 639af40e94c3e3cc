//! Contracts for the presentation and persistence collaborators.
//!
//! The simulation calls these but never depends on their success: every
//! error is logged and dropped at the call site.

use thiserror::Error;

use crate::components::VisualHandle;
use crate::enums::VisualKind;
use crate::events::AudioCue;
use crate::state::EntityView;

/// Failure reported by an external collaborator.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Receives entity lifecycle notifications.
pub trait RenderBridge {
    /// A new entity exists. The returned handle is stored with the entity and
    /// handed back on removal.
    fn on_entity_created(
        &mut self,
        entity: hecs::Entity,
        kind: VisualKind,
    ) -> Result<VisualHandle, BridgeError>;

    fn on_entity_updated(
        &mut self,
        entity: hecs::Entity,
        view: &EntityView,
    ) -> Result<(), BridgeError>;

    fn on_entity_removed(
        &mut self,
        entity: hecs::Entity,
        handle: Option<VisualHandle>,
    ) -> Result<(), BridgeError>;
}

/// Plays sound cues.
pub trait AudioBridge {
    fn play(&mut self, cue: AudioCue) -> Result<(), BridgeError>;
}

/// Durable high-score storage.
pub trait ScoreStore {
    fn load_high_score(&mut self) -> Result<u32, BridgeError>;
    fn save_high_score(&mut self, score: u32) -> Result<(), BridgeError>;
}

/// Bridge that accepts everything and does nothing. Used for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBridge;

impl RenderBridge for NullBridge {
    fn on_entity_created(
        &mut self,
        entity: hecs::Entity,
        _kind: VisualKind,
    ) -> Result<VisualHandle, BridgeError> {
        Ok(VisualHandle(entity.to_bits().get()))
    }

    fn on_entity_updated(
        &mut self,
        _entity: hecs::Entity,
        _view: &EntityView,
    ) -> Result<(), BridgeError> {
        Ok(())
    }

    fn on_entity_removed(
        &mut self,
        _entity: hecs::Entity,
        _handle: Option<VisualHandle>,
    ) -> Result<(), BridgeError> {
        Ok(())
    }
}

impl AudioBridge for NullBridge {
    fn play(&mut self, _cue: AudioCue) -> Result<(), BridgeError> {
        Ok(())
    }
}

impl ScoreStore for NullBridge {
    fn load_high_score(&mut self) -> Result<u32, BridgeError> {
        Ok(0)
    }

    fn save_high_score(&mut self, _score: u32) -> Result<(), BridgeError> {
        Ok(())
    }
}
