//! Game state snapshot: the complete visible state handed to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioCue;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: WavePhase,
    pub hud: HudView,
    pub cities: Vec<CityView>,
    pub bases: Vec<BaseView>,
    pub enemy_missiles: Vec<MissileView>,
    pub player_missiles: Vec<MissileView>,
    pub explosions: Vec<ExplosionView>,
    /// Present while the between-wave cutscene runs.
    pub cutscene: Option<CutsceneView>,
    pub audio_cues: Vec<AudioCue>,
}

/// Read-only HUD numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    pub high_score: u32,
    /// Current wave; shows 1 before the first wave begins.
    pub wave: u32,
    pub alive_city_count: u32,
    pub status_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityView {
    pub position: Position,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseView {
    pub position: Position,
    pub alive: bool,
    pub ammo: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissileView {
    pub start: Position,
    pub end: Position,
    pub position: Position,
    pub progress: f64,
    /// Enemy missile flagged to fragment; always false for interceptors.
    pub can_split: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub kind: ExplosionKind,
    pub position: Position,
    pub radius: f64,
    pub max_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutsceneView {
    /// Wave that was just cleared.
    pub wave: u32,
    pub bonus: u32,
    /// 0.0 at cutscene start, 1.0 when the next wave begins.
    pub progress: f64,
}

/// Per-entity state pushed to the render bridge on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityView {
    City(CityView),
    Base(BaseView),
    EnemyMissile(MissileView),
    PlayerMissile(MissileView),
    Explosion(ExplosionView),
}
