//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level mission phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// No mission has been started yet.
    #[default]
    Idle,
    /// Enemies spawning, combat in progress.
    Active,
    /// Between-wave cutscene; no spawning or launches.
    Transition,
    /// All cities lost. Terminal until the next mission reset.
    GameOver,
}

/// Which blast produced an explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// Enemy warhead detonation. Damages cities and bases.
    Warhead,
    /// Player interceptor detonation. Only harms missiles.
    Defense,
}

impl ExplosionKind {
    pub fn can_damage_ground(self) -> bool {
        matches!(self, ExplosionKind::Warhead)
    }
}

/// What an enemy missile is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    City,
    Base,
    /// Open ground; used once no structure is left standing.
    Ground,
}

/// Visual category handed to the render bridge on entity creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    City,
    Base,
    EnemyMissile,
    /// Enemy missile that will fragment mid-flight.
    SplittingEnemyMissile,
    PlayerMissile,
    WarheadExplosion,
    DefenseExplosion,
}

impl From<ExplosionKind> for VisualKind {
    fn from(kind: ExplosionKind) -> Self {
        match kind {
            ExplosionKind::Warhead => VisualKind::WarheadExplosion,
            ExplosionKind::Defense => VisualKind::DefenseExplosion,
        }
    }
}
