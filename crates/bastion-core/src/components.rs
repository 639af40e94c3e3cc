//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems, not
//! components; the few methods here are pure accessors.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// A defended city. Once destroyed it stays down for the rest of the mission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct City {
    pub alive: bool,
}

/// An interceptor launch base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Base {
    pub alive: bool,
    /// Interceptors remaining, `0..=MAX_BASE_AMMO`.
    pub ammo: u32,
}

/// Enemy missile target. `entity` is `None` for ground targets.
///
/// `position` is a copy taken at spawn time, so destroying the entity later
/// does not move the aim point.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub kind: TargetKind,
    pub entity: Option<hecs::Entity>,
    pub position: Position,
}

/// Straight-line flight shared by enemy and player missiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Flight {
    pub start: Position,
    pub end: Position,
    /// `|end - start|`, always > `MIN_FLIGHT_DISTANCE`.
    pub distance: f64,
    /// World units per second.
    pub speed: f64,
    /// Fraction of the flight covered, non-decreasing. Reaching 1.0 ends it.
    pub progress: f64,
}

impl Flight {
    pub fn new(start: Position, end: Position, speed: f64) -> Self {
        Self {
            start,
            end,
            distance: start.distance_to(&end),
            speed,
            progress: 0.0,
        }
    }

    pub fn arrived(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Enemy warhead.
#[derive(Debug, Clone, Copy)]
pub struct EnemyMissile {
    pub target: Target,
    pub can_split: bool,
    /// Flight progress at which the split happens.
    pub split_at: f64,
    pub did_split: bool,
}

/// Marks an entity as a player interceptor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerMissile;

/// Expanding then contracting blast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub radius: f64,
    pub max_radius: f64,
    /// Growth speed (units per second); decay runs at a fraction of it.
    pub growth: f64,
    pub shrinking: bool,
}

impl Explosion {
    pub fn can_damage_ground(&self) -> bool {
        self.kind.can_damage_ground()
    }
}

/// Opaque handle issued by the render bridge. The simulation stores it but
/// never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Component linking an entity to its presentation-side counterpart.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualLink(pub Option<VisualHandle>);
