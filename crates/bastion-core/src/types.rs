//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Position in world space. x = right, y = up, z is carried but unused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Axis-aligned playfield extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the ground plane (z = 0).
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Full 3D distance.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec3().distance(other.as_dvec3())
    }

    /// Distance in the x/y plane, ignoring depth.
    pub fn planar_distance_to(&self, other: &Position) -> f64 {
        self.as_dvec3().truncate().distance(other.as_dvec3().truncate())
    }

    /// Linear interpolation; `t` is not clamped.
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        self.as_dvec3().lerp(other.as_dvec3(), t).into()
    }

    /// Offset by a vertical amount.
    pub fn raised(&self, dy: f64) -> Position {
        Position::new(self.x, self.y + dy, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl WorldBounds {
    /// Clamp a point into the bounds shrunk by the given insets. Depth is zeroed.
    pub fn clamp_inset(&self, pos: Position, side: f64, bottom: f64, top: f64) -> Position {
        Position::planar(
            clamp(pos.x, self.left + side, self.right - side),
            clamp(pos.y, self.bottom + bottom, self.top - top),
        )
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Clamp `value` into `[min, max]`. Unlike `f64::clamp` this never panics
/// when the range is inverted; `min` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
