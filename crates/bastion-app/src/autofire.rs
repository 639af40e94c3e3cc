//! Autofire driver for unattended soak runs.
//!
//! Reads each snapshot and decides whether to fire at the lowest uncovered
//! enemy warhead. Restarts the mission whenever it is idle or lost.

use bastion_core::commands::PlayerCommand;
use bastion_core::enums::{ExplosionKind, WavePhase};
use bastion_core::state::{GameStateSnapshot, MissileView};
use bastion_core::types::Position;

/// Minimum time between two interceptor launches (seconds).
pub const FIRE_COOLDOWN_SECS: f64 = 0.25;

/// How far along its path (in progress units) a target is led.
const LEAD_PROGRESS: f64 = 0.08;

/// An aim point closer than this to an inbound interceptor or live defense
/// blast counts as already covered.
const COVER_RADIUS: f64 = 45.0;

#[derive(Debug, Clone)]
pub struct Autofire {
    cooldown: f64,
    ready_in: f64,
}

impl Default for Autofire {
    fn default() -> Self {
        Self::new(FIRE_COOLDOWN_SECS)
    }
}

impl Autofire {
    pub fn new(cooldown: f64) -> Self {
        Self {
            cooldown: cooldown.max(0.0),
            ready_in: 0.0,
        }
    }

    /// Pick the next command given the latest snapshot and the time elapsed
    /// since the previous call.
    pub fn next_command(&mut self, snapshot: &GameStateSnapshot, dt: f64) -> Option<PlayerCommand> {
        match snapshot.phase {
            WavePhase::Idle | WavePhase::GameOver => {
                self.ready_in = 0.0;
                return Some(PlayerCommand::StartMission);
            }
            WavePhase::Transition => return None,
            WavePhase::Active => {}
        }

        self.ready_in = (self.ready_in - dt.max(0.0)).max(0.0);
        if self.ready_in > 0.0 || !has_armed_base(snapshot) {
            return None;
        }

        let aim = snapshot
            .enemy_missiles
            .iter()
            .map(lead_point)
            .filter(|aim| !is_covered(snapshot, aim))
            .min_by(|a, b| a.y.total_cmp(&b.y))?;

        self.ready_in = self.cooldown;
        Some(PlayerCommand::Launch {
            x: aim.x,
            y: aim.y,
            base: None,
        })
    }
}

fn has_armed_base(snapshot: &GameStateSnapshot) -> bool {
    snapshot.bases.iter().any(|b| b.alive && b.ammo > 0)
}

fn lead_point(missile: &MissileView) -> Position {
    let t = (missile.progress + LEAD_PROGRESS).min(1.0);
    missile.start.lerp(&missile.end, t)
}

fn is_covered(snapshot: &GameStateSnapshot, aim: &Position) -> bool {
    let inbound = snapshot
        .player_missiles
        .iter()
        .any(|m| m.end.planar_distance_to(aim) < COVER_RADIUS);
    let blasting = snapshot
        .explosions
        .iter()
        .filter(|e| e.kind == ExplosionKind::Defense)
        .any(|e| e.position.planar_distance_to(aim) < COVER_RADIUS.max(e.max_radius));
    inbound || blasting
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::state::{BaseView, ExplosionView};

    fn missile(start: Position, end: Position, progress: f64) -> MissileView {
        MissileView {
            start,
            end,
            position: start.lerp(&end, progress),
            progress,
            can_split: false,
        }
    }

    fn active_snapshot() -> GameStateSnapshot {
        GameStateSnapshot {
            phase: WavePhase::Active,
            bases: vec![BaseView {
                position: Position::planar(0.0, -290.0),
                alive: true,
                ammo: 10,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_restarts_idle_and_lost_missions() {
        let mut auto = Autofire::default();
        let idle = GameStateSnapshot::default();
        assert!(matches!(
            auto.next_command(&idle, 0.016),
            Some(PlayerCommand::StartMission)
        ));
        let lost = GameStateSnapshot {
            phase: WavePhase::GameOver,
            ..Default::default()
        };
        assert!(matches!(
            auto.next_command(&lost, 0.016),
            Some(PlayerCommand::StartMission)
        ));
    }

    #[test]
    fn test_holds_fire_during_cutscene() {
        let mut auto = Autofire::default();
        let mut snap = active_snapshot();
        snap.phase = WavePhase::Transition;
        snap.enemy_missiles.push(missile(
            Position::planar(0.0, 400.0),
            Position::planar(0.0, -290.0),
            0.5,
        ));
        assert!(auto.next_command(&snap, 0.016).is_none());
    }

    #[test]
    fn test_fires_at_lowest_warhead_with_lead() {
        let mut auto = Autofire::default();
        let mut snap = active_snapshot();
        snap.enemy_missiles.push(missile(
            Position::planar(-200.0, 400.0),
            Position::planar(-200.0, -290.0),
            0.1,
        ));
        snap.enemy_missiles.push(missile(
            Position::planar(300.0, 400.0),
            Position::planar(300.0, -290.0),
            0.5,
        ));
        match auto.next_command(&snap, 0.016) {
            Some(PlayerCommand::Launch { x, y, base }) => {
                assert_eq!(x, 300.0);
                // progress 0.58 along a 690-unit drop
                assert!((y - (400.0 - 0.58 * 690.0)).abs() < 1e-9);
                assert!(base.is_none());
            }
            other => panic!("expected a launch, got {other:?}"),
        }
    }

    #[test]
    fn test_cooldown_between_launches() {
        let mut auto = Autofire::new(0.25);
        let mut snap = active_snapshot();
        snap.enemy_missiles.push(missile(
            Position::planar(0.0, 400.0),
            Position::planar(0.0, -290.0),
            0.3,
        ));
        assert!(auto.next_command(&snap, 0.1).is_some());
        assert!(auto.next_command(&snap, 0.1).is_none());
        assert!(auto.next_command(&snap, 0.1).is_none());
        assert!(auto.next_command(&snap, 0.1).is_some());
    }

    #[test]
    fn test_skips_covered_targets() {
        let mut auto = Autofire::default();
        let mut snap = active_snapshot();
        let threat = missile(
            Position::planar(100.0, 400.0),
            Position::planar(100.0, -290.0),
            0.4,
        );
        let aim = lead_point(&threat);
        snap.enemy_missiles.push(threat);
        snap.explosions.push(ExplosionView {
            kind: ExplosionKind::Defense,
            position: aim,
            radius: 20.0,
            max_radius: 60.0,
        });
        assert!(auto.next_command(&snap, 0.016).is_none());

        snap.explosions[0].kind = ExplosionKind::Warhead;
        assert!(auto.next_command(&snap, 0.016).is_some());
    }

    #[test]
    fn test_silent_without_ammo() {
        let mut auto = Autofire::default();
        let mut snap = active_snapshot();
        snap.bases[0].ammo = 0;
        snap.enemy_missiles.push(missile(
            Position::planar(0.0, 400.0),
            Position::planar(0.0, -290.0),
            0.3,
        ));
        assert!(auto.next_command(&snap, 0.016).is_none());
    }
}
