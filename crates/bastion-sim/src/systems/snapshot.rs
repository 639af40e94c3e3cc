//! Snapshot system: reads the registry and mission state and builds a
//! complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use bastion_core::components::*;
use bastion_core::enums::WavePhase;
use bastion_core::events::AudioCue;
use bastion_core::state::*;
use bastion_core::types::{Position, SimTime};

use crate::mission::MissionState;
use crate::registry::{missile_view, EntityRegistry};
use crate::score::ScoreKeeper;

/// Build a complete GameStateSnapshot from the current state.
pub fn build_snapshot(
    registry: &EntityRegistry,
    time: &SimTime,
    mission: &MissionState,
    score: &ScoreKeeper,
    cutscene_secs: f64,
    audio_cues: Vec<AudioCue>,
) -> GameStateSnapshot {
    let cities = build_cities(registry);
    let alive_city_count = cities.iter().filter(|c| c.alive).count() as u32;

    GameStateSnapshot {
        time: *time,
        phase: mission.phase,
        hud: HudView {
            score: score.score(),
            high_score: score.high_score(),
            wave: mission.display_wave(),
            alive_city_count,
            status_message: mission.status.clone(),
        },
        cities,
        bases: build_bases(registry),
        enemy_missiles: build_enemy_missiles(registry),
        player_missiles: build_player_missiles(registry),
        explosions: build_explosions(registry),
        cutscene: build_cutscene(mission, cutscene_secs),
        audio_cues,
    }
}

fn build_cities(registry: &EntityRegistry) -> Vec<CityView> {
    registry
        .cities()
        .iter()
        .filter_map(|&e| {
            let city = *registry.world().get::<&City>(e).ok()?;
            Some(CityView {
                position: registry.position_of(e)?,
                alive: city.alive,
            })
        })
        .collect()
}

fn build_bases(registry: &EntityRegistry) -> Vec<BaseView> {
    registry
        .bases()
        .iter()
        .filter_map(|&e| {
            let base = *registry.world().get::<&Base>(e).ok()?;
            Some(BaseView {
                position: registry.position_of(e)?,
                alive: base.alive,
                ammo: base.ammo,
            })
        })
        .collect()
}

fn build_enemy_missiles(registry: &EntityRegistry) -> Vec<MissileView> {
    registry
        .world()
        .query::<(&Position, &Flight, &EnemyMissile)>()
        .iter()
        .map(|(_, (pos, flight, missile))| missile_view(flight, *pos, missile.can_split))
        .collect()
}

fn build_player_missiles(registry: &EntityRegistry) -> Vec<MissileView> {
    registry
        .world()
        .query::<(&Position, &Flight, &PlayerMissile)>()
        .iter()
        .map(|(_, (pos, flight, _))| missile_view(flight, *pos, false))
        .collect()
}

fn build_explosions(registry: &EntityRegistry) -> Vec<ExplosionView> {
    registry
        .world()
        .query::<(&Position, &Explosion)>()
        .iter()
        .map(|(_, (pos, explosion))| ExplosionView {
            kind: explosion.kind,
            position: *pos,
            radius: explosion.radius,
            max_radius: explosion.max_radius,
        })
        .collect()
}

fn build_cutscene(mission: &MissionState, cutscene_secs: f64) -> Option<CutsceneView> {
    if mission.phase != WavePhase::Transition {
        return None;
    }
    let progress = if cutscene_secs > 0.0 {
        (1.0 - mission.transition_remaining / cutscene_secs).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(CutsceneView {
        wave: mission.wave,
        bonus: mission.last_bonus,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::setup_mission;
    use bastion_core::bridges::NullBridge;

    #[test]
    fn idle_snapshot_shows_layout() {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        setup_mission(&mut reg);
        let score = ScoreKeeper::new(Box::new(NullBridge));
        let snap = build_snapshot(
            &reg,
            &SimTime::default(),
            &MissionState::default(),
            &score,
            3.15,
            Vec::new(),
        );
        assert_eq!(snap.cities.len(), 6);
        assert_eq!(snap.bases.len(), 3);
        assert_eq!(snap.hud.alive_city_count, 6);
        assert_eq!(snap.hud.wave, 1);
        assert!(snap.cutscene.is_none());
        assert!(snap.enemy_missiles.is_empty());
    }

    #[test]
    fn cutscene_progress() {
        let reg = EntityRegistry::new(Box::new(NullBridge));
        let score = ScoreKeeper::new(Box::new(NullBridge));
        let mission = MissionState {
            phase: WavePhase::Transition,
            wave: 2,
            transition_remaining: 1.0,
            last_bonus: 640,
            ..Default::default()
        };
        let snap = build_snapshot(&reg, &SimTime::default(), &mission, &score, 4.0, Vec::new());
        let cut = snap.cutscene.unwrap();
        assert_eq!(cut.wave, 2);
        assert_eq!(cut.bonus, 640);
        assert!((cut.progress - 0.75).abs() < 1e-12);
    }
}
