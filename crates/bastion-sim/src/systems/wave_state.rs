//! Wave state machine.
//!
//! Idle -> Active -> Transition -> Active ... with GameOver reachable from
//! Active or Transition the moment the last city falls. GameOver holds until
//! a new mission starts.

use bastion_core::components::Base;
use bastion_core::constants::*;
use bastion_core::enums::WavePhase;
use bastion_core::events::AudioCue;

use crate::mission::{format_points, MissionState, SpawnState};
use crate::registry::EntityRegistry;
use crate::score::ScoreKeeper;

/// End-of-wave bonus: 5 per interceptor left in living bases plus 100 per
/// surviving city.
pub fn compute_bonus(registry: &EntityRegistry) -> u32 {
    let ammo: u32 = registry
        .bases()
        .iter()
        .filter_map(|&e| registry.world().get::<&Base>(e).ok().map(|b| *b))
        .filter(|b| b.alive)
        .map(|b| b.ammo)
        .sum();
    let cities = registry.alive_cities().len() as u32;
    ammo * AMMO_BONUS_PER_ROUND + cities * CITY_BONUS
}

/// Advance to the next wave: refill living bases and reset spawn pacing.
pub fn begin_next_wave(
    mission: &mut MissionState,
    registry: &mut EntityRegistry,
    cues: &mut Vec<AudioCue>,
) {
    mission.wave += 1;
    mission.phase = WavePhase::Active;
    mission.transition_remaining = 0.0;
    mission.spawn = SpawnState::for_wave(mission.wave);

    for base in registry.alive_bases() {
        if let Ok(mut b) = registry.world().get::<&mut Base>(base) {
            b.ammo = MAX_BASE_AMMO;
        }
        registry.notify_updated(base);
    }

    mission.status = format!(
        "Wave {} incoming. Defend all remaining cities.",
        mission.wave
    );
    log::info!(
        "wave {} begins: {} enemies, spawn rate {:.3}s",
        mission.wave,
        mission.spawn.to_spawn,
        mission.spawn.rate
    );
    cues.push(AudioCue::WaveStart { wave: mission.wave });
}

/// True once every enemy has been launched and nothing is left in the sky.
pub fn wave_resolved(mission: &MissionState, registry: &EntityRegistry) -> bool {
    mission.spawn.exhausted() && registry.dynamic_is_empty()
}

/// Enter the between-wave cutscene and pay the bonus. Returns the bonus.
pub fn complete_wave(
    mission: &mut MissionState,
    registry: &EntityRegistry,
    score: &mut ScoreKeeper,
    cutscene_secs: f64,
    cues: &mut Vec<AudioCue>,
) -> u32 {
    let bonus = compute_bonus(registry);
    if bonus > 0 {
        score.add(bonus);
    }
    mission.phase = WavePhase::Transition;
    mission.transition_remaining = cutscene_secs;
    mission.last_bonus = bonus;
    mission.status = format!(
        "Wave {} cleared. Bonus {}. Re-arming silos...",
        mission.wave, bonus
    );
    log::info!("wave {} cleared, bonus {bonus}", mission.wave);
    cues.push(AudioCue::WaveClear {
        wave: mission.wave,
        bonus,
    });
    bonus
}

/// Count down the cutscene; start the next wave when it runs out.
pub fn update_transition(
    mission: &mut MissionState,
    registry: &mut EntityRegistry,
    delta: f64,
    cues: &mut Vec<AudioCue>,
) {
    if mission.phase != WavePhase::Transition {
        return;
    }
    mission.transition_remaining -= delta;
    if mission.transition_remaining <= 0.0 {
        begin_next_wave(mission, registry, cues);
    }
}

/// Fail the mission if no city is left standing. Returns true on the tick
/// the mission fails.
pub fn check_game_over(
    mission: &mut MissionState,
    registry: &EntityRegistry,
    score: &ScoreKeeper,
    cues: &mut Vec<AudioCue>,
) -> bool {
    if !matches!(mission.phase, WavePhase::Active | WavePhase::Transition) {
        return false;
    }
    if !registry.alive_cities().is_empty() {
        return false;
    }

    mission.phase = WavePhase::GameOver;
    mission.transition_remaining = 0.0;
    let summary = if score.score() > score.high_score_at_mission_start() {
        format!(
            "Mission failed. New high score: {}.",
            format_points(score.high_score())
        )
    } else {
        format!(
            "Mission failed. Score {}. High {}.",
            format_points(score.score()),
            format_points(score.high_score())
        )
    };
    mission.status = format!("{summary} Start a new mission to play again.");
    log::info!(
        "mission failed on wave {} with score {}",
        mission.wave,
        score.score()
    );
    cues.push(AudioCue::GameOver);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::collision::destroy_structure;
    use crate::world_setup::setup_mission;
    use bastion_core::bridges::NullBridge;

    fn mission_registry() -> EntityRegistry {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        setup_mission(&mut reg);
        reg
    }

    #[test]
    fn bonus_counts_living_ammo_and_cities() {
        let mut reg = mission_registry();
        let mut cues = Vec::new();
        let bases = reg.bases().to_vec();
        for (e, ammo) in bases.iter().zip([4, 9, 7]) {
            reg.world().get::<&mut Base>(*e).unwrap().ammo = ammo;
        }
        let city = reg.cities()[3];
        destroy_structure(&mut reg, bases[1], &mut cues);
        destroy_structure(&mut reg, city, &mut cues);

        assert_eq!(compute_bonus(&reg), (4 + 7) * 5 + 5 * 100);
        assert_eq!(compute_bonus(&reg), 555);
    }

    #[test]
    fn wave_cycle() {
        let mut reg = mission_registry();
        let mut score = ScoreKeeper::new(Box::new(NullBridge));
        let mut mission = MissionState::default();
        let mut cues = Vec::new();

        begin_next_wave(&mut mission, &mut reg, &mut cues);
        assert_eq!(mission.phase, WavePhase::Active);
        assert_eq!(mission.wave, 1);
        assert_eq!(mission.spawn.to_spawn, 10);
        assert_eq!(mission.status, "Wave 1 incoming. Defend all remaining cities.");
        assert!(!wave_resolved(&mission, &reg));

        mission.spawn.spawned = mission.spawn.to_spawn;
        assert!(wave_resolved(&mission, &reg));

        let bonus = complete_wave(&mut mission, &reg, &mut score, 3.15, &mut cues);
        assert_eq!(bonus, 30 * 5 + 6 * 100);
        assert_eq!(score.score(), bonus);
        assert_eq!(mission.phase, WavePhase::Transition);
        assert_eq!(mission.status, "Wave 1 cleared. Bonus 750. Re-arming silos...");

        update_transition(&mut mission, &mut reg, 3.0, &mut cues);
        assert_eq!(mission.phase, WavePhase::Transition);
        update_transition(&mut mission, &mut reg, 0.2, &mut cues);
        assert_eq!(mission.phase, WavePhase::Active);
        assert_eq!(mission.wave, 2);
        assert_eq!(mission.spawn.spawned, 0);

        assert_eq!(
            cues,
            vec![
                AudioCue::WaveStart { wave: 1 },
                AudioCue::WaveClear { wave: 1, bonus: 750 },
                AudioCue::WaveStart { wave: 2 },
            ]
        );
    }

    #[test]
    fn refill_skips_dead_bases() {
        let mut reg = mission_registry();
        let mut mission = MissionState::default();
        let mut cues = Vec::new();
        let bases = reg.bases().to_vec();
        reg.world().get::<&mut Base>(bases[0]).unwrap().ammo = 2;
        destroy_structure(&mut reg, bases[2], &mut cues);

        begin_next_wave(&mut mission, &mut reg, &mut cues);
        assert_eq!(reg.world().get::<&Base>(bases[0]).unwrap().ammo, MAX_BASE_AMMO);
        assert_eq!(reg.world().get::<&Base>(bases[2]).unwrap().ammo, 0);
    }

    #[test]
    fn game_over_messages() {
        let mut reg = mission_registry();
        let mut score = ScoreKeeper::new(Box::new(NullBridge));
        let mut mission = MissionState::default();
        let mut cues = Vec::new();
        begin_next_wave(&mut mission, &mut reg, &mut cues);
        assert!(!check_game_over(&mut mission, &reg, &score, &mut cues));

        for city in reg.cities().to_vec() {
            destroy_structure(&mut reg, city, &mut cues);
        }
        score.add(1200);
        assert!(check_game_over(&mut mission, &reg, &score, &mut cues));
        assert_eq!(mission.phase, WavePhase::GameOver);
        assert_eq!(
            mission.status,
            "Mission failed. New high score: 1,200. Start a new mission to play again."
        );
        assert!(!check_game_over(&mut mission, &reg, &score, &mut cues), "fires once");

        // Second mission that does not beat the record.
        score.reset_for_mission();
        score.add(30);
        let mut mission = MissionState {
            phase: WavePhase::Active,
            ..Default::default()
        };
        check_game_over(&mut mission, &reg, &score, &mut cues);
        assert_eq!(
            mission.status,
            "Mission failed. Score 30. High 1,200. Start a new mission to play again."
        );
    }
}
