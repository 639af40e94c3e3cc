//! Wave spawning system: paces enemy launches and builds enemy missiles.
//!
//! Target selection is weighted: every living city appears twice in the pool
//! and every living base once. With nothing left standing, missiles aim at a
//! random ground point instead.

use hecs::Entity;

use bastion_core::components::{EnemyMissile, Flight, Target};
use bastion_core::constants::*;
use bastion_core::enums::TargetKind;
use bastion_core::events::AudioCue;
use bastion_core::types::Position;

use crate::mission::{split_chance, SpawnState};
use crate::random::RandomSource;
use crate::registry::EntityRegistry;

/// Count down the spawn timer and launch at most one enemy missile.
///
/// A degenerate spawn still counts toward the wave total.
pub fn run(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    spawn: &mut SpawnState,
    wave: u32,
    delta: f64,
    cues: &mut Vec<AudioCue>,
) {
    spawn.timer -= delta;
    if spawn.exhausted() || spawn.timer > 0.0 {
        return;
    }
    spawn_enemy_missile(registry, rng, wave, None, cues);
    spawn.spawned += 1;
    spawn.timer = rng.range(spawn.rate * SPAWN_JITTER_MIN, spawn.rate * SPAWN_JITTER_MAX);
}

/// Choose what a new enemy missile aims at.
pub fn pick_target(registry: &EntityRegistry, rng: &mut impl RandomSource) -> Target {
    let mut pool: Vec<(TargetKind, Entity)> = Vec::new();
    for city in registry.alive_cities() {
        pool.extend(std::iter::repeat((TargetKind::City, city)).take(CITY_TARGET_WEIGHT));
    }
    for base in registry.alive_bases() {
        pool.extend(std::iter::repeat((TargetKind::Base, base)).take(BASE_TARGET_WEIGHT));
    }

    let chosen = if pool.is_empty() {
        None
    } else {
        Some(pool[rng.pick_index(pool.len())])
    };

    if let Some((kind, entity)) = chosen {
        if let Some(position) = registry.position_of(entity) {
            return Target {
                kind,
                entity: Some(entity),
                position,
            };
        }
    }

    let x = rng.range(
        WORLD.left + GROUND_TARGET_SIDE_INSET,
        WORLD.right - GROUND_TARGET_SIDE_INSET,
    );
    Target {
        kind: TargetKind::Ground,
        entity: None,
        position: Position::planar(x, WORLD.bottom + GROUND_TARGET_ALTITUDE),
    }
}

/// Build one enemy missile. `origin` is set for split fragments, which start
/// at the parent's position and may never split themselves.
///
/// Returns `None` for a degenerate flight (start within one unit of target).
pub fn spawn_enemy_missile(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    wave: u32,
    origin: Option<Position>,
    cues: &mut Vec<AudioCue>,
) -> Option<Entity> {
    let target = pick_target(registry, rng);
    let start = match origin {
        Some(position) => position,
        None => {
            let x = rng.range(
                WORLD.left + ENEMY_SPAWN_SIDE_INSET,
                WORLD.right - ENEMY_SPAWN_SIDE_INSET,
            );
            let y = rng.range(
                WORLD.top + ENEMY_SPAWN_ALTITUDE_MIN,
                WORLD.top + ENEMY_SPAWN_ALTITUDE_MAX,
            );
            Position::planar(x, y)
        }
    };

    if start.distance_to(&target.position) <= MIN_FLIGHT_DISTANCE {
        log::debug!("discarding degenerate enemy spawn at ({:.1}, {:.1})", start.x, start.y);
        return None;
    }

    let speed = rng.range(ENEMY_SPEED_MIN, ENEMY_SPEED_MAX) + wave as f64 * ENEMY_SPEED_PER_WAVE;
    let can_split = wave >= SPLIT_FIRST_WAVE && origin.is_none() && rng.chance(split_chance(wave));
    let split_at = rng.range(SPLIT_AT_MIN, SPLIT_AT_MAX);

    let entity = registry.add_enemy_missile(
        Flight::new(start, target.position, speed),
        EnemyMissile {
            target,
            can_split,
            split_at,
            did_split: false,
        },
    );
    cues.push(AudioCue::EnemyLaunch);
    Some(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;
    use crate::world_setup;
    use bastion_core::bridges::NullBridge;
    use bastion_core::components::{Base, City};

    fn mission_registry() -> EntityRegistry {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        world_setup::setup_mission(&mut reg);
        reg
    }

    #[test]
    fn cities_weigh_double() {
        let reg = mission_registry();
        // Pool: 6 cities x2 then 3 bases = 15 slots.
        let mut rng = SequenceSource::new(vec![0.5 / 15.0, 1.5 / 15.0, 2.5 / 15.0, 12.5 / 15.0]);
        let a = pick_target(&reg, &mut rng);
        let b = pick_target(&reg, &mut rng);
        let c = pick_target(&reg, &mut rng);
        let d = pick_target(&reg, &mut rng);
        assert_eq!(a.kind, TargetKind::City);
        assert_eq!(a.entity, b.entity, "each city fills two adjacent slots");
        assert_ne!(b.entity, c.entity);
        assert_eq!(d.kind, TargetKind::Base);
        assert_eq!(d.entity, Some(reg.bases()[0]));
    }

    #[test]
    fn ground_fallback_when_everything_is_down() {
        let mut reg = mission_registry();
        for e in reg.cities().to_vec() {
            reg.world_mut().get::<&mut City>(e).unwrap().alive = false;
        }
        for e in reg.bases().to_vec() {
            reg.world_mut().get::<&mut Base>(e).unwrap().alive = false;
        }
        let mut rng = SequenceSource::new(vec![0.5]);
        let t = pick_target(&reg, &mut rng);
        assert_eq!(t.kind, TargetKind::Ground);
        assert!(t.entity.is_none());
        assert_eq!(t.position.x, 0.0);
        assert_eq!(t.position.y, WORLD.bottom + 16.0);
    }

    #[test]
    fn fragments_never_split() {
        let mut reg = mission_registry();
        let mut cues = Vec::new();
        // Every roll is 0.0: chance() would pass, so only the origin rule stops it.
        let mut rng = SequenceSource::new(vec![0.0]);
        let e = spawn_enemy_missile(
            &mut reg,
            &mut rng,
            8,
            Some(Position::planar(0.0, 200.0)),
            &mut cues,
        )
        .unwrap();
        let missile = *reg.world().get::<&EnemyMissile>(e).unwrap();
        assert!(!missile.can_split);
        assert_eq!(cues, vec![AudioCue::EnemyLaunch]);
    }

    #[test]
    fn early_waves_never_split() {
        let mut reg = mission_registry();
        let mut cues = Vec::new();
        let mut rng = SequenceSource::new(vec![0.0]);
        let e = spawn_enemy_missile(&mut reg, &mut rng, 3, None, &mut cues).unwrap();
        assert!(!reg.world().get::<&EnemyMissile>(e).unwrap().can_split);

        let e = spawn_enemy_missile(&mut reg, &mut rng, 4, None, &mut cues).unwrap();
        assert!(reg.world().get::<&EnemyMissile>(e).unwrap().can_split);
    }

    #[test]
    fn degenerate_spawn_creates_nothing() {
        let mut reg = mission_registry();
        let mut cues = Vec::new();
        let mut rng = SequenceSource::new(vec![0.0]);
        // First slot is the first city; start the fragment right on top of it.
        let city = reg.position_of(reg.cities()[0]).unwrap();
        let spawned = spawn_enemy_missile(&mut reg, &mut rng, 1, Some(city), &mut cues);
        assert!(spawned.is_none());
        assert!(cues.is_empty());
        assert_eq!(reg.enemy_missile_count(), 0);
    }

    #[test]
    fn timer_paces_spawns() {
        let mut reg = mission_registry();
        let mut cues = Vec::new();
        let mut rng = SequenceSource::new(vec![0.5]);
        let mut spawn = SpawnState::for_wave(1);

        run(&mut reg, &mut rng, &mut spawn, 1, 0.3, &mut cues);
        assert_eq!(spawn.spawned, 0);
        run(&mut reg, &mut rng, &mut spawn, 1, 0.3, &mut cues);
        assert_eq!(spawn.spawned, 1);
        // Midpoint jitter: rate * 1.0.
        assert!((spawn.timer - 0.96).abs() < 1e-9);
        assert_eq!(reg.enemy_missile_count(), 1);
    }

    #[test]
    fn exhausted_wave_stops_spawning() {
        let mut reg = mission_registry();
        let mut cues = Vec::new();
        let mut rng = SequenceSource::new(vec![0.5]);
        let mut spawn = SpawnState {
            spawned: 10,
            to_spawn: 10,
            timer: 0.0,
            rate: 0.96,
        };
        run(&mut reg, &mut rng, &mut spawn, 1, 0.033, &mut cues);
        assert_eq!(spawn.spawned, 10);
        assert_eq!(reg.enemy_missile_count(), 0);
    }
}
