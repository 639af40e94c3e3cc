//! Missile kinematics.
//!
//! Flights are straight lines: progress advances by `speed * dt / distance`
//! and the position is a lerp between start and end. Arrival hands enemy
//! warheads to the impact path and turns interceptors into defense blasts.

use bastion_core::components::{EnemyMissile, Flight, PlayerMissile};
use bastion_core::constants::SPLIT_FRAGMENTS;
use bastion_core::enums::ExplosionKind;
use bastion_core::events::AudioCue;
use bastion_core::types::Position;

use crate::random::RandomSource;
use crate::registry::EntityRegistry;
use crate::systems::{collision, wave_spawner};
use crate::world_setup;

/// Advance a flight's progress by one step. Returns the new position,
/// pinned to `end` once the flight has arrived.
pub fn advance(flight: &mut Flight, delta: f64) -> Position {
    flight.progress += flight.speed * delta / flight.distance;
    if flight.arrived() {
        flight.end
    } else {
        flight.start.lerp(&flight.end, flight.progress)
    }
}

/// Move every enemy missile, splitting and impacting as they go.
///
/// Fragments spawned this tick start moving on the next one. With
/// `spawning` off, a missile reaching its split point is marked as split but
/// releases no fragments.
pub fn run_enemy_missiles(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    wave: u32,
    delta: f64,
    spawning: bool,
    cues: &mut Vec<AudioCue>,
) {
    for entity in registry.enemy_missiles() {
        let Ok((flight, missile, position)) = registry
            .world_mut()
            .query_one_mut::<(&mut Flight, &mut EnemyMissile, &Position)>(entity)
        else {
            continue;
        };

        // Split check uses the position from before this step.
        let split_origin = *position;
        let next = advance(flight, delta);
        let split_now = missile.can_split && !missile.did_split && flight.progress >= missile.split_at;
        if split_now {
            missile.did_split = true;
        }
        let arrived = flight.arrived();
        let target = missile.target;
        let end = flight.end;

        if split_now && spawning {
            log::debug!("enemy missile {entity:?} fragmenting at ({:.1}, {:.1})", split_origin.x, split_origin.y);
            for _ in 0..SPLIT_FRAGMENTS {
                wave_spawner::spawn_enemy_missile(registry, rng, wave, Some(split_origin), cues);
            }
        }

        registry.set_position(entity, next);
        if arrived {
            collision::enemy_impact(registry, rng, entity, &target, end, cues);
            continue;
        }
        registry.notify_updated(entity);
    }
}

/// Move every interceptor. Arrivals detonate at the aim point.
pub fn run_player_missiles(registry: &mut EntityRegistry, rng: &mut impl RandomSource, delta: f64) {
    for entity in registry.player_missiles() {
        let Ok((flight, _)) = registry
            .world_mut()
            .query_one_mut::<(&mut Flight, &PlayerMissile)>(entity)
        else {
            continue;
        };
        let next = advance(flight, delta);
        let arrived = flight.arrived();
        let end = flight.end;

        if arrived {
            registry.remove(entity);
            world_setup::spawn_explosion(registry, rng, end, ExplosionKind::Defense);
            continue;
        }
        registry.set_position(entity, next);
        registry.notify_updated(entity);
    }
}
