//! Collision resolution: interceptions, ground splash and direct impacts.
//!
//! Any explosion detonates every enemy missile inside its radius. Only
//! warhead blasts hurt the ground, and they reach a little less far than
//! they look (see [`ground_damage_radius`]).

use hecs::Entity;

use bastion_core::components::{Base, City, Explosion, Target};
use bastion_core::constants::*;
use bastion_core::enums::ExplosionKind;
use bastion_core::events::AudioCue;
use bastion_core::types::Position;

use crate::random::RandomSource;
use crate::registry::EntityRegistry;
use crate::score::ScoreKeeper;
use crate::world_setup;

/// Points for a missile caught in a blast of the given kind.
pub fn interception_points(kind: ExplosionKind) -> u32 {
    match kind {
        ExplosionKind::Defense => INTERCEPT_POINTS,
        ExplosionKind::Warhead => CHAIN_POINTS,
    }
}

/// Reach of a warhead blast against cities and bases.
pub fn ground_damage_radius(radius: f64) -> f64 {
    GROUND_DAMAGE_MIN_RADIUS.max(radius * GROUND_DAMAGE_RATIO)
}

/// Resolve one explosion against everything it overlaps.
///
/// `score` is `None` once the mission has failed; missiles still detonate but
/// award nothing.
pub fn apply_explosion(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    center: Position,
    explosion: &Explosion,
    cues: &mut Vec<AudioCue>,
    mut score: Option<&mut ScoreKeeper>,
) {
    let hits: Vec<Entity> = registry
        .enemy_missiles()
        .into_iter()
        .filter(|&e| {
            registry
                .position_of(e)
                .is_some_and(|p| p.distance_to(&center) <= explosion.radius)
        })
        .collect();

    let points = interception_points(explosion.kind);
    for missile in hits {
        detonate_enemy_missile(registry, rng, missile, points, cues, score.as_deref_mut());
    }

    if !explosion.can_damage_ground() {
        return;
    }

    let reach = ground_damage_radius(explosion.radius);
    let mut structures = registry.cities().to_vec();
    structures.extend_from_slice(registry.bases());
    for entity in structures {
        let in_reach = registry
            .position_of(entity)
            .is_some_and(|p| p.planar_distance_to(&center) <= reach);
        if in_reach {
            destroy_structure(registry, entity, cues);
        }
    }
}

/// Remove an enemy missile and leave a warhead blast where it was.
pub fn detonate_enemy_missile(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    missile: Entity,
    points: u32,
    cues: &mut Vec<AudioCue>,
    score: Option<&mut ScoreKeeper>,
) -> bool {
    let Some(position) = registry.position_of(missile) else {
        return false;
    };
    registry.remove(missile);
    world_setup::spawn_explosion(registry, rng, position, ExplosionKind::Warhead);

    if let Some(score) = score {
        if points > 0 {
            score.add(points);
            cues.push(AudioCue::Intercept);
        }
    }
    true
}

/// An enemy missile reached its aim point.
///
/// A warhead blast always appears at `end`; a city or base target that is
/// still standing is destroyed outright.
pub fn enemy_impact(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    missile: Entity,
    target: &Target,
    end: Position,
    cues: &mut Vec<AudioCue>,
) {
    world_setup::spawn_explosion(registry, rng, end, ExplosionKind::Warhead);
    if let Some(entity) = target.entity {
        destroy_structure(registry, entity, cues);
    }
    cues.push(AudioCue::EnemyImpact);
    registry.remove(missile);
}

/// Knock out a city or base. Destroying something already down is a no-op.
/// A destroyed base loses its remaining ammo.
pub fn destroy_structure(
    registry: &mut EntityRegistry,
    entity: Entity,
    cues: &mut Vec<AudioCue>,
) -> bool {
    let world = registry.world();
    let destroyed = if let Ok(mut city) = world.get::<&mut City>(entity) {
        std::mem::replace(&mut city.alive, false)
    } else if let Ok(mut base) = world.get::<&mut Base>(entity) {
        let was_alive = std::mem::replace(&mut base.alive, false);
        base.ammo = 0;
        was_alive
    } else {
        false
    };

    if destroyed {
        log::info!("structure {entity:?} destroyed");
        registry.notify_updated(entity);
        cues.push(AudioCue::StructureDestroyed);
    }
    destroyed
}
