//! Explosion lifecycle: grow to peak, shrink, vanish.
//!
//! Each surviving explosion runs its collision pass right after its radius
//! update. Explosions spawned during the pass wait for the next tick.

use bastion_core::components::Explosion;
use bastion_core::constants::EXPLOSION_DECAY_FACTOR;
use bastion_core::events::AudioCue;

use crate::random::RandomSource;
use crate::registry::EntityRegistry;
use crate::score::ScoreKeeper;
use crate::systems::collision;

/// Step an explosion's radius. Growth caps at `max_radius` and flips the
/// blast into its shrinking phase; shrinking runs slower than growth.
pub fn update_radius(explosion: &mut Explosion, delta: f64) {
    if explosion.shrinking {
        explosion.radius -= explosion.growth * delta * EXPLOSION_DECAY_FACTOR;
    } else {
        explosion.radius += explosion.growth * delta;
        if explosion.radius >= explosion.max_radius {
            explosion.radius = explosion.max_radius;
            explosion.shrinking = true;
        }
    }
}

pub fn run(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    delta: f64,
    cues: &mut Vec<AudioCue>,
    mut score: Option<&mut ScoreKeeper>,
) {
    for entity in registry.explosions() {
        let Ok(explosion) = registry.world_mut().query_one_mut::<&mut Explosion>(entity) else {
            continue;
        };
        update_radius(explosion, delta);
        let explosion = *explosion;

        if explosion.radius <= 0.0 {
            registry.remove(entity);
            continue;
        }
        registry.notify_updated(entity);

        let Some(center) = registry.position_of(entity) else {
            continue;
        };
        collision::apply_explosion(registry, rng, center, &explosion, cues, score.as_deref_mut());
    }
}
