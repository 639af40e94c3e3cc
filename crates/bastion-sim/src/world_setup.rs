//! Entity spawn factories for setting up a mission.

use hecs::Entity;

use bastion_core::components::{Explosion, Flight, PlayerMissile};
use bastion_core::constants::*;
use bastion_core::enums::ExplosionKind;
use bastion_core::types::Position;

use crate::random::RandomSource;
use crate::registry::EntityRegistry;

/// Wipe every entity and lay out a fresh set of cities and fully loaded bases.
pub fn setup_mission(registry: &mut EntityRegistry) {
    registry.clear_dynamic();
    registry.clear_defenses();
    spawn_defenses(registry);
}

/// Spawn the fixed city and base layout.
pub fn spawn_defenses(registry: &mut EntityRegistry) {
    let y = WORLD.bottom + STRUCTURE_ALTITUDE;
    for x in CITY_POSITIONS {
        registry.add_city(Position::planar(x, y));
    }
    for x in BASE_POSITIONS {
        registry.add_base(Position::planar(x, y), MAX_BASE_AMMO);
    }
}

/// Spawn a fresh explosion of the given kind with a randomized peak radius.
pub fn spawn_explosion(
    registry: &mut EntityRegistry,
    rng: &mut impl RandomSource,
    position: Position,
    kind: ExplosionKind,
) -> Entity {
    let (min, max, growth) = match kind {
        ExplosionKind::Defense => (DEFENSE_MAX_RADIUS_MIN, DEFENSE_MAX_RADIUS_MAX, DEFENSE_GROWTH),
        ExplosionKind::Warhead => (WARHEAD_MAX_RADIUS_MIN, WARHEAD_MAX_RADIUS_MAX, WARHEAD_GROWTH),
    };
    registry.add_explosion(
        position,
        Explosion {
            kind,
            radius: EXPLOSION_INITIAL_RADIUS,
            max_radius: rng.range(min, max),
            growth,
            shrinking: false,
        },
    )
}

/// Spawn an interceptor flying from `start` to `end`.
pub fn spawn_player_missile(
    registry: &mut EntityRegistry,
    start: Position,
    end: Position,
    wave: u32,
) -> Entity {
    let speed = PLAYER_MISSILE_BASE_SPEED + wave as f64 * PLAYER_MISSILE_SPEED_PER_WAVE;
    registry.add_player_missile(Flight::new(start, end, speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;
    use bastion_core::bridges::NullBridge;
    use bastion_core::components::{Base, City};

    #[test]
    fn mission_layout() {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        setup_mission(&mut reg);
        assert_eq!(reg.alive_cities().len(), CITY_POSITIONS.len());
        assert_eq!(reg.alive_bases_with_ammo().len(), BASE_POSITIONS.len());
        for &e in reg.bases() {
            assert_eq!(reg.world().get::<&Base>(e).unwrap().ammo, MAX_BASE_AMMO);
            assert_eq!(reg.position_of(e).unwrap().y, WORLD.bottom + 20.0);
        }

        // A second setup replaces rather than duplicates.
        let first_city = reg.cities()[0];
        reg.world_mut().get::<&mut City>(first_city).unwrap().alive = false;
        setup_mission(&mut reg);
        assert_eq!(reg.cities().len(), 6);
        assert_eq!(reg.alive_cities().len(), 6);
        assert_eq!(reg.world().len(), 9);
    }

    #[test]
    fn explosion_radius_ranges() {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        let mut rng = SequenceSource::new(vec![0.0, 1.0 - 1e-12]);
        let d = spawn_explosion(&mut reg, &mut rng, Position::default(), ExplosionKind::Defense);
        let w = spawn_explosion(&mut reg, &mut rng, Position::default(), ExplosionKind::Warhead);

        let d = *reg.world().get::<&Explosion>(d).unwrap();
        let w = *reg.world().get::<&Explosion>(w).unwrap();
        assert_eq!(d.max_radius, 50.0);
        assert_eq!(d.growth, 220.0);
        assert!((w.max_radius - 58.0).abs() < 1e-9);
        assert_eq!(w.growth, 170.0);
        assert_eq!(d.radius, 0.5);
    }

    #[test]
    fn interceptor_speed_scales_with_wave() {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        let m = spawn_player_missile(
            &mut reg,
            Position::planar(0.0, -284.0),
            Position::planar(0.0, 100.0),
            3,
        );
        let flight = *reg.world().get::<&Flight>(m).unwrap();
        assert_eq!(flight.speed, 440.0 + 48.0);
        assert!(reg.world().get::<&PlayerMissile>(m).is_ok());
    }
}
