//! Entity registry: owns the hecs world and keeps the render bridge in step
//! with every entity's lifecycle.
//!
//! Cities and bases live in fixed lists (index order is the layout order and
//! is used for tie-breaking). Missiles and explosions are plain hecs entities
//! found by their marker components; their relative order carries no meaning.

use hecs::{DynamicBundle, Entity, World};

use bastion_core::bridges::RenderBridge;
use bastion_core::components::*;
use bastion_core::enums::VisualKind;
use bastion_core::state::*;
use bastion_core::types::Position;

pub struct EntityRegistry {
    world: World,
    cities: Vec<Entity>,
    bases: Vec<Entity>,
    render: Box<dyn RenderBridge + Send>,
}

impl EntityRegistry {
    pub fn new(render: Box<dyn RenderBridge + Send>) -> Self {
        Self {
            world: World::new(),
            cities: Vec::new(),
            bases: Vec::new(),
            render,
        }
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for systems. Entities must still be created and removed
    /// through the registry so the render bridge sees them.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    // --- Creation ---

    pub fn add_city(&mut self, position: Position) -> Entity {
        let entity = self.spawn_visible((position, City { alive: true }), VisualKind::City);
        self.cities.push(entity);
        entity
    }

    pub fn add_base(&mut self, position: Position, ammo: u32) -> Entity {
        let entity = self.spawn_visible(
            (position, Base { alive: true, ammo }),
            VisualKind::Base,
        );
        self.bases.push(entity);
        entity
    }

    pub fn add_enemy_missile(&mut self, flight: Flight, missile: EnemyMissile) -> Entity {
        let kind = if missile.can_split {
            VisualKind::SplittingEnemyMissile
        } else {
            VisualKind::EnemyMissile
        };
        self.spawn_visible((flight.start, flight, missile), kind)
    }

    pub fn add_player_missile(&mut self, flight: Flight) -> Entity {
        self.spawn_visible((flight.start, flight, PlayerMissile), VisualKind::PlayerMissile)
    }

    pub fn add_explosion(&mut self, position: Position, explosion: Explosion) -> Entity {
        self.spawn_visible((position, explosion), explosion.kind.into())
    }

    fn spawn_visible(&mut self, components: impl DynamicBundle, kind: VisualKind) -> Entity {
        let entity = self.world.spawn(components);
        let handle = match self.render.on_entity_created(entity, kind) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("render bridge failed to create {kind:?}: {e}");
                None
            }
        };
        // The entity was spawned just above, so insertion cannot miss.
        let _ = self.world.insert_one(entity, VisualLink(handle));
        entity
    }

    // --- Removal ---

    /// Despawn an entity and release its visual. Returns false if it was
    /// already gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let handle = self
            .world
            .get::<&VisualLink>(entity)
            .ok()
            .and_then(|link| link.0);
        if self.world.despawn(entity).is_err() {
            return false;
        }
        if let Err(e) = self.render.on_entity_removed(entity, handle) {
            log::warn!("render bridge failed to release {entity:?}: {e}");
        }
        true
    }

    /// Remove every missile and explosion.
    pub fn clear_dynamic(&mut self) {
        let mut doomed = self.enemy_missiles();
        doomed.extend(self.player_missiles());
        doomed.extend(self.explosions());
        for entity in doomed {
            self.remove(entity);
        }
    }

    /// Remove every city and base.
    pub fn clear_defenses(&mut self) {
        let mut doomed = std::mem::take(&mut self.cities);
        doomed.append(&mut self.bases);
        for entity in doomed {
            self.remove(entity);
        }
    }

    // --- Queries ---

    /// All cities in layout order, alive or not.
    pub fn cities(&self) -> &[Entity] {
        &self.cities
    }

    /// All bases in layout order, alive or not.
    pub fn bases(&self) -> &[Entity] {
        &self.bases
    }

    pub fn alive_cities(&self) -> Vec<Entity> {
        self.cities
            .iter()
            .copied()
            .filter(|&e| self.world.get::<&City>(e).is_ok_and(|c| c.alive))
            .collect()
    }

    pub fn alive_bases(&self) -> Vec<Entity> {
        self.bases
            .iter()
            .copied()
            .filter(|&e| self.world.get::<&Base>(e).is_ok_and(|b| b.alive))
            .collect()
    }

    pub fn alive_bases_with_ammo(&self) -> Vec<Entity> {
        self.bases
            .iter()
            .copied()
            .filter(|&e| {
                self.world
                    .get::<&Base>(e)
                    .is_ok_and(|b| b.alive && b.ammo > 0)
            })
            .collect()
    }

    pub fn enemy_missiles(&self) -> Vec<Entity> {
        self.collect_with::<&EnemyMissile>()
    }

    pub fn player_missiles(&self) -> Vec<Entity> {
        self.collect_with::<&PlayerMissile>()
    }

    pub fn explosions(&self) -> Vec<Entity> {
        self.collect_with::<&Explosion>()
    }

    fn collect_with<Q: hecs::Query>(&self) -> Vec<Entity> {
        self.world
            .query::<Q>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }

    pub fn enemy_missile_count(&self) -> usize {
        self.world.query::<&EnemyMissile>().iter().count()
    }

    pub fn player_missile_count(&self) -> usize {
        self.world.query::<&PlayerMissile>().iter().count()
    }

    pub fn explosion_count(&self) -> usize {
        self.world.query::<&Explosion>().iter().count()
    }

    /// True once no missile or explosion remains.
    pub fn dynamic_is_empty(&self) -> bool {
        self.enemy_missile_count() == 0
            && self.player_missile_count() == 0
            && self.explosion_count() == 0
    }

    pub fn position_of(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn set_position(&mut self, entity: Entity, position: Position) {
        if let Ok(mut current) = self.world.get::<&mut Position>(entity) {
            *current = position;
        }
    }

    // --- Presentation ---

    /// Current presentation view of an entity, if it still exists.
    pub fn view_of(&self, entity: Entity) -> Option<EntityView> {
        let position = self.position_of(entity)?;
        if let Ok(city) = self.world.get::<&City>(entity) {
            return Some(EntityView::City(CityView {
                position,
                alive: city.alive,
            }));
        }
        if let Ok(base) = self.world.get::<&Base>(entity) {
            return Some(EntityView::Base(BaseView {
                position,
                alive: base.alive,
                ammo: base.ammo,
            }));
        }
        if let Ok(explosion) = self.world.get::<&Explosion>(entity) {
            return Some(EntityView::Explosion(ExplosionView {
                kind: explosion.kind,
                position,
                radius: explosion.radius,
                max_radius: explosion.max_radius,
            }));
        }
        let flight = *self.world.get::<&Flight>(entity).ok()?;
        if let Ok(missile) = self.world.get::<&EnemyMissile>(entity) {
            return Some(EntityView::EnemyMissile(missile_view(&flight, position, missile.can_split)));
        }
        if self.world.get::<&PlayerMissile>(entity).is_ok() {
            return Some(EntityView::PlayerMissile(missile_view(&flight, position, false)));
        }
        None
    }

    /// Push the entity's current state to the render bridge.
    pub fn notify_updated(&mut self, entity: Entity) {
        let Some(view) = self.view_of(entity) else {
            return;
        };
        if let Err(e) = self.render.on_entity_updated(entity, &view) {
            log::warn!("render bridge failed to update {entity:?}: {e}");
        }
    }
}

pub(crate) fn missile_view(flight: &Flight, position: Position, can_split: bool) -> MissileView {
    MissileView {
        start: flight.start,
        end: flight.end,
        position,
        progress: flight.progress,
        can_split,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::bridges::{BridgeError, NullBridge};
    use bastion_core::enums::ExplosionKind;
    use std::sync::{Arc, Mutex};

    /// Records every call; optionally fails all of them.
    #[derive(Default, Clone)]
    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RenderBridge for Recorder {
        fn on_entity_created(
            &mut self,
            entity: Entity,
            kind: VisualKind,
        ) -> Result<VisualHandle, BridgeError> {
            self.log.lock().unwrap().push(format!("create {kind:?}"));
            if self.fail {
                return Err(BridgeError::Unavailable("gpu lost".into()));
            }
            Ok(VisualHandle(entity.id() as u64 + 100))
        }

        fn on_entity_updated(&mut self, _: Entity, _: &EntityView) -> Result<(), BridgeError> {
            self.log.lock().unwrap().push("update".into());
            if self.fail {
                return Err(BridgeError::Unavailable("gpu lost".into()));
            }
            Ok(())
        }

        fn on_entity_removed(
            &mut self,
            _: Entity,
            handle: Option<VisualHandle>,
        ) -> Result<(), BridgeError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("remove {:?}", handle.map(|h| h.0)));
            if self.fail {
                return Err(BridgeError::Unavailable("gpu lost".into()));
            }
            Ok(())
        }
    }

    fn explosion() -> Explosion {
        Explosion {
            kind: ExplosionKind::Defense,
            radius: 0.5,
            max_radius: 60.0,
            growth: 220.0,
            shrinking: false,
        }
    }

    #[test]
    fn alive_filters() {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        let c0 = reg.add_city(Position::planar(-100.0, 0.0));
        reg.add_city(Position::planar(100.0, 0.0));
        let b0 = reg.add_base(Position::planar(0.0, 0.0), 10);
        let b1 = reg.add_base(Position::planar(50.0, 0.0), 0);

        reg.world_mut().get::<&mut City>(c0).unwrap().alive = false;
        assert_eq!(reg.alive_cities().len(), 1);
        assert_eq!(reg.alive_bases(), vec![b0, b1]);
        assert_eq!(reg.alive_bases_with_ammo(), vec![b0]);
    }

    #[test]
    fn visual_handle_round_trip() {
        let recorder = Recorder::default();
        let log = recorder.log.clone();
        let mut reg = EntityRegistry::new(Box::new(recorder));

        let e = reg.add_explosion(Position::planar(0.0, 0.0), explosion());
        let expected = e.id() as u64 + 100;
        assert!(reg.remove(e));
        assert!(!reg.remove(e), "second removal is a no-op");

        let log = log.lock().unwrap();
        assert_eq!(log[0], "create DefenseExplosion");
        assert_eq!(log[1], format!("remove Some({expected})"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn bridge_failures_do_not_block_lifecycle() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut reg = EntityRegistry::new(Box::new(recorder));

        let e = reg.add_explosion(Position::planar(0.0, 0.0), explosion());
        assert!(reg.contains(e));
        assert_eq!(reg.world().get::<&VisualLink>(e).unwrap().0, None);
        reg.notify_updated(e);
        assert!(reg.remove(e));
        assert!(reg.dynamic_is_empty());
    }

    #[test]
    fn clear_dynamic_keeps_defenses() {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        reg.add_city(Position::planar(0.0, 0.0));
        reg.add_base(Position::planar(10.0, 0.0), 10);
        let flight = Flight::new(Position::planar(0.0, 300.0), Position::planar(0.0, 0.0), 70.0);
        reg.add_player_missile(flight);
        reg.add_explosion(Position::planar(0.0, 50.0), explosion());

        assert!(!reg.dynamic_is_empty());
        reg.clear_dynamic();
        assert!(reg.dynamic_is_empty());
        assert_eq!(reg.cities().len(), 1);
        assert_eq!(reg.bases().len(), 1);

        reg.clear_defenses();
        assert!(reg.cities().is_empty());
        assert!(reg.bases().is_empty());
        assert_eq!(reg.world().len(), 0);
    }

    #[test]
    fn views_match_components() {
        let mut reg = EntityRegistry::new(Box::new(NullBridge));
        let base = reg.add_base(Position::planar(5.0, -290.0), 7);
        match reg.view_of(base) {
            Some(EntityView::Base(view)) => {
                assert_eq!(view.ammo, 7);
                assert!(view.alive);
                assert_eq!(view.position.x, 5.0);
            }
            other => panic!("expected base view, got {other:?}"),
        }

        let flight = Flight::new(Position::planar(0.0, 300.0), Position::planar(0.0, 0.0), 70.0);
        let m = reg.add_player_missile(flight);
        assert!(matches!(reg.view_of(m), Some(EntityView::PlayerMissile(_))));
    }
}
