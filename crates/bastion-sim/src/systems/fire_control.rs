//! Fire control: picks a launch base and fires interceptors at aim points.

use hecs::Entity;
use thiserror::Error;

use bastion_core::components::Base;
use bastion_core::constants::*;
use bastion_core::events::AudioCue;
use bastion_core::types::Position;

use crate::registry::EntityRegistry;
use crate::world_setup;

/// Why a launch request was refused. Refusals never change state, apart from
/// the status line and a cue for `NoAmmoAvailable`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LaunchError {
    #[error("no interceptor missiles available in active bases")]
    NoAmmoAvailable,
    #[error("launches are only accepted while a wave is in progress")]
    MissionInactive,
    #[error("aim point is too close to the launch point")]
    DegenerateFlight,
}

/// A successful launch.
#[derive(Debug, Clone, Copy)]
pub struct LaunchReport {
    /// Index into the base layout.
    pub base_index: usize,
    pub missile: Entity,
    /// Aim point after clamping into the playfield.
    pub aim: Position,
    pub ammo_left: u32,
}

/// Nearest armed base to `aim_x`, measured horizontally. Ties go to the
/// earlier base in layout order.
pub fn nearest_armed_base(registry: &EntityRegistry, aim_x: f64) -> Option<usize> {
    let armed = registry.alive_bases_with_ammo();
    let mut best: Option<(usize, f64)> = None;
    for (index, entity) in registry.bases().iter().enumerate() {
        if !armed.contains(entity) {
            continue;
        }
        let Some(position) = registry.position_of(*entity) else {
            continue;
        };
        let distance = (position.x - aim_x).abs();
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// Resolve which base fires. An explicit request is honored when that base
/// can fire; otherwise the nearest armed base is used.
pub fn select_base(registry: &EntityRegistry, aim_x: f64, requested: Option<usize>) -> Option<usize> {
    if let Some(index) = requested {
        let armed = registry
            .bases()
            .get(index)
            .is_some_and(|e| registry.alive_bases_with_ammo().contains(e));
        if armed {
            return Some(index);
        }
        log::debug!("requested base {index} cannot fire, falling back to nearest");
    }
    nearest_armed_base(registry, aim_x)
}

/// Fire one interceptor at `(x, y)`. The caller checks the mission phase.
pub fn launch(
    registry: &mut EntityRegistry,
    wave: u32,
    x: f64,
    y: f64,
    requested: Option<usize>,
    cues: &mut Vec<AudioCue>,
) -> Result<LaunchReport, LaunchError> {
    let aim = WORLD.clamp_inset(
        Position::planar(x, y),
        AIM_INSET_SIDE,
        AIM_INSET_BOTTOM,
        AIM_INSET_TOP,
    );

    let Some(base_index) = select_base(registry, aim.x, requested) else {
        cues.push(AudioCue::NoAmmo);
        return Err(LaunchError::NoAmmoAvailable);
    };
    let base_entity = registry.bases()[base_index];
    let start = registry
        .position_of(base_entity)
        .ok_or(LaunchError::NoAmmoAvailable)?
        .raised(LAUNCH_HEIGHT_OFFSET);

    if start.distance_to(&aim) <= MIN_FLIGHT_DISTANCE {
        return Err(LaunchError::DegenerateFlight);
    }

    let ammo_left = {
        let mut base = registry
            .world()
            .get::<&mut Base>(base_entity)
            .map_err(|_| LaunchError::NoAmmoAvailable)?;
        base.ammo -= 1;
        base.ammo
    };
    registry.notify_updated(base_entity);

    let missile = world_setup::spawn_player_missile(registry, start, aim, wave);
    cues.push(AudioCue::PlayerLaunch);
    Ok(LaunchReport {
        base_index,
        missile,
        aim,
        ammo_left,
    })
}
