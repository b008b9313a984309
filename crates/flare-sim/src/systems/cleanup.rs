//! Cleanup system: removes spent munitions, destroyed ships and strays.

use hecs::{Entity, World};

use flare_core::components::{BodyTag, DamageStatus, HomingMunition, Position};
use flare_core::constants::DESPAWN_LIMITS_FACTOR;

/// Remove entities that are far outside the sector or in a terminal state.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, sector_limits: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let radius = sector_limits * DESPAWN_LIMITS_FACTOR;
    let radius_sq = radius * radius;

    // Anything drifting well beyond the boundary
    for (entity, (pos, _tag)) in world.query_mut::<(&Position, &BodyTag)>() {
        if pos.0.length_squared() > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    // Munitions that hit or burned out
    for (entity, munition) in world.query_mut::<&HomingMunition>() {
        if !munition.active {
            despawn_buffer.push(entity);
        }
    }

    // Ships that lost every internal module
    for (entity, status) in world.query_mut::<&DamageStatus>() {
        if !status.alive {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_unstable();
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
