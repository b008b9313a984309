//! Friendly-fire prediction for a straight-line projectile.

use glam::DVec3;

use flare_core::enums::Hostility;
use flare_core::types::{nearly_zero, BodyId, FactionId};

use crate::intercept::compute_intercept_time;
use crate::world::{Body, WorldQuery};

/// A shot about to be fired.
#[derive(Debug, Clone, Copy)]
pub struct FiringSolution {
    /// Muzzle location.
    pub origin: DVec3,
    /// Velocity of the firing platform, inherited by the projectile.
    pub origin_velocity: DVec3,
    pub projectile_speed: f64,
    /// Unit direction of the shot relative to the platform.
    pub axis: DVec3,
    /// Longest flight time worth considering (seconds).
    pub max_delay: f64,
    /// Extra margin added around candidate hulls (meters).
    pub aim_radius: f64,
    /// Ship firing the shot, never considered a victim.
    pub shooter: Option<BodyId>,
}

/// Whether the shot would likely hit a ship that is not hostile to `observer_faction`.
///
/// Stops at the first endangered ship.
pub fn check_friendly_fire<W: WorldQuery + ?Sized>(
    world: &W,
    observer_faction: FactionId,
    solution: &FiringSolution,
) -> bool {
    let fire_axis = solution.axis.normalize_or_zero();

    for candidate in world.ships() {
        if Some(candidate.id) == solution.shooter {
            continue;
        }
        if world.hostility(observer_faction, candidate.faction) == Hostility::Hostile {
            continue;
        }

        let Some(intercept) = compute_intercept_time(
            candidate.location,
            candidate.velocity,
            solution.origin,
            solution.origin_velocity,
            solution.projectile_speed,
            0.0,
        ) else {
            continue;
        };
        if intercept.time > solution.max_delay {
            continue;
        }

        let delta_location = candidate.location - solution.origin;
        let fire_target_direction =
            intercept.location - solution.origin - intercept.time * solution.origin_velocity;
        if nearly_zero(delta_location) || nearly_zero(fire_target_direction) {
            continue;
        }

        let target_size = candidate.collision_sphere().radius + solution.aim_radius * 2.0;
        let distance = delta_location.length();

        let angular_precision = fire_target_direction
            .normalize()
            .dot(fire_axis)
            .clamp(-1.0, 1.0)
            .acos();
        let angular_size = (target_size / distance).atan();

        if angular_precision < angular_size {
            tracing::debug!(
                victim = %candidate.id,
                angular_precision,
                angular_size,
                "friendly fire risk"
            );
            return true;
        }
    }
    false
}
