//! Sector-exit prediction against the spherical sector boundary.

use flare_core::constants::{FACING_CENTER_DOT, SECTOR_EXIT_MARGIN_FRACTION};
use flare_core::state::Ship;
use flare_core::types::nearly_zero;

use crate::world::WorldQuery;

/// Whether `ship` is about to leave the playable volume within `prevention_window` seconds.
///
/// A ship inside the outer margin and still drifting outward is always at
/// risk. Otherwise a ship facing back toward the center is left alone, being
/// inside the margin is enough, and past that the velocity ray is intersected
/// with the boundary sphere.
pub fn is_sector_exit_imminent<W: WorldQuery + ?Sized>(
    world: &W,
    ship: &Ship,
    prevention_window: f64,
) -> bool {
    let limits = world.sector_limits();
    let location = ship.location;
    let distance = location.length();
    let min_distance = limits - distance;
    let moving = !nearly_zero(ship.velocity);

    let in_margin = min_distance < SECTOR_EXIT_MARGIN_FRACTION * limits;
    let drifting_out = moving && ship.velocity.dot(location) > 0.0;
    if in_margin && drifting_out {
        return true;
    }

    let inward = (-location).normalize_or_zero();
    if ship.facing.dot(inward) > FACING_CENTER_DOT {
        return false;
    }

    if in_margin {
        return true;
    }

    if !moving {
        return false;
    }

    // Line-sphere intersection of the velocity ray with the boundary
    let direction = ship.velocity.normalize();
    let dot = direction.dot(location);
    let discriminant = dot * dot - distance * distance + limits * limits;
    if discriminant < 0.0 {
        return false;
    }
    let distance_before_exit = -dot + discriminant.sqrt();
    let duration_before_exit = distance_before_exit / ship.velocity.length();

    duration_before_exit < prevention_window
}
