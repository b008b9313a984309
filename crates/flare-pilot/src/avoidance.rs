//! Avoidance controller: bends a desired velocity away from the most imminent collision.

use glam::DVec3;

use flare_core::state::Ship;
use flare_core::types::{nearly_zero, BodyId};

use crate::collision::find_most_dangerous_collision;
use crate::danger::DangerReport;
use crate::world::{Body, RandomSource, WorldQuery};

/// Correct `desired_velocity` so that `observer` avoids the most dangerous collision.
///
/// Without a threat the desired velocity passes through unchanged. Ahead of a
/// predicted hit the result blends from the desired velocity toward a full
/// speed escape as the hit nears; during a live overlap the ship flees
/// straight away from the other body at max speed.
pub fn anticollision_correction<W: WorldQuery + ?Sized, R: RandomSource + ?Sized>(
    world: &W,
    observer: &Ship,
    desired_velocity: DVec3,
    ignore: Option<BodyId>,
    prevention_window: f64,
    rng: &mut R,
) -> DVec3 {
    correct_course(world, observer, desired_velocity, ignore, prevention_window, rng).0
}

/// Same as [`anticollision_correction`], also returning the threat it reacted to.
pub fn correct_course<W: WorldQuery + ?Sized, R: RandomSource + ?Sized>(
    world: &W,
    observer: &Ship,
    desired_velocity: DVec3,
    ignore: Option<BodyId>,
    prevention_window: f64,
    rng: &mut R,
) -> (DVec3, Option<DangerReport>) {
    let Some(report) = find_most_dangerous_collision(world, observer, ignore) else {
        return (desired_velocity, None);
    };

    let current_location = observer.collision_sphere().center;
    let max_speed = observer.navigation.max_linear_speed;

    let velocity = if report.hit_time > 0.0 {
        let min_distance_point = current_location + observer.velocity * report.hit_time;
        let future_target_location = report.location + report.velocity * report.hit_time;
        let avoidance_axis = escape_axis(min_distance_point - future_target_location, rng);

        let alpha = blend_factor(report.lead_time(), prevention_window);
        desired_velocity * (1.0 - alpha) + avoidance_axis * max_speed * alpha
    } else {
        escape_axis(current_location - report.location, rng) * max_speed
    };
    (velocity, Some(report))
}

/// Weight of the avoidance vector: 0 with a whole window to spare, 1 once contact is due.
/// An empty window only reacts once contact is due.
fn blend_factor(lead_time: f64, prevention_window: f64) -> f64 {
    let lead_time = lead_time.max(0.0);
    if prevention_window <= 0.0 {
        return if lead_time > 0.0 { 0.0 } else { 1.0 };
    }
    (1.0 - lead_time / prevention_window).clamp(0.0, 1.0)
}

/// Normalized `away`, or a random direction when it is degenerate.
fn escape_axis<R: RandomSource + ?Sized>(away: DVec3, rng: &mut R) -> DVec3 {
    if nearly_zero(away) {
        rng.unit_vector()
    } else {
        away.normalize()
    }
}
