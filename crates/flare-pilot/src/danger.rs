//! Dangerosity evaluation: does a body hit us, and how soon.
//!
//! Bodies are treated as spheres on straight lines. The closest approach of
//! the two centers is compared against the sum of radii; among dangerous
//! bodies the one with the smallest hit time is the most imminent.

use glam::DVec3;

use flare_core::constants::{DANGER_HORIZON_SECS, MIN_CLOSING_SPEED};
use flare_core::enums::BodyKind;
use flare_core::types::{nearly_zero, BodyId};

use crate::world::Body;

/// A predicted collision with one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DangerReport {
    pub body: BodyId,
    pub kind: BodyKind,
    /// Collision-sphere center of the body when evaluated.
    pub location: DVec3,
    /// Velocity of the body when evaluated.
    pub velocity: DVec3,
    /// Seconds until closest approach. Negative for a live overlap, where it
    /// holds the negated penetration depth instead.
    pub hit_time: f64,
    /// Time the two bodies need to cross each other at their relative speed.
    pub inter_collision_travel_time: f64,
}

impl DangerReport {
    /// Seconds left before the bodies start touching.
    pub fn lead_time(&self) -> f64 {
        self.hit_time - self.inter_collision_travel_time
    }

    /// Scan reduction step: the current champion survives unless `candidate`
    /// strikes strictly sooner.
    pub fn most_imminent(best: Option<Self>, candidate: Self) -> Option<Self> {
        match best {
            Some(best) if best.hit_time <= candidate.hit_time => Some(best),
            _ => Some(candidate),
        }
    }
}

/// Evaluate whether `candidate` is on a collision course with the observer.
///
/// Returns `None` for bodies that are not closing in, that pass wide, or
/// whose closest approach lies beyond the danger horizon.
pub fn check_relative_dangerosity(
    candidate: &dyn Body,
    observer_location: DVec3,
    observer_size: f64,
    candidate_velocity: DVec3,
    observer_velocity: DVec3,
) -> Option<DangerReport> {
    let sphere = candidate.collision_sphere();
    let delta_velocity = candidate_velocity - observer_velocity;
    let delta_location = sphere.center - observer_location;

    if nearly_zero(delta_velocity) {
        return None;
    }

    // Closing speed along the line of sight must be meaningful
    if !nearly_zero(delta_location)
        && delta_location.normalize().dot(delta_velocity) > -MIN_CLOSING_SPEED
    {
        return None;
    }

    let relative_speed = delta_velocity.length();
    let min_distance = delta_location.cross(-delta_velocity).length() / relative_speed;
    let size_sum = observer_size + sphere.radius;
    if size_sum < min_distance {
        tracing::trace!(
            body = %candidate.id(),
            min_distance,
            size_sum,
            "passes wide"
        );
        return None;
    }

    let separation = delta_location.length();
    if separation < size_sum {
        return Some(DangerReport {
            body: candidate.id(),
            kind: candidate.kind(),
            location: sphere.center,
            velocity: candidate_velocity,
            hit_time: -(size_sum - separation),
            inter_collision_travel_time: 0.0,
        });
    }

    let distance_to_min_distance_point =
        (separation * separation - min_distance * min_distance).max(0.0).sqrt();
    let time_to_min_distance = distance_to_min_distance_point / relative_speed;
    let inter_collision_travel_time = size_sum / relative_speed;

    if time_to_min_distance > DANGER_HORIZON_SECS + inter_collision_travel_time {
        tracing::trace!(
            body = %candidate.id(),
            time_to_min_distance,
            "beyond danger horizon"
        );
        return None;
    }

    Some(DangerReport {
        body: candidate.id(),
        kind: candidate.kind(),
        location: sphere.center,
        velocity: candidate_velocity,
        hit_time: time_to_min_distance,
        inter_collision_travel_time,
    })
}
