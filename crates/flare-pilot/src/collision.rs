//! Collision scanner: finds the single most imminent threat around a ship.

use glam::DVec3;

use flare_core::constants::RELEVANCE_SIZE_FACTOR;
use flare_core::state::Ship;
use flare_core::types::BodyId;

use crate::danger::{check_relative_dangerosity, DangerReport};
use crate::world::{Body, WorldQuery};

/// A body considered by one scan, paired with its velocity snapshot.
pub struct Candidate<'a> {
    pub body: &'a dyn Body,
    pub velocity: DVec3,
}

/// Gather every body `observer` could collide with.
///
/// Ships docked at, or cleared to dock with, the observer are left out, as
/// are the observer itself and `ignore`.
pub fn collect_candidates<'a, W: WorldQuery + ?Sized>(
    world: &'a W,
    observer: &Ship,
    ignore: Option<BodyId>,
) -> Vec<Candidate<'a>> {
    let ships = world
        .ships()
        .iter()
        .filter(|ship| {
            ship.id != observer.id
                && Some(ship.id) != ignore
                && !observer.docking.is_granted_ship(ship.id)
                && !observer.docking.is_docked_ship(ship.id)
        })
        .map(|ship| Candidate {
            body: ship as &dyn Body,
            velocity: ship.velocity,
        });

    let asteroids = world.asteroids().iter().map(|asteroid| Candidate {
        body: asteroid as &dyn Body,
        velocity: asteroid.velocity,
    });

    let colliders = world.colliders().iter().map(|collider| Candidate {
        body: collider as &dyn Body,
        velocity: DVec3::ZERO,
    });

    ships.chain(asteroids).chain(colliders).collect()
}

/// Find the body most likely to hit `observer` soonest.
pub fn find_most_dangerous_collision<W: WorldQuery + ?Sized>(
    world: &W,
    observer: &Ship,
    ignore: Option<BodyId>,
) -> Option<DangerReport> {
    let candidates = collect_candidates(world, observer, ignore);
    if candidates.is_empty() {
        return None;
    }

    let observer_sphere = observer.collision_sphere();
    let max_relevance_distance = RELEVANCE_SIZE_FACTOR * observer_sphere.radius;

    let report = candidates
        .iter()
        .filter(|candidate| {
            candidate.body.location().distance(observer_sphere.center) < max_relevance_distance
        })
        .filter_map(|candidate| {
            check_relative_dangerosity(
                candidate.body,
                observer_sphere.center,
                observer_sphere.radius,
                candidate.velocity,
                observer.velocity,
            )
        })
        .fold(None, DangerReport::most_imminent);

    if let Some(report) = &report {
        tracing::debug!(
            ship = %observer.id,
            threat = %report.body,
            kind = ?report.kind,
            hit_time = report.hit_time,
            travel_time = report.inter_collision_travel_time,
            "most dangerous collision"
        );
    }
    report
}

/// Whether `observer` must start avoiding a collision within `prevention_window` seconds.
///
/// Ships still loading, flying on autopilot or docked never trigger it.
pub fn is_anticollision_imminent<W: WorldQuery + ?Sized>(
    world: &W,
    observer: &Ship,
    prevention_window: f64,
) -> bool {
    let navigation = &observer.navigation;
    if !navigation.ready || navigation.autopilot || navigation.docked {
        return false;
    }

    find_most_dangerous_collision(world, observer, None)
        .is_some_and(|report| report.lead_time() < prevention_window)
}
