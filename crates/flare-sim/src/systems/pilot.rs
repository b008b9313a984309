//! Pilot system: runs the decision engine for every AI-flown ship.
//!
//! Decisions are taken against the tick's `SectorSnapshot`, then applied to
//! the world: new velocity and facing, target bookkeeping and launches.

use glam::DVec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use flare_core::components::{BodyTag, Facing, HomingMunition, Pilot, Velocity};
use flare_core::constants::*;
use flare_core::events::PilotEvent;
use flare_core::state::{SectorSnapshot, Ship};
use flare_core::types::{nearly_zero, BodyId};

use flare_pilot::avoidance::correct_course;
use flare_pilot::component_select::get_best_target_component;
use flare_pilot::friendly_fire::{check_friendly_fire, FiringSolution};
use flare_pilot::intercept::compute_intercept_time;
use flare_pilot::sector_exit::is_sector_exit_imminent;
use flare_pilot::targeting::get_best_target;
use flare_pilot::world::WorldQuery;

use crate::engine::SimConfig;
use crate::world_setup;

/// Outcome of one pilot's decision, applied after the query ends.
struct PilotUpdate {
    entity: Entity,
    pilot: Pilot,
    velocity: Option<DVec3>,
    facing: Option<DVec3>,
}

/// A munition to spawn.
struct Launch {
    launcher: BodyId,
    target: BodyId,
    munition: HomingMunition,
    location: DVec3,
    velocity: DVec3,
}

enum FireDecision {
    Launch(Launch),
    /// A non-hostile ship is in the line of fire.
    Hold,
    OutOfReach,
}

/// Run every pilot against `snapshot` and apply the decisions to `world`.
pub fn run(
    world: &mut World,
    snapshot: &SectorSnapshot,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    next_body_id: &mut u32,
    events: &mut Vec<PilotEvent>,
) {
    let pilots: Vec<(Entity, BodyId, Pilot)> = world
        .query::<(&BodyTag, &Pilot)>()
        .iter()
        .map(|(entity, (tag, pilot))| (entity, tag.id, pilot.clone()))
        .collect();

    let mut updates: Vec<PilotUpdate> = Vec::with_capacity(pilots.len());
    let mut launches: Vec<Launch> = Vec::new();

    for (entity, id, mut pilot) in pilots {
        let Some(ship) = snapshot.ship(id) else {
            continue;
        };
        if !ship.status.alive {
            continue;
        }

        let target = acquire_target(snapshot, ship, &mut pilot, config, rng, events);

        let mut update = PilotUpdate {
            entity,
            pilot: Pilot::default(),
            velocity: None,
            facing: None,
        };
        // Without engines or attitude control the ship just drifts
        let can_steer = ship.navigation.ready
            && !ship.navigation.docked
            && !ship.status.stranded
            && !ship.status.uncontrollable;
        if can_steer {
            steer(snapshot, ship, target, &mut pilot, &mut update, config, rng, events);
        }

        pilot.fire_cooldown_secs = (pilot.fire_cooldown_secs - DT).max(0.0);
        if let Some(target) = target {
            if pilot.fire_cooldown_secs <= 0.0 && !ship.status.disarmed {
                match fire(snapshot, ship, target, &pilot, events) {
                    FireDecision::Launch(launch) => {
                        launches.push(launch);
                        pilot.fire_cooldown_secs = config.fire_cooldown_secs;
                    }
                    FireDecision::Hold => pilot.fire_cooldown_secs = config.fire_cooldown_secs,
                    FireDecision::OutOfReach => {}
                }
            }
        }

        update.pilot = pilot;
        updates.push(update);
    }

    for update in updates {
        if let Ok(mut pilot) = world.get::<&mut Pilot>(update.entity) {
            *pilot = update.pilot;
        }
        if let Some(velocity) = update.velocity {
            if let Ok(mut vel) = world.get::<&mut Velocity>(update.entity) {
                vel.0 = velocity;
            }
        }
        if let Some(facing) = update.facing {
            if let Ok(mut current) = world.get::<&mut Facing>(update.entity) {
                current.0 = facing;
            }
        }
    }

    for launch in launches {
        let id = BodyId(*next_body_id);
        *next_body_id += 1;
        world_setup::spawn_munition(
            world,
            id,
            launch.location,
            launch.velocity,
            launch.munition,
        );
        tracing::info!(
            ship = %launch.launcher,
            munition = %id,
            target = %launch.target,
            "munition launched"
        );
        events.push(PilotEvent::MunitionLaunched {
            ship: launch.launcher,
            munition: id,
            target: launch.target,
        });
    }
}

/// Pick the target for this tick and keep the aimed component current.
fn acquire_target<'a>(
    snapshot: &'a SectorSnapshot,
    ship: &Ship,
    pilot: &mut Pilot,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<PilotEvent>,
) -> Option<&'a Ship> {
    let mut preferences = config.preferences.clone();
    preferences.last_target = pilot.target;
    preferences.base_location = ship.location;
    if !nearly_zero(ship.facing) {
        preferences.preferred_direction = ship.facing.normalize();
    }

    let target = get_best_target(snapshot, ship, &preferences);
    let target_id = target.map(|t| t.id);

    if target_id != pilot.target {
        match target_id {
            Some(target) => events.push(PilotEvent::TargetAcquired {
                ship: ship.id,
                target,
            }),
            None => events.push(PilotEvent::TargetLost { ship: ship.id }),
        }
        pilot.target = target_id;
        pilot.target_component = None;
    }

    if let Some(target) = target {
        let aimed_alive = pilot.target_component.is_some_and(|id| {
            target
                .components
                .iter()
                .any(|c| c.id == id && !c.broken)
        });
        if !aimed_alive {
            pilot.target_component = get_best_target_component(target, rng).map(|c| c.id);
        }
    }

    target
}

/// Compute the new velocity: pursue, stay inside the sector, avoid collisions.
#[allow(clippy::too_many_arguments)]
fn steer(
    snapshot: &SectorSnapshot,
    ship: &Ship,
    target: Option<&Ship>,
    pilot: &mut Pilot,
    update: &mut PilotUpdate,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<PilotEvent>,
) {
    let max_speed = ship.navigation.max_linear_speed;

    let mut desired = match target {
        Some(target) => (target.location - ship.location).normalize_or_zero() * max_speed,
        None => DVec3::ZERO,
    };

    let returning = is_sector_exit_imminent(snapshot, ship, config.exit_window);
    if returning {
        desired = (-ship.location).normalize_or_zero() * max_speed;
        if !pilot.returning {
            tracing::warn!(
                ship = %ship.id,
                distance = ship.location.length(),
                "sector exit imminent"
            );
            events.push(PilotEvent::SectorExitWarning { ship: ship.id });
        }
    }
    pilot.returning = returning;

    let (corrected, threat) =
        correct_course(snapshot, ship, desired, None, config.collision_window, rng);
    let avoiding = corrected.distance(desired) > NEARLY_ZERO;
    if avoiding && !pilot.avoiding {
        if let Some(report) = threat {
            events.push(PilotEvent::CollisionAvoidance {
                ship: ship.id,
                threat: report.body,
                threat_kind: report.kind,
                hit_time: report.hit_time,
            });
        }
    }
    pilot.avoiding = avoiding;

    let velocity = corrected.clamp_length_max(max_speed);
    update.velocity = Some(velocity);

    // Face the way we fly, or the target when holding position
    let heading = if nearly_zero(velocity) {
        target.map_or(DVec3::ZERO, |t| t.location - ship.location)
    } else {
        velocity
    };
    if !nearly_zero(heading) {
        update.facing = Some(heading.normalize());
    }
}

/// Aim a homing munition at `target` unless a non-hostile ship is in the way.
fn fire(
    snapshot: &SectorSnapshot,
    ship: &Ship,
    target: &Ship,
    pilot: &Pilot,
    events: &mut Vec<PilotEvent>,
) -> FireDecision {
    let Some(intercept) = compute_intercept_time(
        target.location,
        target.velocity,
        ship.location,
        ship.velocity,
        MUNITION_SPEED,
        0.0,
    ) else {
        return FireDecision::OutOfReach;
    };
    if intercept.time > MUNITION_FUEL_SECS {
        return FireDecision::OutOfReach;
    }

    let aim = intercept.location - ship.location - ship.velocity * intercept.time;
    if nearly_zero(aim) {
        return FireDecision::OutOfReach;
    }
    let axis = aim.normalize();

    let solution = FiringSolution {
        origin: ship.location,
        origin_velocity: ship.velocity,
        projectile_speed: MUNITION_SPEED,
        axis,
        max_delay: FRIENDLY_FIRE_MAX_DELAY_SECS,
        aim_radius: FRIENDLY_FIRE_AIM_RADIUS,
        shooter: Some(ship.id),
    };
    if check_friendly_fire(snapshot, ship.faction, &solution) {
        tracing::debug!(ship = %ship.id, target = %target.id, "holding fire");
        events.push(PilotEvent::HoldFire {
            ship: ship.id,
            target: target.id,
        });
        return FireDecision::Hold;
    }

    FireDecision::Launch(Launch {
        launcher: ship.id,
        target: target.id,
        munition: HomingMunition {
            target: target.id,
            target_component: pilot.target_component,
            launcher: ship.id,
            fuel_secs: MUNITION_FUEL_SECS,
            speed: MUNITION_SPEED,
            active: true,
        },
        location: ship.location,
        velocity: ship.velocity + axis * MUNITION_SPEED,
    })
}
