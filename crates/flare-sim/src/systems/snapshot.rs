//! Snapshot system: queries the ECS world and builds the `SectorSnapshot`
//! handed to the pilot engine.
//!
//! This system is read-only, it never modifies the world.

use hecs::World;

use flare_core::components::*;
use flare_core::state::*;
use flare_core::types::Aabb;

/// Build a complete snapshot of the sector from the current world state.
pub fn build(world: &World, sector_limits: f64, diplomacy: &Diplomacy) -> SectorSnapshot {
    SectorSnapshot {
        ships: build_ships(world),
        asteroids: build_asteroids(world),
        colliders: build_colliders(world),
        munitions: build_munitions(world),
        sector_limits,
        diplomacy: diplomacy.clone(),
    }
}

fn build_ships(world: &World) -> Vec<Ship> {
    let mut query = world.query::<(
        &BodyTag,
        &Allegiance,
        &Position,
        &Velocity,
        &Facing,
        &ShipHull,
        &DamageStatus,
        &Loadout,
        &DockingState,
        &NavigationState,
        Option<&Harpooned>,
        Option<&Pilot>,
    )>();

    let mut ships: Vec<Ship> = query
        .iter()
        .map(|(_, components)| {
            let (tag, allegiance, pos, vel, facing, hull, status, loadout, docking, navigation, harpooned, pilot) =
                components;
            Ship {
                id: tag.id,
                faction: allegiance.faction,
                location: pos.0,
                velocity: vel.0,
                facing: facing.0,
                bounds: Aabb::from_center(pos.0, hull.half_extents),
                size: hull.size,
                is_station: hull.is_station,
                is_military: hull.is_military,
                status: *status,
                harpooned: harpooned.is_some(),
                pilot_target: pilot.and_then(|p| p.target),
                docking: docking.clone(),
                navigation: *navigation,
                components: loadout.components.clone(),
            }
        })
        .collect();

    ships.sort_by_key(|s| s.id);
    ships
}

fn build_asteroids(world: &World) -> Vec<Asteroid> {
    let mut asteroids: Vec<Asteroid> = world
        .query::<(&BodyTag, &Position, &Velocity, &AsteroidBody)>()
        .iter()
        .map(|(_, (tag, pos, vel, body))| Asteroid {
            id: tag.id,
            location: pos.0,
            velocity: vel.0,
            radius: body.radius,
        })
        .collect();

    asteroids.sort_by_key(|a| a.id);
    asteroids
}

fn build_colliders(world: &World) -> Vec<StaticCollider> {
    let mut colliders: Vec<StaticCollider> = world
        .query::<(&BodyTag, &Position, &ColliderBody)>()
        .iter()
        .map(|(_, (tag, pos, body))| StaticCollider {
            id: tag.id,
            location: pos.0,
            radius: body.radius,
        })
        .collect();

    colliders.sort_by_key(|c| c.id);
    colliders
}

fn build_munitions(world: &World) -> Vec<Munition> {
    let mut munitions: Vec<Munition> = world
        .query::<(&BodyTag, &HomingMunition)>()
        .iter()
        .map(|(_, (tag, munition))| Munition {
            id: tag.id,
            target: Some(munition.target),
            active: munition.active,
        })
        .collect();

    munitions.sort_by_key(|m| m.id);
    munitions
}
