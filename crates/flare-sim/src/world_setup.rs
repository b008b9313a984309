//! Entity spawn factories for populating a sector.
//!
//! Creates ships, asteroids, static colliders and munitions with the
//! appropriate component bundles.

use hecs::{Entity, EntityBuilder, World};

use flare_core::components::*;
use flare_core::enums::ComponentKind;
use flare_core::state::ShipComponent;
use flare_core::types::BodyId;
use glam::DVec3;

use crate::scenario::{AsteroidDef, ColliderDef, ScenarioDef, ShipDef};

/// Spawn every body of `scenario` into `world`.
pub fn populate(world: &mut World, scenario: &ScenarioDef) {
    for ship in &scenario.ships {
        spawn_ship(world, ship);
    }
    for asteroid in &scenario.asteroids {
        spawn_asteroid(world, asteroid);
    }
    for collider in &scenario.colliders {
        spawn_collider(world, collider);
    }
}

/// Spawn a ship. Pilot-flown ships get a `Pilot` component.
pub fn spawn_ship(world: &mut World, def: &ShipDef) -> Entity {
    let kinds = if def.loadout.is_empty() {
        standard_loadout(def.is_military, def.is_station)
    } else {
        def.loadout.clone()
    };
    let components = kinds
        .into_iter()
        .zip(0u32..)
        .map(|(kind, id)| ShipComponent::new(id, kind))
        .collect();

    let navigation = NavigationState {
        max_linear_speed: def.max_speed,
        ..Default::default()
    };

    let mut builder = EntityBuilder::new();
    builder
        .add(BodyTag { id: def.id })
        .add(Allegiance {
            faction: def.faction,
        })
        .add(Position(def.location))
        .add(Velocity(def.velocity))
        .add(Facing(def.facing.normalize_or(DVec3::X)))
        .add(ShipHull {
            half_extents: def.half_extents,
            size: def.size,
            is_station: def.is_station,
            is_military: def.is_military,
        })
        .add(DamageStatus::default())
        .add(Loadout { components })
        .add(DockingState::default())
        .add(navigation);
    if def.pilot {
        builder.add(Pilot::default());
    }
    if def.harpooned {
        builder.add(Harpooned);
    }

    world.spawn(builder.build())
}

/// Component kinds fitted to a hull when the scenario does not list any.
pub fn standard_loadout(is_military: bool, is_station: bool) -> Vec<ComponentKind> {
    use ComponentKind::*;
    match (is_station, is_military) {
        (true, true) => vec![Weapon, Weapon, Weapon, Weapon, Internal, Internal, Internal],
        (true, false) => vec![Internal, Internal, Internal],
        (false, true) => vec![
            Weapon, Weapon, EnginePod, EnginePod, Rcs, Rcs, Internal, Internal,
        ],
        (false, false) => vec![EnginePod, EnginePod, Rcs, Internal, Internal],
    }
}

/// Spawn a drifting asteroid.
pub fn spawn_asteroid(world: &mut World, def: &AsteroidDef) -> Entity {
    world.spawn((
        BodyTag { id: def.id },
        Position(def.location),
        Velocity(def.velocity),
        AsteroidBody { radius: def.radius },
    ))
}

/// Spawn an immovable collider.
pub fn spawn_collider(world: &mut World, def: &ColliderDef) -> Entity {
    world.spawn((
        BodyTag { id: def.id },
        Position(def.location),
        ColliderBody { radius: def.radius },
    ))
}

/// Spawn a homing munition leaving `location` at `velocity`.
pub fn spawn_munition(
    world: &mut World,
    id: BodyId,
    location: DVec3,
    velocity: DVec3,
    munition: HomingMunition,
) -> Entity {
    world.spawn((
        BodyTag { id },
        Position(location),
        Velocity(velocity),
        munition,
    ))
}
