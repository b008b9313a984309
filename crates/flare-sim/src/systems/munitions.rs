//! Munition system: homing guidance, fuel burn and impact resolution.

use std::collections::HashMap;

use glam::DVec3;
use hecs::{Entity, World};

use flare_core::components::{BodyTag, HomingMunition, Loadout, Position, Velocity};
use flare_core::constants::{DT, MUNITION_LETHAL_RADIUS};
use flare_core::events::PilotEvent;
use flare_core::types::{nearly_zero, BodyId, ComponentId};

/// A munition reaching its target this tick.
struct Impact {
    target: Entity,
    target_id: BodyId,
    component: Option<ComponentId>,
}

/// Run munition guidance for one tick, then resolve impacts.
pub fn run(world: &mut World, events: &mut Vec<PilotEvent>) {
    // Ship locations by id (munitions only home on ships)
    let ships: HashMap<BodyId, (Entity, DVec3)> = world
        .query::<(&BodyTag, &Position, &Loadout)>()
        .iter()
        .map(|(entity, (tag, pos, _))| (tag.id, (entity, pos.0)))
        .collect();

    let mut impacts: Vec<Impact> = Vec::new();

    for (_entity, (munition, pos, vel)) in
        world.query_mut::<(&mut HomingMunition, &Position, &mut Velocity)>()
    {
        if !munition.active {
            continue;
        }

        let Some(&(target_entity, target_location)) = ships.get(&munition.target) else {
            // Target gone, the munition goes inert
            munition.active = false;
            continue;
        };

        let to_target = target_location - pos.0;
        if to_target.length() <= MUNITION_LETHAL_RADIUS {
            munition.active = false;
            impacts.push(Impact {
                target: target_entity,
                target_id: munition.target,
                component: munition.target_component,
            });
            continue;
        }

        munition.fuel_secs -= DT;
        if munition.fuel_secs <= 0.0 {
            tracing::debug!(target = %munition.target, "munition burned out");
            munition.active = false;
            vel.0 = DVec3::ZERO;
            continue;
        }

        // Pure pursuit
        if !nearly_zero(to_target) {
            vel.0 = to_target.normalize() * munition.speed;
        }
    }

    for impact in impacts {
        apply_impact(world, &impact, events);
    }
}

/// Break the aimed component, or the first live one when it is already gone.
fn apply_impact(world: &mut World, impact: &Impact, events: &mut Vec<PilotEvent>) {
    let Ok(mut loadout) = world.get::<&mut Loadout>(impact.target) else {
        return;
    };

    let aimed = impact.component.and_then(|id| {
        loadout
            .components
            .iter()
            .position(|c| c.id == id && !c.broken)
    });
    let index = aimed.or_else(|| loadout.components.iter().position(|c| !c.broken));

    let Some(index) = index else {
        return;
    };
    let component = &mut loadout.components[index];
    component.broken = true;

    tracing::info!(
        ship = %impact.target_id,
        component = component.id.0,
        kind = ?component.kind,
        "component destroyed"
    );
    events.push(PilotEvent::ComponentDestroyed {
        ship: impact.target_id,
        component: component.id,
        kind: component.kind,
    });
}
