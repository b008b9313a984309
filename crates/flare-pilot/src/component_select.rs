//! Sub-component selection: where to aim on a chosen target.
//!
//! Armed ships get their weapons shot off first, then their engines, then
//! whatever keeps them controllable.

use flare_core::constants::*;
use flare_core::enums::{CombatState, ComponentKind};
use flare_core::state::{Ship, ShipComponent};

use crate::world::RandomSource;

/// Combat condition of `ship` derived from its damage status.
pub fn combat_state(ship: &Ship) -> CombatState {
    if !ship.status.disarmed {
        CombatState::Armed
    } else if !ship.status.stranded {
        CombatState::DisarmedMobile
    } else {
        CombatState::Stranded
    }
}

/// Selection weight of a component kind for a target in `state`.
pub fn component_weight(state: CombatState, kind: ComponentKind) -> u32 {
    match (state, kind) {
        (CombatState::Armed, ComponentKind::Weapon) => ARMED_WEAPON_WEIGHT,
        (CombatState::Armed, ComponentKind::EnginePod) => ARMED_POD_WEIGHT,
        (CombatState::DisarmedMobile, ComponentKind::EnginePod) => DISARMED_POD_WEIGHT,
        (_, ComponentKind::Weapon) | (_, ComponentKind::EnginePod) => 0,
        (_, ComponentKind::Rcs) => RCS_WEIGHT,
        (_, ComponentKind::Internal) => INTERNAL_WEIGHT,
    }
}

/// Weighted random pick among the live components of `target`.
///
/// Returns `None` when no component is eligible.
pub fn get_best_target_component<'a, R: RandomSource + ?Sized>(
    target: &'a Ship,
    rng: &mut R,
) -> Option<&'a ShipComponent> {
    let state = combat_state(target);

    let mut cumulative = 0u32;
    let pool: Vec<(u32, &ShipComponent)> = target
        .components
        .iter()
        .filter(|component| !component.broken)
        .filter_map(|component| {
            let weight = component_weight(state, component.kind);
            if weight == 0 {
                return None;
            }
            cumulative += weight;
            Some((cumulative, component))
        })
        .collect();

    if cumulative == 0 {
        return None;
    }

    let roll = rng.below(cumulative);
    pool.iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, component)| *component)
}
