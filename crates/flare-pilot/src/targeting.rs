//! Target selection: multi-criteria scoring over every hostile ship in the sector.
//!
//! Score = state × (attack_target + distance + alignement). The state term is
//! a product of multipliers describing what the candidate is; the three
//! additive terms describe where it is and what it is doing.

use flare_core::constants::{
    MAX_MUNITIONS_ON_DANGEROUS, MAX_MUNITIONS_ON_HARMLESS, MUNITION_SCORE_DIVISOR,
};
use flare_core::enums::{Hostility, SizeClass};
use flare_core::preferences::TargetPreferences;
use flare_core::state::Ship;
use flare_core::types::{nearly_zero, BodyId};

use crate::world::WorldQuery;

/// Breakdown of a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetScore {
    pub state: f64,
    pub attack_target: f64,
    pub distance: f64,
    pub alignement: f64,
    pub total: f64,
}

/// A ship is dangerous when it is a military hull with working weapons.
pub fn is_ship_dangerous(ship: &Ship) -> bool {
    ship.is_military && !ship.status.disarmed
}

/// Number of active homing munitions already flying at `target`.
pub fn inbound_munitions<W: WorldQuery + ?Sized>(world: &W, target: BodyId) -> usize {
    world
        .munitions()
        .iter()
        .filter(|munition| munition.active && munition.target == Some(target))
        .count()
}

/// Whether `candidate` may be targeted by `observer` at all.
fn is_eligible<W: WorldQuery + ?Sized>(
    world: &W,
    observer: &Ship,
    candidate: &Ship,
    preferences: &TargetPreferences,
) -> bool {
    if preferences.ignores(candidate.id) {
        return false;
    }
    if world.hostility(observer.faction, candidate.faction) != Hostility::Hostile {
        return false;
    }
    if !candidate.status.alive {
        return false;
    }
    candidate.location.length() <= world.sector_limits()
}

/// Product of the multipliers describing what `candidate` is.
fn state_multipliers(candidate: &Ship, preferences: &TargetPreferences) -> f64 {
    let mut state = preferences.target_state_weight;

    match candidate.size {
        SizeClass::Large => state *= preferences.is_large,
        SizeClass::Small => state *= preferences.is_small,
        SizeClass::Medium => {}
    }

    state *= if candidate.is_station {
        preferences.is_station
    } else {
        preferences.is_not_station
    };

    state *= if candidate.is_military {
        preferences.is_military
    } else {
        preferences.is_not_military
    };

    state *= if is_ship_dangerous(candidate) {
        preferences.is_dangerous
    } else {
        preferences.is_not_dangerous
    };

    state *= if candidate.status.stranded {
        preferences.is_stranded
    } else {
        preferences.is_not_stranded
    };

    state *= if candidate.status.uncontrollable && candidate.status.disarmed {
        if candidate.is_military {
            preferences.is_uncontrollable_military
        } else {
            preferences.is_uncontrollable_civil
        }
    } else {
        preferences.is_not_uncontrollable
    };

    state
}

/// Score `candidate` as a target for `observer`.
///
/// Returns `None` when the candidate must be skipped entirely: ineligible,
/// already saturated with inbound munitions, or harpooned and adrift.
pub fn score_target<W: WorldQuery + ?Sized>(
    world: &W,
    observer: &Ship,
    candidate: &Ship,
    preferences: &TargetPreferences,
) -> Option<TargetScore> {
    if !is_eligible(world, observer, candidate, preferences) {
        return None;
    }

    let dangerous = is_ship_dangerous(candidate);
    let mut state = state_multipliers(candidate, preferences);

    let munition_count = inbound_munitions(world, candidate.id);
    for _ in 0..munition_count {
        state /= MUNITION_SCORE_DIVISOR;
    }
    let munition_cap = if dangerous {
        MAX_MUNITIONS_ON_DANGEROUS
    } else {
        MAX_MUNITIONS_ON_HARMLESS
    };
    if munition_count >= munition_cap {
        return None;
    }

    if candidate.harpooned {
        // Never target a harpooned ship that can no longer maneuver
        if candidate.status.uncontrollable {
            return None;
        }
        state *= preferences.is_harpooned;
    }

    if preferences.last_target == Some(candidate.id) {
        state *= preferences.last_target_weight;
    }

    let distance = (preferences.base_location - candidate.location).length();
    let distance_score = if distance >= preferences.max_distance {
        0.0
    } else {
        preferences.distance_weight * (1.0 - distance / preferences.max_distance)
    };

    let attack_target_score = match preferences.attack_target {
        Some(protected) if dangerous && candidate.pilot_target == Some(protected) => {
            preferences.attack_target_weight
        }
        _ => 0.0,
    };

    let to_candidate = candidate.location - preferences.base_location;
    let alignement = if nearly_zero(to_candidate) {
        0.0
    } else {
        preferences
            .preferred_direction
            .dot(to_candidate.normalize())
    };
    let alignement_score = if alignement > preferences.min_alignement {
        preferences.alignement_weight
            * ((alignement - preferences.min_alignement) / (1.0 - preferences.min_alignement))
    } else {
        0.0
    };

    let total = state * (attack_target_score + distance_score + alignement_score);

    tracing::trace!(
        candidate = %candidate.id,
        total,
        state,
        attack_target = attack_target_score,
        distance = distance_score,
        alignement = alignement_score,
        "scored target"
    );

    Some(TargetScore {
        state,
        attack_target: attack_target_score,
        distance: distance_score,
        alignement: alignement_score,
        total,
    })
}

/// Pick the best attack target for `observer`, if any candidate scores above zero.
///
/// Ties keep the candidate seen first.
pub fn get_best_target<'a, W: WorldQuery + ?Sized>(
    world: &'a W,
    observer: &Ship,
    preferences: &TargetPreferences,
) -> Option<&'a Ship> {
    let mut best: Option<(&Ship, f64)> = None;

    for candidate in world.ships() {
        let Some(score) = score_target(world, observer, candidate, preferences) else {
            continue;
        };
        if score.total <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_score)) if score.total <= best_score => {}
            _ => best = Some((candidate, score.total)),
        }
    }

    match best {
        Some((target, score)) => {
            tracing::debug!(ship = %observer.id, target = %target.id, score, "best target");
            Some(target)
        }
        None => {
            tracing::debug!(ship = %observer.id, "no target");
            None
        }
    }
}
