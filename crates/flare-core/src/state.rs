//! Sector snapshot: the read-only view of a sector handed to the pilot engine each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Aabb, BodyId, ComponentId, FactionId};

/// Complete sector state visible to pilots for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorSnapshot {
    pub ships: Vec<Ship>,
    pub asteroids: Vec<Asteroid>,
    pub colliders: Vec<StaticCollider>,
    pub munitions: Vec<Munition>,
    /// Radius of the playable sphere centered on the origin (meters).
    pub sector_limits: f64,
    pub diplomacy: Diplomacy,
}

/// A spacecraft or station.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    pub id: BodyId,
    pub faction: FactionId,
    pub location: DVec3,
    pub velocity: DVec3,
    /// Unit forward vector.
    pub facing: DVec3,
    /// Live world-space bounds of all hull components.
    pub bounds: Aabb,
    pub size: SizeClass,
    pub is_station: bool,
    pub is_military: bool,
    pub status: DamageStatus,
    pub harpooned: bool,
    /// Ship this ship's pilot is currently attacking.
    pub pilot_target: Option<BodyId>,
    pub docking: DockingState,
    pub navigation: NavigationState,
    pub components: Vec<ShipComponent>,
}

/// Damage-derived state flags of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageStatus {
    pub alive: bool,
    /// No working weapon left.
    pub disarmed: bool,
    /// No working engine pod left.
    pub stranded: bool,
    /// No working attitude control left.
    pub uncontrollable: bool,
}

impl Default for DamageStatus {
    fn default() -> Self {
        Self {
            alive: true,
            disarmed: false,
            stranded: false,
            uncontrollable: false,
        }
    }
}

/// Docking relationships of a ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockingState {
    /// Ships currently docked at this one.
    pub docked_ships: Vec<BodyId>,
    /// Ships granted permission to dock and on approach.
    pub granted_ships: Vec<BodyId>,
}

impl DockingState {
    pub fn is_docked_ship(&self, id: BodyId) -> bool {
        self.docked_ships.contains(&id)
    }

    pub fn is_granted_ship(&self, id: BodyId) -> bool {
        self.granted_ships.contains(&id)
    }
}

/// Navigation system state of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Fully loaded and initialized.
    pub ready: bool,
    pub autopilot: bool,
    pub docked: bool,
    /// Maximum linear speed (m/s).
    pub max_linear_speed: f64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            ready: true,
            autopilot: false,
            docked: false,
            max_linear_speed: 100.0,
        }
    }
}

/// A ship sub-component that can be individually destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipComponent {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub broken: bool,
}

impl ShipComponent {
    pub fn new(id: u32, kind: ComponentKind) -> Self {
        Self {
            id: ComponentId(id),
            kind,
            broken: false,
        }
    }
}

/// A drifting asteroid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: BodyId,
    pub location: DVec3,
    pub velocity: DVec3,
    /// Precomputed bounding-sphere radius (meters).
    pub radius: f64,
}

/// An immovable collision volume (station wreck, megastructure).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StaticCollider {
    pub id: BodyId,
    pub location: DVec3,
    /// Precomputed bounding-sphere radius (meters).
    pub radius: f64,
}

/// A homing munition in flight.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Munition {
    pub id: BodyId,
    pub target: Option<BodyId>,
    pub active: bool,
}

/// War state between two factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub a: FactionId,
    pub b: FactionId,
    pub hostility: Hostility,
}

/// Symmetric diplomacy table. Unlisted pairs are neutral, a faction is
/// always friendly with itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diplomacy {
    pub relations: Vec<Relation>,
}

impl Diplomacy {
    /// Stance of faction `a` toward faction `b`.
    pub fn hostility(&self, a: FactionId, b: FactionId) -> Hostility {
        if a == b {
            return Hostility::Friendly;
        }
        self.relations
            .iter()
            .find(|r| (r.a == a && r.b == b) || (r.a == b && r.b == a))
            .map(|r| r.hostility)
            .unwrap_or_default()
    }

    /// Set the stance between two factions, replacing any previous entry.
    pub fn set(&mut self, a: FactionId, b: FactionId, hostility: Hostility) {
        self.relations
            .retain(|r| !((r.a == a && r.b == b) || (r.a == b && r.b == a)));
        self.relations.push(Relation { a, b, hostility });
    }
}
