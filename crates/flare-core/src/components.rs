//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::SizeClass;
use crate::state::ShipComponent;
use crate::types::{BodyId, ComponentId, FactionId};

// Damage, docking and navigation state are shared with the snapshot
// (they're defined in state.rs but used as ECS components)
pub use crate::state::{DamageStatus, DockingState, NavigationState};

/// World-space location (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// Linear velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Unit forward vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Facing(pub DVec3);

/// Stable sector-wide identifier of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTag {
    pub id: BodyId,
}

/// Hull description of a ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipHull {
    /// Half extents of the hull bounding box (meters).
    pub half_extents: DVec3,
    pub size: SizeClass,
    pub is_station: bool,
    pub is_military: bool,
}

/// Owning faction of a ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Allegiance {
    pub faction: FactionId,
}

/// Marks a ship held by a harpoon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Harpooned;

/// Sub-components of a ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub components: Vec<ShipComponent>,
}

/// AI pilot attached to a ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pilot {
    /// Ship currently attacked.
    pub target: Option<BodyId>,
    /// Component aimed at on the current target.
    pub target_component: Option<ComponentId>,
    /// Seconds until the next launch is allowed.
    pub fire_cooldown_secs: f64,
    /// Turned back from the sector boundary last tick.
    pub returning: bool,
    /// Deviated from its course to avoid a collision last tick.
    pub avoiding: bool,
}

/// Asteroid collision volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsteroidBody {
    pub radius: f64,
}

/// Static collider volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColliderBody {
    pub radius: f64,
}

/// Homing munition state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HomingMunition {
    pub target: BodyId,
    /// Component to break on impact.
    pub target_component: Option<ComponentId>,
    /// Ship that launched this munition.
    pub launcher: BodyId,
    /// Remaining burn time (seconds).
    pub fuel_secs: f64,
    pub speed: f64,
    pub active: bool,
}
