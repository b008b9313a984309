//! Events emitted by the host for pilot decisions and combat outcomes.
//!
//! External bookkeeping (objective tracking, UI, audio) consumes these.

use serde::{Deserialize, Serialize};

use crate::enums::{BodyKind, ComponentKind};
use crate::types::{BodyId, ComponentId};

/// Notification emitted during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PilotEvent {
    /// A pilot picked a new target.
    TargetAcquired { ship: BodyId, target: BodyId },
    /// A pilot no longer has any eligible target.
    TargetLost { ship: BodyId },
    /// A pilot deviated from its desired course to avoid a collision.
    CollisionAvoidance {
        ship: BodyId,
        threat: BodyId,
        threat_kind: BodyKind,
        hit_time: f64,
    },
    /// A pilot is about to leave the sector and turned back.
    SectorExitWarning { ship: BodyId },
    /// A homing munition was launched.
    MunitionLaunched {
        ship: BodyId,
        munition: BodyId,
        target: BodyId,
    },
    /// A pilot withheld fire because a non-hostile ship was in the line of fire.
    HoldFire { ship: BodyId, target: BodyId },
    /// A munition broke a ship component.
    ComponentDestroyed {
        ship: BodyId,
        component: ComponentId,
        kind: ComponentKind,
    },
    /// A ship lost all internal modules.
    ShipDestroyed { ship: BodyId },
}
