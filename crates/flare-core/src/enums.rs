//! Enumeration types used throughout the pilot engine.

use serde::{Deserialize, Serialize};

/// Diplomatic stance between two factions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hostility {
    Hostile,
    #[default]
    Neutral,
    Friendly,
}

/// Hull size class of a spacecraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    #[default]
    Small,
    Medium,
    Large,
}

/// Concrete variant behind a collidable body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Ship,
    Asteroid,
    StaticCollider,
}

/// Kind of a ship sub-component that can be aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Gun turret or missile launcher.
    Weapon,
    /// Orbital engine pod.
    EnginePod,
    /// Reaction control thruster.
    Rcs,
    /// Internal module (power, life support, cargo bay).
    Internal,
}

/// Overall combat condition of a ship, derived from its damage status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    /// Weapons still operational.
    Armed,
    /// No weapons left but engines still work.
    DisarmedMobile,
    /// No weapons and no working engines.
    Stranded,
}
