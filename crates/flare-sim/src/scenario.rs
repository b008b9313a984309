//! Scenario definitions: the initial population of a sector.
//!
//! Scenarios are plain serde documents so they can be loaded from JSON files;
//! a few built-in ones cover the common pilot situations.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use flare_core::enums::{ComponentKind, Hostility, SizeClass};
use flare_core::state::{Diplomacy, NavigationState, Relation};
use flare_core::types::{BodyId, FactionId};

use crate::error::{Result, ScenarioError};

/// Names accepted by [`ScenarioDef::builtin`].
pub const BUILTIN_SCENARIOS: [&str; 3] = ["skirmish", "asteroid_field", "convoy"];

/// Complete description of a sector at time zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDef {
    pub name: String,
    /// Overrides the engine's configured sector radius when present.
    #[serde(default)]
    pub sector_limits: Option<f64>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub ships: Vec<ShipDef>,
    #[serde(default)]
    pub asteroids: Vec<AsteroidDef>,
    #[serde(default)]
    pub colliders: Vec<ColliderDef>,
}

/// A ship to spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipDef {
    pub id: BodyId,
    pub faction: FactionId,
    pub location: DVec3,
    #[serde(default)]
    pub velocity: DVec3,
    #[serde(default = "default_facing")]
    pub facing: DVec3,
    #[serde(default = "default_half_extents")]
    pub half_extents: DVec3,
    #[serde(default)]
    pub size: SizeClass,
    #[serde(default)]
    pub is_station: bool,
    #[serde(default)]
    pub is_military: bool,
    /// Whether the ship is flown by the pilot engine.
    #[serde(default = "default_true")]
    pub pilot: bool,
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    #[serde(default)]
    pub harpooned: bool,
    /// Component kinds fitted to the hull. Empty means the standard loadout.
    #[serde(default)]
    pub loadout: Vec<ComponentKind>,
}

/// An asteroid to spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsteroidDef {
    pub id: BodyId,
    pub location: DVec3,
    #[serde(default)]
    pub velocity: DVec3,
    pub radius: f64,
}

/// A static collider to spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColliderDef {
    pub id: BodyId,
    pub location: DVec3,
    pub radius: f64,
}

fn default_facing() -> DVec3 {
    DVec3::X
}

fn default_half_extents() -> DVec3 {
    DVec3::new(20.0, 8.0, 8.0)
}

fn default_true() -> bool {
    true
}

fn default_max_speed() -> f64 {
    NavigationState::default().max_linear_speed
}

impl ShipDef {
    /// A small civilian hull flown by the pilot engine.
    pub fn new(id: u32, faction: u32, location: DVec3) -> Self {
        Self {
            id: BodyId(id),
            faction: FactionId(faction),
            location,
            velocity: DVec3::ZERO,
            facing: default_facing(),
            half_extents: default_half_extents(),
            size: SizeClass::Small,
            is_station: false,
            is_military: false,
            pilot: true,
            max_speed: default_max_speed(),
            harpooned: false,
            loadout: Vec::new(),
        }
    }

    /// A small military hull flown by the pilot engine.
    pub fn warship(id: u32, faction: u32, location: DVec3, facing: DVec3) -> Self {
        Self {
            facing,
            is_military: true,
            ..Self::new(id, faction, location)
        }
    }

    /// A large unpiloted station.
    pub fn station(id: u32, faction: u32, location: DVec3) -> Self {
        Self {
            half_extents: DVec3::new(150.0, 150.0, 60.0),
            size: SizeClass::Large,
            is_station: true,
            pilot: false,
            max_speed: 0.0,
            ..Self::new(id, faction, location)
        }
    }
}

impl ScenarioDef {
    /// Parse a scenario from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read a scenario file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build one of the [`BUILTIN_SCENARIOS`] by name.
    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "skirmish" => Ok(skirmish()),
            "asteroid_field" => Ok(asteroid_field()),
            "convoy" => Ok(convoy()),
            _ => Err(ScenarioError::UnknownScenario(name.to_string())),
        }
    }

    /// Check ids are unique and sizes make sense.
    pub fn validate(&self) -> Result<()> {
        if let Some(limits) = self.sector_limits {
            if !(limits.is_finite() && limits > 0.0) {
                return Err(ScenarioError::InvalidSectorLimits(limits));
            }
        }

        let mut seen = HashSet::new();
        let ids = self
            .ships
            .iter()
            .map(|s| s.id)
            .chain(self.asteroids.iter().map(|a| a.id))
            .chain(self.colliders.iter().map(|c| c.id));
        for id in ids {
            if !seen.insert(id) {
                return Err(ScenarioError::DuplicateBody(id));
            }
        }

        for ship in &self.ships {
            if !ship.half_extents.is_finite() || ship.half_extents.min_element() < 0.0 {
                return Err(ScenarioError::InvalidBody {
                    body: ship.id,
                    reason: "half extents must be non-negative",
                });
            }
            if !(ship.max_speed.is_finite() && ship.max_speed >= 0.0) {
                return Err(ScenarioError::InvalidBody {
                    body: ship.id,
                    reason: "max speed must be non-negative",
                });
            }
        }

        let radii = self
            .asteroids
            .iter()
            .map(|a| (a.id, a.radius))
            .chain(self.colliders.iter().map(|c| (c.id, c.radius)));
        for (body, radius) in radii {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(ScenarioError::InvalidBody {
                    body,
                    reason: "radius must be positive",
                });
            }
        }

        Ok(())
    }

    /// Diplomacy table described by the relations list.
    pub fn diplomacy(&self) -> Diplomacy {
        let mut diplomacy = Diplomacy::default();
        for relation in &self.relations {
            diplomacy.set(relation.a, relation.b, relation.hostility);
        }
        diplomacy
    }

    /// Highest body id used by the scenario.
    pub fn max_body_id(&self) -> Option<BodyId> {
        self.ships
            .iter()
            .map(|s| s.id)
            .chain(self.asteroids.iter().map(|a| a.id))
            .chain(self.colliders.iter().map(|c| c.id))
            .max()
    }
}

fn hostile(a: u32, b: u32) -> Relation {
    Relation {
        a: FactionId(a),
        b: FactionId(b),
        hostility: Hostility::Hostile,
    }
}

/// "Skirmish": two warship pairs closing head-on, a neutral trader passing by.
fn skirmish() -> ScenarioDef {
    ScenarioDef {
        name: "skirmish".to_string(),
        sector_limits: None,
        relations: vec![hostile(1, 2)],
        ships: vec![
            ShipDef::warship(1, 1, DVec3::new(-3000.0, -500.0, 0.0), DVec3::X),
            ShipDef::warship(2, 1, DVec3::new(-3000.0, 500.0, 0.0), DVec3::X),
            ShipDef::warship(3, 2, DVec3::new(3000.0, -500.0, 0.0), -DVec3::X),
            ShipDef::warship(4, 2, DVec3::new(3000.0, 500.0, 0.0), -DVec3::X),
            ShipDef {
                velocity: DVec3::new(20.0, 0.0, 0.0),
                pilot: false,
                ..ShipDef::new(5, 3, DVec3::new(0.0, 4000.0, 0.0))
            },
        ],
        asteroids: Vec::new(),
        colliders: Vec::new(),
    }
}

/// "Asteroid field": a lone warship hunting a derelict station while rocks
/// drift across its path.
fn asteroid_field() -> ScenarioDef {
    let asteroids = (0..8u32)
        .map(|i| {
            let lane_offset = (i % 3) as f64 - 1.0;
            AsteroidDef {
                id: BodyId(10 + i),
                location: DVec3::new(800.0 + 400.0 * i as f64, 20.0 * lane_offset, 0.0),
                velocity: DVec3::new(-(60.0 + 10.0 * i as f64), 0.0, 0.0),
                radius: 30.0 + 5.0 * i as f64,
            }
        })
        .collect();

    ScenarioDef {
        name: "asteroid_field".to_string(),
        sector_limits: None,
        relations: vec![hostile(1, 2)],
        ships: vec![
            ShipDef::warship(1, 1, DVec3::ZERO, DVec3::X),
            ShipDef::station(2, 2, DVec3::new(0.0, -8000.0, 0.0)),
        ],
        asteroids,
        colliders: vec![ColliderDef {
            id: BodyId(30),
            location: DVec3::new(0.0, -1500.0, 0.0),
            radius: 200.0,
        }],
    }
}

/// "Convoy": escorted freighters heading for their station, raiders inbound.
fn convoy() -> ScenarioDef {
    let freighters = [-300.0, 0.0, 300.0]
        .into_iter()
        .zip(1u32..)
        .map(|(y, id)| ShipDef {
            velocity: DVec3::new(40.0, 0.0, 0.0),
            half_extents: DVec3::new(45.0, 15.0, 15.0),
            size: SizeClass::Medium,
            pilot: false,
            ..ShipDef::new(id, 1, DVec3::new(-2000.0, y, 0.0))
        });

    let mut ships: Vec<ShipDef> = freighters.collect();
    ships.push(ShipDef::warship(4, 1, DVec3::new(-1800.0, 0.0, 200.0), DVec3::X));
    ships.push(ShipDef::warship(5, 2, DVec3::new(2500.0, -800.0, 0.0), -DVec3::X));
    ships.push(ShipDef::warship(6, 2, DVec3::new(2500.0, 800.0, 0.0), -DVec3::X));
    ships.push(ShipDef::station(7, 1, DVec3::new(6000.0, 0.0, 0.0)));

    ScenarioDef {
        name: "convoy".to_string(),
        sector_limits: None,
        relations: vec![hostile(1, 2)],
        ships,
        asteroids: Vec::new(),
        colliders: Vec::new(),
    }
}
