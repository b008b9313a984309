//! Reference host for the FLARE pilot engine.
//!
//! Owns a hecs ECS world, builds a `SectorSnapshot` from it every tick,
//! runs the pilot decision engine for each AI ship and applies the
//! resulting velocities, launches and hits.

pub mod engine;
pub mod error;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::{SectorEngine, SimConfig, TickReport};
pub use error::ScenarioError;
pub use flare_core as core;
