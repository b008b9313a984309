//! Sector engine: drives the pilot engine over a live ECS world.
//!
//! `SectorEngine` owns the hecs world, loads scenarios, runs all systems
//! each tick and reports the events they produced. Completely headless,
//! enabling deterministic testing.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flare_core::constants::*;
use flare_core::events::PilotEvent;
use flare_core::preferences::TargetPreferences;
use flare_core::state::{Diplomacy, SectorSnapshot};
use flare_core::types::SimTime;

use crate::error::{Result, ScenarioError};
use crate::scenario::ScenarioDef;
use crate::systems;
use crate::world_setup;

/// Configuration for running a sector.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Sector radius used when the scenario does not set one (meters).
    pub sector_limits: f64,
    /// Anticollision prevention window (seconds).
    pub collision_window: f64,
    /// Sector-exit prevention window (seconds).
    pub exit_window: f64,
    /// Seconds between two launches by the same pilot.
    pub fire_cooldown_secs: f64,
    /// Target preferences shared by every pilot.
    pub preferences: TargetPreferences,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sector_limits: DEFAULT_SECTOR_LIMITS,
            collision_window: DEFAULT_COLLISION_WINDOW_SECS,
            exit_window: DEFAULT_EXIT_WINDOW_SECS,
            fire_cooldown_secs: DEFAULT_FIRE_COOLDOWN_SECS,
            preferences: TargetPreferences::default(),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub time: SimTime,
    pub events: Vec<PilotEvent>,
}

/// The sector engine. Owns the ECS world and all sim state.
pub struct SectorEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: ChaCha8Rng,
    sector_limits: f64,
    diplomacy: Diplomacy,
    next_body_id: u32,
    events: Vec<PilotEvent>,
    despawn_buffer: Vec<Entity>,
}

impl SectorEngine {
    /// Create an empty sector with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            sector_limits: config.sector_limits,
            diplomacy: Diplomacy::default(),
            next_body_id: 0,
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            config,
        }
    }

    /// Replace the sector contents with `scenario` and reset the clock.
    pub fn load_scenario(&mut self, scenario: &ScenarioDef) -> Result<()> {
        scenario.validate()?;
        self.config.preferences.validate()?;

        let sector_limits = scenario.sector_limits.unwrap_or(self.config.sector_limits);
        if !(sector_limits.is_finite() && sector_limits > 0.0) {
            return Err(ScenarioError::InvalidSectorLimits(sector_limits));
        }

        self.world.clear();
        world_setup::populate(&mut self.world, scenario);
        self.events.clear();
        // Status flags must reflect the loadouts before the first pilot pass
        systems::damage::refresh(&mut self.world, &mut self.events);

        self.sector_limits = sector_limits;
        self.diplomacy = scenario.diplomacy();
        self.next_body_id = scenario.max_body_id().map_or(0, |id| id.0 + 1);
        self.time = SimTime::default();

        tracing::info!(
            scenario = %scenario.name,
            ships = scenario.ships.len(),
            asteroids = scenario.asteroids.len(),
            colliders = scenario.colliders.len(),
            sector_limits,
            "scenario loaded"
        );
        Ok(())
    }

    /// Advance the sector by one tick and report what happened.
    pub fn tick(&mut self) -> TickReport {
        self.run_systems();
        self.time.advance();

        TickReport {
            time: self.time,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Current view of the sector, as the pilots see it.
    pub fn snapshot(&self) -> SectorSnapshot {
        systems::snapshot::build(&self.world, self.sector_limits, &self.diplomacy)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world (for tests poking at components).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Snapshot for the pilots
        let snapshot = self.snapshot();
        // 2. Pilot decisions (targets, steering, launches)
        systems::pilot::run(
            &mut self.world,
            &snapshot,
            &self.config,
            &mut self.rng,
            &mut self.next_body_id,
            &mut self.events,
        );
        // 3. Munition guidance and impacts
        systems::munitions::run(&mut self.world, &mut self.events);
        // 4. Damage status from loadouts
        systems::damage::refresh(&mut self.world, &mut self.events);
        // 5. Movement integration
        systems::movement::run(&mut self.world);
        // 6. Cleanup (spent munitions, destroyed ships, strays)
        systems::cleanup::run(&mut self.world, self.sector_limits, &mut self.despawn_buffer);
    }
}
