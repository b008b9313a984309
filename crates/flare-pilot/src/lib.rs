//! Pilot decision engine for FLARE.
//!
//! Implements target selection scoring, predictive collision avoidance,
//! sector-exit prediction and friendly-fire geometry.
//! Pure functions over a read-only sector snapshot: nothing here mutates
//! world state, every effect is returned to the caller.

pub mod avoidance;
pub mod collision;
pub mod component_select;
pub mod danger;
pub mod friendly_fire;
pub mod intercept;
pub mod sector_exit;
pub mod targeting;
pub mod world;

pub use flare_core as core;

#[cfg(test)]
mod tests;
