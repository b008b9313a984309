//! Core types and definitions for the FLARE pilot engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vector and identity types, the sector snapshot data model, ECS components,
//! pilot events, target preferences and constants.
//! It has no dependency on any ECS or runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod preferences;
pub mod state;
pub mod types;

pub use glam::DVec3;

#[cfg(test)]
mod tests;
