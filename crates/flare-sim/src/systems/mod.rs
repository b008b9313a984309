//! ECS systems that operate on the sector world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod damage;
pub mod movement;
pub mod munitions;
pub mod pilot;
pub mod snapshot;
