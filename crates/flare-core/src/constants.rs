//! Pilot engine constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Per-component tolerance below which a vector counts as zero.
pub const NEARLY_ZERO: f64 = 1e-4;

/// Smallest size (meters) a body is ever considered to have.
pub const MIN_BODY_SIZE: f64 = 1.0;

// --- Collision prediction ---

/// Bodies farther than this multiple of the observer size are ignored by the scan.
pub const RELEVANCE_SIZE_FACTOR: f64 = 200.0;

/// Minimum closing speed (m/s) along the line of sight for a body to be a threat.
pub const MIN_CLOSING_SPEED: f64 = 2.0;

/// Closest approaches further in the future than this (seconds, plus the
/// inter-collision travel time) are not considered dangerous.
pub const DANGER_HORIZON_SECS: f64 = 5.0;

/// Default anticollision prevention window (seconds).
pub const DEFAULT_COLLISION_WINDOW_SECS: f64 = 3.0;

// --- Sector limits ---

/// Fraction of the sector radius, measured from the boundary, that always triggers an exit warning.
pub const SECTOR_EXIT_MARGIN_FRACTION: f64 = 0.1;

/// Facing · inward direction above which the ship is considered heading back to the center.
pub const FACING_CENTER_DOT: f64 = 0.5;

/// Default sector-exit prevention window (seconds).
pub const DEFAULT_EXIT_WINDOW_SECS: f64 = 10.0;

/// Default sector boundary radius (meters).
pub const DEFAULT_SECTOR_LIMITS: f64 = 40_000.0;

// --- Target selection ---

/// State score divisor applied per homing munition already inbound on a candidate.
pub const MUNITION_SCORE_DIVISOR: f64 = 25.0;

/// Inbound munitions at which a dangerous candidate is skipped.
pub const MAX_MUNITIONS_ON_DANGEROUS: usize = 2;

/// Inbound munitions at which a harmless candidate is skipped.
pub const MAX_MUNITIONS_ON_HARMLESS: usize = 1;

// --- Component targeting weights ---

pub const ARMED_WEAPON_WEIGHT: u32 = 10;
pub const ARMED_POD_WEIGHT: u32 = 4;
pub const DISARMED_POD_WEIGHT: u32 = 5;
pub const RCS_WEIGHT: u32 = 1;
pub const INTERNAL_WEIGHT: u32 = 1;

// --- Munitions (reference host) ---

/// Homing munition speed (m/s).
pub const MUNITION_SPEED: f64 = 600.0;

/// Homing munition burn time before it goes inert (seconds).
pub const MUNITION_FUEL_SECS: f64 = 20.0;

/// Distance at which a munition hits its target (meters).
pub const MUNITION_LETHAL_RADIUS: f64 = 15.0;

/// Seconds between two launches by the same pilot.
pub const DEFAULT_FIRE_COOLDOWN_SECS: f64 = 4.0;

/// Longest projectile flight considered by the friendly-fire check (seconds).
pub const FRIENDLY_FIRE_MAX_DELAY_SECS: f64 = 10.0;

/// Extra margin around friendly hulls for the friendly-fire check (meters).
pub const FRIENDLY_FIRE_AIM_RADIUS: f64 = 5.0;

/// Bodies beyond this multiple of the sector limits are despawned.
pub const DESPAWN_LIMITS_FACTOR: f64 = 2.0;
