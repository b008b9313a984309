//! Ballistic intercept for constant-speed projectiles.
//!
//! Projectiles inherit the shooter's velocity, so the solve runs in the
//! shooter's frame: find the earliest `t >= 0` with `|D + V t| = s t`,
//! where `D` and `V` are the target's position and velocity relative to the
//! shooter and `s` is the projectile speed.

use glam::DVec3;

use flare_core::constants::NEARLY_ZERO;

/// Result of an intercept solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intercept {
    /// Seconds from now until the projectile meets the target.
    pub time: f64,
    /// World-space target location at that time.
    pub location: DVec3,
}

/// Compute when a projectile fired from a moving shooter reaches a linearly moving target.
///
/// Both bodies are first advanced by `prediction_lag` seconds (the delay
/// before the shot actually leaves). Returns `None` when the target cannot be
/// reached at `projectile_speed`.
pub fn compute_intercept_time(
    target_pos: DVec3,
    target_vel: DVec3,
    shooter_pos: DVec3,
    shooter_vel: DVec3,
    projectile_speed: f64,
    prediction_lag: f64,
) -> Option<Intercept> {
    let target_start = target_pos + target_vel * prediction_lag;
    let shooter_start = shooter_pos + shooter_vel * prediction_lag;

    let delta_location = target_start - shooter_start;
    let delta_velocity = target_vel - shooter_vel;

    let a = delta_velocity.length_squared() - projectile_speed * projectile_speed;
    let b = 2.0 * delta_location.dot(delta_velocity);
    let c = delta_location.length_squared();

    let flight_time = if a.abs() < NEARLY_ZERO {
        // Target recedes exactly as fast as the projectile flies: linear equation
        if b.abs() < NEARLY_ZERO {
            return None;
        }
        let t = -c / b;
        if t < 0.0 {
            return None;
        }
        t
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return None;
        }
    };

    Some(Intercept {
        time: prediction_lag + flight_time,
        location: target_start + target_vel * flight_time,
    })
}
