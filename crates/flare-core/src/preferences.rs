//! Target preferences: the caller-supplied weights that steer target selection.
//!
//! A target's score is `state × (attack_target + distance + alignement)`.
//! The `is_*` fields are multipliers folded into the state term; the
//! `*_weight` fields scale the additive terms.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::BodyId;

/// Weights and thresholds governing target scoring.
///
/// Missing keys in a JSON document fall back to [`TargetPreferences::default`],
/// so a minimal file can override just the weights you care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetPreferences {
    /// Base value of the state term.
    pub target_state_weight: f64,

    // ── Size class ───────────────────────────────────────────────────────────
    pub is_large: f64,
    pub is_small: f64,

    // ── Role ─────────────────────────────────────────────────────────────────
    pub is_station: f64,
    pub is_not_station: f64,
    pub is_military: f64,
    pub is_not_military: f64,
    pub is_dangerous: f64,
    pub is_not_dangerous: f64,

    // ── Damage state ─────────────────────────────────────────────────────────
    pub is_stranded: f64,
    pub is_not_stranded: f64,
    pub is_uncontrollable_civil: f64,
    pub is_uncontrollable_military: f64,
    pub is_not_uncontrollable: f64,
    pub is_harpooned: f64,

    // ── Stickiness ───────────────────────────────────────────────────────────
    pub last_target_weight: f64,
    pub last_target: Option<BodyId>,

    // ── Distance ─────────────────────────────────────────────────────────────
    pub distance_weight: f64,
    /// Candidates at or beyond this range get no distance score (meters).
    pub max_distance: f64,
    pub base_location: DVec3,

    // ── Alignement ───────────────────────────────────────────────────────────
    pub alignement_weight: f64,
    /// Dot product below which the alignement score is zero.
    pub min_alignement: f64,
    pub preferred_direction: DVec3,

    // ── Attack target ────────────────────────────────────────────────────────
    pub attack_target_weight: f64,
    /// Ship the caller is protecting; candidates attacking it score higher.
    pub attack_target: Option<BodyId>,

    /// Bodies never returned as a target.
    pub ignore_list: Vec<BodyId>,
}

impl Default for TargetPreferences {
    fn default() -> Self {
        Self {
            target_state_weight: 1.0,
            is_large: 1.0,
            is_small: 1.0,
            is_station: 1.0,
            is_not_station: 1.0,
            is_military: 1.0,
            is_not_military: 1.0,
            is_dangerous: 1.0,
            is_not_dangerous: 1.0,
            is_stranded: 1.0,
            is_not_stranded: 1.0,
            is_uncontrollable_civil: 1.0,
            is_uncontrollable_military: 1.0,
            is_not_uncontrollable: 1.0,
            is_harpooned: 1.0,
            last_target_weight: 1.0,
            last_target: None,
            distance_weight: 1.0,
            max_distance: 20_000.0,
            base_location: DVec3::ZERO,
            alignement_weight: 0.0,
            min_alignement: -1.0,
            preferred_direction: DVec3::X,
            attack_target_weight: 1.0,
            attack_target: None,
            ignore_list: Vec::new(),
        }
    }
}

impl TargetPreferences {
    /// Parse preferences from a JSON document and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let preferences: Self = serde_json::from_str(json)?;
        preferences.validate()?;
        Ok(preferences)
    }

    /// Reject values that would make scoring meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_distance",
                reason: "must be positive and finite",
            });
        }
        if !(-1.0..1.0).contains(&self.min_alignement) {
            return Err(ConfigError::Invalid {
                field: "min_alignement",
                reason: "must be in [-1, 1)",
            });
        }
        let multipliers = [
            ("target_state_weight", self.target_state_weight),
            ("is_large", self.is_large),
            ("is_small", self.is_small),
            ("is_station", self.is_station),
            ("is_not_station", self.is_not_station),
            ("is_military", self.is_military),
            ("is_not_military", self.is_not_military),
            ("is_dangerous", self.is_dangerous),
            ("is_not_dangerous", self.is_not_dangerous),
            ("is_stranded", self.is_stranded),
            ("is_not_stranded", self.is_not_stranded),
            ("is_uncontrollable_civil", self.is_uncontrollable_civil),
            ("is_uncontrollable_military", self.is_uncontrollable_military),
            ("is_not_uncontrollable", self.is_not_uncontrollable),
            ("is_harpooned", self.is_harpooned),
            ("last_target_weight", self.last_target_weight),
        ];
        for (field, value) in multipliers {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "multipliers must be non-negative and finite",
                });
            }
        }
        Ok(())
    }

    /// Whether `id` is on the ignore list.
    pub fn ignores(&self, id: BodyId) -> bool {
        self.ignore_list.contains(&id)
    }
}
