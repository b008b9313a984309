//! Errors raised while loading scenarios.

use thiserror::Error;

use flare_core::error::ConfigError;
use flare_core::types::BodyId;

/// Errors surfaced when reading, parsing or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),

    #[error("body id {0} is used more than once")]
    DuplicateBody(BodyId),

    #[error("body {body}: {reason}")]
    InvalidBody { body: BodyId, reason: &'static str },

    #[error("sector limits must be positive and finite, got {0}")]
    InvalidSectorLimits(f64),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
