//! Error type shared by lane construction, level loading and race setup
//!
//! Only setup can fail. Everything that happens during a tick degrades to a
//! no-op instead of raising.

use thiserror::Error;

use crate::sim::PlayerId;

/// Errors raised while building lanes, loading levels or starting a race.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("lane radius must be positive (got {radius})")]
    InvalidGeometry { radius: f32 },
    #[error("cannot start a race without any lanes")]
    EmptyTopology,
    #[error("level \"{name}\" not found")]
    LevelNotFound { name: String },
    #[error("player speed must be positive (got {speed})")]
    InvalidSpeed { speed: f32 },
    #[error("player {id} is already on the track")]
    DuplicatePlayer { id: PlayerId },
    #[error("cannot {operation} while the simulation is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },
    #[error("malformed level or settings data: {0}")]
    LevelParse(#[from] serde_json::Error),
    #[error("failed to read asset: {0}")]
    Io(#[from] std::io::Error),
}
