//! Error types for the fallible edges of the game: configuration only.
//! The simulation itself never fails; irrelevant collisions are no-ops.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world size must be a positive, finite number (got {0})")]
    WorldSize(f64),
    #[error("world size must be at least {min} (got {got})")]
    WorldTooSmall { got: f64, min: f64 },
    #[error("frame rate must be between 1 and {max} (got {got})")]
    FrameRate { got: u32, max: u32 },
    #[error("the player needs at least one life")]
    NoLives,
    #[error("alien spawn interval must be at least one frame")]
    SpawnInterval,
}
