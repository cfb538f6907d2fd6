//! Runtime configuration (not per-entity gameplay tuning, which lives next
//! to each entity).

use std::time::Duration;

use crate::error::ConfigError;
use crate::vector::Vector2;

pub const DEFAULT_WORLD_SIZE: f64 = 550.0;
/// Below this the world is smaller than a large asteroid.
pub const MIN_WORLD_SIZE: f64 = 50.0;
pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;
pub const DEFAULT_LIVES: u32 = 3;
/// 10 seconds at 60 FPS.
pub const DEFAULT_ALIEN_SPAWN_INTERVAL: u32 = 600;
pub const DEFAULT_MAX_ALIEN_SHIPS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Side of the square, wrapping world.
    pub world_size: f64,
    pub fps: u32,
    pub starting_lives: u32,
    /// Frames between alien spawn attempts.
    pub alien_spawn_interval: u32,
    pub max_alien_ships: usize,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_size: DEFAULT_WORLD_SIZE,
            fps: DEFAULT_FPS,
            starting_lives: DEFAULT_LIVES,
            alien_spawn_interval: DEFAULT_ALIEN_SPAWN_INTERVAL,
            max_alien_ships: DEFAULT_MAX_ALIEN_SHIPS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.world_size.is_finite() || self.world_size <= 0.0 {
            return Err(ConfigError::WorldSize(self.world_size));
        }
        if self.world_size < MIN_WORLD_SIZE {
            return Err(ConfigError::WorldTooSmall {
                got: self.world_size,
                min: MIN_WORLD_SIZE,
            });
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::FrameRate {
                got: self.fps,
                max: MAX_FPS,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.alien_spawn_interval == 0 {
            return Err(ConfigError::SpawnInterval);
        }
        Ok(self)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    pub fn world_center(&self) -> Vector2 {
        Vector2::new(self.world_size / 2.0, self.world_size / 2.0)
    }
}
