//! Startup constants and the [GameConfig] that carries them in to an engine
//!
//! None of these are meant to change while a session is running. A host can still load a
//! different set at startup with [GameConfig::from_json].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// cells per side of the square board
pub const BOARD_SIZE: u32 = 20;
/// pixels per cell, only meaningful to a renderer
pub const CELL_SIZE: u32 = 30;
/// ticks that have to pass before the snake moves one cell
pub const INIT_SPEED: f64 = 12.0;
/// fraction of the current speed removed on every speed up
pub const SPEED_STEP: f64 = 0.1;
/// segments in a fresh snake
pub const INIT_SNAKE_SIZE: u32 = 3;
/// the speed never drops under this, one move per tick
pub const MIN_SPEED: f64 = 1.0;
/// how many cells a spawner samples before giving up
pub const SPAWN_ATTEMPTS: u32 = 1000;
/// nominal rate of the host's frame loop
pub const FRAME_RATE: u32 = 60;
/// margin kept between spawned items and the board edge
pub const SPAWN_MARGIN: i32 = 2;
/// wider margin used in portal mode so the two portals do not crowd the frame
pub const PORTAL_SPAWN_MARGIN: i32 = 3;

/// Configuration for a [crate::engine::GameEngine]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// cells per side of the square board
    pub board_size: u32,
    /// pixels per cell
    pub cell_size: u32,
    /// ticks per move of a fresh snake
    pub init_speed: f64,
    /// fraction removed from the speed on every speed up
    pub speed_step: f64,
    /// lower bound for the speed
    pub min_speed: f64,
    /// segments in a fresh snake
    pub init_snake_size: u32,
    /// samples a spawner takes before reporting the board as full
    pub spawn_attempts: u32,
    /// nominal ticks per second of the driving frame loop
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: BOARD_SIZE,
            cell_size: CELL_SIZE,
            init_speed: INIT_SPEED,
            speed_step: SPEED_STEP,
            min_speed: MIN_SPEED,
            init_snake_size: INIT_SNAKE_SIZE,
            spawn_attempts: SPAWN_ATTEMPTS,
            frame_rate: FRAME_RATE,
        }
    }
}

impl GameConfig {
    /// Parses a config from JSON, any field left out keeps its default. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that an engine built from this config can place a snake and its food.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // the portal margin has to leave at least one cell on each axis
        let min_board = (2 * PORTAL_SPAWN_MARGIN + 1) as u32;
        if self.board_size < min_board {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
                min: min_board,
            });
        }
        if self.board_size > i32::MAX as u32 {
            return Err(ConfigError::BoardTooLarge(self.board_size));
        }
        // the fresh snake sits left of centre and must stay inside the frame
        if self.init_snake_size == 0 || self.init_snake_size > self.board_size / 2 {
            return Err(ConfigError::SnakeDoesNotFit {
                snake: self.init_snake_size,
                board: self.board_size,
            });
        }
        if !self.init_speed.is_finite() || self.init_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.init_speed));
        }
        if !self.min_speed.is_finite() || self.min_speed <= 0.0 || self.min_speed > self.init_speed {
            return Err(ConfigError::InvalidMinSpeed(self.min_speed));
        }
        if !(0.0..1.0).contains(&self.speed_step) {
            return Err(ConfigError::InvalidSpeedStep(self.speed_step));
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::NoSpawnAttempts);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::NoFrameRate);
        }
        Ok(())
    }

    /// side length of the board in pixels
    pub fn pixel_size(&self) -> u32 {
        self.board_size * self.cell_size
    }
}

/// Reasons a [GameConfig] is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// the board cannot fit the frame plus the spawn margins
    #[error("board size {size} is too small, need at least {min}")]
    BoardTooSmall {
        #[allow(missing_docs)]
        size: u32,
        #[allow(missing_docs)]
        min: u32,
    },
    /// the board does not fit in signed cell coordinates
    #[error("board size {0} is too large")]
    BoardTooLarge(u32),
    /// the starting snake would not fit inside the frame
    #[error("a snake of {snake} segments does not fit a board of size {board}")]
    SnakeDoesNotFit {
        #[allow(missing_docs)]
        snake: u32,
        #[allow(missing_docs)]
        board: u32,
    },
    /// the starting speed must be a positive number of ticks
    #[error("initial speed {0} must be positive")]
    InvalidSpeed(f64),
    /// the speed floor must be positive and not above the starting speed
    #[error("minimum speed {0} must be positive and at most the initial speed")]
    InvalidMinSpeed(f64),
    /// the speed step must be in `[0, 1)`
    #[error("speed step {0} must be in [0, 1)")]
    InvalidSpeedStep(f64),
    /// spawners need at least one attempt
    #[error("spawn attempts must be at least 1")]
    NoSpawnAttempts,
    /// the frame rate must be positive
    #[error("frame rate must be at least 1")]
    NoFrameRate,
}
