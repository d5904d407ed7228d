use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Direction;
use super::state::Position;

/// Largest grid side accepted; at two columns per cell this still fits a
/// wide terminal
pub const MAX_GRID_SIZE: i32 = 100;

/// How a new piece of food is placed after the snake eats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FoodPlacement {
    /// Uniform over the whole grid. Food can land under the snake.
    #[default]
    Anywhere,
    /// Uniform over cells the snake does not occupy
    AvoidSnake,
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("grid size {size} exceeds the maximum of {max}")]
    GridTooLarge { size: i32, max: i32 },
    #[error("initial snake head ({x}, {y}) lies outside a {size}x{size} grid")]
    HeadOutOfBounds { x: i32, y: i32, size: i32 },
    #[error("initial food ({x}, {y}) lies outside a {size}x{size} grid")]
    FoodOutOfBounds { x: i32, y: i32, size: i32 },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: i32,
    /// Single segment the snake starts as
    pub initial_head: Position,
    /// Where the first piece of food sits
    pub initial_food: Position,
    /// Direction of travel at game start
    pub initial_direction: Direction,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    pub food_placement: FoodPlacement,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_head: Position::new(10, 10),
            initial_food: Position::new(5, 5),
            initial_direction: Direction::Right,
            tick_interval_ms: 200,
            food_placement: FoodPlacement::Anywhere,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size, keeping the default
    /// start positions
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.grid_size;
        if size < 1 {
            return Err(ConfigError::EmptyGrid);
        }
        if size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size,
                max: MAX_GRID_SIZE,
            });
        }
        if !self.contains(self.initial_head) {
            return Err(ConfigError::HeadOutOfBounds {
                x: self.initial_head.x,
                y: self.initial_head.y,
                size,
            });
        }
        if !self.contains(self.initial_food) {
            return Err(ConfigError::FoodOutOfBounds {
                x: self.initial_food.x,
                y: self.initial_food.y,
                size,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// Check whether a position lies on the grid
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.grid_size).contains(&pos.x) && (0..self.grid_size).contains(&pos.y)
    }
}
