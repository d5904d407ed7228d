//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The session loop drives it with ticks and direction changes.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, FoodPlacement, GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, TickOutcome};
pub use state::{Collision, GameState, Phase, Position, Snake};
