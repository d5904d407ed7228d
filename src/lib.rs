//! Grid Snake - the classic snake game in a terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - The Running/GameOver session state machine (session module)
//! - TUI rendering with clickable on-screen controls (render module)
//! - Keyboard and mouse input mapping (input module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
