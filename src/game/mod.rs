//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal shell and the headless runner both drive it through [`GameEngine::tick`].

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;
pub mod target;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::GameEngine;
pub use grid::{CellState, Grid, GridError};
pub use state::{GameState, GameStatus, Position, Snake};
pub use target::{Placement, TargetPlacer};
