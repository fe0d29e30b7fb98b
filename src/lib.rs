//! Snake on a bounded grid with an A* autopilot
//!
//! This library provides:
//! - Core game logic: grid, snake movement, target placement (game module)
//! - The pathfinding agent and its per-tick driver (agent module)
//! - TUI rendering and keyboard input (render and input modules)
//! - Interactive and headless execution modes (modes module)

pub mod agent;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
