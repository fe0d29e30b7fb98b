//! Autonomous steering for the snake
//!
//! [`PathfindingAgent`] turns the board into a list of directions once per
//! planning cycle; [`Autopilot`] hands those directions to the engine tick by
//! tick and replans when they run out.

pub mod autopilot;
pub mod planner;
mod search;
pub mod steering;

pub use autopilot::Autopilot;
pub use planner::{PathNotFound, PathfindingAgent, PlanError};
