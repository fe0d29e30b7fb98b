use std::collections::VecDeque;

use rand::Rng;
use tracing::warn;

use super::planner::{PathNotFound, PathfindingAgent, PlanError};
use crate::game::{Direction, GameEngine, GameState, GameStatus, GridError};

/// Feeds the agent's plan to the engine one direction per tick
#[derive(Debug, Clone)]
pub struct Autopilot {
    agent: PathfindingAgent,
    queued: VecDeque<Direction>,
}

impl Autopilot {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            agent: PathfindingAgent::new(width, height),
            queued: VecDeque::new(),
        }
    }

    /// Next direction to take, starting a new planning cycle when the
    /// previous plan has been used up. `None` when there is no target.
    pub fn next_direction(&mut self, state: &GameState) -> Result<Option<Direction>, PathNotFound> {
        if self.queued.is_empty() {
            match self.agent.plan(&state.grid, &state.snake) {
                Ok(steps) => self.queued.extend(steps),
                Err(PlanError::NoTarget) => return Ok(None),
                Err(PlanError::PathNotFound(err)) => return Err(err),
            }
        }
        Ok(self.queued.pop_front())
    }

    /// Run one tick with the autopilot steering. A missing path ends the
    /// round as lost.
    pub fn tick<R: Rng>(
        &mut self,
        engine: &mut GameEngine<R>,
        state: &mut GameState,
    ) -> Result<GameStatus, GridError> {
        if state.status.is_terminal() {
            return Ok(state.status);
        }

        match self.next_direction(state) {
            Ok(direction) => engine.tick(state, direction),
            Err(err) => {
                warn!(%err, "autopilot found no path");
                self.clear();
                engine.finish(state, GameStatus::Lost);
                Ok(GameStatus::Lost)
            }
        }
    }

    /// Drop the rest of the current plan
    pub fn clear(&mut self) {
        self.queued.clear();
    }

    pub fn queued(&self) -> usize {
        self.queued.len()
    }
}
