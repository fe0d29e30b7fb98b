use rand::{rngs::StdRng, Rng};
use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    grid::GridError,
    state::{GameState, GameStatus, Position, Snake},
    target::TargetPlacer,
};

/// Drives a [`GameState`] one tick at a time. Pacing is left to the caller.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    placer: TargetPlacer<R>,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let placer = match config.seed {
            Some(seed) => TargetPlacer::seeded(seed),
            None => TargetPlacer::from_entropy(),
        };
        Self { config, placer }
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_placer(config: GameConfig, placer: TargetPlacer<R>) -> Self {
        Self { config, placer }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round: a head-only snake in the centre and one target
    pub fn reset(&mut self) -> Result<GameState, GridError> {
        let head = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let mut state = GameState::new(
            Snake::new(head),
            self.config.grid_width,
            self.config.grid_height,
        )?;

        // A 1x1 board is full before the first move
        if self.placer.place_random(&mut state.grid)?.is_exhausted() {
            state.status = GameStatus::Won;
        }

        debug!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            %head,
            "new round"
        );
        Ok(state)
    }

    /// Execute one tick of the game
    pub fn tick(
        &mut self,
        state: &mut GameState,
        direction: Option<Direction>,
    ) -> Result<GameStatus, GridError> {
        if state.status.is_terminal() {
            return Ok(state.status);
        }

        let target = state.target();
        let status = state.snake.advance(
            direction,
            &mut state.grid,
            &mut state.previous_direction,
            &mut self.placer,
        )?;

        if direction.is_some() {
            state.steps += 1;
        }
        if status != GameStatus::Lost && target == Some(state.snake.head) && direction.is_some() {
            state.score += 1;
        }

        self.finish(state, status);
        Ok(status)
    }

    /// Record `status` on the state, logging the end of a round
    pub fn finish(&self, state: &mut GameState, status: GameStatus) {
        state.status = status;
        match status {
            GameStatus::Playing => {}
            GameStatus::Won => info!(score = state.score, steps = state.steps, "round won"),
            GameStatus::Lost => info!(score = state.score, steps = state.steps, "round lost"),
        }
    }
}
