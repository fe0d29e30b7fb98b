use thiserror::Error;
use tracing::debug;

use super::search::WalkGrid;
use super::steering::{decompose, is_close};
use crate::game::{Direction, Grid, Position, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no path from {head} to {target}")]
pub struct PathNotFound {
    pub head: Position,
    pub target: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no target on the grid")]
    NoTarget,
    #[error(transparent)]
    PathNotFound(#[from] PathNotFound),
}

/// Plans the moves that take the snake's head to the target.
///
/// Nearby targets are approached directly; anything further away goes
/// through A* with the snake's body treated as walls.
#[derive(Debug, Clone)]
pub struct PathfindingAgent {
    walk: WalkGrid,
}

impl PathfindingAgent {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            walk: WalkGrid::new(width, height),
        }
    }

    /// Plan towards whatever target is currently on `grid`
    pub fn plan(&mut self, grid: &Grid, snake: &Snake) -> Result<Vec<Direction>, PlanError> {
        let target = grid.target().ok_or(PlanError::NoTarget)?;
        Ok(self.plan_steps(snake, target)?)
    }

    pub fn plan_steps(
        &mut self,
        snake: &Snake,
        target: Position,
    ) -> Result<Vec<Direction>, PathNotFound> {
        let head = snake.head;
        // Leaving the neck's row first keeps the opening step off the neck
        let vertical_first = snake.body.front().is_some_and(|neck| neck.x != head.x);

        if is_close(head, target) {
            return Ok(decompose(head, target, vertical_first));
        }

        self.walk.set_walkable(snake.body.iter().copied(), false);
        let path = self.walk.find_path(head, target);
        self.walk.set_walkable(snake.body.iter().copied(), true);

        let waypoints = path.ok_or(PathNotFound { head, target })?;
        let mut directions = Vec::with_capacity(waypoints.len() + 1);
        let mut current = head;
        for waypoint in waypoints {
            directions.extend(decompose(current, waypoint, vertical_first));
            current = waypoint;
        }

        debug!(%head, %target, steps = directions.len(), "planned path");
        Ok(directions)
    }

    #[cfg(test)]
    fn is_walkable(&self, pos: Position) -> bool {
        self.walk.is_walkable(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CellState, GameConfig, GameEngine, GameState};

    fn snake(head: Position, body: &[Position]) -> Snake {
        Snake {
            head,
            body: body.iter().copied().collect(),
            pending_growth: false,
        }
    }

    /// Cells visited when following `steps` from `start`
    fn trace(start: Position, steps: &[Direction]) -> Vec<Position> {
        steps
            .iter()
            .scan(start, |pos, &direction| {
                *pos = pos.moved_in_direction(direction);
                Some(*pos)
            })
            .collect()
    }

    #[test]
    fn test_open_board_path() {
        let mut agent = PathfindingAgent::new(5, 5);
        let head = Position::new(0, 0);
        let target = Position::new(4, 4);

        let steps = agent.plan_steps(&snake(head, &[]), target).unwrap();

        assert_eq!(steps.len(), 8);
        let visited = trace(head, &steps);
        assert_eq!(visited.last(), Some(&target));
        for pos in visited {
            assert!((0..5).contains(&pos.x) && (0..5).contains(&pos.y));
            assert!(agent.is_walkable(pos));
        }
    }

    #[test]
    fn test_short_range_ignores_body() {
        let mut agent = PathfindingAgent::new(5, 5);
        let head = Position::new(2, 2);
        let target = Position::new(3, 3);
        let body = [Position::new(3, 2), Position::new(2, 3), Position::new(1, 3)];

        let steps = agent.plan_steps(&snake(head, &body), target).unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps.iter().filter(|d| d.is_vertical()).count(), 1);
        assert_eq!(trace(head, &steps).last(), Some(&target));
    }

    #[test]
    fn test_axis_order_follows_neck() {
        let mut agent = PathfindingAgent::new(5, 5);
        let head = Position::new(2, 2);
        let target = Position::new(3, 3);

        // Neck in another column: vertical first, whatever the tail does
        let body = [Position::new(1, 2), Position::new(1, 1), Position::new(2, 1)];
        let steps = agent.plan_steps(&snake(head, &body), target).unwrap();
        assert_eq!(steps, vec![Direction::Down, Direction::Right]);

        // Neck in the head's column: horizontal first
        let body = [Position::new(2, 1), Position::new(1, 1), Position::new(1, 2)];
        let steps = agent.plan_steps(&snake(head, &body), target).unwrap();
        assert_eq!(steps, vec![Direction::Right, Direction::Down]);
    }

    #[test]
    fn test_short_range_plan_does_not_turn_into_neck() {
        let mut engine = GameEngine::new(GameConfig::new(10, 10).with_seed(5));
        let head = Position::new(5, 5);
        let body = [Position::new(4, 5), Position::new(4, 4), Position::new(5, 4)];
        let mut state = GameState::new(snake(head, &body), 10, 10).unwrap();
        let target = Position::new(4, 6);
        state.grid.set(target, CellState::Target).unwrap();
        state.previous_direction = Some(Direction::Right);

        let mut agent = PathfindingAgent::new(10, 10);
        let steps = agent.plan(&state.grid, &state.snake).unwrap();
        assert_eq!(steps, vec![Direction::Down, Direction::Left]);

        for direction in steps {
            engine.tick(&mut state, Some(direction)).unwrap();
        }
        assert_eq!(state.snake.head, target);
        assert_eq!(state.score, 1);
        assert!(state.is_alive());
    }

    #[test]
    fn test_routes_around_body() {
        let mut agent = PathfindingAgent::new(5, 3);
        let head = Position::new(0, 0);
        let target = Position::new(4, 0);
        let body = [Position::new(2, 0), Position::new(2, 1)];

        let steps = agent.plan_steps(&snake(head, &body), target).unwrap();

        let visited = trace(head, &steps);
        assert_eq!(visited.last(), Some(&target));
        assert!(visited.contains(&Position::new(2, 2)));
        for pos in &visited {
            assert!(!body.contains(pos), "stepped onto body at {pos}");
        }
        // Body cells are walkable again once planning is done
        assert!(body.iter().all(|&pos| agent.is_walkable(pos)));
    }

    #[test]
    fn test_enclosed_head_has_no_path() {
        let mut agent = PathfindingAgent::new(5, 5);
        let head = Position::new(0, 0);
        let body = [Position::new(0, 1), Position::new(1, 1), Position::new(1, 0)];
        let target = Position::new(4, 4);

        let result = agent.plan_steps(&snake(head, &body), target);

        assert_eq!(result, Err(PathNotFound { head, target }));
        assert!(body.iter().all(|&pos| agent.is_walkable(pos)));

        // The markers are reusable for the next planning cycle
        let steps = agent.plan_steps(&snake(head, &[]), target).unwrap();
        assert_eq!(steps.len(), 8);
    }

    #[test]
    fn test_plan_reads_target_from_grid() {
        let mut agent = PathfindingAgent::new(4, 4);
        let mut grid = Grid::new(4, 4);
        let head = Position::new(0, 3);
        grid.set(head, CellState::Occupied).unwrap();

        assert_eq!(agent.plan(&grid, &snake(head, &[])), Err(PlanError::NoTarget));

        grid.set(Position::new(3, 0), CellState::Target).unwrap();
        let steps = agent.plan(&grid, &snake(head, &[])).unwrap();
        assert_eq!(trace(head, &steps).last(), Some(&Position::new(3, 0)));
        assert_eq!(steps.len(), 6);
    }
}
