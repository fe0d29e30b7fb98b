use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::{CellState, Grid, GridError};
use super::target::TargetPlacer;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Status returned by every simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub head: Position,
    /// Body segments, neck first and tail last
    pub body: VecDeque<Position>,
    /// Set when a target was eaten; the next move keeps the tail
    pub pending_growth: bool,
}

impl Snake {
    /// Create a head-only snake
    pub fn new(head: Position) -> Self {
        Self {
            head,
            body: VecDeque::new(),
            pending_growth: false,
        }
    }

    /// Get the tail position (the head when there is no body)
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Head followed by every body segment
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Cells covered by the snake, head included
    pub fn length(&self) -> usize {
        self.body.len() + 1
    }

    /// Move one cell, updating `grid` and `previous` and eating any target
    /// in the way.
    ///
    /// A request that exactly reverses `previous` while the snake has a body
    /// is replaced by `previous`, since the head would otherwise run straight
    /// into its own neck.
    pub fn advance<R: Rng>(
        &mut self,
        requested: Option<Direction>,
        grid: &mut Grid,
        previous: &mut Option<Direction>,
        placer: &mut TargetPlacer<R>,
    ) -> Result<GameStatus, GridError> {
        let Some(mut direction) = requested else {
            return Ok(GameStatus::Playing);
        };

        let old_head = self.head;
        if let Some(prev) = *previous {
            if !self.body.is_empty()
                && direction == prev.opposite()
                && grid.get(old_head)? == CellState::Occupied
            {
                direction = prev;
            }
        }
        let new_head = old_head.moved_in_direction(direction);

        // Border check
        if !grid.contains(new_head) {
            return Ok(GameStatus::Lost);
        }
        // The tail has not moved yet, so entering its cell is a collision too
        let entered = grid.get(new_head)?;
        if entered == CellState::Occupied {
            return Ok(GameStatus::Lost);
        }

        if self.pending_growth {
            self.body.push_front(old_head);
            self.pending_growth = false;
        } else if let Some(tail) = self.body.pop_back() {
            grid.set(tail, CellState::Empty)?;
            self.body.push_front(old_head);
        } else {
            grid.set(old_head, CellState::Empty)?;
        }

        self.head = new_head;
        grid.set(new_head, CellState::Occupied)?;

        if entered == CellState::Target {
            self.pending_growth = true;
            if placer.place_random(grid)?.is_exhausted() {
                return Ok(GameStatus::Won);
            }
        }

        *previous = Some(direction);
        Ok(GameStatus::Playing)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    /// Direction applied on the last successful move
    pub previous_direction: Option<Direction>,
    pub status: GameStatus,
    pub score: u32,
    pub steps: u32,
}

impl GameState {
    /// Create a new game state with the snake's head marked on the grid.
    /// No target is placed.
    pub fn new(snake: Snake, grid_width: usize, grid_height: usize) -> Result<Self, GridError> {
        let mut grid = Grid::new(grid_width, grid_height);
        for segment in snake.segments() {
            grid.set(segment, CellState::Occupied)?;
        }

        Ok(Self {
            grid,
            snake,
            previous_direction: None,
            status: GameStatus::Playing,
            score: 0,
            steps: 0,
        })
    }

    pub fn grid_width(&self) -> usize {
        self.grid.width()
    }

    pub fn grid_height(&self) -> usize {
        self.grid.height()
    }

    pub fn target(&self) -> Option<Position> {
        self.grid.target()
    }

    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
