use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    /// Holds the snake's head or one of its body segments
    Occupied,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },
}

/// Fixed-size playing field, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Position) -> Result<usize, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                position: pos,
                width: self.width,
                height: self.height,
            });
        }
        Ok(pos.y as usize * self.width + pos.x as usize)
    }

    pub fn get(&self, pos: Position) -> Result<CellState, GridError> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn set(&mut self, pos: Position, state: CellState) -> Result<(), GridError> {
        let i = self.index(pos)?;
        self.cells[i] = state;
        Ok(())
    }

    /// Cells of row `y`, left to right. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[CellState] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Iterate over every cell with its position, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &state)| {
            let pos = Position::new((i % self.width) as i32, (i / self.width) as i32);
            (pos, state)
        })
    }

    /// Locate the pending target, scanning column by column
    pub fn target(&self) -> Option<Position> {
        (0..self.width)
            .flat_map(|x| (0..self.height).map(move |y| Position::new(x as i32, y as i32)))
            .find(|&pos| self.cells[pos.y as usize * self.width + pos.x as usize] == CellState::Target)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&state| state == CellState::Occupied)
            .count()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.cells().all(|(_, state)| state == CellState::Empty));
        assert_eq!(grid.cells().count(), 12);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(4, 3);
        let pos = Position::new(3, 2);
        grid.set(pos, CellState::Occupied).unwrap();
        assert_eq!(grid.get(pos).unwrap(), CellState::Occupied);
        assert_eq!(grid.row(2)[3], CellState::Occupied);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(4, 3);
        for pos in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(4, 0),
            Position::new(0, 3),
        ] {
            assert!(!grid.contains(pos));
            assert_eq!(
                grid.get(pos),
                Err(GridError::OutOfBounds {
                    position: pos,
                    width: 4,
                    height: 3
                })
            );
            assert!(grid.set(pos, CellState::Target).is_err());
        }
    }

    #[test]
    fn test_target_lookup() {
        let mut grid = Grid::new(5, 5);
        assert_eq!(grid.target(), None);

        grid.set(Position::new(2, 4), CellState::Target).unwrap();
        assert_eq!(grid.target(), Some(Position::new(2, 4)));

        grid.clear();
        assert_eq!(grid.target(), None);
    }
}
