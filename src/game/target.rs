use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use super::grid::{CellState, Grid, GridError};
use super::state::Position;

/// Outcome of a target placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed(Position),
    /// Every cell is occupied by the snake; nothing was placed
    Exhausted,
}

impl Placement {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Placement::Exhausted)
    }
}

/// Drops targets onto free cells.
///
/// Sampling is two-stage: a row with a free cell is picked uniformly, then a
/// free column within that row. Cells in sparsely free rows are therefore
/// more likely than cells in mostly free rows.
#[derive(Debug, Clone)]
pub struct TargetPlacer<R = StdRng> {
    rng: R,
}

impl TargetPlacer<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TargetPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn place_random(&mut self, grid: &mut Grid) -> Result<Placement, GridError> {
        let free_rows: Vec<usize> = (0..grid.height())
            .filter(|&y| grid.row(y).iter().any(|&cell| cell != CellState::Occupied))
            .collect();

        if free_rows.is_empty() {
            debug!("no free cell left for a target");
            return Ok(Placement::Exhausted);
        }

        let y = free_rows[self.rng.gen_range(0..free_rows.len())];
        let free_columns: Vec<usize> = grid
            .row(y)
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != CellState::Occupied)
            .map(|(x, _)| x)
            .collect();
        let x = free_columns[self.rng.gen_range(0..free_columns.len())];

        let pos = Position::new(x as i32, y as i32);
        grid.set(pos, CellState::Target)?;
        debug!(%pos, "placed target");

        Ok(Placement::Placed(pos))
    }
}
