//! Direct axis-by-axis steering between two cells

use crate::game::{Direction, Position};

/// True when `b` lies within one cell of `a` on both axes
pub fn is_close(a: Position, b: Position) -> bool {
    a.x.abs_diff(b.x) < 2 && a.y.abs_diff(b.y) < 2
}

/// Split the displacement from `from` to `to` into unit steps, one axis at a
/// time. No obstacle checking is done.
pub fn decompose(from: Position, to: Position, vertical_first: bool) -> Vec<Direction> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let horizontal = if dx >= 0 { Direction::Right } else { Direction::Left };
    let vertical = if dy >= 0 { Direction::Down } else { Direction::Up };
    let horizontal = std::iter::repeat(horizontal).take(dx.unsigned_abs() as usize);
    let vertical = std::iter::repeat(vertical).take(dy.unsigned_abs() as usize);

    if vertical_first {
        vertical.chain(horizontal).collect()
    } else {
        horizontal.chain(vertical).collect()
    }
}
