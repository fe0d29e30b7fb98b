//! A* over the walkable cells of the board
//!
//! The frontier pops the lowest `cost + heuristic` first and, among equal
//! scores, the node discovered earliest. A node already on the frontier keeps
//! the cost and parent of its first discovery.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::game::{Direction, Position};

/// Expansion order for neighbours
const NEIGHBOUR_ORDER: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Left,
    Direction::Right,
];

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    position: Position,
    /// Index of the node this one was discovered from
    parent: Option<usize>,
    cost: u32,
    heuristic: u32,
}

impl SearchNode {
    fn score(&self) -> u32 {
        self.cost + self.heuristic
    }
}

/// Walkability markers, reused from one planning cycle to the next
#[derive(Debug, Clone)]
pub(crate) struct WalkGrid {
    width: usize,
    height: usize,
    walkable: Vec<bool>,
}

impl WalkGrid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            walkable: vec![true; width * height],
        }
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        let in_bounds =
            pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height;
        in_bounds.then(|| pos.y as usize * self.width + pos.x as usize)
    }

    #[cfg(test)]
    pub(crate) fn is_walkable(&self, pos: Position) -> bool {
        self.index_of(pos).is_some_and(|i| self.walkable[i])
    }

    pub(crate) fn set_walkable(&mut self, cells: impl IntoIterator<Item = Position>, walkable: bool) {
        for pos in cells {
            if let Some(i) = self.index_of(pos) {
                self.walkable[i] = walkable;
            }
        }
    }

    /// Waypoints from `start` to `goal`, excluding `start` itself and the
    /// waypoint next to it. `None` when `goal` cannot be reached.
    pub(crate) fn find_path(&self, start: Position, goal: Position) -> Option<Vec<Position>> {
        let cells = self.width * self.height;
        let mut in_frontier = vec![false; cells];
        let mut finalized = vec![false; cells];

        let mut nodes = vec![SearchNode {
            position: start,
            parent: None,
            cost: 0,
            heuristic: start.manhattan_distance(goal),
        }];
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((nodes[0].score(), 0usize)));
        in_frontier[self.index_of(start)?] = true;

        let mut reached = None;
        while let Some(Reverse((_, current))) = frontier.pop() {
            let position = nodes[current].position;
            if let Some(i) = self.index_of(position) {
                finalized[i] = true;
            }
            if position == goal {
                reached = Some(current);
                break;
            }

            for direction in NEIGHBOUR_ORDER {
                let next = position.moved_in_direction(direction);
                let Some(i) = self.index_of(next) else {
                    continue;
                };
                if finalized[i] || !self.walkable[i] || in_frontier[i] {
                    continue;
                }

                let node = SearchNode {
                    position: next,
                    parent: Some(current),
                    cost: nodes[current].cost + 1,
                    heuristic: next.manhattan_distance(goal),
                };
                // Node indices grow with discovery order and break score ties
                frontier.push(Reverse((node.score(), nodes.len())));
                nodes.push(node);
                in_frontier[i] = true;
            }
        }

        let mut current = reached?;
        let mut waypoints = Vec::new();
        while let Some(parent) = nodes[current].parent {
            if parent == 0 {
                break;
            }
            waypoints.push(nodes[current].position);
            current = parent;
        }
        waypoints.reverse();
        Some(waypoints)
    }
}
