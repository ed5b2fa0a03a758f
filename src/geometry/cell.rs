//! Grid cell coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Direction;

/// A `(row, col)` position in a rectangular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the cell across the edge toward `dir`, or `None` if that would
    /// fall below row or column zero. Upper bounds are the grid's concern.
    pub fn step(self, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Cell { row, col })
    }

    /// Returns the direction from `self` to an edge-adjacent `other`.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::all()
            .into_iter()
            .find(|&dir| self.step(dir) == Some(other))
    }

    /// Returns true if `other` shares an edge with `self`.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.direction_to(other).is_some()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps_at_origin() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Direction::South), None);
        assert_eq!(origin.step(Direction::West), None);
        assert_eq!(origin.step(Direction::North), Some(Cell::new(1, 0)));
        assert_eq!(origin.step(Direction::East), Some(Cell::new(0, 1)));
    }

    #[test]
    fn test_direction_to() {
        let c = Cell::new(3, 3);
        assert_eq!(c.direction_to(Cell::new(2, 3)), Some(Direction::South));
        assert_eq!(c.direction_to(Cell::new(3, 4)), Some(Direction::East));
        assert_eq!(c.direction_to(Cell::new(4, 4)), None);
        assert_eq!(c.direction_to(c), None);
        assert!(c.is_adjacent(Cell::new(3, 2)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(2, 7).to_string(), "(2, 7)");
    }
}
