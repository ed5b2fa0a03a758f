//! Cardinal directions between edge-adjacent grid cells.

use serde::{Deserialize, Serialize};

/// One of the four edges of a grid cell.
///
/// Rows grow northward and columns grow eastward, so `South` points at
/// `row - 1` and `West` at `col - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward `row - 1`.
    South = 0,
    /// Toward `col - 1`.
    West = 1,
    /// Toward `row + 1`.
    North = 2,
    /// Toward `col + 1`.
    East = 3,
}

impl Direction {
    /// Returns all four directions in bit order.
    pub const fn all() -> [Direction; 4] {
        [
            Direction::South,
            Direction::West,
            Direction::North,
            Direction::East,
        ]
    }

    /// Returns the direction index (0-3).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a direction from an index (0-3).
    pub const fn from_index(index: usize) -> Option<Direction> {
        match index {
            0 => Some(Direction::South),
            1 => Some(Direction::West),
            2 => Some(Direction::North),
            3 => Some(Direction::East),
            _ => None,
        }
    }

    /// Returns the single bit this direction occupies in an edge mask.
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Returns the direction pointing back across the same edge.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::East => Direction::West,
        }
    }

    /// Returns the `(row, col)` offset of the neighbor across this edge.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::South => (-1, 0),
            Direction::West => (0, -1),
            Direction::North => (1, 0),
            Direction::East => (0, 1),
        }
    }

    /// Returns a one-letter name ("S", "W", "N", "E").
    pub const fn short_name(self) -> &'static str {
        match self {
            Direction::South => "S",
            Direction::West => "W",
            Direction::North => "N",
            Direction::East => "E",
        }
    }
}
