//! ASCII rendering of a grid's open edges.

use std::fmt;

use crate::geometry::{Cell, Direction};

use super::CellGrid;

impl CellGrid {
    fn write_wall_row(&self, f: &mut fmt::Formatter<'_>, row: usize, side: Direction) -> fmt::Result {
        for col in 0..self.cols() {
            let open = self.is_open(Cell::new(row, col), side);
            f.write_str(if open { "+  " } else { "+--" })?;
        }
        writeln!(f, "+")
    }
}

/// Draws the maze with north (the highest row) at the top. The outlet is
/// shown as `()`.
impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows()).rev() {
            self.write_wall_row(f, row, Direction::North)?;
            for col in 0..self.cols() {
                let cell = Cell::new(row, col);
                f.write_str(if self.is_open(cell, Direction::West) { " " } else { "|" })?;
                f.write_str(if cell == self.seed() { "()" } else { "  " })?;
            }
            writeln!(f, "|")?;
        }
        self.write_wall_row(f, 0, Direction::South)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_render_corridor() {
        let mut grid = CellGrid::new(1, 2, 0, 0).unwrap();
        grid.build(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(grid.to_string(), "+--+--+\n|()   |\n+--+--+\n");
    }

    #[test]
    fn test_render_column_puts_north_on_top() {
        let mut grid = CellGrid::new(2, 1, 0, 0).unwrap();
        grid.build(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(grid.to_string(), "+--+\n|  |\n+  +\n|()|\n+--+\n");
    }

    #[test]
    fn test_render_dimensions() {
        let mut grid = CellGrid::new(4, 7, 0, 0).unwrap();
        grid.build(&mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 * 4 + 1);
        assert!(lines.iter().all(|l| l.len() == 3 * 7 + 1));
    }
}
