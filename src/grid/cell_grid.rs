//! CellGrid storage, validation and topology queries.

use std::collections::VecDeque;

use thiserror::Error;

use crate::geometry::{Cell, Direction, EdgeSet};

use super::VisitMarker;

/// Errors raised while creating or building a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid grid dimension: {rows}x{cols} (both must be at least 1 and rows*cols must fit in u32)")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("Seed {seed} lies outside the {rows}x{cols} grid")]
    SeedOutOfRange { seed: Cell, rows: usize, cols: usize },
    #[error("Grid has already been built")]
    AlreadyBuilt,
}

/// A `rows x cols` grid of cells whose open edges form the drainage network.
///
/// Each cell is one byte: the low nibble is its [`EdgeSet`], the high nibble
/// holds [`VisitMarker`] bits owned by traversals. The topology only changes
/// inside [`CellGrid::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    seed: Cell,
    cells: Vec<u8>,
    built: bool,
}

impl CellGrid {
    /// Creates an unbuilt grid with every edge closed.
    ///
    /// # Arguments
    /// * `rows`, `cols` - Grid dimensions, both at least 1
    /// * `seed_row`, `seed_col` - The root (outlet) cell
    pub fn new(rows: usize, cols: usize, seed_row: usize, seed_col: usize) -> Result<Self, GridError> {
        let count = rows
            .checked_mul(cols)
            .filter(|&n| n > 0 && u32::try_from(n).is_ok())
            .ok_or(GridError::InvalidDimension { rows, cols })?;

        let seed = Cell::new(seed_row, seed_col);
        if seed_row >= rows || seed_col >= cols {
            return Err(GridError::SeedOutOfRange { seed, rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            seed,
            cells: vec![0; count],
            built: false,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The root cell every drainage path leads to.
    pub fn seed(&self) -> Cell {
        self.seed
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true once [`CellGrid::build`] has carved the spanning tree.
    pub fn is_built(&self) -> bool {
        self.built
    }

    pub(crate) fn mark_built(&mut self) {
        self.built = true;
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major buffer index of `cell`.
    pub fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.contains(cell));
        cell.row * self.cols + cell.col
    }

    /// Inverse of [`CellGrid::index`].
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Returns the in-grid neighbor across the edge toward `dir`.
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        cell.step(dir).filter(|&n| self.contains(n))
    }

    /// Returns the open edges of `cell`.
    ///
    /// # Panics
    /// Panics if `cell` is outside the grid.
    pub fn edges(&self, cell: Cell) -> EdgeSet {
        EdgeSet::from_bits(self.cells[self.index(cell)])
    }

    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        self.edges(cell).is_open(dir)
    }

    /// Iterates over the neighbors reachable from `cell` through open edges.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        self.edges(cell)
            .iter()
            .filter_map(move |dir| self.neighbor(cell, dir).map(|n| (dir, n)))
    }

    /// Returns true if `a` and `b` share an open edge.
    pub fn is_connected(&self, a: Cell, b: Cell) -> bool {
        a.direction_to(b)
            .is_some_and(|dir| self.contains(b) && self.is_open(a, dir))
    }

    /// Opens the edge between `cell` and its neighbor toward `dir` on both sides.
    pub(crate) fn open_edge(&mut self, cell: Cell, dir: Direction) {
        if let Some(n) = self.neighbor(cell, dir) {
            let (a, b) = (self.index(cell), self.index(n));
            self.cells[a] |= dir.bit();
            self.cells[b] |= dir.opposite().bit();
        }
    }

    /// Number of undirected open edges.
    pub fn open_edge_count(&self) -> usize {
        let directed: u32 = self
            .cells
            .iter()
            .map(|&bits| EdgeSet::from_bits(bits).count())
            .sum();
        directed as usize / 2
    }

    /// Checks the spanning-tree invariant: edge bits are symmetric and never
    /// point off-grid, there are exactly `len - 1` open edges, and every cell
    /// is reachable from the seed.
    pub fn is_spanning_tree(&self) -> bool {
        for cell in self.cells() {
            for dir in self.edges(cell).iter() {
                match self.neighbor(cell, dir) {
                    Some(n) if self.is_open(n, dir.opposite()) => {}
                    _ => return false,
                }
            }
        }

        if self.open_edge_count() != self.len() - 1 {
            return false;
        }

        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::from([self.seed]);
        seen[self.index(self.seed)] = true;
        let mut reached = 1usize;

        while let Some(cell) = queue.pop_front() {
            for (_, n) in self.open_neighbors(cell) {
                let i = self.index(n);
                if !seen[i] {
                    seen[i] = true;
                    reached += 1;
                    queue.push_back(n);
                }
            }
        }

        reached == self.len()
    }

    /// Sets `marker` on every cell, flagging all of them as not yet visited.
    pub fn arm_marker(&mut self, marker: VisitMarker) {
        for bits in &mut self.cells {
            *bits |= marker.bit();
        }
    }

    /// Returns true while `cell` still carries `marker`, i.e. the walk owning
    /// that marker has not visited it yet.
    pub fn is_marked(&self, cell: Cell, marker: VisitMarker) -> bool {
        self.cells[self.index(cell)] & marker.bit() != 0
    }

    /// Flips `marker` on `cell`.
    pub fn toggle_marker(&mut self, cell: Cell, marker: VisitMarker) {
        let i = self.index(cell);
        self.cells[i] ^= marker.bit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = CellGrid::new(4, 6, 1, 2).unwrap();
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 6);
        assert_eq!(grid.len(), 24);
        assert_eq!(grid.seed(), Cell::new(1, 2));
        assert!(!grid.is_built());
        assert!(grid.cells().all(|c| grid.edges(c).is_closed()));
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert_eq!(
            CellGrid::new(0, 5, 0, 0),
            Err(GridError::InvalidDimension { rows: 0, cols: 5 })
        );
        assert_eq!(
            CellGrid::new(3, 0, 0, 0),
            Err(GridError::InvalidDimension { rows: 3, cols: 0 })
        );
        assert!(matches!(
            CellGrid::new(usize::MAX, 2, 0, 0),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_seed_out_of_range_rejected() {
        let err = CellGrid::new(3, 3, 3, 0).unwrap_err();
        assert_eq!(
            err,
            GridError::SeedOutOfRange { seed: Cell::new(3, 0), rows: 3, cols: 3 }
        );
        assert!(CellGrid::new(3, 3, 0, 7).is_err());
    }

    #[test]
    fn test_index_roundtrip_and_cells_order() {
        let grid = CellGrid::new(3, 5, 0, 0).unwrap();
        for (i, cell) in grid.cells().enumerate() {
            assert_eq!(grid.index(cell), i);
            assert_eq!(grid.cell_at(i), cell);
        }
    }

    #[test]
    fn test_neighbor_respects_bounds() {
        let grid = CellGrid::new(2, 3, 0, 0).unwrap();
        let corner = Cell::new(1, 2);
        assert_eq!(grid.neighbor(corner, Direction::North), None);
        assert_eq!(grid.neighbor(corner, Direction::East), None);
        assert_eq!(grid.neighbor(corner, Direction::South), Some(Cell::new(0, 2)));
        assert_eq!(grid.neighbor(corner, Direction::West), Some(Cell::new(1, 1)));
    }

    #[test]
    fn test_open_edge_is_symmetric() {
        let mut grid = CellGrid::new(2, 2, 0, 0).unwrap();
        grid.open_edge(Cell::new(0, 0), Direction::North);
        assert!(grid.is_open(Cell::new(0, 0), Direction::North));
        assert!(grid.is_open(Cell::new(1, 0), Direction::South));
        assert!(grid.is_connected(Cell::new(1, 0), Cell::new(0, 0)));
        assert_eq!(grid.open_edge_count(), 1);

        // Off-grid edges are never opened.
        grid.open_edge(Cell::new(0, 0), Direction::South);
        assert_eq!(grid.open_edge_count(), 1);
    }

    #[test]
    fn test_unbuilt_grid_is_not_a_spanning_tree() {
        let grid = CellGrid::new(2, 2, 0, 0).unwrap();
        assert!(!grid.is_spanning_tree());

        let single = CellGrid::new(1, 1, 0, 0).unwrap();
        assert!(single.is_spanning_tree());
    }

    #[test]
    fn test_markers_do_not_touch_edges() {
        let mut grid = CellGrid::new(2, 2, 0, 0).unwrap();
        grid.open_edge(Cell::new(0, 0), Direction::East);
        let before: Vec<_> = grid.cells().map(|c| grid.edges(c)).collect();

        grid.arm_marker(VisitMarker::PRIMARY);
        assert!(grid.cells().all(|c| grid.is_marked(c, VisitMarker::PRIMARY)));
        assert!(grid.cells().all(|c| !grid.is_marked(c, VisitMarker::SECONDARY)));

        grid.toggle_marker(Cell::new(0, 1), VisitMarker::PRIMARY);
        assert!(!grid.is_marked(Cell::new(0, 1), VisitMarker::PRIMARY));

        let after: Vec<_> = grid.cells().map(|c| grid.edges(c)).collect();
        assert_eq!(before, after);
        assert_eq!(grid.open_edge_count(), 1);
    }
}
