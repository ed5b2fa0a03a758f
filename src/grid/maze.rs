//! Randomized frontier-growth (Prim-style) spanning-tree builder.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::geometry::{Cell, Direction};

use super::{CellGrid, GridError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildMark {
    Unvisited,
    Frontier,
    Visited,
}

impl CellGrid {
    /// Carves a perfect maze (spanning tree) rooted at the seed.
    ///
    /// Starting from the seed, repeatedly removes a uniformly random cell from
    /// the frontier, opens the edge to one of its already-visited neighbors
    /// (chosen uniformly) and adds its unseen neighbors to the frontier. Every
    /// cell joins the tree exactly once, so the result has `len - 1` open
    /// edges and no cycles.
    ///
    /// The same `rng` state always yields the same topology.
    ///
    /// # Returns
    /// The largest frontier size reached, or `AlreadyBuilt` if called twice.
    pub fn build<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, GridError> {
        if self.is_built() {
            return Err(GridError::AlreadyBuilt);
        }

        let mut marks = vec![BuildMark::Unvisited; self.len()];
        let mut frontier: Vec<Cell> = Vec::new();
        let mut candidates: Vec<Direction> = Vec::with_capacity(4);

        let seed = self.seed();
        marks[self.index(seed)] = BuildMark::Visited;
        self.push_unseen_neighbors(seed, &mut marks, &mut frontier);
        let mut max_frontier = frontier.len();

        while !frontier.is_empty() {
            let k = rng.random_range(0..frontier.len());
            let cell = frontier.swap_remove(k);

            candidates.clear();
            candidates.extend(Direction::all().into_iter().filter(|&dir| {
                self.neighbor(cell, dir)
                    .is_some_and(|n| marks[self.index(n)] == BuildMark::Visited)
            }));

            // A frontier cell was queued by a visited neighbor, so there is
            // always at least one candidate.
            if let Some(&dir) = candidates.choose(rng) {
                self.open_edge(cell, dir);
            }

            marks[self.index(cell)] = BuildMark::Visited;
            self.push_unseen_neighbors(cell, &mut marks, &mut frontier);
            max_frontier = max_frontier.max(frontier.len());
        }

        self.mark_built();

        debug!(
            rows = self.rows(),
            cols = self.cols(),
            open_edges = self.open_edge_count(),
            max_frontier,
            "maze built"
        );

        Ok(max_frontier)
    }

    fn push_unseen_neighbors(&self, cell: Cell, marks: &mut [BuildMark], frontier: &mut Vec<Cell>) {
        for dir in Direction::all() {
            if let Some(n) = self.neighbor(cell, dir) {
                let i = self.index(n);
                if marks[i] == BuildMark::Unvisited {
                    marks[i] = BuildMark::Frontier;
                    frontier.push(n);
                }
            }
        }
    }
}
