//! Iterative depth-first explorer with explicit retrace.

use thiserror::Error;
use tracing::trace;

use crate::geometry::Cell;
use crate::grid::{CellGrid, VisitMarker};

use super::{TraversalContext, TraversalEvent, TraversalHandler, TraversalOutcome, TraversalState};

/// Errors raised by a traversal. All but `AlreadyFinished` mean the grid is
/// not a valid spanning tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("Grid must be built before it can be traversed")]
    GridNotBuilt,
    #[error("Target {target} lies outside the grid")]
    TargetOutOfRange { target: Cell },
    #[error("Target {target} was never reached; the grid is not connected")]
    TargetUnreachable { target: Cell },
    #[error("Cell {at} was reached twice or has no branch point on the path; the grid is not a tree")]
    BrokenTree { at: Cell },
    #[error("Traversal has already finished")]
    AlreadyFinished,
}

/// Walks the open edges of a built [`CellGrid`] from its seed.
///
/// Two owned stacks drive the walk: the frontier holds discovered cells still
/// to visit, the path holds the visited cells between the seed and the
/// current position. When a cell has nowhere to go the path is unwound to the
/// cell that queued the next frontier entry, reporting each move back.
///
/// The engine borrows the grid mutably only to flip its visit marker; it has
/// no knowledge of what the handler computes.
pub struct Traversal<'g, H> {
    grid: &'g mut CellGrid,
    marker: VisitMarker,
    single_hit: bool,
    handler: H,
    frontier: Vec<Cell>,
    path: Vec<Cell>,
    state: TraversalState,
    visited: usize,
}

impl<'g, H: TraversalHandler> Traversal<'g, H> {
    /// Prepares a walk of `grid`.
    ///
    /// Arms `marker` on every cell and queues the seed. With `single_hit` set,
    /// `Retrace` events are not reported, so each cell is seen exactly once
    /// through the `Step` that discovered it.
    pub fn new(
        grid: &'g mut CellGrid,
        marker: VisitMarker,
        single_hit: bool,
        handler: H,
    ) -> Result<Self, TraversalError> {
        if !grid.is_built() {
            return Err(TraversalError::GridNotBuilt);
        }

        let mut traversal = Self {
            grid,
            marker,
            single_hit,
            handler,
            frontier: Vec::new(),
            path: Vec::new(),
            state: TraversalState::Searching,
            visited: 0,
        };
        traversal.initialize();
        Ok(traversal)
    }

    fn initialize(&mut self) {
        self.grid.arm_marker(self.marker);
        self.frontier.clear();
        self.path.clear();
        self.frontier.push(self.grid.seed());
        self.state = TraversalState::Searching;
        self.visited = 0;
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    /// Cells visited so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Consumes the traversal, returning its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Walks until `target` is popped from the frontier, or until every cell
    /// has been visited when `target` is `None`.
    ///
    /// # Returns
    /// `Reached` when the target is found, `Exhausted` after a full walk.
    /// A target that is never found is reported as `TargetUnreachable`.
    pub fn find_solution(&mut self, target: Option<Cell>) -> Result<TraversalOutcome, TraversalError> {
        if matches!(self.state, TraversalState::Success | TraversalState::Exhausted) {
            return Err(TraversalError::AlreadyFinished);
        }
        if let Some(t) = target {
            if !self.grid.contains(t) {
                return Err(TraversalError::TargetOutOfRange { target: t });
            }
        }

        while let Some(cell) = self.frontier.pop() {
            if target == Some(cell) {
                self.state = TraversalState::Success;
                return Ok(TraversalOutcome::Reached {
                    at: cell,
                    depth: self.path.len(),
                });
            }
            self.solve_step(cell)?;
        }

        self.state = TraversalState::Exhausted;
        match target {
            Some(t) => Err(TraversalError::TargetUnreachable { target: t }),
            None => Ok(TraversalOutcome::Exhausted {
                visited: self.visited,
            }),
        }
    }

    /// Visits one cell: queues its unvisited open neighbors, or treats it as
    /// a cul-de-sac and retraces.
    fn solve_step(&mut self, cell: Cell) -> Result<(), TraversalError> {
        if !self.grid.is_marked(cell, self.marker) {
            return Err(TraversalError::BrokenTree { at: cell });
        }
        self.grid.toggle_marker(cell, self.marker);
        self.visited += 1;

        let depth = self.path.len();
        let marker = self.marker;
        let grid = &*self.grid;
        let children: Vec<Cell> = grid
            .open_neighbors(cell)
            .map(|(_, n)| n)
            .filter(|&n| grid.is_marked(n, marker))
            .collect();

        for &child in &children {
            self.frontier.push(child);
            self.emit(TraversalEvent::Step {
                from: cell,
                to: child,
                depth: depth + 1,
            });
        }

        if children.is_empty() {
            self.emit(TraversalEvent::Leaf { at: cell, depth });
            self.retrace_steps(cell)
        } else {
            self.path.push(cell);
            Ok(())
        }
    }

    /// Unwinds the path from the cul-de-sac `from`.
    ///
    /// Stops at the first path cell sharing an open edge with the next
    /// frontier cell, leaving it on the path. With an empty frontier the path
    /// is unwound completely and `Exit` is reported at the seed.
    fn retrace_steps(&mut self, from: Cell) -> Result<(), TraversalError> {
        self.state = TraversalState::Retracing;
        let next = self.frontier.last().copied();
        let mut last = from;

        while let Some(prev) = self.path.pop() {
            if !self.single_hit {
                self.emit(TraversalEvent::Retrace { from: last, to: prev });
            }
            last = prev;

            if let Some(next) = next {
                if self.grid.is_connected(prev, next) {
                    self.path.push(prev);
                    self.state = TraversalState::Searching;
                    return Ok(());
                }
            }
        }

        if let Some(next) = next {
            return Err(TraversalError::BrokenTree { at: next });
        }

        debug_assert_eq!(last, self.grid.seed());
        self.emit(TraversalEvent::Exit { at: self.grid.seed() });
        self.state = TraversalState::Searching;
        Ok(())
    }

    fn emit(&mut self, event: TraversalEvent) {
        let ctx = TraversalContext {
            state: self.state,
            path_depth: self.path.len(),
            frontier_len: self.frontier.len(),
            visited: self.visited,
        };
        trace!(?event, path_depth = ctx.path_depth, "traversal event");
        self.handler.on_event(event, &ctx);
    }
}
