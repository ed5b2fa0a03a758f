//! Events, context and handler trait for grid traversals.

use crate::geometry::Cell;

/// What a traversal reports to its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent {
    /// `to` was discovered through an open edge of `from` and queued.
    /// `depth` is the number of edges between the seed and `to`.
    Step { from: Cell, to: Cell, depth: usize },
    /// `at` has no unvisited open neighbor (a cul-de-sac).
    Leaf { at: Cell, depth: usize },
    /// The walk backed up from `from` to the previous cell on its path.
    Retrace { from: Cell, to: Cell },
    /// The walk unwound all the way to the seed; emitted once, last.
    Exit { at: Cell },
}

/// Coarse traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    Searching,
    /// Backing up from a cul-de-sac toward the next branch point.
    Retracing,
    /// The target cell was reached.
    Success,
    /// Every reachable cell was visited.
    Exhausted,
}

/// Read-only view of the engine handed to the handler with every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalContext {
    pub state: TraversalState,
    /// Cells currently on the path stack.
    pub path_depth: usize,
    /// Cells still queued on the frontier stack.
    pub frontier_len: usize,
    /// Cells visited so far in this walk.
    pub visited: usize,
}

/// Receives traversal events.
///
/// All domain logic lives in the handler; the engine only walks edges.
pub trait TraversalHandler {
    fn on_event(&mut self, event: TraversalEvent, ctx: &TraversalContext);
}

impl<F> TraversalHandler for F
where
    F: FnMut(TraversalEvent, &TraversalContext),
{
    fn on_event(&mut self, event: TraversalEvent, ctx: &TraversalContext) {
        self(event, ctx)
    }
}

/// Result of a completed [`find_solution`](super::Traversal::find_solution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOutcome {
    /// The target was popped from the frontier at the given depth.
    Reached { at: Cell, depth: usize },
    /// No target was given and every reachable cell was visited.
    Exhausted { visited: usize },
}
