//! Depth-first traversal of a built grid.
//!
//! The engine walks from the seed with an explicit frontier stack and reports
//! what it does as [`TraversalEvent`]s. Handlers turn those events into
//! domain data; the engine itself only owns its stacks and one marker bit.

mod engine;
mod event;

pub use engine::{Traversal, TraversalError};
pub use event::{TraversalContext, TraversalEvent, TraversalHandler, TraversalOutcome, TraversalState};

pub use crate::grid::VisitMarker;
