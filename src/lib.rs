//! Synthetic drainage basin generator.
//!
//! This crate carves a random spanning tree over a rectangular grid and walks
//! it to derive a river network: stream order, catchment area, channel slope
//! and channel elevation for every cell.

pub mod basin;
pub mod geometry;
pub mod grid;
pub mod traversal;

pub use basin::{BasinConfig, BasinError, BasinModel, BasinPhase, BasinSummary, FirstOrderCell, GeoCell, SlopeLaw};
pub use geometry::{Cell, Direction, EdgeSet};
pub use grid::{CellGrid, GridError, VisitMarker};
pub use traversal::{Traversal, TraversalError, TraversalEvent, TraversalHandler};
