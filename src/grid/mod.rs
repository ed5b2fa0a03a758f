//! The drainage grid and its maze builder.
//!
//! A [`CellGrid`] starts with every edge closed; [`CellGrid::build`] carves a
//! random spanning tree rooted at the seed (outlet) cell. After that the
//! topology is fixed and only traversal marker bits change.

mod cell_grid;
mod marker;
mod maze;
mod render;

pub use cell_grid::{CellGrid, GridError};
pub use marker::VisitMarker;
