//! Rectangular-grid geometry.
//!
//! Provides cardinal directions, the four-bit open-edge mask and cell
//! coordinates shared by the maze builder, the traversal engine and the
//! basin model.

mod cell;
mod direction;
mod edges;

pub use cell::Cell;
pub use direction::Direction;
pub use edges::EdgeSet;
