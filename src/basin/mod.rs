//! Drainage basin attributes derived from a carved grid.
//!
//! Contains:
//! - Basin configuration and the area to slope law
//! - The morphology pass (stream order, area, exit, slope)
//! - The channel pass (elevation, first-order channel lengths)
//! - The phase-checked [`BasinModel`] and its summary

mod channel;
mod config;
mod geo_cell;
mod model;
mod morphology;
mod summary;

pub use config::{BasinConfig, SlopeLaw};
pub use geo_cell::{FirstOrderCell, GeoCell};
pub use model::{BasinError, BasinModel, BasinPhase};
pub use morphology::merge_order;
pub use summary::BasinSummary;
