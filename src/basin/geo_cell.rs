//! Per-cell hydrological attributes.

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Direction};

/// Attributes derived for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCell {
    /// Strahler stream order; `None` until the morphology pass sets it.
    pub order: Option<u32>,
    /// Number of cells draining through this one, itself included.
    pub area: u32,
    /// Edge through which flow leaves toward the outlet. `None` at the outlet.
    pub exit: Option<Direction>,
    pub chan_slope: f32,
    /// Channel elevation above the outlet.
    pub chan_elev: f32,
    /// Channel length from the outlet, in cells. Set on first-order cells only.
    pub chan_len: Option<u32>,
}

impl Default for GeoCell {
    fn default() -> Self {
        Self {
            order: None,
            area: 1,
            exit: None,
            chan_slope: 0.0,
            chan_elev: 0.0,
            chan_len: None,
        }
    }
}

impl GeoCell {
    /// True for channel heads (cells nothing drains into).
    pub fn is_channel_head(&self) -> bool {
        self.area == 1
    }
}

/// A channel head found by the channel pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstOrderCell {
    pub cell: Cell,
    pub chan_len: u32,
}
