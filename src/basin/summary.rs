//! Whole-basin statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FirstOrderCell, GeoCell};

/// Aggregate statistics over a finished basin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasinSummary {
    pub cell_count: usize,
    /// Area at the outlet; equals `cell_count` for a connected basin.
    pub outlet_area: u32,
    pub max_order: u32,
    /// `order_counts[k]` is the number of cells of order `k + 1`.
    pub order_counts: Vec<usize>,
    /// Highest channel elevation, i.e. total relief above the outlet.
    pub max_elevation: f32,
    pub mean_slope: f32,
    pub leaf_count: usize,
    pub longest_channel: u32,
}

impl BasinSummary {
    /// Computes the summary from a fully populated attribute buffer.
    pub fn compute(cells: &[GeoCell], outlet: &GeoCell, first_order: &[FirstOrderCell]) -> Self {
        let max_order = cells.iter().filter_map(|c| c.order).max().unwrap_or(0);

        let mut order_counts = vec![0usize; max_order as usize];
        for order in cells.iter().filter_map(|c| c.order) {
            if order >= 1 {
                order_counts[order as usize - 1] += 1;
            }
        }

        let max_elevation = cells.iter().map(|c| c.chan_elev).fold(0.0f32, f32::max);
        let mean_slope = if cells.is_empty() {
            0.0
        } else {
            cells.iter().map(|c| c.chan_slope as f64).sum::<f64>() as f32 / cells.len() as f32
        };

        Self {
            cell_count: cells.len(),
            outlet_area: outlet.area,
            max_order,
            order_counts,
            max_elevation,
            mean_slope,
            leaf_count: first_order.len(),
            longest_channel: first_order.iter().map(|f| f.chan_len).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for BasinSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cells:           {}", self.cell_count)?;
        writeln!(f, "Outlet area:     {}", self.outlet_area)?;
        writeln!(f, "Max order:       {}", self.max_order)?;
        for (k, count) in self.order_counts.iter().enumerate() {
            writeln!(f, "  order {:>2}:      {}", k + 1, count)?;
        }
        writeln!(f, "Relief:          {:.3}", self.max_elevation)?;
        writeln!(f, "Mean slope:      {:.3}", self.mean_slope)?;
        writeln!(f, "Channel heads:   {}", self.leaf_count)?;
        write!(f, "Longest channel: {}", self.longest_channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Cell;

    #[test]
    fn test_summary_of_three_cell_basin() {
        let head = GeoCell {
            order: Some(1),
            area: 1,
            chan_slope: 0.5,
            chan_elev: 0.25,
            chan_len: Some(1),
            ..Default::default()
        };
        let outlet = GeoCell {
            order: Some(2),
            area: 3,
            chan_slope: 0.25,
            ..Default::default()
        };
        let cells = vec![head, outlet, head];
        let first_order = vec![
            FirstOrderCell { cell: Cell::new(0, 2), chan_len: 1 },
            FirstOrderCell { cell: Cell::new(0, 0), chan_len: 1 },
        ];

        let summary = BasinSummary::compute(&cells, &outlet, &first_order);
        assert_eq!(summary.cell_count, 3);
        assert_eq!(summary.outlet_area, 3);
        assert_eq!(summary.max_order, 2);
        assert_eq!(summary.order_counts, vec![2, 1]);
        assert!((summary.max_elevation - 0.25).abs() < 1e-6);
        assert!((summary.mean_slope - 1.25 / 3.0).abs() < 1e-6);
        assert_eq!(summary.leaf_count, 2);
        assert_eq!(summary.longest_channel, 1);
        assert!(summary.to_string().contains("Max order:       2"));
    }
}
