//! Second pass: channel elevation and first-order channel lengths.
//!
//! Runs single-hit: each cell is reported once through the `Step` that
//! discovers it, after its parent's elevation is already known.

use crate::geometry::Cell;
use crate::traversal::{TraversalContext, TraversalEvent, TraversalHandler};

use super::{FirstOrderCell, GeoCell};

pub(crate) struct ChannelPass<'a> {
    cells: &'a mut [GeoCell],
    cols: usize,
    first_order: Vec<FirstOrderCell>,
}

impl<'a> ChannelPass<'a> {
    /// Pins the outlet at elevation zero before the walk starts.
    pub(crate) fn new(cells: &'a mut [GeoCell], cols: usize, outlet: Cell) -> Self {
        let mut pass = Self {
            cells,
            cols,
            first_order: Vec::new(),
        };
        let i = pass.index(outlet);
        pass.cells[i].chan_elev = 0.0;
        pass
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Channel heads in discovery order.
    pub(crate) fn into_first_order(self) -> Vec<FirstOrderCell> {
        self.first_order
    }
}

impl TraversalHandler for ChannelPass<'_> {
    fn on_event(&mut self, event: TraversalEvent, _ctx: &TraversalContext) {
        match event {
            TraversalEvent::Step { from, to, .. } => {
                let parent = self.cells[self.index(from)];
                let i = self.index(to);
                self.cells[i].chan_elev = parent.chan_elev + parent.chan_slope;
            }
            TraversalEvent::Leaf { at, depth } => {
                let chan_len = depth as u32;
                let i = self.index(at);
                self.cells[i].chan_len = Some(chan_len);
                self.first_order.push(FirstOrderCell { cell: at, chan_len });
            }
            TraversalEvent::Retrace { .. } | TraversalEvent::Exit { .. } => {}
        }
    }
}
