//! First pass: stream order, contributing area, exit direction and slope.
//!
//! Runs on a full walk with retrace events. A `Retrace` from A to B means the
//! whole subtree of A is done, so A's area and order are final and can be
//! folded into its parent B.

use crate::geometry::Cell;
use crate::traversal::{TraversalContext, TraversalEvent, TraversalHandler};

use super::{BasinConfig, GeoCell};

/// Combines a child's stream order into its parent's.
///
/// Two branches of equal order raise the parent by one. An unset parent
/// takes the child's order. Otherwise the larger order wins.
pub fn merge_order(parent: Option<u32>, child: u32) -> u32 {
    match parent {
        None => child,
        Some(p) if p == child => p + 1,
        Some(p) => p.max(child),
    }
}

/// Morphology event handler. Borrows the attribute buffer for one walk.
pub(crate) struct MorphologyPass<'a> {
    cells: &'a mut [GeoCell],
    cols: usize,
    config: &'a BasinConfig,
    leaves: usize,
}

impl<'a> MorphologyPass<'a> {
    pub(crate) fn new(cells: &'a mut [GeoCell], cols: usize, config: &'a BasinConfig) -> Self {
        Self {
            cells,
            cols,
            config,
            leaves: 0,
        }
    }

    pub(crate) fn leaves(&self) -> usize {
        self.leaves
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    fn set_slope(&mut self, i: usize) {
        self.cells[i].chan_slope = self.config.channel_slope(self.cells[i].area);
    }
}

impl TraversalHandler for MorphologyPass<'_> {
    fn on_event(&mut self, event: TraversalEvent, _ctx: &TraversalContext) {
        match event {
            TraversalEvent::Leaf { at, .. } => {
                let i = self.index(at);
                self.cells[i].order = Some(1);
                self.leaves += 1;
            }
            TraversalEvent::Retrace { from, to } => {
                let (a, b) = (self.index(from), self.index(to));
                self.set_slope(a);

                let child = self.cells[a];
                let parent = &mut self.cells[b];
                parent.area += child.area;
                // Every retraced cell was either a leaf or had a child retraced into it.
                if let Some(order) = child.order {
                    parent.order = Some(merge_order(parent.order, order));
                }
                self.cells[a].exit = from.direction_to(to);
            }
            TraversalEvent::Exit { at } => {
                let i = self.index(at);
                self.set_slope(i);
                self.cells[i].exit = None;
            }
            TraversalEvent::Step { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;

    #[test]
    fn test_merge_order() {
        assert_eq!(merge_order(None, 1), 1);
        assert_eq!(merge_order(None, 3), 3);
        assert_eq!(merge_order(Some(1), 1), 2);
        assert_eq!(merge_order(Some(2), 2), 3);
        assert_eq!(merge_order(Some(3), 1), 3);
        assert_eq!(merge_order(Some(1), 3), 3);
    }

    #[test]
    fn test_confluence_of_two_heads() {
        // Corridor 0 - 1 - 2 with the outlet in the middle.
        let config = BasinConfig::default();
        let mut cells = vec![GeoCell::default(); 3];
        let ctx = TraversalContext {
            state: crate::traversal::TraversalState::Retracing,
            path_depth: 0,
            frontier_len: 0,
            visited: 0,
        };
        let c = |col| Cell::new(0, col);

        let mut pass = MorphologyPass::new(&mut cells, 3, &config);
        for event in [
            TraversalEvent::Leaf { at: c(2), depth: 1 },
            TraversalEvent::Retrace { from: c(2), to: c(1) },
            TraversalEvent::Leaf { at: c(0), depth: 1 },
            TraversalEvent::Retrace { from: c(0), to: c(1) },
            TraversalEvent::Exit { at: c(1) },
        ] {
            pass.on_event(event, &ctx);
        }
        assert_eq!(pass.leaves(), 2);

        assert_eq!(cells[1].area, 3);
        assert_eq!(cells[1].order, Some(2));
        assert_eq!(cells[1].exit, None);
        assert_eq!(cells[0].exit, Some(Direction::East));
        assert_eq!(cells[2].exit, Some(Direction::West));
        assert!((cells[0].chan_slope - config.channel_slope(1)).abs() < 1e-6);
        assert!((cells[1].chan_slope - config.channel_slope(3)).abs() < 1e-6);
    }
}
