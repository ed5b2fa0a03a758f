//! Basin model: owns the grid and the attribute buffer and sequences the
//! passes that fill it.

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use crate::geometry::Cell;
use crate::grid::{CellGrid, GridError, VisitMarker};
use crate::traversal::{Traversal, TraversalError};

use super::channel::ChannelPass;
use super::morphology::MorphologyPass;
use super::{BasinConfig, BasinSummary, FirstOrderCell, GeoCell};

/// Where a [`BasinModel`] is in its lifecycle. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasinPhase {
    /// Configuration validated, grid not yet carved.
    Uninitialized,
    GridBuilt,
    /// Order, area, exit and slope are known.
    MorphologyComputed,
    /// Elevations and channel lengths are known.
    ChannelComputed,
    /// Summary computed; the model is read-only.
    Ready,
}

impl BasinPhase {
    /// Returns the name of the phase.
    pub fn name(&self) -> &'static str {
        match self {
            BasinPhase::Uninitialized => "uninitialized",
            BasinPhase::GridBuilt => "grid-built",
            BasinPhase::MorphologyComputed => "morphology-computed",
            BasinPhase::ChannelComputed => "channel-computed",
            BasinPhase::Ready => "ready",
        }
    }

    /// Name of the step that leaves this phase, or `None` once ready.
    pub fn next_step(&self) -> Option<&'static str> {
        match self {
            BasinPhase::Uninitialized => Some("maze"),
            BasinPhase::GridBuilt => Some("morphology"),
            BasinPhase::MorphologyComputed => Some("channels"),
            BasinPhase::ChannelComputed => Some("summary"),
            BasinPhase::Ready => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for BasinPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while constructing or running a basin.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BasinError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    #[error("Invalid basin phase: expected '{expected}', found '{found}'")]
    InvalidState { expected: BasinPhase, found: BasinPhase },
    #[error("Invalid slope law: qnumer={qnumer}, qexpon={qexpon}, qintcp={qintcp}")]
    InvalidSlopeLaw { qnumer: f32, qexpon: f32, qintcp: f32 },
    #[error("Invalid elevation scale: {0} (must be finite and non-negative)")]
    InvalidElevationScale(f32),
}

const STEP_COUNT: usize = 4;

/// A synthetic drainage basin.
///
/// The grid is carved once, then two walks over it fill the per-cell
/// attributes: the morphology pass needs whole subtrees (areas, orders) and
/// the channel pass needs the slopes that pass produced.
#[derive(Debug, Clone)]
pub struct BasinModel {
    config: BasinConfig,
    phase: BasinPhase,
    grid: CellGrid,
    cells: Vec<GeoCell>,
    first_order: Vec<FirstOrderCell>,
    summary: Option<BasinSummary>,
}

impl BasinModel {
    /// Validates `config` and allocates an unbuilt basin.
    pub fn new(config: BasinConfig) -> Result<Self, BasinError> {
        config.validate()?;
        let grid = CellGrid::new(config.rows, config.cols, config.seed_row, config.seed_col)?;
        let cells = vec![GeoCell::default(); grid.len()];

        Ok(Self {
            config,
            phase: BasinPhase::Uninitialized,
            grid,
            cells,
            first_order: Vec::new(),
            summary: None,
        })
    }

    /// Creates a basin and runs every phase.
    pub fn construct(config: BasinConfig) -> Result<Self, BasinError> {
        let mut model = Self::new(config)?;
        model.run()?;
        Ok(model)
    }

    fn require(&self, expected: BasinPhase) -> Result<(), BasinError> {
        if self.phase != expected {
            return Err(BasinError::InvalidState {
                expected,
                found: self.phase,
            });
        }
        Ok(())
    }

    /// Carves the maze with a `ChaCha8Rng` seeded from the configuration.
    pub fn build_grid(&mut self) -> Result<(), BasinError> {
        self.require(BasinPhase::Uninitialized)?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.rng_seed);
        let max_frontier = self.grid.build(&mut rng)?;
        debug!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            rng_seed = self.config.rng_seed,
            max_frontier,
            "basin grid built"
        );

        self.phase = BasinPhase::GridBuilt;
        Ok(())
    }

    /// Full walk with retrace; fills order, area, exit and slope.
    pub fn compute_morphology(&mut self) -> Result<(), BasinError> {
        self.require(BasinPhase::GridBuilt)?;

        let cols = self.grid.cols();
        let pass = MorphologyPass::new(&mut self.cells, cols, &self.config);
        let mut walk = Traversal::new(&mut self.grid, VisitMarker::PRIMARY, false, pass)?;
        let outcome = walk.find_solution(None)?;
        let leaves = walk.handler().leaves();
        drop(walk);

        let outlet = self.outlet();
        debug_assert_eq!(outlet.area as usize, self.grid.len());
        debug!(?outcome, leaves, outlet_area = outlet.area, outlet_order = ?outlet.order, "morphology pass done");

        self.phase = BasinPhase::MorphologyComputed;
        Ok(())
    }

    /// Single-hit walk; fills elevation and first-order channel lengths.
    pub fn compute_channels(&mut self) -> Result<(), BasinError> {
        self.require(BasinPhase::MorphologyComputed)?;

        let cols = self.grid.cols();
        let seed = self.grid.seed();
        let pass = ChannelPass::new(&mut self.cells, cols, seed);
        let mut walk = Traversal::new(&mut self.grid, VisitMarker::SECONDARY, true, pass)?;
        let outcome = walk.find_solution(None)?;
        self.first_order = walk.into_handler().into_first_order();

        debug!(?outcome, first_order = self.first_order.len(), "channel pass done");

        self.phase = BasinPhase::ChannelComputed;
        Ok(())
    }

    /// Computes the summary and freezes the model.
    pub fn finalize(&mut self) -> Result<(), BasinError> {
        self.require(BasinPhase::ChannelComputed)?;

        let summary = BasinSummary::compute(&self.cells, &self.outlet(), &self.first_order);
        debug!(max_order = summary.max_order, relief = summary.max_elevation, "basin ready");
        self.summary = Some(summary);

        self.phase = BasinPhase::Ready;
        Ok(())
    }

    fn advance(&mut self) -> Result<(), BasinError> {
        match self.phase {
            BasinPhase::Uninitialized => self.build_grid(),
            BasinPhase::GridBuilt => self.compute_morphology(),
            BasinPhase::MorphologyComputed => self.compute_channels(),
            BasinPhase::ChannelComputed => self.finalize(),
            BasinPhase::Ready => Err(BasinError::InvalidState {
                expected: BasinPhase::ChannelComputed,
                found: BasinPhase::Ready,
            }),
        }
    }

    /// Runs every remaining phase.
    pub fn run(&mut self) -> Result<(), BasinError> {
        self.run_with_callbacks(|_, _, _| {}, |_, _, _| {})
    }

    /// Runs every remaining phase with progress callbacks.
    ///
    /// # Arguments
    /// * `on_step_start` - Called with (step_name, step_index, total_steps)
    /// * `on_step_complete` - Called with (step_name, step_index, total_steps)
    pub fn run_with_callbacks<F1, F2>(
        &mut self,
        mut on_step_start: F1,
        mut on_step_complete: F2,
    ) -> Result<(), BasinError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        while let Some(name) = self.phase.next_step() {
            let i = self.phase.index();
            on_step_start(name, i, STEP_COUNT);
            self.advance()?;
            on_step_complete(name, i, STEP_COUNT);
        }
        Ok(())
    }

    pub fn phase(&self) -> BasinPhase {
        self.phase
    }

    pub fn config(&self) -> &BasinConfig {
        &self.config
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Attribute buffer in row-major order.
    pub fn cells(&self) -> &[GeoCell] {
        &self.cells
    }

    /// Attributes of `cell`, or `None` if it is outside the grid.
    pub fn cell(&self, cell: Cell) -> Option<&GeoCell> {
        if !self.grid.contains(cell) {
            return None;
        }
        self.cells.get(self.grid.index(cell))
    }

    fn outlet(&self) -> GeoCell {
        self.cells[self.grid.index(self.grid.seed())]
    }

    /// Channel heads in the order the channel pass found them.
    pub fn first_order(&self) -> &[FirstOrderCell] {
        &self.first_order
    }

    /// Available once the model is [`BasinPhase::Ready`].
    pub fn summary(&self) -> Option<&BasinSummary> {
        self.summary.as_ref()
    }
}
