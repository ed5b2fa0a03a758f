//! Configuration for basin generation.

use serde::{Deserialize, Serialize};

use super::BasinError;

/// Power law mapping contributing area to channel slope:
/// `slope = qnumer / (area + qintcp)^qexpon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeLaw {
    /// Numerator; sets the slope of the smallest channels.
    pub qnumer: f32,
    /// Exponent applied to the shifted area.
    pub qexpon: f32,
    /// Offset added to the area before the exponent.
    pub qintcp: f32,
}

impl Default for SlopeLaw {
    fn default() -> Self {
        Self {
            qnumer: 1.0,
            qexpon: 0.1,
            qintcp: 2.0,
        }
    }
}

impl SlopeLaw {
    /// Unscaled channel slope for a cell draining `area` cells.
    pub fn slope(&self, area: u32) -> f32 {
        self.qnumer / (area as f32 + self.qintcp).powf(self.qexpon)
    }

    /// Rejects constants that would produce non-finite or negative slopes.
    ///
    /// Areas are at least 1, so `1 + qintcp > 0` keeps the base positive.
    pub fn validate(&self) -> Result<(), BasinError> {
        let finite = self.qnumer.is_finite() && self.qexpon.is_finite() && self.qintcp.is_finite();
        if !finite || self.qnumer < 0.0 || 1.0 + self.qintcp <= 0.0 {
            return Err(BasinError::InvalidSlopeLaw {
                qnumer: self.qnumer,
                qexpon: self.qexpon,
                qintcp: self.qintcp,
            });
        }
        Ok(())
    }
}

/// Parameters for one basin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasinConfig {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Row of the outlet cell.
    pub seed_row: usize,
    /// Column of the outlet cell.
    pub seed_col: usize,
    /// Random seed for the maze builder.
    pub rng_seed: u64,
    /// Area to slope relation.
    pub slope_law: SlopeLaw,
    /// Multiplier applied to every slope, in elevation units per cell.
    pub elevation_scale: f32,
}

impl Default for BasinConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            seed_row: 0,
            seed_col: 0,
            rng_seed: 42,
            slope_law: SlopeLaw::default(),
            elevation_scale: 4.0 / 16.0,
        }
    }
}

impl BasinConfig {
    /// Creates an `n x n` basin drained from the corner, with relief scaled
    /// so that total height stays comparable across grid sizes.
    pub fn square(n: usize, rng_seed: u64) -> Self {
        Self {
            rows: n,
            cols: n,
            rng_seed,
            elevation_scale: 4.0 / n.max(1) as f32,
            ..Default::default()
        }
    }

    /// Returns the same configuration with the outlet moved.
    pub fn with_seed_cell(mut self, row: usize, col: usize) -> Self {
        self.seed_row = row;
        self.seed_col = col;
        self
    }

    /// Scaled channel slope for a cell draining `area` cells.
    pub fn channel_slope(&self, area: u32) -> f32 {
        self.slope_law.slope(area) * self.elevation_scale
    }

    /// Checks the slope constants. Grid dimensions and the seed are checked
    /// when the grid is created.
    pub fn validate(&self) -> Result<(), BasinError> {
        self.slope_law.validate()?;
        if !self.elevation_scale.is_finite() || self.elevation_scale < 0.0 {
            return Err(BasinError::InvalidElevationScale(self.elevation_scale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BasinConfig::default();
        assert_eq!((config.rows, config.cols), (16, 16));
        assert_eq!((config.seed_row, config.seed_col), (0, 0));
        assert!((config.elevation_scale - 0.25).abs() < 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_square_config_scales_relief() {
        let config = BasinConfig::square(32, 7);
        assert_eq!((config.rows, config.cols), (32, 32));
        assert_eq!(config.rng_seed, 7);
        assert!((config.elevation_scale - 0.125).abs() < 1e-6);

        let moved = config.with_seed_cell(3, 4);
        assert_eq!((moved.seed_row, moved.seed_col), (3, 4));
    }

    #[test]
    fn test_slope_decreases_with_area() {
        let law = SlopeLaw::default();
        assert!((law.slope(1) - 1.0 / 3f32.powf(0.1)).abs() < 1e-6);
        let mut last = f32::INFINITY;
        for area in [1, 2, 5, 10, 100, 10_000] {
            let s = law.slope(area);
            assert!(s > 0.0 && s < last);
            last = s;
        }
    }

    #[test]
    fn test_invalid_slope_law_rejected() {
        let bad = [
            SlopeLaw { qnumer: -1.0, ..Default::default() },
            SlopeLaw { qintcp: -1.0, ..Default::default() },
            SlopeLaw { qintcp: -3.0, ..Default::default() },
            SlopeLaw { qexpon: f32::NAN, ..Default::default() },
            SlopeLaw { qnumer: f32::INFINITY, ..Default::default() },
        ];
        for law in bad {
            assert!(matches!(law.validate(), Err(BasinError::InvalidSlopeLaw { .. })), "{:?}", law);
        }

        // Zero slopes and a small negative intercept are still well defined.
        assert!(SlopeLaw { qnumer: 0.0, ..Default::default() }.validate().is_ok());
        assert!(SlopeLaw { qintcp: -0.5, ..Default::default() }.validate().is_ok());
    }

    #[test]
    fn test_invalid_elevation_scale_rejected() {
        for scale in [-0.1, f32::NAN, f32::INFINITY] {
            let config = BasinConfig { elevation_scale: scale, ..Default::default() };
            assert!(matches!(config.validate(), Err(BasinError::InvalidElevationScale(_))));
        }
        let flat = BasinConfig { elevation_scale: 0.0, ..Default::default() };
        assert!(flat.validate().is_ok());
    }
}
