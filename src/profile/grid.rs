//! Altitude discretization.

use log::debug;

use crate::error::InvalidParameter;

/// Largest distance, as a fraction of the grid step, between a value and a
/// grid level for the value to count as lying on that level.
const LEVEL_TOLERANCE: f64 = 1e-6;

/// Most levels a grid may hold.
pub const MAX_LEVELS: usize = 1 << 26;

/// Uniformly spaced altitude levels in km, from `start` (inclusive) up to
/// `end` (exclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeGrid {
    start: f64,
    step: f64,
    end: f64,
    /// Highest altitude drawn by the plotting collaborator.
    display_top: f64,
    levels: Vec<f64>,
}

impl AltitudeGrid {
    /// Build the levels `z1, z1 + dz, z1 + 2 dz, ...` strictly below `z2`.
    ///
    /// `top` is the display cutoff. It is only checked against `z2` here; it
    /// has to land on a level for [`AltitudeGrid::index_of`] to find it.
    ///
    /// The checks run in this order:
    ///
    /// - `dz` must be in `(0, (z2 - z1) / 2]` and yield at most
    ///   [`MAX_LEVELS`] levels
    /// - `z1` must be finite and non-negative
    /// - `z2` must be finite, non-negative and above `z1`
    /// - `top` must not exceed `z2`
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn new(z1: f64, dz: f64, z2: f64, top: f64) -> Result<Self, InvalidParameter> {
        // Written as negated positive conditions so that NaN is rejected too.
        // An infinite range gives an infinite level count and fails here.
        let level_count = (z2 - z1) / dz;
        if !(dz > 0. && dz <= 0.5 * (z2 - z1) && level_count <= MAX_LEVELS as f64) {
            return Err(InvalidParameter::StepSize);
        }
        if !(z1 >= 0. && z1.is_finite()) {
            return Err(InvalidParameter::NegativeLowerBound);
        }
        if !(z2 >= 0. && z2 > z1 && z2.is_finite()) {
            return Err(InvalidParameter::UpperBound);
        }
        if !(top <= z2) {
            return Err(InvalidParameter::DisplayCutoffAboveTop);
        }

        // Each level is computed from its index rather than accumulated, so
        // the rounding error doesn't grow with altitude
        let num_levels = level_count.ceil() as usize;
        let levels: Vec<f64> = (0..num_levels).map(|i| z1 + i as f64 * dz).collect();
        debug!("altitude grid from {z1} km to {z2} km by {dz} km: {num_levels} levels");

        Ok(Self {
            start: z1,
            step: dz,
            end: z2,
            display_top: top,
            levels,
        })
    }

    /// Altitude of every level, in km.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`: a valid step yields at least two levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Spacing between adjacent levels, in km.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Upper bound the levels stay strictly below, in km.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Display cutoff altitude, in km.
    pub fn display_top(&self) -> f64 {
        self.display_top
    }

    /// Lowest level.
    pub fn first(&self) -> f64 {
        self.start
    }

    /// Highest level.
    pub fn last(&self) -> f64 {
        self.levels[self.levels.len() - 1]
    }

    /// Find the index of the level at `altitude`.
    ///
    /// The index is found by rounding `(altitude - z1) / dz`, and the result
    /// is only accepted when `altitude` is within a small fraction of a step
    /// of that level. Values between levels are never snapped to the nearest
    /// one.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn index_of(&self, altitude: f64) -> Option<usize> {
        let offset = (altitude - self.start) / self.step;
        let nearest = offset.round();
        if !((offset - nearest).abs() <= LEVEL_TOLERANCE) || nearest < 0. {
            return None;
        }

        let index = nearest as usize;
        (index < self.levels.len()).then_some(index)
    }
}
