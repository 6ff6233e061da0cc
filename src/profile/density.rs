//! Exponential density profile.

use log::debug;

use super::grid::AltitudeGrid;
use crate::error::InvalidParameter;

/// Scaled exponential density at each level of an [`AltitudeGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    values: Vec<f64>,
}

impl DensityProfile {
    /// Density at every level, lowest altitude first.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no levels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Compute the normalized density profile for a scale height `h` in km.
///
/// Every level gets `exp(-z / h)` times the single factor
/// `h * (1 - exp(-z_last / h))`, where `z_last` is the highest level. The
/// factor is a fixed scale, not a normalization to unit integral.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn normalized_density(
    grid: &AltitudeGrid,
    h: f64,
) -> Result<DensityProfile, InvalidParameter> {
    if !(h > 0.) {
        return Err(InvalidParameter::ScaleHeight);
    }

    let norm = h * (1. - f64::exp(-grid.last() / h));
    let values: Vec<f64> = grid.levels().iter().map(|z| f64::exp(-z / h) * norm).collect();
    debug!("density profile with scale height {h} km, normalization factor {norm}");

    Ok(DensityProfile { values })
}
