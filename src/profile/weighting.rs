//! Weighting functions.

use super::{grid::AltitudeGrid, transmittance::TransmittancePair};
use crate::error::InvalidParameter;

/// Derivative of the transmittance with respect to altitude, in 1/km.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingFunctionPair {
    /// Clear sky.
    pub clear: Vec<f64>,
    /// Cloudy sky.
    pub cloudy: Vec<f64>,
}

/// Backward first difference of each transmittance divided by the grid step.
///
/// Index 0 has no level below it and stays at zero.
pub fn weighting_function(
    transmittance: &TransmittancePair,
    grid: &AltitudeGrid,
) -> Result<WeightingFunctionPair, InvalidParameter> {
    let num_levels = grid.len();
    if transmittance.clear.len() != num_levels || transmittance.cloudy.len() != num_levels {
        return Err(InvalidParameter::InconsistentLengths);
    }

    let dz = grid.step();
    let difference = |t: &[f64]| -> Vec<f64> {
        std::iter::once(0.)
            .chain(t.windows(2).map(|pair| (pair[1] - pair[0]) / dz))
            .collect()
    };

    Ok(WeightingFunctionPair {
        clear: difference(&transmittance.clear),
        cloudy: difference(&transmittance.cloudy),
    })
}
