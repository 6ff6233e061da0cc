//! Transmittance to the top of the atmosphere.

use log::debug;

use super::optical_depth::OpticalDepthPair;
use crate::error::{InvalidParameter, ProfileError};

/// Transmittance from each level to the top of the atmosphere.
#[derive(Debug, Clone, PartialEq)]
pub struct TransmittancePair {
    /// Clear sky.
    pub clear: Vec<f64>,
    /// Cloudy sky.
    pub cloudy: Vec<f64>,
}

/// Compute the clear and cloudy sky transmittance.
///
/// Both start at exactly 1 at the top level. Going down one level multiplies
/// by the transmission of the layer in between, `exp(-tau)`.
///
/// Any value outside [0, 1] is a [`ProfileError::PhysicalInconsistency`];
/// that can only come from optical depths that aren't physical, such as a
/// negative absorption coefficient.
pub fn transmittances(optical_depth: &OpticalDepthPair) -> Result<TransmittancePair, ProfileError> {
    let OpticalDepthPair {
        molecular, total, ..
    } = optical_depth;
    if molecular.len() != total.len() {
        return Err(InvalidParameter::InconsistentLengths.into());
    }
    let num_levels = molecular.len();

    let mut clear = vec![1.; num_levels];
    let mut cloudy = vec![1.; num_levels];
    for i in (0..num_levels.saturating_sub(1)).rev() {
        clear[i] = clear[i + 1] * f64::exp(-molecular[i]);
        cloudy[i] = cloudy[i + 1] * f64::exp(-total[i]);
    }

    // NaN fails this check as well
    let in_range = |t: &f64| (0.0..=1.0).contains(t);
    if !clear.iter().chain(&cloudy).all(in_range) {
        return Err(ProfileError::PhysicalInconsistency);
    }

    if let (Some(clear_0), Some(cloudy_0)) = (clear.first(), cloudy.first()) {
        debug!("transmittance from the lowest level: clear {clear_0}, cloudy {cloudy_0}");
    }

    Ok(TransmittancePair { clear, cloudy })
}
