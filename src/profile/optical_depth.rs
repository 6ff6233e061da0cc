//! Per-layer optical depth, with and without the cloud.

use log::debug;

use super::{density::DensityProfile, grid::AltitudeGrid};
use crate::error::InvalidParameter;

/// Per-layer optical depth at each level of an [`AltitudeGrid`].
///
/// Entry `j` is the optical depth of the layer between levels `j` and `j+1`.
/// These are increments, not cumulative sums. The last entry is always zero
/// since there is no layer above the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalDepthPair {
    /// Gas absorption only.
    pub molecular: Vec<f64>,
    /// Gas absorption plus the cloud layer.
    pub total: Vec<f64>,
    /// Index of the cloud base on the grid.
    pub cloud_base_index: usize,
    /// Index of the cloud top on the grid.
    pub cloud_top_index: usize,
}

/// Compute the molecular and total optical depth.
///
/// `cloud_base` and `cloud_top` are altitudes in km and must both be grid
/// levels. `gas_cross_section` is the absorption cross section per unit mass
/// of the gas, and `cloud_absorption` is the absorption coefficient of the
/// cloud layer in 1/km.
///
/// The cloud adds `cloud_absorption * dz` only to the layers *strictly*
/// between the base and top indices; the layers at the two endpoints carry
/// gas absorption alone.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn optical_depth(
    grid: &AltitudeGrid,
    cloud_base: f64,
    cloud_top: f64,
    gas_cross_section: f64,
    cloud_absorption: f64,
    density: &DensityProfile,
) -> Result<OpticalDepthPair, InvalidParameter> {
    if density.len() != grid.len() {
        return Err(InvalidParameter::InconsistentLengths);
    }
    if !(cloud_base >= grid.first()) {
        return Err(InvalidParameter::CloudBaseBelowAtmosphere);
    }
    if !(cloud_top <= grid.last()) {
        return Err(InvalidParameter::CloudTopAboveAtmosphere);
    }
    if !(cloud_base < cloud_top) {
        return Err(InvalidParameter::CloudOrder);
    }
    let cloud_base_index = grid
        .index_of(cloud_base)
        .ok_or(InvalidParameter::CloudBaseOffGrid)?;
    let cloud_top_index = grid
        .index_of(cloud_top)
        .ok_or(InvalidParameter::CloudTopOffGrid)?;
    // Two altitudes closer together than the level tolerance share a level
    if cloud_base_index >= cloud_top_index {
        return Err(InvalidParameter::CloudOrder);
    }

    let dz = grid.step();
    let rho = density.values();
    let num_levels = grid.len();

    // Walk down from the top of the atmosphere, averaging the density of the
    // two levels bounding each layer
    let mut molecular = vec![0.; num_levels];
    for j in (0..num_levels - 1).rev() {
        molecular[j] = gas_cross_section * 0.5 * (rho[j] + rho[j + 1]) * dz;
    }

    let mut total = molecular.clone();
    for tau in &mut total[cloud_base_index + 1..cloud_top_index] {
        *tau += cloud_absorption * dz;
    }
    debug!(
        "cloud between levels {cloud_base_index} and {cloud_top_index} ({cloud_base} to {cloud_top} km)"
    );

    Ok(OpticalDepthPair {
        molecular,
        total,
        cloud_base_index,
        cloud_top_index,
    })
}
