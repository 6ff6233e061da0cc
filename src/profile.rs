//! Transmittance and weighting function profiles for a plane-parallel
//! atmosphere with one absorbing (non-scattering) cloud layer.
//!
//! The stages run in order, each consuming the previous stage's output:
//! altitude grid, density, optical depth, transmittance, weighting function.

mod density;
mod grid;
mod optical_depth;
mod transmittance;
mod weighting;


pub use self::density::{normalized_density, DensityProfile};
pub use self::grid::{AltitudeGrid, MAX_LEVELS};
pub use self::optical_depth::{optical_depth, OpticalDepthPair};
pub use self::transmittance::{transmittances, TransmittancePair};
pub use self::weighting::{weighting_function, WeightingFunctionPair};

use log::info;
use ndarray::Array2;

use crate::config::ProfileConfig;
use crate::error::{InvalidParameter, ProfileError};

/// Header row of the exported tables.
pub const TABLE_HEADER: &str = "Height[km]  Transmittance  Weighting_Function";

/// Whether the cloud layer is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyCondition {
    /// Gas absorption only
    Clear,
    /// Gas absorption plus the cloud layer
    Cloudy,
}

impl SkyCondition {
    /// File name, without extension, of the exported table.
    pub fn file_stem(self) -> &'static str {
        match self {
            SkyCondition::Clear => "Clear_Sky",
            SkyCondition::Cloudy => "Cloudy_Sky",
        }
    }
}

/// Outputs of every stage for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Profiles {
    grid: AltitudeGrid,
    density: DensityProfile,
    optical_depth: OpticalDepthPair,
    transmittance: TransmittancePair,
    weighting: WeightingFunctionPair,
    /// Index of the display cutoff on the grid.
    display_index: usize,
}

/// Run the whole pipeline for one configuration.
///
/// Nothing is returned unless every stage succeeds, including finding the
/// display cutoff (`top_level`) on the grid.
pub fn compute_profiles(config: &ProfileConfig) -> Result<Profiles, ProfileError> {
    let grid = AltitudeGrid::new(
        config.z_begin,
        config.z_step,
        config.z_end,
        config.top_level,
    )?;
    let density = normalized_density(&grid, config.vertical_height_scale)?;
    let optical_depth = optical_depth(
        &grid,
        config.bottom_cloud,
        config.top_cloud,
        config.cross_section_abs_gas,
        config.abs_coeff_cloud,
        &density,
    )?;
    let transmittance = transmittances(&optical_depth)?;
    let weighting = weighting_function(&transmittance, &grid)?;

    let display_index = grid
        .index_of(grid.display_top())
        .ok_or(InvalidParameter::DisplayCutoffOffGrid)?;

    info!(
        "Computed profiles on {} levels, cloud from {} to {} km, display up to {} km",
        grid.len(),
        config.bottom_cloud,
        config.top_cloud,
        grid.display_top()
    );

    Ok(Profiles {
        grid,
        density,
        optical_depth,
        transmittance,
        weighting,
        display_index,
    })
}

impl Profiles {
    /// Altitude grid.
    pub fn grid(&self) -> &AltitudeGrid {
        &self.grid
    }

    /// Density at each level.
    pub fn density(&self) -> &DensityProfile {
        &self.density
    }

    /// Molecular and total per-layer optical depth.
    pub fn optical_depth(&self) -> &OpticalDepthPair {
        &self.optical_depth
    }

    /// Clear and cloudy sky transmittance.
    pub fn transmittance(&self) -> &TransmittancePair {
        &self.transmittance
    }

    /// Clear and cloudy sky weighting functions.
    pub fn weighting(&self) -> &WeightingFunctionPair {
        &self.weighting
    }

    /// Index of the display cutoff altitude on the grid.
    pub fn display_index(&self) -> usize {
        self.display_index
    }

    /// Number of leading levels that are plotted, up to and including the
    /// display cutoff.
    pub fn display_len(&self) -> usize {
        self.display_index + 1
    }

    /// Export table for one sky condition.
    ///
    /// The shape is (`num_levels`, 3) and the columns are, in order, height,
    /// transmittance, and weighting function; see [`TABLE_HEADER`].
    pub fn table(&self, sky: SkyCondition) -> Array2<f64> {
        let (transmittance, weighting) = match sky {
            SkyCondition::Clear => (&self.transmittance.clear, &self.weighting.clear),
            SkyCondition::Cloudy => (&self.transmittance.cloudy, &self.weighting.cloudy),
        };
        let columns: [&[f64]; 3] = [self.grid.levels(), transmittance, weighting];

        Array2::from_shape_fn((self.grid.len(), columns.len()), |(level, column)| {
            columns[column][level]
        })
    }
}
