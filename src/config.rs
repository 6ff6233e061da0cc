//! Scalar run parameters and their fallbacks.

use log::debug;

use crate::error::InvalidParameter;

/// Every scalar parameter of a profile run.
///
/// Altitudes are in km. Values missing from the configuration source fall
/// back to the values of [`ProfileConfig::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfig {
    /// Cloud base altitude.
    pub bottom_cloud: f64,
    /// Cloud top altitude.
    pub top_cloud: f64,
    /// Absorption cross section per unit mass of the gas.
    pub cross_section_abs_gas: f64,
    /// Absorption coefficient of the cloud layer, in 1/km.
    pub abs_coeff_cloud: f64,
    /// Highest altitude drawn in the plots.
    pub top_level: f64,
    /// Scale height of the exponential density profile.
    pub vertical_height_scale: f64,
    /// Lowest altitude of the grid.
    pub z_begin: f64,
    /// Altitude the grid stays strictly below.
    pub z_end: f64,
    /// Grid step.
    pub z_step: f64,
    /// Directory the export collaborator writes figures and tables into.
    pub output_path: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            bottom_cloud: 1.,
            top_cloud: 2.,
            cross_section_abs_gas: 0.2,
            abs_coeff_cloud: 5.,
            top_level: 20.,
            vertical_height_scale: 7.,
            // Local thermodynamic equilibrium holds between the surface and
            // 50 km
            z_begin: 0.,
            z_end: 50.,
            z_step: 0.005,
            output_path: String::from("./OUTPUT/"),
        }
    }
}

/// Key of the export directory, kept apart from the scalar parameters in the
/// `[Output_Path]` section of `Configuration.ini`.
pub const OUTPUT_PATH_KEY: &str = "output_graph";

impl ProfileConfig {
    /// Read every parameter through `lookup`.
    ///
    /// `lookup` is called with the lowercase key (`bottom_cloud`,
    /// `z_step`, `output_graph`, ...) and returns the raw value, if present.
    /// Missing keys fall back to the default; a value that is present but
    /// doesn't parse as a number is an error.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, InvalidParameter>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::read_scalars(&mut lookup)?;
        if let Some(output_path) = lookup(OUTPUT_PATH_KEY) {
            config.output_path = output_path;
        }
        Ok(config)
    }

    /// Like [`ProfileConfig::from_lookup`], but with the scalar parameters
    /// and the export directory in separate stores, as in the two sections
    /// of `Configuration.ini`.
    pub fn from_sections<F, G>(mut general: F, mut output: G) -> Result<Self, InvalidParameter>
    where
        F: FnMut(&str) -> Option<String>,
        G: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::read_scalars(&mut general)?;
        if let Some(output_path) = output(OUTPUT_PATH_KEY) {
            config.output_path = output_path;
        }
        Ok(config)
    }

    fn read_scalars<F>(lookup: &mut F) -> Result<Self, InvalidParameter>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut number = |key: &'static str, fallback: f64| -> Result<f64, InvalidParameter> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| InvalidParameter::MalformedValue { key }),
                None => {
                    debug!("`{key}` not configured, using {fallback}");
                    Ok(fallback)
                }
            }
        };

        Ok(Self {
            bottom_cloud: number("bottom_cloud", defaults.bottom_cloud)?,
            top_cloud: number("top_cloud", defaults.top_cloud)?,
            cross_section_abs_gas: number(
                "cross_section_abs_gas",
                defaults.cross_section_abs_gas,
            )?,
            abs_coeff_cloud: number("abs_coeff_cloud", defaults.abs_coeff_cloud)?,
            top_level: number("top_level", defaults.top_level)?,
            vertical_height_scale: number(
                "vertical_height_scale",
                defaults.vertical_height_scale,
            )?,
            z_begin: number("z_begin", defaults.z_begin)?,
            z_end: number("z_end", defaults.z_end)?,
            z_step: number("z_step", defaults.z_step)?,
            output_path: defaults.output_path,
        })
    }
}
