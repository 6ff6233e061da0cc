//! Python interface.
//!
//! NOTE: only the conversion between Python and Rust happens here. The
//! computation is in [`crate::profile`], which does not use `pyo3`.

use log::debug;
use numpy::{PyArray1, PyArray2, ToPyArray};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::ProfileConfig;
use crate::error::{InvalidParameter, ProfileError};
use crate::profile::{self, Profiles, SkyCondition};

impl From<ProfileError> for PyErr {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::InvalidParameter(_) => PyValueError::new_err(e.to_string()),
            ProfileError::PhysicalInconsistency => PyValueError::new_err(e.to_string()),
        }
    }
}

impl From<InvalidParameter> for PyErr {
    fn from(e: InvalidParameter) -> Self {
        ProfileError::from(e).into()
    }
}

/// Fetch `key` from a Python mapping as a string, or `None` if it's missing.
fn get_value(mapping: &Bound<'_, PyAny>, key: &str) -> PyResult<Option<String>> {
    let value = mapping.call_method1("get", (key,))?;
    if value.is_none() {
        Ok(None)
    } else if let Ok(number) = value.extract::<f64>() {
        Ok(Some(number.to_string()))
    } else {
        value.extract::<String>().map(Some)
    }
}

/// Turn a failed lookup into a missing value, remembering the first error.
fn keep_first_error(
    value: PyResult<Option<String>>,
    error: &mut Option<PyErr>,
) -> Option<String> {
    value.unwrap_or_else(|e| {
        error.get_or_insert(e);
        None
    })
}

/// Scalar parameters of a run.
///
/// Every keyword argument defaults to the fallback used when the
/// configuration file doesn't set it.
#[pyclass(name = "ProfileConfig")]
#[derive(Debug, Clone)]
struct PyProfileConfig {
    inner: ProfileConfig,
}

#[pymethods]
impl PyProfileConfig {
    #[new]
    #[pyo3(signature = (bottom_cloud=1.0, top_cloud=2.0, cross_section_abs_gas=0.2, abs_coeff_cloud=5.0, top_level=20.0, vertical_height_scale=7.0, z_begin=0.0, z_end=50.0, z_step=0.005, output_path=String::from("./OUTPUT/")))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        bottom_cloud: f64,
        top_cloud: f64,
        cross_section_abs_gas: f64,
        abs_coeff_cloud: f64,
        top_level: f64,
        vertical_height_scale: f64,
        z_begin: f64,
        z_end: f64,
        z_step: f64,
        output_path: String,
    ) -> Self {
        Self {
            inner: ProfileConfig {
                bottom_cloud,
                top_cloud,
                cross_section_abs_gas,
                abs_coeff_cloud,
                top_level,
                vertical_height_scale,
                z_begin,
                z_end,
                z_step,
                output_path,
            },
        }
    }

    /// Read the parameters from a mapping with a `.get(key)` method, such as
    /// a `dict` or a `configparser` section. Values may be numbers or
    /// strings; missing keys fall back to their defaults.
    ///
    /// `output_graph` is read from `output_section` when given (the
    /// `[Output_Path]` section of `Configuration.ini`), otherwise from
    /// `section`.
    #[staticmethod]
    #[pyo3(signature = (section, output_section=None))]
    fn from_section(
        section: &Bound<'_, PyAny>,
        output_section: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Self> {
        let mut general_error = None;
        let mut output_error = None;
        let general = |key: &str| keep_first_error(get_value(section, key), &mut general_error);
        let inner = match output_section {
            Some(output) => ProfileConfig::from_sections(general, |key: &str| {
                keep_first_error(get_value(output, key), &mut output_error)
            }),
            None => ProfileConfig::from_lookup(general),
        };
        if let Some(e) = general_error.or(output_error) {
            return Err(e);
        }
        Ok(Self { inner: inner? })
    }

    #[getter]
    fn bottom_cloud(&self) -> f64 {
        self.inner.bottom_cloud
    }

    #[getter]
    fn top_cloud(&self) -> f64 {
        self.inner.top_cloud
    }

    #[getter]
    fn cross_section_abs_gas(&self) -> f64 {
        self.inner.cross_section_abs_gas
    }

    #[getter]
    fn abs_coeff_cloud(&self) -> f64 {
        self.inner.abs_coeff_cloud
    }

    #[getter]
    fn top_level(&self) -> f64 {
        self.inner.top_level
    }

    #[getter]
    fn vertical_height_scale(&self) -> f64 {
        self.inner.vertical_height_scale
    }

    #[getter]
    fn z_begin(&self) -> f64 {
        self.inner.z_begin
    }

    #[getter]
    fn z_end(&self) -> f64 {
        self.inner.z_end
    }

    #[getter]
    fn z_step(&self) -> f64 {
        self.inner.z_step
    }

    #[getter]
    fn output_path(&self) -> &str {
        &self.inner.output_path
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.inner)
    }
}

/// Atmospheric profiles.
///
/// This is just a container of numpy arrays, each dimensioned as
/// (`num_levels`, ), plus the export tables.
#[pyclass]
#[derive(Debug)]
struct AtmoProfiles {
    profiles: Profiles,
}

/// Implement all the "getters" for the Python properties
#[pymethods]
impl AtmoProfiles {
    #[classattr]
    const TABLE_HEADER: &'static str = profile::TABLE_HEADER;

    #[getter]
    fn height<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.grid().levels().to_pyarray(py)
    }

    #[getter]
    fn density<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.density().values().to_pyarray(py)
    }

    #[getter]
    fn molecular_optical_depth<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.optical_depth().molecular.to_pyarray(py)
    }

    #[getter]
    fn total_optical_depth<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.optical_depth().total.to_pyarray(py)
    }

    #[getter]
    fn clear_transmittance<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.transmittance().clear.to_pyarray(py)
    }

    #[getter]
    fn cloudy_transmittance<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.transmittance().cloudy.to_pyarray(py)
    }

    #[getter]
    fn clear_weighting<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.weighting().clear.to_pyarray(py)
    }

    #[getter]
    fn cloudy_weighting<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.profiles.weighting().cloudy.to_pyarray(py)
    }

    /// Index of the display cutoff on the grid.
    #[getter]
    fn display_index(&self) -> usize {
        self.profiles.display_index()
    }

    /// Columns height, transmittance, weighting function for clear sky.
    fn clear_sky_table<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.profiles.table(SkyCondition::Clear).to_pyarray(py)
    }

    /// Columns height, transmittance, weighting function for cloudy sky.
    fn cloudy_sky_table<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.profiles.table(SkyCondition::Cloudy).to_pyarray(py)
    }
}

/// Compute the density, optical depth, transmittance, and weighting function
/// profiles for a configuration.
///
/// Raises `ValueError` if any parameter is out of range or a cloud boundary
/// or the display cutoff isn't on the altitude grid.
#[pyfunction]
fn compute_profiles(config: &PyProfileConfig) -> PyResult<AtmoProfiles> {
    debug!("computing profiles for {:?}", config.inner);
    let profiles = profile::compute_profiles(&config.inner)?;
    Ok(AtmoProfiles { profiles })
}

/// A Python module implemented in Rust.
#[pymodule]
fn wft_profile(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_function(wrap_pyfunction!(compute_profiles, m)?)?;
    m.add_class::<PyProfileConfig>()?;
    m.add_class::<AtmoProfiles>()?;
    Ok(())
}
