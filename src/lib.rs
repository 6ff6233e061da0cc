//! Weighting functions and transmittances in clear air and in the presence of
//! an absorbing cloud layer.
//!
//! The computation lives in [`profile`] and takes its scalar inputs from a
//! [`ProfileConfig`]. Plotting and writing the tables to disk are left to the
//! caller; with the `python` feature the results are exposed to Python as
//! numpy arrays.

pub mod config;
pub mod error;
pub mod profile;

#[cfg(feature = "python")]
mod python;

pub use config::ProfileConfig;
pub use error::{InvalidParameter, ProfileError};
pub use profile::{compute_profiles, Profiles, SkyCondition, TABLE_HEADER};
