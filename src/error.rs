//! Error types shared by every stage.

/// Possible profile errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A scalar input violates one of its preconditions
    InvalidParameter(InvalidParameter),
    /// A computed transmittance fell outside [0, 1]
    PhysicalInconsistency,
}

/// The precondition that an input failed.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidParameter {
    /// The grid step is not in `(0, (z2 - z1) / 2]`
    StepSize,
    /// The grid starts below zero
    NegativeLowerBound,
    /// The grid top is negative, infinite, or not above the grid bottom.
    ///
    /// The step check runs first and a valid step already implies
    /// `z2 > z1`, so in practice a bad upper bound is reported as
    /// [`InvalidParameter::StepSize`].
    UpperBound,
    /// The display cutoff lies above the grid top
    DisplayCutoffAboveTop,
    /// The display cutoff is not a level of the grid
    DisplayCutoffOffGrid,
    /// The scale height is not positive
    ScaleHeight,
    /// The cloud base lies below the first grid level
    CloudBaseBelowAtmosphere,
    /// The cloud top lies above the last grid level
    CloudTopAboveAtmosphere,
    /// The cloud top is not above the cloud base
    CloudOrder,
    /// The cloud base is not a level of the grid
    CloudBaseOffGrid,
    /// The cloud top is not a level of the grid
    CloudTopOffGrid,
    /// A profile was built on a different grid than the one it's used with
    InconsistentLengths,
    /// A configuration value is present but isn't a number
    MalformedValue {
        /// Configuration key holding the bad value
        key: &'static str,
    },
}

impl ProfileError {
    /// Whether this error is a rejected input rather than a numerical defect.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ProfileError::InvalidParameter(_))
    }
}

impl From<InvalidParameter> for ProfileError {
    fn from(e: InvalidParameter) -> Self {
        ProfileError::InvalidParameter(e)
    }
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::InvalidParameter(e) => write!(f, "invalid parameter: {e}"),
            ProfileError::PhysicalInconsistency => write!(f, "transmittance out of range"),
        }
    }
}

impl std::fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidParameter::StepSize => write!(f, "step size invalid"),
            InvalidParameter::NegativeLowerBound => {
                write!(f, "lower bound must be non-negative")
            }
            InvalidParameter::UpperBound => write!(f, "upper bound must exceed lower bound"),
            InvalidParameter::DisplayCutoffAboveTop => {
                write!(f, "display cutoff exceeds atmosphere top")
            }
            InvalidParameter::DisplayCutoffOffGrid => write!(f, "display cutoff not on grid"),
            InvalidParameter::ScaleHeight => write!(f, "scale height must be positive"),
            InvalidParameter::CloudBaseBelowAtmosphere => write!(f, "cloud base below atmosphere"),
            InvalidParameter::CloudTopAboveAtmosphere => write!(f, "cloud top above atmosphere"),
            InvalidParameter::CloudOrder => write!(f, "cloud top must exceed cloud base"),
            InvalidParameter::CloudBaseOffGrid => write!(f, "cloud base not on grid"),
            InvalidParameter::CloudTopOffGrid => write!(f, "cloud top not on grid"),
            InvalidParameter::InconsistentLengths => {
                write!(f, "profile length does not match altitude grid")
            }
            InvalidParameter::MalformedValue { key } => {
                write!(f, "configuration value for `{key}` is not a number")
            }
        }
    }
}

impl std::error::Error for ProfileError {}
impl std::error::Error for InvalidParameter {}
