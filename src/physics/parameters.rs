//! Model parameters
//!
//! Immutable scalar configuration of a diffusion run. Defaults reproduce the
//! reference experiment: a 300-unit domain, `dx = 0.5`, `D = 110`, a step from
//! 500 down to 0 at mid-domain, integrated over 5000 steps.

use std::fmt;

use crate::error::{DiffusionError, Result};

/// Default diffusivity `D`
pub const DEFAULT_DIFFUSIVITY: f64 = 110.0;

/// Default domain length `LX`
pub const DEFAULT_LENGTH: f64 = 300.0;

/// Default grid spacing `dx`
pub const DEFAULT_SPACING: f64 = 0.5;

/// Default number of time steps `nt`
pub const DEFAULT_TIME_STEPS: usize = 5000;

/// Default value held on the left of the step (and at `x = 0`)
pub const DEFAULT_LEFT_VALUE: f64 = 500.0;

/// Default value held on the right of the step (and at the last point)
pub const DEFAULT_RIGHT_VALUE: f64 = 0.0;

/// Scalar parameters of the diffusion model
///
/// Built with [`Default`] and adjusted with the `with_*` builder methods.
/// Nothing is checked while building; [`ModelParameters::validate`] runs the
/// legality checks and is called by the solver before any stepping.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::physics::ModelParameters;
///
/// let params = ModelParameters::default()
///     .with_diffusivity(55.0)
///     .with_time_steps(100);
///
/// assert!(params.validate().is_ok());
/// assert_eq!(params.time_steps, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    /// Diffusivity `D` (> 0)
    pub diffusivity: f64,

    /// Domain length `LX` (> 0)
    pub length: f64,

    /// Grid spacing `dx` (0 < dx < LX)
    pub spacing: f64,

    /// Number of time steps `nt`
    pub time_steps: usize,

    /// Value left of the step, `C_left`
    pub left_value: f64,

    /// Value right of the step, `C_right`
    pub right_value: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            diffusivity: DEFAULT_DIFFUSIVITY,
            length: DEFAULT_LENGTH,
            spacing: DEFAULT_SPACING,
            time_steps: DEFAULT_TIME_STEPS,
            left_value: DEFAULT_LEFT_VALUE,
            right_value: DEFAULT_RIGHT_VALUE,
        }
    }
}

impl ModelParameters {
    /// Builder pattern: set diffusivity
    pub fn with_diffusivity(mut self, diffusivity: f64) -> Self {
        self.diffusivity = diffusivity;
        self
    }

    /// Builder pattern: set domain length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Builder pattern: set grid spacing
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Builder pattern: set number of time steps
    pub fn with_time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = time_steps;
        self
    }

    /// Set the number of time steps from a signed count
    ///
    /// For callers whose step count comes from a signed source. A negative
    /// count is rejected with [`DiffusionError::InvalidParameter`].
    pub fn with_signed_time_steps(self, time_steps: i64) -> Result<Self> {
        let steps = usize::try_from(time_steps)
            .map_err(|_| DiffusionError::invalid("nt", time_steps, "step count must not be negative"))?;
        Ok(self.with_time_steps(steps))
    }

    /// Builder pattern: set both boundary values
    pub fn with_boundaries(mut self, left_value: f64, right_value: f64) -> Self {
        self.left_value = left_value;
        self.right_value = right_value;
        self
    }

    /// Midpoint of the domain, `LX / 2`
    pub fn midpoint(&self) -> f64 {
        self.length / 2.0
    }

    /// Check every legality constraint
    ///
    /// Returns the first violation found, in the order `D`, `LX`, `dx`,
    /// `C_left`, `C_right`.
    pub fn validate(&self) -> Result<()> {
        if !self.diffusivity.is_finite() {
            return Err(DiffusionError::invalid("D", self.diffusivity, "diffusivity must be finite"));
        }
        if self.diffusivity <= 0.0 {
            return Err(DiffusionError::invalid("D", self.diffusivity, "diffusivity must be positive"));
        }

        validate_domain(self.length, self.spacing)?;

        if !self.left_value.is_finite() {
            return Err(DiffusionError::invalid("C_left", self.left_value, "boundary value must be finite"));
        }
        if !self.right_value.is_finite() {
            return Err(DiffusionError::invalid("C_right", self.right_value, "boundary value must be finite"));
        }

        Ok(())
    }
}

/// Validate a domain length and spacing pair
pub(crate) fn validate_domain(length: f64, spacing: f64) -> Result<()> {
    if !length.is_finite() {
        return Err(DiffusionError::invalid("LX", length, "domain length must be finite"));
    }
    if length <= 0.0 {
        return Err(DiffusionError::invalid("LX", length, "domain length must be positive"));
    }
    if !spacing.is_finite() {
        return Err(DiffusionError::invalid("dx", spacing, "grid spacing must be finite"));
    }
    if spacing <= 0.0 {
        return Err(DiffusionError::invalid("dx", spacing, "grid spacing must be positive"));
    }
    if spacing >= length {
        return Err(DiffusionError::invalid("dx", spacing, "grid spacing must be smaller than the domain length"));
    }
    Ok(())
}

impl fmt::Display for ModelParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "D = {}, LX = {}, dx = {}, nt = {}, C_left = {}, C_right = {}",
            self.diffusivity,
            self.length,
            self.spacing,
            self.time_steps,
            self.left_value,
            self.right_value
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
