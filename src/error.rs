//! Error types
//!
//! All failures of a diffusion run are reported through [`DiffusionError`].
//! Parameter problems are detected before the first time step; once setup
//! has validated, stepping itself cannot fail for finite inputs.

use std::error::Error;
use std::fmt;

/// Errors raised while configuring, running or exporting a diffusion run
#[derive(Debug)]
pub enum DiffusionError {
    /// A model parameter is non-physical or inconsistent
    ///
    /// Raised for non-positive `D`, `dx` or `LX`, for `dx >= LX`,
    /// for non-finite values and for a negative step count.
    InvalidParameter {
        /// Parameter name as used in the model (`D`, `dx`, `LX`, `nt`, ...)
        name: &'static str,
        /// Offending value, rendered for display
        value: String,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// NaN or Inf found in the field when finite checking is enabled
    NumericalInstability {
        /// Time step after which the value was observed
        step: usize,
        /// Index of the first non-finite value
        index: usize,
    },

    /// Output data could not be handed to a renderer or exporter
    Output {
        /// Human-readable description
        reason: String,
    },

    /// File system failure while writing output
    Io(std::io::Error),
}

impl DiffusionError {
    /// Shorthand for [`DiffusionError::InvalidParameter`]
    pub fn invalid(name: &'static str, value: impl fmt::Display, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Shorthand for [`DiffusionError::Output`]
    pub fn output(reason: impl Into<String>) -> Self {
        Self::Output {
            reason: reason.into(),
        }
    }

    /// True for parameter validation failures
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

impl fmt::Display for DiffusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value, reason } => {
                write!(f, "invalid parameter {name} = {value}: {reason}")
            }
            Self::NumericalInstability { step, index } => write!(
                f,
                "non-finite value at index {index} after step {step}; \
                 the time step exceeds the stability limit"
            ),
            Self::Output { reason } => write!(f, "output error: {reason}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl Error for DiffusionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DiffusionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, DiffusionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = DiffusionError::invalid("D", -1.0, "diffusivity must be positive");
        assert!(err.is_invalid_parameter());
        assert_eq!(
            err.to_string(),
            "invalid parameter D = -1: diffusivity must be positive"
        );
    }

    #[test]
    fn test_io_source() {
        let err: DiffusionError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.source().is_some());
        assert!(!err.is_invalid_parameter());
    }

    #[test]
    fn test_instability_display() {
        let err = DiffusionError::NumericalInstability { step: 12, index: 3 };
        assert!(err.to_string().contains("index 3"));
        assert!(err.to_string().contains("step 12"));
    }
}
