//! Run configuration
//!
//! Options controlling *how* a run is carried out, as opposed to the model
//! parameters describing *what* is simulated. The time step itself is not
//! configurable: it is always derived from `D` and `dx`.

use crate::error::{DiffusionError, Result};

/// Options for a solver run
///
/// # Examples
///
/// ```rust
/// use diffusion_rs::solver::SolverConfiguration;
///
/// // Initial and final profiles only
/// let config = SolverConfiguration::default();
/// assert!(config.snapshot_interval.is_none());
///
/// // Keep a profile every 500 steps and check for NaN/Inf after each step
/// let config = SolverConfiguration::default()
///     .with_snapshots(500)
///     .with_finite_check(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverConfiguration {
    /// Record an intermediate profile every `n` steps
    ///
    /// `None` records only `t = 0` and `t = nt`. The first and last step are
    /// always part of the trajectory.
    pub snapshot_interval: Option<usize>,

    /// Check the field for NaN/Inf after every step (default: false)
    pub check_finite: bool,
}

impl SolverConfiguration {
    /// Configuration recording only the initial and final profiles
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: record a snapshot every `interval` steps
    pub fn with_snapshots(mut self, interval: usize) -> Self {
        self.snapshot_interval = Some(interval);
        self
    }

    /// Builder pattern: enable or disable the finite check
    pub fn with_finite_check(mut self, enabled: bool) -> Self {
        self.check_finite = enabled;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_interval == Some(0) {
            return Err(DiffusionError::invalid(
                "snapshot_interval",
                0,
                "snapshot interval must be at least one step",
            ));
        }
        Ok(())
    }

    /// True when step `step` must be recorded out of `total` steps
    pub(crate) fn records(&self, step: usize, total: usize) -> bool {
        if step == 0 || step == total {
            return true;
        }
        match self.snapshot_interval {
            Some(interval) => step % interval == 0,
            None => false,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
