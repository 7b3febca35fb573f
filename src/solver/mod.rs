//! Numerical solver
//!
//! This module evolves a [`ConcentrationField`](crate::physics::ConcentrationField)
//! with the explicit FTCS scheme.
//!
//! # Core Concepts
//!
//! The solver side is split the same way as the model side:
//!
//! 1. **Parameters** (`ModelParameters`, in [`crate::physics`]) - WHAT to solve
//! 2. **Configuration** (`SolverConfiguration`) - HOW to run it
//!    (snapshot interval, finite check)
//! 3. **Solver** (`DiffusionSolver`) - the scheme itself, owning grid, field
//!    and double buffer
//!
//! The time step is not part of either: it is always the stability limit
//! `dt = 0.5 dx² / D`.
//!
//! # Module Organization
//!
//! - **`configuration`**: `SolverConfiguration`
//! - **`result`**: `SimulationResult` (initial, final and recorded profiles)
//! - **`methods`**: `DiffusionSolver` and the free functions
//!   `stable_time_step`, `step`, `run`
//!
//! # Quick Start Example
//!
//! ```rust
//! use diffusion_rs::physics::ModelParameters;
//! use diffusion_rs::solver::{DiffusionSolver, SolverConfiguration};
//!
//! let params = ModelParameters::default().with_time_steps(200);
//! let result = DiffusionSolver::new(params)
//!     .unwrap()
//!     .solve(&SolverConfiguration::default())
//!     .unwrap();
//!
//! let [initial, last] = result.profile_views();
//! assert_eq!(initial.title, "Initial profile");
//! assert_eq!(last.title, "Final Profile");
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================
mod configuration;
mod methods;
mod result;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Only the interior update of a single step may run in parallel; successive
// steps are always sequential. The threshold is a performance hint read with
// Relaxed ordering, so it can be changed at runtime from benchmarks and tests.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of interior points above which a step switches to rayon.
///
/// Each point costs a handful of flops, so below a few thousand points the
/// thread-pool dispatch dominates.
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Steps on grids with more interior points than this value use rayon, but
/// only when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use configuration::SolverConfiguration;
pub use result::SimulationResult;

pub use methods::{
    fourier_number, run, simulate, stable_time_step, step, DiffusionSolver, STABILITY_LIMIT,
};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{DiffusionError, Result};
use crate::physics::ConcentrationField;

/// Check a field for NaN or Inf values
///
/// With the stable time step the scheme cannot produce non-finite values from
/// finite input, so a hit means the field was corrupted or `dt` was forced
/// past the stability limit.
///
/// # Returns
///
/// `Ok(())` if every value is finite, `NumericalInstability` with the first
/// offending index otherwise
pub(crate) fn validate_field(field: &ConcentrationField, step: usize) -> Result<()> {
    match field.first_non_finite() {
        Some(index) => {
            log::warn!("non-finite value at index {index} after step {step}");
            Err(DiffusionError::NumericalInstability { step, index })
        }
        None => Ok(()),
    }
}
