//! Numerical methods
//!
//! # Available Methods
//!
//! - **FTCS** ([`DiffusionSolver`]): explicit forward-time, centered-space
//!   finite differences
//!   - Order: first in time, second in space
//!   - Cost: one three-point stencil per interior point per step
//!   - Stability: `D dt / dx² <= 1/2`; the solver always runs at that limit
//!
//! Implicit and adaptive schemes are out of scope for this crate.
//!
//! # Performance Considerations
//!
//! - Each step reads one buffer and writes the other, then swaps them; no
//!   allocation happens inside the time loop
//! - With the `parallel` feature, the interior update of large grids is split
//!   across the rayon pool (see [`set_parallel_threshold`](crate::solver::set_parallel_threshold))

mod ftcs;

pub use ftcs::{
    fourier_number, run, simulate, stable_time_step, step, DiffusionSolver, STABILITY_LIMIT,
};
