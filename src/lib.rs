//! diffusion-rs: explicit 1D diffusion
//!
//! Solves `∂C/∂t = D ∂²C/∂x²` on `[0, LX)` with the forward-time,
//! centered-space (FTCS) finite-difference scheme and fixed (Dirichlet)
//! boundary values.
//!
//! # Architecture
//!
//! The crate separates three concerns:
//!
//! 1. **Physics** ([`physics`]): parameters, grid and concentration field
//!    (what to solve)
//! 2. **Solver** ([`solver`]): the FTCS scheme and its stable time step
//!    (how to solve)
//! 3. **Output** ([`output`]): profile views handed to renderers, plots and
//!    CSV export
//!
//! # Quick Start
//!
//! ```rust
//! use diffusion_rs::prelude::*;
//!
//! # fn main() -> Result<(), DiffusionError> {
//! // 1. Parameters: D = 110, LX = 300, dx = 0.5, C_left = 500, C_right = 0
//! let params = ModelParameters::default().with_time_steps(1000);
//!
//! // 2. Solver at the stability limit dt = 0.5 dx² / D
//! let solver = DiffusionSolver::new(params)?;
//! assert_eq!(solver.grid().len(), 600);
//! assert_eq!(solver.dt(), 0.5 * 0.5 * 0.5 / 110.0);
//!
//! // 3. Run
//! let result = solver.solve(&SolverConfiguration::default())?;
//!
//! // 4. Hand the two profiles to a renderer
//! let [initial, last] = result.profile_views();
//! assert_eq!(initial.y[0], 500.0);
//! assert_eq!(last.y[599], 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! The building blocks are also available as free functions:
//!
//! ```rust
//! use diffusion_rs::physics::{build_grid, initial_profile};
//! use diffusion_rs::solver::{run, stable_time_step};
//!
//! let grid = build_grid(10.0, 1.0).unwrap();
//! let mut field = initial_profile(&grid, 1.0, 0.0);
//! let dt = stable_time_step(1.0, 1.0).unwrap();
//! run(&mut field, 1.0, dt, 1.0, 20);
//! assert_eq!(field.left_boundary(), Some(1.0));
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-based interior update for large grids
//! - `ttf` (default): system fonts for plot text. PNG output needs it (fontconfig on Linux).
//!
//! # Modules
//!
//! - [`error`]: Error type
//! - [`physics`]: Parameters, grid, field
//! - [`solver`]: FTCS solver
//! - [`output`]: Renderer hand-off, plots, CSV export

// Core modules
pub mod error;
pub mod physics;
pub mod solver;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use diffusion_rs::prelude::*;
    //! ```
    pub use crate::error::DiffusionError;
    pub use crate::physics::{
        build_grid, initial_profile, ConcentrationField, Grid, ModelParameters,
    };
    pub use crate::solver::{
        run, simulate, stable_time_step, step, DiffusionSolver, SimulationResult,
        SolverConfiguration,
    };
    pub use crate::output::{ProfileView, Renderer};
}
