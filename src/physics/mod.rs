//! Physical model
//!
//! Everything that describes *what* is being solved, independent of the
//! numerical scheme:
//!
//! - **Parameters** (`ModelParameters`): diffusivity, domain, step count and
//!   boundary values
//! - **Grid** (`Grid`): the uniform half-open set of positions `[0, LX)`
//! - **Field** (`ConcentrationField`): the diffusing quantity on that grid
//!
//! The numerical scheme that evolves the field lives in [`crate::solver`].
//!
//! # Example
//!
//! ```rust
//! use diffusion_rs::physics::{ModelParameters, build_grid, initial_profile};
//!
//! let params = ModelParameters::default();
//! let grid = build_grid(params.length, params.spacing).unwrap();
//! let field = initial_profile(&grid, params.left_value, params.right_value);
//!
//! assert_eq!(field.len(), grid.len());
//! assert_eq!(field.transitions(), 1);
//! ```

pub mod field;
pub mod grid;
pub mod parameters;

pub use field::{initial_profile, ConcentrationField};
pub use grid::{build_grid, Grid};
pub use parameters::ModelParameters;
