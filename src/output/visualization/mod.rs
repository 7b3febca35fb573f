//! Visualization of diffusion profiles
//!
//! This module draws concentration profiles using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **profile**: Spatial plots (concentration vs position) and the
//!   [`PlotRenderer`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diffusion_rs::output::visualization::{plot_profile, PlotConfig};
//!
//! let result = solver.solve(&SolverConfiguration::default())?;
//! let [initial, last] = result.profile_views();
//!
//! // Title, labels and color taken from the view
//! plot_profile(&initial, "initial.png", None)?;
//!
//! // Or with custom config
//! let mut config = PlotConfig::for_view(&last);
//! config.width = 1920;
//! plot_profile(&last, "final.svg", Some(&config))?;
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Function |
//! |----------|----------|
//! | One profile | `plot_profile` |
//! | Initial and final on common axes | `plot_profiles_overlay` |
//! | Every recorded snapshot | `plot_profile_evolution` |
//! | Files for all views of a run | `PlotRenderer` |

pub mod config;
pub mod profile;

pub use config::{PlotConfig, NO_TITLE};

pub use profile::{plot_profile, plot_profile_evolution, plot_profiles_overlay, PlotRenderer};
