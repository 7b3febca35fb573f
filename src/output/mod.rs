//! Output module for simulation results
//!
//! - **View**: [`ProfileView`], the data handed from the solver to a renderer
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← Renderer trait
//! ├── view.rs             ← ProfileView
//! ├── visualization/      ← Plots
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── profile.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ## Rendering
//!
//! ```rust,ignore
//! use diffusion_rs::output::{PlotRenderer, Renderer};
//!
//! let mut renderer = PlotRenderer::new("out").with_overlay();
//! renderer.render(&result.profile_views())?;
//! // out/initial_profile.png, out/final_profile.png, out/profiles.png
//! ```
//!
//! ## CSV Export
//!
//! ```rust,ignore
//! use diffusion_rs::output::{export_profiles_csv, CsvConfig};
//!
//! export_profiles_csv(&result, "profiles.csv", None)?;
//! ```

use std::error::Error;

pub mod export;
pub mod view;
pub mod visualization;

pub use view::{ProfileKind, ProfileView};

pub use visualization::{
    plot_profile, plot_profile_evolution, plot_profiles_overlay, PlotConfig, PlotRenderer,
};

pub use export::{export_profiles_csv, export_trajectory_csv, CsvConfig, CsvExporter, Exporter};

/// Consumer of profile views
///
/// The solver side only produces [`ProfileView`]s; anything that displays or
/// stores them implements this trait. A run hands over the initial and final
/// profiles in that order.
pub trait Renderer {
    /// Render a batch of views
    fn render(&mut self, views: &[ProfileView<'_>]) -> Result<(), Box<dyn Error>>;
}
