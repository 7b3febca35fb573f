//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file.
//!
//! # Available formats
//!
//! | Format | Module  |
//! |--------|---------|
//! | CSV    | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use diffusion_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//!
//! // x, C_initial, C_final
//! exporter.export_profiles(&result, "profiles.csv")?;
//!
//! // x, then one column per recorded snapshot
//! exporter.export_trajectory(&result, "trajectory.csv")?;
//! ```

pub mod csv;

pub use csv::{export_profiles_csv, export_trajectory_csv, CsvConfig, CsvExporter};

use crate::error::Result;
use crate::solver::SimulationResult;

/// Abstraction trait for all export formats.
///
/// Errors are reported as [`DiffusionError`](crate::error::DiffusionError):
/// `Output` for data that cannot be written (empty, mismatched, non-finite)
/// and `Io` for file system failures.
pub trait Exporter {
    /// Exports the initial and final profiles of a run.
    fn export_profiles(&self, result: &SimulationResult, path: &str) -> Result<()>;

    /// Exports every recorded profile of a run.
    ///
    /// Without snapshots this holds the same two profiles as
    /// [`export_profiles`](Exporter::export_profiles).
    fn export_trajectory(&self, result: &SimulationResult, path: &str) -> Result<()>;
}
