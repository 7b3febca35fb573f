//! CSV export of diffusion profiles
//!
//! Writes the grid positions next to the initial and final concentration
//! profiles, one row per grid point. The format opens in spreadsheets,
//! pandas and most plotting tools.
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use diffusion_rs::output::export::export_profiles_csv;
//!
//! export_profiles_csv(&result, "profiles.csv", None)?;
//! ```
//!
//! **Output** (`profiles.csv`):
//! ```csv
//! x,C_initial,C_final
//! 0.000000,500.000000,500.000000
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! let config = CsvConfig::default().with_metadata();
//! export_profiles_csv(&result, "profiles.csv", Some(&config))?;
//! ```
//!
//! **Output**:
//! ```csv
//! # Diffusion Simulation Data
//! # Generated: 2026-10-18T09:12:44+00:00
//! # Solver: FTCS
//! # D: 110
//! # LX: 300
//! # dx: 0.5
//! # nt: 5000
//! # dt: 0.0011363636363636363
//! # C_left: 500
//! # C_right: 0
//! #
//! x,C_initial,C_final
//! ...
//! ```
//!
//! ## Trajectory
//!
//! [`export_trajectory_csv`] writes every recorded profile as a column
//! (`x, t=0, t=...`), for runs solved with snapshots.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::{DiffusionError, Result};
use crate::solver::SimulationResult;

use super::Exporter;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     include_metadata: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include `#` header comments with the run parameters (default: false)
    pub include_metadata: bool,

    /// Header for the position column (default: "x")
    pub position_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            position_header: "x".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon delimiter, comma decimal separator)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable the metadata header
    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.delimiter == self.decimal_separator {
            return Err(DiffusionError::output(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// [`Exporter`] writing CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    fn export_profiles(&self, result: &SimulationResult, path: &str) -> Result<()> {
        export_profiles_csv(result, path, Some(&self.config))
    }

    fn export_trajectory(&self, result: &SimulationResult, path: &str) -> Result<()> {
        export_trajectory_csv(result, path, Some(&self.config))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write the `#` metadata header
fn write_metadata_header<W: Write>(out: &mut W, result: &SimulationResult) -> Result<()> {
    let params = &result.parameters;

    writeln!(out, "# Diffusion Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;
    if let Some(solver) = result.get_metadata("solver") {
        writeln!(out, "# Solver: {}", solver)?;
    }
    writeln!(out, "# D: {}", params.diffusivity)?;
    writeln!(out, "# LX: {}", params.length)?;
    writeln!(out, "# dx: {}", params.spacing)?;
    writeln!(out, "# nt: {}", params.time_steps)?;
    writeln!(out, "# dt: {}", result.dt)?;
    writeln!(out, "# C_left: {}", params.left_value)?;
    writeln!(out, "# C_right: {}", params.right_value)?;
    writeln!(out, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn check_column(name: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(DiffusionError::output(format!(
            "column {} has {} values for {} grid points",
            name,
            values.len(),
            expected
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(DiffusionError::output(format!(
            "NaN or Inf detected in column {}",
            name
        )));
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &[f64], config: &CsvConfig) -> Result<()> {
    let mut first = true;
    for value in row {
        if !first {
            write!(out, "{}", config.delimiter)?;
        }
        write!(out, "{}", format_number(*value, config))?;
        first = false;
    }
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export the initial and final profiles of a run
///
/// Columns: `x`, `C_initial`, `C_final`.
///
/// # Errors
///
/// - `Output` for an empty grid, mismatched lengths or NaN/Inf values,
///   and for a delimiter equal to the decimal separator
/// - `Io` when the file cannot be created or written
///
/// # Example
///
/// ```rust,ignore
/// export_profiles_csv(&result, "profiles.csv", None)?;
/// ```
pub fn export_profiles_csv(
    result: &SimulationResult,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    configuration.validate()?;

    // ============================= Validation =============================

    let x = result.grid.as_slice();
    if x.is_empty() {
        return Err(DiffusionError::output("empty grid: nothing to export"));
    }
    check_column(&configuration.position_header, x, x.len())?;
    check_column("C_initial", result.initial.as_slice(), x.len())?;
    check_column("C_final", result.final_state.as_slice(), x.len())?;

    // ============================= Write ==================================

    let mut out = BufWriter::new(File::create(output_path)?);

    if configuration.include_metadata {
        write_metadata_header(&mut out, result)?;
    }

    let d = configuration.delimiter;
    writeln!(out, "{}{d}C_initial{d}C_final", configuration.position_header)?;

    for ((xi, c0), c1) in x
        .iter()
        .zip(result.initial.as_slice())
        .zip(result.final_state.as_slice())
    {
        write_row(&mut out, &[*xi, *c0, *c1], configuration)?;
    }

    out.flush()?;
    log::debug!("exported {} rows to {}", x.len(), output_path);

    Ok(())
}

/// Export every recorded profile of a run
///
/// Columns: `x`, then one `t=<time>` column per recorded snapshot.
pub fn export_trajectory_csv(
    result: &SimulationResult,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    configuration.validate()?;

    let x = result.grid.as_slice();
    if x.is_empty() || result.is_empty() {
        return Err(DiffusionError::output("empty trajectory: nothing to export"));
    }
    if result.trajectory.ncols() != x.len() {
        return Err(DiffusionError::output(format!(
            "trajectory has {} columns for {} grid points",
            result.trajectory.ncols(),
            x.len()
        )));
    }
    if result.trajectory.iter().any(|v| !v.is_finite()) {
        return Err(DiffusionError::output("NaN or Inf detected in trajectory"));
    }

    let mut out = BufWriter::new(File::create(output_path)?);

    if configuration.include_metadata {
        write_metadata_header(&mut out, result)?;
    }

    write!(out, "{}", configuration.position_header)?;
    for t in &result.time_points {
        write!(out, "{}t={}", configuration.delimiter, t)?;
    }
    writeln!(out)?;

    let mut row = Vec::with_capacity(result.len() + 1);
    for (i, xi) in x.iter().enumerate() {
        row.clear();
        row.push(*xi);
        row.extend(result.trajectory.column(i).iter().copied());
        write_row(&mut out, &row, configuration)?;
    }

    out.flush()?;
    log::debug!(
        "exported {} profiles x {} points to {}",
        result.len(),
        x.len(),
        output_path
    );

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
