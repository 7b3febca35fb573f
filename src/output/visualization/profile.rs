//! Spatial profile plotting
//!
//! Draws concentration profiles `C(x)` handed over as [`ProfileView`]s.
//! The output format follows the file extension: `.svg` gives an SVG file,
//! anything else a PNG bitmap.
//!
//! # Usage
//!
//! ```rust,ignore
//! use diffusion_rs::output::visualization::{plot_profile, plot_profiles_overlay};
//!
//! let result = solver.solve(&SolverConfiguration::default())?;
//! let [initial, last] = result.profile_views();
//!
//! plot_profile(&initial, "initial.png", None)?;
//! plot_profiles_overlay(&[initial, last], "overlay.svg", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::config::{PlotConfig, NO_TITLE};
use crate::output::view::ProfileView;
use crate::output::Renderer;
use crate::solver::SimulationResult;

// =================================================================================================
// Core Plotting Functions
// =================================================================================================

/// Plot a single profile
///
/// Without a config, title, axis labels and line color are taken from the
/// view (see [`PlotConfig::for_view`]).
///
/// # Arguments
///
/// * `view` - Profile to draw
/// * `output_path` - Path to save the plot (PNG or SVG)
/// * `config` - Optional plot configuration
pub fn plot_profile(
    view: &ProfileView<'_>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    check_view(view)?;

    let view_config = PlotConfig::for_view(view);
    let config = config.unwrap_or(&view_config);

    let x_range = x_range(std::slice::from_ref(view));
    let y_range = y_range(std::slice::from_ref(view));

    log::debug!("plotting '{}' ({} points) to {}", config.title, view.len(), output_path);

    match extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profile_impl(backend, view, config, x_range, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profile_impl(backend, view, config, x_range, y_range)
        }
    }
}

/// Implementation for single-profile plotting with concrete backend
fn plot_profile_impl<DB: DrawingBackend>(
    backend: DB,
    view: &ProfileView<'_>,
    config: &PlotConfig,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.1}", x))
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()?;
    }

    chart.draw_series(LineSeries::new(
        view.points(),
        ShapeStyle::from(&config.line_color).stroke_width(config.line_width),
    ))?;

    root.present()?;

    Ok(())
}

/// Plot several profiles on common axes
///
/// Mirrors drawing the final curve onto the figure of the initial one. The
/// legend uses [`ProfileView::label`].
///
/// # Example
///
/// ```rust,ignore
/// let views = result.profile_views();
/// plot_profiles_overlay(&views, "overlay.png", None)?;
/// ```
pub fn plot_profiles_overlay(
    views: &[ProfileView<'_>],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if views.is_empty() {
        return Err("No profiles provided".into());
    }
    for view in views {
        check_view(view)?;
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let x_range = x_range(views);
    let y_range = y_range(views);

    log::debug!("plotting {} profiles to {}", views.len(), output_path);

    match extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_overlay_impl(backend, views, config, x_range, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_overlay_impl(backend, views, config, x_range, y_range)
        }
    }
}

/// Implementation for overlay plotting with concrete backend
fn plot_overlay_impl<DB: DrawingBackend>(
    backend: DB,
    views: &[ProfileView<'_>],
    config: &PlotConfig,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.1}", x))
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()?;
    }

    for (idx, view) in views.iter().enumerate() {
        let color = config.get_profile_color(idx);

        chart
            .draw_series(LineSeries::new(
                view.points(),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(view.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Plot every recorded profile of a run on common axes
///
/// Uses the snapshots recorded with
/// [`SolverConfiguration::with_snapshots`](crate::solver::SolverConfiguration::with_snapshots);
/// without them only the initial and final profiles are drawn.
pub fn plot_profile_evolution(
    result: &SimulationResult,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let views = result.snapshot_views();
    if views.is_empty() {
        return Err("Empty trajectory".into());
    }

    let default_config = PlotConfig::profile("Profile Evolution");
    plot_profiles_overlay(&views, output_path, Some(config.unwrap_or(&default_config)))
}

// =================================================================================================
// Renderer
// =================================================================================================

/// Renderer writing one image per view into a directory
///
/// File names are derived from view titles ("Initial profile" →
/// `initial_profile.png`). With `overlay` set, an extra `profiles.<ext>`
/// holds all views on common axes.
#[derive(Debug, Clone)]
pub struct PlotRenderer {
    /// Output directory (must exist)
    pub output_dir: PathBuf,

    /// File extension, `"png"` or `"svg"`
    pub extension: String,

    /// Also write the overlay plot
    pub overlay: bool,

    written: Vec<PathBuf>,
}

impl PlotRenderer {
    /// PNG renderer into `output_dir`
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            extension: "png".to_string(),
            overlay: false,
            written: Vec::new(),
        }
    }

    /// Builder pattern: write SVG instead of PNG
    pub fn svg(mut self) -> Self {
        self.extension = "svg".to_string();
        self
    }

    /// Builder pattern: also write the overlay plot
    pub fn with_overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", stem, self.extension))
    }
}

impl Renderer for PlotRenderer {
    fn render(&mut self, views: &[ProfileView<'_>]) -> Result<(), Box<dyn Error>> {
        if !self.output_dir.is_dir() {
            return Err(format!("Output directory not found: {}", self.output_dir.display()).into());
        }

        for view in views {
            let path = self.path_for(&file_stem(&view.title));
            plot_profile(view, path_str(&path)?, None)?;
            self.written.push(path);
        }

        if self.overlay && !views.is_empty() {
            let path = self.path_for("profiles");
            plot_profiles_overlay(views, path_str(&path)?, None)?;
            self.written.push(path);
        }

        log::info!("rendered {} plot(s) into {}", self.written.len(), self.output_dir.display());
        Ok(())
    }
}

// =================================================================================================
// Helpers
// =================================================================================================

fn extension(output_path: &str) -> &str {
    Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png")
}

fn path_str(path: &Path) -> Result<&str, Box<dyn Error>> {
    path.to_str()
        .ok_or_else(|| format!("Non UTF-8 output path: {}", path.display()).into())
}

/// "Initial profile" -> "initial_profile"
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "profile".to_string()
    } else {
        stem.to_string()
    }
}

fn check_view(view: &ProfileView<'_>) -> Result<(), Box<dyn Error>> {
    if view.is_empty() {
        return Err(format!("Empty profile '{}'", view.title).into());
    }
    if view.x.len() != view.y.len() {
        return Err(format!(
            "Profile '{}' has {} positions but {} values",
            view.title,
            view.x.len(),
            view.y.len()
        )
        .into());
    }
    if view.points().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(format!("Profile '{}' contains NaN or Inf", view.title).into());
    }
    Ok(())
}

fn x_range(views: &[ProfileView<'_>]) -> Range<f64> {
    let (min, max) = bounds(views.iter().flat_map(|v| v.x.iter().copied()));
    padded(min, max, 0.0)
}

fn y_range(views: &[ProfileView<'_>]) -> Range<f64> {
    let (min, max) = bounds(views.iter().flat_map(|v| v.y.iter().copied()));
    padded(min, max, 0.05)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Range `[min, max]` widened by `margin` of its span; never empty
fn padded(min: f64, max: f64, margin: f64) -> Range<f64> {
    let span = max - min;
    if span <= 0.0 {
        let pad = min.abs().max(1.0) * 0.5;
        return (min - pad)..(max + pad);
    }
    (min - span * margin)..(max + span * margin)
}

// =================================================================================================
// Tests
// =================================================================================================
