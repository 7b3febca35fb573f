//! Plot configuration

use plotters::prelude::*;

use crate::output::view::{ProfileKind, ProfileView};

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Line color for single-profile plots
/// - `profile_colors`: Optional colors for overlays (one per profile)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use diffusion_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profile("Step after 5000 steps");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "x")
    pub xlabel: String,

    /// Y-axis label (default: "C")
    pub ylabel: String,

    /// Line color for single-profile plots (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for overlay plots (one per profile)
    ///
    /// If None, uses the default palette.
    pub profile_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "x".to_string(),
            ylabel: "C".to_string(),
            line_color: RED,
            profile_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for a spatial profile with optional custom title
    ///
    /// Title defaults to "Concentration Profile".
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::profile("Final Profile");
    /// let config = PlotConfig::profile(NO_TITLE);
    /// ```
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Concentration Profile".to_string());
        config
    }

    /// Create config carrying the title, labels and color of a view
    ///
    /// The initial profile is drawn in red and the final one in blue.
    pub fn for_view(view: &ProfileView<'_>) -> Self {
        let mut config = Self::default();
        config.title = view.title.clone();
        config.xlabel = view.xlabel.clone();
        config.ylabel = view.ylabel.clone();
        config.line_color = match view.kind {
            ProfileKind::Initial => RED,
            ProfileKind::Final => BLUE,
            ProfileKind::Snapshot { .. } => GREEN,
        };
        config
    }

    /// Create config for overlays with custom colors
    pub fn with_profile_colors(colors: Vec<RGBColor>) -> Self {
        let mut config = Self::default();
        config.profile_colors = Some(colors);
        config
    }

    /// Get color for profile at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_profile_color(&self, profile_index: usize) -> RGBColor {
        if let Some(colors) = &self.profile_colors {
            if let Some(color) = colors.get(profile_index) {
                return *color;
            }
        }

        // Red first and blue second, matching the initial/final convention
        const PALETTE: [RGBColor; 8] = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),  // Orange
            RGBColor(128, 0, 128),  // Purple
        ];

        PALETTE[profile_index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert_eq!(config.ylabel, "C");
        assert!(config.show_grid);
    }

    #[test]
    fn test_profile_config_titles() {
        assert_eq!(PlotConfig::profile(NO_TITLE).title, "Concentration Profile");
        assert_eq!(PlotConfig::profile("Final Profile").title, "Final Profile");
        assert_eq!(PlotConfig::profile(format!("t = {}", 1.5)).title, "t = 1.5");
    }

    #[test]
    fn test_config_for_views() {
        let x = [0.0, 1.0];
        let y = [1.0, 0.0];

        let initial = PlotConfig::for_view(&ProfileView::initial(&x, &y));
        assert_eq!(initial.title, "Initial profile");
        assert_eq!(initial.xlabel, "X");
        assert_eq!(initial.line_color, RED);

        let last = PlotConfig::for_view(&ProfileView::final_profile(&x, &y));
        assert_eq!(last.title, "Final Profile");
        assert_eq!(last.xlabel, "x");
        assert_eq!(last.line_color, BLUE);
    }

    #[test]
    fn test_get_profile_color_default_palette() {
        let config = PlotConfig::default();
        assert_eq!(config.get_profile_color(0), RED);
        assert_eq!(config.get_profile_color(1), BLUE);
        assert_eq!(config.get_profile_color(8), RED);
    }

    #[test]
    fn test_get_profile_color_custom() {
        let config = PlotConfig::with_profile_colors(vec![BLACK, CYAN]);
        assert_eq!(config.get_profile_color(0), BLACK);
        assert_eq!(config.get_profile_color(1), CYAN);
        // Past the custom list, fall back to the palette
        assert_eq!(config.get_profile_color(2), GREEN);
    }
}
