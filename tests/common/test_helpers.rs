//! Helper functions for integration tests

use std::error::Error;

use diffusion_rs::output::{ProfileKind, ProfileView, Renderer};
use diffusion_rs::physics::{ConcentrationField, ModelParameters};

/// The reference scenario: D = 1, LX = 300, dx = 0.5, C_left = 500, C_right = 0
pub fn reference_parameters(time_steps: usize) -> ModelParameters {
    ModelParameters::default().with_time_steps(time_steps)
}

/// Small grid for fast tests: LX = 20, dx = 1 (20 points)
pub fn small_parameters(time_steps: usize) -> ModelParameters {
    ModelParameters::default()
        .with_length(20.0)
        .with_spacing(1.0)
        .with_time_steps(time_steps)
}

/// Largest pointwise difference between two fields
pub fn max_abs_difference(a: &ConcentrationField, b: &ConcentrationField) -> f64 {
    assert_eq!(a.len(), b.len(), "Dimension mismatch");
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Assert that two fields are close (within tolerance)
pub fn assert_fields_close(
    a: &ConcentrationField,
    b: &ConcentrationField,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(a.len(), b.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff <= tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// One view as seen by a renderer
#[derive(Debug, Clone)]
pub struct RecordedView {
    pub kind: ProfileKind,
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Renderer that keeps copies of everything it receives
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub batches: Vec<Vec<RecordedView>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, views: &[ProfileView<'_>]) -> Result<(), Box<dyn Error>> {
        self.batches.push(
            views
                .iter()
                .map(|view| RecordedView {
                    kind: view.kind,
                    title: view.title.clone(),
                    xlabel: view.xlabel.clone(),
                    ylabel: view.ylabel.clone(),
                    x: view.x.to_vec(),
                    y: view.y.to_vec(),
                })
                .collect(),
        );
        Ok(())
    }
}
