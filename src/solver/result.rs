//! Simulation result
//!
//! Holds the grid, the initial and final profiles as two independent values,
//! and the optional trajectory of intermediate profiles.

use ndarray::{Array2, ArrayView1};
use std::collections::HashMap;

use crate::output::view::ProfileView;
use crate::physics::{ConcentrationField, Grid, ModelParameters};

/// Outcome of a completed run
///
/// `initial` is captured before the first step and `final_state` after the
/// last one; mutating the solver's field never touches either.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Parameters of the run
    pub parameters: ModelParameters,

    /// Spatial grid
    pub grid: Grid,

    /// Profile at `t = 0`
    pub initial: ConcentrationField,

    /// Profile after `nt` steps
    pub final_state: ConcentrationField,

    /// Time step `dt`
    pub dt: f64,

    /// Step indices of the recorded profiles, ascending
    pub snapshot_steps: Vec<usize>,

    /// Simulated time of each recorded profile, `step * dt`
    pub time_points: Vec<f64>,

    /// Recorded profiles, one row per entry of `snapshot_steps`
    pub trajectory: Array2<f64>,

    /// Free-form run information (solver name, dt, ...)
    metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Assemble a result
    pub(crate) fn new(
        parameters: ModelParameters,
        grid: Grid,
        initial: ConcentrationField,
        final_state: ConcentrationField,
        dt: f64,
        snapshot_steps: Vec<usize>,
        trajectory: Array2<f64>,
    ) -> Self {
        let time_points = snapshot_steps.iter().map(|&s| s as f64 * dt).collect();
        Self {
            parameters,
            grid,
            initial,
            final_state,
            dt,
            snapshot_steps,
            time_points,
            trajectory,
            metadata: HashMap::new(),
        }
    }

    /// Number of time steps taken
    pub fn steps(&self) -> usize {
        self.snapshot_steps.last().copied().unwrap_or(0)
    }

    /// Simulated end time `nt * dt`
    pub fn final_time(&self) -> f64 {
        self.steps() as f64 * self.dt
    }

    /// Number of recorded profiles
    pub fn len(&self) -> usize {
        self.snapshot_steps.len()
    }

    /// True when no profile was recorded
    pub fn is_empty(&self) -> bool {
        self.snapshot_steps.is_empty()
    }

    /// Recorded profile number `index`
    pub fn snapshot(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.trajectory.nrows()).then(|| self.trajectory.row(index))
    }

    /// The two views handed to a renderer: initial then final
    pub fn profile_views(&self) -> [ProfileView<'_>; 2] {
        [
            ProfileView::initial(self.grid.as_slice(), self.initial.as_slice()),
            ProfileView::final_profile(self.grid.as_slice(), self.final_state.as_slice()),
        ]
    }

    /// One view per recorded profile, in time order
    ///
    /// Rows of the trajectory are contiguous in the standard layout, so each
    /// view borrows directly from it.
    pub fn snapshot_views(&self) -> Vec<ProfileView<'_>> {
        self.snapshot_steps
            .iter()
            .zip(self.time_points.iter())
            .zip(self.trajectory.outer_iter())
            .filter_map(|((&step, &time), row)| {
                row.to_slice()
                    .map(|values| ProfileView::snapshot(step, time, self.grid.as_slice(), values))
            })
            .collect()
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Get a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// All metadata entries
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }
}

// =================================================================================================
// Tests
// =================================================================================================
