//! Profile views handed to renderers
//!
//! A view is the whole contract between the solver and a renderer: x and y
//! samples, axis labels and a title. How a renderer draws it is its own
//! business.

/// Which moment of the run a profile shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileKind {
    /// Profile before the first step
    Initial,

    /// Profile after the last step
    Final,

    /// Intermediate snapshot taken at `step`
    Snapshot {
        /// Time step index
        step: usize,
        /// Simulated time `step * dt`
        time: f64,
    },
}

/// Sampled `(x, y)` profile with its labels
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView<'a> {
    /// Moment of the run
    pub kind: ProfileKind,

    /// Plot title
    pub title: String,

    /// X-axis label
    pub xlabel: String,

    /// Y-axis label
    pub ylabel: String,

    /// Grid positions
    pub x: &'a [f64],

    /// Field values, index-aligned with `x`
    pub y: &'a [f64],
}

impl<'a> ProfileView<'a> {
    /// View of the initial profile: "Initial profile", axes "X" / "C"
    pub fn initial(x: &'a [f64], y: &'a [f64]) -> Self {
        Self {
            kind: ProfileKind::Initial,
            title: "Initial profile".to_string(),
            xlabel: "X".to_string(),
            ylabel: "C".to_string(),
            x,
            y,
        }
    }

    /// View of the final profile: "Final Profile", axes "x" / "C"
    pub fn final_profile(x: &'a [f64], y: &'a [f64]) -> Self {
        Self {
            kind: ProfileKind::Final,
            title: "Final Profile".to_string(),
            xlabel: "x".to_string(),
            ylabel: "C".to_string(),
            x,
            y,
        }
    }

    /// View of an intermediate snapshot
    pub fn snapshot(step: usize, time: f64, x: &'a [f64], y: &'a [f64]) -> Self {
        Self {
            kind: ProfileKind::Snapshot { step, time },
            title: format!("t = {time:.4}"),
            xlabel: "x".to_string(),
            ylabel: "C".to_string(),
            x,
            y,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    /// True when the view holds no sample
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short legend label
    pub fn label(&self) -> String {
        match self.kind {
            ProfileKind::Initial => "Initial".to_string(),
            ProfileKind::Final => "Final".to_string(),
            ProfileKind::Snapshot { time, .. } => format!("t={time:.3}"),
        }
    }

    /// Samples as `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}
