//! Concentration field
//!
//! The diffusing quantity sampled on the grid. The first and last values are
//! the Dirichlet boundary values; the update rule only ever writes the
//! interior `1..nx-1`.

use nalgebra::DVector;
use std::fmt;

use crate::physics::grid::Grid;

/// Mutable concentration profile, index-aligned with a [`Grid`]
///
/// Cloning produces an independent snapshot. Since the solver mutates the
/// field in place, keep a clone before running when the initial profile is
/// still needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationField {
    values: DVector<f64>,
}

/// Step-function initial condition
///
/// Points with `x <= LX/2` take `left_value`, points with `x > LX/2` take
/// `right_value`. No smoothing is applied at the discontinuity.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::physics::{build_grid, initial_profile};
///
/// let grid = build_grid(2.0, 0.5).unwrap();   // 0.0, 0.5, 1.0, 1.5
/// let field = initial_profile(&grid, 10.0, 0.0);
/// assert_eq!(field.as_slice(), &[10.0, 10.0, 10.0, 0.0]);
/// ```
pub fn initial_profile(grid: &Grid, left_value: f64, right_value: f64) -> ConcentrationField {
    let midpoint = grid.midpoint();
    let values = grid
        .positions()
        .map(|x| if x <= midpoint { left_value } else { right_value });

    ConcentrationField { values }
}

impl ConcentrationField {
    /// Wrap existing values
    pub fn from_vector(values: DVector<f64>) -> Self {
        Self { values }
    }

    /// Build from a plain vector
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values: DVector::from_vec(values),
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the field holds no point
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values as a vector
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.values
    }

    /// Values as a slice
    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    /// Swap storage with another field of the same length
    pub(crate) fn swap_values(&mut self, other: &mut DVector<f64>) {
        std::mem::swap(&mut self.values, other);
    }

    /// Left boundary value `field[0]`
    pub fn left_boundary(&self) -> Option<f64> {
        self.values.iter().next().copied()
    }

    /// Right boundary value `field[nx-1]`
    pub fn right_boundary(&self) -> Option<f64> {
        self.values.iter().last().copied()
    }

    /// Largest value, NEG_INFINITY when empty
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest value, INFINITY when empty
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Spread `max - min`, 0 when empty
    pub fn range(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max() - self.min()
        }
    }

    /// Integral of the field on the grid, `sum(field) * dx`
    pub fn total(&self, spacing: f64) -> f64 {
        self.values.sum() * spacing
    }

    /// Number of indices where consecutive values differ
    pub fn transitions(&self) -> usize {
        self.as_slice().windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// True when no value rises by more than `tolerance` from left to right
    pub fn is_monotone_non_increasing(&self, tolerance: f64) -> bool {
        self.as_slice().windows(2).all(|w| w[1] <= w[0] + tolerance)
    }

    /// Index of the first NaN or Inf, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }

    /// Copy the values into a `Vec`
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }
}

impl fmt::Display for ConcentrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.left_boundary(), self.right_boundary()) {
            (Some(left), Some(right)) => write!(
                f,
                "Field [{}] (left = {}, right = {}, range = {})",
                self.len(),
                left,
                right,
                self.range()
            ),
            _ => write!(f, "Field [0]"),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
