//! Uniform 1D grid
//!
//! Positions follow the half-open `arange` convention: start at 0 inclusive,
//! stop at `LX` exclusive, step `dx`. The point at exactly `LX` is never part
//! of the grid.

use nalgebra::DVector;

use crate::error::Result;
use crate::physics::parameters::validate_domain;

/// Ordered, immutable sequence of grid positions `0, dx, 2dx, ... < LX`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Positions, `positions[i] = i * dx`
    positions: DVector<f64>,

    /// Spacing `dx`
    spacing: f64,

    /// Domain length `LX` (exclusive upper bound)
    length: f64,
}

/// Build the grid `0, dx, 2dx, ... < LX`
///
/// The number of points is `ceil(LX / dx)` and position `i` is `i * dx`,
/// so a domain that is an exact multiple of `dx` stops one spacing short
/// of `LX`.
///
/// # Errors
///
/// [`InvalidParameter`](crate::error::DiffusionError::InvalidParameter) when
/// `LX` or `dx` is non-positive or non-finite, or when `dx >= LX`.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::physics::build_grid;
///
/// let grid = build_grid(300.0, 0.5).unwrap();
/// assert_eq!(grid.len(), 600);
/// assert_eq!(grid.position(599), 299.5);
/// ```
pub fn build_grid(length: f64, spacing: f64) -> Result<Grid> {
    validate_domain(length, spacing)?;

    let points = (length / spacing).ceil() as usize;
    let positions = DVector::from_fn(points, |i, _| i as f64 * spacing);

    Ok(Grid {
        positions,
        spacing,
        length,
    })
}

impl Grid {
    /// Number of points `nx`
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a grid built by [`build_grid`]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Spacing `dx`
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Domain length `LX`
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Midpoint `LX / 2`, where the initial step sits
    pub fn midpoint(&self) -> f64 {
        self.length / 2.0
    }

    /// Position of point `index`
    ///
    /// # Panics
    ///
    /// Panics when `index >= len()`.
    pub fn position(&self, index: usize) -> f64 {
        self.positions[index]
    }

    /// Positions as a vector
    pub fn positions(&self) -> &DVector<f64> {
        &self.positions
    }

    /// Positions as a slice
    pub fn as_slice(&self) -> &[f64] {
        self.positions.as_slice()
    }

    /// Iterate over positions
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.positions.iter()
    }

    /// Number of interior points (`nx - 2`, or 0 on a degenerate grid)
    pub fn interior_len(&self) -> usize {
        self.len().saturating_sub(2)
    }

    /// True when the grid has no interior point and stepping is a no-op
    pub fn is_degenerate(&self) -> bool {
        self.len() < 3
    }
}

// =================================================================================================
// Tests
// =================================================================================================
