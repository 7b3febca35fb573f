//! Forward-Time Centered-Space (FTCS) diffusion solver
//!
//! # Mathematical Background
//!
//! The 1D diffusion equation
//!
//! ```text
//! ∂C/∂t = D ∂²C/∂x²
//! ```
//!
//! is discretized with a forward difference in time and a centered second
//! difference in space:
//!
//! ```text
//! C_i^{n+1} = C_i^n + r (C_{i-1}^n - 2 C_i^n + C_{i+1}^n),    r = D dt / dx²
//! ```
//!
//! for every interior point `1 <= i <= nx - 2`. The two end points carry
//! Dirichlet values and are never written.
//!
//! # Stability
//!
//! The scheme is stable for `r <= 1/2`, i.e. `dt <= dx² / (2D)`. The time step
//! used here is `dt = 0.5 dx² / D`, which is that limit exactly (`r = 1/2`):
//! the `0.5` is part of the limit, not a margin below it. Any larger `dt`
//! grows oscillations without bound.
//!
//! # Snapshot semantics
//!
//! Every new value is computed from the values of the *previous* step. The
//! kernel reads an immutable slice and writes into a second buffer; the two
//! buffers are swapped after each step. A sequential in-place sweep would
//! read already-updated left neighbours and is a different (wrong) scheme.

use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{DiffusionError, Result};
use crate::physics::{build_grid, initial_profile, ConcentrationField, Grid, ModelParameters};
use crate::solver::{validate_field, SimulationResult, SolverConfiguration};
use ndarray::{Array2, ArrayView1};

/// Largest Fourier number for which the scheme is stable
pub const STABILITY_LIMIT: f64 = 0.5;

// Allowance for rounding in `D * dt / dx²` when `dt` is the stable step.
const STABILITY_TOLERANCE: f64 = 1e-12;

// =================================================================================================
// Free functions
// =================================================================================================

/// Stable time step `dt = 0.5 * dx² / D`
///
/// # Errors
///
/// [`InvalidParameter`](DiffusionError::InvalidParameter) when `D` or `dx` is
/// non-positive or non-finite.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::stable_time_step;
///
/// let dt = stable_time_step(110.0, 0.5).unwrap();
/// assert_eq!(dt, 0.5 * 0.5 * 0.5 / 110.0);
/// ```
pub fn stable_time_step(diffusivity: f64, spacing: f64) -> Result<f64> {
    if !diffusivity.is_finite() || diffusivity <= 0.0 {
        return Err(DiffusionError::invalid("D", diffusivity, "diffusivity must be positive and finite"));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(DiffusionError::invalid("dx", spacing, "grid spacing must be positive and finite"));
    }

    Ok(0.5 * spacing * spacing / diffusivity)
}

/// Fourier number `r = D dt / dx²`
pub fn fourier_number(diffusivity: f64, dt: f64, spacing: f64) -> f64 {
    diffusivity * dt / (spacing * spacing)
}

/// Advance `field` by one FTCS step, in place
///
/// Boundary values are left untouched. A field shorter than three points has
/// no interior and is returned unchanged.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::physics::ConcentrationField;
/// use diffusion_rs::solver::step;
///
/// let mut field = ConcentrationField::from_vec(vec![1.0, 1.0, 0.0, 0.0]);
/// step(&mut field, 1.0, 0.5, 1.0);   // r = 0.5
/// assert_eq!(field.as_slice(), &[1.0, 0.5, 0.5, 0.0]);
/// ```
pub fn step(field: &mut ConcentrationField, diffusivity: f64, dt: f64, spacing: f64) {
    run(field, diffusivity, dt, spacing, 1);
}

/// Advance `field` by `steps` FTCS steps, in place
///
/// Steps are applied strictly one after the other; there is no early exit and
/// no convergence check. No copy of the starting profile is kept: clone the
/// field first when it is still needed.
pub fn run(field: &mut ConcentrationField, diffusivity: f64, dt: f64, spacing: f64, steps: usize) {
    if steps == 0 || field.len() < 3 {
        return;
    }

    let r = fourier_number(diffusivity, dt, spacing);
    if r > STABILITY_LIMIT + STABILITY_TOLERANCE {
        log::warn!("Fourier number {r} exceeds the FTCS stability limit {STABILITY_LIMIT}");
    }

    let mut scratch = field.as_vector().clone();
    for _ in 0..steps {
        advance_once(field, &mut scratch, r);
    }
}

/// One step: compute into `scratch` from `field`, then swap the buffers
///
/// `scratch` must have the same length and the same boundary values as
/// `field`; both hold after every swap since boundaries are never written.
fn advance_once(field: &mut ConcentrationField, scratch: &mut DVector<f64>, r: f64) {
    ftcs_kernel(field.as_slice(), scratch.as_mut_slice(), r);
    field.swap_values(scratch);
}

/// Write the interior update of `old` into `new`
fn ftcs_kernel(old: &[f64], new: &mut [f64], r: f64) {
    let n = old.len();
    if n < 3 {
        return;
    }

    let interior = &mut new[1..n - 1];

    #[cfg(feature = "parallel")]
    {
        if interior.len() > crate::solver::parallel_threshold() {
            interior
                .par_iter_mut()
                .zip(old.par_windows(3))
                .for_each(|(out, w)| *out = w[1] + r * (w[0] - 2.0 * w[1] + w[2]));
            return;
        }
    }

    for (out, w) in interior.iter_mut().zip(old.windows(3)) {
        *out = w[1] + r * (w[0] - 2.0 * w[1] + w[2]);
    }
}

// =================================================================================================
// Diffusion Solver
// =================================================================================================

/// Stateful FTCS solver for one diffusion run
///
/// Owns the grid, the evolving field, a scratch buffer for double buffering,
/// and a copy of the initial profile. The step counter runs from `0` to
/// `nt` and never goes back.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::physics::ModelParameters;
/// use diffusion_rs::solver::{DiffusionSolver, SolverConfiguration};
///
/// let params = ModelParameters::default().with_time_steps(100);
/// let solver = DiffusionSolver::new(params).unwrap();
/// let result = solver.solve(&SolverConfiguration::default()).unwrap();
///
/// assert_eq!(result.final_state.left_boundary(), Some(500.0));
/// assert_eq!(result.final_state.right_boundary(), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct DiffusionSolver {
    parameters: ModelParameters,
    grid: Grid,
    initial: ConcentrationField,
    field: ConcentrationField,
    scratch: DVector<f64>,
    dt: f64,
    fourier: f64,
    current_step: usize,
}

impl DiffusionSolver {
    /// Validate parameters and set up grid, initial profile and time step
    ///
    /// # Errors
    ///
    /// [`InvalidParameter`](DiffusionError::InvalidParameter) for any illegal
    /// parameter; nothing is allocated in that case.
    pub fn new(parameters: ModelParameters) -> Result<Self> {
        parameters.validate()?;

        let grid = build_grid(parameters.length, parameters.spacing)?;
        let field = initial_profile(&grid, parameters.left_value, parameters.right_value);
        let dt = stable_time_step(parameters.diffusivity, parameters.spacing)?;
        let fourier = fourier_number(parameters.diffusivity, dt, parameters.spacing);

        if grid.is_degenerate() {
            log::warn!(
                "grid has {} point(s) and no interior; all {} steps are no-ops",
                grid.len(),
                parameters.time_steps
            );
        }

        Ok(Self {
            parameters,
            scratch: field.as_vector().clone(),
            initial: field.clone(),
            grid,
            field,
            dt,
            fourier,
            current_step: 0,
        })
    }

    /// Solver name
    pub fn name(&self) -> &'static str {
        "FTCS"
    }

    /// Model parameters
    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    /// Spatial grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current field
    pub fn field(&self) -> &ConcentrationField {
        &self.field
    }

    /// Field at `t = 0`
    pub fn initial(&self) -> &ConcentrationField {
        &self.initial
    }

    /// Time step `dt`
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Fourier number `r = D dt / dx²`
    pub fn fourier_number(&self) -> f64 {
        self.fourier
    }

    /// Number of steps taken so far
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Simulated time `current_step * dt`
    pub fn current_time(&self) -> f64 {
        self.current_step as f64 * self.dt
    }

    /// Steps left before `nt` is reached
    pub fn remaining_steps(&self) -> usize {
        self.parameters.time_steps - self.current_step
    }

    /// True once `nt` steps have been taken
    pub fn is_finished(&self) -> bool {
        self.current_step >= self.parameters.time_steps
    }

    /// Take one step; returns false when `nt` was already reached
    pub fn step(&mut self) -> bool {
        self.advance(1) == 1
    }

    /// Take up to `steps` steps, never past `nt`; returns the number taken
    pub fn advance(&mut self, steps: usize) -> usize {
        let taken = steps.min(self.remaining_steps());
        for _ in 0..taken {
            advance_once(&mut self.field, &mut self.scratch, self.fourier);
        }
        self.current_step += taken;
        taken
    }

    /// Run the remaining steps and collect the result
    ///
    /// # Errors
    ///
    /// - [`InvalidParameter`](DiffusionError::InvalidParameter) for an invalid
    ///   configuration (checked before stepping)
    /// - [`NumericalInstability`](DiffusionError::NumericalInstability) when
    ///   `check_finite` is set and a NaN/Inf appears
    pub fn solve(mut self, config: &SolverConfiguration) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        config.validate()?;

        // ====== Step 2: Setup ======

        let total = self.parameters.time_steps;
        let recorded: Vec<usize> = (self.current_step..=total)
            .filter(|&s| config.records(s, total) || s == self.current_step)
            .collect();

        let mut trajectory = Array2::zeros((recorded.len(), self.grid.len()));
        let mut next_row = 0;

        log::info!(
            "{}: {} points, dt = {:.6e}, r = {}, {} steps from step {}",
            self.name(),
            self.grid.len(),
            self.dt,
            self.fourier,
            self.remaining_steps(),
            self.current_step
        );

        // ====== Step 3: Time Integration ======

        loop {
            if recorded.get(next_row) == Some(&self.current_step) {
                trajectory
                    .row_mut(next_row)
                    .assign(&ArrayView1::from(self.field.as_slice()));
                log::debug!("snapshot {} at step {}", next_row, self.current_step);
                next_row += 1;
            }

            if self.is_finished() {
                break;
            }

            self.advance(1);

            if config.check_finite {
                validate_field(&self.field, self.current_step)?;
            }
        }

        log::debug!("{} finished after {} steps", self.name(), self.current_step);

        // ====== Step 4: Build Result ======

        let name = self.name();
        let points = self.grid.len();
        let mut result = SimulationResult::new(
            self.parameters,
            self.grid,
            self.initial,
            self.field,
            self.dt,
            recorded,
            trajectory,
        );

        result.add_metadata("solver", name);
        result.add_metadata("time steps", &total.to_string());
        result.add_metadata("dt", &self.dt.to_string());
        result.add_metadata("fourier number", &self.fourier.to_string());
        result.add_metadata("grid points", &points.to_string());

        Ok(result)
    }
}

/// Build a solver from `parameters` and run it to completion
///
/// # Example
///
/// ```rust
/// use diffusion_rs::physics::ModelParameters;
/// use diffusion_rs::solver::{simulate, SolverConfiguration};
///
/// let result = simulate(ModelParameters::default().with_time_steps(10), &SolverConfiguration::default()).unwrap();
/// assert_eq!(result.steps(), 10);
/// ```
pub fn simulate(parameters: ModelParameters, config: &SolverConfiguration) -> Result<SimulationResult> {
    DiffusionSolver::new(parameters)?.solve(config)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn small_parameters(steps: usize) -> ModelParameters {
        ModelParameters::default()
            .with_diffusivity(1.0)
            .with_length(10.0)
            .with_spacing(1.0)
            .with_time_steps(steps)
            .with_boundaries(10.0, 0.0)
    }

    // ====== Time step ======

    #[test]
    fn test_stable_time_step_reference() {
        let dt = stable_time_step(110.0, 0.5).unwrap();
        assert_eq!(dt, 0.5 * 0.5 * 0.5 / 110.0);
        assert!((dt - 0.001_136_363_6).abs() < 1e-9);
    }

    #[test]
    fn test_stable_time_step_scaling() {
        let base = stable_time_step(2.0, 0.1).unwrap();
        let half_d = stable_time_step(4.0, 0.1).unwrap();
        let double_dx = stable_time_step(2.0, 0.2).unwrap();

        assert!((half_d - base / 2.0).abs() < 1e-15);
        assert!((double_dx - base * 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_stable_time_step_invalid() {
        assert!(stable_time_step(0.0, 0.5).unwrap_err().is_invalid_parameter());
        assert!(stable_time_step(-1.0, 0.5).unwrap_err().is_invalid_parameter());
        assert!(stable_time_step(1.0, 0.0).unwrap_err().is_invalid_parameter());
        assert!(stable_time_step(1.0, -0.5).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_stable_step_sits_on_limit() {
        let dt = stable_time_step(110.0, 0.5).unwrap();
        let r = fourier_number(110.0, dt, 0.5);
        assert!((r - STABILITY_LIMIT).abs() < STABILITY_TOLERANCE);
    }

    // ====== Single step ======

    #[test]
    fn test_step_reads_previous_values_only() {
        // With r = 0.5 each interior value becomes the mean of its old neighbours.
        // A sequential in-place sweep would give [4, 2, 1, 0.5, 0] instead.
        let mut field = ConcentrationField::from_vec(vec![4.0, 0.0, 0.0, 0.0, 0.0]);
        step(&mut field, 1.0, 0.5, 1.0);
        assert_eq!(field.as_slice(), &[4.0, 2.0, 0.0, 0.0, 0.0]);

        step(&mut field, 1.0, 0.5, 1.0);
        assert_eq!(field.as_slice(), &[4.0, 2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_step_general_coefficient() {
        let mut field = ConcentrationField::from_vec(vec![1.0, 3.0, 2.0]);
        // r = 2 * 0.1 / 1 = 0.2 -> 3 + 0.2 * (1 - 6 + 2) = 2.4
        step(&mut field, 2.0, 0.1, 1.0);
        assert!((field.as_slice()[1] - 2.4).abs() < 1e-12);
        assert_eq!(field.as_slice()[0], 1.0);
        assert_eq!(field.as_slice()[2], 2.0);
    }

    #[test]
    fn test_step_on_degenerate_field_is_noop() {
        let mut field = ConcentrationField::from_vec(vec![1.0, 0.0]);
        step(&mut field, 1.0, 0.5, 1.0);
        assert_eq!(field.as_slice(), &[1.0, 0.0]);

        let mut single = ConcentrationField::from_vec(vec![7.0]);
        run(&mut single, 1.0, 0.5, 1.0, 10);
        assert_eq!(single.as_slice(), &[7.0]);
    }

    #[test]
    fn test_run_zero_steps_is_identity() {
        let mut field = ConcentrationField::from_vec(vec![5.0, 1.0, 3.0, 0.0]);
        let before = field.clone();
        run(&mut field, 1.0, 0.5, 1.0, 0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_run_equals_repeated_steps() {
        let mut a = ConcentrationField::from_vec(vec![9.0, 1.0, 4.0, 2.0, 8.0, 0.0]);
        let mut b = a.clone();

        run(&mut a, 1.3, 0.2, 0.9, 7);
        for _ in 0..7 {
            step(&mut b, 1.3, 0.2, 0.9);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_field_is_steady() {
        let mut field = ConcentrationField::from_vec(vec![3.0; 20]);
        run(&mut field, 1.0, 0.5, 1.0, 50);
        assert!(field.as_slice().iter().all(|&c| c == 3.0));
    }

    // ====== Diffusion Solver ======

    #[test]
    fn test_solver_setup() {
        let solver = DiffusionSolver::new(ModelParameters::default()).unwrap();
        assert_eq!(solver.grid().len(), 600);
        assert_eq!(solver.dt(), 0.5 * 0.25 / 110.0);
        assert_eq!(solver.current_step(), 0);
        assert_eq!(solver.remaining_steps(), 5000);
        assert_eq!(solver.field(), solver.initial());
        assert_eq!(solver.name(), "FTCS");
    }

    #[test]
    fn test_solver_rejects_invalid_parameters() {
        let err = DiffusionSolver::new(ModelParameters::default().with_diffusivity(0.0)).unwrap_err();
        assert!(err.is_invalid_parameter());

        let err = DiffusionSolver::new(ModelParameters::default().with_spacing(-0.5)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_solver_stops_at_time_steps() {
        let mut solver = DiffusionSolver::new(small_parameters(3)).unwrap();
        assert!(solver.step());
        assert_eq!(solver.advance(10), 2);
        assert!(solver.is_finished());
        assert!(!solver.step());
        assert_eq!(solver.current_step(), 3);
        assert!((solver.current_time() - 3.0 * solver.dt()).abs() < 1e-15);
    }

    #[test]
    fn test_solver_matches_free_functions() {
        let params = small_parameters(25);
        let mut solver = DiffusionSolver::new(params).unwrap();
        solver.advance(25);

        let grid = build_grid(params.length, params.spacing).unwrap();
        let mut field = initial_profile(&grid, params.left_value, params.right_value);
        let dt = stable_time_step(params.diffusivity, params.spacing).unwrap();
        run(&mut field, params.diffusivity, dt, params.spacing, params.time_steps);

        assert_eq!(solver.field(), &field);
    }

    #[test]
    fn test_solve_keeps_initial_and_final_distinct() {
        let result = DiffusionSolver::new(small_parameters(10))
            .unwrap()
            .solve(&SolverConfiguration::default())
            .unwrap();

        assert_ne!(result.initial, result.final_state);
        assert_eq!(result.initial.transitions(), 1);
        assert_eq!(result.snapshot_steps, vec![0, 10]);
        assert_eq!(result.trajectory.nrows(), 2);
        assert_eq!(result.get_metadata("solver"), Some("FTCS"));
        assert_eq!(result.get_metadata("time steps"), Some("10"));
    }

    #[test]
    fn test_solve_records_snapshots() {
        let result = DiffusionSolver::new(small_parameters(10))
            .unwrap()
            .solve(&SolverConfiguration::default().with_snapshots(3))
            .unwrap();

        assert_eq!(result.snapshot_steps, vec![0, 3, 6, 9, 10]);
        assert_eq!(result.trajectory.nrows(), 5);
        assert_eq!(result.snapshot(0).unwrap().to_vec(), result.initial.to_vec());
        assert_eq!(result.snapshot(4).unwrap().to_vec(), result.final_state.to_vec());
    }

    #[test]
    fn test_solve_after_partial_advance() {
        let mut solver = DiffusionSolver::new(small_parameters(6)).unwrap();
        solver.advance(4);
        let result = solver.solve(&SolverConfiguration::default()).unwrap();
        assert_eq!(result.snapshot_steps, vec![4, 6]);
        assert_eq!(result.steps(), 6);
    }

    #[test]
    fn test_solve_zero_steps() {
        let result = simulate(small_parameters(0), &SolverConfiguration::default()).unwrap();
        assert_eq!(result.initial, result.final_state);
        assert_eq!(result.snapshot_steps, vec![0]);
    }

    #[test]
    fn test_solve_rejects_zero_snapshot_interval() {
        let solver = DiffusionSolver::new(small_parameters(5)).unwrap();
        let err = solver.solve(&SolverConfiguration::default().with_snapshots(0)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_degenerate_grid_runs_as_noop() {
        let params = small_parameters(20).with_length(1.0).with_spacing(0.6);
        let result = simulate(params, &SolverConfiguration::default().with_finite_check(true)).unwrap();
        assert_eq!(result.grid.len(), 2);
        assert_eq!(result.final_state.as_slice(), &[10.0, 0.0]);
        assert_eq!(result.steps(), 20);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_step_is_bit_identical() {
        use crate::solver::ThresholdGuard;

        let params = ModelParameters::default().with_time_steps(50);

        let serial = {
            let _guard = ThresholdGuard::save(usize::MAX);
            simulate(params, &SolverConfiguration::default()).unwrap()
        };
        let parallel = {
            let _guard = ThresholdGuard::save(1);
            simulate(params, &SolverConfiguration::default()).unwrap()
        };

        assert_eq!(serial.final_state, parallel.final_state);
    }
}
