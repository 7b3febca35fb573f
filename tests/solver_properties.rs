//! Property tests for the FTCS solver
//!
//! Random but legal parameters; every property must hold for all of them.

use diffusion_rs::physics::{build_grid, initial_profile, ModelParameters};
use diffusion_rs::solver::{fourier_number, stable_time_step, DiffusionSolver, SolverConfiguration};
use proptest::prelude::*;

mod common;
use common::max_abs_difference;

/// Legal parameters on grids of 3 to ~150 points
fn arb_parameters() -> impl Strategy<Value = ModelParameters> {
    (
        0.1f64..200.0,     // D
        0.05f64..2.0,      // dx
        2.5f64..150.0,     // LX / dx
        0usize..300,       // nt
        -1000.0f64..1000.0, // C_left
        -1000.0f64..1000.0, // C_right
    )
        .prop_map(|(d, dx, cells, nt, left, right)| {
            ModelParameters::default()
                .with_diffusivity(d)
                .with_spacing(dx)
                .with_length(dx * cells)
                .with_time_steps(nt)
                .with_boundaries(left, right)
        })
}

/// Absolute tolerance scaled to the boundary values
fn tolerance(params: &ModelParameters) -> f64 {
    1e-9 * params.left_value.abs().max(params.right_value.abs()).max(1.0)
}

proptest! {
    #[test]
    fn boundaries_never_change(params in arb_parameters()) {
        let solver = DiffusionSolver::new(params).unwrap();
        let initial = solver.field().clone();
        let result = solver.solve(&SolverConfiguration::default()).unwrap();

        prop_assert_eq!(result.final_state.left_boundary(), initial.left_boundary());
        prop_assert_eq!(result.final_state.right_boundary(), initial.right_boundary());
    }

    #[test]
    fn boundaries_and_range_hold_after_every_step(params in arb_parameters()) {
        let tol = tolerance(&params);
        let mut solver = DiffusionSolver::new(params).unwrap();
        let left = solver.field().left_boundary().unwrap();
        let right = solver.field().right_boundary().unwrap();
        let mut previous_range = solver.field().range();

        while solver.step() {
            let field = solver.field();
            prop_assert_eq!(field.left_boundary().unwrap().to_bits(), left.to_bits());
            prop_assert_eq!(field.right_boundary().unwrap().to_bits(), right.to_bits());

            let range = field.range();
            prop_assert!(
                range <= previous_range + tol,
                "range grew from {} to {} at step {}",
                previous_range,
                range,
                solver.current_step()
            );
            previous_range = range;
        }
        prop_assert_eq!(solver.current_step(), params.time_steps);
    }

    #[test]
    fn values_stay_between_boundary_values(params in arb_parameters()) {
        let lo = params.left_value.min(params.right_value);
        let hi = params.left_value.max(params.right_value);
        let tol = tolerance(&params);

        let result = DiffusionSolver::new(params)
            .unwrap()
            .solve(&SolverConfiguration::default())
            .unwrap();

        prop_assert!(result.final_state.min() >= lo - tol);
        prop_assert!(result.final_state.max() <= hi + tol);
        prop_assert!(result.final_state.range() <= result.initial.range() + tol);
    }

    #[test]
    fn decreasing_step_stays_monotone(params in arb_parameters()) {
        // Order the boundary values so the step goes down
        let left = params.left_value.max(params.right_value);
        let right = params.left_value.min(params.right_value);
        let params = params.with_boundaries(left, right);
        let tol = tolerance(&params);

        let result = DiffusionSolver::new(params)
            .unwrap()
            .solve(&SolverConfiguration::default())
            .unwrap();

        prop_assert!(result.initial.is_monotone_non_increasing(0.0));
        prop_assert!(result.final_state.is_monotone_non_increasing(tol));
    }

    #[test]
    fn initial_profile_is_a_single_step(params in arb_parameters()) {
        let grid = build_grid(params.length, params.spacing).unwrap();
        let field = initial_profile(&grid, params.left_value, params.right_value);
        let midpoint = params.length / 2.0;

        prop_assert!(field.transitions() <= 1);
        for (x, c) in grid.iter().zip(field.as_slice()) {
            let expected = if *x <= midpoint { params.left_value } else { params.right_value };
            prop_assert_eq!(*c, expected);
        }
    }

    #[test]
    fn grid_follows_arange(length in 1.0f64..500.0, cells in 1.5f64..400.0) {
        let spacing = length / cells;
        let grid = build_grid(length, spacing).unwrap();

        prop_assert_eq!(grid.len(), (length / spacing).ceil() as usize);
        prop_assert_eq!(grid.position(0), 0.0);
        for i in 0..grid.len() {
            prop_assert_eq!(grid.position(i), i as f64 * spacing);
            prop_assert!(grid.position(i) <= length);
        }
    }

    #[test]
    fn time_step_sits_at_stability_limit(d in 1e-3f64..1e3, dx in 1e-3f64..10.0) {
        let dt = stable_time_step(d, dx).unwrap();

        prop_assert!(dt > 0.0);
        prop_assert!((fourier_number(d, dt, dx) - 0.5).abs() < 1e-12);

        // dt ~ dx² / D
        let doubled_spacing = stable_time_step(d, 2.0 * dx).unwrap();
        let doubled_diffusivity = stable_time_step(2.0 * d, dx).unwrap();
        prop_assert!((doubled_spacing / dt - 4.0).abs() < 1e-12);
        prop_assert!((doubled_diffusivity / dt - 0.5).abs() < 1e-12);
    }

    #[test]
    fn runs_are_deterministic(params in arb_parameters()) {
        let config = SolverConfiguration::default();
        let a = DiffusionSolver::new(params).unwrap().solve(&config).unwrap();
        let b = DiffusionSolver::new(params).unwrap().solve(&config).unwrap();

        prop_assert_eq!(a.final_state.as_slice(), b.final_state.as_slice());
    }

    #[test]
    fn split_advance_matches_single_run(params in arb_parameters(), split in 0usize..300) {
        let split = split.min(params.time_steps);

        let mut stepped = DiffusionSolver::new(params).unwrap();
        prop_assert_eq!(stepped.advance(split), split);
        prop_assert_eq!(stepped.advance(usize::MAX), params.time_steps - split);
        prop_assert!(stepped.is_finished());

        let solved = DiffusionSolver::new(params)
            .unwrap()
            .solve(&SolverConfiguration::default())
            .unwrap();

        prop_assert_eq!(max_abs_difference(stepped.field(), &solved.final_state), 0.0);
    }
}
