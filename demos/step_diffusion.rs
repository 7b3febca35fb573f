//! Diffusion of a Concentration Step
//!
//! ∂C/∂t = D·∂²C/∂x²
//!
//! A step from C = 500 (left half) to C = 0 (right half) on [0, 300) with
//! both ends held fixed, integrated with FTCS at the stability limit.
//!
//! Writes into `<tmp>/diffusion-rs-demo/`:
//! - `initial_profile.png`, `final_profile.png`, `profiles.png`
//! - `evolution.png` (a profile every 1000 steps)
//! - `profiles.csv` (x, C_initial, C_final)
//!
//! ```bash
//! RUST_LOG=debug cargo run --example step_diffusion
//! ```

use diffusion_rs::{
    output::{
        export::{export_profiles_csv, CsvConfig},
        visualization::plot_profile_evolution,
        PlotRenderer, Renderer,
    },
    physics::ModelParameters,
    solver::{DiffusionSolver, SolverConfiguration},
};
use std::error::Error;
use std::fs;
use std::time::Instant;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== 1D Diffusion: Step Profile, Fixed Boundaries ===\n");

    let params = ModelParameters::default();
    let solver = DiffusionSolver::new(params)?;

    println!("Physical Parameters:");
    println!("  Diffusivity D: {}", params.diffusivity);
    println!("  Domain length LX: {}", params.length);
    println!("  Grid spacing dx: {}", params.spacing);
    println!("\nBoundary Conditions:");
    println!("  Left (x=0): C = {}", params.left_value);
    println!("  Right (x={}): C = {}", solver.grid().position(solver.grid().len() - 1), params.right_value);
    println!("\nSimulation:");
    println!("  Grid points: {}", solver.grid().len());
    println!("  Time step dt: {:.6e} (r = {:.3})", solver.dt(), solver.fourier_number());
    println!("  Time steps: {}", params.time_steps);
    println!("  Final time: {:.4}\n", params.time_steps as f64 * solver.dt());

    // ====== Solve ======

    println!("Solving with {}...", solver.name());
    let start = Instant::now();
    let config = SolverConfiguration::default().with_snapshots(1000);
    let result = solver.solve(&config)?;
    println!("✓ Completed in {:.3}s\n", start.elapsed().as_secs_f64());

    let last = &result.final_state;
    println!("Boundary values:");
    println!("  C(x=0) = {:.10}", last.left_boundary().unwrap_or(f64::NAN));
    println!("  C(x=L) = {:.10}", last.right_boundary().unwrap_or(f64::NAN));
    println!("\nDiagnostics:");
    println!("  Range: {:.4} (initial {:.4})", last.range(), result.initial.range());
    println!("  Total: {:.4} (initial {:.4})", last.total(params.spacing), result.initial.total(params.spacing));
    println!("  Monotone: {}", last.is_monotone_non_increasing(1e-9));

    // ====== Output ======

    let out_dir = std::env::temp_dir().join("diffusion-rs-demo");
    fs::create_dir_all(&out_dir)?;

    let mut renderer = PlotRenderer::new(&out_dir).with_overlay();
    renderer.render(&result.profile_views())?;

    let evolution = out_dir.join("evolution.png");
    plot_profile_evolution(&result, evolution.to_str().ok_or("non UTF-8 path")?, None)?;

    let csv = out_dir.join("profiles.csv");
    export_profiles_csv(
        &result,
        csv.to_str().ok_or("non UTF-8 path")?,
        Some(&CsvConfig::default().with_metadata()),
    )?;

    println!("\nFiles written:");
    for path in renderer.written().iter().chain([&evolution, &csv]) {
        println!("  {}", path.display());
    }

    Ok(())
}
