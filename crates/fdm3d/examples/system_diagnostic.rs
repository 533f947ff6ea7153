//! Assemble a Laplacian system and print stencil diagnostics.
//!
//! Usage: cargo run --example system_diagnostic -- [W H D] [policy.json]
//!
//! Set RUST_LOG=debug to see resize/assembly logging.

use std::path::Path;

use fdm3d::fdm::{dot, l2_norm, mvm, residual};
use fdm3d::{
    BoundaryPolicy, FdmLinearSystem3, FdmVector3, SystemAssembler, UVec3, Vec3,
    VertexCenteredScalarGrid3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let resolution = if args.len() >= 3 {
        UVec3::new(args[0].parse()?, args[1].parse()?, args[2].parse()?)
    } else {
        UVec3::new(16, 12, 8)
    };
    let policy = match args.get(3) {
        Some(path) => BoundaryPolicy::load_json(Path::new(path))?,
        None => BoundaryPolicy::default(),
    };

    println!("=== FDM SYSTEM DIAGNOSTIC ===\n");

    let grid = VertexCenteredScalarGrid3::builder()
        .with_resolution(resolution)
        .with_grid_spacing(Vec3::splat(0.1))
        .build()?;
    println!(
        "Grid: {} ({} cells, {} vertex samples)",
        grid.type_name(),
        resolution,
        grid.data_size()
    );
    println!("Policy: {:?}\n", policy);

    let mut system = FdmLinearSystem3::default();
    SystemAssembler::new(policy).assemble(&mut system, grid.resolution())?;

    // Diagonal histogram: 3 (corner) .. 6 (interior)
    let mut histogram = [0usize; 7];
    for row in system.a.as_slice() {
        histogram[row.center as usize] += 1;
    }
    for (neighbors, count) in histogram.iter().enumerate().filter(|(_, count)| **count > 0) {
        println!("  rows with {} neighbors: {}", neighbors, count);
    }

    let rhs_sum: f32 = system.b.as_slice().iter().sum();
    println!("\nRHS: sum = {:.3}, |b| = {:.3}", rhs_sum, l2_norm(&system.b));

    let ones = FdmVector3::new(system.a.size(), 1.0);
    let row_sum = l2_norm(&mvm(&system.a, &ones)?);
    println!("|A * 1| = {:.3e} (expect 0)", row_sum);

    let mut u = FdmVector3::new(system.a.size(), 0.0);
    u.par_for_each_mut(|i, j, k, x| {
        *x = (i as f32 * 0.3).sin() + (j as f32 * 0.7).cos() + k as f32 * 0.1;
    });
    let au_u = dot(&mvm(&system.a, &u)?, &u)?;
    println!("<Au, u> = {:.3} (expect >= 0)", au_u);

    let r = residual(&system.a, &system.x, &system.b)?;
    println!("Initial residual |b - Ax| = {:.3}", l2_norm(&r));

    Ok(())
}
