//! Check command implementation
//!
//! Runs the cross-engine consistency grid plus a full-table comparison for
//! the configured parameters.

use tracing::info;
use walk_engine::walk::WalkParameters;
use walk_engine::ConsistencyChecker;

use crate::Result;

/// Run the check command
pub fn run(params: &WalkParameters, tolerance: f64) -> Result<()> {
    info!("Checking engine consistency...");
    let checker = ConsistencyChecker::with_tolerance(tolerance)?;

    let cases = checker.check_default_grid()?;
    info!("  Grid: {} (p, T, seed) cases agree", cases);

    checker.check(params.p(), params.steps(), params.seed())?;
    checker.check_table(params)?;
    info!(
        "  Configured table: {} x {} agrees across engines",
        params.trajectories(),
        params.steps()
    );

    println!("OK: {} grid cases and the configured table agree", cases);
    Ok(())
}
