//! Simulate command implementation
//!
//! Runs one engine and prints the resulting trajectory table to stdout.

use tracing::{info, warn};
use walk_engine::walk::{run_batch_parallel, simulate, EngineKind, WalkParameters};

use crate::output::{write_table, OutputFormat};
use crate::{CliError, Result};

/// Run the simulate command
pub fn run(
    params: &WalkParameters,
    engine: &str,
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    let kind: EngineKind = engine.parse().map_err(CliError::InvalidArgument)?;
    info!("Starting simulation...");
    info!("  Engine: {}", kind);

    let table = if parallel {
        if kind != EngineKind::Batch {
            warn!("--parallel only applies to the batch engine; running parallel batch");
        }
        run_batch_parallel(params)
    } else {
        simulate(kind, params)
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_table(&mut handle, &table, format)?;

    info!(
        trajectories = table.trajectories(),
        steps = table.steps(),
        "Simulation complete"
    );
    Ok(())
}
