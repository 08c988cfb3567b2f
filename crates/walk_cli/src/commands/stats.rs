//! Stats command implementation
//!
//! Reduces a batch simulation to per-timestep mean and variance and prints
//! them next to the closed-form expectations.

use tracing::info;
use walk_engine::stats::{mean_final_displacement, reduce};
use walk_engine::walk::{simulate, EngineKind, WalkParameters};

use crate::output::{stats_rows, write_stats, OutputFormat};
use crate::Result;

/// Number of rows reported when no stride is given
const DEFAULT_REPORT_ROWS: usize = 10;

/// Run the stats command
pub fn run(params: &WalkParameters, every: Option<usize>, format: OutputFormat) -> Result<()> {
    info!("Computing summary statistics...");

    let table = simulate(EngineKind::Batch, params);
    let summary = reduce(&table);
    let every = every.unwrap_or_else(|| (params.steps() / DEFAULT_REPORT_ROWS).max(1));
    let rows = stats_rows(&summary, params.p(), every);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_stats(&mut handle, &rows, format)?;

    info!(
        mean_final = mean_final_displacement(&table),
        max_mean_deviation = summary.max_mean_deviation(params.p()),
        max_variance_deviation = summary.max_variance_deviation(params.p()),
        "Summary complete"
    );
    Ok(())
}
