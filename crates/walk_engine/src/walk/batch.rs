//! Fully vectorised batch engine.
//!
//! The whole `(N, T)` table of outcomes is drawn in one pass, encoded in one
//! pass, and prefix-summed along each row. Rows never read each other, so
//! the per-row prefix sums can run in any order; [`run_batch_parallel`]
//! spreads them over the rayon pool.
//!
//! # Draw Order
//!
//! Under [`DrawOrder::RowMajor`] the N×T outcomes come from one generator
//! seeded once and fill the buffer row by row. The parallel variant still
//! draws that buffer sequentially and parallelises only the encode and
//! prefix-sum passes. Under [`DrawOrder::PerRowStream`] each row owns its
//! generator, so the parallel variant also draws rows concurrently.

use rayon::prelude::*;
use tracing::debug;

use super::encoder::{cumulative_sum, encode_all, encode_into};
use super::params::{DrawOrder, WalkParameters};
use super::table::TrajectoryTable;
use crate::error::DomainError;
use crate::rng::{derive_row_seed, WalkRng};

/// Simulates `trajectories` walks of `steps` steps in one batch.
///
/// Uses the row-major draw order, so row 0 equals
/// [`run_vectorized_row(p, steps, seed)`](super::run_vectorized_row).
///
/// # Errors
///
/// Returns [`DomainError`] for invalid parameters, before any draw.
///
/// # Examples
///
/// ```rust
/// use walk_engine::walk::{run_batch, run_vectorized_row};
///
/// let table = run_batch(0.5, 50, 1, 42).unwrap();
/// assert_eq!(table.row(0), run_vectorized_row(0.5, 50, 42).unwrap().as_slice());
/// ```
pub fn run_batch(
    p: f64,
    steps: usize,
    trajectories: usize,
    seed: u64,
) -> Result<TrajectoryTable, DomainError> {
    let params = WalkParameters::new(p, steps, trajectories, seed)?;
    debug!(engine = "batch", p, steps, trajectories, seed, "simulating table");
    Ok(batch_table(&params))
}

/// Batch engine honouring the draw order carried by `params`.
pub(crate) fn batch_table(params: &WalkParameters) -> TrajectoryTable {
    let steps = params.steps();
    let mut samples = vec![0u8; params.cells()];

    match params.draw_order() {
        DrawOrder::RowMajor => {
            let mut rng = WalkRng::from_seed(params.seed());
            rng.fill(params.coin(), &mut samples);
        }
        DrawOrder::PerRowStream => {
            for (row, chunk) in samples.chunks_exact_mut(steps).enumerate() {
                WalkRng::from_seed(derive_row_seed(params.seed(), row)).fill(params.coin(), chunk);
            }
        }
    }

    let mut data = encode_all(&samples);
    for row in data.chunks_exact_mut(steps) {
        cumulative_sum(row);
    }
    TrajectoryTable::from_row_major(params.trajectories(), steps, data)
}

/// Batch engine with rows processed on the rayon pool.
///
/// Returns exactly the table of the sequential batch engine for the same
/// parameters and draw order, regardless of thread count or scheduling.
///
/// ```rust
/// use walk_engine::walk::{run_batch_parallel, simulate, DrawOrder, EngineKind, WalkParameters};
///
/// let params = WalkParameters::new(0.5, 64, 32, 3)
///     .unwrap()
///     .with_draw_order(DrawOrder::PerRowStream);
/// assert_eq!(run_batch_parallel(&params), simulate(EngineKind::Batch, &params));
/// ```
pub fn run_batch_parallel(params: &WalkParameters) -> TrajectoryTable {
    let steps = params.steps();
    let coin = *params.coin();
    let seed = params.seed();
    debug!(
        engine = "batch-parallel",
        p = params.p(),
        steps,
        trajectories = params.trajectories(),
        seed,
        order = params.draw_order().name(),
        threads = rayon::current_num_threads(),
        "simulating table"
    );

    let mut data = vec![0i64; params.cells()];
    match params.draw_order() {
        DrawOrder::RowMajor => {
            let mut samples = vec![0u8; params.cells()];
            WalkRng::from_seed(seed).fill(&coin, &mut samples);
            data.par_chunks_mut(steps)
                .zip(samples.par_chunks(steps))
                .for_each(|(row, row_samples)| {
                    encode_into(row_samples, row);
                    cumulative_sum(row);
                });
        }
        DrawOrder::PerRowStream => {
            data.par_chunks_mut(steps)
                .enumerate()
                .for_each_init(
                    || vec![0u8; steps],
                    |row_samples, (index, row)| {
                        WalkRng::from_seed(derive_row_seed(seed, index))
                            .fill(&coin, row_samples);
                        encode_into(row_samples, row);
                        cumulative_sum(row);
                    },
                );
        }
    }
    TrajectoryTable::from_row_major(params.trajectories(), steps, data)
}
