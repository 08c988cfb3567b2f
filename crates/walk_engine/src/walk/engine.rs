//! Single-trajectory engines and engine selection.
//!
//! [`run_scalar`] is the deliberately slow baseline: one draw, one encode and
//! one addition per timestep. [`run_vectorized_row`] replaces the T
//! sequential draws with one batch draw, encodes the batch in one pass and
//! takes a prefix sum. Both consume the random stream identically, so their
//! outputs are equal element-wise for identical `(p, T, seed)`.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::batch::batch_table;
use super::encoder::{cumulative_sum, encode, encode_all};
use super::params::{DrawOrder, WalkParameters};
use super::table::{Trajectory, TrajectoryTable};
use crate::error::DomainError;
use crate::rng::{derive_row_seed, Coin, WalkRng};

/// Simulates one trajectory step by step.
///
/// # Errors
///
/// Returns [`DomainError`] for `p ∉ [0, 1]` or `steps < 1`, before any draw.
///
/// # Examples
///
/// ```rust
/// use walk_engine::walk::run_scalar;
///
/// assert_eq!(run_scalar(1.0, 5, 42).unwrap(), vec![1, 2, 3, 4, 5]);
/// assert_eq!(run_scalar(0.0, 5, 42).unwrap(), vec![-1, -2, -3, -4, -5]);
/// ```
pub fn run_scalar(p: f64, steps: usize, seed: u64) -> Result<Trajectory, DomainError> {
    let params = WalkParameters::new(p, steps, 1, seed)?;
    debug!(engine = "scalar", p, steps, seed, "simulating trajectory");
    let mut rng = WalkRng::from_seed(seed);
    Ok(scalar_trajectory(&mut rng, params.coin(), steps))
}

/// Simulates one trajectory with a single batch draw and a prefix sum.
///
/// Produces exactly the output of [`run_scalar`] for the same arguments.
///
/// # Errors
///
/// Returns [`DomainError`] for `p ∉ [0, 1]` or `steps < 1`, before any draw.
pub fn run_vectorized_row(p: f64, steps: usize, seed: u64) -> Result<Trajectory, DomainError> {
    let params = WalkParameters::new(p, steps, 1, seed)?;
    debug!(engine = "vectorized", p, steps, seed, "simulating trajectory");
    let mut rng = WalkRng::from_seed(seed);
    Ok(vectorized_trajectory(&mut rng, params.coin(), steps))
}

/// Scalar loop body: continues the stream of `rng`.
pub(crate) fn scalar_trajectory(rng: &mut WalkRng, coin: &Coin, steps: usize) -> Trajectory {
    let mut trajectory = Vec::with_capacity(steps);
    let mut position = 0i64;
    for _ in 0..steps {
        position += encode(rng.draw(coin));
        trajectory.push(position);
    }
    trajectory
}

/// Row-vectorised body: continues the stream of `rng`.
pub(crate) fn vectorized_trajectory(rng: &mut WalkRng, coin: &Coin, steps: usize) -> Trajectory {
    let mut samples = vec![0u8; steps];
    rng.fill(coin, &mut samples);
    let mut trajectory = encode_all(&samples);
    cumulative_sum(&mut trajectory);
    trajectory
}

/// Selects one of the three engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Per-step loop, repeated for each trajectory.
    Scalar,
    /// Per-trajectory batch draw + prefix sum, repeated for each trajectory.
    Vectorized,
    /// One N×T batch draw + per-row prefix sum.
    #[default]
    Batch,
}

impl EngineKind {
    /// All engines, slowest first.
    pub const ALL: [EngineKind; 3] = [Self::Scalar, Self::Vectorized, Self::Batch];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Vectorized => "vectorized",
            Self::Batch => "batch",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scalar" | "loop" => Ok(Self::Scalar),
            "vectorized" | "vectorised" | "row" => Ok(Self::Vectorized),
            "batch" => Ok(Self::Batch),
            other => Err(format!(
                "unknown engine '{other}': expected scalar, vectorized or batch"
            )),
        }
    }
}

/// Simulates a full table with the chosen engine.
///
/// The scalar and vectorised engines loop over trajectories. Under
/// [`DrawOrder::RowMajor`] they share one generator seeded once; under
/// [`DrawOrder::PerRowStream`] each row gets a fresh generator from the
/// derived row seed. Either way all three engines return the same table.
///
/// ```rust
/// use walk_engine::walk::{simulate, EngineKind, WalkParameters};
///
/// let params = WalkParameters::new(0.5, 20, 8, 11).unwrap();
/// let scalar = simulate(EngineKind::Scalar, &params);
/// let batch = simulate(EngineKind::Batch, &params);
/// assert_eq!(scalar, batch);
/// ```
pub fn simulate(kind: EngineKind, params: &WalkParameters) -> TrajectoryTable {
    debug!(
        engine = kind.name(),
        p = params.p(),
        steps = params.steps(),
        trajectories = params.trajectories(),
        seed = params.seed(),
        order = params.draw_order().name(),
        "simulating table"
    );
    match kind {
        EngineKind::Scalar => looped_table(params, scalar_trajectory),
        EngineKind::Vectorized => looped_table(params, vectorized_trajectory),
        EngineKind::Batch => batch_table(params),
    }
}

fn looped_table<F>(params: &WalkParameters, trajectory: F) -> TrajectoryTable
where
    F: Fn(&mut WalkRng, &Coin, usize) -> Trajectory,
{
    let steps = params.steps();
    let mut data = Vec::with_capacity(params.cells());
    match params.draw_order() {
        DrawOrder::RowMajor => {
            let mut rng = WalkRng::from_seed(params.seed());
            for _ in 0..params.trajectories() {
                data.extend(trajectory(&mut rng, params.coin(), steps));
            }
        }
        DrawOrder::PerRowStream => {
            for row in 0..params.trajectories() {
                let mut rng = WalkRng::from_seed(derive_row_seed(params.seed(), row));
                data.extend(trajectory(&mut rng, params.coin(), steps));
            }
        }
    }
    TrajectoryTable::from_row_major(params.trajectories(), steps, data)
}
