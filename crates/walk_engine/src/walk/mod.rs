//! One-dimensional biased random walk engines.
//!
//! # Architecture
//!
//! ```text
//! WalkParameters (p, T, N, seed, draw order)
//! ├── WalkRng          (fresh per invocation)
//! ├── encoder          ({0,1} → {-1,+1}, prefix sums)
//! └── Engines
//!     ├── run_scalar()          T draws, T additions
//!     ├── run_vectorized_row()  1 batch draw, 1 prefix sum
//!     ├── run_batch()           1 N×T batch draw, N row prefix sums
//!     └── run_batch_parallel()  rows on the rayon pool
//! ```
//!
//! # Numerical Contract
//!
//! For identical `(p, T, seed)` the scalar and row-vectorised engines return
//! identical trajectories. For identical `(p, T, N, seed)` and draw order,
//! [`simulate`] returns the same [`TrajectoryTable`] for every
//! [`EngineKind`]. With the default [`DrawOrder::RowMajor`], row 0 of any
//! batch equals the single-trajectory run with the same seed.

mod batch;
pub mod encoder;
mod engine;
mod params;
mod table;

pub use batch::{run_batch, run_batch_parallel};
pub use engine::{run_scalar, run_vectorized_row, simulate, EngineKind};
pub use params::{DrawOrder, WalkParameters, WalkParametersBuilder, MAX_TABLE_CELLS};
pub use table::{Trajectory, TrajectoryTable};
