//! # Walk Engine
//!
//! Simulation kernels for the one-dimensional biased random walk. A walker
//! starts at the origin and at each timestep moves +1 with probability `p`
//! and -1 otherwise. The crate provides three interchangeable engines that
//! all honour the same numerical contract:
//!
//! | Engine | Entry point | Work per trajectory |
//! |--------|-------------|---------------------|
//! | Scalar | [`walk::run_scalar`] | T sequential draws + T sequential additions |
//! | Row-vectorised | [`walk::run_vectorized_row`] | one batch draw + one prefix sum |
//! | Batch | [`walk::run_batch`] | one N×T draw + a prefix sum per row |
//!
//! ## Determinism
//!
//! Every engine is a pure function of `(p, T, N, seed)`. The random source is
//! an explicit [`rng::WalkRng`] handle created fresh from the seed at the
//! start of each invocation; there is no process-wide generator.
//!
//! ## Usage Example
//!
//! ```rust
//! use walk_engine::walk::{run_batch, run_scalar, run_vectorized_row};
//! use walk_engine::stats::reduce;
//!
//! let scalar = run_scalar(0.5, 100, 42).unwrap();
//! let vectorised = run_vectorized_row(0.5, 100, 42).unwrap();
//! assert_eq!(scalar, vectorised);
//!
//! let table = run_batch(0.5, 100, 1_000, 42).unwrap();
//! assert_eq!(table.shape(), (1_000, 100));
//!
//! let summary = reduce(&table);
//! assert_eq!(summary.len(), 100);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod consistency;
pub mod error;
pub mod rng;
pub mod stats;
pub mod walk;

pub use consistency::ConsistencyChecker;
pub use error::{ConsistencyError, DomainError, WalkError};
pub use rng::WalkRng;
pub use stats::SummaryStatistics;
pub use walk::{DrawOrder, EngineKind, TrajectoryTable, WalkParameters};
