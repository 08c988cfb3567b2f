//! Cross-engine consistency checks.
//!
//! The vectorised engines are only trusted after they reproduce the scalar
//! baseline on a grid of inputs that includes the boundary cases `p = 0`,
//! `p = 1` and `T = 1`.

use tracing::{trace, warn};

use crate::error::{ConsistencyError, DomainError, WalkError};
use crate::walk::{
    run_batch, run_scalar, run_vectorized_row, simulate, EngineKind, TrajectoryTable,
    WalkParameters,
};

/// Default bias grid, boundaries included.
pub const DEFAULT_PROBABILITIES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Default step-count grid, `T = 1` included.
pub const DEFAULT_STEPS: [usize; 4] = [1, 2, 10, 1_000];

/// Default seed grid.
pub const DEFAULT_SEEDS: [u64; 3] = [0, 42, 2_718_281_828];

/// Compares engines element-wise within an absolute tolerance.
///
/// Displacements are integers, so the default tolerance of zero demands
/// exact equality.
///
/// # Examples
///
/// ```rust
/// use walk_engine::ConsistencyChecker;
///
/// let checker = ConsistencyChecker::default();
/// checker.check(0.5, 100, 42).unwrap();
/// let cases = checker.check_default_grid().unwrap();
/// assert_eq!(cases, 60);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConsistencyChecker {
    tolerance: f64,
}

impl ConsistencyChecker {
    /// Creates a checker with the given absolute tolerance.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidTolerance`] if `tolerance` is negative,
    /// infinite or NaN.
    pub fn with_tolerance(tolerance: f64) -> Result<Self, DomainError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(DomainError::InvalidTolerance(tolerance));
        }
        Ok(Self { tolerance })
    }

    /// Returns the absolute tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Checks the row-vectorised engine against the scalar engine.
    ///
    /// # Errors
    ///
    /// [`WalkError::Domain`] for invalid inputs, [`WalkError::Consistency`]
    /// at the first timestep where the engines differ by more than the
    /// tolerance.
    pub fn check(&self, p: f64, steps: usize, seed: u64) -> Result<(), WalkError> {
        let reference = run_scalar(p, steps, seed)?;
        let candidate = run_vectorized_row(p, steps, seed)?;
        trace!(p, steps, seed, "checking scalar against vectorized");
        self.compare("scalar", "vectorized", &reference, &candidate, p, seed)?;
        Ok(())
    }

    /// Checks the batch engine with one trajectory against the row engine.
    ///
    /// # Errors
    ///
    /// Same as [`check`](Self::check).
    pub fn check_batch(&self, p: f64, steps: usize, seed: u64) -> Result<(), WalkError> {
        let reference = run_vectorized_row(p, steps, seed)?;
        let table = run_batch(p, steps, 1, seed)?;
        trace!(p, steps, seed, "checking vectorized against batch");
        self.compare("vectorized", "batch", &reference, table.row(0), p, seed)?;
        Ok(())
    }

    /// Checks that every engine returns the batch table for `params`.
    ///
    /// # Errors
    ///
    /// [`WalkError::Consistency`] if the shapes differ, or naming the first
    /// row and timestep that differ.
    pub fn check_table(&self, params: &WalkParameters) -> Result<(), WalkError> {
        let reference = simulate(EngineKind::Batch, params);
        for kind in [EngineKind::Scalar, EngineKind::Vectorized] {
            let candidate = simulate(kind, params);
            self.compare_tables(
                EngineKind::Batch.name(),
                kind.name(),
                &reference,
                &candidate,
                params.p(),
                params.seed(),
            )?;
        }
        Ok(())
    }

    /// Runs [`check`](Self::check) and [`check_batch`](Self::check_batch)
    /// over the Cartesian product of the grids.
    ///
    /// Returns the number of `(p, T, seed)` cases checked.
    ///
    /// # Errors
    ///
    /// Stops at the first failing case.
    pub fn check_grid(
        &self,
        probabilities: &[f64],
        steps: &[usize],
        seeds: &[u64],
    ) -> Result<usize, WalkError> {
        let mut cases = 0;
        for &p in probabilities {
            for &t in steps {
                for &seed in seeds {
                    self.check(p, t, seed)?;
                    self.check_batch(p, t, seed)?;
                    cases += 1;
                }
            }
        }
        Ok(cases)
    }

    /// Runs [`check_grid`](Self::check_grid) over the default grids.
    ///
    /// # Errors
    ///
    /// Stops at the first failing case.
    pub fn check_default_grid(&self) -> Result<usize, WalkError> {
        self.check_grid(&DEFAULT_PROBABILITIES, &DEFAULT_STEPS, &DEFAULT_SEEDS)
    }

    fn compare_tables(
        &self,
        reference: &'static str,
        candidate: &'static str,
        expected: &TrajectoryTable,
        actual: &TrajectoryTable,
        p: f64,
        seed: u64,
    ) -> Result<(), ConsistencyError> {
        if expected.shape() != actual.shape() {
            let err = ConsistencyError::ShapeMismatch {
                reference,
                candidate,
                p,
                seed,
                expected_shape: expected.shape(),
                actual_shape: actual.shape(),
            };
            warn!(%err, "table shapes differ");
            return Err(err);
        }
        for (expected, actual) in expected.rows().zip(actual.rows()) {
            self.compare(reference, candidate, expected, actual, p, seed)?;
        }
        Ok(())
    }

    fn compare(
        &self,
        reference: &'static str,
        candidate: &'static str,
        expected: &[i64],
        actual: &[i64],
        p: f64,
        seed: u64,
    ) -> Result<(), ConsistencyError> {
        if expected.len() != actual.len() {
            let err = ConsistencyError::ShapeMismatch {
                reference,
                candidate,
                p,
                seed,
                expected_shape: (1, expected.len()),
                actual_shape: (1, actual.len()),
            };
            warn!(%err, "trajectory lengths differ");
            return Err(err);
        }

        let steps = expected.len();
        for (index, (&e, &a)) in expected.iter().zip(actual).enumerate() {
            // NaN never counts as within tolerance.
            let within = ((e - a) as f64).abs() <= self.tolerance;
            if !within {
                let err = ConsistencyError::Diverged {
                    reference,
                    candidate,
                    p,
                    steps,
                    seed,
                    timestep: index + 1,
                    expected: e,
                    actual: a,
                };
                warn!(%err, "engines disagree");
                return Err(err);
            }
        }
        Ok(())
    }
}
