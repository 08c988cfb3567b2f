//! Error types for the random walk engines.
//!
//! Parameter validation failures are reported as [`DomainError`] before any
//! random draw takes place. Disagreement between two engines on identical
//! inputs is reported as [`ConsistencyError`].

use thiserror::Error;

/// Invalid walk parameters.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DomainError {
    /// Bias probability outside `[0, 1]` or not a number.
    #[error("Invalid bias probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Step count below 1.
    #[error("Invalid step count {0}: must be at least 1")]
    InvalidStepCount(usize),

    /// Trajectory count below 1.
    #[error("Invalid trajectory count {0}: must be at least 1")]
    InvalidTrajectoryCount(usize),

    /// `trajectories × steps` does not fit in memory addressing.
    #[error("Trajectory table of {trajectories} x {steps} exceeds the addressable size")]
    TableTooLarge {
        /// Requested trajectory count.
        trajectories: usize,
        /// Requested step count.
        steps: usize,
    },

    /// Required parameter missing from a builder.
    #[error("Missing parameter '{0}'")]
    MissingParameter(&'static str),

    /// Consistency tolerance negative, infinite or not a number.
    #[error("Invalid tolerance {0}: must be finite and non-negative")]
    InvalidTolerance(f64),
}

/// Two engines produced different trajectories for identical inputs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConsistencyError {
    /// Same shape, different displacement at some timestep.
    #[error(
        "{reference} and {candidate} diverge at timestep {timestep} \
         (p={p}, steps={steps}, seed={seed}): {expected} != {actual}"
    )]
    Diverged {
        /// Name of the reference engine.
        reference: &'static str,
        /// Name of the engine under test.
        candidate: &'static str,
        /// Bias probability of the failing case.
        p: f64,
        /// Step count of the failing case.
        steps: usize,
        /// Seed of the failing case.
        seed: u64,
        /// 1-based timestep of the first disagreement.
        timestep: usize,
        /// Displacement from the reference engine.
        expected: i64,
        /// Displacement from the engine under test.
        actual: i64,
    },

    /// Output shapes differ, so no element-wise comparison was made.
    #[error(
        "{reference} and {candidate} return different shapes \
         (p={p}, seed={seed}): {expected_shape:?} != {actual_shape:?} (trajectories, steps)"
    )]
    ShapeMismatch {
        /// Name of the reference engine.
        reference: &'static str,
        /// Name of the engine under test.
        candidate: &'static str,
        /// Bias probability of the failing case.
        p: f64,
        /// Seed of the failing case.
        seed: u64,
        /// `(trajectories, steps)` of the reference output.
        expected_shape: (usize, usize),
        /// `(trajectories, steps)` of the output under test.
        actual_shape: (usize, usize),
    },
}

/// Umbrella error for walk engine operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WalkError {
    /// Invalid parameters.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Engines disagree.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::InvalidProbability(1.5);
        assert!(err.to_string().contains("Invalid bias probability 1.5"));

        let err = DomainError::InvalidStepCount(0);
        assert!(err.to_string().contains("Invalid step count 0"));

        let err = DomainError::TableTooLarge {
            trajectories: usize::MAX,
            steps: 2,
        };
        assert!(err.to_string().contains("exceeds the addressable size"));
    }

    #[test]
    fn test_consistency_error_display() {
        let err = ConsistencyError::Diverged {
            reference: "scalar",
            candidate: "vectorized",
            p: 0.5,
            steps: 10,
            seed: 7,
            timestep: 3,
            expected: 1,
            actual: -1,
        };
        let message = err.to_string();
        assert!(message.contains("scalar and vectorized diverge at timestep 3"));
        assert!(message.contains("seed=7"));

        let err = ConsistencyError::ShapeMismatch {
            reference: "batch",
            candidate: "scalar",
            p: 0.5,
            seed: 7,
            expected_shape: (3, 10),
            actual_shape: (2, 10),
        };
        let message = err.to_string();
        assert!(message.contains("return different shapes"));
        assert!(message.contains("(3, 10) != (2, 10)"));
        assert!(!message.contains("diverge"));
    }

    #[test]
    fn test_invalid_tolerance_display() {
        let err = DomainError::InvalidTolerance(f64::NAN);
        assert!(err.to_string().contains("Invalid tolerance NaN"));
    }

    #[test]
    fn test_walk_error_from() {
        let err: WalkError = DomainError::InvalidTrajectoryCount(0).into();
        assert!(matches!(
            err,
            WalkError::Domain(DomainError::InvalidTrajectoryCount(0))
        ));
    }
}
