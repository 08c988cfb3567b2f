//! Cross-trajectory summary statistics.
//!
//! [`reduce`] collapses an `(N, T)` [`TrajectoryTable`] into per-timestep
//! mean and population variance. The closed forms for a walk with bias `p`
//! after `t` steps are
//!
//! ```text
//! E[X_t]   = (2p - 1) t
//! Var[X_t] = 4 p (1 - p) t
//! ```

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::walk::TrajectoryTable;

/// Per-timestep mean and variance across trajectories.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SummaryStatistics {
    /// Mean displacement at each timestep.
    pub mean: Vec<f64>,
    /// Population variance of the displacement at each timestep.
    pub variance: Vec<f64>,
}

impl SummaryStatistics {
    /// Number of timesteps covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Returns `true` if no timesteps are covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Largest absolute gap between the sample mean and `(2p - 1) t`.
    pub fn max_mean_deviation(&self, p: f64) -> f64 {
        self.mean
            .iter()
            .enumerate()
            .map(|(column, &mean)| (mean - expected_mean(p, column + 1)).abs())
            .fold(0.0, f64::max)
    }

    /// Largest absolute gap between the sample variance and `4p(1 - p) t`.
    pub fn max_variance_deviation(&self, p: f64) -> f64 {
        self.variance
            .iter()
            .enumerate()
            .map(|(column, &variance)| (variance - expected_variance(p, column + 1)).abs())
            .fold(0.0, f64::max)
    }
}

/// Computes the mean and population variance of every column.
///
/// `mean[t] = (1/N) Σ_j x[j,t]` and `var[t] = (1/N) Σ_j x[j,t]² - mean[t]²`.
///
/// # Examples
///
/// ```rust
/// use walk_engine::stats::reduce;
/// use walk_engine::walk::run_batch;
///
/// let table = run_batch(1.0, 3, 4, 0).unwrap();
/// let summary = reduce(&table);
/// assert_eq!(summary.mean, vec![1.0, 2.0, 3.0]);
/// assert_eq!(summary.variance, vec![0.0, 0.0, 0.0]);
/// ```
pub fn reduce(table: &TrajectoryTable) -> SummaryStatistics {
    let (trajectories, steps) = table.shape();
    let mut sum = vec![0.0f64; steps];
    let mut sum_sq = vec![0.0f64; steps];

    for row in table.rows() {
        for ((total, total_sq), &value) in sum.iter_mut().zip(sum_sq.iter_mut()).zip(row) {
            let value = value as f64;
            *total += value;
            *total_sq += value * value;
        }
    }

    let n = trajectories as f64;
    let mean: Vec<f64> = sum.iter().map(|total| total / n).collect();
    let variance = sum_sq
        .iter()
        .zip(&mean)
        .map(|(total_sq, mean)| total_sq / n - mean * mean)
        .collect();

    SummaryStatistics { mean, variance }
}

/// Mean of the final column of `table`.
pub fn mean_final_displacement(table: &TrajectoryTable) -> f64 {
    let finals = table.final_displacements();
    finals.iter().map(|&d| d as f64).sum::<f64>() / finals.len() as f64
}

/// Closed-form mean displacement after `t` steps: `(2p - 1) t`.
#[inline]
pub fn expected_mean(p: f64, t: usize) -> f64 {
    (2.0 * p - 1.0) * t as f64
}

/// Closed-form displacement variance after `t` steps: `4p(1 - p) t`.
#[inline]
pub fn expected_variance(p: f64, t: usize) -> f64 {
    4.0 * p * (1.0 - p) * t as f64
}
