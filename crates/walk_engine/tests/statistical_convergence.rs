//! Statistical convergence of batch simulations to the closed forms.
//!
//! These are law-of-large-numbers sanity checks with tolerances of several
//! standard errors, run on fixed seeds so they are deterministic.

use approx::assert_relative_eq;
use walk_engine::stats::{expected_mean, expected_variance, mean_final_displacement, reduce};
use walk_engine::walk::run_batch;

#[test]
fn test_unbiased_mean_final_displacement_near_zero() {
    // Var[X_100] = 100, so the standard error at N = 100,000 is about 0.032.
    let table = run_batch(0.5, 100, 100_000, 42).unwrap();
    let mean = mean_final_displacement(&table);
    assert!(mean.abs() < 0.15, "mean final displacement {mean}");
}

#[test]
fn test_mean_error_shrinks_with_trajectories() {
    let seeds = [1u64, 2, 3, 4, 5, 6, 7, 8];
    let mean_abs_error = |trajectories: usize| {
        seeds
            .iter()
            .map(|&seed| {
                let table = run_batch(0.5, 100, trajectories, seed).unwrap();
                mean_final_displacement(&table).abs()
            })
            .sum::<f64>()
            / seeds.len() as f64
    };

    let small = mean_abs_error(100);
    let large = mean_abs_error(40_000);
    assert!(
        large < small,
        "error did not shrink: N=100 -> {small:.4}, N=40000 -> {large:.4}"
    );
}

#[test]
fn test_biased_walk_moments() {
    let p = 0.7;
    let steps = 100;
    let table = run_batch(p, steps, 50_000, 2024).unwrap();
    let summary = reduce(&table);

    assert_relative_eq!(
        summary.mean[steps - 1],
        expected_mean(p, steps),
        max_relative = 0.01
    );
    assert_relative_eq!(
        summary.variance[steps - 1],
        expected_variance(p, steps),
        max_relative = 0.05
    );
    // Per-timestep drift stays close to (2p - 1) t along the whole path.
    assert!(summary.max_mean_deviation(p) < 0.5);
}
