//! Timing command implementation
//!
//! Times every engine on identical parameters and reports the speed-up over
//! the scalar baseline. Engines are verified against each other first, so
//! the comparison is between implementations of the same result.

use std::time::{Duration, Instant};

use tracing::{debug, info};
use walk_engine::walk::{run_batch_parallel, simulate, EngineKind, WalkParameters};
use walk_engine::{ConsistencyChecker, TrajectoryTable};

use crate::{CliError, Result};

/// Wall-clock measurements for one engine
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub engine: &'static str,
    pub best: Duration,
    pub mean: Duration,
}

/// Run the timing command
pub fn run(params: &WalkParameters, repeats: usize) -> Result<()> {
    let repeats = repeat_count(repeats)?;
    info!("Verifying engines before timing...");
    ConsistencyChecker::default().check_table(params)?;

    let mut timings: Vec<Timing> = EngineKind::ALL
        .iter()
        .map(|&kind| time_engine(kind.name(), repeats, || simulate(kind, params)))
        .collect();
    timings.push(time_engine("batch-parallel", repeats, || {
        run_batch_parallel(params)
    }));

    println!(
        "{:<16} {:>12} {:>12} {:>10}",
        "engine", "best (ms)", "mean (ms)", "speed-up"
    );
    let baseline = timings[0].best;
    for timing in &timings {
        println!(
            "{:<16} {:>12.3} {:>12.3} {:>9.1}x",
            timing.engine,
            millis(timing.best),
            millis(timing.mean),
            speed_up(baseline, timing.best)
        );
    }

    info!("Timing complete");
    Ok(())
}

/// Validates `repeats` as a non-zero divisor for [`Duration`]
pub fn repeat_count(repeats: usize) -> Result<u32> {
    match u32::try_from(repeats) {
        Ok(0) => Err(CliError::InvalidArgument(
            "repeats must be at least 1".to_string(),
        )),
        Ok(count) => Ok(count),
        Err(_) => Err(CliError::InvalidArgument(format!(
            "repeats must be at most {}, got {}",
            u32::MAX,
            repeats
        ))),
    }
}

/// Times `repeats` runs of `engine`
pub fn time_engine<F>(name: &'static str, repeats: u32, mut engine: F) -> Timing
where
    F: FnMut() -> TrajectoryTable,
{
    let mut best = Duration::MAX;
    let mut total = Duration::ZERO;
    for _ in 0..repeats {
        let start = Instant::now();
        let table = engine();
        let elapsed = start.elapsed();
        std::hint::black_box(&table);
        best = best.min(elapsed);
        total += elapsed;
    }
    let mean = total / repeats;
    debug!(engine = name, ?best, ?mean, "timed engine");
    Timing {
        engine: name,
        best,
        mean,
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

/// Ratio of the baseline duration to `duration`
pub fn speed_up(baseline: Duration, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs == 0.0 {
        f64::INFINITY
    } else {
        baseline.as_secs_f64() / secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_engine_runs_repeats() {
        let params = WalkParameters::new(0.5, 10, 4, 0).unwrap();
        let mut calls = 0;
        let timing = time_engine("batch", 3, || {
            calls += 1;
            simulate(EngineKind::Batch, &params)
        });
        assert_eq!(calls, 3);
        assert!(timing.best <= timing.mean);
        assert_eq!(timing.engine, "batch");
    }

    #[test]
    fn test_speed_up() {
        assert_relative_eq!(
            speed_up(Duration::from_millis(100), Duration::from_millis(4)),
            25.0
        );
        assert!(speed_up(Duration::from_millis(1), Duration::ZERO).is_infinite());
    }

    #[test]
    fn test_zero_repeats_rejected() {
        let params = WalkParameters::new(0.5, 10, 4, 0).unwrap();
        assert!(matches!(run(&params, 0), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_repeat_count_range() {
        assert_eq!(repeat_count(5).unwrap(), 5);
        assert_eq!(repeat_count(u32::MAX as usize).unwrap(), u32::MAX);
        assert!(matches!(repeat_count(0), Err(CliError::InvalidArgument(_))));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_repeats_beyond_u32_rejected() {
        // 2^32 would truncate to a zero divisor.
        let repeats = 1usize << 32;
        assert!(matches!(
            repeat_count(repeats),
            Err(CliError::InvalidArgument(_))
        ));
        let params = WalkParameters::new(0.5, 10, 4, 0).unwrap();
        assert!(matches!(
            run(&params, repeats),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
