//! Walk parameters and their validating builder.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::rng::Coin;

/// Largest number of cells a [`TrajectoryTable`](super::TrajectoryTable)
/// may hold before its backing `Vec<i64>` would overflow `isize`.
pub const MAX_TABLE_CELLS: usize = isize::MAX as usize / std::mem::size_of::<i64>();

/// How a batch of trajectories maps onto the random stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawOrder {
    /// One generator seeded once; all draws of row 0, then row 1, and so on.
    ///
    /// Row 0 of an N-row table equals a single-trajectory run with the same
    /// seed. Rows `j > 0` continue the same stream and do not match
    /// single-trajectory runs.
    #[default]
    RowMajor,

    /// Row `j` draws from its own generator seeded with
    /// [`derive_row_seed(seed, j)`](crate::rng::derive_row_seed).
    ///
    /// Row `j` equals a single-trajectory run seeded with the derived seed,
    /// and rows can be generated in any order or in parallel.
    PerRowStream,
}

impl DrawOrder {
    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RowMajor => "row-major",
            Self::PerRowStream => "per-row",
        }
    }
}

impl fmt::Display for DrawOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "row-major" | "row_major" | "rowmajor" => Ok(Self::RowMajor),
            "per-row" | "per_row" | "perrow" => Ok(Self::PerRowStream),
            other => Err(format!(
                "unknown draw order '{other}': expected row-major or per-row"
            )),
        }
    }
}

/// Parameters of one random walk experiment.
///
/// Immutable once built; construct through [`WalkParameters::builder`] or
/// [`WalkParameters::new`]. Holding a `WalkParameters` guarantees
/// `p ∈ [0, 1]`, at least one step, at least one trajectory, and a table
/// size that fits in memory addressing.
///
/// # Examples
///
/// ```rust
/// use walk_engine::walk::WalkParameters;
///
/// let params = WalkParameters::builder()
///     .p(0.6)
///     .steps(100)
///     .trajectories(1_000)
///     .seed(42)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.steps(), 100);
/// assert_eq!(params.cells(), 100_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkParameters {
    coin: Coin,
    steps: usize,
    trajectories: usize,
    seed: u64,
    draw_order: DrawOrder,
}

impl WalkParameters {
    /// Creates a new builder.
    #[inline]
    pub fn builder() -> WalkParametersBuilder {
        WalkParametersBuilder::default()
    }

    /// Validates and creates parameters with the row-major draw order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if `p ∉ [0, 1]`, `steps < 1`,
    /// `trajectories < 1`, or the table would be too large.
    pub fn new(p: f64, steps: usize, trajectories: usize, seed: u64) -> Result<Self, DomainError> {
        Self::builder()
            .p(p)
            .steps(steps)
            .trajectories(trajectories)
            .seed(seed)
            .build()
    }

    /// Returns the bias probability.
    #[inline]
    pub fn p(&self) -> f64 {
        self.coin.p()
    }

    /// Returns the validated coin for `p`.
    #[inline]
    pub fn coin(&self) -> &Coin {
        &self.coin
    }

    /// Returns the number of timesteps per trajectory.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the number of trajectories.
    #[inline]
    pub fn trajectories(&self) -> usize {
        self.trajectories
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the draw order.
    #[inline]
    pub fn draw_order(&self) -> DrawOrder {
        self.draw_order
    }

    /// Returns `trajectories × steps`.
    #[inline]
    pub fn cells(&self) -> usize {
        self.trajectories * self.steps
    }

    /// Returns a copy with a different draw order.
    #[inline]
    pub fn with_draw_order(mut self, draw_order: DrawOrder) -> Self {
        self.draw_order = draw_order;
        self
    }
}

/// Builder for [`WalkParameters`].
///
/// `p` and `steps` are required. `trajectories` defaults to 1, `seed` to 0
/// and the draw order to [`DrawOrder::RowMajor`].
#[derive(Clone, Debug, Default)]
pub struct WalkParametersBuilder {
    p: Option<f64>,
    steps: Option<usize>,
    trajectories: Option<usize>,
    seed: u64,
    draw_order: DrawOrder,
}

impl WalkParametersBuilder {
    /// Sets the bias probability.
    #[inline]
    pub fn p(mut self, p: f64) -> Self {
        self.p = Some(p);
        self
    }

    /// Sets the number of timesteps per trajectory.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the number of trajectories.
    #[inline]
    pub fn trajectories(mut self, trajectories: usize) -> Self {
        self.trajectories = Some(trajectories);
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the draw order.
    #[inline]
    pub fn draw_order(mut self, draw_order: DrawOrder) -> Self {
        self.draw_order = draw_order;
        self
    }

    /// Builds the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if a required value is missing or any value
    /// is out of range. Checks run in the order p, steps, trajectories,
    /// table size.
    pub fn build(self) -> Result<WalkParameters, DomainError> {
        let p = self.p.ok_or(DomainError::MissingParameter("p"))?;
        let steps = self.steps.ok_or(DomainError::MissingParameter("steps"))?;
        let trajectories = self.trajectories.unwrap_or(1);

        let coin = Coin::new(p)?;
        if steps == 0 {
            return Err(DomainError::InvalidStepCount(steps));
        }
        if trajectories == 0 {
            return Err(DomainError::InvalidTrajectoryCount(trajectories));
        }
        match trajectories.checked_mul(steps) {
            Some(cells) if cells <= MAX_TABLE_CELLS => {}
            _ => {
                return Err(DomainError::TableTooLarge {
                    trajectories,
                    steps,
                })
            }
        }

        Ok(WalkParameters {
            coin,
            steps,
            trajectories,
            seed: self.seed,
            draw_order: self.draw_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_valid() {
        let params = WalkParameters::builder()
            .p(0.25)
            .steps(50)
            .trajectories(10)
            .seed(7)
            .build()
            .unwrap();

        assert_eq!(params.p(), 0.25);
        assert_eq!(params.steps(), 50);
        assert_eq!(params.trajectories(), 10);
        assert_eq!(params.seed(), 7);
        assert_eq!(params.draw_order(), DrawOrder::RowMajor);
        assert_eq!(params.cells(), 500);
    }

    #[test]
    fn test_builder_defaults() {
        let params = WalkParameters::builder().p(0.5).steps(3).build().unwrap();
        assert_eq!(params.trajectories(), 1);
        assert_eq!(params.seed(), 0);
    }

    #[test]
    fn test_builder_missing_values() {
        assert_eq!(
            WalkParameters::builder().steps(3).build(),
            Err(DomainError::MissingParameter("p"))
        );
        assert_eq!(
            WalkParameters::builder().p(0.5).build(),
            Err(DomainError::MissingParameter("steps"))
        );
    }

    #[test]
    fn test_invalid_probability() {
        assert_eq!(
            WalkParameters::new(1.01, 10, 1, 0),
            Err(DomainError::InvalidProbability(1.01))
        );
        assert!(WalkParameters::new(f64::NAN, 10, 1, 0).is_err());
    }

    #[test]
    fn test_invalid_counts() {
        assert_eq!(
            WalkParameters::new(0.5, 0, 1, 0),
            Err(DomainError::InvalidStepCount(0))
        );
        assert_eq!(
            WalkParameters::new(0.5, 10, 0, 0),
            Err(DomainError::InvalidTrajectoryCount(0))
        );
    }

    #[test]
    fn test_table_too_large() {
        assert!(matches!(
            WalkParameters::new(0.5, usize::MAX, 2, 0),
            Err(DomainError::TableTooLarge { trajectories: 2, .. })
        ));
        assert!(matches!(
            WalkParameters::new(0.5, MAX_TABLE_CELLS + 1, 1, 0),
            Err(DomainError::TableTooLarge { .. })
        ));
    }

    #[test]
    fn test_draw_order_parse() {
        assert_eq!("row-major".parse::<DrawOrder>(), Ok(DrawOrder::RowMajor));
        assert_eq!("PER-ROW".parse::<DrawOrder>(), Ok(DrawOrder::PerRowStream));
        assert!("diagonal".parse::<DrawOrder>().is_err());
        assert_eq!(DrawOrder::PerRowStream.to_string(), "per-row");
    }
}
