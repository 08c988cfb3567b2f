//! Validated Bernoulli distribution for a single walk step.

use rand_distr::Bernoulli;

use crate::error::DomainError;

/// A biased coin: yields `1` with probability `p`, `0` otherwise.
///
/// Construction validates `p`, so every draw from a `Coin` is infallible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coin {
    p: f64,
    distribution: Bernoulli,
}

impl Coin {
    /// Creates a coin with bias `p`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidProbability`] if `p` is NaN or outside
    /// `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use walk_engine::rng::Coin;
    ///
    /// assert!(Coin::new(0.3).is_ok());
    /// assert!(Coin::new(1.2).is_err());
    /// assert!(Coin::new(f64::NAN).is_err());
    /// ```
    pub fn new(p: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DomainError::InvalidProbability(p));
        }
        let distribution = Bernoulli::new(p).map_err(|_| DomainError::InvalidProbability(p))?;
        Ok(Self { p, distribution })
    }

    /// Returns the bias probability.
    #[inline]
    pub fn p(&self) -> f64 {
        self.p
    }

    #[inline]
    pub(crate) fn distribution(&self) -> &Bernoulli {
        &self.distribution
    }
}
