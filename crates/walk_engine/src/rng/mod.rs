//! # Random Number Generation
//!
//! Seeded Bernoulli draws for the walk engines.
//!
//! - **Reproducibility**: every generator is created from an explicit `u64`
//!   seed; the same seed always yields the same stream of outcomes.
//! - **Batch parity**: [`WalkRng::fill`] consumes the stream in exactly the
//!   same order as repeated calls to [`WalkRng::draw`], so a batch draw of
//!   `k` outcomes equals `k` scalar draws.
//! - **Independent streams**: [`derive_row_seed`] gives each trajectory its
//!   own seed for the per-row draw order.
//!
//! ## Usage Example
//!
//! ```rust
//! use walk_engine::rng::{Coin, WalkRng};
//!
//! let coin = Coin::new(0.5).unwrap();
//!
//! let mut scalar = WalkRng::from_seed(7);
//! let one_by_one: Vec<u8> = (0..16).map(|_| scalar.draw(&coin)).collect();
//!
//! let mut batch = WalkRng::from_seed(7);
//! let mut buffer = vec![0u8; 16];
//! batch.fill(&coin, &mut buffer);
//!
//! assert_eq!(one_by_one, buffer);
//! ```

mod coin;
mod prng;

pub use coin::Coin;
pub use prng::{derive_row_seed, WalkRng};
