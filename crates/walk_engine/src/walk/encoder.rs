//! Step encoding and prefix sums.
//!
//! A coin outcome `v ∈ {0, 1}` becomes a step through the affine map
//! `v - 1 + max(0, v)`, i.e. `2v - 1`. The scalar and slice forms share the
//! same map, so encoding a batch equals encoding each element.
//!
//! The encoder is defined on `{0, 1}` only. Off-domain inputs trip a debug
//! assertion and are otherwise passed through the same affine map; every
//! engine goes through these functions, so the behaviour is identical
//! across engines.

/// Encodes a single outcome: `0 → -1`, `1 → +1`.
///
/// ```rust
/// use walk_engine::walk::encoder::encode;
///
/// assert_eq!(encode(0), -1);
/// assert_eq!(encode(1), 1);
/// ```
#[inline]
pub fn encode(value: u8) -> i64 {
    debug_assert!(value <= 1, "step outcome {value} outside {{0, 1}}");
    let value = i64::from(value);
    value - 1 + value.max(0)
}

/// Encodes `samples` element-wise into `steps`.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
pub fn encode_into(samples: &[u8], steps: &mut [i64]) {
    assert_eq!(samples.len(), steps.len(), "sample/step length mismatch");
    for (step, &sample) in steps.iter_mut().zip(samples) {
        *step = encode(sample);
    }
}

/// Encodes `samples` element-wise into a new vector.
#[inline]
pub fn encode_all(samples: &[u8]) -> Vec<i64> {
    samples.iter().map(|&sample| encode(sample)).collect()
}

/// Replaces `values` with its inclusive prefix sum in place.
///
/// ```rust
/// use walk_engine::walk::encoder::cumulative_sum;
///
/// let mut values = vec![1, -1, 1, 1];
/// cumulative_sum(&mut values);
/// assert_eq!(values, vec![1, 0, 1, 2]);
/// ```
#[inline]
pub fn cumulative_sum(values: &mut [i64]) {
    let mut total = 0i64;
    for value in values.iter_mut() {
        total += *value;
        *value = total;
    }
}
