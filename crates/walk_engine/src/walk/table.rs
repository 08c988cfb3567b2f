//! Immutable table of displacement trajectories.
//!
//! # Memory Layout
//!
//! Displacements are stored row-major in one contiguous buffer:
//! `data[row * steps + column]`, where column `t` holds the displacement
//! after `t + 1` steps.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Displacements of a single walker at timesteps `1..=T`.
pub type Trajectory = Vec<i64>;

/// `(N, T)` table of displacements, one row per trajectory.
///
/// Produced by the engines and never mutated afterwards.
///
/// # Examples
///
/// ```rust
/// use walk_engine::walk::run_batch;
///
/// let table = run_batch(1.0, 4, 3, 0).unwrap();
/// assert_eq!(table.shape(), (3, 4));
/// assert_eq!(table.row(2), &[1, 2, 3, 4]);
/// assert_eq!(table.final_displacements(), vec![4, 4, 4]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TrajectoryTable {
    trajectories: usize,
    steps: usize,
    data: Vec<i64>,
}

impl TrajectoryTable {
    /// Wraps a row-major buffer.
    pub(crate) fn from_row_major(trajectories: usize, steps: usize, data: Vec<i64>) -> Self {
        debug_assert_eq!(data.len(), trajectories * steps);
        Self {
            trajectories,
            steps,
            data,
        }
    }

    /// Returns `(trajectories, steps)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.trajectories, self.steps)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn trajectories(&self) -> usize {
        self.trajectories
    }

    /// Returns the number of columns.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns trajectory `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= trajectories`.
    #[inline]
    pub fn row(&self, row: usize) -> &[i64] {
        assert!(
            row < self.trajectories,
            "row {row} out of range for {} trajectories",
            self.trajectories
        );
        let start = row * self.steps;
        &self.data[start..start + self.steps]
    }

    /// Iterates over rows in order.
    #[inline]
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i64]> + '_ {
        self.data.chunks_exact(self.steps)
    }

    /// Returns the displacement of `row` in `column`, if in range.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<i64> {
        if row < self.trajectories && column < self.steps {
            Some(self.data[row * self.steps + column])
        } else {
            None
        }
    }

    /// Returns the last displacement of every row.
    pub fn final_displacements(&self) -> Vec<i64> {
        self.rows().map(|row| row[row.len() - 1]).collect()
    }

    /// Returns the row-major backing buffer.
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    /// Consumes the table and returns its rows.
    pub fn into_rows(self) -> Vec<Trajectory> {
        self.data
            .chunks_exact(self.steps)
            .map(<[i64]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TrajectoryTable {
        TrajectoryTable::from_row_major(2, 3, vec![1, 0, -1, 1, 2, 3])
    }

    #[test]
    fn test_shape_and_rows() {
        let table = sample_table();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.row(0), &[1, 0, -1]);
        assert_eq!(table.row(1), &[1, 2, 3]);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_get_bounds() {
        let table = sample_table();
        assert_eq!(table.get(1, 2), Some(3));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 3), None);
    }

    #[test]
    fn test_final_displacements() {
        assert_eq!(sample_table().final_displacements(), vec![-1, 3]);
    }

    #[test]
    fn test_into_rows() {
        assert_eq!(
            sample_table().into_rows(),
            vec![vec![1, 0, -1], vec![1, 2, 3]]
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_row_out_of_range() {
        sample_table().row(5);
    }
}
