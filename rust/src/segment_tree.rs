//! Iterative range-sum segment tree.

use crate::error::{KeyResult, ModifyResult, TreeError};
use crate::types::{Key, SegmentTree};

impl SegmentTree {
    /// Sets position `pos` to `value` and refreshes every ancestor sum.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    pub fn update(&mut self, pos: usize, value: Key) {
        assert!(
            pos < self.n,
            "segment tree update at {} out of range for length {}",
            pos,
            self.n
        );

        let mut pos = pos + self.n;
        self.tree[pos] = value;
        while pos > 1 {
            pos /= 2;
            self.tree[pos] = self.tree[2 * pos] + self.tree[2 * pos + 1];
        }
    }

    /// Sum of the elements in the inclusive range `left..=right`. An empty
    /// range (`left > right`) sums to 0.
    ///
    /// # Panics
    ///
    /// Panics if `right >= self.len()` for a non-empty range.
    pub fn query(&self, left: usize, right: usize) -> Key {
        if left > right {
            return 0;
        }
        assert!(
            right < self.n,
            "segment tree query up to {} out of range for length {}",
            right,
            self.n
        );

        let mut sum = 0;
        let mut left = left + self.n;
        let mut right = right + self.n;
        while left <= right {
            if left % 2 == 1 {
                sum += self.tree[left];
                left += 1;
            }
            if right % 2 == 0 {
                sum += self.tree[right];
                // `right >= left >= 1` inside the loop.
                right -= 1;
            }
            left /= 2;
            right /= 2;
        }
        sum
    }

    /// Checked form of [`update`](Self::update).
    pub fn try_update(&mut self, pos: usize, value: Key) -> ModifyResult<()> {
        if pos >= self.n {
            return Err(TreeError::index_out_of_range(pos, self.n));
        }
        self.update(pos, value);
        Ok(())
    }

    /// Checked form of [`query`](Self::query).
    pub fn try_query(&self, left: usize, right: usize) -> KeyResult<Key> {
        if left <= right && right >= self.n {
            return Err(TreeError::index_out_of_range(right, self.n));
        }
        Ok(self.query(left, right))
    }

    /// Current value at `pos`, if in range.
    pub fn get(&self, pos: usize) -> Option<Key> {
        if pos < self.n {
            Some(self.tree[pos + self.n])
        } else {
            None
        }
    }

    /// Number of elements in the backing sequence.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}
