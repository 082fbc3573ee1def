use core::cmp::Ordering;

use num_traits::ToPrimitive;
use tracing::debug;

use super::{MedianTree, node};
use crate::{
    Error, Result,
    helper::{median_ranks, midpoint, quantile_rank},
};

impl<K: Ord> MedianTree<K> {
    /// Returns the key at the zero-based `rank` of the sorted multiset.
    ///
    /// Duplicates occupy a contiguous run of ranks as long as their count, so
    /// every rank inside the run resolves to the same key.
    ///
    /// # Arguments
    ///
    /// * `rank` - Zero-based position in sorted order
    ///
    /// # Returns
    ///
    /// * `Result<&K>` - The key, [`Error::EmptyStructure`] for an empty tree or
    ///   [`Error::RankOutOfRange`] when `rank >= size()`
    ///
    /// # Examples
    ///
    /// ```
    /// # use median_tree::{Error, MedianTree};
    /// let tree: MedianTree<u32> = [5, 3, 8, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.select(0), Ok(&3));
    /// assert_eq!(tree.select(1), Ok(&3));
    /// assert_eq!(tree.select(3), Ok(&8));
    /// assert_eq!(tree.select(4), Err(Error::RankOutOfRange { rank: 4, size: 4 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K> {
        let size = self.size();
        if size == 0 {
            debug!(rank, "select on empty tree");
            return Err(Error::EmptyStructure);
        }
        if rank >= size {
            debug!(rank, size, "select rank out of range");
            return Err(Error::RankOutOfRange { rank, size });
        }

        let mut current = self.root.as_deref();
        let mut remaining_rank = rank;

        while let Some(node) = current {
            let lo = node::size(&node.left);
            let hi = lo + node.count;

            if remaining_rank < lo {
                current = node.left.as_deref();
            } else if remaining_rank < hi {
                return Ok(&node.key);
            } else {
                remaining_rank -= hi;
                current = node.right.as_deref();
            }
        }

        Err(Error::RankOutOfRange { rank, size })
    }

    /// Returns the lower and upper median keys.
    ///
    /// Both keys are the same element when `size()` is odd. Works for any
    /// ordered key, numeric or not.
    pub fn median_bounds(&self) -> Result<(&K, &K)> {
        if self.is_empty() {
            debug!("median on empty tree");
            return Err(Error::EmptyStructure);
        }
        let (lo, hi) = median_ranks(self.size());
        let lower = self.select(lo)?;
        if lo == hi {
            return Ok((lower, lower));
        }
        Ok((lower, self.select(hi)?))
    }

    /// Returns the median of every inserted key, widened to `f64`.
    ///
    /// For an even number of elements this is the mean of the two middle
    /// keys.
    ///
    /// # Returns
    ///
    /// * `Result<f64>` - The median, [`Error::EmptyStructure`] for an empty tree or
    ///   [`Error::NotNumeric`] if a middle key has no `f64` representation
    ///
    /// # Examples
    ///
    /// ```
    /// # use median_tree::MedianTree;
    /// let mut tree = MedianTree::new();
    /// tree.insert(5);
    /// tree.insert(3);
    /// tree.insert(8);
    /// assert_eq!(tree.find_median(), Ok(5.0));
    ///
    /// tree.insert(3);
    /// assert_eq!(tree.find_median(), Ok(4.0));
    /// ```
    pub fn find_median(&self) -> Result<f64>
    where
        K: ToPrimitive,
    {
        if self.is_empty() {
            debug!("median on empty tree");
            return Err(Error::EmptyStructure);
        }
        let (lo_rank, hi_rank) = median_ranks(self.size());
        let lo = self.select(lo_rank)?.to_f64().ok_or(Error::NotNumeric)?;
        if lo_rank == hi_rank {
            return Ok(lo);
        }
        let hi = self.select(hi_rank)?.to_f64().ok_or(Error::NotNumeric)?;
        Ok(midpoint(lo, hi))
    }

    /// Returns the key at quantile `q` without interpolation.
    ///
    /// `q` is clamped to `[0, 1]` and the selected rank is
    /// `floor(q * (size - 1))`.
    pub fn quantile(&self, q: f64) -> Result<&K> {
        if self.is_empty() {
            debug!(q, "quantile on empty tree");
            return Err(Error::EmptyStructure);
        }
        self.select(quantile_rank(q, self.size()))
    }

    /// Returns the key at percentile `p`, see [`MedianTree::quantile`]
    pub fn percentile(&self, p: f64) -> Result<&K> {
        self.quantile(p / 100.0)
    }

    /// Returns how many times `key` was inserted
    pub fn count(&self, key: &K) -> usize {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return node.count,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        0
    }

    /// Returns `true` if `key` was inserted at least once
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.count(key) > 0
    }

    /// Returns the smallest key, `None` for an empty tree
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// Returns the largest key, `None` for an empty tree
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use ordered_float::OrderedFloat;

    const SCENARIO_A: [u32; 19] = [1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 3, 4, 4, 4, 4, 5, 5, 5, 5];

    #[test]
    fn test_select_duplicate_runs() {
        let tree: MedianTree<u32> = SCENARIO_A.into_iter().collect();

        assert_eq!(tree.size(), 19);
        for rank in 0..=6 {
            assert_eq!(tree.select(rank), Ok(&1));
        }
        for rank in 7..=9 {
            assert_eq!(tree.select(rank), Ok(&2));
        }
        assert_eq!(tree.select(10), Ok(&3));
        for rank in 11..=14 {
            assert_eq!(tree.select(rank), Ok(&4));
        }
        for rank in 15..=18 {
            assert_eq!(tree.select(rank), Ok(&5));
        }
        assert_eq!(tree.find_median(), Ok(2.0));
    }

    #[test]
    fn test_select_small_even_set() {
        let tree: MedianTree<i32> = [5, 3, 8, 3].into_iter().collect();

        assert_eq!(tree.size(), 4);
        assert_eq!(tree.select(0), Ok(&3));
        assert_eq!(tree.select(1), Ok(&3));
        assert_eq!(tree.select(2), Ok(&5));
        assert_eq!(tree.select(3), Ok(&8));
        assert_eq!(tree.median_bounds(), Ok((&3, &5)));
        assert_eq!(tree.find_median(), Ok(4.0));
    }

    #[test]
    fn test_empty_tree_queries() {
        let tree = MedianTree::<i64>::new();

        assert_eq!(tree.select(0), Err(Error::EmptyStructure));
        assert_eq!(tree.find_median(), Err(Error::EmptyStructure));
        assert_eq!(tree.median_bounds(), Err(Error::EmptyStructure));
        assert_eq!(tree.quantile(0.5), Err(Error::EmptyStructure));
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert_eq!(tree.count(&1), 0);
    }

    #[test]
    fn test_single_element() {
        let mut tree = MedianTree::new();
        tree.insert(7u8);

        assert_eq!(tree.size(), 1);
        assert_eq!(tree.select(0), Ok(&7));
        assert_eq!(tree.find_median(), Ok(7.0));
        assert_eq!(tree.median_bounds(), Ok((&7, &7)));
    }

    #[test]
    fn test_select_out_of_range() {
        let tree: MedianTree<i32> = [4, 1, 9].into_iter().collect();

        assert_eq!(
            tree.select(tree.size()),
            Err(Error::RankOutOfRange { rank: 3, size: 3 })
        );
        assert_eq!(
            tree.select(usize::MAX),
            Err(Error::RankOutOfRange {
                rank: usize::MAX,
                size: 3
            })
        );
    }

    #[test]
    fn test_select_is_idempotent() {
        let tree: MedianTree<i32> = (0..100).map(|i| (i * 37) % 17).collect();
        for rank in 0..tree.size() {
            assert_eq!(tree.select(rank), tree.select(rank));
        }
    }

    #[test]
    fn test_median_of_floats() {
        let tree: MedianTree<OrderedFloat<f64>> = [0.1, 0.2, 0.4, 0.3]
            .into_iter()
            .map(OrderedFloat)
            .collect();

        assert_approx_eq!(tree.find_median().unwrap(), 0.25);
    }

    #[test]
    fn test_median_of_largest_floats() {
        let tree: MedianTree<OrderedFloat<f64>> = [f64::MAX, f64::MAX, 1.0]
            .into_iter()
            .map(OrderedFloat)
            .collect();
        assert_eq!(tree.find_median(), Ok(f64::MAX));

        let tree: MedianTree<OrderedFloat<f64>> = [f64::MAX, f64::MAX]
            .into_iter()
            .map(OrderedFloat)
            .collect();
        assert_eq!(tree.find_median(), Ok(f64::MAX));
    }

    #[test]
    fn test_median_odd_count_uses_middle_key() {
        let tiny = f64::from_bits(1);
        let tree: MedianTree<OrderedFloat<f64>> = [0.0, tiny, 1.0]
            .into_iter()
            .map(OrderedFloat)
            .collect();
        assert_eq!(tree.find_median(), Ok(tiny));

        let tree: MedianTree<u64> = (1..=7).collect();
        assert_eq!(tree.median_bounds(), Ok((&4, &4)));
        assert_eq!(tree.find_median(), Ok(4.0));
    }

    #[test]
    fn test_median_of_non_numeric_keys() {
        let tree: MedianTree<&str> = ["pear", "apple", "fig", "kiwi"].into_iter().collect();
        assert_eq!(tree.median_bounds(), Ok((&"fig", &"kiwi")));
    }

    #[test]
    fn test_median_widens_large_integers() {
        let tree: MedianTree<u64> = [u64::MAX, u64::MAX - 2].into_iter().collect();
        assert!(tree.find_median().unwrap() > 1.8e19);
    }

    #[test]
    fn test_quantiles() {
        let tree: MedianTree<i32> = (0..100).collect();

        assert_eq!(tree.quantile(0.0), Ok(&0));
        assert_eq!(tree.quantile(1.0), Ok(&99));
        assert_eq!(tree.quantile(0.5), Ok(&49));
        assert_eq!(tree.quantile(0.99), Ok(&98));
        assert_eq!(tree.quantile(0.123), Ok(&12));
        assert_eq!(tree.quantile(-5.0), Ok(&0));
        assert_eq!(tree.quantile(f64::NAN), Ok(&0));
        assert_eq!(tree.percentile(50.0), Ok(&49));
        assert_eq!(tree.percentile(150.0), Ok(&99));
    }

    #[test]
    fn test_quantiles_with_duplicates() {
        let tree: MedianTree<i32> = [1, 2, 2, 2, 5].into_iter().collect();

        assert_eq!(tree.quantile(0.0), Ok(&1));
        assert_eq!(tree.quantile(0.5), Ok(&2));
        assert_eq!(tree.quantile(1.0), Ok(&5));
    }

    #[test]
    fn test_count_min_max() {
        let tree: MedianTree<i32> = SCENARIO_A.iter().map(|&k| k as i32).collect();

        assert_eq!(tree.count(&1), 7);
        assert_eq!(tree.count(&3), 1);
        assert_eq!(tree.count(&6), 0);
        assert!(tree.contains(&4));
        assert!(!tree.contains(&0));
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&5));
    }
}
