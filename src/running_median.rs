use ordered_float::{FloatCore, OrderedFloat};
use tracing::debug;

use crate::{Error, MedianTree, Result, helper::midpoint};

/// How the median of an even number of samples is reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MedianPolicy {
    /// Arithmetic mean of the two middle samples
    #[default]
    Midpoint,
    /// The smaller of the two middle samples
    Lower,
    /// The larger of the two middle samples
    Upper,
}

/// A running median over a stream of floating point samples.
///
/// Samples are kept in a [`MedianTree`] keyed by [`OrderedFloat`], so repeated
/// prices or latencies cost a counter increment instead of a new node, and
/// the median, quantiles and extremes are available after every push without
/// sorting.
///
/// Unlike a rolling statistic nothing ever leaves the set; the median covers
/// every sample pushed since creation or the last [`reset`](Self::reset).
///
/// # Type Parameters
///
/// * `T` - A floating point type, `f32` or `f64`
///
/// # Examples
///
/// ```
/// # use median_tree::RunningMedian;
/// let mut median = RunningMedian::new();
/// let inputs = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
/// let mut results = vec![];
///
/// for i in inputs {
///     median.push(i).unwrap().median().map(|v| results.push(v));
/// }
///
/// assert_eq!(&results, &[3.0, 2.0, 3.0, 2.0, 3.0, 3.5]);
/// ```
#[derive(Debug, Clone)]
pub struct RunningMedian<T> {
    /// Every sample seen so far
    tree: MedianTree<OrderedFloat<T>>,
    /// Median reporting for even sample counts
    policy: MedianPolicy,
}

impl<T: FloatCore> RunningMedian<T> {
    /// Creates an empty running median using [`MedianPolicy::Midpoint`]
    pub const fn new() -> Self {
        Self::with_policy(MedianPolicy::Midpoint)
    }

    /// Creates an empty running median with the given even-count policy
    ///
    /// # Arguments
    ///
    /// * `policy` - How to report the median of an even number of samples
    pub const fn with_policy(policy: MedianPolicy) -> Self {
        Self {
            tree: MedianTree::new(),
            policy,
        }
    }

    /// Returns the even-count policy
    pub const fn policy(&self) -> MedianPolicy {
        self.policy
    }

    /// Sets the even-count policy
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The running median
    pub const fn set_policy(&mut self, policy: MedianPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Pushes a new sample.
    ///
    /// # Arguments
    ///
    /// * `value` - The sample to add
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self>` - The running median, or [`Error::InvalidKey`] for
    ///   NaN, which has no place in the order and is not stored
    pub fn push(&mut self, value: T) -> Result<&mut Self> {
        if value.is_nan() {
            debug!("rejected NaN sample");
            return Err(Error::InvalidKey);
        }
        self.tree.insert(OrderedFloat(value));
        Ok(self)
    }

    /// Returns the median of every sample, `None` before the first push
    pub fn median(&self) -> Option<T> {
        let (lo, hi) = self.tree.median_bounds().ok()?;
        let (lo, hi) = (lo.into_inner(), hi.into_inner());
        Some(match self.policy {
            MedianPolicy::Midpoint => midpoint(lo, hi),
            MedianPolicy::Lower => lo,
            MedianPolicy::Upper => hi,
        })
    }

    /// Returns the sample at the zero-based `rank` in sorted order
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The sample, see [`MedianTree::select`] for the errors
    pub fn select(&self, rank: usize) -> Result<T> {
        self.tree.select(rank).map(|v| v.into_inner())
    }

    /// Returns the sample at quantile `q`, see [`MedianTree::quantile`]
    pub fn quantile(&self, q: f64) -> Option<T> {
        self.tree.quantile(q).ok().map(|v| v.into_inner())
    }

    /// Returns the sample at percentile `p`, see [`MedianTree::percentile`]
    pub fn percentile(&self, p: f64) -> Option<T> {
        self.quantile(p / 100.0)
    }

    /// Returns the smallest sample
    pub fn min(&self) -> Option<T> {
        self.tree.min().map(|v| v.into_inner())
    }

    /// Returns the largest sample
    pub fn max(&self) -> Option<T> {
        self.tree.max().map(|v| v.into_inner())
    }

    /// Returns the number of samples, duplicates included
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns the number of distinct samples
    pub const fn distinct_count(&self) -> usize {
        self.tree.distinct_count()
    }

    /// Returns `true` before the first push
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Forgets every sample, keeping the policy
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The running median
    pub fn reset(&mut self) -> &mut Self {
        self.tree.clear();
        self
    }

    /// Returns the underlying tree
    pub const fn as_tree(&self) -> &MedianTree<OrderedFloat<T>> {
        &self.tree
    }
}

impl<T: FloatCore> Default for RunningMedian<T> {
    fn default() -> Self {
        Self::new()
    }
}
