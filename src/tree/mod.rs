use alloc::boxed::Box;
use core::cmp::Ordering;
use tracing::trace;

mod balance;
mod iter;
mod node;
mod rank;

pub use iter::Iter;

use balance::rebalance;
use node::{Link, Node};

/// An order-statistic AVL tree over a multiset of ordered keys.
///
/// Every distinct key owns one node; inserting a key again only bumps that
/// node's count. Each node also tracks the number of elements in its subtree,
/// which turns rank selection and the median into a single root-to-leaf walk.
///
/// | Operation                      | Cost                 |
/// |--------------------------------|----------------------|
/// | [`insert`](Self::insert)       | `O(log d)`           |
/// | [`select`](Self::select)       | `O(log d)`           |
/// | [`find_median`](Self::find_median) | `O(log d)`       |
/// | [`size`](Self::size)           | `O(1)`               |
///
/// where `d` is the number of distinct keys.
///
/// # Type Parameters
///
/// * `K` - A totally ordered key. Floats can be stored through
///   [`ordered_float::OrderedFloat`], or through [`RunningMedian`](crate::RunningMedian).
///
/// # Examples
///
/// ```
/// # use median_tree::MedianTree;
/// let mut tree = MedianTree::new();
/// for key in [1, 1, 1, 2, 9] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.size(), 5);
/// assert_eq!(tree.distinct_count(), 3);
/// assert_eq!(tree.select(2), Ok(&1));
/// assert_eq!(tree.find_median(), Ok(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct MedianTree<K> {
    /// Root of the tree, `None` when empty
    root: Link<K>,

    /// Number of nodes, duplicates excluded
    distinct: usize,
}

impl<K> MedianTree<K> {
    /// Creates an empty tree
    pub const fn new() -> Self {
        Self {
            root: None,
            distinct: 0,
        }
    }

    /// Returns the number of inserted elements, duplicates included
    #[inline]
    pub fn size(&self) -> usize {
        node::size(&self.root)
    }

    /// Returns the number of distinct keys
    #[inline]
    pub const fn distinct_count(&self) -> usize {
        self.distinct
    }

    /// Returns `true` if nothing was inserted yet
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree, `-1` when empty and `0` for a single node
    #[inline]
    pub fn height(&self) -> i32 {
        node::height(&self.root)
    }

    /// Removes every key
    pub fn clear(&mut self) {
        self.root = None;
        self.distinct = 0;
    }

    /// Returns an in-order iterator over `(key, count)` pairs
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }
}

impl<K: Ord> MedianTree<K> {
    /// Inserts one occurrence of `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if `key` was not present before, `false` if it was
    ///   folded into an existing node
    pub fn insert(&mut self, key: K) -> bool {
        let (root, created) = insert_into(self.root.take(), key);
        self.root = Some(root);
        if created {
            self.distinct += 1;
        }
        trace!(
            created,
            size = self.size(),
            distinct = self.distinct,
            "inserted key"
        );

        #[cfg(debug_assertions)]
        debug_assert!(
            self.verify_invariants(),
            "AVL tree invariants violated after insertion"
        );

        created
    }

    /// Checks ordering, balance, size and height bookkeeping of every node
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn verify_invariants(&self) -> bool {
        let mut nodes = 0;
        let shape_ok = verify_subtree(&self.root, None, None, &mut nodes).is_some();
        shape_ok && nodes == self.distinct
    }
}

impl<K> Default for MedianTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for MedianTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for MedianTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Inserts `key` below `link` and returns the rebalanced subtree together with
/// whether a new node was created.
fn insert_into<K: Ord>(link: Link<K>, key: K) -> (Box<Node<K>>, bool) {
    let Some(mut node) = link else {
        return (Node::new(key), true);
    };

    let created = match key.cmp(&node.key) {
        Ordering::Equal => {
            node.count += 1;
            false
        }
        Ordering::Less => {
            let (left, created) = insert_into(node.left.take(), key);
            node.left = Some(left);
            created
        }
        Ordering::Greater => {
            let (right, created) = insert_into(node.right.take(), key);
            node.right = Some(right);
            created
        }
    };

    (rebalance(node), created)
}

/// Returns `(size, height)` of a valid subtree, `None` on the first violation.
///
/// `lower` and `upper` are the exclusive key bounds inherited from ancestors.
#[cfg(any(test, debug_assertions))]
fn verify_subtree<K: Ord>(
    link: &Link<K>,
    lower: Option<&K>,
    upper: Option<&K>,
    nodes: &mut usize,
) -> Option<(usize, i32)> {
    let Some(node) = link else {
        return Some((0, -1));
    };
    *nodes += 1;

    if node.count == 0
        || lower.is_some_and(|lower| node.key <= *lower)
        || upper.is_some_and(|upper| node.key >= *upper)
    {
        return None;
    }

    let (left_size, left_height) = verify_subtree(&node.left, lower, Some(&node.key), nodes)?;
    let (right_size, right_height) = verify_subtree(&node.right, Some(&node.key), upper, nodes)?;

    let size = node.count + left_size + right_size;
    let height = 1 + left_height.max(right_height);
    if (left_height - right_height).abs() > 1 || node.size != size || node.height != height {
        return None;
    }

    Some((size, height))
}
