use alloc::boxed::Box;

/// Owning link to a subtree, `None` for an absent child
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A node of the order-statistic tree, one per distinct key.
///
/// Duplicate insertions of `key` only bump `count`, so the number of nodes is
/// bounded by the number of distinct keys while `size` keeps counting every
/// element for rank arithmetic.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    /// The stored key
    pub(crate) key: K,

    /// Multiplicity of `key`, never zero
    pub(crate) count: usize,

    /// Elements in this subtree including duplicates
    pub(crate) size: usize,

    /// Longest path to a leaf, a leaf has height 0
    pub(crate) height: i32,

    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            count: 1,
            size: 1,
            height: 0,
            left: None,
            right: None,
        })
    }

    /// Recomputes `size` and `height` from the children.
    ///
    /// Must run whenever a child link or `count` changes.
    #[inline]
    pub(crate) fn update(&mut self) {
        self.size = self
            .count
            .saturating_add(size(&self.left))
            .saturating_add(size(&self.right));
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[inline]
    pub(crate) fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

/// Subtree size, 0 for an absent child
#[inline]
pub(crate) fn size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Subtree height, -1 for an absent child
#[inline]
pub(crate) fn height<K>(link: &Link<K>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_leaf() {
        let node = Node::new(42);
        assert_eq!(node.count, 1);
        assert_eq!(node.size, 1);
        assert_eq!(node.height, 0);
        assert_eq!(node.balance_factor(), 0);
    }

    #[test]
    fn test_update_accounts_for_duplicates() {
        let mut node = Node::new(5);
        node.left = Some(Node::new(3));
        node.count = 4;
        node.update();

        assert_eq!(node.size, 5);
        assert_eq!(node.height, 1);
        assert_eq!(node.balance_factor(), 1);
    }

    #[test]
    fn test_absent_links() {
        let link: Link<u8> = None;
        assert_eq!(size(&link), 0);
        assert_eq!(height(&link), -1);
    }
}
