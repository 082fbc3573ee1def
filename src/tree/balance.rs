use alloc::boxed::Box;
use tracing::trace;

use super::node::Node;

/// Rotates `node` left around its right child and returns the new subtree root.
///
/// ```text
///     node                pivot
///    /    \              /     \
///   a    pivot   =>    node     c
///        /   \        /    \
///       b     c      a      b
/// ```
///
/// Returns `node` untouched when it has no right child.
pub(crate) fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    trace!("rotate left");

    node.right = pivot.left.take();
    node.update();

    pivot.left = Some(node);
    pivot.update();
    pivot
}

/// Mirror image of [`rotate_left`].
pub(crate) fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    trace!("rotate right");

    node.left = pivot.right.take();
    node.update();

    pivot.right = Some(node);
    pivot.update();
    pivot
}

/// Restores the AVL condition at `node` after one insertion below it.
///
/// The children must already be balanced. Recomputes the node's own
/// bookkeeping first, then performs at most one single or one double
/// rotation.
pub(crate) fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.update();
    let factor = node.balance_factor();

    if factor < -1 {
        // right-left
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        rotate_left(node)
    } else if factor > 1 {
        // left-right
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        rotate_right(node)
    } else {
        node
    }
}
