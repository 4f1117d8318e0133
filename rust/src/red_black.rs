//! Red-black tree operations.
//!
//! Every leaf link, and the parent link of the root, points at the tree's own
//! BLACK sentinel. Fixup loops are written once for the left side and use
//! `Direction::opposite` for the mirror case.

use std::fmt;

use crate::arena::NodeArenaStats;
use crate::iteration::KeyIterator;
use crate::types::{Color, Direction, Key, NodeId, RbNode, RedBlackTree};

impl RedBlackTree {
    // ============================================================================
    // LINK HELPERS
    // ============================================================================

    #[inline]
    fn color(&self, node: NodeId) -> Color {
        self.nodes[node].color
    }

    #[inline]
    fn set_color(&mut self, node: NodeId, color: Color) {
        self.nodes[node].color = color;
    }

    #[inline]
    fn parent(&self, node: NodeId) -> NodeId {
        self.nodes[node].parent
    }

    #[inline]
    fn left(&self, node: NodeId) -> NodeId {
        self.nodes[node].left
    }

    #[inline]
    fn right(&self, node: NodeId) -> NodeId {
        self.nodes[node].right
    }

    #[inline]
    fn child(&self, node: NodeId, dir: Direction) -> NodeId {
        match dir {
            Direction::Left => self.left(node),
            Direction::Right => self.right(node),
        }
    }

    #[inline]
    fn set_child(&mut self, node: NodeId, dir: Direction, child: NodeId) {
        match dir {
            Direction::Left => self.nodes[node].left = child,
            Direction::Right => self.nodes[node].right = child,
        }
    }

    /// Which side of its parent `node` hangs on.
    #[inline]
    fn side_of(&self, node: NodeId) -> Direction {
        if node == self.left(self.parent(node)) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    fn data(&self, node: NodeId) -> Key {
        self.nodes[node]
            .data
            .expect("red-black sentinel carries no key")
    }

    /// Replaces `old` with `new` in `old`'s parent (or as the root).
    fn replace_in_parent(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        if parent == self.nil {
            self.root = new;
        } else if old == self.left(parent) {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
    }

    // ============================================================================
    // ROTATION
    // ============================================================================

    /// Rotates around `node`: `Direction::Left` lifts its right child,
    /// `Direction::Right` its left child. Parent links, the grandparent's
    /// child link and the root are all updated.
    ///
    /// # Panics
    ///
    /// Panics if the child being lifted is the sentinel.
    pub fn rotate(&mut self, node: NodeId, dir: Direction) {
        let pivot = self.child(node, dir.opposite());
        assert!(
            pivot != self.nil,
            "cannot rotate node {} {:?}: lifted child is NIL",
            node,
            dir
        );
        log::trace!("red-black: rotating node {} {:?} around {}", node, dir, pivot);

        let inner = self.child(pivot, dir);
        self.set_child(node, dir.opposite(), inner);
        if inner != self.nil {
            self.nodes[inner].parent = node;
        }

        self.nodes[pivot].parent = self.parent(node);
        self.replace_in_parent(node, pivot);

        self.set_child(pivot, dir, node);
        self.nodes[node].parent = pivot;
    }

    rotation_shorthands!((); Left, Right);

    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Inserts `key`. Keys `>=` a node's data descend right, so duplicates are
    /// accepted as right-side entries.
    pub fn insert(&mut self, key: Key) {
        let node = self.nodes.allocate(RbNode::new(key, self.nil));

        let mut parent = self.nil;
        let mut current = self.root;
        while current != self.nil {
            parent = current;
            current = if key < self.data(current) {
                self.left(current)
            } else {
                self.right(current)
            };
        }

        self.nodes[node].parent = parent;
        if parent == self.nil {
            self.root = node;
        } else if key < self.data(parent) {
            self.nodes[parent].left = node;
        } else {
            self.nodes[parent].right = node;
        }

        self.insert_fixup(node);
    }

    /// Restores the color invariants after `node` was attached RED.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while node != self.root && self.color(self.parent(node)) == Color::Red {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.color(uncle) == Color::Red {
                log::trace!("red-black: insert case 1 at node {}", node);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                log::trace!("red-black: insert case 2 at node {}", node);
                node = parent;
                self.rotate(node, side);
            }

            log::trace!("red-black: insert case 3 at node {}", node);
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // ============================================================================
    // DELETE OPERATIONS
    // ============================================================================

    /// Removes one occurrence of `key`. Returns `false` if it was absent.
    pub fn remove(&mut self, key: Key) -> bool {
        let target = self.find(key);
        if target == self.nil {
            return false;
        }
        log::debug!("red-black: removing key {} at node {}", key, target);

        let mut removed_color = self.color(target);
        let replacement;

        if self.left(target) == self.nil {
            replacement = self.right(target);
            self.transplant(target, replacement);
        } else if self.right(target) == self.nil {
            replacement = self.left(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.minimum(self.right(target));
            removed_color = self.color(successor);
            replacement = self.right(successor);

            if self.parent(successor) == target {
                // The sentinel's parent is written too; delete_fixup walks up from it.
                self.nodes[replacement].parent = successor;
            } else {
                self.transplant(successor, replacement);
                let right = self.right(target);
                self.nodes[successor].right = right;
                self.nodes[right].parent = successor;
            }

            self.transplant(target, successor);
            let left = self.left(target);
            self.nodes[successor].left = left;
            self.nodes[left].parent = successor;
            let color = self.color(target);
            self.set_color(successor, color);
        }

        self.nodes.deallocate(target);

        if removed_color == Color::Black {
            self.delete_fixup(replacement);
        }
        true
    }

    /// Hangs `new` where `old` was. `new` may be the sentinel.
    fn transplant(&mut self, old: NodeId, new: NodeId) {
        self.replace_in_parent(old, new);
        self.nodes[new].parent = self.parent(old);
    }

    /// Resolves the extra black carried by `node` after a BLACK node left the tree.
    fn delete_fixup(&mut self, mut node: NodeId) {
        while node != self.root && self.color(node) == Color::Black {
            let parent = self.parent(node);
            let side = self.side_of(node);
            let mut sibling = self.child(parent, side.opposite());

            if self.color(sibling) == Color::Red {
                log::trace!("red-black: delete case 1 at node {}", node);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(self.parent(node), side.opposite());
            }

            if self.color(self.left(sibling)) == Color::Black
                && self.color(self.right(sibling)) == Color::Black
            {
                log::trace!("red-black: delete case 2 at node {}", node);
                self.set_color(sibling, Color::Red);
                node = self.parent(node);
                continue;
            }

            if self.color(self.child(sibling, side.opposite())) == Color::Black {
                log::trace!("red-black: delete case 3 at node {}", node);
                let near = self.child(sibling, side);
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.child(self.parent(node), side.opposite());
            }

            log::trace!("red-black: delete case 4 at node {}", node);
            let parent = self.parent(node);
            let parent_color = self.color(parent);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far = self.child(sibling, side.opposite());
            self.set_color(far, Color::Black);
            self.rotate(parent, side);
            node = self.root;
        }

        self.set_color(node, Color::Black);
    }

    fn minimum(&self, mut node: NodeId) -> NodeId {
        while self.left(node) != self.nil {
            node = self.left(node);
        }
        node
    }

    /// Node holding `key`, or the sentinel.
    fn find(&self, key: Key) -> NodeId {
        let mut current = self.root;
        while current != self.nil {
            let data = self.data(current);
            if key == data {
                break;
            }
            current = if key < data {
                self.left(current)
            } else {
                self.right(current)
            };
        }
        current
    }

    // ============================================================================
    // QUERIES AND TRAVERSAL
    // ============================================================================

    pub fn contains(&self, key: Key) -> bool {
        self.find(key) != self.nil
    }

    /// Number of keys stored; the sentinel is not counted.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.root == self.nil
    }

    /// Root id; equal to the sentinel when empty.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Color of `node`.
    pub fn node_color(&self, node: NodeId) -> Color {
        self.color(node)
    }

    /// Number of BLACK nodes on the leftmost root-to-NIL path, root excluded.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root;
        while node != self.nil {
            node = self.left(node);
            if self.color(node) == Color::Black {
                height += 1;
            }
        }
        height
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        self.keys().collect()
    }

    /// Iterator over the keys in ascending order.
    pub fn keys(&self) -> KeyIterator<'_, RbNode> {
        KeyIterator::new(&self.nodes, self.root, self.nil)
    }

    /// Statistics for the node arena, sentinel included.
    pub fn arena_stats(&self) -> NodeArenaStats {
        self.nodes.stats()
    }

    checked_mutations!(insert -> (), remove -> bool);
}

impl fmt::Display for RedBlackTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.in_order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(keys: &[Key]) -> RedBlackTree {
        let mut tree = RedBlackTree::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_insert_keeps_order_and_colors() {
        let tree = tree_from(&[10, 20, 30, 40, 50, 25]);
        assert_eq!(tree.in_order(), vec![10, 20, 25, 30, 40, 50]);
        assert_eq!(tree.to_string(), "[10, 20, 25, 30, 40, 50]");
        assert_eq!(tree.data(tree.root()), 20);
        assert_eq!(tree.node_color(tree.root()), Color::Black);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_straight_line_rotation() {
        let tree = tree_from(&[1, 2, 3]);
        assert_eq!(tree.data(tree.root()), 2);
        assert_eq!(tree.color(tree.left(tree.root())), Color::Red);
        assert_eq!(tree.color(tree.right(tree.root())), Color::Red);
    }

    #[test]
    fn test_zig_zag_rotation() {
        let tree = tree_from(&[3, 1, 2]);
        assert_eq!(tree.data(tree.root()), 2);
        assert_eq!(tree.in_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicates_go_right() {
        let tree = tree_from(&[5, 5, 5]);
        assert_eq!(tree.in_order(), vec![5, 5, 5]);
        assert_eq!(tree.len(), 3);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_remove_each_shape() {
        let mut tree = tree_from(&(1..=20).collect::<Vec<_>>());
        for key in [1, 20, 10, 4, 16, 8] {
            assert!(tree.remove(key));
            assert!(!tree.contains(key));
            assert!(tree.check_invariants(), "invariants after removing {}", key);
        }
        assert_eq!(tree.len(), 14);
        assert!(!tree.remove(100));
    }

    #[test]
    fn test_remove_everything() {
        let mut tree = tree_from(&[7, 3, 18, 10, 22, 8, 11, 26]);
        for key in [18, 11, 3, 10, 22, 26, 7, 8] {
            assert!(tree.remove(key));
            assert!(tree.check_invariants());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.to_string(), "[]");
        assert_eq!(tree.arena_stats().allocated_count, 1);
    }

    #[test]
    fn test_black_height_grows_logarithmically() {
        let tree = tree_from(&(0..1000).collect::<Vec<_>>());
        let black_height = tree.black_height();
        assert!((5..=10).contains(&black_height), "got {}", black_height);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut a = RedBlackTree::new();
        let b = RedBlackTree::new();
        a.insert(1);
        assert!(b.is_empty());
        assert_eq!(a.len(), 1);
    }

    #[test]
    #[should_panic(expected = "lifted child is NIL")]
    fn test_rotate_onto_sentinel_panics() {
        let mut tree = tree_from(&[1]);
        let root = tree.root();
        tree.left_rotate(root);
    }

    #[test]
    fn test_try_mutations() {
        let mut tree = RedBlackTree::new();
        for key in [4, 2, 6, 1, 3, 5, 7] {
            tree.try_insert(key).unwrap();
        }
        assert_eq!(tree.try_remove(4), Ok(true));
        assert_eq!(tree.try_remove(4), Ok(false));
    }
}
