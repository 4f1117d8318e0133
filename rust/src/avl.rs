//! AVL tree operations.
//!
//! Insertion and deletion are written in the root-passing style: each call
//! takes the root of a subtree and returns the root that replaces it, which
//! may differ after a rotation. `insert` and `remove` apply them to the
//! tree's own root.

use crate::arena::NodeArenaStats;
use crate::iteration::KeyIterator;
use crate::types::{AvlNode, AvlTree, Direction, Key, NodeId, NULL_NODE};

impl AvlTree {
    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Inserts `key` into the tree.
    pub fn insert(&mut self, key: Key) {
        self.insert_node(self.root, key);
    }

    /// Inserts `key` into the subtree rooted at `root` and returns the new
    /// subtree root. Keys `>=` a node's key descend right. When `root` is the
    /// tree's own root, the tree's root is replaced as well.
    ///
    /// # Panics
    ///
    /// Panics if `root` is neither `NULL_NODE` nor a live node of this tree.
    pub fn insert_node(&mut self, root: NodeId, key: Key) -> NodeId {
        let new_root = self.insert_at(root, key);
        if root == self.root {
            self.root = new_root;
        }
        new_root
    }

    fn insert_at(&mut self, root: NodeId, key: Key) -> NodeId {
        if root == NULL_NODE {
            return self.nodes.allocate(AvlNode::new(key));
        }

        if key < self.nodes[root].key {
            let left = self.insert_at(self.nodes[root].left, key);
            self.nodes[root].left = left;
        } else {
            let right = self.insert_at(self.nodes[root].right, key);
            self.nodes[root].right = right;
        }

        self.update_height(root);
        let balance = self.balance_factor(root);

        if balance > 1 {
            let left = self.nodes[root].left;
            if key < self.nodes[left].key {
                return self.rotate(root, Direction::Right);
            }
            let new_left = self.rotate(left, Direction::Left);
            self.nodes[root].left = new_left;
            return self.rotate(root, Direction::Right);
        }

        if balance < -1 {
            let right = self.nodes[root].right;
            if key >= self.nodes[right].key {
                return self.rotate(root, Direction::Left);
            }
            let new_right = self.rotate(right, Direction::Right);
            self.nodes[root].right = new_right;
            return self.rotate(root, Direction::Left);
        }

        root
    }

    // ============================================================================
    // DELETE OPERATIONS
    // ============================================================================

    /// Removes one occurrence of `key`. Returns `false` if it was absent.
    pub fn remove(&mut self, key: Key) -> bool {
        let before = self.nodes.len();
        self.delete_node(self.root, key);
        self.nodes.len() < before
    }

    /// Deletes `key` from the subtree rooted at `root` and returns the new
    /// subtree root. An absent key leaves the subtree unchanged.
    ///
    /// A node with two children takes the key of its in-order successor, and
    /// the successor is then deleted from the right subtree. When `root` is
    /// the tree's own root, the tree's root is replaced as well.
    pub fn delete_node(&mut self, root: NodeId, key: Key) -> NodeId {
        let new_root = self.delete_at(root, key);
        if root == self.root {
            self.root = new_root;
        }
        new_root
    }

    fn delete_at(&mut self, root: NodeId, key: Key) -> NodeId {
        if root == NULL_NODE {
            return NULL_NODE;
        }

        let node_key = self.nodes[root].key;
        if key < node_key {
            let left = self.delete_at(self.nodes[root].left, key);
            self.nodes[root].left = left;
        } else if key > node_key {
            let right = self.delete_at(self.nodes[root].right, key);
            self.nodes[root].right = right;
        } else {
            let AvlNode { left, right, .. } = self.nodes[root];
            if left == NULL_NODE {
                self.release(root);
                return right;
            }
            if right == NULL_NODE {
                self.release(root);
                return left;
            }

            let successor_key = self.nodes[self.leftmost(right)].key;
            self.nodes[root].key = successor_key;
            let right = self.delete_at(right, successor_key);
            self.nodes[root].right = right;
        }

        self.update_height(root);
        self.rebalance_after_delete(root)
    }

    /// Restores the balance of `root` using the balance of the heavy child to
    /// choose between a single and a double rotation.
    fn rebalance_after_delete(&mut self, root: NodeId) -> NodeId {
        let balance = self.balance_factor(root);

        if balance > 1 {
            let left = self.nodes[root].left;
            if self.balance_factor(left) >= 0 {
                return self.rotate(root, Direction::Right);
            }
            let new_left = self.rotate(left, Direction::Left);
            self.nodes[root].left = new_left;
            return self.rotate(root, Direction::Right);
        }

        if balance < -1 {
            let right = self.nodes[root].right;
            if self.balance_factor(right) <= 0 {
                return self.rotate(root, Direction::Left);
            }
            let new_right = self.rotate(right, Direction::Right);
            self.nodes[root].right = new_right;
            return self.rotate(root, Direction::Left);
        }

        root
    }

    fn release(&mut self, node: NodeId) {
        log::debug!("avl: reclaiming node {}", node);
        self.nodes.deallocate(node);
    }

    fn leftmost(&self, mut node: NodeId) -> NodeId {
        while self.nodes[node].left != NULL_NODE {
            node = self.nodes[node].left;
        }
        node
    }

    // ============================================================================
    // ROTATION
    // ============================================================================

    /// Rotates the subtree at `node` in direction `dir` and returns the child
    /// that took its place. Both heights are recomputed; the caller relinks
    /// the returned root.
    ///
    /// # Panics
    ///
    /// Panics if the child being lifted is missing.
    pub fn rotate(&mut self, node: NodeId, dir: Direction) -> NodeId {
        let pivot = self.child(node, dir.opposite());
        let inner = self.child(pivot, dir);
        log::trace!("avl: rotating node {} {:?} around {}", node, dir, pivot);

        self.set_child(node, dir.opposite(), inner);
        self.set_child(pivot, dir, node);

        self.update_height(node);
        self.update_height(pivot);
        pivot
    }

    rotation_shorthands!(NodeId; Left, Right);

    fn child(&self, node: NodeId, dir: Direction) -> NodeId {
        match dir {
            Direction::Left => self.nodes[node].left,
            Direction::Right => self.nodes[node].right,
        }
    }

    fn set_child(&mut self, node: NodeId, dir: Direction, child: NodeId) {
        match dir {
            Direction::Left => self.nodes[node].left = child,
            Direction::Right => self.nodes[node].right = child,
        }
    }

    // ============================================================================
    // HEIGHT AND BALANCE
    // ============================================================================

    /// Height of the subtree at `node`; 0 for `NULL_NODE`.
    pub fn node_height(&self, node: NodeId) -> u32 {
        if node == NULL_NODE {
            0
        } else {
            self.nodes[node].height
        }
    }

    /// `height(left) - height(right)` for `node`; 0 for `NULL_NODE`.
    pub fn balance_factor(&self, node: NodeId) -> i64 {
        if node == NULL_NODE {
            return 0;
        }
        let AvlNode { left, right, .. } = self.nodes[node];
        i64::from(self.node_height(left)) - i64::from(self.node_height(right))
    }

    fn update_height(&mut self, node: NodeId) {
        let AvlNode { left, right, .. } = self.nodes[node];
        self.nodes[node].height = 1 + self.node_height(left).max(self.node_height(right));
    }

    // ============================================================================
    // QUERIES AND TRAVERSAL
    // ============================================================================

    /// Root id, `NULL_NODE` when empty.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Key stored at `node`.
    pub fn key(&self, node: NodeId) -> Key {
        self.nodes[node].key
    }

    /// Height of the whole tree.
    pub fn height(&self) -> u32 {
        self.node_height(self.root)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root == NULL_NODE
    }

    pub fn contains(&self, key: Key) -> bool {
        let mut current = self.root;
        while current != NULL_NODE {
            let node = &self.nodes[current];
            if key == node.key {
                return true;
            }
            current = if key < node.key { node.left } else { node.right };
        }
        false
    }

    /// Pre-order keys of the subtree at `root`, space-joined.
    pub fn pre_order(&self, root: NodeId) -> String {
        self.pre_order_keys(root)
            .iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pre-order keys of the subtree at `root`.
    pub fn pre_order_keys(&self, root: NodeId) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node == NULL_NODE {
                continue;
            }
            let AvlNode { key, left, right, .. } = self.nodes[node];
            keys.push(key);
            stack.push(right);
            stack.push(left);
        }
        keys
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        self.keys().collect()
    }

    /// Iterator over the keys in ascending order.
    pub fn keys(&self) -> KeyIterator<'_, AvlNode> {
        KeyIterator::new(&self.nodes, self.root, NULL_NODE)
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NULL_NODE;
    }

    /// Statistics for the node arena.
    pub fn arena_stats(&self) -> NodeArenaStats {
        self.nodes.stats()
    }

    checked_mutations!(insert -> (), remove -> bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(keys: &[Key]) -> AvlTree {
        let mut tree = AvlTree::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_insert_rebalances_to_known_shape() {
        let tree = tree_from(&[10, 20, 30, 40, 50, 25]);
        assert_eq!(tree.pre_order(tree.root()), "30 20 10 25 40 50");
        assert_eq!(tree.height(), 3);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_delete_leaf_with_single_child() {
        let mut tree = tree_from(&[10, 20, 30, 40, 50, 25]);
        assert!(tree.remove(40));
        assert_eq!(tree.pre_order(tree.root()), "30 20 10 25 50");
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_root_passing_api() {
        let mut tree = AvlTree::new();
        let mut root = NULL_NODE;
        for key in [3, 2, 1] {
            root = tree.insert_node(root, key);
        }
        assert_eq!(tree.key(root), 2);
        assert_eq!(tree.pre_order(root), "2 1 3");

        root = tree.delete_node(root, 2);
        assert_eq!(tree.pre_order(root), "3 1");
        assert_eq!(tree.root(), root);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_root_passing_updates_tree_root() {
        let mut tree = AvlTree::new();
        let mut root = tree.root();
        for key in [1, 2, 3] {
            root = tree.insert_node(root, key);
        }
        assert_eq!(tree.root(), root);
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
        assert!(tree.check_invariants());

        let mut single = AvlTree::new();
        single.insert(5);
        let root = single.delete_node(single.root(), 5);
        assert_eq!(root, NULL_NODE);
        assert_eq!(single.root(), NULL_NODE);
        assert!(single.is_empty());
        assert!(single.in_order().is_empty());
        assert!(!single.contains(5));
    }

    #[test]
    fn test_left_right_case() {
        let tree = tree_from(&[30, 10, 20]);
        assert_eq!(tree.pre_order(tree.root()), "20 10 30");
    }

    #[test]
    fn test_right_left_case() {
        let tree = tree_from(&[10, 30, 20]);
        assert_eq!(tree.pre_order(tree.root()), "20 10 30");
    }

    #[test]
    fn test_delete_two_children_uses_successor() {
        let mut tree = tree_from(&[20, 10, 30, 25, 35]);
        assert!(tree.remove(20));
        assert_eq!(tree.pre_order(tree.root()), "25 10 30 35");
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_delete_triggers_double_rotation() {
        let mut tree = tree_from(&[20, 10, 30, 15]);
        assert!(tree.remove(30));
        assert_eq!(tree.pre_order(tree.root()), "15 10 20");
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut tree = tree_from(&[1, 2, 3]);
        assert!(!tree.remove(42));
        assert_eq!(tree.pre_order(tree.root()), "2 1 3");

        let mut empty = AvlTree::new();
        assert!(!empty.remove(1));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut tree = tree_from(&[5, 5, 5, 5]);
        assert_eq!(tree.in_order(), vec![5, 5, 5, 5]);
        assert!(tree.check_invariants());
        assert!(tree.remove(5));
        assert_eq!(tree.len(), 3);
        assert!(tree.contains(5));
    }

    #[test]
    fn test_deleted_nodes_are_reclaimed() {
        let mut tree = tree_from(&[1, 2, 3, 4]);
        tree.remove(2);
        assert_eq!(tree.arena_stats().free_count, 1);
        tree.insert(9);
        assert_eq!(tree.arena_stats().free_count, 0);
        assert_eq!(tree.arena_stats().allocated_count, 4);
    }

    #[test]
    fn test_single_node_height_is_one() {
        let tree = tree_from(&[7]);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.balance_factor(tree.root()), 0);
        assert_eq!(tree.node_height(NULL_NODE), 0);
    }

    #[test]
    fn test_rotation_shorthands() {
        let mut tree = tree_from(&[2, 1, 3]);
        let root = tree.root();
        let new_root = tree.left_rotate(root);
        assert_eq!(tree.pre_order(new_root), "3 2 1");
        let back = tree.right_rotate(new_root);
        assert_eq!(tree.pre_order(back), "2 1 3");
    }

    #[test]
    #[should_panic(expected = "not allocated")]
    fn test_rotate_without_child_panics() {
        let mut tree = tree_from(&[1]);
        let root = tree.root();
        tree.left_rotate(root);
    }

    #[test]
    fn test_try_insert_and_try_remove() {
        let mut tree = AvlTree::new();
        for key in 0..32 {
            tree.try_insert(key).unwrap();
        }
        assert_eq!(tree.try_remove(7), Ok(true));
        assert_eq!(tree.try_remove(7), Ok(false));
        assert_eq!(tree.len(), 31);
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_from(&[1, 2, 3]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.pre_order(tree.root()), "");
    }
}
