//! Validation and debugging utilities.
//!
//! Every tree exposes `check_invariants() -> bool` and
//! `check_invariants_detailed() -> TreeResult<()>`. The detailed form names
//! the node and the rule that failed.

use crate::error::{TreeError, TreeResult};
use crate::types::{
    AvlNode, AvlTree, BPlusTree, Color, Key, NodeId, RedBlackTree, SegmentTree, NULL_NODE,
};

// ============================================================================
// AVL
// ============================================================================

impl AvlTree {
    /// Check if the tree maintains the AVL invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Checks stored heights, balance factors in `-1..=1`, non-decreasing
    /// in-order keys, and that every allocated node is reachable.
    pub fn check_invariants_detailed(&self) -> TreeResult<()> {
        let mut reachable = 0;
        self.check_avl_node(self.root, None, None, &mut reachable)?;

        if reachable != self.nodes.len() {
            return Err(TreeError::arena_error(
                "AVL consistency check",
                &format!("{} reachable vs {} in arena", reachable, self.nodes.len()),
            ));
        }
        Ok(())
    }

    /// Returns the checked height of the subtree at `node`.
    fn check_avl_node(
        &self,
        node: NodeId,
        min_key: Option<Key>,
        max_key: Option<Key>,
        reachable: &mut usize,
    ) -> TreeResult<u32> {
        if node == NULL_NODE {
            return Ok(0);
        }
        let AvlNode {
            key,
            left,
            right,
            height,
        } = *self.nodes.get(node).ok_or_else(|| {
            TreeError::corrupted_tree("AVL", &format!("link to unallocated node {}", node))
        })?;
        *reachable += 1;

        if min_key.map_or(false, |min| key < min) || max_key.map_or(false, |max| key > max) {
            return Err(TreeError::data_integrity(
                "AVL order",
                &format!("key {} at node {} outside {:?}..={:?}", key, node, min_key, max_key),
            ));
        }

        let left_height = self.check_avl_node(left, min_key, Some(key), reachable)?;
        let right_height = self.check_avl_node(right, Some(key), max_key, reachable)?;

        if height != 1 + left_height.max(right_height) {
            return Err(TreeError::corrupted_tree(
                "AVL height",
                &format!(
                    "node {} stores {} but subtrees give {}",
                    node,
                    height,
                    1 + left_height.max(right_height)
                ),
            ));
        }
        let balance = i64::from(left_height) - i64::from(right_height);
        if !(-1..=1).contains(&balance) {
            return Err(TreeError::data_integrity(
                "AVL balance",
                &format!("node {} has balance factor {}", node, balance),
            ));
        }
        Ok(height)
    }
}

// ============================================================================
// RED-BLACK
// ============================================================================

impl RedBlackTree {
    /// Check if the tree maintains the red-black invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Checks: the root and the sentinel are BLACK, no RED node has a RED
    /// child, every root-to-NIL path has the same black count, parent links
    /// mirror child links, and keys are ordered.
    pub fn check_invariants_detailed(&self) -> TreeResult<()> {
        let nil = self.nodes.get(self.nil).ok_or_else(|| {
            TreeError::corrupted_tree("Red-black", "sentinel is not allocated")
        })?;
        if nil.color != Color::Black || nil.data.is_some() {
            return Err(TreeError::corrupted_tree(
                "Red-black",
                "sentinel must be BLACK and keyless",
            ));
        }
        let root = self.nodes.get(self.root).ok_or_else(|| {
            TreeError::corrupted_tree("Red-black", &format!("root {} is not allocated", self.root))
        })?;
        if root.color != Color::Black {
            return Err(TreeError::data_integrity("Red-black root", "root is RED"));
        }
        if self.root != self.nil && root.parent != self.nil {
            return Err(TreeError::corrupted_tree(
                "Red-black",
                "root parent is not the sentinel",
            ));
        }

        let mut reachable = 0;
        self.check_rb_node(self.root, None, None, &mut reachable)?;

        if reachable != self.len() {
            return Err(TreeError::arena_error(
                "Red-black consistency check",
                &format!("{} reachable vs {} in arena", reachable, self.len()),
            ));
        }
        Ok(())
    }

    /// Returns the black height of the subtree at `node`, NIL counted.
    fn check_rb_node(
        &self,
        node: NodeId,
        min_key: Option<Key>,
        max_key: Option<Key>,
        reachable: &mut usize,
    ) -> TreeResult<usize> {
        if node == self.nil {
            return Ok(1);
        }
        let current = self.nodes.get(node).ok_or_else(|| {
            TreeError::corrupted_tree("Red-black", &format!("link to unallocated node {}", node))
        })?;
        *reachable += 1;

        let key = current.data.ok_or_else(|| {
            TreeError::corrupted_tree("Red-black", &format!("node {} has no key", node))
        })?;
        if min_key.map_or(false, |min| key < min) || max_key.map_or(false, |max| key > max) {
            return Err(TreeError::data_integrity(
                "Red-black order",
                &format!("key {} at node {} outside {:?}..={:?}", key, node, min_key, max_key),
            ));
        }

        for child in [current.left, current.right] {
            if child == self.nil {
                continue;
            }
            let child_node = self.nodes.get(child).ok_or_else(|| {
                TreeError::corrupted_tree(
                    "Red-black",
                    &format!("link to unallocated node {}", child),
                )
            })?;
            if child_node.parent != node {
                return Err(TreeError::corrupted_tree(
                    "Red-black parent link",
                    &format!("node {} does not point back to {}", child, node),
                ));
            }
            if current.color == Color::Red && child_node.color == Color::Red {
                return Err(TreeError::data_integrity(
                    "Red-black color",
                    &format!("RED node {} has RED child {}", node, child),
                ));
            }
        }

        let left_height = self.check_rb_node(current.left, min_key, Some(key), reachable)?;
        let right_height = self.check_rb_node(current.right, Some(key), max_key, reachable)?;
        if left_height != right_height {
            return Err(TreeError::data_integrity(
                "Red-black black height",
                &format!(
                    "node {} has {} on the left and {} on the right",
                    node, left_height, right_height
                ),
            ));
        }

        Ok(left_height + usize::from(current.color == Color::Black))
    }
}

// ============================================================================
// B+ TREE
// ============================================================================

impl BPlusTree {
    /// Check if the tree maintains the B+ tree invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Checks key counts (`t - 1 ..= 2t - 1` below the root), child counts
    /// (`keys + 1` for internal nodes), sorted keys within separator bounds,
    /// and equal leaf depth.
    pub fn check_invariants_detailed(&self) -> TreeResult<()> {
        let mut leaf_depth = None;
        self.check_bplus_node(self.root, 0, None, None, &mut leaf_depth)
    }

    fn check_bplus_node(
        &self,
        id: NodeId,
        depth: usize,
        min_key: Option<Key>,
        max_key: Option<Key>,
        leaf_depth: &mut Option<usize>,
    ) -> TreeResult<()> {
        let node = self.nodes.get(id).ok_or_else(|| {
            TreeError::corrupted_tree("B+ tree", &format!("link to unallocated node {}", id))
        })?;
        let count = node.keys.len();

        if count > self.max_keys() {
            return Err(TreeError::data_integrity(
                "B+ tree key count",
                &format!("node {} holds {} keys, max {}", id, count, self.max_keys()),
            ));
        }
        if id != self.root && count < self.min_degree - 1 {
            return Err(TreeError::data_integrity(
                "B+ tree key count",
                &format!("node {} holds {} keys, min {}", id, count, self.min_degree - 1),
            ));
        }
        if node.keys.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(TreeError::data_integrity(
                "B+ tree order",
                &format!("node {} keys {:?} are not sorted", id, node.keys),
            ));
        }
        let out_of_bounds = node.keys.iter().any(|&key| {
            min_key.map_or(false, |min| key < min) || max_key.map_or(false, |max| key > max)
        });
        if out_of_bounds {
            return Err(TreeError::data_integrity(
                "B+ tree order",
                &format!("node {} keys {:?} outside {:?}..={:?}", id, node.keys, min_key, max_key),
            ));
        }

        if node.is_leaf {
            if !node.children.is_empty() {
                return Err(TreeError::corrupted_tree(
                    "B+ tree",
                    &format!("leaf {} has children", id),
                ));
            }
            return match *leaf_depth {
                None => {
                    *leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(TreeError::data_integrity(
                    "B+ tree balance",
                    &format!("leaf {} at depth {}, expected {}", id, depth, expected),
                )),
            };
        }

        if node.children.len() != count + 1 {
            return Err(TreeError::data_integrity(
                "B+ tree child count",
                &format!("node {} has {} keys and {} children", id, count, node.children.len()),
            ));
        }
        for (i, &child) in node.children.iter().enumerate() {
            let low = if i == 0 { min_key } else { Some(node.keys[i - 1]) };
            let high = node.keys.get(i).copied().or(max_key);
            self.check_bplus_node(child, depth + 1, low, high, leaf_depth)?;
        }
        Ok(())
    }
}

// ============================================================================
// SEGMENT TREE
// ============================================================================

impl SegmentTree {
    /// Check that every internal slot holds the sum of its two children.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    pub fn check_invariants_detailed(&self) -> TreeResult<()> {
        if self.tree.len() != 2 * self.n {
            return Err(TreeError::corrupted_tree(
                "Segment tree",
                &format!("{} slots for {} elements", self.tree.len(), self.n),
            ));
        }
        for i in 1..self.n {
            let expected = self.tree[2 * i] + self.tree[2 * i + 1];
            if self.tree[i] != expected {
                return Err(TreeError::data_integrity(
                    "Segment tree sum",
                    &format!("slot {} holds {}, children sum to {}", i, self.tree[i], expected),
                ));
            }
        }
        Ok(())
    }
}
