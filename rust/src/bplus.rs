//! B+ tree insertion, search and traversal.
//!
//! Insertion splits full nodes on the way down, so a node is never entered
//! while holding `2t - 1` keys. Leaves take new keys by appending and
//! re-sorting; there is no leaf chain.

use crate::arena::NodeArenaStats;
use crate::types::{BPlusNode, BPlusTree, Key, NodeId};

impl BPlusTree {
    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Inserts `key`, growing a new root first if the current one is full.
    pub fn insert(&mut self, key: Key) {
        if self.is_full(self.root) {
            let old_root = self.root;
            let mut new_root = BPlusNode::new(false);
            new_root.children.push(old_root);
            self.root = self.nodes.allocate(new_root);
            log::debug!("bplus: root {} full, growing new root {}", old_root, self.root);

            self.split_child(self.root, 0);
        }
        self.insert_non_full(self.root, key);
    }

    /// Inserts `key` below `node`, which must not be full.
    fn insert_non_full(&mut self, node: NodeId, key: Key) {
        if self.nodes[node].is_leaf {
            let keys = &mut self.nodes[node].keys;
            keys.push(key);
            keys.sort_unstable();
            return;
        }

        let keys = &self.nodes[node].keys;
        let mut index = keys.len();
        while index > 0 && key < keys[index - 1] {
            index -= 1;
        }

        if self.is_full(self.nodes[node].children[index]) {
            self.split_child(node, index);
            if self.nodes[node].keys[index] <= key {
                index += 1;
            }
        }

        let child = self.nodes[node].children[index];
        self.insert_non_full(child, key);
    }

    /// Splits the full child at `index` of `parent` around its median key
    /// (position `t - 1`). The median moves up into `parent` at `index`; the
    /// upper `t - 1` keys, and for internal nodes the upper `t` children, move
    /// into a new right sibling.
    fn split_child(&mut self, parent: NodeId, index: usize) {
        let t = self.min_degree;
        let child = self.nodes[parent].children[index];

        let (sibling, median) = {
            let node = &mut self.nodes[child];
            let mut sibling = BPlusNode::new(node.is_leaf);
            sibling.keys = node.keys.split_off(t);
            if !node.is_leaf {
                sibling.children = node.children.split_off(t);
            }
            let median = node
                .keys
                .pop()
                .expect("split_child called on a node that is not full");
            (sibling, median)
        };
        log::trace!("bplus: splitting node {} around median {}", child, median);

        let sibling = self.nodes.allocate(sibling);
        let parent = &mut self.nodes[parent];
        parent.keys.insert(index, median);
        parent.children.insert(index + 1, sibling);
    }

    fn is_full(&self, node: NodeId) -> bool {
        self.nodes[node].keys.len() >= self.max_keys()
    }

    // ============================================================================
    // SEARCH AND TRAVERSAL
    // ============================================================================

    /// Returns `true` if `key` is stored anywhere in the tree.
    pub fn search(&self, key: Key) -> bool {
        self.search_from(self.root, key)
    }

    /// Searches the subtree rooted at `node`.
    pub fn search_from(&self, node: NodeId, key: Key) -> bool {
        let node = &self.nodes[node];
        let index = node
            .keys
            .iter()
            .position(|&k| k >= key)
            .unwrap_or(node.keys.len());

        if node.keys.get(index) == Some(&key) {
            return true;
        }
        if node.is_leaf {
            return false;
        }
        self.search_from(node.children[index], key)
    }

    /// One line per node in pre-order, `Level {level}: [k1, k2, ...]`.
    pub fn traverse(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.traverse_from(self.root, 0, &mut lines);
        lines
    }

    /// Appends the lines for the subtree rooted at `node`, labelled from `level`.
    pub fn traverse_from(&self, node: NodeId, level: usize, lines: &mut Vec<String>) {
        let node = &self.nodes[node];
        lines.push(format!("Level {}: {:?}", level, node.keys));
        for &child in &node.children {
            self.traverse_from(child, level + 1, lines);
        }
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        self.collect_keys(self.root, &mut keys);
        keys
    }

    fn collect_keys(&self, node: NodeId, out: &mut Vec<Key>) {
        let node = &self.nodes[node];
        if node.is_leaf {
            out.extend_from_slice(&node.keys);
            return;
        }
        for (i, &child) in node.children.iter().enumerate() {
            self.collect_keys(child, out);
            if let Some(&key) = node.keys.get(i) {
                out.push(key);
            }
        }
    }

    // ============================================================================
    // TREE STRUCTURE
    // ============================================================================

    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// `2t - 1`.
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Root id; the root always exists, as an empty leaf in a fresh tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of keys stored, counted over every node.
    pub fn len(&self) -> usize {
        self.len_recursive(self.root)
    }

    fn len_recursive(&self, node: NodeId) -> usize {
        let node = &self.nodes[node];
        node.keys.len()
            + node
                .children
                .iter()
                .map(|&child| self.len_recursive(child))
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[self.root].keys.is_empty()
    }

    /// Number of levels; 1 for a lone root leaf.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self.root;
        while !self.nodes[node].is_leaf {
            node = self.nodes[node].children[0];
            height += 1;
        }
        height
    }

    /// Statistics for the node arena.
    pub fn arena_stats(&self) -> NodeArenaStats {
        self.nodes.stats()
    }

    checked_mutations!(insert -> ());
}
