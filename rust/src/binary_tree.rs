//! Plain binary search trees: unbalanced insertion plus builders for the
//! degenerate (linked-list) and perfect shapes.

use std::collections::VecDeque;

use crate::iteration::KeyIterator;
use crate::types::{BinaryNode, BinaryTree, Key, NodeId, NULL_NODE};

impl BinaryTree {
    // ============================================================================
    // BUILDERS
    // ============================================================================

    /// Inserts every key in order.
    pub fn from_keys<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        let mut tree = Self::new();
        for key in keys {
            tree.insert(key);
        }
        tree
    }

    /// Chain of keys `1..=n`, each node the right child of the previous one.
    pub fn degenerate(n: usize) -> Self {
        Self::from_keys(1..=n as Key)
    }

    /// Perfect tree of `height` levels holding keys `1..=2^height - 1`.
    pub fn perfect(height: u32) -> Self {
        let mut tree = Self::new();
        let count: Key = (1 << height) - 1;
        tree.root = tree.build_balanced(1, count);
        tree
    }

    fn build_balanced(&mut self, low: Key, high: Key) -> NodeId {
        if low > high {
            return NULL_NODE;
        }
        let mid = low + (high - low) / 2;
        let left = self.build_balanced(low, mid - 1);
        let right = self.build_balanced(mid + 1, high);
        self.nodes.allocate(BinaryNode { key: mid, left, right })
    }

    // ============================================================================
    // INSERT AND LOOKUP
    // ============================================================================

    /// Unbalanced BST insertion; keys `>=` a node's key go right.
    pub fn insert(&mut self, key: Key) {
        let node = self.nodes.allocate(BinaryNode::new(key));
        if self.root == NULL_NODE {
            self.root = node;
            return;
        }

        let mut current = self.root;
        loop {
            let next = if key < self.nodes[current].key {
                &mut self.nodes[current].left
            } else {
                &mut self.nodes[current].right
            };
            if *next == NULL_NODE {
                *next = node;
                return;
            }
            current = *next;
        }
    }

    pub fn contains(&self, key: Key) -> bool {
        let mut current = self.root;
        while current != NULL_NODE {
            let node = &self.nodes[current];
            if node.key == key {
                return true;
            }
            current = if key < node.key { node.left } else { node.right };
        }
        false
    }

    // ============================================================================
    // SHAPE QUERIES
    // ============================================================================

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root == NULL_NODE
    }

    /// Number of levels; 0 when empty.
    pub fn height(&self) -> u32 {
        let mut height = 0;
        let mut level = Vec::new();
        if self.root != NULL_NODE {
            level.push(self.root);
        }
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| [self.nodes[id].left, self.nodes[id].right])
                .filter(|&child| child != NULL_NODE)
                .collect();
        }
        height
    }

    /// Every level is full.
    pub fn is_perfect(&self) -> bool {
        let height = self.height();
        height < usize::BITS && self.len() == (1usize << height) - 1
    }

    /// No node has two children.
    pub fn is_degenerate(&self) -> bool {
        self.all_nodes(|node| node.left == NULL_NODE || node.right == NULL_NODE)
    }

    /// Every node has zero or two children.
    pub fn is_full(&self) -> bool {
        self.all_nodes(|node| (node.left == NULL_NODE) == (node.right == NULL_NODE))
    }

    fn all_nodes(&self, predicate: impl Fn(&BinaryNode) -> bool) -> bool {
        self.pre_order_ids().into_iter().all(|id| predicate(&self.nodes[id]))
    }

    // ============================================================================
    // TRAVERSALS
    // ============================================================================

    fn pre_order_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if id == NULL_NODE {
                continue;
            }
            ids.push(id);
            stack.push(self.nodes[id].right);
            stack.push(self.nodes[id].left);
        }
        ids
    }

    pub fn pre_order(&self) -> Vec<Key> {
        self.pre_order_ids()
            .into_iter()
            .map(|id| self.nodes[id].key)
            .collect()
    }

    pub fn in_order(&self) -> Vec<Key> {
        self.keys().collect()
    }

    pub fn post_order(&self) -> Vec<Key> {
        // Root-right-left, reversed.
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if id == NULL_NODE {
                continue;
            }
            let BinaryNode { key, left, right } = self.nodes[id];
            keys.push(key);
            stack.push(left);
            stack.push(right);
        }
        keys.reverse();
        keys
    }

    pub fn level_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        let mut queue = VecDeque::new();
        if self.root != NULL_NODE {
            queue.push_back(self.root);
        }
        while let Some(id) = queue.pop_front() {
            let BinaryNode { key, left, right } = self.nodes[id];
            keys.push(key);
            for child in [left, right] {
                if child != NULL_NODE {
                    queue.push_back(child);
                }
            }
        }
        keys
    }

    /// Iterator over the keys in ascending order.
    pub fn keys(&self) -> KeyIterator<'_, BinaryNode> {
        KeyIterator::new(&self.nodes, self.root, NULL_NODE)
    }
}
