//! In-order key iteration over the binary trees.
//!
//! The iterator keeps an explicit stack of pending ancestors, so it borrows
//! the arena for its lifetime and never recurses.

use crate::arena::NodeArena;
use crate::types::{BinaryLinks, Key, NodeId};

/// Iterator over the keys of a binary tree in ascending order.
pub struct KeyIterator<'a, N> {
    nodes: &'a NodeArena<N>,
    /// Id that terminates a link (`NULL_NODE`, or a red-black tree's sentinel).
    leaf: NodeId,
    stack: Vec<NodeId>,
}

impl<'a, N: BinaryLinks> KeyIterator<'a, N> {
    pub fn new(nodes: &'a NodeArena<N>, root: NodeId, leaf: NodeId) -> Self {
        let mut iter = Self {
            nodes,
            leaf,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: NodeId) {
        while node != self.leaf {
            self.stack.push(node);
            node = self.nodes[node].left();
        }
    }
}

impl<'a, N: BinaryLinks> Iterator for KeyIterator<'a, N> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.nodes[id];
        let (key, right) = (node.key(), node.right());
        self.push_left_spine(right);
        key
    }
}
