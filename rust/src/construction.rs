//! Construction and initialization logic for the trees and their nodes.
//!
//! This module contains the constructors, the minimum degree validation for
//! `BPlusTree`, and the `Default` implementations. Freed arena slots are
//! refilled with a node's `Default`, so every node type provides one.

use crate::arena::NodeArena;
use crate::error::{InitResult, TreeError};
use crate::types::{
    AvlNode, AvlTree, BPlusNode, BPlusTree, BinaryNode, BinaryTree, Color, Key, NodeId,
    RbNode, RedBlackTree, SegmentTree, NULL_NODE,
};

/// Minimum degree used by `BPlusTree::default()`.
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// Smallest accepted minimum degree; below it a split cannot leave `t - 1`
/// keys on both sides.
pub const MIN_DEGREE: usize = 2;

// ============================================================================
// NODES
// ============================================================================

impl AvlNode {
    /// Creates a detached leaf.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            left: NULL_NODE,
            right: NULL_NODE,
            height: 1,
        }
    }
}

impl Default for AvlNode {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RbNode {
    /// Creates a RED node whose links all point at `nil`.
    pub fn new(key: Key, nil: NodeId) -> Self {
        Self {
            data: Some(key),
            color: Color::Red,
            left: nil,
            right: nil,
            parent: nil,
        }
    }

    /// Creates the BLACK, keyless sentinel.
    pub fn sentinel() -> Self {
        Self {
            data: None,
            color: Color::Black,
            left: NULL_NODE,
            right: NULL_NODE,
            parent: NULL_NODE,
        }
    }
}

impl Default for RbNode {
    fn default() -> Self {
        Self::sentinel()
    }
}

impl BPlusNode {
    /// Creates an empty node.
    pub fn new(is_leaf: bool) -> Self {
        Self {
            is_leaf,
            keys: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl BinaryNode {
    /// Creates a detached leaf.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            left: NULL_NODE,
            right: NULL_NODE,
        }
    }
}

impl Default for BinaryNode {
    fn default() -> Self {
        Self::new(0)
    }
}

// ============================================================================
// TREES
// ============================================================================

impl AvlTree {
    /// Creates an empty AVL tree.
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: NULL_NODE,
        }
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RedBlackTree {
    /// Creates an empty red-black tree. The root starts out as the sentinel.
    pub fn new() -> Self {
        let mut nodes = NodeArena::new();
        let nil = nodes.allocate(RbNode::sentinel());
        Self {
            nodes,
            nil,
            root: nil,
        }
    }
}

impl Default for RedBlackTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BPlusTree {
    /// Create a B+ tree with the given minimum degree `t`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(BPlusTree)` if `t >= 2`, `Err(TreeError::InvalidDegree)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use treekit::BPlusTree;
    ///
    /// let tree = BPlusTree::new(3).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(BPlusTree::new(1).is_err());
    /// ```
    pub fn new(min_degree: usize) -> InitResult<Self> {
        if min_degree < MIN_DEGREE {
            return Err(TreeError::invalid_degree(min_degree, MIN_DEGREE));
        }

        let mut nodes = NodeArena::new();
        let root = nodes.allocate(BPlusNode::new(true));

        Ok(Self {
            min_degree,
            nodes,
            root,
        })
    }

    /// Create a B+ tree with `DEFAULT_MIN_DEGREE`.
    pub fn with_default_degree() -> InitResult<Self> {
        Self::new(DEFAULT_MIN_DEGREE)
    }
}

impl Default for BPlusTree {
    fn default() -> Self {
        let mut nodes = NodeArena::new();
        let root = nodes.allocate(BPlusNode::new(true));
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
            nodes,
            root,
        }
    }
}

impl SegmentTree {
    /// Builds the tree over `data` in O(n).
    pub fn new(data: &[Key]) -> Self {
        let n = data.len();
        let mut tree = vec![0; 2 * n];
        tree[n..].copy_from_slice(data);
        for i in (1..n).rev() {
            tree[i] = tree[2 * i] + tree[2 * i + 1];
        }
        Self { n, tree }
    }
}

impl From<Vec<Key>> for SegmentTree {
    fn from(data: Vec<Key>) -> Self {
        Self::new(&data)
    }
}

impl BinaryTree {
    /// Creates an empty binary tree.
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: NULL_NODE,
        }
    }
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}
