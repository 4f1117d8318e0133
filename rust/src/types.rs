//! Core types and data structures for the tree collection.
//!
//! This module contains the node and tree definitions, the id type used to
//! link nodes through their arena, and the small enums shared by the
//! rotation code.

use crate::arena::NodeArena;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Key type stored by every tree.
pub type Key = i64;

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Id meaning "no node" for trees without a sentinel.
pub const NULL_NODE: NodeId = u32::MAX;

/// Side of a binary node, and the direction of a rotation.
///
/// `rotate(node, Direction::Left)` lifts the node's right child into its place;
/// `Direction::Right` lifts the left child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// The other side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Red-black node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    Red,
    #[default]
    Black,
}

/// Read access to the left/right links of a binary node.
pub trait BinaryLinks {
    fn left(&self) -> NodeId;
    fn right(&self) -> NodeId;

    /// Key carried by the node, `None` for a sentinel.
    fn key(&self) -> Option<Key>;

    #[inline]
    fn child(&self, dir: Direction) -> NodeId {
        match dir {
            Direction::Left => self.left(),
            Direction::Right => self.right(),
        }
    }
}

// ============================================================================
// NODES
// ============================================================================

/// AVL node. `height` counts nodes, so a leaf has height 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlNode {
    pub(crate) key: Key,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) height: u32,
}

/// Red-black node. The tree's NIL sentinel is a node with `data == None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbNode {
    pub(crate) data: Option<Key>,
    pub(crate) color: Color,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    /// Back-reference used for upward walks only.
    pub(crate) parent: NodeId,
}

/// B+ tree node. `children` is empty for leaves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BPlusNode {
    pub(crate) is_leaf: bool,
    pub(crate) keys: Vec<Key>,
    pub(crate) children: Vec<NodeId>,
}

/// Node of an unbalanced binary tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNode {
    pub(crate) key: Key,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl_binary_links!(AvlNode { key }, BinaryNode { key });

impl BinaryLinks for RbNode {
    #[inline]
    fn left(&self) -> NodeId {
        self.left
    }

    #[inline]
    fn right(&self) -> NodeId {
        self.right
    }

    #[inline]
    fn key(&self) -> Option<Key> {
        self.data
    }
}

// ============================================================================
// TREES
// ============================================================================

/// Height-balanced binary search tree.
///
/// Keys greater than or equal to a node's key go to its right subtree, so
/// duplicates are kept. After every public operation each node's balance
/// factor is in `-1..=1`.
///
/// # Examples
///
/// ```
/// use treekit::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [10, 20, 30, 40, 50, 25] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.pre_order(tree.root()), "30 20 10 25 40 50");
///
/// tree.remove(40);
/// assert_eq!(tree.pre_order(tree.root()), "30 20 10 25 50");
/// ```
#[derive(Debug, Clone)]
pub struct AvlTree {
    pub(crate) nodes: NodeArena<AvlNode>,
    pub(crate) root: NodeId,
}

/// Red-black tree with a per-instance NIL sentinel.
///
/// # Examples
///
/// ```
/// use treekit::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// for key in [10, 20, 30, 40, 50, 25] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.in_order(), vec![10, 20, 25, 30, 40, 50]);
/// assert_eq!(tree.to_string(), "[10, 20, 25, 30, 40, 50]");
/// ```
#[derive(Debug, Clone)]
pub struct RedBlackTree {
    pub(crate) nodes: NodeArena<RbNode>,
    /// BLACK sentinel used as every leaf link and as the parent of the root.
    pub(crate) nil: NodeId,
    pub(crate) root: NodeId,
}

/// Multi-key tree of minimum degree `t`, split on overflow.
///
/// Every non-root node holds between `t - 1` and `2t - 1` keys and all leaves
/// sit at the same depth. Leaves take new keys by append-and-sort.
///
/// # Examples
///
/// ```
/// use treekit::BPlusTree;
///
/// let mut tree = BPlusTree::new(3).unwrap();
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key);
/// }
/// assert!(tree.search(6));
/// assert!(!tree.search(15));
/// assert_eq!(tree.traverse()[0], "Level 0: [10]");
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree {
    pub(crate) min_degree: usize,
    pub(crate) nodes: NodeArena<BPlusNode>,
    pub(crate) root: NodeId,
}

/// Flat, array-backed range-sum tree.
///
/// `tree[n + i]` holds `data[i]`; `tree[i] = tree[2i] + tree[2i + 1]` for
/// `1 <= i < n`. Slot 0 is unused.
///
/// # Examples
///
/// ```
/// use treekit::SegmentTree;
///
/// let mut tree = SegmentTree::new(&[1, 3, 5, 7, 9, 11]);
/// assert_eq!(tree.query(1, 3), 15);
/// tree.update(1, 10);
/// assert_eq!(tree.query(1, 1), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTree {
    pub(crate) n: usize,
    pub(crate) tree: Vec<Key>,
}

/// Unbalanced binary search tree, used for the plain, degenerate and perfect
/// tree shapes.
#[derive(Debug, Clone)]
pub struct BinaryTree {
    pub(crate) nodes: NodeArena<BinaryNode>,
    pub(crate) root: NodeId,
}
