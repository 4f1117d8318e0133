//! Self-balancing and indexed trees over integer keys.
//!
//! This crate provides an AVL tree, a red-black tree, a B+ tree with a
//! configurable minimum degree, an array-backed range-sum segment tree, plain
//! binary trees, and a set of slice sorting routines. Linked trees keep their
//! nodes in a per-instance [`NodeArena`] and link them by [`NodeId`].
//!
//! None of the structures synchronize internally; wrap an instance in a lock
//! to share it between threads.

#[macro_use]
mod macros;

mod arena;
mod error;
mod types;
mod construction;
mod iteration;
mod avl;
mod red_black;
mod bplus;
mod segment_tree;
mod binary_tree;
mod validation;

pub mod sorting;

pub use arena::{NodeArena, NodeArenaStats};
pub use construction::{DEFAULT_MIN_DEGREE, MIN_DEGREE};
pub use error::{InitResult, KeyResult, ModifyResult, TreeError, TreeResult, TreeResultExt};
pub use iteration::KeyIterator;
pub use types::{
    AvlNode, AvlTree, BPlusNode, BPlusTree, BinaryLinks, BinaryNode, BinaryTree, Color,
    Direction, Key, NodeId, RbNode, RedBlackTree, SegmentTree, NULL_NODE,
};
