//! Node arena shared by every linked tree in the crate.
//!
//! Nodes live in a `Vec<T>` with an allocation mask and a free list, so a tree
//! addresses its nodes by `NodeId` and never holds owning pointers between
//! nodes. Parent links in the red-black tree are plain ids into the same arena.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

use crate::types::{NodeId, NULL_NODE};

/// Statistics for a node arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

/// Arena allocator owning the nodes of a single tree instance.
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    /// Direct storage; freed slots hold `T::default()` until reused
    storage: Vec<T>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    /// Track which slots are actually allocated
    allocated_mask: Vec<bool>,
    allocated: usize,
}

impl<T> NodeArena<T> {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
            allocated: 0,
        }
    }

    /// Create a new arena with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            allocated_mask: Vec::with_capacity(capacity),
            allocated: 0,
        }
    }

    /// Allocate a new node in the arena and return its ID
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        self.allocated += 1;

        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            free_index
        } else {
            let index = self.storage.len();
            self.storage.push(item);
            self.allocated_mask.push(true);
            index
        };

        NodeId::try_from(index).expect("Index should fit in NodeId")
    }

    /// Deallocate a node and return it, leaving `T::default()` in the slot
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T>
    where
        T: Default,
    {
        let index = self.allocated_index(id)?;

        self.allocated_mask[index] = false;
        self.free_list.push(index);
        self.allocated -= 1;

        Some(std::mem::take(&mut self.storage[index]))
    }

    /// Get a reference to a node in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.allocated_index(id).map(|index| &self.storage[index])
    }

    /// Get a mutable reference to a node in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.allocated_index(id) {
            Some(index) => Some(&mut self.storage[index]),
            None => None,
        }
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.allocated_index(id).is_some()
    }

    fn allocated_index(&self, id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }

        let index = usize::try_from(id).ok()?;
        if self.allocated_mask.get(index).copied().unwrap_or(false) {
            Some(index)
        } else {
            None
        }
    }

    /// Get arena statistics
    pub fn stats(&self) -> NodeArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.allocated;
        let free_count = self.free_list.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        NodeArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }

    /// Get the number of allocated nodes
    pub fn len(&self) -> usize {
        self.allocated
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.allocated == 0
    }

    /// Get the number of free slots
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Clear all nodes from the arena
    pub fn clear(&mut self) {
        self.storage.clear();
        self.allocated_mask.clear();
        self.free_list.clear();
        self.allocated = 0;
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics on a null or freed id: following a dangling link is a caller bug.
impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match self.allocated_index(id) {
            Some(index) => &self.storage[index],
            None => panic!("node {} is not allocated in this arena", id),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.allocated_index(id) {
            Some(index) => &mut self.storage[index],
            None => panic!("node {} is not allocated in this arena", id),
        }
    }
}
