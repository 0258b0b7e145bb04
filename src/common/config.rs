//! Configuration for the tree index.

use crate::common::{Error, Result};

/// Default maximum number of keys a node may hold before it splits.
///
/// Small enough that splits and root growth show up after a handful of
/// inserts, which keeps `dump` output readable.
pub const DEFAULT_NODE_CAPACITY: usize = 5;

/// Smallest supported node capacity.
///
/// With fewer than 3 keys per node an internal split would leave one side
/// without keys once the median is promoted.
pub const MIN_NODE_CAPACITY: usize = 3;

/// Number of node slots the arena reserves up front.
///
/// The arena doubles from here, so a single-leaf tree costs one slot.
pub const INITIAL_ARENA_CAPACITY: usize = 1;

/// Construction-time parameters of a [`TreeIndex`](crate::TreeIndex).
///
/// # Example
/// ```
/// use btree_index::TreeConfig;
///
/// let config = TreeConfig::default().with_node_capacity(8);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.split_point(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum number of keys per node.
    pub node_capacity: usize,
}

impl TreeConfig {
    /// Create a config with the given node capacity.
    pub fn new(node_capacity: usize) -> Self {
        Self { node_capacity }
    }

    /// Replace the node capacity.
    pub fn with_node_capacity(mut self, node_capacity: usize) -> Self {
        self.node_capacity = node_capacity;
        self
    }

    /// Check that the config describes a tree that can actually split.
    ///
    /// # Errors
    /// - `Error::InvalidNodeCapacity` if `node_capacity < MIN_NODE_CAPACITY`
    pub fn validate(&self) -> Result<()> {
        if self.node_capacity < MIN_NODE_CAPACITY {
            return Err(Error::InvalidNodeCapacity {
                capacity: self.node_capacity,
                min: MIN_NODE_CAPACITY,
            });
        }
        Ok(())
    }

    /// Number of keys the original node keeps when it overflows.
    ///
    /// An overflowing node holds `node_capacity + 1` keys; the lower
    /// `ceil((node_capacity + 1) / 2)` stay put. Applied identically to
    /// leaves and internal nodes.
    #[inline]
    pub fn split_point(&self) -> usize {
        (self.node_capacity + 1).div_ceil(2)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_CAPACITY)
    }
}
