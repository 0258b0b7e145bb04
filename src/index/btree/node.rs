//! Node - a single record in the B-tree.
//!
//! A [`Node`] is either a leaf (sorted keys only) or an internal node
//! (sorted keys plus one more child handle than keys). The variant is the
//! leaf/internal discriminator; there is no nullable children array.

use crate::common::{Key, NodeId};

/// A node in the B-tree.
///
/// # Layout
/// ```text
/// Leaf:      keys: [k0, k1, ..., kn-1]
///
/// Internal:  keys:      [k0,  k1,  ..., kn-1]
///            children: [c0, c1, c2, ...,     cn]
///                        │   │
///                        │   └─ keys in [k0, k1)
///                        └───── keys < k0
/// ```
///
/// Between public operations a node holds at most `node_capacity` keys.
/// During a split it may briefly hold one more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Bottom level; stores every key of the index.
    Leaf {
        /// Strictly increasing keys.
        keys: Vec<Key>,
    },
    /// Routing node; `children.len() == keys.len() + 1`.
    Internal {
        /// Strictly increasing separator keys.
        keys: Vec<Key>,
        /// Child handles, aligned so `children[i]` precedes `keys[i]`.
        children: Vec<NodeId>,
    },
}

/// Where a key belongs inside one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// The key is stored at this index.
    Found(usize),
    /// The key is absent; this is the number of keys smaller than it, which
    /// is both its insertion position and the child to descend into.
    Gap(usize),
}

impl Node {
    /// Create an empty leaf with room for one overflow key.
    pub(crate) fn leaf(node_capacity: usize) -> Self {
        Node::Leaf {
            keys: Vec::with_capacity(node_capacity + 1),
        }
    }

    /// Create an empty internal node with room for one overflow key/child.
    pub(crate) fn internal(node_capacity: usize) -> Self {
        Node::Internal {
            keys: Vec::with_capacity(node_capacity + 1),
            children: Vec::with_capacity(node_capacity + 2),
        }
    }

    /// True if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Sorted keys of this node.
    #[inline]
    pub fn keys(&self) -> &[Key] {
        match self {
            Node::Leaf { keys } | Node::Internal { keys, .. } => keys,
        }
    }

    /// Child handles; empty for leaves.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }

    /// Number of keys currently stored.
    #[inline]
    pub fn count(&self) -> usize {
        self.keys().len()
    }

    /// Append the upper half produced by a split.
    ///
    /// `children` must be empty for a leaf.
    pub(crate) fn extend_from_split(&mut self, upper_keys: Vec<Key>, upper_children: Vec<NodeId>) {
        match self {
            Node::Leaf { keys } => {
                debug_assert!(upper_children.is_empty());
                keys.extend(upper_keys);
            }
            Node::Internal { keys, children } => {
                keys.extend(upper_keys);
                children.extend(upper_children);
            }
        }
    }

    /// Binary search for `key` in this node.
    #[inline]
    pub(crate) fn search(&self, key: Key) -> Slot {
        match self.keys().binary_search(&key) {
            Ok(pos) => Slot::Found(pos),
            Err(pos) => Slot::Gap(pos),
        }
    }
}
