//! Node Store - the arena that owns every node of a tree.
//!
//! Nodes are addressed by [`NodeId`] handles issued in allocation order.
//! Deletion is not supported, so a handle stays valid for the lifetime of
//! the store and is never handed out twice.

use tracing::trace;

use crate::common::config::INITIAL_ARENA_CAPACITY;
use crate::common::NodeId;
use crate::index::btree::Node;

/// Growable arena of B-tree nodes.
///
/// # Growth
/// Backing storage doubles whenever an allocation finds it full, so a
/// sequence of N allocations costs amortized O(1) each.
#[derive(Debug)]
pub struct NodeStore {
    /// All nodes, indexed by `NodeId.0`.
    nodes: Vec<Node>,

    /// Capacity (in keys) given to every node created here.
    node_capacity: usize,

    /// Number of times the backing storage was doubled.
    growths: u64,
}

impl NodeStore {
    /// Create an empty store for nodes holding up to `node_capacity` keys.
    pub fn new(node_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(INITIAL_ARENA_CAPACITY),
            node_capacity,
            growths: 0,
        }
    }

    /// Allocate an empty leaf and return its handle.
    pub fn allocate_leaf(&mut self) -> NodeId {
        let node = Node::leaf(self.node_capacity);
        self.push(node)
    }

    /// Allocate an empty internal node and return its handle.
    ///
    /// Children are filled in by the caller; an internal node is only
    /// well-formed once it has `keys + 1` children.
    pub fn allocate_internal(&mut self) -> NodeId {
        let node = Node::internal(self.node_capacity);
        self.push(node)
    }

    /// Get a node by handle, or `None` if the handle was never issued.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable access to a node by handle.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get a node the store itself handed out.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this store. Every handle reachable
    /// from the root was, so hitting this means the tree is corrupt.
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0) {
            Some(node) => node,
            None => panic!("corrupt tree: {} was never allocated", id),
        }
    }

    /// Mutable variant of [`node`](Self::node).
    ///
    /// # Panics
    /// Panics if `id` was not issued by this store.
    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.0) {
            Some(node) => node,
            None => panic!("corrupt tree: {} was never allocated", id),
        }
    }

    /// Number of nodes allocated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node has been allocated yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of node slots currently reserved.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of times the backing storage has been doubled.
    #[inline]
    pub fn growths(&self) -> u64 {
        self.growths
    }

    /// Iterate over `(handle, node)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.ensure_capacity();
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Double the backing storage if the next push would not fit.
    fn ensure_capacity(&mut self) {
        let capacity = self.nodes.capacity();
        if self.nodes.len() < capacity {
            return;
        }

        let additional = capacity.max(INITIAL_ARENA_CAPACITY);
        self.nodes.reserve_exact(additional);
        self.growths += 1;

        trace!(
            target: "btree_index::arena",
            from = capacity,
            to = self.nodes.capacity(),
            "grew node store"
        );
    }
}
