//! Tree Index - the public face of the B-tree.
//!
//! The [`TreeIndex`] provides:
//! - Membership lookup
//! - Unique-key insertion with node splitting and root growth
//! - Diagnostic dumps and invariant checking

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::common::{Error, Key, NodeId, Result, TreeConfig};
use crate::index::btree::node::Slot;
use crate::index::btree::{Node, NodeDump, NodeStore, StatsSnapshot, TreeStats};

/// Outcome of a public [`TreeIndex::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStatus {
    /// The key was new and is now stored.
    Inserted,
    /// The key was already present; nothing changed.
    AlreadyExists,
}

impl InsertStatus {
    /// True if the insert added a key.
    #[inline]
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertStatus::Inserted)
    }
}

/// Result of inserting into one subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeInsert {
    AlreadyExists,
    Inserted,
    /// The subtree root split; the caller must absorb `promoted` and place
    /// `sibling` directly to the right of the child it descended into.
    Split { promoted: Key, sibling: NodeId },
}

/// An in-memory B-tree over unique integer keys.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                        TreeIndex                         │
/// │  root ──┐                                                │
/// │         ▼                                                │
/// │  ┌────────────────────────────────────────────────────┐  │
/// │  │             store: NodeStore (arena)               │  │
/// │  │  [Node0] [Node1] [Node2] ...   (indexed by NodeId) │  │
/// │  └────────────────────────────────────────────────────┘  │
/// │  len: live keys     config: TreeConfig    stats          │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// Leaves hold every key. When a leaf splits, the first key of the new
/// right leaf is copied into the parent; when an internal node splits, its
/// median moves up. Either way every separator equals the smallest key in
/// the subtree to its right.
///
/// # Thread Safety
/// None built in. Mutation takes `&mut self`; share across threads by
/// wrapping the whole index in one lock.
///
/// # Example
/// ```
/// use btree_index::{InsertStatus, TreeIndex};
///
/// let mut tree = TreeIndex::new();
/// assert_eq!(tree.insert(10), InsertStatus::Inserted);
/// assert_eq!(tree.insert(10), InsertStatus::AlreadyExists);
///
/// assert!(tree.lookup(10));
/// assert!(!tree.lookup(11));
/// assert_eq!(tree.count(), 1);
/// ```
#[derive(Debug)]
pub struct TreeIndex {
    /// Owns every node.
    store: NodeStore,

    /// Current root; replaced only when the root splits.
    root: NodeId,

    /// Number of distinct keys stored.
    len: usize,

    config: TreeConfig,

    stats: TreeStats,
}

impl TreeIndex {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self::build(TreeConfig::default())
    }

    /// Create an empty index whose nodes hold up to `node_capacity` keys.
    ///
    /// # Errors
    /// - `Error::InvalidNodeCapacity` if `node_capacity < 3`
    pub fn with_capacity(node_capacity: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(node_capacity))
    }

    /// Create an empty index from a config.
    ///
    /// # Errors
    /// - `Error::InvalidNodeCapacity` if the config fails validation
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TreeConfig) -> Self {
        let mut store = NodeStore::new(config.node_capacity);
        let root = store.allocate_leaf();

        debug!(
            target: "btree_index::tree",
            node_capacity = config.node_capacity,
            "created tree index"
        );

        Self {
            store,
            root,
            len: 0,
            config,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Lookup and insert
    // ========================================================================

    /// True if `key` is stored in the index.
    pub fn lookup(&self, key: Key) -> bool {
        let mut current = self.root;
        loop {
            let node = self.store.node(current);
            let pos = match node.search(key) {
                Slot::Found(_) => return true,
                Slot::Gap(pos) => pos,
            };
            match node {
                Node::Leaf { .. } => return false,
                Node::Internal { children, .. } => current = children[pos],
            }
        }
    }

    /// Insert `key` if it is not already present.
    ///
    /// Inserting an existing key is a no-op: the tree shape and
    /// [`count`](Self::count) are unchanged.
    pub fn insert(&mut self, key: Key) -> InsertStatus {
        match self.insert_into(self.root, key) {
            NodeInsert::AlreadyExists => {
                self.stats.duplicate_inserts += 1;
                return InsertStatus::AlreadyExists;
            }
            NodeInsert::Inserted => {}
            NodeInsert::Split { promoted, sibling } => self.grow_root(promoted, sibling),
        }

        self.len += 1;
        InsertStatus::Inserted
    }

    /// Number of distinct keys stored.
    #[inline]
    pub fn count(&self) -> usize {
        self.len
    }

    /// True if no key has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ========================================================================
    // Public API: Introspection
    // ========================================================================

    /// Render one node's keys and, for internal nodes, its child handles.
    ///
    /// # Errors
    /// - `Error::NodeNotFound` if `id` was never allocated
    pub fn dump(&self, id: NodeId) -> Result<String> {
        let node = self.store.get(id).ok_or(Error::NodeNotFound(id))?;
        Ok(NodeDump::new(id, node).to_string())
    }

    /// Render every node, breadth-first from the root.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        let mut queue = VecDeque::from([(self.root, 0usize)]);

        while let Some((id, depth)) = queue.pop_front() {
            let node = self.store.node(id);
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("depth {}: {}", depth, NodeDump::new(id, node)));
            queue.extend(node.children().iter().map(|&child| (child, depth + 1)));
        }
        out
    }

    /// Handle of the current root.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Read-only access to a node, or `None` for an unknown handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    /// Number of nodes allocated so far.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Number of levels; a lone leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.store.node(self.root);
        while let Some(&first) = current.children().first() {
            current = self.store.node(first);
            height += 1;
        }
        height
    }

    /// Maximum number of keys per node.
    #[inline]
    pub fn node_capacity(&self) -> usize {
        self.config.node_capacity
    }

    /// The configuration this index was built with.
    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// All keys in ascending order, read from the leaves left to right.
    pub fn keys(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            match self.store.node(id) {
                Node::Leaf { keys: leaf_keys } => keys.extend_from_slice(leaf_keys),
                // Reversed so the leftmost child is visited first
                Node::Internal { children, .. } => stack.extend(children.iter().rev()),
            }
        }
        keys
    }

    /// Snapshot of the structural counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.store.growths())
    }

    /// Zero the split/duplicate counters.
    ///
    /// Arena growth is a property of the store and is not reset.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // ========================================================================
    // Insert internals
    // ========================================================================

    fn insert_into(&mut self, id: NodeId, key: Key) -> NodeInsert {
        let node = self.store.node(id);
        // Separators are copies of leaf keys, so a match anywhere on the
        // path means the key is stored.
        let pos = match node.search(key) {
            Slot::Found(_) => return NodeInsert::AlreadyExists,
            Slot::Gap(pos) => pos,
        };

        let child = match node {
            Node::Leaf { .. } => return self.insert_into_leaf(id, pos, key),
            Node::Internal { children, .. } => children[pos],
        };

        match self.insert_into(child, key) {
            NodeInsert::Split { promoted, sibling } => self.absorb(id, pos, promoted, sibling),
            outcome => outcome,
        }
    }

    /// Insert `key` at `pos` of leaf `id`, splitting if it overflows.
    fn insert_into_leaf(&mut self, id: NodeId, pos: usize, key: Key) -> NodeInsert {
        let split_point = self.config.split_point();
        let node_capacity = self.config.node_capacity;

        let upper = match self.store.node_mut(id) {
            Node::Leaf { keys } => {
                keys.insert(pos, key);
                if keys.len() <= node_capacity {
                    return NodeInsert::Inserted;
                }
                keys.split_off(split_point)
            }
            Node::Internal { .. } => panic!("corrupt tree: {} is not a leaf", id),
        };

        let promoted = upper[0];
        let sibling = self.store.allocate_leaf();
        self.store.node_mut(sibling).extend_from_split(upper, Vec::new());
        self.stats.leaf_splits += 1;

        trace!(
            target: "btree_index::split",
            node = id.0,
            sibling = sibling.0,
            promoted,
            "split leaf"
        );

        NodeInsert::Split { promoted, sibling }
    }

    /// Place a child's promoted key and new sibling into internal node `id`.
    ///
    /// `pos` is the index of the child that split. On overflow the node
    /// keeps `split_point` keys, its median key moves up, and the rest go
    /// to a new internal sibling.
    fn absorb(&mut self, id: NodeId, pos: usize, promoted: Key, sibling: NodeId) -> NodeInsert {
        let split_point = self.config.split_point();
        let node_capacity = self.config.node_capacity;

        let (median, upper_keys, upper_children) = match self.store.node_mut(id) {
            Node::Internal { keys, children } => {
                keys.insert(pos, promoted);
                children.insert(pos + 1, sibling);
                if keys.len() <= node_capacity {
                    return NodeInsert::Inserted;
                }

                let upper_keys = keys.split_off(split_point + 1);
                let median = keys.remove(split_point);
                let upper_children = children.split_off(split_point + 1);
                (median, upper_keys, upper_children)
            }
            Node::Leaf { .. } => panic!("corrupt tree: leaf {} cannot absorb a split", id),
        };

        let new_node = self.store.allocate_internal();
        self.store
            .node_mut(new_node)
            .extend_from_split(upper_keys, upper_children);
        self.stats.internal_splits += 1;

        trace!(
            target: "btree_index::split",
            node = id.0,
            sibling = new_node.0,
            promoted = median,
            "split internal node"
        );

        NodeInsert::Split {
            promoted: median,
            sibling: new_node,
        }
    }

    /// Put a new root above the old one after the old root split.
    fn grow_root(&mut self, promoted: Key, sibling: NodeId) {
        let old_root = self.root;
        let new_root = self.store.allocate_internal();
        self.store
            .node_mut(new_root)
            .extend_from_split(vec![promoted], vec![old_root, sibling]);
        self.root = new_root;
        self.stats.root_growths += 1;

        debug!(
            target: "btree_index::tree",
            old_root = old_root.0,
            new_root = new_root.0,
            promoted,
            height = self.height(),
            "grew new root"
        );
    }

    // ========================================================================
    // Invariant checking
    // ========================================================================

    /// Verify every structural invariant of the tree.
    ///
    /// Checks key ordering and separator bounds, occupancy, child counts,
    /// uniform leaf depth, reachability of every allocated node, separator
    /// placement, and the live-key count.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first broken invariant.
    ///   Any such error is a bug in the index.
    pub fn check_invariants(&self) -> Result<()> {
        let mut walk = Walk {
            leaf_depth: None,
            leaf_keys: 0,
            visited: vec![false; self.store.len()],
        };
        self.check_node(self.root, 0, None, None, &mut walk)?;

        let reachable = walk.visited.iter().filter(|&&v| v).count();
        if reachable != self.store.len() {
            return Err(violation(format!(
                "{} of {} allocated nodes are reachable from the root",
                reachable,
                self.store.len()
            )));
        }
        if walk.leaf_keys != self.len {
            return Err(violation(format!(
                "leaves hold {} keys but count is {}",
                walk.leaf_keys, self.len
            )));
        }
        Ok(())
    }

    /// Check the subtree at `id`, whose keys must lie in `[lower, upper)`.
    fn check_node(
        &self,
        id: NodeId,
        depth: usize,
        lower: Option<Key>,
        upper: Option<Key>,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = self.store.get(id).ok_or_else(|| violation(format!("{} is dangling", id)))?;

        match walk.visited.get_mut(id.0) {
            Some(seen) if *seen => return Err(violation(format!("{} is reachable twice", id))),
            Some(seen) => *seen = true,
            None => return Err(violation(format!("{} is out of range", id))),
        }

        let keys = node.keys();
        if keys.len() > self.config.node_capacity {
            return Err(violation(format!(
                "{} holds {} keys (capacity {})",
                id,
                keys.len(),
                self.config.node_capacity
            )));
        }
        if id != self.root && keys.is_empty() {
            return Err(violation(format!("non-root {} is empty", id)));
        }
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            return Err(violation(format!("{} keys are not strictly increasing", id)));
        }
        if let (Some(lo), Some(&first)) = (lower, keys.first()) {
            if first < lo {
                return Err(violation(format!("{} key {} is below bound {}", id, first, lo)));
            }
        }
        if let (Some(hi), Some(&last)) = (upper, keys.last()) {
            if last >= hi {
                return Err(violation(format!("{} key {} is not below bound {}", id, last, hi)));
            }
        }

        let children = match node {
            Node::Leaf { .. } => {
                match walk.leaf_depth {
                    Some(expected) if expected != depth => {
                        return Err(violation(format!(
                            "leaf {} at depth {} but other leaves are at depth {}",
                            id, depth, expected
                        )));
                    }
                    Some(_) => {}
                    None => walk.leaf_depth = Some(depth),
                }
                walk.leaf_keys += keys.len();
                return Ok(());
            }
            Node::Internal { children, .. } => children,
        };

        if keys.is_empty() {
            return Err(violation(format!("internal {} has no keys", id)));
        }
        if children.len() != keys.len() + 1 {
            return Err(violation(format!(
                "internal {} has {} keys but {} children",
                id,
                keys.len(),
                children.len()
            )));
        }

        for (i, &child) in children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { Some(keys[i - 1]) };
            let child_upper = keys.get(i).copied().or(upper);
            self.check_node(child, depth + 1, child_lower, child_upper, walk)?;

            if i > 0 && self.leftmost_key(child) != Some(keys[i - 1]) {
                return Err(violation(format!(
                    "separator {} of {} is not the smallest key of {}",
                    keys[i - 1],
                    id,
                    child
                )));
            }
        }
        Ok(())
    }

    /// Smallest key stored under `id`.
    fn leftmost_key(&self, id: NodeId) -> Option<Key> {
        let mut node = self.store.get(id)?;
        while let Some(&first) = node.children().first() {
            node = self.store.get(first)?;
        }
        node.keys().first().copied()
    }
}

/// Accumulated state of one invariant walk.
struct Walk {
    leaf_depth: Option<usize>,
    leaf_keys: usize,
    visited: Vec<bool>,
}

fn violation(msg: String) -> Error {
    Error::InvariantViolation(msg)
}

impl Default for TreeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Key> for TreeIndex {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<Key> for TreeIndex {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = TreeIndex::new();
        tree.extend(iter);
        tree
    }
}
