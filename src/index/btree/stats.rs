//! Tree statistics tracking.

use std::fmt;

/// Structural counters maintained by a [`TreeIndex`](crate::TreeIndex).
///
/// The index is single-threaded and only mutates through `&mut self`, so
/// plain integers are enough here.
#[derive(Debug, Default, Clone)]
pub struct TreeStats {
    /// Number of leaf nodes that overflowed and split.
    pub leaf_splits: u64,

    /// Number of internal nodes that overflowed and split.
    pub internal_splits: u64,

    /// Number of times a new root was created above a split root.
    pub root_growths: u64,

    /// Number of inserts that found the key already present.
    pub duplicate_inserts: u64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current statistics.
    ///
    /// `arena_growths` comes from the node store, which counts its own
    /// doublings.
    pub fn snapshot(&self, arena_growths: u64) -> StatsSnapshot {
        StatsSnapshot {
            leaf_splits: self.leaf_splits,
            internal_splits: self.internal_splits,
            root_growths: self.root_growths,
            duplicate_inserts: self.duplicate_inserts,
            arena_growths,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A point-in-time copy of tree statistics.
///
/// # Example
/// ```
/// use btree_index::TreeIndex;
///
/// let mut tree = TreeIndex::new();
/// for key in 0..6 {
///     tree.insert(key);
/// }
/// let snapshot = tree.stats();
/// assert_eq!(snapshot.leaf_splits, 1);
/// assert_eq!(snapshot.root_growths, 1);
/// println!("{}", snapshot);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub leaf_splits: u64,
    pub internal_splits: u64,
    pub root_growths: u64,
    pub duplicate_inserts: u64,
    pub arena_growths: u64,
}

impl StatsSnapshot {
    /// Splits at any level.
    pub fn total_splits(&self) -> u64 {
        self.leaf_splits + self.internal_splits
    }

    /// Emit this snapshot to the tracing infrastructure.
    pub fn emit_tracing(&self) {
        tracing::info!(
            target: "btree_index::stats",
            leaf_splits = self.leaf_splits,
            internal_splits = self.internal_splits,
            root_growths = self.root_growths,
            duplicate_inserts = self.duplicate_inserts,
            arena_growths = self.arena_growths,
            "tree stats snapshot"
        );
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {} (leaf: {}, internal: {}), root_growths: {}, duplicates: {}, arena_growths: {} }}",
            self.total_splits(),
            self.leaf_splits,
            self.internal_splits,
            self.root_growths,
            self.duplicate_inserts,
            self.arena_growths
        )
    }
}
