//! btree-index - An in-memory B-tree index over unique integer keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           TreeIndex                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  lookup / insert / count / dump            (index/btree/)       │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Search / Insert / Split algorithm               │   │
//! │  │   descend by key → insert in leaf → split on overflow    │   │
//! │  │   → parent absorbs promoted key → maybe grow new root    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              NodeStore (arena of Node)                   │   │
//! │  │   Leaf { keys } | Internal { keys, children }            │   │
//! │  │   addressed by NodeId, doubles when full                 │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Key, Error, config)
//! - [`index`] - The B-tree itself
//!
//! # Quick Start
//! ```
//! use btree_index::TreeIndex;
//!
//! let mut tree = TreeIndex::with_capacity(5).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.lookup(7));
//! assert!(!tree.lookup(99));
//! assert_eq!(tree.count(), 8);
//! println!("{}", tree.dump(tree.root()).unwrap());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_NODE_CAPACITY, MIN_NODE_CAPACITY};
pub use common::{Error, Key, NodeId, Result, TreeConfig};

pub use index::btree::{InsertStatus, Node, NodeDump, NodeStore, StatsSnapshot, TreeIndex, TreeStats};
