//! B-tree index over unique integer keys.
//!
//! # Components
//! - [`TreeIndex`] - Lookup, insert, split and root growth
//! - [`NodeStore`] - Arena owning every [`Node`], addressed by `NodeId`
//! - [`Node`] - Leaf or internal node record
//! - [`NodeDump`] - Diagnostic formatting of a single node
//! - [`TreeStats`] - Split and growth counters

mod display;
mod node;
mod node_store;
mod stats;
mod tree_index;

pub use display::NodeDump;
pub use node::Node;
pub use node_store::NodeStore;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree_index::{InsertStatus, TreeIndex};
