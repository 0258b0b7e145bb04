//! Human-readable dumps of tree nodes.

use std::fmt;

use crate::common::NodeId;
use crate::index::btree::Node;

/// Display adapter for a single node.
///
/// # Format
/// ```text
/// Node 0 (internal)
///   keys: Value0=12
///   children: Child0=1 Child1=2
/// ```
/// Leaves print no `children` line.
pub struct NodeDump<'a> {
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeDump<'a> {
    /// Wrap a node for display.
    pub fn new(id: NodeId, node: &'a Node) -> Self {
        Self { id, node }
    }
}

impl fmt::Display for NodeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.node.is_leaf() { "leaf" } else { "internal" };
        writeln!(f, "Node {} ({})", self.id.0, kind)?;

        write!(f, "  keys:")?;
        for (i, key) in self.node.keys().iter().enumerate() {
            write!(f, " Value{}={}", i, key)?;
        }

        if !self.node.is_leaf() {
            write!(f, "\n  children:")?;
            for (i, child) in self.node.children().iter().enumerate() {
                write!(f, " Child{}={}", i, child.0)?;
            }
        }
        Ok(())
    }
}
