//! Error types for the tree index.

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the tree index.
///
/// Inserting a key that is already present is *not* an error; see
/// [`InsertStatus`](crate::InsertStatus).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested node capacity is too small to split.
    #[error("Invalid node capacity {capacity} (minimum is {min})")]
    InvalidNodeCapacity { capacity: usize, min: usize },

    /// The handle was never issued by the node store.
    #[error("{0} not found")]
    NodeNotFound(NodeId),

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug in the index itself, never bad input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NodeNotFound(NodeId::new(42));
        assert_eq!(format!("{}", err), "Node(42) not found");

        let err = Error::InvalidNodeCapacity { capacity: 2, min: 3 };
        assert_eq!(format!("{}", err), "Invalid node capacity 2 (minimum is 3)");

        let err = Error::InvariantViolation("keys out of order".to_string());
        assert_eq!(format!("{}", err), "Invariant violation: keys out of order");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
