//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`TreeConfig`]
//! - Error types
//! - Identifiers ([`NodeId`]) and the [`Key`] type

pub mod config;
pub mod error;
mod node_id;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use node_id::NodeId;

/// Key type stored in the index.
pub type Key = i64;
