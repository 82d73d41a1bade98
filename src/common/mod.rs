//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives:
//! - Configuration constants and [`IndexConfig`]
//! - Error types
//! - Identifiers ([`NodeId`])

pub mod config;
pub mod error;
mod node_id;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use node_id::NodeId;
