//! Error types for the index.

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the index.
///
/// `insert` and `search` never fail; errors only come from building a
/// config or from an explicit structural check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Branching order too small to split nodes.
    #[error("Invalid order {order}: must be at least {min}")]
    InvalidOrder { order: usize, min: usize },

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug - splits must preserve every invariant.
    #[error("Invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },
}

impl Error {
    pub(crate) fn violation(node: NodeId, reason: impl Into<String>) -> Self {
        Error::InvariantViolation {
            node,
            reason: reason.into(),
        }
    }
}
