//! Configuration for the B+ tree index.

use crate::common::{Error, Result};

/// Default branching order (maximum children per internal node).
///
/// # Node Capacity
/// With order 4:
/// - Max keys per node: 3
/// - Min keys per non-root node: 1
/// - Max children per internal node: 4
pub const ORDER: usize = 4;

/// Maximum keys a node may hold before it must split.
pub const MAX_KEYS: usize = ORDER - 1;

/// Minimum keys in a non-root node, `ceil(ORDER / 2) - 1`.
///
/// Only a target: nothing removes keys, so nothing enforces it.
pub const MIN_KEYS: usize = ORDER.div_ceil(2) - 1;

/// Smallest order that still leaves keys on both halves of an internal split.
pub const MIN_ORDER: usize = 3;

/// Per-tree configuration.
///
/// # Example
/// ```
/// use bplus_index::IndexConfig;
///
/// let config = IndexConfig::new(8).unwrap();
/// assert_eq!(config.max_keys(), 7);
/// assert_eq!(config.min_keys(), 3);
///
/// assert!(IndexConfig::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    order: usize,
}

impl IndexConfig {
    /// Create a config with the given branching order.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order,
                min: MIN_ORDER,
            });
        }
        Ok(Self { order })
    }

    /// Branching order (max children per internal node).
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Max keys per node.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.order - 1
    }

    /// Min keys per non-root node.
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.order.div_ceil(2) - 1
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { order: ORDER }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(ORDER, 4);
        assert_eq!(MAX_KEYS, 3);
        assert_eq!(MIN_KEYS, 1);

        let config = IndexConfig::default();
        assert_eq!(config.order(), ORDER);
        assert_eq!(config.max_keys(), MAX_KEYS);
        assert_eq!(config.min_keys(), MIN_KEYS);
    }

    #[test]
    fn test_odd_order() {
        // ceil(5/2) - 1 = 2
        let config = IndexConfig::new(5).unwrap();
        assert_eq!(config.max_keys(), 4);
        assert_eq!(config.min_keys(), 2);
    }

    #[test]
    fn test_order_too_small() {
        match IndexConfig::new(2) {
            Err(Error::InvalidOrder { order, min }) => {
                assert_eq!(order, 2);
                assert_eq!(min, MIN_ORDER);
            }
            other => panic!("Expected InvalidOrder, got {:?}", other),
        }
        assert!(IndexConfig::new(MIN_ORDER).is_ok());
    }
}
