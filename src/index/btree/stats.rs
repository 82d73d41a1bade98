//! Index operation statistics.

use std::fmt;

/// Counters updated by the tree as it inserts and splits.
///
/// The tree is single-threaded and mutated through `&mut self`, so plain
/// integers are enough here.
///
/// # Example
/// ```
/// use bplus_index::BPlusTree;
///
/// let mut tree = BPlusTree::new();
/// for key in [10, 20, 5, 6] {
///     tree.insert(key, ());
/// }
/// let snapshot = tree.stats().snapshot();
/// assert_eq!(snapshot.inserts, 4);
/// assert_eq!(snapshot.leaf_splits, 1);
/// ```
#[derive(Debug, Default)]
pub struct IndexStats {
    /// Number of inserts that added a new key.
    pub(crate) inserts: u64,

    /// Number of inserts that overwrote an existing key.
    pub(crate) updates: u64,

    /// Number of leaf splits.
    pub(crate) leaf_splits: u64,

    /// Number of internal node splits.
    pub(crate) internal_splits: u64,

    /// Number of new roots created by a split (depth increases).
    pub(crate) root_splits: u64,
}

impl IndexStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of inserts that overwrote an existing key (0.0 to 1.0).
    pub fn update_rate(&self) -> f64 {
        self.snapshot().update_rate()
    }

    /// Get a copy of the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts,
            updates: self.updates,
            leaf_splits: self.leaf_splits,
            internal_splits: self.internal_splits,
            root_splits: self.root_splits,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A point-in-time snapshot of index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub leaf_splits: u64,
    pub internal_splits: u64,
    pub root_splits: u64,
}

impl StatsSnapshot {
    /// Fraction of inserts that overwrote an existing key (0.0 to 1.0).
    pub fn update_rate(&self) -> f64 {
        let total = self.inserts + self.updates;
        if total == 0 {
            0.0
        } else {
            self.updates as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, updates: {}, leaf_splits: {}, internal_splits: {}, root_splits: {}, update_rate: {:.2}% }}",
            self.inserts,
            self.updates,
            self.leaf_splits,
            self.internal_splits,
            self.root_splits,
            self.update_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = IndexStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
        assert_eq!(stats.update_rate(), 0.0);
    }

    #[test]
    fn test_stats_update_rate() {
        let mut stats = IndexStats::new();
        stats.inserts = 3;
        stats.updates = 1;

        assert_eq!(stats.update_rate(), 0.25);
        assert_eq!(stats.snapshot().update_rate(), 0.25);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = IndexStats::new();
        stats.inserts = 100;
        stats.leaf_splits = 40;

        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_display() {
        let mut stats = IndexStats::new();
        stats.inserts = 80;
        stats.updates = 20;
        stats.leaf_splits = 5;

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("inserts: 80"));
        assert!(display.contains("updates: 20"));
        assert!(display.contains("leaf_splits: 5"));
        assert!(display.contains("20.00%"));
    }
}
