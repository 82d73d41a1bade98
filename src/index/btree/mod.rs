//! B+ tree index.
//!
//! # Components
//! - [`BPlusTree`] - The tree: insert with update-on-duplicate, exact lookup
//! - [`IndexStats`] - Insert and split counters
//! - `node` - Leaf / internal node variants stored in the tree's arena
//! - `check` - Structural invariant walk ([`BPlusTree::check`])

mod bplus_tree;
mod check;
mod node;
mod stats;

pub use bplus_tree::BPlusTree;
pub use stats::{IndexStats, StatsSnapshot};
