//! bplus-index - An in-memory B+ tree mapping unique ordered keys to values.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        BPlusTree<K, V>                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Public API (index/btree/bplus_tree.rs)          │   │
//! │  │        insert (update on duplicate) · search · len       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │      Split cascade: leaf split → promote → internal      │   │
//! │  │          split → ... → new root (depth + 1)              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Node arena (index/btree/node.rs)              │   │
//! │  │   Vec<Node> indexed by NodeId · Leaf | Internal variant  │   │
//! │  │   children = owning edges · parent / next = navigation   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - Index structures (B+ tree)
//!
//! # Quick Start
//! ```
//! use bplus_index::{BPlusTree, IndexConfig};
//!
//! let mut tree = BPlusTree::with_config(IndexConfig::new(4).unwrap());
//! for (key, value) in [(10, "a"), (20, "b"), (5, "c"), (6, "d")] {
//!     tree.insert(key, value);
//! }
//!
//! assert_eq!(tree.search(&6), Some(&"d"));
//! assert_eq!(tree.search(&99), None);
//! assert_eq!(tree.depth(), 2);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{MAX_KEYS, MIN_KEYS, ORDER};
pub use common::{Error, IndexConfig, NodeId, Result};

pub use index::btree::{BPlusTree, IndexStats, StatsSnapshot};
