//! Index structures.
//!
//! - [`btree`] - In-memory B+ tree

pub mod btree;
