//! The B+ tree index.
//!
//! [`BPlusTree`] maps unique ordered keys to values. Inserting an existing
//! key replaces its value. Nodes split when they exceed
//! [`IndexConfig::max_keys`]; splits cascade toward the root and the tree
//! only grows taller when the root itself splits.

use std::fmt;

use tracing::{debug, trace};

use crate::common::{IndexConfig, NodeId};
use crate::index::btree::node::{Node, NodeKind};
use crate::index::btree::IndexStats;

/// An in-memory B+ tree.
///
/// # Architecture
/// ```text
///                      ┌──────────────┐
///   root ─────────────▶│   [10]       │  Internal
///                      └──┬────────┬──┘
///                 key < 10│        │key >= 10
///                  ┌──────▼──┐  ┌──▼──────┐
///                  │ [5, 6]  │─▶│[10, 20] │─▶ None   Leaves (next chain)
///                  └─────────┘  └─────────┘
/// ```
///
/// # Storage
/// - `nodes`: arena of every node, indexed by [`NodeId`]
/// - Internal nodes own their children by id
/// - `parent` and leaf `next` ids are non-owning navigation links
/// - Dropping the tree drops the arena, releasing every node at once
///
/// # Thread Safety
/// None. `insert` takes `&mut self`; callers serialize access themselves.
///
/// # Example
/// ```
/// use bplus_index::BPlusTree;
///
/// let mut tree = BPlusTree::new();
/// tree.insert(10, "ten");
/// tree.insert(20, "twenty");
/// tree.insert(10, "TEN");
///
/// assert_eq!(tree.search(&10), Some(&"TEN"));
/// assert_eq!(tree.search(&99), None);
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug)]
pub struct BPlusTree<K, V> {
    /// Every node ever allocated. Nodes are never freed individually.
    pub(super) nodes: Vec<Node<K, V>>,

    /// Root node (None when empty).
    pub(super) root: Option<NodeId>,

    /// Number of key/value pairs.
    pub(super) len: usize,

    pub(super) config: IndexConfig,

    stats: IndexStats,
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Create an empty tree with the default order.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            len: 0,
            config,
            stats: IndexStats::new(),
        }
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Insert a key/value pair.
    ///
    /// If the key already exists its value is replaced and the old value is
    /// returned. The tree shape only changes when a new key is added.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            let mut leaf = Node::new_leaf();
            leaf.keys.push(key);
            if let NodeKind::Leaf { values, .. } = &mut leaf.kind {
                values.push(value);
            }
            let leaf_id = self.alloc(leaf);
            self.root = Some(leaf_id);
            self.len = 1;
            self.stats.inserts += 1;
            trace!(leaf = %leaf_id, "created first leaf");
            return None;
        };

        let leaf_id = self.descend(root, &key);
        let Node { keys, kind, .. } = &mut self.nodes[leaf_id.0];
        let NodeKind::Leaf { values, .. } = kind else {
            unreachable!("descend stopped at internal node {}", leaf_id);
        };

        match keys.binary_search(&key) {
            Ok(pos) => {
                // Existing key: overwrite in place, no structural change
                self.stats.updates += 1;
                return Some(std::mem::replace(&mut values[pos], value));
            }
            Err(pos) => {
                keys.insert(pos, key);
                values.insert(pos, value);
            }
        }

        self.len += 1;
        self.stats.inserts += 1;

        if self.nodes[leaf_id.0].len() > self.config.max_keys() {
            self.split_leaf(leaf_id);
        }

        None
    }

    /// Look up the value stored for `key`.
    pub fn search(&self, key: &K) -> Option<&V> {
        let leaf_id = self.find_leaf(key)?;
        let leaf = &self.nodes[leaf_id.0];
        let pos = leaf.find_key(key).ok()?;

        match &leaf.kind {
            NodeKind::Leaf { values, .. } => values.get(pos),
            NodeKind::Internal { .. } => unreachable!("find_leaf returned internal node {}", leaf_id),
        }
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    // ========================================================================
    // Internal: Lookup path
    // ========================================================================

    /// Find the leaf whose key range covers `key` (None if empty).
    pub(super) fn find_leaf(&self, key: &K) -> Option<NodeId> {
        self.root.map(|root| self.descend(root, key))
    }

    /// Walk from `start` down to a leaf, following separators.
    fn descend(&self, start: NodeId, key: &K) -> NodeId {
        let mut current = start;
        loop {
            let node = &self.nodes[current.0];
            match &node.kind {
                NodeKind::Leaf { .. } => return current,
                NodeKind::Internal { children } => current = children[node.child_index(key)],
            }
        }
    }

    // ========================================================================
    // Internal: Splits
    // ========================================================================

    /// Split an overflowing leaf and promote the right half's first key.
    ///
    /// The separator stays in the new leaf: leaves keep every key.
    fn split_leaf(&mut self, leaf_id: NodeId) {
        let leaf = &mut self.nodes[leaf_id.0];
        let mid = leaf.len().div_ceil(2);

        let right_keys = leaf.keys.split_off(mid);
        let (right_values, old_next) = match &mut leaf.kind {
            NodeKind::Leaf { values, next } => (values.split_off(mid), next.take()),
            NodeKind::Internal { .. } => unreachable!("split_leaf on internal node {}", leaf_id),
        };
        let separator = right_keys[0].clone();

        let right_id = self.alloc(Node {
            keys: right_keys,
            parent: None,
            kind: NodeKind::Leaf {
                values: right_values,
                next: old_next,
            },
        });

        // Splice the new leaf into the chain right after the old one
        if let NodeKind::Leaf { next, .. } = &mut self.nodes[leaf_id.0].kind {
            *next = Some(right_id);
        }

        self.stats.leaf_splits += 1;
        trace!(left = %leaf_id, right = %right_id, mid, "split leaf");

        self.insert_into_parent(leaf_id, separator, right_id);
    }

    /// Split an overflowing internal node and promote its middle key.
    ///
    /// Unlike a leaf split, the promoted key leaves both halves.
    fn split_internal(&mut self, node_id: NodeId) {
        let node = &mut self.nodes[node_id.0];
        let mid = node.len() / 2;

        let mut right_keys = node.keys.split_off(mid);
        let separator = right_keys.remove(0);
        let right_children = match &mut node.kind {
            NodeKind::Internal { children } => children.split_off(mid + 1),
            NodeKind::Leaf { .. } => unreachable!("split_internal on leaf {}", node_id),
        };

        // Moved children must point at the node that now owns them
        let right_id = NodeId::new(self.nodes.len());
        for child in &right_children {
            self.nodes[child.0].parent = Some(right_id);
        }
        let allocated = self.alloc(Node::new_internal(right_keys, right_children));
        debug_assert_eq!(allocated, right_id);

        self.stats.internal_splits += 1;
        trace!(left = %node_id, right = %right_id, mid, "split internal node");

        self.insert_into_parent(node_id, separator, right_id);
    }

    /// Hook a freshly split `right` node into the parent of `left`.
    ///
    /// Splitting the root creates a new root one level up; this is the only
    /// place the tree grows taller. Otherwise the parent may overflow and
    /// split in turn.
    fn insert_into_parent(&mut self, left: NodeId, separator: K, right: NodeId) {
        let Some(parent_id) = self.nodes[left.0].parent else {
            debug_assert_eq!(self.root, Some(left));

            let new_root = self.alloc(Node::new_internal(vec![separator], vec![left, right]));
            self.nodes[left.0].parent = Some(new_root);
            self.nodes[right.0].parent = Some(new_root);
            self.root = Some(new_root);

            self.stats.root_splits += 1;
            debug!(root = %new_root, depth = self.depth(), "grew new root");
            return;
        };

        let parent = &mut self.nodes[parent_id.0];
        let pos = parent.keys.partition_point(|k| k < &separator);
        parent.keys.insert(pos, separator);
        match &mut parent.kind {
            NodeKind::Internal { children } => {
                debug_assert_eq!(children[pos], left);
                children.insert(pos + 1, right);
            }
            NodeKind::Leaf { .. } => unreachable!("parent {} is a leaf", parent_id),
        }
        let overflow = parent.len() > self.config.max_keys();
        self.nodes[right.0].parent = Some(parent_id);

        if overflow {
            self.split_internal(parent_id);
        }
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

impl<K, V> BPlusTree<K, V> {
    /// Check if the tree holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of key/value pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of levels (0 when empty, 1 when the root is a leaf).
    ///
    /// All leaves sit at the same depth, so the leftmost path is enough.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.root;
        while let Some(id) = current {
            depth += 1;
            current = self.nodes[id.0].children().first().copied();
        }
        depth
    }

    /// Number of nodes allocated.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The tree's configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Insert/split statistics.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Mutable access to statistics (e.g. to reset them).
    pub fn stats_mut(&mut self) -> &mut IndexStats {
        &mut self.stats
    }
}

impl<K: Ord + Clone, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural dump, one node per line, indented by level.
///
/// ```text
/// [10] (internal)
///   [5, 6] (leaf)
///   [10, 20] (leaf)
/// ```
impl<K: fmt::Display, V> fmt::Display for BPlusTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            None => writeln!(f, "Empty tree"),
            Some(root) => self.fmt_node(f, root, 0),
        }
    }
}

impl<K: fmt::Display, V> BPlusTree<K, V> {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, level: usize) -> fmt::Result {
        let node = &self.nodes[id.0];

        write!(f, "{:indent$}[", "", indent = level * 2)?;
        for (i, key) in node.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", key)?;
        }

        if node.is_leaf() {
            writeln!(f, "] (leaf)")
        } else {
            writeln!(f, "] (internal)")?;
            for &child in node.children() {
                self.fmt_node(f, child, level + 1)?;
            }
            Ok(())
        }
    }
}
