//! B+ tree node variants.
//!
//! Every node carries its sorted keys and a parent link. The variant holds
//! what differs:
//! - [`NodeKind::Leaf`] - values aligned with keys, plus the `next` sibling
//! - [`NodeKind::Internal`] - child ids, one more than keys
//!
//! Links are [`NodeId`]s into the tree's arena. Only `children` edges are
//! owning; `parent` and `next` are for navigation.

use crate::common::NodeId;

/// A single node in the arena.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    /// Strictly ascending keys.
    pub(crate) keys: Vec<K>,

    /// Internal node that owns this one (None for the root).
    pub(crate) parent: Option<NodeId>,

    pub(crate) kind: NodeKind<V>,
}

#[derive(Debug)]
pub(crate) enum NodeKind<V> {
    Leaf {
        /// `values[i]` belongs to `keys[i]`.
        values: Vec<V>,
        /// Next leaf in ascending key order.
        next: Option<NodeId>,
    },
    Internal {
        /// `children.len() == keys.len() + 1`.
        children: Vec<NodeId>,
    },
}

impl<K, V> Node<K, V> {
    /// Create an empty leaf.
    pub(crate) fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            parent: None,
            kind: NodeKind::Leaf {
                values: Vec::new(),
                next: None,
            },
        }
    }

    /// Create an internal node from already-split halves.
    pub(crate) fn new_internal(keys: Vec<K>, children: Vec<NodeId>) -> Self {
        debug_assert_eq!(children.len(), keys.len() + 1);
        Self {
            keys,
            parent: None,
            kind: NodeKind::Internal { children },
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Child ids, or an empty slice for a leaf.
    pub(crate) fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Internal { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }
}

impl<K: Ord, V> Node<K, V> {
    /// Child slot to descend into for `key`.
    ///
    /// Skips every separator `<= key`, so keys equal to a separator go right.
    pub(crate) fn child_index(&self, key: &K) -> usize {
        self.keys.partition_point(|sep| sep <= key)
    }

    /// Position of `key` in this node: `Ok` if present, `Err` with the
    /// insertion point otherwise.
    #[inline]
    pub(crate) fn find_key(&self, key: &K) -> Result<usize, usize> {
        self.keys.binary_search(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leaf() {
        let leaf: Node<i32, &str> = Node::new_leaf();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.len(), 0);
        assert!(leaf.parent.is_none());
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_new_internal() {
        let node: Node<i32, ()> = Node::new_internal(vec![10], vec![NodeId::new(0), NodeId::new(1)]);
        assert!(!node.is_leaf());
        assert_eq!(node.len(), 1);
        assert_eq!(node.children(), &[NodeId::new(0), NodeId::new(1)]);
    }

    #[test]
    fn test_child_index_equal_goes_right() {
        let node: Node<i32, ()> = Node::new_internal(
            vec![10, 20],
            vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)],
        );

        assert_eq!(node.child_index(&5), 0);
        assert_eq!(node.child_index(&9), 0);
        assert_eq!(node.child_index(&10), 1); // Equal to separator: right side
        assert_eq!(node.child_index(&15), 1);
        assert_eq!(node.child_index(&20), 2);
        assert_eq!(node.child_index(&99), 2);
    }

    #[test]
    fn test_find_key() {
        let mut leaf: Node<i32, ()> = Node::new_leaf();
        leaf.keys = vec![5, 10, 20];

        assert_eq!(leaf.find_key(&10), Ok(1));
        assert_eq!(leaf.find_key(&6), Err(1));
        assert_eq!(leaf.find_key(&1), Err(0));
        assert_eq!(leaf.find_key(&99), Err(3));
    }
}
