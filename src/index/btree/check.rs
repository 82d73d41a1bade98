//! Structural self-check for [`BPlusTree`].
//!
//! Splits keep the tree valid by construction; this walk exists to prove
//! it in tests and to help debug a tree that looks wrong.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::node::NodeKind;
use crate::index::btree::BPlusTree;

impl<K: Ord, V> BPlusTree<K, V> {
    /// Verify every structural invariant of the tree.
    ///
    /// Checks:
    /// - every leaf is at the same depth
    /// - no node holds more than `max_keys` keys; non-root nodes hold at
    ///   least `min_keys`
    /// - keys ascend strictly inside each node
    /// - every subtree's keys lie within its parent's separators
    ///   (`keys[i-1] <= k < keys[i]`)
    /// - internal nodes have one more child than keys; leaves have one
    ///   value per key
    /// - parent links point at the owning node, and every node is owned once
    /// - the leaf chain visits all leaves left to right with ascending keys
    ///
    /// # Errors
    /// - `Error::InvariantViolation` naming the first offending node
    ///
    /// # Example
    /// ```
    /// use bplus_index::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new();
    /// for key in 0..100 {
    ///     tree.insert(key, key);
    /// }
    /// tree.check().unwrap();
    /// ```
    pub fn check(&self) -> Result<()> {
        let Some(root) = self.root else {
            if !self.nodes.is_empty() || self.len != 0 {
                return Err(Error::violation(
                    NodeId::new(0),
                    "empty tree still holds nodes or entries",
                ));
            }
            return Ok(());
        };

        let mut walk = Walk {
            tree: self,
            owned: vec![false; self.nodes.len()],
            leaves: Vec::new(),
            leaf_depth: None,
            entries: 0,
        };
        walk.visit(root, None, None, None, 1)?;

        if let Some(pos) = walk.owned.iter().position(|&owned| !owned) {
            return Err(Error::violation(NodeId::new(pos), "node unreachable from root"));
        }
        if walk.entries != self.len {
            return Err(Error::violation(
                root,
                format!("leaves hold {} entries, len is {}", walk.entries, self.len),
            ));
        }

        self.check_leaf_chain(&walk.leaves)
    }

    /// Follow `next` from the leftmost leaf and compare against the
    /// left-to-right leaf order found by the tree walk.
    fn check_leaf_chain(&self, leaves: &[NodeId]) -> Result<()> {
        let mut current = leaves.first().copied();
        let mut last_key: Option<&K> = None;

        for &expected in leaves {
            let Some(id) = current else {
                return Err(Error::violation(expected, "leaf missing from chain"));
            };
            if id != expected {
                return Err(Error::violation(
                    id,
                    format!("chain out of order, expected {}", expected),
                ));
            }

            let leaf = &self.nodes[id.0];
            if let (Some(prev), Some(first)) = (last_key, leaf.keys.first()) {
                if prev >= first {
                    return Err(Error::violation(id, "chain keys not ascending"));
                }
            }
            last_key = leaf.keys.last();

            current = match &leaf.kind {
                NodeKind::Leaf { next, .. } => *next,
                NodeKind::Internal { .. } => return Err(Error::violation(id, "internal node in chain")),
            };
        }

        match current {
            None => Ok(()),
            Some(id) => Err(Error::violation(id, "last leaf has a next link")),
        }
    }
}

/// State carried through the recursive walk.
struct Walk<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    owned: Vec<bool>,
    leaves: Vec<NodeId>,
    leaf_depth: Option<usize>,
    entries: usize,
}

impl<K: Ord, V> Walk<'_, K, V> {
    /// Check `id` and its subtree. Keys must satisfy `lower <= k < upper`.
    fn visit(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
    ) -> Result<()> {
        let tree = self.tree;
        let Some(node) = tree.nodes.get(id.0) else {
            return Err(Error::violation(id, "dangling node id"));
        };

        if std::mem::replace(&mut self.owned[id.0], true) {
            return Err(Error::violation(id, "node owned twice"));
        }
        if node.parent != parent {
            return Err(Error::violation(
                id,
                format!("parent link {:?}, owner {:?}", node.parent, parent),
            ));
        }

        let max_keys = tree.config.max_keys();
        let min_keys = if parent.is_some() { tree.config.min_keys().max(1) } else { 1 };
        if node.len() > max_keys {
            return Err(Error::violation(
                id,
                format!("{} keys exceeds max {}", node.len(), max_keys),
            ));
        }
        if node.len() < min_keys {
            return Err(Error::violation(
                id,
                format!("{} keys below min {}", node.len(), min_keys),
            ));
        }
        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::violation(id, "keys not strictly ascending"));
        }

        let out_of_range = node.keys.iter().any(|key| {
            lower.is_some_and(|lo| key < lo) || upper.is_some_and(|hi| key >= hi)
        });
        if out_of_range {
            return Err(Error::violation(id, "key outside parent separator range"));
        }

        match &node.kind {
            NodeKind::Leaf { values, .. } => {
                if values.len() != node.len() {
                    return Err(Error::violation(
                        id,
                        format!("{} values for {} keys", values.len(), node.len()),
                    ));
                }
                match self.leaf_depth {
                    None => self.leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(Error::violation(
                            id,
                            format!("leaf at depth {}, expected {}", depth, expected),
                        ));
                    }
                    Some(_) => {}
                }
                self.leaves.push(id);
                self.entries += node.len();
            }
            NodeKind::Internal { children } => {
                if children.len() != node.len() + 1 {
                    return Err(Error::violation(
                        id,
                        format!("{} children for {} keys", children.len(), node.len()),
                    ));
                }
                for (i, &child) in children.iter().enumerate() {
                    let lo = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
                    let hi = node.keys.get(i).or(upper);
                    self.visit(child, Some(id), lo, hi, depth + 1)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(keys: impl IntoIterator<Item = i32>) -> BPlusTree<i32, i32> {
        let mut tree = BPlusTree::new();
        for key in keys {
            tree.insert(key, key);
        }
        tree
    }

    #[test]
    fn test_check_empty() {
        let tree: BPlusTree<i32, i32> = BPlusTree::new();
        assert!(tree.check().is_ok());
    }

    #[test]
    fn test_check_valid_trees() {
        tree_with(0..1).check().unwrap();
        tree_with([10, 20, 5, 6]).check().unwrap();
        tree_with(0..500).check().unwrap();
        tree_with((0..500).rev()).check().unwrap();
    }

    #[test]
    fn test_detects_unsorted_keys() {
        let mut tree = tree_with([10, 20, 5]);
        tree.nodes[0].keys.swap(0, 1);

        let err = tree.check().unwrap_err();
        assert!(matches!(err, Error::InvariantViolation { .. }));
        assert!(format!("{}", err).contains("strictly ascending"));
    }

    #[test]
    fn test_detects_key_in_wrong_subtree() {
        let mut tree = tree_with([10, 20, 5, 6]);
        let root = tree.root.unwrap();
        let left = tree.nodes[root.0].children()[0];
        // 15 belongs right of separator 10
        tree.nodes[left.0].keys[1] = 15;

        let err = tree.check().unwrap_err();
        assert!(format!("{}", err).contains("separator range"));
    }

    #[test]
    fn test_detects_stale_parent_link() {
        let mut tree = tree_with([10, 20, 5, 6]);
        let root = tree.root.unwrap();
        let right = tree.nodes[root.0].children()[1];
        tree.nodes[right.0].parent = None;

        let err = tree.check().unwrap_err();
        assert!(format!("{}", err).contains("parent link"));
    }

    #[test]
    fn test_detects_broken_leaf_chain() {
        let mut tree = tree_with([10, 20, 5, 6]);
        let root = tree.root.unwrap();
        let left = tree.nodes[root.0].children()[0];
        if let NodeKind::Leaf { next, .. } = &mut tree.nodes[left.0].kind {
            *next = None;
        }

        let err = tree.check().unwrap_err();
        assert!(format!("{}", err).contains("missing from chain"));
    }

    #[test]
    fn test_detects_overfull_node() {
        let mut tree = tree_with([1, 2, 3]);
        tree.nodes[0].keys.push(4);
        if let NodeKind::Leaf { values, .. } = &mut tree.nodes[0].kind {
            values.push(4);
        }
        tree.len += 1;

        let err = tree.check().unwrap_err();
        assert!(format!("{}", err).contains("exceeds max"));
    }
}
