use alloc::vec::Vec;

use tracing::{debug, trace};

use super::arena::Arena;
use super::node::{Bundle, InternalNode, LeafNode, Node};
use super::node_id::NodeId;
use crate::error::Result;

/// The core B+Tree implementation backing `PositionIndex`.
pub(crate) struct RawPositionTree<K> {
    /// Arena owning every node; parent and leaf-chain links are ids into it.
    nodes: Arena<Node<K>>,
    root: NodeId,
    /// Leftmost leaf. Splits only ever add right siblings, so this never moves.
    first_leaf: NodeId,
    order: usize,
    max_keys: usize,
    /// Number of levels, counting the leaves.
    height: usize,
    /// Number of distinct keys.
    len: usize,
    /// Number of positions across all bundles.
    positions: usize,
}

impl<K> RawPositionTree<K> {
    /// Creates a tree holding one empty root leaf. `order` must already be validated.
    pub(crate) fn new(order: usize) -> Self {
        debug_assert!(order >= 2, "`RawPositionTree::new()` - order must be at least 2");
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new_leaf());
        Self {
            nodes,
            root,
            first_leaf: root,
            order,
            max_keys: order - 1,
            height: 1,
            len: 0,
            positions: 0,
        }
    }

    pub(crate) const fn order(&self) -> usize {
        self.order
    }

    pub(crate) const fn max_keys(&self) -> usize {
        self.max_keys
    }

    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn position_count(&self) -> usize {
        self.positions
    }

    pub(crate) const fn first_leaf(&self) -> NodeId {
        self.first_leaf
    }

    pub(crate) fn leaf(&self, id: NodeId) -> &LeafNode<K> {
        self.nodes.get(id).as_leaf()
    }

    /// Drops every node and starts over from a single empty root leaf.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.alloc(Node::new_leaf());
        self.first_leaf = self.root;
        self.height = 1;
        self.len = 0;
        self.positions = 0;
    }
}

impl<K: Ord> RawPositionTree<K> {
    /// Descends from the root to the leaf whose key range covers `key`.
    ///
    /// Always lands on a leaf, whether or not `key` is present.
    pub(crate) fn find_leaf(&self, key: &K) -> NodeId {
        let mut current = self.root;
        loop {
            match self.nodes.get(current) {
                Node::Internal(internal) => current = internal.child(internal.search_child(key)),
                Node::Leaf(_) => return current,
            }
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&[usize]> {
        self.leaf(self.find_leaf(key)).get(key)
    }

    /// Collects the bundles of every key in `start..=end`, in key order.
    ///
    /// Walks the leaf chain from the leaf covering `start` and stops at the first key past `end`.
    pub(crate) fn range(&self, start: &K, end: &K) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut cursor = Some(self.find_leaf(start));

        while let Some(id) = cursor {
            let leaf = self.leaf(id);
            for (key, bundle) in leaf.entries() {
                if key > end {
                    return positions;
                }
                if key >= start {
                    positions.extend_from_slice(bundle);
                }
            }
            cursor = leaf.next();
        }

        positions
    }

    /// Removes `key` and all of its positions. Leaves are never merged and separators are
    /// left as they are, so the tree may keep underfull or empty leaves afterwards.
    pub(crate) fn remove(&mut self, key: &K) -> Result<Option<Bundle>> {
        let leaf = self.find_leaf(key);
        let removed = self.nodes.get_mut(leaf).remove_index_key(key)?;

        if let Some(bundle) = &removed {
            self.len -= 1;
            self.positions -= bundle.len();
            trace!(leaf = leaf.to_index(), positions = bundle.len(), "removed key");
        }
        Ok(removed)
    }
}

impl<K: Ord + Clone> RawPositionTree<K> {
    /// Records `position` under `key`, splitting the target leaf once it fills up.
    pub(crate) fn insert(&mut self, key: K, position: usize) -> Result<()> {
        let leaf = self.find_leaf(&key);
        let node = self.nodes.get_mut(leaf);
        let before = node.key_count();
        node.add_index_key(key, position)?;

        if node.key_count() > before {
            self.len += 1;
        }
        self.positions += 1;

        // A lone key cannot be split into two non-empty halves (order 2), so it waits for a second.
        let node = self.nodes.get(leaf);
        if node.is_full(self.max_keys) && node.key_count() > 1 {
            self.split_leaf(leaf);
        }
        Ok(())
    }

    fn split_leaf(&mut self, leaf_id: NodeId) {
        let leaf = self.nodes.get_mut(leaf_id).as_leaf_mut();
        let (separator, right) = leaf.split();
        let (left_keys, right_keys) = (leaf.key_count(), right.key_count());

        let right_id = self.nodes.alloc(Node::Leaf(right));
        self.nodes.get_mut(leaf_id).as_leaf_mut().set_next(Some(right_id));

        trace!(left = leaf_id.to_index(), right = right_id.to_index(), left_keys, right_keys, "split leaf");
        self.propagate_split(leaf_id, separator, right_id);
    }

    /// Hands a separator and new right sibling to the parent of `left`, splitting ancestors that
    /// overflow and growing a new root when the split reaches the top.
    fn propagate_split(&mut self, mut left: NodeId, mut separator: K, mut right: NodeId) {
        loop {
            let Some(parent) = self.nodes.get(left).parent() else {
                self.grow_root(left, separator, right);
                return;
            };

            self.nodes.get_mut(parent).as_internal_mut().insert_child(separator, right);
            self.nodes.get_mut(right).set_parent(Some(parent));

            if self.nodes.get(parent).key_count() <= self.max_keys {
                return;
            }

            let (median, sibling) = self.split_internal(parent);
            left = parent;
            separator = median;
            right = sibling;
        }
    }

    fn split_internal(&mut self, node_id: NodeId) -> (K, NodeId) {
        let (median, right) = self.nodes.get_mut(node_id).as_internal_mut().split();
        let right_id = self.nodes.alloc(Node::Internal(right));

        for index in 0..self.nodes.get(right_id).as_internal().child_count() {
            let child = self.nodes.get(right_id).as_internal().child(index);
            self.nodes.get_mut(child).set_parent(Some(right_id));
        }

        trace!(
            left = node_id.to_index(),
            right = right_id.to_index(),
            left_keys = self.nodes.get(node_id).key_count(),
            right_keys = self.nodes.get(right_id).key_count(),
            "split internal node"
        );
        (median, right_id)
    }

    fn grow_root(&mut self, left: NodeId, separator: K, right: NodeId) {
        let root = self.nodes.alloc(Node::Internal(InternalNode::with_children(separator, left, right)));
        self.nodes.get_mut(left).set_parent(Some(root));
        self.nodes.get_mut(right).set_parent(Some(root));
        self.root = root;
        self.height += 1;
        debug!(root = root.to_index(), height = self.height, "promoted new root");
    }
}
