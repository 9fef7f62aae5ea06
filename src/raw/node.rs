use alloc::vec::Vec;

use smallvec::{SmallVec, smallvec};

use super::node_id::NodeId;
use crate::error::{IndexError, Result};

/// Every dataset position at which one key occurs, in insertion order.
///
/// Most keys in a real dataset occur once or twice, so small bundles stay inline.
pub(crate) type Bundle = SmallVec<[usize; 2]>;

#[allow(private_interfaces)]
pub(crate) enum Node<K> {
    Internal(InternalNode<K>),
    Leaf(LeafNode<K>),
}

// B+Tree: every key in children[i] is < keys[i] <= every key in children[i + 1].
pub(crate) struct InternalNode<K> {
    parent: Option<NodeId>,
    keys: Vec<K>,
    children: Vec<NodeId>,
}

// B+Tree: leaves hold the keys themselves, one bundle per key, and are chained left to right.
pub(crate) struct LeafNode<K> {
    parent: Option<NodeId>,
    next: Option<NodeId>,
    keys: Vec<K>,
    bundles: Vec<Bundle>,
}

/// Result of searching for a key in a leaf.
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is where it would be inserted.
    NotFound(usize),
}

impl<K> Node<K> {
    pub(crate) fn new_leaf() -> Self {
        Node::Leaf(LeafNode::new())
    }

    /// Returns the leaf node, panicking if this is not a leaf.
    pub(crate) fn as_leaf(&self) -> &LeafNode<K> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the leaf node mutably, panicking if this is not a leaf.
    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode<K> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the internal node, panicking if this is not internal.
    pub(crate) fn as_internal(&self) -> &InternalNode<K> {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    /// Returns the internal node mutably, panicking if this is not internal.
    pub(crate) fn as_internal_mut(&mut self) -> &mut InternalNode<K> {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Internal(internal) => internal.parent,
            Node::Leaf(leaf) => leaf.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Internal(internal) => internal.parent = parent,
            Node::Leaf(leaf) => leaf.parent = parent,
        }
    }

    pub(crate) fn keys(&self) -> &[K] {
        match self {
            Node::Internal(internal) => &internal.keys,
            Node::Leaf(leaf) => &leaf.keys,
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys().len()
    }

    /// Returns true once the node holds `max_keys` keys and must be split.
    pub(crate) fn is_full(&self, max_keys: usize) -> bool {
        self.key_count() >= max_keys
    }
}

impl<K: Ord> Node<K> {
    /// Records `position` under `key`, appending to the bundle if the key is already present.
    pub(crate) fn add_index_key(&mut self, key: K, position: usize) -> Result<()> {
        match self {
            Node::Leaf(leaf) => {
                leaf.add_position(key, position);
                Ok(())
            }
            Node::Internal(_) => Err(IndexError::NotALeaf { operation: "add_index_key" }),
        }
    }

    /// Drops `key` and its whole bundle from a leaf.
    pub(crate) fn remove_index_key(&mut self, key: &K) -> Result<Option<Bundle>> {
        match self {
            Node::Leaf(leaf) => Ok(leaf.remove(key)),
            Node::Internal(_) => Err(IndexError::NotALeaf { operation: "remove_index_key" }),
        }
    }
}

impl<K> InternalNode<K> {
    /// Creates the node that sits above a freshly split root.
    pub(crate) fn with_children(separator: K, left: NodeId, right: NodeId) -> Self {
        let mut keys = Vec::with_capacity(1);
        keys.push(separator);
        let mut children = Vec::with_capacity(2);
        children.extend([left, right]);
        Self {
            parent: None,
            keys,
            children,
        }
    }

    #[cfg(test)]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    #[cfg(test)]
    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> NodeId {
        self.children[index]
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl<K: Ord> InternalNode<K> {
    /// Index of the child whose subtree may hold `key`: the number of separators `<= key`.
    #[inline]
    pub(crate) fn search_child(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Inserts a promoted separator and places `child` directly to its right.
    pub(crate) fn insert_child(&mut self, key: K, child: NodeId) {
        let index = self.keys.partition_point(|k| k < &key);
        self.keys.insert(index, key);
        self.children.insert(index + 1, child);
    }

    /// Splits around the middle separator, which moves up instead of staying in either half.
    ///
    /// The left half keeps `keys[..mid]` and `children[..=mid]`; the returned right half takes
    /// the rest. Its children still point at this node and must be reparented by the caller.
    pub(crate) fn split(&mut self) -> (K, InternalNode<K>) {
        let mid = self.keys.len() / 2;

        let keys: Vec<K> = self.keys.drain(mid + 1..).collect();
        let children: Vec<NodeId> = self.children.drain(mid + 1..).collect();
        let Some(median) = self.keys.pop() else {
            panic!("`InternalNode::split()` - cannot split a node without keys");
        };

        let right = InternalNode {
            parent: self.parent,
            keys,
            children,
        };
        (median, right)
    }
}

impl<K> LeafNode<K> {
    pub(crate) fn new() -> Self {
        Self {
            parent: None,
            next: None,
            keys: Vec::new(),
            bundles: Vec::new(),
        }
    }

    pub(crate) fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<NodeId>) {
        self.next = next;
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn bundle(&self, index: usize) -> &[usize] {
        &self.bundles[index]
    }

    /// Keys paired with their bundles, in key order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&K, &[usize])> {
        self.keys.iter().zip(self.bundles.iter().map(|bundle| bundle.as_slice()))
    }
}

impl<K: Ord> LeafNode<K> {
    #[inline]
    pub(crate) fn search(&self, key: &K) -> SearchResult {
        let index = self.keys.partition_point(|k| k < key);
        if self.keys.get(index) == Some(key) {
            SearchResult::Found(index)
        } else {
            SearchResult::NotFound(index)
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&[usize]> {
        match self.search(key) {
            SearchResult::Found(index) => Some(self.bundles[index].as_slice()),
            SearchResult::NotFound(_) => None,
        }
    }

    fn add_position(&mut self, key: K, position: usize) {
        match self.search(&key) {
            SearchResult::Found(index) => self.bundles[index].push(position),
            SearchResult::NotFound(index) => {
                self.keys.insert(index, key);
                self.bundles.insert(index, smallvec![position]);
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<Bundle> {
        match self.search(key) {
            SearchResult::Found(index) => {
                self.keys.remove(index);
                Some(self.bundles.remove(index))
            }
            SearchResult::NotFound(_) => None,
        }
    }

    /// Moves `keys[len / 2..]` into a new right sibling and returns its first key as the
    /// separator to promote.
    ///
    /// The sibling inherits this leaf's parent and `next` link; the caller links this leaf to
    /// the sibling once it has an id.
    pub(crate) fn split(&mut self) -> (K, LeafNode<K>)
    where
        K: Clone,
    {
        let mid = self.keys.len() / 2;

        let right = LeafNode {
            parent: self.parent,
            next: self.next,
            keys: self.keys.drain(mid..).collect(),
            bundles: self.bundles.drain(mid..).collect(),
        };

        let Some(separator) = right.keys.first().cloned() else {
            panic!("`LeafNode::split()` - cannot split an empty leaf");
        };
        (separator, right)
    }
}
