use core::iter::FusedIterator;

use crate::raw::{NodeId, RawPositionTree};

/// An iterator over the entries of a [`PositionIndex`](super::PositionIndex), in key order.
///
/// This `struct` is created by [`PositionIndex::iter`](super::PositionIndex::iter).
pub struct Iter<'a, K> {
    tree: &'a RawPositionTree<K>,
    leaf: Option<NodeId>,
    index: usize,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(tree: &'a RawPositionTree<K>) -> Self {
        Self {
            tree,
            leaf: Some(tree.first_leaf()),
            index: 0,
            remaining: tree.len(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, &'a [usize]);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(id) = self.leaf {
            let leaf = tree.leaf(id);
            if self.index < leaf.key_count() {
                let item = (leaf.key(self.index), leaf.bundle(self.index));
                self.index += 1;
                self.remaining -= 1;
                return Some(item);
            }
            // Removals can leave empty leaves in the chain.
            self.leaf = leaf.next();
            self.index = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            leaf: self.leaf,
            index: self.index,
            remaining: self.remaining,
        }
    }
}

/// An iterator over the keys of a [`PositionIndex`](super::PositionIndex), in ascending order.
///
/// This `struct` is created by [`PositionIndex::keys`](super::PositionIndex::keys).
pub struct Keys<'a, K> {
    pub(super) inner: Iter<'a, K>,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}
impl<K> FusedIterator for Keys<'_, K> {}
