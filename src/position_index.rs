use alloc::vec::Vec;
use core::fmt;

use tracing::debug;

use crate::error::{IndexError, Result};
use crate::raw::RawPositionTree;

mod iter;

pub use iter::{Iter, Keys};

/// Smallest fanout that still leaves room for a separator key.
pub const MIN_ORDER: usize = 2;

/// Fanout used by [`PositionIndex::new`].
pub const DEFAULT_ORDER: usize = 4;

/// An in-memory B+tree index from dataset keys to the positions they occur at.
///
/// Each distinct key owns a *bundle*: every position recorded for it, in the order the
/// positions were added. Keys live only in the leaves, which are chained left to right so
/// that [`get_range`](PositionIndex::get_range) and [`iter`](PositionIndex::iter) never revisit
/// internal nodes.
///
/// The tree grows by splitting full leaves and pushing separators upward, promoting a new root
/// when the split reaches the top. Removal only drops the key from its leaf: nodes are never
/// merged or rebalanced, so a delete-heavy workload leaves sparse leaves behind.
///
/// # Examples
///
/// ```
/// use bplus_index::PositionIndex;
///
/// let mut index = PositionIndex::with_order(4)?;
/// index.build_index([10, 20, 5, 6, 12, 30, 7, 17])?;
///
/// assert_eq!(index.get_index_position(&6), Some(vec![3]));
/// assert_eq!(index.get_range(&6, &12), vec![3, 6, 0, 4]);
///
/// index.remove_index(&6)?;
/// assert_eq!(index.get_index_position(&6), None);
/// # Ok::<(), bplus_index::IndexError>(())
/// ```
pub struct PositionIndex<K> {
    raw: RawPositionTree<K>,
}

impl<K> PositionIndex<K> {
    /// Creates an empty index with [`DEFAULT_ORDER`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: RawPositionTree::new(DEFAULT_ORDER),
        }
    }

    /// Creates an empty index whose nodes have at most `order` children.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidOrder`] if `order` is below [`MIN_ORDER`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::{IndexError, PositionIndex};
    ///
    /// let index: PositionIndex<u32> = PositionIndex::with_order(8)?;
    /// assert_eq!(index.max_keys(), 7);
    ///
    /// assert_eq!(PositionIndex::<u32>::with_order(1).err(), Some(IndexError::InvalidOrder(1)));
    /// # Ok::<(), IndexError>(())
    /// ```
    pub fn with_order(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(IndexError::InvalidOrder(order));
        }
        debug!(order, "created position index");
        Ok(Self {
            raw: RawPositionTree::new(order),
        })
    }

    /// Maximum number of children per internal node.
    #[must_use]
    pub fn order(&self) -> usize {
        self.raw.order()
    }

    /// Maximum number of keys a node may hold, `order - 1`.
    #[must_use]
    pub fn max_keys(&self) -> usize {
        self.raw.max_keys()
    }

    /// Number of distinct keys in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the index holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Number of positions recorded across every key.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.raw.position_count()
    }

    /// Number of levels in the tree; a lone root leaf has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Removes every key, keeping the configured order.
    pub fn clear(&mut self) {
        self.raw.clear();
        debug!(order = self.raw.order(), "cleared position index");
    }

    /// Iterates over `(key, positions)` in ascending key order by walking the leaf chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::PositionIndex;
    ///
    /// let mut index = PositionIndex::new();
    /// index.build_index(["b", "a", "b"])?;
    ///
    /// let entries: Vec<_> = index.iter().collect();
    /// assert_eq!(entries, [(&"a", &[1][..]), (&"b", &[0, 2][..])]);
    /// # Ok::<(), bplus_index::IndexError>(())
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.raw)
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K> {
        Keys { inner: self.iter() }
    }
}

impl<K: Ord> PositionIndex<K> {
    /// Returns a copy of every position recorded for `key`, or `None` if the key is absent.
    ///
    /// The returned bundle is detached from the index; changing it has no effect on the tree.
    #[must_use]
    pub fn get_index_position(&self, key: &K) -> Option<Vec<usize>> {
        self.raw.get(key).map(<[usize]>::to_vec)
    }

    /// Returns `true` if `key` has at least one recorded position.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.get(key).is_some()
    }

    /// Returns the positions of every key in `start..=end`, grouped by key in ascending order.
    ///
    /// An inverted range (`start > end`) yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::PositionIndex;
    ///
    /// let mut index = PositionIndex::new();
    /// index.build_index([40, 10, 30, 20, 10])?;
    ///
    /// assert_eq!(index.get_range(&10, &30), vec![1, 4, 3, 2]);
    /// assert_eq!(index.get_range(&30, &10), Vec::<usize>::new());
    /// # Ok::<(), bplus_index::IndexError>(())
    /// ```
    #[must_use]
    pub fn get_range(&self, start: &K, end: &K) -> Vec<usize> {
        self.raw.range(start, end)
    }

    /// Removes `key` together with all of its positions, returning them.
    ///
    /// Removing an absent key leaves the index untouched and returns `Ok(None)`. The tree is
    /// not rebalanced afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotALeaf`] if the descent did not end on a leaf, which means the
    /// tree is corrupt.
    pub fn remove_index(&mut self, key: &K) -> Result<Option<Vec<usize>>> {
        Ok(self.raw.remove(key)?.map(|bundle| bundle.into_vec()))
    }
}

impl<K: Ord + Clone> PositionIndex<K> {
    /// Builds an index of the given order from `values`, recording each value at its offset.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidOrder`] if `order` is below [`MIN_ORDER`].
    pub fn from_values<I>(order: usize, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let mut index = Self::with_order(order)?;
        index.build_index(values)?;
        Ok(index)
    }

    /// Records every value of `values` at its offset in the sequence, starting from 0.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`add_index`](PositionIndex::add_index).
    pub fn build_index<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
    {
        for (position, key) in values.into_iter().enumerate() {
            self.add_index(key, position)?;
        }
        debug!(keys = self.raw.len(), height = self.raw.height(), "built index");
        Ok(())
    }

    /// Records that `key` occurs at `position`.
    ///
    /// A key that is already present keeps a single entry; `position` is appended to its bundle.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotALeaf`] if the descent did not end on a leaf, which means the
    /// tree is corrupt.
    pub fn add_index(&mut self, key: K, position: usize) -> Result<()> {
        self.raw.insert(key, position)
    }
}

impl<K> Default for PositionIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for PositionIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a PositionIndex<K> {
    type Item = (&'a K, &'a [usize]);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}
