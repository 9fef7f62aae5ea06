use alloc::vec::Vec;

use super::node_id::NodeId;

/// Owns every node of one tree.
///
/// Slots are only ever appended: a split moves entries into a fresh node but
/// never retires the old one, and removals edit leaves in place.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    #[cfg(test)]
    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        assert!(
            self.slots.len() <= NodeId::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            NodeId::MAX
        );
        self.slots.push(element);
        NodeId::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        &self.slots[id.to_index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.slots[id.to_index()]
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
