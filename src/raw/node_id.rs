use core::num::NonZero;

#[cfg(test)]
type RawNodeId = u16;
#[cfg(not(test))]
type RawNodeId = u32;

/// Slot of a node inside the tree's arena.
///
/// Stored off-by-one so that `Option<NodeId>` (parent links, the leaf chain)
/// is the same size as a bare id.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub(crate) struct NodeId(NonZero<RawNodeId>);

impl NodeId {
    pub(crate) const MAX: usize = (RawNodeId::MAX - 1) as usize;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`NodeId::from_index()` - `index` > `NodeId::MAX`!");
        match NonZero::new((index + 1) as RawNodeId) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(NodeId, Option<NodeId>);
    assert_eq_size!(NodeId, RawNodeId);

    #[test]
    #[should_panic(expected = "`NodeId::from_index()` - `index` > `NodeId::MAX`!")]
    fn out_of_range_index() {
        let _ = NodeId::from_index(NodeId::MAX + 1);
    }

    #[test]
    fn first_slot_is_zero() {
        assert_eq!(NodeId::from_index(0).to_index(), 0);
        assert_ne!(NodeId::from_index(0), NodeId::from_index(1));
    }

    proptest! {
        #[test]
        fn index_survives_conversion(index in 0..=NodeId::MAX) {
            prop_assert_eq!(NodeId::from_index(index).to_index(), index);
        }
    }
}
