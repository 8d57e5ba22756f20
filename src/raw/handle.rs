use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a live node slot in the arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` is non-zero and fits, given the bound above.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// A parent/left/right link.
///
/// `Nil` is the sentinel: the absent child, the parent of the root, and the
/// end position all at once. Keeping it a discriminant rather than a flag on
/// every node means a sentinel can never be mistaken for a key holder.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Link {
    Nil,
    Node(Handle),
}

impl Link {
    #[inline]
    pub(crate) const fn is_nil(self) -> bool {
        matches!(self, Link::Nil)
    }

    #[inline]
    pub(crate) const fn handle(self) -> Option<Handle> {
        match self {
            Link::Nil => None,
            Link::Node(handle) => Some(handle),
        }
    }
}

impl From<Handle> for Link {
    #[inline]
    fn from(handle: Handle) -> Self {
        Link::Node(handle)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Links are stored three to a node, so the sentinel tag must ride the niche.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);
    assert_eq_size!(Link, Handle);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn nil_has_no_handle() {
        assert!(Link::Nil.is_nil());
        assert_eq!(Link::Nil.handle(), None);

        let link = Link::from(Handle::from_index(7));
        assert!(!link.is_nil());
        assert_eq!(link.handle().map(Handle::to_index), Some(7));
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX) {
            let handle = Handle::from_index(index);
            assert_eq!(handle.to_index(), index);
            assert_eq!(Link::Node(handle).handle(), Some(handle));
        }
    }
}
