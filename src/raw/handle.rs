use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Names a live slot in an [`Arena`](super::arena::Arena).
///
/// The handle's raw value is the slot index itself. Slot 0 is permanently
/// reserved by the arena, so the zero encoding is free for the niche and
/// `Option<Handle>` ("maybe a child") costs no more than a bare index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// The largest addressable slot index.
    pub(crate) const MAX: usize = RawHandle::MAX as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index != 0, "`Handle::from_index()` - slot 0 is reserved!");
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index` is nonzero and fits in RawHandle per the asserts above.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new(index as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize
    }
}
