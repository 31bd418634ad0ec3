use alloc::vec::Vec;

use super::handle::Handle;
use super::node::ArenaNode;

/// A slot in the arena: a live node, or a link in the free list.
///
/// Freed slots keep their storage and thread the free list through it in
/// place, so recycling touches no other slot and costs O(1).
#[derive(Clone)]
enum Slot<T> {
    Occupied(ArenaNode<T>),
    Free { next: Option<Handle> },
}

/// Contiguous node storage with free-list recycling.
///
/// Slot 0 is a permanent sentinel: created `Free`, never linked into the
/// free list, never returned by [`Arena::alloc`]. That keeps the zero
/// encoding of [`Handle`] meaning "absent" (see `handle.rs`). Growth is
/// geometric (factor 2) and relocates slot data; handles name indices, not
/// addresses, so they survive every relocation.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Handle>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: alloc::vec![Slot::Free { next: None }],
            free_head: None,
            live: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.saturating_add(1));
        slots.push(Slot::Free { next: None });
        Self {
            slots,
            free_head: None,
            live: 0,
        }
    }

    /// Number of live nodes.
    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of nodes the arena can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity() - 1
    }

    /// Grows the buffer so `additional` more slots fit without another
    /// reallocation, doubling past the requirement when growth is needed.
    pub(crate) fn reserve(&mut self, additional: usize) {
        let required = self.slots.len() + additional;
        if required <= self.slots.capacity() {
            return;
        }
        self.slots.reserve_exact(required * 2 - self.slots.len());
    }

    /// Allocates a slot for `node`, reusing the free list before growing
    /// the buffer.
    pub(crate) fn alloc(&mut self, node: ArenaNode<T>) -> Handle {
        self.live += 1;
        if let Some(handle) = self.free_head {
            let slot = &mut self.slots[handle.to_index()];
            match slot {
                Slot::Free { next } => self.free_head = *next,
                Slot::Occupied(_) => {
                    unreachable!("`Arena::alloc()` - free list reached a live slot!")
                }
            }
            *slot = Slot::Occupied(node);
            handle
        } else {
            // The new slot's index is the current length; it must still be
            // addressable by a handle.
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.reserve(1);
            self.slots.push(Slot::Occupied(node));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &ArenaNode<T> {
        match &self.slots[handle.to_index()] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut ArenaNode<T> {
        match &mut self.slots[handle.to_index()] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    /// Removes a node from the arena, threading its slot onto the free
    /// list head.
    pub(crate) fn take(&mut self, handle: Handle) -> ArenaNode<T> {
        let index = handle.to_index();
        assert!(
            matches!(self.slots[index], Slot::Occupied(_)),
            "`Arena::take()` - `handle` is invalid!"
        );
        let slot = core::mem::replace(&mut self.slots[index], Slot::Free { next: self.free_head });
        self.free_head = Some(handle);
        self.live -= 1;
        match slot {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!(),
        }
    }

    /// Drops a node and recycles its slot.
    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    /// Drops every node and resets the free list. The buffer is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.free_head = None;
        self.live = 0;
    }
}
