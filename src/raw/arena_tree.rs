use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::ArenaNode;
use super::priority::PrioritySource;

/// The treap engine behind `CompactTreapArray`: the same split/merge
/// algebra as `owned_tree`, expressed over handles into a slot arena
/// instead of owned links.
///
/// Structural edits rewrite handles in place, and removal recycles the
/// node's slot through the arena free list, so a warmed-up tree mutates
/// without allocating. As with `OwnedTree`, bounds are validated by the
/// façade before the engine is called.
pub(crate) struct ArenaTree<T> {
    arena: Arena<T>,
    root: Option<Handle>,
    len: usize,
    rng: PrioritySource,
}

impl<T> ArenaTree<T> {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
            rng: PrioritySource::new(),
        }
    }

    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
            rng: PrioritySource::with_seed(seed),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            rng: PrioritySource::new(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    fn size(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| self.arena.get(handle).size)
    }

    /// Recomputes a node's cached subtree size from its children.
    fn update_size(&mut self, handle: Handle) {
        let node = self.arena.get(handle);
        let total = self.size(node.left) + self.size(node.right) + 1;
        self.arena.get_mut(handle).size = total;
    }

    /// Joins two treaps where every element under `left` precedes every
    /// element under `right`; the higher-priority root wins, ties go right.
    fn merge(&mut self, left: Option<Handle>, right: Option<Handle>) -> Option<Handle> {
        let (Some(left_handle), Some(right_handle)) = (left, right) else {
            return left.or(right);
        };
        if self.arena.get(left_handle).priority > self.arena.get(right_handle).priority {
            let boundary = self.arena.get(left_handle).right;
            let mid = self.merge(boundary, right);
            self.arena.get_mut(left_handle).right = mid;
            self.update_size(left_handle);
            Some(left_handle)
        } else {
            let boundary = self.arena.get(right_handle).left;
            let mid = self.merge(left, boundary);
            self.arena.get_mut(right_handle).left = mid;
            self.update_size(right_handle);
            Some(right_handle)
        }
    }

    /// Cuts a treap into its first `k` elements and the remainder. `k`
    /// must not exceed the subtree size.
    fn split(&mut self, link: Option<Handle>, k: usize) -> (Option<Handle>, Option<Handle>) {
        let Some(handle) = link else {
            return (None, None);
        };
        let left_size = self.size(self.arena.get(handle).left);
        if left_size < k {
            let tail = self.arena.get(handle).right;
            let (mid, right) = self.split(tail, k - left_size - 1);
            self.arena.get_mut(handle).right = mid;
            self.update_size(handle);
            (Some(handle), right)
        } else {
            let head = self.arena.get(handle).left;
            let (left, mid) = self.split(head, k);
            self.arena.get_mut(handle).left = mid;
            self.update_size(handle);
            (left, Some(handle))
        }
    }

    /// Returns the element at `index`, or `None` past the end.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let mut index = index;
        let mut handle = self
            .root
            .expect("`ArenaTree::get()` - `len` is nonzero but the root is absent!");
        loop {
            let node = self.arena.get(handle);
            let left_size = self.size(node.left);
            match index.cmp(&left_size) {
                Ordering::Less => {
                    handle = node
                        .left
                        .expect("`ArenaTree::get()` - size fields name an absent child!");
                }
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => {
                    index -= left_size + 1;
                    handle = node
                        .right
                        .expect("`ArenaTree::get()` - size fields name an absent child!");
                }
            }
        }
    }

    /// Returns the element at `index` mutably, or `None` past the end.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let mut index = index;
        let mut handle = self
            .root
            .expect("`ArenaTree::get_mut()` - `len` is nonzero but the root is absent!");
        loop {
            let node = self.arena.get(handle);
            let left_size = self.size(node.left);
            match index.cmp(&left_size) {
                Ordering::Less => {
                    handle = node
                        .left
                        .expect("`ArenaTree::get_mut()` - size fields name an absent child!");
                }
                Ordering::Equal => return Some(&mut self.arena.get_mut(handle).value),
                Ordering::Greater => {
                    index -= left_size + 1;
                    handle = node
                        .right
                        .expect("`ArenaTree::get_mut()` - size fields name an absent child!");
                }
            }
        }
    }

    /// Inserts at `index`; the caller has validated `index <= len`.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        let priority = self.rng.next_priority();
        let node = self.arena.alloc(ArenaNode::new(value, priority));
        let (left, right) = self.split(self.root, index);
        let left = self.merge(left, Some(node));
        self.root = self.merge(left, right);
        self.len += 1;
    }

    /// Removes and returns the element at `index`; the caller has
    /// validated `index < len`. The node's slot is recycled.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        let (left, rest) = self.split(self.root, index);
        let (removed, right) = self.split(rest, 1);
        let removed =
            removed.expect("`ArenaTree::remove()` - `index` was validated but the node is absent!");
        self.root = self.merge(left, right);
        self.len -= 1;
        self.arena.take(removed).value
    }

    /// Drops every element. The arena buffer is kept.
    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }
}

impl<T: Clone> Clone for ArenaTree<T> {
    /// An arena tree is never shared between containers: cloning copies
    /// the whole buffer. The clone draws a fresh priority source.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            len: self.len,
            rng: PrioritySource::new(),
        }
    }
}

#[cfg(test)]
impl<T> ArenaTree<T> {
    /// Verifies the heap and size invariants, and that every live arena
    /// slot is reachable as a tree node.
    pub(crate) fn check_invariants(&self) {
        fn check_node<T>(tree: &ArenaTree<T>, handle: Handle) -> usize {
            let node = tree.arena.get(handle);
            let left_size = node.left.map_or(0, |child| {
                assert!(
                    node.priority >= tree.arena.get(child).priority,
                    "heap invariant violated on a left child"
                );
                check_node(tree, child)
            });
            let right_size = node.right.map_or(0, |child| {
                assert!(
                    node.priority >= tree.arena.get(child).priority,
                    "heap invariant violated on a right child"
                );
                check_node(tree, child)
            });
            assert_eq!(node.size, left_size + right_size + 1, "cached subtree size is stale");
            node.size
        }

        let total = self.root.map_or(0, |root| check_node(self, root));
        assert_eq!(total, self.len, "`len` does not match the root subtree size");
        assert_eq!(self.arena.len(), self.len, "arena holds unreachable live slots");
    }
}
