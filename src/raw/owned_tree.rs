use alloc::boxed::Box;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::node::{Link, Node, size};
use super::priority::PrioritySource;

/// The treap engine behind `TreapArray`: an owned tree plus the priority
/// source that shapes it.
///
/// All structural mutation is expressed through [`merge`] and [`split`];
/// `insert` and `remove` are thin compositions of the two. The read paths
/// (`get`, `get_mut`) descend by left-subtree size without restructuring.
///
/// Bounds are the caller's job: `insert` expects `index <= len` and
/// `remove` expects `index < len`. The façade validates before calling, so
/// a violated expectation here is a programming error, not a user error.
pub(crate) struct OwnedTree<T> {
    root: Link<T>,
    len: usize,
    rng: PrioritySource,
}

/// Joins two treaps where every element of `left` precedes every element
/// of `right`. Only priorities are compared: the higher-priority root wins
/// and the other tree sinks into its boundary child. Equal priorities go
/// to the right node.
fn merge<T>(left: Link<T>, right: Link<T>) -> Link<T> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut left), Some(mut right)) => {
            if left.priority > right.priority {
                left.right = merge(left.right.take(), Some(right));
                left.update_size();
                Some(left)
            } else {
                right.left = merge(Some(left), right.left.take());
                right.update_size();
                Some(right)
            }
        }
    }
}

/// Cuts a treap into its first `k` elements and the remainder, both valid
/// treaps. `k` must not exceed the subtree size.
fn split<T>(link: Link<T>, k: usize) -> (Link<T>, Link<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    let left_size = size(&node.left);
    if left_size < k {
        // The node and its left subtree stay in the left part.
        let (mid, right) = split(node.right.take(), k - left_size - 1);
        node.right = mid;
        node.update_size();
        (Some(node), right)
    } else {
        let (left, mid) = split(node.left.take(), k);
        node.left = mid;
        node.update_size();
        (left, Some(node))
    }
}

/// Duplicates a subtree, priorities included, so the copy has the
/// identical shape.
fn clone_subtree<T: Clone>(link: &Link<T>) -> Link<T> {
    link.as_ref().map(|node| {
        Box::new(Node {
            value: node.value.clone(),
            priority: node.priority,
            size: node.size,
            left: clone_subtree(&node.left),
            right: clone_subtree(&node.right),
        })
    })
}

/// Tears a subtree down with an explicit work stack. Dropping the `Box`
/// chain directly would recurse to the tree height, which is only
/// probabilistically bounded.
fn drop_subtree<T>(root: Link<T>) {
    let mut stack: SmallVec<[Box<Node<T>>; 32]> = SmallVec::new();
    stack.extend(root);
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<T> OwnedTree<T> {
    pub(crate) fn new() -> Self {
        Self {
            root: None,
            len: 0,
            rng: PrioritySource::new(),
        }
    }

    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            root: None,
            len: 0,
            rng: PrioritySource::with_seed(seed),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the element at `index`, or `None` past the end.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let mut index = index;
        let mut node = self
            .root
            .as_deref()
            .expect("`OwnedTree::get()` - `len` is nonzero but the root is absent!");
        loop {
            let left_size = size(&node.left);
            match index.cmp(&left_size) {
                Ordering::Less => {
                    node = node
                        .left
                        .as_deref()
                        .expect("`OwnedTree::get()` - size fields name an absent child!");
                }
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => {
                    index -= left_size + 1;
                    node = node
                        .right
                        .as_deref()
                        .expect("`OwnedTree::get()` - size fields name an absent child!");
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
        let mut node = self
            .root
            .as_deref_mut()
            .expect("`OwnedTree::get_mut()` - `len` is nonzero but the root is absent!");
        loop {
            let left_size = size(&node.left);
            match index.cmp(&left_size) {
                Ordering::Less => {
                    node = node
                        .left
                        .as_deref_mut()
                        .expect("`OwnedTree::get_mut()` - size fields name an absent child!");
                }
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => {
                    index -= left_size + 1;
                    node = node
                        .right
                        .as_deref_mut()
                        .expect("`OwnedTree::get_mut()` - size fields name an absent child!");
                }
            }
        }
    }

    /// Inserts at `index`; the caller has validated `index <= len`.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        let priority = self.rng.next_priority();
        let node = Box::new(Node::new(value, priority));
        let (left, right) = split(self.root.take(), index);
        self.root = merge(merge(left, Some(node)), right);
        self.len += 1;
    }

    /// Removes and returns the element at `index`; the caller has
    /// validated `index < len`.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        let (left, rest) = split(self.root.take(), index);
        let (removed, right) = split(rest, 1);
        let removed =
            *removed.expect("`OwnedTree::remove()` - `index` was validated but the node is absent!");
        self.root = merge(left, right);
        self.len -= 1;
        removed.value
    }

    pub(crate) fn clear(&mut self) {
        drop_subtree(self.root.take());
        self.len = 0;
    }
}

impl<T> Drop for OwnedTree<T> {
    fn drop(&mut self) {
        drop_subtree(self.root.take());
    }
}

impl<T: Clone> Clone for OwnedTree<T> {
    /// The copy-on-write deep copy: every node is duplicated with its
    /// priority, so the clone has the identical shape. The clone draws a
    /// fresh priority source so the two trees grow independently afterwards.
    fn clone(&self) -> Self {
        Self {
            root: clone_subtree(&self.root),
            len: self.len,
            rng: PrioritySource::new(),
        }
    }
}

#[cfg(test)]
impl<T> OwnedTree<T> {
    /// Verifies the heap and size invariants over the whole tree.
    pub(crate) fn check_invariants(&self) {
        fn check_node<T>(node: &Node<T>) -> usize {
            let left_size = node.left.as_deref().map_or(0, check_node);
            let right_size = node.right.as_deref().map_or(0, check_node);
            if let Some(left) = node.left.as_deref() {
                assert!(node.priority >= left.priority, "heap invariant violated on a left child");
            }
            if let Some(right) = node.right.as_deref() {
                assert!(node.priority >= right.priority, "heap invariant violated on a right child");
            }
            assert_eq!(node.size, left_size + right_size + 1, "cached subtree size is stale");
            node.size
        }

        let total = self.root.as_deref().map_or(0, check_node);
        assert_eq!(total, self.len, "`len` does not match the root subtree size");
    }
}
