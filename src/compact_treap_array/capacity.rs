use super::CompactTreapArray;
use crate::raw::ArenaTree;

impl<T> CompactTreapArray<T> {
    /// Creates an empty array with node slots for at least `capacity`
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_array::CompactTreapArray;
    ///
    /// let array: CompactTreapArray<i32> = CompactTreapArray::with_capacity(16);
    /// assert!(array.is_empty());
    /// assert!(array.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: ArenaTree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the node buffer can hold without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_array::CompactTreapArray;
    ///
    /// let array: CompactTreapArray<i32> = CompactTreapArray::with_capacity(32);
    /// assert!(array.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Grows the node buffer so at least `additional` more elements fit
    /// without reallocating. Growth is geometric, and relocating the
    /// buffer never invalidates the tree: nodes address each other by
    /// slot index, not by memory address.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_array::CompactTreapArray;
    ///
    /// let mut array = CompactTreapArray::from([1, 2, 3]);
    /// array.reserve(100);
    /// assert!(array.capacity() >= 103);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.tree.reserve(additional);
    }
}
