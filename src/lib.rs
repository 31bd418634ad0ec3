//! Treap-backed order-statistic sequence containers for Rust.
//!
//! This crate provides [`TreapArray`] and [`CompactTreapArray`], array-like
//! collections that trade `Vec`'s O(n) mid-sequence edits for O(log n)
//! expected time on every positional operation:
//!
//! - [`insert`](TreapArray::insert) / [`remove`](TreapArray::remove) at any
//!   position - O(log n) expected
//! - Indexing by position - O(log n) expected
//! - [`push`](TreapArray::push) / [`push_front`](TreapArray::push_front) -
//!   O(log n) expected, independent of which end is touched
//!
//! # Example
//!
//! ```
//! use treap_array::TreapArray;
//!
//! let mut queue: TreapArray<&str> = TreapArray::new();
//! queue.push("walk the dog");
//! queue.push("file taxes");
//!
//! // Mid-sequence inserts don't shift the tail.
//! queue.insert(1, "buy groceries");
//! assert_eq!(queue[1], "buy groceries");
//!
//! // Cloning is O(1); the copy only pays when one side mutates.
//! let snapshot = queue.clone();
//! queue.remove(0);
//! assert_eq!(snapshot.len(), 3);
//! assert_eq!(queue.len(), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`; the default `std`
//!   feature is used solely to seed priorities from OS entropy
//! - **Value semantics** - [`TreapArray`] clones share structure and
//!   deep-copy lazily on first mutation (copy-on-write)
//! - **Contiguous storage** - [`CompactTreapArray`] keeps every node in one
//!   growable buffer with free-list recycling, for allocation-free edits
//!   once warmed up
//!
//! # Implementation
//!
//! Both containers are treaps keyed implicitly by in-order position: each
//! node carries a random priority (max-heap ordered) and a cached subtree
//! size, and the position of an element is recomputed on each descent from
//! the sizes of the left subtrees. All structural mutation is built from two
//! primitives, `split` (cut off the first `k` elements) and `merge` (join
//! two position-disjoint trees), which keep the expected height logarithmic
//! regardless of the edit pattern.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod compact_treap_array;
pub mod treap_array;

pub use compact_treap_array::CompactTreapArray;
pub use error::IndexOutOfBounds;
pub use treap_array::TreapArray;
