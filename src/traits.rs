//! Common traits for indexed heap elements
//!
//! This module provides the element contract used by
//! [`IndexedHeap`](crate::indexed_binary::IndexedHeap):
//!
//! - [`Keyed`]: exposes an ordering key and a hashable identity
//! - [`HeapError`]: the contract violations surfaced by heap operations
//!
//! Unlike a plain priority queue, an indexed heap must be able to find an
//! element again after it was inserted. The identity is that handle: it is
//! hashed into the heap's position map, so it must be unique among the
//! elements stored in one heap at the same time.

use std::hash::Hash;

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `extract_min` was called on a heap with no elements
    #[error("cannot extract from an empty heap")]
    EmptyHeap,
    /// No element with the requested identity is stored in the heap
    #[error("no element with the given identity is in the heap")]
    NotFound,
    /// An element with the same identity is already stored in the heap
    #[error("an element with the same identity is already in the heap")]
    DuplicateIdentity,
}

/// An element that can be stored in an indexed heap.
///
/// # Example
///
/// ```rust
/// use indexed_heaps::Keyed;
///
/// struct Task {
///     id: u32,
///     deadline: u64,
/// }
///
/// impl Keyed for Task {
///     type Key = u64;
///     type Identity = u32;
///
///     fn key(&self) -> u64 {
///         self.deadline
///     }
///
///     fn identity(&self) -> u32 {
///         self.id
///     }
/// }
/// ```
pub trait Keyed {
    /// The ordering field; smaller keys are extracted first.
    type Key: Ord;

    /// Token used to locate the element for deletion.
    type Identity: Eq + Hash + Clone;

    /// Returns the ordering key of this element.
    fn key(&self) -> Self::Key;

    /// Returns the identity of this element.
    fn identity(&self) -> Self::Identity;
}

/// Tuples of `(key, identity)` are the simplest keyed elements.
impl<K, I> Keyed for (K, I)
where
    K: Ord + Clone,
    I: Eq + Hash + Clone,
{
    type Key = K;
    type Identity = I;

    fn key(&self) -> K {
        self.0.clone()
    }

    fn identity(&self) -> I {
        self.1.clone()
    }
}
