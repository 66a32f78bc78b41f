//! Indexed Binary Heap implementation
//!
//! An array-backed binary min-heap that additionally keeps a map from each
//! element's identity to its current array index. The map is what allows
//! [`delete`](IndexedHeap::delete) to remove an arbitrary element in
//! O(log n) instead of scanning the array for it.
//!
//! Elements implement [`Keyed`]: the key orders the heap, the identity
//! locates an element. Children of index `i` live at `2i + 1` and `2i + 2`,
//! the parent of `i` at `(i - 1) / 2`.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity |
//! |---------------|------------|
//! | `insert`      | O(log n)   |
//! | `peek_min`    | O(1)       |
//! | `extract_min` | O(log n)   |
//! | `delete`      | O(log n)   |
//! | `contains`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::IndexedHeap;
//!
//! let mut heap = IndexedHeap::new();
//! heap.insert((3, "three")).unwrap();
//! heap.insert((1, "one")).unwrap();
//! heap.insert((2, "two")).unwrap();
//!
//! assert_eq!(heap.peek_min(), Some(&(1, "one")));
//! assert_eq!(heap.delete(&"two"), Ok((2, "two")));
//! assert_eq!(heap.extract_min(), Ok((1, "one")));
//! assert_eq!(heap.extract_min(), Ok((3, "three")));
//! assert!(heap.is_empty());
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use crate::traits::{HeapError, Keyed};

/// A binary min-heap with deletion by identity
///
/// Inserting an element whose identity is already stored fails with
/// [`HeapError::DuplicateIdentity`] and leaves the heap unchanged.
pub struct IndexedHeap<T: Keyed> {
    /// Heap-ordered element storage
    data: Vec<T>,
    /// Identity -> index into `data`, in 1:1 correspondence with it
    positions: FxHashMap<T::Identity, usize>,
}

impl<T: Keyed> IndexedHeap<T> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Builds a heap by inserting every element in turn.
    ///
    /// Fails on the first duplicate identity.
    pub fn from_elements<I>(elements: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = T>,
    {
        let elements = elements.into_iter();
        let mut heap = Self::with_capacity(elements.size_hint().0);
        for element in elements {
            heap.insert(element)?;
        }
        Ok(heap)
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if an element with this identity is stored
    pub fn contains(&self, identity: &T::Identity) -> bool {
        self.positions.contains_key(identity)
    }

    /// Returns the stored element with this identity, if any
    pub fn get(&self, identity: &T::Identity) -> Option<&T> {
        self.positions.get(identity).map(|&index| &self.data[index])
    }

    /// Iterates over the elements in storage order (not sorted)
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Inserts an element, sifting it up to its place
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateIdentity` if an element with the same
    /// identity is already stored.
    pub fn insert(&mut self, element: T) -> Result<(), HeapError> {
        let identity = element.identity();
        if self.positions.contains_key(&identity) {
            return Err(HeapError::DuplicateIdentity);
        }

        let index = self.data.len();
        self.data.push(element);
        self.positions.insert(identity, index);
        self.sift_up(index);
        Ok(())
    }

    /// Returns the minimum element without removing it
    pub fn peek_min(&self) -> Option<&T> {
        self.data.first()
    }

    /// Removes and returns the minimum element
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if there is nothing to extract.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyHeap);
        }

        let last_idx = self.data.len() - 1;
        self.swap(0, last_idx);
        let min = self.remove_last().ok_or(HeapError::EmptyHeap)?;

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Ok(min)
    }

    /// Removes and returns the element with the given identity
    ///
    /// The last element takes the vacated slot and is sifted down when it is
    /// the new root or heavier than its new parent, otherwise up.
    ///
    /// # Errors
    /// Returns `HeapError::NotFound` if no such element is stored.
    pub fn delete(&mut self, identity: &T::Identity) -> Result<T, HeapError> {
        let index = *self.positions.get(identity).ok_or(HeapError::NotFound)?;

        let last_idx = self.data.len() - 1;
        self.swap(index, last_idx);
        let removed = self.remove_last().ok_or(HeapError::NotFound)?;

        if index < self.data.len() {
            if index == 0 || self.data[index].key() > self.data[parent(index)].key() {
                self.sift_down(index);
            } else {
                self.sift_up(index);
            }
        }

        Ok(removed)
    }

    /// Drains the heap by repeated `extract_min`, smallest key first
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Ok(element) = self.extract_min() {
            sorted.push(element);
        }
        sorted
    }

    /// Checks the heap-order and position-map invariants.
    ///
    /// Every parent key must be `<=` its children's keys, and the position
    /// map must hold exactly one correct entry per stored element.
    pub fn verify_invariants(&self) -> bool {
        if self.positions.len() != self.data.len() {
            return false;
        }

        self.data.iter().enumerate().all(|(index, element)| {
            let indexed = self.positions.get(&element.identity()) == Some(&index);
            let ordered = index == 0 || self.data[parent(index)].key() <= element.key();
            indexed && ordered
        })
    }

    /// Swaps two slots and records their new positions
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.data.swap(a, b);
        if let Some(slot) = self.positions.get_mut(&self.data[a].identity()) {
            *slot = a;
        }
        if let Some(slot) = self.positions.get_mut(&self.data[b].identity()) {
            *slot = b;
        }
    }

    /// Pops the last slot and forgets its position
    fn remove_last(&mut self) -> Option<T> {
        let element = self.data.pop()?;
        self.positions.remove(&element.identity());
        Some(element)
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = parent(index);
            if self.data[parent].key() > self.data[index].key() {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    ///
    /// The right child wins ties against the left one.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let child = if right < len && self.data[right].key() <= self.data[left].key() {
                right
            } else {
                left
            };

            if self.data[child].key() < self.data[index].key() {
                self.swap(index, child);
                index = child;
            } else {
                break;
            }
        }
    }
}

fn parent(index: usize) -> usize {
    (index - 1) / 2
}

impl<T: Keyed> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for IndexedHeap<T>
where
    T: Keyed + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedHeap")
            .field("data", &self.data)
            .finish()
    }
}

impl<'a, T: Keyed> IntoIterator for &'a IndexedHeap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
