//! Indexed Heaps and their Consumers
//!
//! This crate provides an array-backed binary min-heap that can delete any
//! element by identity in O(log n), together with two algorithms built on it.
//!
//! # Features
//!
//! - **Indexed Heap**: O(log n) insert, extract-min and delete-by-identity; O(1) peek
//! - **Shortest Paths**: Dijkstra's algorithm over non-negative weighted digraphs,
//!   relaxing by delete + reinsert instead of decrease-key
//! - **Running Median**: lower median of a stream via a max-heap / min-heap pair
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::IndexedHeap;
//!
//! let mut heap = IndexedHeap::new();
//! heap.insert((5, "item1")).unwrap();
//! heap.insert((3, "item2")).unwrap();
//! heap.delete(&"item2").unwrap();
//! assert_eq!(heap.peek_min(), Some(&(5, "item1")));
//! ```

pub mod graph;
pub mod indexed_binary;
pub mod median;
pub mod pathfinding;
pub mod traits;

// Re-export the main types for convenience
pub use indexed_binary::IndexedHeap;
pub use traits::{HeapError, Keyed};
