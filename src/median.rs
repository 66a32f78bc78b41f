//! Running median maintenance with two indexed heaps
//!
//! The lower half of the values seen so far lives in a max-ordered heap,
//! the upper half in a min-ordered heap. After every insertion the lower
//! half holds as many values as the upper half or exactly one more, and
//! every lower value is `<=` every upper value. The median reported is the
//! largest lower value: for an even count that is the lower median, never
//! an average of the two middle values.
//!
//! Values may repeat. Each one is identified inside the heaps by its
//! position in the stream.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::median::running_medians;
//!
//! let medians: Result<Vec<_>, _> = running_medians([5, 15, 1, 3]).collect();
//! assert_eq!(medians.unwrap(), vec![5, 5, 5, 3]);
//! ```

use std::cmp::Reverse;
use std::fmt;

use tracing::trace;

use crate::indexed_binary::IndexedHeap;
use crate::traits::{HeapError, Keyed};

/// Entry of the lower half; reversed key so the largest value is the root.
#[derive(Debug, Clone, Copy)]
struct LowerEntry<N> {
    value: N,
    seq: u64,
}

impl<N: Ord + Copy> Keyed for LowerEntry<N> {
    type Key = Reverse<N>;
    type Identity = u64;

    fn key(&self) -> Reverse<N> {
        Reverse(self.value)
    }

    fn identity(&self) -> u64 {
        self.seq
    }
}

/// Entry of the upper half.
#[derive(Debug, Clone, Copy)]
struct UpperEntry<N> {
    value: N,
    seq: u64,
}

impl<N: Ord + Copy> Keyed for UpperEntry<N> {
    type Key = N;
    type Identity = u64;

    fn key(&self) -> N {
        self.value
    }

    fn identity(&self) -> u64 {
        self.seq
    }
}

/// Median of a growing stream of values.
pub struct RunningMedian<N: Ord + Copy> {
    lower: IndexedHeap<LowerEntry<N>>,
    upper: IndexedHeap<UpperEntry<N>>,
    next_seq: u64,
}

impl<N> RunningMedian<N>
where
    N: Ord + Copy + fmt::Debug,
{
    /// Creates a session that has seen no values
    pub fn new() -> Self {
        RunningMedian {
            lower: IndexedHeap::new(),
            upper: IndexedHeap::new(),
            next_seq: 0,
        }
    }

    /// Number of values seen so far
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Returns true before the first value
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// The current lower median, or `None` before the first value
    pub fn median(&self) -> Option<N> {
        self.lower.peek_min().map(|entry| entry.value)
    }

    /// Adds a value and returns the median of everything seen so far.
    pub fn push(&mut self, value: N) -> Result<N, HeapError> {
        let seq = self.next_seq;
        self.next_seq += 1;

        let goes_upper = match (self.upper.peek_min(), self.lower.peek_min()) {
            (Some(upper), _) => value > upper.value,
            (None, Some(lower)) => value > lower.value,
            (None, None) => false,
        };

        if goes_upper {
            self.upper.insert(UpperEntry { value, seq })?;
        } else {
            self.lower.insert(LowerEntry { value, seq })?;
        }

        self.rebalance()?;
        self.median().ok_or(HeapError::EmptyHeap)
    }

    /// Restores `upper.len() <= lower.len() <= upper.len() + 1`
    fn rebalance(&mut self) -> Result<(), HeapError> {
        while self.lower.len() > self.upper.len() + 1 {
            let LowerEntry { value, seq } = self.lower.extract_min()?;
            trace!(?value, "lower -> upper");
            self.upper.insert(UpperEntry { value, seq })?;
        }
        while self.upper.len() > self.lower.len() {
            let UpperEntry { value, seq } = self.upper.extract_min()?;
            trace!(?value, "upper -> lower");
            self.lower.insert(LowerEntry { value, seq })?;
        }
        Ok(())
    }
}

impl<N> Default for RunningMedian<N>
where
    N: Ord + Copy + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for RunningMedian<N>
where
    N: Ord + Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningMedian")
            .field("len", &self.len())
            .field("median", &self.median())
            .finish()
    }
}

/// Lazy iterator yielding one running median per input value.
///
/// Created by [`running_medians`].
pub struct RunningMedians<I>
where
    I: Iterator,
    I::Item: Ord + Copy,
{
    values: I,
    state: RunningMedian<I::Item>,
}

impl<I> Iterator for RunningMedians<I>
where
    I: Iterator,
    I::Item: Ord + Copy + fmt::Debug,
{
    type Item = Result<I::Item, HeapError>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.values.next()?;
        Some(self.state.push(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<I> ExactSizeIterator for RunningMedians<I>
where
    I: ExactSizeIterator,
    I::Item: Ord + Copy + fmt::Debug,
{
}

/// Running lower medians of `values`, computed lazily.
pub fn running_medians<I>(values: I) -> RunningMedians<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Ord + Copy + fmt::Debug,
{
    RunningMedians {
        values: values.into_iter(),
        state: RunningMedian::new(),
    }
}

/// Running lower medians by sorting every prefix. O(n² log n).
pub fn naive_medians<N: Ord + Copy>(values: &[N]) -> Vec<N> {
    (1..=values.len())
        .map(|k| {
            let mut prefix = values[..k].to_vec();
            prefix.sort_unstable();
            prefix[(k - 1) / 2]
        })
        .collect()
}
