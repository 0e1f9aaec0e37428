//! Binary min-heap priority queue with a pluggable comparator.
//!
//! The queue never looks inside its entries: ordering is delegated to a
//! [`Comparator`] handed over at construction, so the same heap serves
//! tree nodes, plain integers, or anything else the caller can order.
//!
//! Storage is a 0-indexed array: `parent(i) = (i - 1) / 2`,
//! `left(i) = 2i + 1`, `right(i) = 2i + 2`.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::{Error, Result};

/// Capacity of a queue created with [`PriorityQueue::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// A total ordering over queue entries.
///
/// `Less` means "extract first". Any `Fn(&T, &T) -> Ordering` is a comparator.
pub trait Comparator<T> {
    /// Compare two entries.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Min-heap priority queue over a growable buffer.
///
/// Among entries that compare equal, which one is extracted first is
/// implementation-defined (it depends on their current heap positions).
#[derive(Debug)]
pub struct PriorityQueue<T, C> {
    entries: Vec<T>,
    capacity: usize,
    comparator: C,
}

// The clone's buffer must really hold `capacity` entries, or its next insert
// would reallocate behind `grow`'s back.
impl<T: Clone, C: Clone> Clone for PriorityQueue<T, C> {
    fn clone(&self) -> Self {
        let mut entries = Vec::with_capacity(self.capacity);
        entries.extend_from_slice(&self.entries);
        Self {
            entries,
            capacity: self.capacity,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    /// Create an empty queue with [`DEFAULT_CAPACITY`].
    pub fn new(comparator: C) -> Self {
        Self {
            entries: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            comparator,
        }
    }

    /// Create an empty queue with the given initial capacity.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `capacity` is 0, and
    /// `Error::ResourceExhausted` if the buffer cannot be allocated.
    pub fn with_capacity(capacity: usize, comparator: C) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("queue capacity must be positive"));
        }
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| Error::ResourceExhausted(capacity))?;
        Ok(Self {
            entries,
            capacity,
            comparator,
        })
    }

    /// Number of entries currently queued.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries the queue can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The minimum entry, if any, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Insert an entry, doubling the capacity first if the buffer is full.
    ///
    /// # Errors
    /// Returns `Error::ResourceExhausted` if the buffer cannot grow.
    pub fn insert(&mut self, entry: T) -> Result<()> {
        if self.entries.len() == self.capacity {
            self.grow()?;
        }
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Remove and return the minimum entry.
    ///
    /// # Errors
    /// Returns `Error::Underflow` if the queue is empty.
    pub fn extract_min(&mut self) -> Result<T> {
        if self.entries.is_empty() {
            return Err(Error::Underflow);
        }
        // The former last entry lands in the root slot and walks down.
        let min = self.entries.swap_remove(0);
        self.sift_down(0);
        Ok(min)
    }

    /// Check that no child compares strictly less than its parent.
    pub fn is_valid_heap(&self) -> bool {
        (1..self.entries.len()).all(|i| {
            self.comparator
                .compare(&self.entries[i], &self.entries[(i - 1) / 2])
                != Ordering::Less
        })
    }

    /// Consume the queue, returning the remaining entries in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }

    /// Consume the queue, returning the remaining entries in extraction order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.entries.len());
        while let Ok(entry) = self.extract_min() {
            sorted.push(entry);
        }
        sorted
    }

    fn grow(&mut self) -> Result<()> {
        let new_capacity = self
            .capacity
            .checked_mul(2)
            .ok_or(Error::ResourceExhausted(usize::MAX))?;
        self.entries
            .try_reserve_exact(new_capacity - self.entries.len())
            .map_err(|_| Error::ResourceExhausted(new_capacity))?;
        trace!(from = self.capacity, to = new_capacity, "priority queue grew");
        self.capacity = new_capacity;
        Ok(())
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.entries[a], &self.entries[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            // Left child wins ties.
            let smaller = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(smaller, index) {
                break;
            }
            self.entries.swap(index, smaller);
            index = smaller;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ascending(a: &u32, b: &u32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn test_extract_from_empty_underflows() {
        let mut pq: PriorityQueue<u32, _> = PriorityQueue::new(ascending);
        assert!(matches!(pq.extract_min(), Err(Error::Underflow)));
        pq.insert(7).unwrap();
        assert_eq!(pq.extract_min().unwrap(), 7);
        assert!(matches!(pq.extract_min(), Err(Error::Underflow)));
    }

    #[test]
    fn test_capacity_doubles_when_full() {
        let mut pq: PriorityQueue<u32, _> = PriorityQueue::new(ascending);
        assert_eq!(pq.capacity(), DEFAULT_CAPACITY);
        for i in 0..10 {
            pq.insert(i).unwrap();
        }
        assert_eq!(pq.capacity(), 10);
        pq.insert(10).unwrap();
        assert_eq!(pq.capacity(), 20);
        assert_eq!(pq.len(), 11);
        assert_eq!(pq.into_sorted_vec(), (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(
            PriorityQueue::<u32, _>::with_capacity(0, ascending),
            Err(Error::InvalidArgument(_))
        ));
        let mut pq: PriorityQueue<u32, _> = PriorityQueue::with_capacity(1, ascending).unwrap();
        pq.insert(3).unwrap();
        pq.insert(1).unwrap();
        assert_eq!(pq.capacity(), 2);
        assert_eq!(pq.peek(), Some(&1));
    }

    #[test]
    fn test_clone_keeps_reserved_capacity() {
        let mut pq: PriorityQueue<u32, _> = PriorityQueue::new(ascending);
        for v in [5, 3, 8] {
            pq.insert(v).unwrap();
        }
        let mut copy = pq.clone();
        assert_eq!(copy.capacity(), DEFAULT_CAPACITY);
        assert!(copy.entries.capacity() >= copy.capacity());

        let reserved = copy.entries.capacity();
        for v in 0..7 {
            copy.insert(v).unwrap();
        }
        assert_eq!(copy.len(), DEFAULT_CAPACITY);
        assert_eq!(copy.entries.capacity(), reserved);
        assert!(copy.is_valid_heap());

        assert_eq!(pq.into_sorted_vec(), vec![3, 5, 8]);
    }

    #[test]
    fn test_comparator_decides_order() {
        let mut pq = PriorityQueue::new(|a: &u32, b: &u32| b.cmp(a));
        for v in [4, 9, 1, 7] {
            pq.insert(v).unwrap();
        }
        assert_eq!(pq.into_sorted_vec(), vec![9, 7, 4, 1]);
    }

    #[test]
    fn test_entries_are_not_inspected() {
        // Payload only reachable through the comparator's key.
        let mut pq = PriorityQueue::new(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
        pq.insert((2, 'c')).unwrap();
        pq.insert((0, 'a')).unwrap();
        pq.insert((1, 'b')).unwrap();
        let tags: Vec<char> = pq.into_sorted_vec().into_iter().map(|(_, tag)| tag).collect();
        assert_eq!(tags, vec!['a', 'b', 'c']);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_heap_invariant_holds(
            ops in prop::collection::vec(prop::option::of(0u32..50), 0..200),
        ) {
            let mut pq: PriorityQueue<u32, _> = PriorityQueue::new(ascending);
            let mut model: Vec<u32> = Vec::new();
            for op in ops {
                match op {
                    Some(v) => {
                        pq.insert(v).unwrap();
                        model.push(v);
                    }
                    None => {
                        let got = pq.extract_min().ok();
                        let want = model.iter().copied().min();
                        if let Some(w) = want {
                            let pos = model.iter().position(|&x| x == w).unwrap();
                            model.swap_remove(pos);
                        }
                        prop_assert_eq!(got, want);
                    }
                }
                prop_assert!(pq.is_valid_heap());
                prop_assert_eq!(pq.len(), model.len());
            }
        }

        #[test]
        fn prop_extraction_is_sorted(input in prop::collection::vec(any::<u16>(), 0..300)) {
            let mut pq = PriorityQueue::new(|a: &u16, b: &u16| a.cmp(b));
            for &v in &input {
                pq.insert(v).unwrap();
            }
            let mut expected = input.clone();
            expected.sort_unstable();
            prop_assert_eq!(pq.into_sorted_vec(), expected);
        }
    }
}
