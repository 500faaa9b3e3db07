/*
Array-backed binary heap with removal of arbitrary elements.

The node at index i has children at 2i+1 and 2i+2 and its parent at (i-1)/2.
Ordering is decided by a `Compare` predicate rather than `Ord`, so the same
container serves as a min-heap (default), a max-heap, or anything a closure
can express. Iteration walks the backing array, not sorted order.
*/

use std::slice;

use crate::error::HeapError;

/// Ordering predicate for [`PriorityHeap`].
///
/// `compare(a, b)` returns true when `a` should sit below `b`, i.e. `b` is the
/// better of the two and belongs closer to the root.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> bool;
}

/// Smallest element at the root.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinFirst;

/// Largest element at the root.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxFirst;

impl<T: PartialOrd + ?Sized> Compare<T> for MinFirst {
    fn compare(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

impl<T: PartialOrd + ?Sized> Compare<T> for MaxFirst {
    fn compare(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn compare(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

#[derive(Clone, Debug)]
pub struct PriorityHeap<T, C = MinFirst> {
    data: Vec<T>,
    compare: C,
}

impl<T: PartialOrd> PriorityHeap<T> {
    pub fn new() -> Self {
        Self::with_compare(MinFirst)
    }

    /// Takes ownership of `data` and heapifies it in place.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self::from_vec_with(data, MinFirst)
    }
}

impl<T: PartialOrd> Default for PriorityHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Compare<T>> PriorityHeap<T, C> {
    pub fn with_compare(compare: C) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    pub fn from_vec_with(data: Vec<T>, compare: C) -> Self {
        let mut heap = Self { data, compare };
        heap.rebuild();
        heap
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The element `pop` would return next.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Elements in backing-array order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn insert(&mut self, elem: T) {
        self.data.push(elem);
        let last = self.data.len() - 1;
        self.sift_up(last);
    }

    /// Removes and returns the root.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyContainer);
        }
        // The last element takes over the root slot.
        let root = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(root)
    }

    /// Removes the first element equal to `elem`, scanning in array order.
    ///
    /// Returns false, leaving the heap untouched, when nothing matches.
    pub fn erase(&mut self, elem: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(index) = self.data.iter().position(|e| e == elem) else {
            return false;
        };
        self.data.swap_remove(index);
        if index < self.data.len() {
            self.repair(index);
        }
        true
    }

    // The element moved into `index` came from the end of the array, so it
    // may be better than its new parent or worse than its new children.
    fn repair(&mut self, index: usize) {
        if index == 0 {
            self.sift_down(0);
        } else if Self::left(index) >= self.data.len() {
            self.sift_up(index);
        } else if self.sift_up(index) == index {
            self.sift_down(index);
        }
    }

    /// Returns the index the element settled at.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.compare.compare(&self.data[parent], &self.data[index]) {
                break;
            }
            self.data.swap(parent, index);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = Self::left(index);
            if left >= len {
                break;
            }
            let right = left + 1;
            let better = if right < len
                && self.compare.compare(&self.data[left], &self.data[right])
            {
                right
            } else {
                left
            };
            if !self.compare.compare(&self.data[index], &self.data[better]) {
                break;
            }
            self.data.swap(index, better);
            index = better;
        }
    }

    fn rebuild(&mut self) {
        for index in (0..self.data.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    #[inline]
    fn left(index: usize) -> usize {
        2 * index + 1
    }
}

impl<T: PartialOrd> From<Vec<T>> for PriorityHeap<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: PartialOrd> FromIterator<T> for PriorityHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T, C: Compare<T>> Extend<T> for PriorityHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a PriorityHeap<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
