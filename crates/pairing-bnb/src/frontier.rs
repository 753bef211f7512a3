// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::state::AssignmentState;
use pairing_core::num::BenefitNumeric;
use std::{cmp::Reverse, collections::BinaryHeap};

/// A live state together with its insertion sequence number.
#[derive(Clone, Debug)]
struct FrontierEntry<T> {
    bound: T,
    seq: Reverse<u64>,
    state: AssignmentState<T>,
}

impl<T> FrontierEntry<T>
where
    T: BenefitNumeric,
{
    #[inline(always)]
    fn key(&self) -> (T, Reverse<u64>) {
        (self.bound, self.seq)
    }
}

impl<T> PartialEq for FrontierEntry<T>
where
    T: BenefitNumeric,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for FrontierEntry<T> where T: BenefitNumeric {}

impl<T> PartialOrd for FrontierEntry<T>
where
    T: BenefitNumeric,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T>
where
    T: BenefitNumeric,
{
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// A max-priority queue of live states keyed by local bound.
///
/// `pop_max` returns the state with the greatest bound. Equal bounds leave in
/// insertion order, oldest first, so a search is reproducible no matter how
/// the heap happens to arrange equal keys.
///
/// Performance notes:
/// - `preallocated` avoids early reallocations; `clear` keeps the capacity so
///   a solver can reuse its frontier across runs.
/// - `push` and `pop_max` are O(log k) for `k` live states.
#[derive(Clone, Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    next_seq: u64,
    peak_len: usize,
}

impl<T> Default for Frontier<T>
where
    T: BenefitNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T>
where
    T: BenefitNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            peak_len: 0,
        }
    }

    /// Creates a frontier with room for the children of the first few levels
    /// of an `n`-dimensional tree.
    #[inline]
    pub fn preallocated(n: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(n.saturating_mul(n)),
            next_seq: 0,
            peak_len: 0,
        }
    }

    /// Removes all states and resets the counters, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
        self.peak_len = 0;
    }

    /// Returns the number of live states.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the largest number of live states seen since the last `clear`.
    #[inline]
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }

    /// Inserts a state.
    #[inline]
    pub fn push(&mut self, state: AssignmentState<T>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            bound: state.local_bound(),
            seq: Reverse(seq),
            state,
        });
        self.peak_len = self.peak_len.max(self.heap.len());
    }

    /// Removes and returns the state with the greatest bound.
    #[inline]
    pub fn pop_max(&mut self) -> Option<AssignmentState<T>> {
        self.heap.pop().map(|entry| entry.state)
    }

    /// Returns the greatest bound without removing its state.
    #[inline]
    pub fn peek_bound(&self) -> Option<T> {
        self.heap.peek().map(|entry| entry.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::remaining_max::RemainingMaxBound;
    use pairing_model::{index::ChoiceIndex, matrix::BenefitMatrix};

    type IntegerType = i64;

    fn tapas() -> BenefitMatrix<IntegerType> {
        BenefitMatrix::from_rows(vec![
            vec![25, 40, 30, 10],
            vec![40, 35, 5, 50],
            vec![15, 5, 50, 40],
            vec![10, 35, 40, 30],
        ])
        .unwrap()
    }

    fn children(m: &BenefitMatrix<IntegerType>) -> Vec<AssignmentState<IntegerType>> {
        let root = AssignmentState::root(m, &RemainingMaxBound);
        (0..4)
            .map(|c| root.bind(m, &RemainingMaxBound, ChoiceIndex::new(c)))
            .collect()
    }

    #[test]
    fn test_new_is_empty() {
        let f = Frontier::<IntegerType>::new();
        assert!(f.is_empty());
        assert_eq!(f.len(), 0);
        assert_eq!(f.peek_bound(), None);
        assert_eq!(f.peak_len(), 0);
    }

    #[test]
    fn test_pops_in_descending_bound_order() {
        let m = tapas();
        let mut f = Frontier::preallocated(4);
        for s in children(&m) {
            f.push(s);
        }
        assert_eq!(f.len(), 4);
        assert_eq!(f.peak_len(), 4);

        let mut bounds = Vec::new();
        while let Some(s) = f.pop_max() {
            bounds.push(s.local_bound());
        }
        let mut sorted = bounds.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(bounds, sorted);
        assert!(f.is_empty());
    }

    #[test]
    fn test_equal_bounds_leave_oldest_first() {
        // Every child has the same bound on a constant matrix.
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![1; 3]; 3]).unwrap();
        let root = AssignmentState::root(&m, &RemainingMaxBound);
        let mut f = Frontier::new();
        for c in [2, 0, 1] {
            f.push(root.bind(&m, &RemainingMaxBound, ChoiceIndex::new(c)));
        }
        let order: Vec<bool> = [2, 0, 1]
            .iter()
            .map(|&c| {
                f.pop_max()
                    .unwrap()
                    .is_bound(ChoiceIndex::new(c))
            })
            .collect();
        assert_eq!(order, vec![true, true, true]);
    }

    #[test]
    fn test_peek_bound_and_clear() {
        let m = tapas();
        let mut f = Frontier::new();
        let states = children(&m);
        let best = states.iter().map(|s| s.local_bound()).max();
        for s in states {
            f.push(s);
        }
        assert_eq!(f.peek_bound(), best);

        f.pop_max();
        assert_eq!(f.peak_len(), 4);
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.peak_len(), 0);
    }
}
