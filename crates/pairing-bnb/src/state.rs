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

//! Partial assignment snapshots.
//!
//! This module provides `AssignmentState`, one node of the search tree. A
//! state records which choices are bound to which of the levels filled so
//! far, the benefit those bindings earned, and an admissible upper bound on
//! every completion. Levels are filled strictly in order, so a state at
//! depth `k` has bound one choice to each of the levels `0..k`.
//!
//! States are values: `bind` copies the parent and applies one binding, and
//! a state is never modified afterwards. That keeps the frontier free of
//! shared mutable data at the price of one `O(N)` copy per child.
//!
//! Invariants (debug-checked):
//! - `accumulated_benefit <= local_bound`
//! - `bound_choices.count_ones(..) == num_bound`
//! - for every bound choice `c`: `levels[c] < num_bound`

use crate::bound::estimator::BoundEstimator;
use fixedbitset::FixedBitSet;
use pairing_core::num::BenefitNumeric;
use pairing_model::{
    assignment::Assignment,
    index::{ChoiceIndex, LevelIndex},
    matrix::BenefitMatrix,
};

/// An immutable node of the assignment search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState<T> {
    // Heap-managed fields first.
    bound_choices: FixedBitSet,
    levels: Vec<LevelIndex>,

    accumulated_benefit: T,
    local_bound: T,

    num_bound: usize,
}

impl<T> AssignmentState<T>
where
    T: BenefitNumeric,
{
    /// Creates the root: nothing bound, zero benefit, and the estimator's
    /// bound over all choices and all levels.
    pub fn root<E>(matrix: &BenefitMatrix<T>, estimator: &E) -> Self
    where
        E: BoundEstimator<T> + ?Sized,
    {
        let n = matrix.dimension();
        let bound_choices = FixedBitSet::with_capacity(n);
        let local_bound = estimator.upper_bound(matrix, T::ZERO, &bound_choices, 0);

        debug_assert!(
            !local_bound.is_negative(),
            "root bound must not be negative, got {}",
            local_bound
        );

        Self {
            bound_choices,
            levels: vec![LevelIndex::new(0); n],
            accumulated_benefit: T::ZERO,
            local_bound,
            num_bound: 0,
        }
    }

    /// Returns a child that additionally binds `choice` to the next level.
    ///
    /// The child's bound is its accumulated benefit plus the estimate for the
    /// unbound choices over the levels after the new one.
    ///
    /// # Panics
    ///
    /// Panics if `choice` is out of range, already bound, or if the state is
    /// already complete.
    pub fn bind<E>(&self, matrix: &BenefitMatrix<T>, estimator: &E, choice: ChoiceIndex) -> Self
    where
        E: BoundEstimator<T> + ?Sized,
    {
        let n = self.levels.len();
        let index = choice.get();
        assert!(
            index < n,
            "called `AssignmentState::bind` with choice index out of bounds: the len is {} but the index is {}",
            n,
            index
        );
        assert!(
            !self.bound_choices.contains(index),
            "called `AssignmentState::bind` with choice {} already bound",
            index
        );
        assert!(
            self.num_bound < n,
            "called `AssignmentState::bind` on a complete state with {} levels",
            n
        );

        assert_eq!(
            matrix.dimension(),
            n,
            "called `AssignmentState::bind` with a matrix of a different dimension"
        );

        let level = LevelIndex::new(self.num_bound);
        // SAFETY: `level` and `choice` were both checked against `n` above.
        let gained = unsafe { matrix.benefit_unchecked(level, choice) };

        let mut child = self.clone();
        child.bound_choices.insert(index);
        child.levels[index] = level;
        child.num_bound += 1;
        child.accumulated_benefit = self.accumulated_benefit.saturating_add_val(gained);
        child.local_bound = estimator.upper_bound(
            matrix,
            child.accumulated_benefit,
            &child.bound_choices,
            child.num_bound,
        );

        debug_assert!(
            child.accumulated_benefit <= child.local_bound,
            "bound {} below accumulated benefit {} after binding choice {}",
            child.local_bound,
            child.accumulated_benefit,
            index
        );

        child
    }

    /// Returns the dimension `N` of the underlying matrix.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.levels.len()
    }

    /// Returns the last level that was bound, or `None` for the root.
    #[inline]
    pub fn level(&self) -> Option<LevelIndex> {
        self.num_bound.checked_sub(1).map(LevelIndex::new)
    }

    /// Returns the level the next `bind` fills, which equals the depth.
    #[inline]
    pub fn next_level(&self) -> usize {
        self.num_bound
    }

    /// Returns the number of bound choices.
    #[inline]
    pub fn num_bound(&self) -> usize {
        self.num_bound
    }

    /// Returns `true` for the root state.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.num_bound == 0
    }

    /// Returns `true` once every level has a choice.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_bound == self.levels.len()
    }

    /// Returns `true` if `choice` already has a level.
    ///
    /// # Panics
    ///
    /// Panics if `choice` is out of range.
    #[inline]
    pub fn is_bound(&self, choice: ChoiceIndex) -> bool {
        let index = choice.get();
        assert!(
            index < self.levels.len(),
            "called `AssignmentState::is_bound` with choice index out of bounds: the len is {} but the index is {}",
            self.levels.len(),
            index
        );
        self.bound_choices.contains(index)
    }

    /// Returns the level bound to `choice`, or `None` if it is unbound.
    #[inline]
    pub fn level_of(&self, choice: ChoiceIndex) -> Option<LevelIndex> {
        self.is_bound(choice).then(|| self.levels[choice.get()])
    }

    /// Iterates over the unbound choices in ascending order.
    #[inline]
    pub fn unbound_choices(&self) -> impl Iterator<Item = ChoiceIndex> + '_ {
        let n = self.levels.len();
        self.bound_choices
            .zeroes()
            .take_while(move |&c| c < n)
            .map(ChoiceIndex::new)
    }

    /// Returns the bit set of bound choices.
    #[inline]
    pub fn bound_choices(&self) -> &FixedBitSet {
        &self.bound_choices
    }

    /// Returns the benefit earned by the bindings so far.
    #[inline]
    pub fn accumulated_benefit(&self) -> T {
        self.accumulated_benefit
    }

    /// Returns the admissible upper bound on every completion of this state.
    #[inline]
    pub fn local_bound(&self) -> T {
        self.local_bound
    }

    /// Converts a complete state into an `Assignment`.
    ///
    /// # Panics
    ///
    /// Panics if the state is not complete.
    pub fn to_assignment(&self, matrix: &BenefitMatrix<T>) -> Assignment<T> {
        assert!(
            self.is_complete(),
            "called `AssignmentState::to_assignment` on a partial state with {} of {} choices bound",
            self.num_bound,
            self.levels.len()
        );

        let benefits = self
            .levels
            .iter()
            .enumerate()
            .map(|(c, &level)| matrix.benefit(level, ChoiceIndex::new(c)))
            .collect();
        Assignment::new(self.accumulated_benefit, self.levels.clone(), benefits)
    }
}

impl<T> std::fmt::Display for AssignmentState<T>
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AssignmentState(depth: {}/{}, benefit: {}, bound: {}, [",
            self.num_bound,
            self.levels.len(),
            self.accumulated_benefit,
            self.local_bound
        )?;
        for (c, level) in self.levels.iter().enumerate() {
            if c > 0 {
                write!(f, " ")?;
            }
            if self.bound_choices.contains(c) {
                write!(f, "{}", level.get())?;
            } else {
                write!(f, "_")?;
            }
        }
        write!(f, "])")
    }
}
