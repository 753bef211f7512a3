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

//! Row and column relaxation bound.
//!
//! `RemainingMaxBound` lets each unbound choice pick its favourite remaining
//! level. The mirror image lets each remaining level pick its favourite
//! unbound choice. Both relax the one-to-one constraint from a different
//! side, both are admissible, and so is their minimum. The row side costs
//! O(N * N) per estimate, which buys noticeably smaller trees on matrices
//! where a few choices dominate many levels.

use crate::bound::{estimator::BoundEstimator, remaining_max::RemainingMaxBound};
use fixedbitset::FixedBitSet;
use pairing_core::num::BenefitNumeric;
use pairing_model::{index::LevelIndex, matrix::BenefitMatrix};

/// `min(column bound, row bound)` over the unbound choices and remaining levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DualMaxBound;

impl DualMaxBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Sums, over remaining levels, the best benefit of any unbound choice.
    fn row_bound<T>(matrix: &BenefitMatrix<T>, bound_choices: &FixedBitSet, next_level: usize) -> T
    where
        T: BenefitNumeric,
    {
        let n = matrix.dimension();
        let mut total = T::ZERO;
        for level in next_level..n {
            let row = matrix.level_benefits(LevelIndex::new(level));
            let best = bound_choices
                .zeroes()
                .take_while(|&c| c < n)
                .map(|c| row[c])
                .max()
                .unwrap_or(T::ZERO);
            total = total.saturating_add_val(best);
        }
        total
    }
}

impl<T> BoundEstimator<T> for DualMaxBound
where
    T: BenefitNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "DualMaxBound"
    }

    fn estimate_remaining(
        &self,
        matrix: &BenefitMatrix<T>,
        bound_choices: &FixedBitSet,
        next_level: usize,
    ) -> T {
        let column = RemainingMaxBound.estimate_remaining(matrix, bound_choices, next_level);
        if column == T::ZERO {
            return column;
        }
        column.min(Self::row_bound(matrix, bound_choices, next_level))
    }
}
