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

//! Column relaxation bound.
//!
//! Every unbound choice is assumed to land on whichever remaining level pays
//! it the most, ignoring that two choices may want the same level. The
//! per-choice maxima come from the suffix table of `BenefitMatrix`, so one
//! estimate costs O(N) instead of the O(N * N) rescan over remaining levels.

use crate::bound::estimator::BoundEstimator;
use fixedbitset::FixedBitSet;
use pairing_core::num::BenefitNumeric;
use pairing_model::{index::ChoiceIndex, matrix::BenefitMatrix};

/// Sums, over all unbound choices `d`, `max_{n >= next_level} benefit(n, d)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemainingMaxBound;

impl RemainingMaxBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> BoundEstimator<T> for RemainingMaxBound
where
    T: BenefitNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "RemainingMaxBound"
    }

    #[inline]
    fn estimate_remaining(
        &self,
        matrix: &BenefitMatrix<T>,
        bound_choices: &FixedBitSet,
        next_level: usize,
    ) -> T {
        debug_assert!(
            bound_choices.len() >= matrix.dimension(),
            "called `RemainingMaxBound::estimate_remaining` with a bit set of len {} for dimension {}",
            bound_choices.len(),
            matrix.dimension()
        );

        bound_choices
            .zeroes()
            .take_while(|&c| c < matrix.dimension())
            .fold(T::ZERO, |acc, c| {
                acc.saturating_add_val(matrix.max_benefit_from(next_level, ChoiceIndex::new(c)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_root_estimate_is_sum_of_column_maxima() {
        let m = tapas();
        let bits = FixedBitSet::with_capacity(4);
        // 40 + 40 + 50 + 50
        assert_eq!(RemainingMaxBound.estimate_remaining(&m, &bits, 0), 180);
    }

    #[test]
    fn test_estimate_skips_bound_choices_and_committed_levels() {
        let m = tapas();
        let mut bits = FixedBitSet::with_capacity(4);
        bits.insert(1);
        // Choices 0, 2, 3 over levels 1..4: 40 + 50 + 50.
        assert_eq!(RemainingMaxBound.estimate_remaining(&m, &bits, 1), 140);

        bits.insert(3);
        // Choices 0, 2 over levels 2..4: 15 + 50.
        assert_eq!(RemainingMaxBound.estimate_remaining(&m, &bits, 2), 65);
    }

    #[test]
    fn test_estimate_is_zero_when_everything_is_bound() {
        let m = tapas();
        let mut bits = FixedBitSet::with_capacity(4);
        bits.insert_range(..);
        assert_eq!(RemainingMaxBound.estimate_remaining(&m, &bits, 4), 0);
    }

    #[test]
    fn test_upper_bound_adds_accumulated() {
        let m = tapas();
        let bits = FixedBitSet::with_capacity(4);
        assert_eq!(RemainingMaxBound.upper_bound(&m, 5, &bits, 0), 185);
    }

    #[test]
    fn test_root_estimate_reaches_type_max_exactly() {
        let m = BenefitMatrix::from_rows(vec![vec![100i8, 27], vec![60, 0]]).unwrap();
        let bits = FixedBitSet::with_capacity(2);
        assert_eq!(RemainingMaxBound.estimate_remaining(&m, &bits, 0), i8::MAX);
    }

    #[test]
    fn test_name() {
        assert_eq!(
            BoundEstimator::<IntegerType>::name(&RemainingMaxBound::new()),
            "RemainingMaxBound"
        );
    }
}
