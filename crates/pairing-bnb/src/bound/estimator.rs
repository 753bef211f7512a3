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

use fixedbitset::FixedBitSet;
use pairing_core::num::BenefitNumeric;
use pairing_model::matrix::BenefitMatrix;

/// A strategy for bounding the benefit a partial assignment can still earn.
///
/// `BoundEstimator` decouples the search from a particular relaxation. The
/// search calls `estimate_remaining` once per created state, right after the
/// binding that produced it, and caches the result as the state's local bound.
///
/// Estimates must be admissible: for every completion of the partial
/// assignment, the benefit earned on levels `next_level..N` must not exceed
/// the estimate. An estimate that is too small makes the search discard
/// optimal assignments.
pub trait BoundEstimator<T>
where
    T: BenefitNumeric,
{
    /// Returns the name of the estimator.
    fn name(&self) -> &str;

    /// Estimates the best benefit the unbound choices can still earn on the
    /// levels `next_level..N`.
    ///
    /// `bound_choices` has bit `c` set iff choice `c` is already bound.
    /// Exactly `N - next_level` bits are clear.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `next_level > matrix.dimension()` or
    /// `bound_choices` is shorter than `matrix.dimension()`.
    fn estimate_remaining(
        &self,
        matrix: &BenefitMatrix<T>,
        bound_choices: &FixedBitSet,
        next_level: usize,
    ) -> T;

    /// Computes the full upper bound, `accumulated + estimate_remaining(..)`.
    ///
    /// A `BenefitMatrix` guarantees its column maxima sum within `T`, so this
    /// never overflows for estimates that stay below that sum. Larger
    /// estimates saturate at `T::MAX`.
    #[inline]
    fn upper_bound(
        &self,
        matrix: &BenefitMatrix<T>,
        accumulated: T,
        bound_choices: &FixedBitSet,
        next_level: usize,
    ) -> T {
        accumulated.saturating_add_val(self.estimate_remaining(matrix, bound_choices, next_level))
    }
}

impl<T, E> BoundEstimator<T> for &E
where
    T: BenefitNumeric,
    E: BoundEstimator<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn estimate_remaining(
        &self,
        matrix: &BenefitMatrix<T>,
        bound_choices: &FixedBitSet,
        next_level: usize,
    ) -> T {
        (**self).estimate_remaining(matrix, bound_choices, next_level)
    }
}

impl<T> std::fmt::Debug for dyn BoundEstimator<T> + '_
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundEstimator({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn BoundEstimator<T> + '_
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundEstimator({})", self.name())
    }
}
