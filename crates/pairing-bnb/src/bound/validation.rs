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

//! Brute-force admissibility checks for bound estimators.
//!
//! An estimator is admissible when no completion of a partial assignment
//! earns more than the bound the estimator attached to it. The check below
//! enumerates the whole search tree, so it is only useful for small matrices;
//! the solver runs it as a debug assertion and skips trees that are too large.

use crate::{bound::estimator::BoundEstimator, state::AssignmentState};
use pairing_core::num::BenefitNumeric;
use pairing_model::{index::LevelIndex, matrix::BenefitMatrix};

/// Returns `true` if `estimator` is admissible on every state of the search
/// tree of `matrix`, and `false` at the first state whose bound is exceeded
/// by one of its completions.
///
/// Trees with more than `max_nodes` nodes are not enumerated and reported as
/// admissible.
pub fn is_admissible_estimator_exhaustive<T, E>(
    estimator: &E,
    matrix: &BenefitMatrix<T>,
    max_nodes: u64,
) -> bool
where
    T: BenefitNumeric,
    E: BoundEstimator<T> + ?Sized,
{
    let max_log = (max_nodes.max(1) as f64).log10();
    if matrix.complexity().raw() > max_log {
        return true;
    }

    let root = AssignmentState::root(matrix, estimator);
    best_remaining(matrix, estimator, &root).is_some()
}

/// Returns the best benefit any completion of `state` earns on the levels
/// still open, or `None` if some state in the subtree violates its bound.
fn best_remaining<T, E>(
    matrix: &BenefitMatrix<T>,
    estimator: &E,
    state: &AssignmentState<T>,
) -> Option<T>
where
    T: BenefitNumeric,
    E: BoundEstimator<T> + ?Sized,
{
    if state.is_complete() {
        return Some(T::ZERO);
    }

    let level = LevelIndex::new(state.next_level());
    let mut best = T::ZERO;
    for choice in state.unbound_choices() {
        let child = state.bind(matrix, estimator, choice);
        let tail = best_remaining(matrix, estimator, &child)?;
        best = best.max(matrix.benefit(level, choice).saturating_add_val(tail));
    }

    if state.local_bound() < state.accumulated_benefit().saturating_add_val(best) {
        return None;
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::{dual_max::DualMaxBound, remaining_max::RemainingMaxBound};
    use fixedbitset::FixedBitSet;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    type IntegerType = i64;

    /// Claims nothing is left to earn. Inadmissible as soon as a level is open.
    struct ZeroBound;

    impl BoundEstimator<IntegerType> for ZeroBound {
        fn name(&self) -> &str {
            "ZeroBound"
        }

        fn estimate_remaining(
            &self,
            _matrix: &BenefitMatrix<IntegerType>,
            _bound_choices: &FixedBitSet,
            _next_level: usize,
        ) -> IntegerType {
            0
        }
    }

    fn random_matrix(rng: &mut StdRng, n: usize) -> BenefitMatrix<IntegerType> {
        let values = (0..n * n).map(|_| rng.random_range(0..100)).collect();
        BenefitMatrix::from_flat(n, values).unwrap()
    }

    #[test]
    fn test_shipped_bounds_are_admissible_on_random_matrices() {
        let mut rng = StdRng::seed_from_u64(0xB0B);
        for n in 0..=6 {
            for _ in 0..10 {
                let m = random_matrix(&mut rng, n);
                assert!(is_admissible_estimator_exhaustive(&RemainingMaxBound, &m, 100_000));
                assert!(is_admissible_estimator_exhaustive(&DualMaxBound, &m, 100_000));
            }
        }
    }

    #[test]
    fn test_detects_inadmissible_bound() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert!(!is_admissible_estimator_exhaustive(&ZeroBound, &m, 100));
    }

    #[test]
    fn test_zero_bound_is_admissible_on_zero_matrix() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![0; 3]; 3]).unwrap();
        assert!(is_admissible_estimator_exhaustive(&ZeroBound, &m, 100));
    }

    #[test]
    fn test_large_trees_are_skipped() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![1; 8]; 8]).unwrap();
        // 8 levels span more than 10^5 nodes.
        assert!(is_admissible_estimator_exhaustive(&ZeroBound, &m, 1_000));
    }
}
