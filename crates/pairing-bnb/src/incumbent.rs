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

//! Incumbent management for branch-and-bound.
//!
//! The incumbent is the best complete assignment found so far. Its benefit is
//! the pruning threshold: a state whose bound does not exceed it is dropped.
//!
//! - `SharedIncumbent<T>` is a thread-safe holder. The best benefit sits in an
//!   `AtomicI64` for lock-free reads on the hot path, and the assignment itself
//!   sits behind a `Mutex`, which is the source of truth.
//! - `IncumbentStore<T>` is the seam the search loop talks to. `NoSharedIncumbent`
//!   keeps everything local; `SharedIncumbentAdapter` reads and publishes
//!   through a borrowed `SharedIncumbent`, which is how parallel workers and
//!   warm starts feed each other thresholds.
//!
//! `i64::MIN` (or `T::min_value()` after conversion) is the "no incumbent yet"
//! sentinel. Benefits are never negative, so any complete assignment beats it.

use pairing_core::num::BenefitNumeric;
use pairing_model::assignment::Assignment;
use std::{
    marker::PhantomData,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicI64, Ordering},
    },
};

/// A concurrent holder for the best assignment found during search.
///
/// Only strictly better assignments are installed, so the first of several
/// equally good assignments wins.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Benefit of the incumbent as `i64` for atomic access.
    best_benefit: AtomicI64,
    assignment: Mutex<Option<Assignment<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.best_benefit() {
            i64::MIN => write!(f, "Incumbent(none)"),
            best => write!(f, "Incumbent(best_benefit: {})", best),
        }
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates an empty shared incumbent.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            best_benefit: AtomicI64::new(i64::MIN),
            assignment: Mutex::new(None),
        }
    }

    /// Returns the best benefit, or `i64::MIN` if nothing is installed.
    #[inline]
    pub fn best_benefit(&self) -> i64 {
        self.best_benefit.load(Ordering::Relaxed)
    }

    /// Returns `true` once an assignment has been installed.
    #[inline]
    pub fn has_assignment(&self) -> bool {
        self.best_benefit() != i64::MIN
    }

    /// Returns the best benefit converted to `T`.
    #[inline]
    pub fn best_benefit_as(&self) -> Result<T, <T as TryFrom<i64>>::Error>
    where
        T: TryFrom<i64>,
    {
        T::try_from(self.best_benefit())
    }

    /// Returns a copy of the current incumbent, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Assignment<T>>
    where
        T: Clone,
    {
        self.assignment
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `candidate` if it is a bijection and strictly better than the
    /// incumbent. Returns `true` if it was installed.
    pub fn try_install(&self, candidate: &Assignment<T>) -> bool
    where
        T: BenefitNumeric,
    {
        if !candidate.is_bijection() {
            return false;
        }

        let candidate_benefit: i64 = candidate.benefit().into();

        // Cheap rejection without the lock.
        if candidate_benefit <= self.best_benefit() {
            return false;
        }

        let mut guard = self
            .assignment
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // The atomic may be stale; compare against the locked value.
        if let Some(current) = guard.as_ref() {
            let current_benefit: i64 = current.benefit().into();
            if candidate_benefit <= current_benefit {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.best_benefit.store(candidate_benefit, Ordering::Relaxed);
        true
    }
}

/// The interface between the search loop and wherever the incumbent lives.
pub trait IncumbentStore<T>
where
    T: BenefitNumeric,
{
    /// Returns the threshold to start from: the best known benefit, or
    /// `T::min_value()` when nothing is known.
    fn initial_lower_bound(&self) -> T;

    /// Merges the local best benefit with whatever the store knows.
    fn tighten(&self, current_local_best: T) -> T;

    /// Publishes a new local incumbent.
    fn on_solution_found(&self, assignment: &Assignment<T>);

    /// Returns the assignment the store holds, if any. Used when a search
    /// proves that nothing beats an incumbent it did not find itself.
    fn best_assignment(&self) -> Option<Assignment<T>>;
}

/// An `IncumbentStore` that keeps the incumbent local to one search.
#[repr(transparent)]
pub struct NoSharedIncumbent<T>(PhantomData<T>);

impl<T> Default for NoSharedIncumbent<T>
where
    T: BenefitNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NoSharedIncumbent<T>
where
    T: BenefitNumeric,
{
    #[inline(always)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> IncumbentStore<T> for NoSharedIncumbent<T>
where
    T: BenefitNumeric,
{
    #[inline(always)]
    fn initial_lower_bound(&self) -> T {
        T::min_value()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        current_local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _: &Assignment<T>) {}

    #[inline(always)]
    fn best_assignment(&self) -> Option<Assignment<T>> {
        None
    }
}

/// An `IncumbentStore` backed by a borrowed `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a, T> {
    inner: &'a SharedIncumbent<T>,
}

impl<'a, T> SharedIncumbentAdapter<'a, T> {
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent<T>) -> Self {
        Self { inner }
    }
}

impl<T> IncumbentStore<T> for SharedIncumbentAdapter<'_, T>
where
    T: BenefitNumeric,
{
    #[inline(always)]
    fn initial_lower_bound(&self) -> T {
        self.inner.best_benefit_as().unwrap_or(T::min_value())
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        self.initial_lower_bound().max(current_local_best)
    }

    #[inline(always)]
    fn on_solution_found(&self, assignment: &Assignment<T>) {
        self.inner.try_install(assignment);
    }

    #[inline]
    fn best_assignment(&self) -> Option<Assignment<T>> {
        self.inner.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairing_model::index::LevelIndex;
    use std::sync::Arc;

    type IntegerType = i64;

    fn make_assignment(benefit: IntegerType, n: usize) -> Assignment<IntegerType> {
        let levels = (0..n).map(LevelIndex::new).collect::<Vec<_>>();
        let benefits = vec![0; n];
        Assignment::new(benefit, levels, benefits)
    }

    #[test]
    fn test_new_is_empty() {
        let inc = SharedIncumbent::<IntegerType>::new();
        assert_eq!(inc.best_benefit(), i64::MIN);
        assert!(!inc.has_assignment());
        assert!(inc.snapshot().is_none());
        assert_eq!(inc.to_string(), "Incumbent(none)");
    }

    #[test]
    fn test_installs_only_strict_improvements() {
        let inc = SharedIncumbent::<IntegerType>::new();
        assert!(inc.try_install(&make_assignment(10, 2)));
        assert!(!inc.try_install(&make_assignment(10, 3)));
        assert!(!inc.try_install(&make_assignment(5, 2)));
        assert!(inc.try_install(&make_assignment(11, 2)));

        assert_eq!(inc.best_benefit(), 11);
        assert_eq!(inc.best_benefit_as().unwrap(), 11);
        // The first of two equal candidates is kept.
        assert_eq!(inc.snapshot().unwrap().len(), 2);
        assert_eq!(inc.to_string(), "Incumbent(best_benefit: 11)");
    }

    #[test]
    fn test_refuses_assignments_that_share_a_level() {
        let inc = SharedIncumbent::<IntegerType>::new();
        let shared_level = Assignment::new(18, vec![LevelIndex::new(0); 2], vec![9, 9]);
        assert!(!inc.try_install(&shared_level));
        assert!(!inc.has_assignment());
        assert_eq!(inc.best_benefit(), i64::MIN);
    }

    #[test]
    fn test_zero_benefit_beats_empty() {
        let inc = SharedIncumbent::<IntegerType>::new();
        assert!(inc.try_install(&Assignment::empty()));
        assert_eq!(inc.best_benefit(), 0);
    }

    #[test]
    fn test_concurrent_installs_keep_the_maximum() {
        let inc = Arc::new(SharedIncumbent::<IntegerType>::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let inc = Arc::clone(&inc);
                std::thread::spawn(move || {
                    for k in 0..100 {
                        inc.try_install(&make_assignment((k * 8 + t) as IntegerType, 1));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(inc.best_benefit(), 99 * 8 + 7);
        assert_eq!(inc.snapshot().unwrap().benefit(), 99 * 8 + 7);
    }

    #[test]
    fn test_no_shared_incumbent() {
        let store = NoSharedIncumbent::<IntegerType>::new();
        assert_eq!(store.initial_lower_bound(), IntegerType::MIN);
        for v in [0, 7, 1_000] {
            assert_eq!(store.tighten(v), v);
        }
        store.on_solution_found(&make_assignment(3, 1));
        assert!(store.best_assignment().is_none());
    }

    #[test]
    fn test_adapter_reads_and_publishes() {
        let shared = SharedIncumbent::<IntegerType>::new();
        let adapter = SharedIncumbentAdapter::new(&shared);
        assert_eq!(adapter.initial_lower_bound(), IntegerType::MIN);

        adapter.on_solution_found(&make_assignment(42, 2));
        assert_eq!(shared.best_benefit(), 42);
        assert_eq!(adapter.initial_lower_bound(), 42);
        assert_eq!(adapter.tighten(40), 42);
        assert_eq!(adapter.tighten(50), 50);
        assert_eq!(adapter.best_assignment().map(|a| a.benefit()), Some(42));
    }

    #[test]
    fn test_adapter_narrow_type_maps_sentinel() {
        let shared = SharedIncumbent::<i8>::new();
        let adapter = SharedIncumbentAdapter::new(&shared);
        assert_eq!(adapter.initial_lower_bound(), i8::MIN);
    }
}
