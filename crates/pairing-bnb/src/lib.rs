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

//! Pairing-BnB: best-first branch-and-bound for the assignment problem
//!
//! Finds a one-to-one pairing of `N` choices with `N` levels that maximises
//! the total benefit of a `pairing_model::matrix::BenefitMatrix`. The solver
//! keeps bounding, ordering, monitoring and incumbent handling apart so each
//! can be swapped without touching the search loop.
//!
//! Core flow
//! - Provide a `BenefitMatrix<T>`.
//! - Choose a `bound::estimator::BoundEstimator` (admissible upper bounds).
//! - Optionally pass a shared incumbent (warm start, parallel workers) and
//!   monitors (budgets, cancellation, logging).
//! - Run `bnb::BnbSolver`.
//!
//! Design highlights
//! - States are immutable values: a child is its parent plus one binding.
//! - The frontier pops the greatest bound first; equal bounds leave in
//!   insertion order, so runs are reproducible.
//! - The search ends as soon as the best live bound cannot beat the
//!   incumbent. The root is always expanded.
//!
//! Assumptions and guarantees
//! - Bounds must be admissible (never below the best completion); debug
//!   builds verify this exhaustively on small matrices.
//! - An outcome is exact iff its termination reason is `OptimalityProven`.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `bound`: bound estimators and their validation.
//! - `frontier`: the best-first priority queue.
//! - `incumbent`: local and shared incumbent stores.
//! - `monitor`: tree-search monitors (limits, interrupt, log, composite).
//! - `result`: solver outcomes with termination reasons.
//! - `state`: immutable partial assignments.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod bound;
pub mod frontier;
pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod state;
pub mod stats;
