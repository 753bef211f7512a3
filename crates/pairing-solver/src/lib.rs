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

//! # Pairing Solver
//!
//! The entry point for solving maximum-benefit assignment instances. This
//! crate wraps the best-first engine of `pairing_bnb` in a small API that
//! validates input, applies budgets, optionally searches in parallel, and
//! always answers with `(assignment, benefit, exact)`.
//!
//! ## Modules
//!
//! - `solver`: `solve`, `solve_rows`, the `SolverBuilder` and the parallel
//!   subtree runner with a shared incumbent.
//! - `stats`: statistics aggregated over all workers.
//!
//! ## Example
//!
//! ```rust
//! let outcome = pairing_solver::solve_rows(vec![vec![3i64, 1], vec![2, 5]]).unwrap();
//! let (assignment, benefit, exact) = outcome.into_parts();
//! assert_eq!(benefit, 8);
//! assert!(exact && assignment.is_bijection());
//! ```

pub mod solver;
pub mod stats;

pub use solver::{solve, solve_rows};
