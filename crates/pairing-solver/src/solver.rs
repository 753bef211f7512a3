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

//! # Configurable, Optionally Parallel Solver
//!
//! The front end callers use to solve an assignment instance. It wraps the
//! best-first engine of `pairing_bnb` with budgets, warm starts, logging and
//! a parallel mode, and always answers with an assignment plus a flag that
//! says whether the answer is proven optimal.
//!
//! ## Highlights
//!
//! - Parallel execution:
//!   - The level-0 choices are dealt round-robin to `threads` workers, each
//!     running a best-first search of its subtrees in a `std::thread::scope`.
//!   - All workers prune against one `SharedIncumbent<T>`.
//! - Budgets:
//!   - Every worker gets a `CompositeTreeSearchMonitor` with an external
//!     interrupt, an internal budget interrupt and the optional time and node
//!     limits. The node limit applies to each worker on its own.
//!   - A worker that stops without a proof raises the budget interrupt, so
//!     the remaining workers stop as well.
//! - Outcome construction:
//!   - The result is exact iff every worker proved its partition.
//!   - A search that stops before any complete assignment falls back to the
//!     identity assignment, so there is always an answer.
//!
//! ## Usage
//!
//! ```rust
//! use pairing_model::matrix::BenefitMatrix;
//! use pairing_solver::solver::{BoundKind, SolverBuilder};
//!
//! let matrix = BenefitMatrix::from_rows(vec![
//!     vec![25i64, 40, 30, 10],
//!     vec![40, 35, 5, 50],
//!     vec![15, 5, 50, 40],
//!     vec![10, 35, 40, 30],
//! ])
//! .unwrap();
//!
//! let solver = SolverBuilder::<i64>::new()
//!     .with_threads(2)
//!     .with_bound(BoundKind::DualMax)
//!     .with_time_limit(std::time::Duration::from_secs(30))
//!     .build();
//!
//! let (assignment, benefit, exact) = solver.solve(&matrix).into_parts();
//! assert_eq!(benefit, 150);
//! assert!(exact);
//! assert!(assignment.is_bijection());
//! ```

use crate::stats::SolverStatistics;
use pairing_bnb::{
    bnb::BnbSolver,
    bound::{dual_max::DualMaxBound, estimator::BoundEstimator, remaining_max::RemainingMaxBound},
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeTreeSearchMonitor,
        interrupt::{INTERRUPT_REASON, InterruptMonitor},
        log::LogTreeSearchMonitor,
        node_limit::NodeLimitMonitor,
        time_limit::TimeLimitMonitor,
    },
    result::{BnbSolverOutcome, TerminationReason},
};
use pairing_core::num::BenefitNumeric;
use pairing_model::{
    assignment::Assignment, error::MatrixError, index::ChoiceIndex, matrix::BenefitMatrix,
};
use std::{
    marker::PhantomData,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

/// Solves `matrix` to optimality with the default configuration.
///
/// # Examples
///
/// ```rust
/// use pairing_model::matrix::BenefitMatrix;
///
/// let m = BenefitMatrix::from_rows(vec![vec![7i64]]).unwrap();
/// let (assignment, benefit, exact) = pairing_solver::solve(&m).into_parts();
/// assert_eq!((assignment.len(), benefit, exact), (1, 7, true));
/// ```
pub fn solve<T>(matrix: &BenefitMatrix<T>) -> SolveOutcome<T>
where
    T: BenefitNumeric,
{
    SolverBuilder::new().build().solve(matrix)
}

/// Validates `rows` as a benefit matrix and solves it.
///
/// Returns the configuration error if the rows are not square or contain a
/// negative benefit. No search is attempted in that case.
pub fn solve_rows<T, R>(rows: R) -> Result<SolveOutcome<T>, MatrixError>
where
    T: BenefitNumeric,
    R: IntoIterator,
    R::Item: AsRef<[T]>,
{
    let matrix = BenefitMatrix::from_rows(rows)?;
    Ok(solve(&matrix))
}

/// The bound estimator a `Solver` searches with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundKind {
    /// Per-choice suffix maxima.
    #[default]
    RemainingMax,
    /// The smaller of the per-choice and the per-level bound.
    DualMax,
}

impl std::fmt::Display for BoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundKind::RemainingMax => write!(f, "RemainingMax"),
            BoundKind::DualMax => write!(f, "DualMax"),
        }
    }
}

/// The incumbent a `Solver` installs before searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarmStart {
    /// Start without an incumbent.
    #[default]
    None,
    /// Start from the identity assignment, choice `i` on level `i`.
    Identity,
}

/// The result of `Solver::solve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome<T> {
    assignment: Assignment<T>,
    exact: bool,
    termination_reason: TerminationReason,
    statistics: SolverStatistics,
}

impl<T> SolveOutcome<T>
where
    T: BenefitNumeric,
{
    /// Returns the best assignment known when the search stopped.
    #[inline]
    pub fn assignment(&self) -> &Assignment<T> {
        &self.assignment
    }

    /// Returns the total benefit of `assignment()`.
    #[inline]
    pub fn benefit(&self) -> T {
        self.assignment.benefit()
    }

    /// Returns `true` iff the assignment is proven optimal.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Splits the outcome into `(assignment, benefit, exact)`.
    #[inline]
    pub fn into_parts(self) -> (Assignment<T>, T, bool) {
        let benefit = self.assignment.benefit();
        (self.assignment, benefit, self.exact)
    }
}

impl<T> std::fmt::Display for SolveOutcome<T>
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.exact { "optimal" } else { "best effort" };
        writeln!(f, "Benefit:     {} ({})", self.benefit(), kind)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)?;
        write!(f, "{}", self.assignment)
    }
}

/// A configured solver. Built by `SolverBuilder`; reusable across matrices.
#[derive(Debug, Clone)]
pub struct Solver<T> {
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    threads: usize,
    bound: BoundKind,
    warm_start: WarmStart,
    logging: bool,
    _phantom: PhantomData<T>,
}

impl<T> Solver<T>
where
    T: BenefitNumeric,
{
    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit.is_some()
    }

    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    #[inline]
    pub fn has_node_limit(&self) -> bool {
        self.node_limit.is_some()
    }

    /// Returns the configured number of threads. A solve never uses more
    /// threads than the matrix has choices.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    #[inline]
    pub fn bound(&self) -> BoundKind {
        self.bound
    }

    #[inline]
    pub fn warm_start(&self) -> WarmStart {
        self.warm_start
    }

    #[inline]
    pub fn has_logging(&self) -> bool {
        self.logging
    }

    /// Solves `matrix` within the configured budgets.
    pub fn solve(&self, matrix: &BenefitMatrix<T>) -> SolveOutcome<T> {
        let interrupt = AtomicBool::new(false);
        self.solve_with_interrupt(matrix, &interrupt)
    }

    /// Solves `matrix` and stops early once `interrupt` is set.
    ///
    /// The flag is only read, never reset, so one flag can cancel several
    /// solves.
    pub fn solve_with_interrupt(
        &self,
        matrix: &BenefitMatrix<T>,
        interrupt: &AtomicBool,
    ) -> SolveOutcome<T> {
        let start_time = Instant::now();
        let incumbent = SharedIncumbent::new();
        let budget_signal = AtomicBool::new(false);

        if self.warm_start == WarmStart::Identity {
            incumbent.try_install(&Assignment::identity(matrix));
        }

        let partitions = self.partition_first_level(matrix.dimension());
        let results = if partitions.len() <= 1 {
            let ctx = WorkerContext {
                matrix,
                first_choices: None,
                incumbent: &incumbent,
                interrupt,
                budget_signal: &budget_signal,
                logging: self.logging,
            };
            vec![self.run_worker(ctx)]
        } else {
            self.run_parallel(matrix, &partitions, &incumbent, interrupt, &budget_signal)
        };

        self.construct_outcome(matrix, start_time, &incumbent, results)
    }

    /// Deals the level-0 choices round-robin to the workers.
    fn partition_first_level(&self, n: usize) -> Vec<Vec<ChoiceIndex>> {
        let workers = self.threads.min(n);
        let mut partitions = vec![Vec::with_capacity(n.div_ceil(workers.max(1))); workers];
        for choice in ChoiceIndex::range(n) {
            partitions[choice.get() % workers].push(choice);
        }
        partitions
    }

    /// Spawns one scoped thread per partition and collects their outcomes.
    fn run_parallel(
        &self,
        matrix: &BenefitMatrix<T>,
        partitions: &[Vec<ChoiceIndex>],
        incumbent: &SharedIncumbent<T>,
        interrupt: &AtomicBool,
        budget_signal: &AtomicBool,
    ) -> Vec<BnbSolverOutcome<T>> {
        let mut results = Vec::with_capacity(partitions.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(partitions.len());

            for (worker, choices) in partitions.iter().enumerate() {
                let ctx = WorkerContext {
                    matrix,
                    first_choices: Some(choices.as_slice()),
                    incumbent,
                    interrupt,
                    budget_signal,
                    // Only the first worker reports progress.
                    logging: self.logging && worker == 0,
                };
                handles.push(scope.spawn(move || self.run_worker(ctx)));
            }

            for handle in handles {
                let outcome = handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
                results.push(outcome);
            }
        });

        results
    }

    /// Builds the monitor stack and runs one best-first search.
    fn run_worker(&self, ctx: WorkerContext<'_, T>) -> BnbSolverOutcome<T> {
        let mut monitor = CompositeTreeSearchMonitor::<T>::new();
        monitor.add_monitor(InterruptMonitor::new(ctx.interrupt));
        monitor.add_monitor(InterruptMonitor::new(ctx.budget_signal));

        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        if let Some(limit) = self.node_limit {
            monitor.add_monitor(NodeLimitMonitor::new(limit));
        }
        if ctx.logging {
            monitor.add_monitor(LogTreeSearchMonitor::default());
        }

        let outcome = match self.bound {
            BoundKind::RemainingMax => Self::search(&ctx, &RemainingMaxBound, monitor),
            BoundKind::DualMax => Self::search(&ctx, &DualMaxBound, monitor),
        };

        if !outcome.is_exact() {
            ctx.budget_signal.store(true, Ordering::Relaxed);
        }
        outcome
    }

    fn search<E>(
        ctx: &WorkerContext<'_, T>,
        estimator: &E,
        monitor: CompositeTreeSearchMonitor<'_, T>,
    ) -> BnbSolverOutcome<T>
    where
        E: BoundEstimator<T>,
    {
        let mut solver = BnbSolver::preallocated(ctx.matrix.dimension());
        match ctx.first_choices {
            Some(choices) => solver.solve_subtrees_with_incumbent(
                ctx.matrix,
                estimator,
                monitor,
                ctx.incumbent,
                choices,
            ),
            None => solver.solve_with_incumbent(ctx.matrix, estimator, monitor, ctx.incumbent),
        }
    }

    /// Finds the best assignment among all worker results and the shared
    /// incumbent. Among equals, the shared incumbent wins.
    fn find_best_assignment(
        results: &[BnbSolverOutcome<T>],
        incumbent: &SharedIncumbent<T>,
    ) -> Option<Assignment<T>> {
        let incumbent_snapshot = incumbent.snapshot();
        let mut best: Option<&Assignment<T>> = None;
        for candidate in incumbent_snapshot
            .iter()
            .chain(results.iter().filter_map(|r| r.assignment()))
        {
            if best.is_none_or(|b| candidate.benefit() > b.benefit()) {
                best = Some(candidate);
            }
        }
        best.cloned()
    }

    fn construct_outcome(
        &self,
        matrix: &BenefitMatrix<T>,
        start_time: Instant,
        incumbent: &SharedIncumbent<T>,
        results: Vec<BnbSolverOutcome<T>>,
    ) -> SolveOutcome<T> {
        let statistics = SolverStatistics::from_worker_outcomes(&results, start_time.elapsed());

        let exact = statistics.all_partitions_proven();
        let termination_reason = if exact {
            TerminationReason::OptimalityProven
        } else {
            TerminationReason::Aborted(Self::determine_abort_reason(&results))
        };

        let assignment = Self::find_best_assignment(&results, incumbent)
            .unwrap_or_else(|| Assignment::identity(matrix));

        SolveOutcome {
            assignment,
            exact,
            termination_reason,
            statistics,
        }
    }

    /// Prefers the budget that actually ran out over the interrupts it
    /// triggered in the other workers.
    fn determine_abort_reason(results: &[BnbSolverOutcome<T>]) -> String {
        let mut interrupted = false;
        for result in results {
            if let TerminationReason::Aborted(msg) = result.termination_reason() {
                if msg != INTERRUPT_REASON {
                    return msg.clone();
                }
                interrupted = true;
            }
        }

        if interrupted {
            INTERRUPT_REASON.to_string()
        } else {
            "search stopped without proof".to_string()
        }
    }
}

/// Everything one worker borrows from the solve that spawned it.
#[derive(Clone, Copy)]
struct WorkerContext<'a, T> {
    matrix: &'a BenefitMatrix<T>,
    first_choices: Option<&'a [ChoiceIndex]>,
    incumbent: &'a SharedIncumbent<T>,
    interrupt: &'a AtomicBool,
    budget_signal: &'a AtomicBool,
    logging: bool,
}

/// Builder for `Solver`.
#[derive(Debug, Clone)]
pub struct SolverBuilder<T> {
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    threads: usize,
    bound: BoundKind,
    warm_start: WarmStart,
    logging: bool,
    _phantom: PhantomData<T>,
}

impl<T> Default for SolverBuilder<T>
where
    T: BenefitNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SolverBuilder<T>
where
    T: BenefitNumeric,
{
    /// Single threaded, no budgets, `RemainingMax` bound, no warm start and
    /// no logging.
    #[inline]
    pub fn new() -> Self {
        Self {
            time_limit: None,
            node_limit: None,
            threads: 1,
            bound: BoundKind::default(),
            warm_start: WarmStart::default(),
            logging: false,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Limits the number of states each worker may create.
    #[inline]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Sets the number of worker threads. Zero is treated as one.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    #[inline]
    pub fn with_bound(mut self, bound: BoundKind) -> Self {
        self.bound = bound;
        self
    }

    #[inline]
    pub fn with_warm_start(mut self, warm_start: WarmStart) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Prints a progress table to stdout while solving.
    #[inline]
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    #[inline]
    pub fn build(self) -> Solver<T> {
        Solver {
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            threads: self.threads,
            bound: self.bound,
            warm_start: self.warm_start,
            logging: self.logging,
            _phantom: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairing_model::index::LevelIndex;
    use rand::{Rng, SeedableRng, rngs::StdRng};

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

    fn random_matrix(rng: &mut StdRng, n: usize) -> BenefitMatrix<IntegerType> {
        let values = (0..n * n).map(|_| rng.random_range(0..100)).collect();
        BenefitMatrix::from_flat(n, values).unwrap()
    }

    #[test]
    fn test_solve_tapas() {
        let (assignment, benefit, exact) = solve(&tapas()).into_parts();
        assert_eq!(benefit, 150);
        assert!(exact);
        assert!(assignment.is_bijection());
        assert_eq!(assignment.evaluate(&tapas()), 150);
    }

    #[test]
    fn test_solve_rows_rejects_invalid_input() {
        let err = solve_rows(vec![vec![1i64, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            }
        );

        let err = solve_rows(vec![vec![1i64, -2], vec![3, 4]]).unwrap_err();
        assert!(matches!(err, MatrixError::NegativeBenefit { .. }));
    }

    #[test]
    fn test_solve_rows_rejects_benefits_beyond_the_type() {
        // The best assignment is worth 160, which an i8 cannot hold.
        let err = solve_rows(vec![vec![100i8, 100], vec![60, 27]]).unwrap_err();
        assert!(matches!(err, MatrixError::BenefitOverflow { .. }));
    }

    #[test]
    fn test_small_benefit_type_solves_exactly_up_to_its_max() {
        // Column maxima sum to exactly i8::MAX.
        let (assignment, benefit, exact) = solve_rows(vec![vec![100i8, 27], vec![60, 0]])
            .unwrap()
            .into_parts();
        assert!(exact);
        assert_eq!(benefit, 100);
        assert_eq!(assignment.level_for_choice(ChoiceIndex::new(0)), LevelIndex::new(0));
    }

    #[test]
    fn test_solve_rows_edge_cases() {
        let outcome = solve_rows(Vec::<Vec<IntegerType>>::new()).unwrap();
        let (assignment, benefit, exact) = outcome.into_parts();
        assert!(assignment.is_empty());
        assert_eq!(benefit, 0);
        assert!(exact);

        let (assignment, benefit, exact) = solve_rows(vec![vec![9i64]]).unwrap().into_parts();
        assert_eq!(assignment.level_for_choice(ChoiceIndex::new(0)), LevelIndex::new(0));
        assert_eq!(benefit, 9);
        assert!(exact);
    }

    #[test]
    fn test_parallel_agrees_with_sequential() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in 2..=7 {
            for bound in [BoundKind::RemainingMax, BoundKind::DualMax] {
                let m = random_matrix(&mut rng, n);
                let sequential = SolverBuilder::new().with_bound(bound).build().solve(&m);
                let parallel = SolverBuilder::new()
                    .with_bound(bound)
                    .with_threads(3)
                    .build()
                    .solve(&m);

                assert!(sequential.is_exact());
                assert!(parallel.is_exact());
                assert_eq!(parallel.benefit(), sequential.benefit());
                assert!(parallel.assignment().is_bijection());
                assert_eq!(parallel.statistics().used_threads, 3.min(n));
                assert_eq!(parallel.statistics().proven_partitions, 3.min(n));
            }
        }
    }

    #[test]
    fn test_threads_are_capped_by_dimension() {
        let outcome = SolverBuilder::new().with_threads(8).build().solve(&tapas());
        assert_eq!(outcome.statistics().used_threads, 4);
        assert_eq!(outcome.benefit(), 150);
        assert!(outcome.is_exact());
    }

    #[test]
    fn test_node_limit_falls_back_to_identity() {
        let m = tapas();
        let outcome = SolverBuilder::new().with_node_limit(1).build().solve(&m);

        assert!(!outcome.is_exact());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("node limit reached".to_string())
        );
        assert_eq!(outcome.benefit(), m.diagonal_sum());
        assert!(outcome.assignment().is_bijection());
    }

    #[test]
    fn test_parallel_node_limit_reports_the_budget() {
        let outcome = SolverBuilder::new()
            .with_threads(2)
            .with_node_limit(1)
            .build()
            .solve(&tapas());

        assert!(!outcome.is_exact());
        assert_eq!(outcome.statistics().used_threads, 2);
        assert!(!outcome.statistics().all_partitions_proven());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("node limit reached".to_string())
        );
    }

    #[test]
    fn test_interrupt_before_start() {
        let m = tapas();
        let flag = AtomicBool::new(true);
        let solver = SolverBuilder::new()
            .with_warm_start(WarmStart::Identity)
            .build();
        let outcome = solver.solve_with_interrupt(&m, &flag);

        assert!(!outcome.is_exact());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted(INTERRUPT_REASON.to_string())
        );
        assert_eq!(outcome.benefit(), m.diagonal_sum());
        // The caller's flag is left alone.
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn test_warm_start_and_generous_time_limit() {
        let mut rng = StdRng::seed_from_u64(23);
        let m = random_matrix(&mut rng, 6);
        let cold = solve(&m);
        let warm = SolverBuilder::new()
            .with_warm_start(WarmStart::Identity)
            .with_time_limit(Duration::from_secs(3600))
            .build()
            .solve(&m);

        assert!(warm.is_exact());
        assert_eq!(warm.benefit(), cold.benefit());
        assert!(warm.statistics().nodes_explored <= cold.statistics().nodes_explored);
    }

    #[test]
    fn test_logging_does_not_change_the_result() {
        let outcome = SolverBuilder::new()
            .with_logging(true)
            .with_threads(2)
            .build()
            .solve(&tapas());
        assert!(outcome.is_exact());
        assert_eq!(outcome.benefit(), 150);
    }

    #[test]
    fn test_builder_configuration() {
        let solver = SolverBuilder::<IntegerType>::new()
            .with_time_limit(Duration::from_secs(5))
            .with_node_limit(1_000)
            .with_threads(0)
            .with_bound(BoundKind::DualMax)
            .with_warm_start(WarmStart::Identity)
            .with_logging(true)
            .build();

        assert_eq!(solver.time_limit(), Some(Duration::from_secs(5)));
        assert!(solver.has_time_limit());
        assert_eq!(solver.node_limit(), Some(1_000));
        assert!(solver.has_node_limit());
        assert_eq!(solver.threads(), 1);
        assert_eq!(solver.bound(), BoundKind::DualMax);
        assert_eq!(solver.warm_start(), WarmStart::Identity);
        assert!(solver.has_logging());

        let default = SolverBuilder::<IntegerType>::default().build();
        assert!(!default.has_time_limit());
        assert!(!default.has_node_limit());
        assert_eq!(default.bound(), BoundKind::RemainingMax);
        assert_eq!(default.warm_start(), WarmStart::None);
    }

    #[test]
    fn test_outcome_display() {
        let text = solve(&tapas()).to_string();
        assert!(text.starts_with("Benefit:     150 (optimal)\nTermination: Optimality Proven\n"));
        assert!(text.contains("Solver Statistics:"));
        assert!(text.contains("Assignment Summary"));
    }
}
