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

//! Best-first Branch-and-Bound for the maximum-benefit assignment problem.
//!
//! This module implements the search engine that turns a `BenefitMatrix` into
//! a benefit-maximising bijection of choices onto levels. Levels are filled in
//! order; every state in the tree binds one more choice to the next level and
//! carries an admissible upper bound computed by a `BoundEstimator`. Live
//! states wait in a `Frontier` ordered by that bound, and the state with the
//! greatest bound is always expanded next.
//!
//! The `BnbSolver` owns the frontier and keeps its allocation across solves;
//! a search session object holds the per-run state (incumbent, statistics and
//! timing) and is dropped at the end of each run. The incumbent lives behind
//! an `IncumbentStore`, either local to the run or shared with other runs
//! through a `SharedIncumbent`, which is how warm starts and parallel workers
//! pass pruning thresholds to each other.
//!
//! Termination follows the best-first argument: once the best live bound no
//! longer exceeds the incumbent, no live state can improve on it, and the
//! incumbent is optimal. The root is exempt from that check and always
//! expanded, so a search never ends before it has looked at the first level.

use crate::{
    bound::{self, estimator::BoundEstimator},
    frontier::Frontier,
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    result::{BnbSolverOutcome, TerminationReason},
    state::AssignmentState,
    stats::BnbSolverStatistics,
};
use pairing_core::num::BenefitNumeric;
use pairing_model::{assignment::Assignment, index::ChoiceIndex, matrix::BenefitMatrix};

/// Trees up to this size are checked for bound admissibility in debug builds.
const DEBUG_ADMISSIBILITY_MAX_NODES: u64 = 10_000;

/// A best-first branch-and-bound solver for the assignment problem.
///
/// This is only the execution engine: how tight the bounds are is up to the
/// `BoundEstimator`, and when to stop early is up to the `TreeSearchMonitor`.
#[derive(Clone, Debug)]
pub struct BnbSolver<T>
where
    T: BenefitNumeric,
{
    frontier: Frontier<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: BenefitNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: BenefitNumeric,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            frontier: Frontier::new(),
        }
    }

    /// Creates a new solver with a frontier sized for an `n`-dimensional
    /// matrix.
    ///
    /// # Note
    ///
    /// This only moves the first allocations to construction time. The
    /// frontier still grows on demand during a search.
    #[inline]
    pub fn preallocated(n: usize) -> Self {
        Self {
            frontier: Frontier::preallocated(n),
        }
    }

    /// Solves `matrix` with the given estimator and monitor.
    ///
    /// This variant keeps its incumbent to itself and acts as a standalone,
    /// single threaded solver.
    #[inline]
    pub fn solve<E, S>(
        &mut self,
        matrix: &BenefitMatrix<T>,
        estimator: &E,
        monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        E: BoundEstimator<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let backing = NoSharedIncumbent::new();
        self.solve_internal(matrix, None, estimator, monitor, backing)
    }

    /// Solves `matrix` against a shared incumbent.
    ///
    /// The search starts from the incumbent's benefit as its pruning threshold
    /// and publishes every improvement. An incumbent installed before the call
    /// acts as a warm start; if nothing beats it, it is returned as optimal.
    #[inline]
    pub fn solve_with_incumbent<E, S>(
        &mut self,
        matrix: &BenefitMatrix<T>,
        estimator: &E,
        monitor: S,
        incumbent: &SharedIncumbent<T>,
    ) -> BnbSolverOutcome<T>
    where
        E: BoundEstimator<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(matrix, None, estimator, monitor, backing)
    }

    /// Solves only the subtrees whose first level is bound to one of
    /// `first_choices`, against a shared incumbent.
    ///
    /// Partitioning the level-0 choices across several calls and sharing one
    /// incumbent covers the whole tree. A proof returned by this method only
    /// covers the given subtrees; the reported assignment may come from
    /// another partition through the shared incumbent.
    ///
    /// # Panics
    ///
    /// Panics if a choice in `first_choices` is out of range.
    pub fn solve_subtrees_with_incumbent<E, S>(
        &mut self,
        matrix: &BenefitMatrix<T>,
        estimator: &E,
        monitor: S,
        incumbent: &SharedIncumbent<T>,
        first_choices: &[ChoiceIndex],
    ) -> BnbSolverOutcome<T>
    where
        E: BoundEstimator<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let n = matrix.dimension();
        for choice in first_choices {
            assert!(
                choice.get() < n,
                "called `BnbSolver::solve_subtrees_with_incumbent` with choice index out of bounds: the len is {} but the index is {}",
                n,
                choice.get()
            );
        }

        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(matrix, Some(first_choices), estimator, monitor, backing)
    }

    /// Internal solve method that takes an `IncumbentStore`,
    /// which is usually either a `NoSharedIncumbent` or a `SharedIncumbentAdapter`.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if the estimator is not
    /// admissible on a small enough `matrix`.
    #[inline(always)]
    fn solve_internal<E, S, I>(
        &mut self,
        matrix: &BenefitMatrix<T>,
        first_choices: Option<&[ChoiceIndex]>,
        estimator: &E,
        mut monitor: S,
        backing: I,
    ) -> BnbSolverOutcome<T>
    where
        E: BoundEstimator<T> + ?Sized,
        S: TreeSearchMonitor<T>,
        I: IncumbentStore<T>,
    {
        debug_assert!(
            bound::validation::is_admissible_estimator_exhaustive(
                estimator,
                matrix,
                DEBUG_ADMISSIBILITY_MAX_NODES
            ),
            "BoundEstimator '{}' is not admissible. A bound underestimates a completion.",
            estimator.name()
        );

        let session = BnbSolverSearchSession::new(
            self,
            matrix,
            first_choices,
            estimator,
            &mut monitor,
            backing,
        );
        let res = session.run();
        self.reset();
        res
    }

    /// Clears the frontier while keeping its capacity.
    #[inline]
    fn reset(&mut self) {
        self.frontier.clear();
    }
}

/// A search session for the best-first solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, T, E, S, I>
where
    T: BenefitNumeric,
    E: ?Sized,
    I: IncumbentStore<T>,
{
    solver: &'a mut BnbSolver<T>,
    matrix: &'a BenefitMatrix<T>,
    first_choices: Option<&'a [ChoiceIndex]>,
    estimator: &'a E,
    monitor: &'a mut S,
    incumbent: I,
    best_benefit: T,
    best_assignment: Option<Assignment<T>>,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<T, E, S, I> std::fmt::Debug for BnbSolverSearchSession<'_, T, E, S, I>
where
    T: BenefitNumeric,
    E: BoundEstimator<T> + ?Sized,
    S: TreeSearchMonitor<T>,
    I: IncumbentStore<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("matrix", &self.matrix)
            .field("estimator", &self.estimator.name())
            .field("frontier_len", &self.solver.frontier.len())
            .field("best_benefit", &self.best_benefit)
            .field("best_assignment", &self.best_assignment)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, E, S, I> BnbSolverSearchSession<'a, T, E, S, I>
where
    T: BenefitNumeric,
    E: BoundEstimator<T> + ?Sized,
    S: TreeSearchMonitor<T>,
    I: IncumbentStore<T>,
{
    /// Create a new search session.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        matrix: &'a BenefitMatrix<T>,
        first_choices: Option<&'a [ChoiceIndex]>,
        estimator: &'a E,
        monitor: &'a mut S,
        incumbent_backing: I,
    ) -> Self {
        let best_benefit = incumbent_backing.initial_lower_bound();

        Self {
            solver,
            matrix,
            first_choices,
            estimator,
            monitor,
            incumbent: incumbent_backing,
            best_benefit,
            best_assignment: None,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    #[inline]
    fn run(mut self) -> BnbSolverOutcome<T> {
        let root = self.initialize();
        self.monitor.on_enter_search(self.matrix, &self.stats);

        // With `N == 0` the root already is the empty assignment.
        if root.is_complete() {
            self.handle_complete_solution(&root);
        } else {
            self.solver.frontier.push(root);
            self.stats.on_frontier_size(self.solver.frontier.len());
        }

        let termination_reason = loop {
            self.best_benefit = self.incumbent.tighten(self.best_benefit);

            let Some(state) = self.solver.frontier.pop_max() else {
                break TerminationReason::OptimalityProven;
            };
            self.stats.on_step();

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&state, &self.stats)
            {
                break TerminationReason::Aborted(msg);
            }
            self.monitor
                .on_step(&state, self.solver.frontier.len(), &self.stats);

            // The popped bound is the best among all live states.
            if !state.is_root() && state.local_bound() <= self.best_benefit {
                self.stats.on_early_termination();
                self.monitor
                    .on_prune(&state, PruneReason::EarlyTermination, &self.stats);
                break TerminationReason::OptimalityProven;
            }

            self.expand(&state);
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    /// Creates the root state and records it in the statistics.
    #[inline]
    fn initialize(&mut self) -> AssignmentState<T> {
        let root = AssignmentState::root(self.matrix, self.estimator);
        self.stats.on_node_explored();
        self.stats.set_root_upper_bound(root.local_bound());
        root
    }

    /// Generates every child of `state`, keeping those that can still beat
    /// the incumbent.
    #[inline]
    fn expand(&mut self, state: &AssignmentState<T>) {
        self.stats.on_node_expanded();
        self.monitor.on_expand(state, &self.stats);

        if state.is_root()
            && let Some(first_choices) = self.first_choices
        {
            for &choice in first_choices {
                self.branch(state, choice);
            }
        } else {
            for choice in state.unbound_choices() {
                self.branch(state, choice);
            }
        }

        self.stats.on_frontier_size(self.solver.frontier.len());
    }

    /// Binds `choice` to the next level of `state` and routes the child to
    /// the incumbent, the frontier, or nowhere.
    #[inline(always)]
    fn branch(&mut self, state: &AssignmentState<T>, choice: ChoiceIndex) {
        let child = state.bind(self.matrix, self.estimator, choice);
        self.stats.on_node_explored();
        self.stats.on_child_generated();
        self.stats.on_depth_update(child.num_bound() as u64);

        if child.is_complete() {
            self.handle_complete_solution(&child);
            return;
        }

        if child.local_bound() > self.best_benefit {
            self.monitor.on_enqueue(&child, &self.stats);
            self.solver.frontier.push(child);
        } else {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&child, PruneReason::BoundDominated, &self.stats);
        }
    }

    /// Installs a complete state as the incumbent if it is strictly better.
    #[inline(always)]
    fn handle_complete_solution(&mut self, state: &AssignmentState<T>) {
        let benefit = state.accumulated_benefit();
        if benefit > self.best_benefit {
            let assignment = state.to_assignment(self.matrix);
            self.best_benefit = benefit;
            self.incumbent.on_solution_found(&assignment);
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&assignment, &self.stats);
            self.best_assignment = Some(assignment);
        } else {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(state, PruneReason::BoundDominated, &self.stats);
        }
    }

    /// Returns the better of the local incumbent and the one in the store.
    #[inline]
    fn best_known_assignment(&mut self) -> Option<Assignment<T>> {
        let local = self.best_assignment.take();
        let stored = self.incumbent.best_assignment();
        match (local, stored) {
            (Some(l), Some(s)) if s.benefit() > l.benefit() => Some(s),
            (Some(l), _) => Some(l),
            (None, s) => s,
        }
    }

    /// Finalize the solver result based on the best assignment known
    /// and the termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize_result(mut self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        let assignment = self.best_known_assignment();
        self.stats.on_frontier_size(self.solver.frontier.peak_len());
        match reason {
            TerminationReason::OptimalityProven => match assignment {
                Some(a) => BnbSolverOutcome::optimal(a, self.stats),
                None => BnbSolverOutcome::exhausted(self.stats),
            },
            TerminationReason::Aborted(msg) => BnbSolverOutcome::aborted(assignment, msg, self.stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::{dual_max::DualMaxBound, remaining_max::RemainingMaxBound};
    use crate::monitor::{
        composite::CompositeTreeSearchMonitor, interrupt::InterruptMonitor,
        no_op::NoOperationMonitor, node_limit::NodeLimitMonitor,
    };
    use crate::result::SolverResult;
    use pairing_model::index::LevelIndex;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use rustc_hash::FxHashSet;
    use std::sync::atomic::AtomicBool;

    type IntegerType = i64;

    fn ci(i: usize) -> ChoiceIndex {
        ChoiceIndex::new(i)
    }

    fn tapas() -> BenefitMatrix<IntegerType> {
        BenefitMatrix::from_rows(vec![
            vec![25, 40, 30, 10],
            vec![40, 35, 5, 50],
            vec![15, 5, 50, 40],
            vec![10, 35, 40, 30],
        ])
        .unwrap()
    }

    fn random_matrix(rng: &mut StdRng, n: usize, max: IntegerType) -> BenefitMatrix<IntegerType> {
        let values = (0..n * n).map(|_| rng.random_range(0..=max)).collect();
        BenefitMatrix::from_flat(n, values).unwrap()
    }

    /// Maximum over all permutations, by exhaustive enumeration.
    fn brute_force(matrix: &BenefitMatrix<IntegerType>) -> IntegerType {
        fn best_from(
            level: usize,
            used: &mut [bool],
            matrix: &BenefitMatrix<IntegerType>,
        ) -> IntegerType {
            if level == used.len() {
                return 0;
            }
            let mut best = 0;
            for choice in 0..used.len() {
                if used[choice] {
                    continue;
                }
                used[choice] = true;
                let value = matrix.benefit(LevelIndex::new(level), ci(choice))
                    + best_from(level + 1, used, matrix);
                used[choice] = false;
                best = best.max(value);
            }
            best
        }

        let mut used = vec![false; matrix.dimension()];
        best_from(0, &mut used, matrix)
    }

    /// Diagonal of 100 over single-digit noise: best-first dives straight
    /// down the diagonal.
    fn diagonal_dominant(n: usize) -> BenefitMatrix<IntegerType> {
        let rows = (0..n)
            .map(|l| {
                (0..n)
                    .map(|c| if l == c { 100 } else { ((l * 3 + c) % 10) as IntegerType })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        BenefitMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_tapas_optimum_is_150() {
        let m = tapas();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());

        assert!(outcome.is_exact());
        let a = outcome.assignment().expect("expected an assignment");
        assert_eq!(a.benefit(), 150);
        assert!(a.is_bijection());
        assert_eq!(a.evaluate(&m), 150);

        let stats = outcome.statistics();
        assert_eq!(stats.root_upper_bound, 180);
        assert!(stats.nodes_explored >= 1 + 4);
        assert!(stats.solutions_found >= 1);
        assert!(stats.max_depth <= 4);
    }

    #[test]
    fn test_tapas_with_dual_bound() {
        let m = tapas();
        let mut solver = BnbSolver::preallocated(4);
        let single = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());
        let dual = solver.solve(&m, &DualMaxBound, NoOperationMonitor::new());

        assert_eq!(dual.assignment().map(|a| a.benefit()), Some(150));
        assert!(dual.is_exact());
        assert!(dual.statistics().root_upper_bound <= single.statistics().root_upper_bound);
    }

    #[test]
    fn test_empty_matrix_is_exact_and_empty() {
        let m = BenefitMatrix::<IntegerType>::from_rows(Vec::<Vec<IntegerType>>::new()).unwrap();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());

        assert!(outcome.is_exact());
        let a = outcome.assignment().expect("expected the empty assignment");
        assert!(a.is_empty());
        assert_eq!(a.benefit(), 0);
        assert_eq!(outcome.statistics().steps, 0);
    }

    #[test]
    fn test_single_entry_matrix() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![7]]).unwrap();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());

        assert!(outcome.is_exact());
        let a = outcome.assignment().unwrap();
        assert_eq!(a.benefit(), 7);
        assert_eq!(a.level_for_choice(ci(0)), LevelIndex::new(0));
    }

    #[test]
    fn test_zero_matrix_still_yields_a_bijection() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![0; 5]; 5]).unwrap();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&m, &DualMaxBound, NoOperationMonitor::new());

        assert!(outcome.is_exact());
        let a = outcome.assignment().unwrap();
        assert_eq!(a.benefit(), 0);
        assert!(a.is_bijection());
    }

    #[test]
    fn test_matches_brute_force_on_random_matrices() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut solver = BnbSolver::new();
        for n in 1..=6 {
            for _ in 0..25 {
                let m = random_matrix(&mut rng, n, 60);
                let expected = brute_force(&m);

                for estimator in [
                    &RemainingMaxBound as &dyn BoundEstimator<IntegerType>,
                    &DualMaxBound,
                ] {
                    let outcome = solver.solve(&m, estimator, NoOperationMonitor::new());
                    assert!(outcome.is_exact());
                    let a = outcome.assignment().unwrap();
                    assert_eq!(a.benefit(), expected, "estimator {} on\n{}", estimator, m);
                    assert!(a.is_bijection());
                    assert_eq!(a.evaluate(&m), expected);
                }
            }
        }
    }

    #[test]
    fn test_ties_are_resolved_deterministically() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut solver = BnbSolver::new();
        for _ in 0..10 {
            // Few distinct values make ties likely.
            let m = random_matrix(&mut rng, 6, 3);
            let first = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());
            let second = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());

            assert_eq!(first.assignment(), second.assignment());
            assert_eq!(first.statistics().nodes_explored, second.statistics().nodes_explored);
            assert_eq!(first.statistics().steps, second.statistics().steps);
        }
    }

    #[test]
    fn test_distinct_optima_across_seeds() {
        // The optimum is reached through different pairings on different
        // inputs; make sure the solver does not collapse onto a fixed one.
        let mut rng = StdRng::seed_from_u64(99);
        let mut solver = BnbSolver::new();
        let mut seen = FxHashSet::default();
        for _ in 0..20 {
            let m = random_matrix(&mut rng, 4, 100);
            let outcome = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());
            seen.insert(outcome.assignment().unwrap().levels().to_vec());
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_node_limit_aborts_with_best_effort_result() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = random_matrix(&mut rng, 8, 1_000);
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&m, &RemainingMaxBound, NodeLimitMonitor::new(1));

        assert!(!outcome.is_exact());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("node limit reached".to_string())
        );
        // Only the root exists when the limit is checked, so nothing is complete.
        assert_eq!(outcome.result(), &SolverResult::Unknown);
    }

    #[test]
    fn test_budget_keeps_incumbent_found_so_far() {
        let m = diagonal_dominant(7);
        let mut solver = BnbSolver::new();

        // The dive creates 1 + 7 + 6 + ... + 1 = 29 nodes, the last one the
        // diagonal leaf. The limit is hit on the very next pop.
        let outcome = solver.solve(&m, &RemainingMaxBound, NodeLimitMonitor::new(29));
        assert!(!outcome.is_exact());
        match outcome.result() {
            SolverResult::Feasible(a) => {
                assert_eq!(a.benefit(), 700);
                assert!(a.is_bijection());
            }
            other => panic!("expected a feasible assignment, got {}", other),
        }

        // One more node and the search proves the diagonal optimal instead.
        let outcome = solver.solve(&m, &RemainingMaxBound, NodeLimitMonitor::new(30));
        assert!(outcome.is_exact());
        assert_eq!(outcome.assignment().map(|a| a.benefit()), Some(700));
        assert_eq!(outcome.statistics().early_terminations, 1);
        assert_eq!(outcome.statistics().nodes_expanded, 7);
    }

    #[test]
    fn test_interrupt_stops_immediately() {
        let m = tapas();
        let flag = AtomicBool::new(true);
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&m, &RemainingMaxBound, InterruptMonitor::new(&flag));
        assert!(!outcome.is_exact());
        assert_eq!(outcome.statistics().steps, 1);
    }

    #[test]
    fn test_composite_monitor_is_driven() {
        let m = tapas();
        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(NodeLimitMonitor::new(u64::MAX));
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&m, &RemainingMaxBound, composite);
        assert!(outcome.is_exact());
        assert_eq!(outcome.assignment().unwrap().benefit(), 150);
    }

    #[test]
    fn test_unbeaten_warm_start_is_reported_optimal() {
        let m = tapas();
        let incumbent = SharedIncumbent::new();
        let warm = Assignment::from_levels(
            &m,
            vec![
                LevelIndex::new(3),
                LevelIndex::new(0),
                LevelIndex::new(2),
                LevelIndex::new(1),
            ],
        );
        assert_eq!(warm.benefit(), 150);
        assert!(incumbent.try_install(&warm));

        let mut solver = BnbSolver::new();
        let outcome =
            solver.solve_with_incumbent(&m, &RemainingMaxBound, NoOperationMonitor::new(), &incumbent);

        assert!(outcome.is_exact());
        assert_eq!(outcome.assignment(), Some(&warm));
        assert_eq!(outcome.statistics().solutions_found, 0);
    }

    #[test]
    fn test_warm_start_sharing_a_level_is_not_reported() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![9, 9], vec![1, 1]]).unwrap();
        let incumbent = SharedIncumbent::new();
        let shared_level = Assignment::new(18, vec![LevelIndex::new(0); 2], vec![9, 9]);
        assert!(!incumbent.try_install(&shared_level));

        let mut solver = BnbSolver::new();
        let outcome =
            solver.solve_with_incumbent(&m, &RemainingMaxBound, NoOperationMonitor::new(), &incumbent);

        assert!(outcome.is_exact());
        let best = outcome.assignment().unwrap();
        assert!(best.is_bijection());
        assert_eq!(best.benefit(), 10);
    }

    #[test]
    fn test_root_is_expanded_even_when_bound_matches_incumbent() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![5, 0], vec![0, 5]]).unwrap();
        let incumbent = SharedIncumbent::new();
        incumbent.try_install(&Assignment::identity(&m));

        let mut solver = BnbSolver::new();
        let outcome =
            solver.solve_with_incumbent(&m, &RemainingMaxBound, NoOperationMonitor::new(), &incumbent);

        assert!(outcome.is_exact());
        assert_eq!(outcome.assignment().map(|a| a.benefit()), Some(10));
        let stats = outcome.statistics();
        assert_eq!(stats.root_upper_bound, 10);
        assert_eq!(stats.nodes_expanded, 1);
        assert_eq!(stats.children_generated, 2);
        assert_eq!(stats.prunings_bound, 2);
        assert_eq!(stats.early_terminations, 0);
    }

    #[test]
    fn test_warm_start_with_identity_prunes_more() {
        let mut rng = StdRng::seed_from_u64(5);
        let m = random_matrix(&mut rng, 6, 50);

        let mut solver = BnbSolver::new();
        let cold = solver.solve(&m, &RemainingMaxBound, NoOperationMonitor::new());

        let incumbent = SharedIncumbent::new();
        incumbent.try_install(&Assignment::identity(&m));
        let warm =
            solver.solve_with_incumbent(&m, &RemainingMaxBound, NoOperationMonitor::new(), &incumbent);

        assert!(warm.is_exact());
        assert_eq!(
            warm.assignment().map(|a| a.benefit()),
            cold.assignment().map(|a| a.benefit())
        );
        assert!(warm.statistics().nodes_explored <= cold.statistics().nodes_explored);
        assert_eq!(incumbent.best_benefit(), brute_force(&m));
    }

    #[test]
    fn test_subtree_partitions_cover_the_tree() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut solver = BnbSolver::new();
        for _ in 0..10 {
            let m = random_matrix(&mut rng, 5, 80);
            let incumbent = SharedIncumbent::new();

            for part in [[ci(0), ci(2), ci(4)].as_slice(), [ci(1), ci(3)].as_slice()] {
                let outcome = solver.solve_subtrees_with_incumbent(
                    &m,
                    &DualMaxBound,
                    NoOperationMonitor::new(),
                    &incumbent,
                    part,
                );
                assert!(outcome.is_exact());
            }

            let best = incumbent.snapshot().unwrap();
            assert_eq!(best.benefit(), brute_force(&m));
            assert!(best.is_bijection());
        }
    }

    #[test]
    fn test_subtree_restricts_first_level() {
        let m = tapas();
        let incumbent = SharedIncumbent::new();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve_subtrees_with_incumbent(
            &m,
            &RemainingMaxBound,
            NoOperationMonitor::new(),
            &incumbent,
            &[ci(0)],
        );

        let a = outcome.assignment().unwrap();
        assert_eq!(a.choice_for_level(LevelIndex::new(0)), Some(ci(0)));
        // 25 + 50 + 50 + 35 over the remaining levels.
        assert_eq!(a.benefit(), 25 + 50 + 50 + 35);
    }

    #[test]
    fn test_empty_partition_is_exhausted() {
        let m = tapas();
        let incumbent = SharedIncumbent::new();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve_subtrees_with_incumbent(
            &m,
            &RemainingMaxBound,
            NoOperationMonitor::new(),
            &incumbent,
            &[],
        );
        assert!(outcome.is_exact());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
    }

    #[test]
    #[should_panic(expected = "choice index out of bounds")]
    fn test_subtree_choice_out_of_range_panics() {
        let m = tapas();
        let incumbent = SharedIncumbent::new();
        let mut solver = BnbSolver::new();
        solver.solve_subtrees_with_incumbent(
            &m,
            &RemainingMaxBound,
            NoOperationMonitor::new(),
            &incumbent,
            &[ci(4)],
        );
    }
}
