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

//! Statistics of a whole solve.
//!
//! Every worker of a solve runs its own best-first search and reports a
//! `BnbSolverStatistics`. `SolverStatistics` folds those into one view:
//! counters are summed, the depth is the deepest any worker went, and
//! `proven_partitions` says how many workers finished their subtrees with a
//! proof. The answer is exact iff that equals `used_threads`.

use pairing_bnb::result::BnbSolverOutcome;
use std::time::Duration;

/// Search counters summed over every worker of a solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of workers, one per partition of the level-0 choices.
    pub used_threads: usize,
    /// Workers that searched their partition to a proof.
    pub proven_partitions: usize,
    /// States created, roots included.
    pub nodes_explored: u64,
    /// States whose children were generated.
    pub nodes_expanded: u64,
    /// Children discarded against the shared incumbent.
    pub prunings_bound: u64,
    /// Workers that stopped because no live bound beat the incumbent.
    pub early_terminations: u64,
    /// Improving complete assignments, counted where they were found.
    pub solutions_found: u64,
    /// The deepest level any worker bound.
    pub max_depth: u64,
    /// Sum of the per-worker frontier peaks.
    pub frontier_peak: u64,
    /// Wall-clock time of the whole solve.
    pub solve_duration: Duration,
}

impl SolverStatistics {
    /// Folds the statistics of the worker outcomes of one solve.
    pub fn from_worker_outcomes<T>(outcomes: &[BnbSolverOutcome<T>], solve_duration: Duration) -> Self {
        let mut stats = Self {
            used_threads: outcomes.len(),
            solve_duration,
            ..Self::default()
        };

        for outcome in outcomes {
            let worker = outcome.statistics();
            if outcome.is_exact() {
                stats.proven_partitions += 1;
            }
            stats.nodes_explored = stats.nodes_explored.saturating_add(worker.nodes_explored);
            stats.nodes_expanded = stats.nodes_expanded.saturating_add(worker.nodes_expanded);
            stats.prunings_bound = stats.prunings_bound.saturating_add(worker.prunings_bound);
            stats.early_terminations = stats
                .early_terminations
                .saturating_add(worker.early_terminations);
            stats.solutions_found = stats.solutions_found.saturating_add(worker.solutions_found);
            stats.frontier_peak = stats.frontier_peak.saturating_add(worker.frontier_peak);
            stats.max_depth = stats.max_depth.max(worker.max_depth);
        }

        stats
    }

    /// Returns `true` if every worker proved its partition.
    #[inline]
    pub fn all_partitions_proven(&self) -> bool {
        self.proven_partitions == self.used_threads
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(
            f,
            "  {:<20} {} ({} proven)",
            "Threads:", self.used_threads, self.proven_partitions
        )?;
        writeln!(f, "  {:<20} {}", "Nodes explored:", self.nodes_explored)?;
        writeln!(f, "  {:<20} {}", "Nodes expanded:", self.nodes_expanded)?;
        writeln!(f, "  {:<20} {}", "Prunings (bound):", self.prunings_bound)?;
        writeln!(f, "  {:<20} {}", "Early terminations:", self.early_terminations)?;
        writeln!(f, "  {:<20} {}", "Solutions found:", self.solutions_found)?;
        writeln!(f, "  {:<20} {}", "Max depth:", self.max_depth)?;
        writeln!(f, "  {:<20} {}", "Frontier peak:", self.frontier_peak)?;
        writeln!(
            f,
            "  {:<20} {:.3}s",
            "Solve duration:",
            self.solve_duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairing_bnb::stats::BnbSolverStatistics;
    use pairing_model::{assignment::Assignment, index::LevelIndex};

    type IntegerType = i64;

    fn worker(
        nodes_explored: u64,
        max_depth: u64,
        solutions_found: u64,
        early_terminations: u64,
    ) -> BnbSolverStatistics<IntegerType> {
        BnbSolverStatistics {
            nodes_explored,
            nodes_expanded: nodes_explored / 2,
            prunings_bound: 1,
            early_terminations,
            solutions_found,
            max_depth,
            frontier_peak: 4,
            ..Default::default()
        }
    }

    fn one_choice(benefit: IntegerType) -> Assignment<IntegerType> {
        Assignment::new(benefit, vec![LevelIndex::new(0)], vec![benefit])
    }

    #[test]
    fn test_folds_worker_counters() {
        let outcomes = vec![
            BnbSolverOutcome::optimal(one_choice(7), worker(10, 3, 2, 1)),
            BnbSolverOutcome::aborted(Some(one_choice(5)), "node limit", worker(6, 5, 1, 0)),
            BnbSolverOutcome::exhausted(worker(1, 0, 0, 0)),
        ];
        let stats = SolverStatistics::from_worker_outcomes(&outcomes, Duration::from_millis(40));

        assert_eq!(stats.used_threads, 3);
        assert_eq!(stats.proven_partitions, 2);
        assert!(!stats.all_partitions_proven());
        assert_eq!(stats.nodes_explored, 17);
        assert_eq!(stats.nodes_expanded, 5 + 3);
        assert_eq!(stats.prunings_bound, 3);
        assert_eq!(stats.early_terminations, 1);
        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.max_depth, 5);
        assert_eq!(stats.frontier_peak, 12);
        assert_eq!(stats.solve_duration, Duration::from_millis(40));
    }

    #[test]
    fn test_single_proven_worker_is_all_proven() {
        let outcomes = vec![BnbSolverOutcome::optimal(one_choice(1), worker(2, 1, 1, 0))];
        let stats = SolverStatistics::from_worker_outcomes(&outcomes, Duration::ZERO);
        assert_eq!(stats.used_threads, 1);
        assert!(stats.all_partitions_proven());
    }

    #[test]
    fn test_display_reports_proven_workers() {
        let outcomes = vec![
            BnbSolverOutcome::optimal(one_choice(7), worker(10, 3, 2, 1)),
            BnbSolverOutcome::aborted(None, "time limit", worker(6, 5, 0, 0)),
        ];
        let text = SolverStatistics::from_worker_outcomes(&outcomes, Duration::from_millis(1234))
            .to_string();

        assert!(text.starts_with("Solver Statistics:\n"));
        assert!(text.contains("2 (1 proven)"));
        assert!(text.contains("Nodes explored:      16"));
        assert!(text.contains("Max depth:           5"));
        assert!(text.contains("1.234s"));
    }
}
