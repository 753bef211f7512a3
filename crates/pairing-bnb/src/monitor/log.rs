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

use crate::{
    monitor::tree_search_monitor::TreeSearchMonitor, state::AssignmentState,
    stats::BnbSolverStatistics,
};
use pairing_core::num::BenefitNumeric;
use pairing_model::{assignment::Assignment, matrix::BenefitMatrix};
use std::time::{Duration, Instant};

const RULE_WIDTH: usize = 96;

/// Prints a progress table to stdout.
///
/// A row is printed at most once per `log_interval`, and the clock is only
/// read when `steps & clock_check_mask == 0`. Every improving solution gets
/// its own line.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_benefit: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: BenefitNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_benefit: None,
        }
    }

    /// Returns the best benefit reported so far.
    #[inline]
    pub fn best_benefit(&self) -> Option<T> {
        self.best_benefit
    }

    fn header() -> String {
        format!(
            "{:<9} | {:<12} | {:<12} | {:<10} | {:<7} | {:<13} | {:<13}",
            "Elapsed", "Steps", "Nodes", "Frontier", "Depth", "Best Benefit", "Best Bound"
        )
    }

    fn format_line(
        &self,
        elapsed: Duration,
        state: &AssignmentState<T>,
        frontier_len: usize,
        stats: &BnbSolverStatistics<T>,
    ) -> String {
        let best = match self.best_benefit {
            Some(b) => b.to_string(),
            None => "-".to_string(),
        };
        format!(
            "{:<9} | {:<12} | {:<12} | {:<10} | {:<7} | {:<13} | {:<13}",
            format!("{:.1}s", elapsed.as_secs_f32()),
            stats.steps,
            stats.nodes_explored,
            frontier_len,
            state.num_bound(),
            best,
            state.local_bound()
        )
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: BenefitNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0xFFF)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: BenefitNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, matrix: &BenefitMatrix<T>, statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_benefit = None;
        println!(
            "Searching {0}x{0} benefit matrix, search space {1} nodes, root bound {2}",
            matrix.dimension(),
            matrix.complexity(),
            statistics.root_upper_bound
        );
        println!("{}", Self::header());
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    fn on_step(
        &mut self,
        state: &AssignmentState<T>,
        frontier_len: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        if (statistics.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            let now = Instant::now();
            println!(
                "{}",
                self.format_line(
                    now.duration_since(self.start_time),
                    state,
                    frontier_len,
                    statistics
                )
            );
            self.last_log_time = now;
        }
    }

    fn on_solution_found(
        &mut self,
        assignment: &Assignment<T>,
        statistics: &BnbSolverStatistics<T>,
    ) {
        self.best_benefit = Some(assignment.benefit());
        println!(
            "{:<9} | new incumbent with benefit {} after {} nodes",
            format!("{:.1}s", self.start_time.elapsed().as_secs_f32()),
            assignment.benefit(),
            statistics.nodes_explored
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        println!("{}", "-".repeat(RULE_WIDTH));
        match self.best_benefit {
            Some(b) => println!(
                "Search finished after {} nodes, best benefit {}.",
                statistics.nodes_explored, b
            ),
            None => println!(
                "Search finished after {} nodes without a new incumbent.",
                statistics.nodes_explored
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::remaining_max::RemainingMaxBound;
    use pairing_model::index::LevelIndex;

    type IntegerType = i64;

    #[test]
    fn test_line_layout_matches_header() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let s = AssignmentState::root(&m, &RemainingMaxBound);
        let monitor = LogTreeSearchMonitor::<IntegerType>::default();
        let stats = BnbSolverStatistics::default();

        let header = LogTreeSearchMonitor::<IntegerType>::header();
        let line = monitor.format_line(Duration::from_millis(1500), &s, 3, &stats);
        assert_eq!(header.len(), line.len());
        assert!(line.starts_with("1.5s"));
        assert!(line.contains("| -  "));
    }

    #[test]
    fn test_tracks_best_benefit() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![5]]).unwrap();
        let stats = BnbSolverStatistics::default();
        let mut monitor = LogTreeSearchMonitor::<IntegerType>::new(Duration::from_secs(60), 0);
        monitor.on_enter_search(&m, &stats);
        assert_eq!(monitor.best_benefit(), None);

        let a = Assignment::new(5, vec![LevelIndex::new(0)], vec![5]);
        monitor.on_solution_found(&a, &stats);
        assert_eq!(monitor.best_benefit(), Some(5));
        monitor.on_exit_search(&stats);
    }
}
