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

use pairing_core::num::{SaturatingAddVal, Zero};
use std::time::Duration;

/// Counters collected while a best-first search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Iterations of the main loop, one per popped state.
    pub steps: u64,
    /// States created, the root included.
    pub nodes_explored: u64,
    /// States whose children were generated.
    pub nodes_expanded: u64,
    /// Children generated across all expansions.
    pub children_generated: u64,
    /// Children discarded because their bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Times the best remaining bound failed to beat the incumbent, ending the run.
    pub early_terminations: u64,
    /// Improving complete assignments found.
    pub solutions_found: u64,
    /// The deepest level bound in any state.
    pub max_depth: u64,
    /// The largest number of live states at once.
    pub frontier_peak: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The bound at the root, an upper bound on the optimum.
    pub root_upper_bound: T,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            steps: 0,
            nodes_explored: 0,
            nodes_expanded: 0,
            children_generated: 0,
            prunings_bound: 0,
            early_terminations: 0,
            solutions_found: 0,
            max_depth: 0,
            frontier_peak: 0,
            time_total: Duration::ZERO,
            root_upper_bound: T::ZERO,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add_val(1);
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add_val(1);
    }

    #[inline]
    pub fn on_child_generated(&mut self) {
        self.children_generated = self.children_generated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(1);
    }

    #[inline]
    pub fn on_early_termination(&mut self) {
        self.early_terminations = self.early_terminations.saturating_add_val(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_frontier_size(&mut self, len: usize) {
        self.frontier_peak = self.frontier_peak.max(len as u64);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_upper_bound(&mut self, bound: T) {
        self.root_upper_bound = bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pairing-BnB Solver Statistics:")?;
        writeln!(f, "  Steps:                {}", self.steps)?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Nodes expanded:       {}", self.nodes_expanded)?;
        writeln!(f, "  Children generated:   {}", self.children_generated)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Early terminations:   {}", self.early_terminations)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Frontier peak:        {}", self.frontier_peak)?;
        writeln!(f, "  Root Upper Bound:     {}", self.root_upper_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let s = BnbSolverStatistics::<i64>::default();
        assert_eq!(s.steps, 0);
        assert_eq!(s.nodes_explored, 0);
        assert_eq!(s.root_upper_bound, 0);
        assert_eq!(s.time_total, Duration::ZERO);
    }

    #[test]
    fn test_counters_and_maxima() {
        let mut s = BnbSolverStatistics::<i64>::default();
        s.on_step();
        s.on_node_explored();
        s.on_node_explored();
        s.on_node_expanded();
        s.on_child_generated();
        s.on_pruning_bound();
        s.on_early_termination();
        s.on_solution_found();
        s.on_depth_update(3);
        s.on_depth_update(2);
        s.on_frontier_size(7);
        s.on_frontier_size(4);
        s.set_root_upper_bound(180);

        assert_eq!(s.steps, 1);
        assert_eq!(s.nodes_explored, 2);
        assert_eq!(s.nodes_expanded, 1);
        assert_eq!(s.children_generated, 1);
        assert_eq!(s.prunings_bound, 1);
        assert_eq!(s.early_terminations, 1);
        assert_eq!(s.solutions_found, 1);
        assert_eq!(s.max_depth, 3);
        assert_eq!(s.frontier_peak, 7);
        assert_eq!(s.root_upper_bound, 180);
    }

    #[test]
    fn test_counters_saturate() {
        let mut s = BnbSolverStatistics::<i64> {
            steps: u64::MAX,
            ..Default::default()
        };
        s.on_step();
        assert_eq!(s.steps, u64::MAX);
    }

    #[test]
    fn test_display_mentions_every_counter() {
        let text = BnbSolverStatistics::<i64>::default().to_string();
        for label in [
            "Steps",
            "Nodes explored",
            "Nodes expanded",
            "Children generated",
            "Prunings (bound)",
            "Early terminations",
            "Solutions found",
            "Max depth reached",
            "Frontier peak",
            "Root Upper Bound",
            "Total time",
        ] {
            assert!(text.contains(label), "missing {label}");
        }
    }
}
