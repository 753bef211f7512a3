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

use crate::{state::AssignmentState, stats::BnbSolverStatistics};
use pairing_core::num::BenefitNumeric;
use pairing_model::{assignment::Assignment, matrix::BenefitMatrix};

/// What the search loop should do next.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SearchCommand {
    /// Keep searching.
    Continue,
    /// Stop and report the incumbent. The string names the reason.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate({})", reason),
        }
    }
}

/// Reasons for pruning a search state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// A new child whose bound does not exceed the incumbent.
    BoundDominated,
    /// The best live state no longer beats the incumbent, so the search ends.
    EarlyTermination,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::EarlyTermination => write!(f, "EarlyTermination"),
        }
    }
}

/// Trait for observing and controlling a best-first search.
///
/// The loop calls, per popped state: `search_command`, `on_step`, then either
/// `on_prune(EarlyTermination)` or `on_expand`, followed by one `on_enqueue`
/// or `on_prune(BoundDominated)` per child that is not an improving solution.
pub trait TreeSearchMonitor<T>
where
    T: BenefitNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, matrix: &BenefitMatrix<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);
    /// Called with every popped state to decide whether to go on.
    fn search_command(
        &mut self,
        _state: &AssignmentState<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called once per loop iteration with the popped state and the number
    /// of states still waiting in the frontier.
    fn on_step(
        &mut self,
        state: &AssignmentState<T>,
        frontier_len: usize,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called before the children of `state` are generated.
    fn on_expand(&mut self, _state: &AssignmentState<T>, _statistics: &BnbSolverStatistics<T>) {}
    /// Called when a state is discarded.
    fn on_prune(
        &mut self,
        _state: &AssignmentState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }
    /// Called when a child enters the frontier.
    fn on_enqueue(&mut self, _state: &AssignmentState<T>, _statistics: &BnbSolverStatistics<T>) {}
    /// Called when a new incumbent is found.
    fn on_solution_found(
        &mut self,
        assignment: &Assignment<T>,
        statistics: &BnbSolverStatistics<T>,
    );
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T> + '_
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T> + '_
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: BenefitNumeric,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_enter_search(&mut self, matrix: &BenefitMatrix<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(matrix, statistics)
    }

    #[inline]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    #[inline]
    fn search_command(
        &mut self,
        state: &AssignmentState<T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        (**self).search_command(state, statistics)
    }

    #[inline]
    fn on_step(
        &mut self,
        state: &AssignmentState<T>,
        frontier_len: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_step(state, frontier_len, statistics)
    }

    #[inline]
    fn on_expand(&mut self, state: &AssignmentState<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_expand(state, statistics)
    }

    #[inline]
    fn on_prune(
        &mut self,
        state: &AssignmentState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_prune(state, reason, statistics)
    }

    #[inline]
    fn on_enqueue(&mut self, state: &AssignmentState<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enqueue(state, statistics)
    }

    #[inline]
    fn on_solution_found(
        &mut self,
        assignment: &Assignment<T>,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_solution_found(assignment, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SearchCommand::Continue.to_string(), "Continue");
        assert_eq!(
            SearchCommand::Terminate("node limit reached".into()).to_string(),
            "Terminate(node limit reached)"
        );
        assert_eq!(PruneReason::BoundDominated.to_string(), "BoundDominated");
        assert_eq!(PruneReason::EarlyTermination.to_string(), "EarlyTermination");
    }
}
