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

/// A monitor that ignores every event and never stops the search.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for NoOperationMonitor<T>
where
    T: BenefitNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _matrix: &BenefitMatrix<T>, _statistics: &BnbSolverStatistics<T>) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    #[inline(always)]
    fn on_step(
        &mut self,
        _state: &AssignmentState<T>,
        _frontier_len: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    #[inline(always)]
    fn on_solution_found(
        &mut self,
        _assignment: &Assignment<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bound::remaining_max::RemainingMaxBound, monitor::tree_search_monitor::SearchCommand};

    #[test]
    fn test_always_continues() {
        let m = BenefitMatrix::<i64>::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let stats = BnbSolverStatistics::default();
        let state = AssignmentState::root(&m, &RemainingMaxBound);
        let mut monitor = NoOperationMonitor::<i64>::new();

        monitor.on_enter_search(&m, &stats);
        monitor.on_step(&state, 0, &stats);
        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
        monitor.on_exit_search(&stats);
        assert_eq!(monitor.name(), "NoOperationMonitor");
    }
}
