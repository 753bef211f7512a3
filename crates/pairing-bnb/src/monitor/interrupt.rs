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
    monitor::tree_search_monitor::{SearchCommand, TreeSearchMonitor},
    state::AssignmentState,
    stats::BnbSolverStatistics,
};
use pairing_core::num::BenefitNumeric;
use pairing_model::{assignment::Assignment, matrix::BenefitMatrix};
use std::sync::atomic::{AtomicBool, Ordering};

/// The termination reason reported once the flag is set.
pub const INTERRUPT_REASON: &str = "interrupt signal received";

/// A monitor that terminates the search as soon as a shared flag is set.
///
/// Callers cancel a running search by storing `true`. Parallel workers use
/// the same flag to stop each other when a global budget runs out.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a, T> {
    stop_flag: &'a AtomicBool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> InterruptMonitor<'a, T> {
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self {
            stop_flag,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for InterruptMonitor<'_, T>
where
    T: BenefitNumeric,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &BenefitMatrix<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn on_step(
        &mut self,
        _state: &AssignmentState<T>,
        _frontier_len: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_solution_found(
        &mut self,
        _assignment: &Assignment<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    #[inline]
    fn search_command(
        &mut self,
        _state: &AssignmentState<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        if self.stop_flag.load(Ordering::Relaxed) {
            SearchCommand::Terminate(INTERRUPT_REASON.to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::remaining_max::RemainingMaxBound;

    type IntegerType = i64;

    #[test]
    fn test_continues_until_flag_is_set() {
        let m = BenefitMatrix::<IntegerType>::from_rows(vec![vec![1]]).unwrap();
        let s = AssignmentState::root(&m, &RemainingMaxBound);
        let stats = BnbSolverStatistics::default();
        let flag = AtomicBool::new(false);
        let mut monitor = InterruptMonitor::<IntegerType>::new(&flag);

        assert_eq!(monitor.search_command(&s, &stats), SearchCommand::Continue);

        flag.store(true, Ordering::Relaxed);
        match monitor.search_command(&s, &stats) {
            SearchCommand::Terminate(reason) => assert_eq!(reason, INTERRUPT_REASON),
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
