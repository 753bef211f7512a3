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

//! Wall-clock budget.
//!
//! `TimeLimitMonitor` restarts its clock in `on_enter_search` and reads it
//! only every `mask + 1` steps, so the check stays off the hot path.

use crate::{
    monitor::tree_search_monitor::{SearchCommand, TreeSearchMonitor},
    state::AssignmentState,
    stats::BnbSolverStatistics,
};
use pairing_core::num::BenefitNumeric;
use pairing_model::{assignment::Assignment, matrix::BenefitMatrix};
use std::time::{Duration, Instant};

/// Terminates the search once `time_limit` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Checks the clock every 1024 steps.
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FF;

    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    /// `mask` must be one less than a power of two; the clock is read when
    /// `steps & mask == 0`.
    pub fn with_clock_check_mask(time_limit: Duration, mask: u64) -> Self {
        debug_assert!(
            mask.wrapping_add(1).is_power_of_two() || mask == u64::MAX,
            "called `TimeLimitMonitor::with_clock_check_mask` with mask {} that is not 2^k - 1",
            mask
        );

        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask: mask,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: BenefitNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &BenefitMatrix<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
    }

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

    fn search_command(
        &mut self,
        _state: &AssignmentState<T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        if (statistics.steps & self.clock_check_mask) == 0
            && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit exceeded".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::remaining_max::RemainingMaxBound;

    type IntegerType = i64;

    fn fixture() -> (BenefitMatrix<IntegerType>, AssignmentState<IntegerType>) {
        let m = BenefitMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let s = AssignmentState::root(&m, &RemainingMaxBound);
        (m, s)
    }

    #[test]
    fn test_zero_limit_terminates_on_checked_step() {
        let (m, s) = fixture();
        let stats = BnbSolverStatistics::default();
        let mut monitor = TimeLimitMonitor::<IntegerType>::with_clock_check_mask(Duration::ZERO, 0);
        monitor.on_enter_search(&m, &stats);
        assert_eq!(
            monitor.search_command(&s, &stats),
            SearchCommand::Terminate("time limit exceeded".to_string())
        );
    }

    #[test]
    fn test_unchecked_steps_continue() {
        let (m, s) = fixture();
        let mut stats = BnbSolverStatistics::default();
        stats.steps = 1;
        let mut monitor = TimeLimitMonitor::<IntegerType>::with_clock_check_mask(Duration::ZERO, 0xF);
        monitor.on_enter_search(&m, &stats);
        assert_eq!(monitor.search_command(&s, &stats), SearchCommand::Continue);
    }

    #[test]
    fn test_generous_limit_continues() {
        let (m, s) = fixture();
        let stats = BnbSolverStatistics::default();
        let mut monitor = TimeLimitMonitor::<IntegerType>::new(Duration::from_secs(3600));
        monitor.on_enter_search(&m, &stats);
        assert_eq!(monitor.search_command(&s, &stats), SearchCommand::Continue);
        assert_eq!(monitor.time_limit(), Duration::from_secs(3600));
    }
}
