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

//! Time limit monitor for the target search
//!
//! `TimeLimitMonitor` enforces a wall-clock budget for one target search. It
//! resets its clock in `on_enter_search`, so a monitor reused across targets
//! gives every target the full budget. Elapsed time is only checked when
//! `nodes_explored & mask == 0`, which includes the very first node.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use binpack_model::num::PackingNumeric;
use std::time::{Duration, Instant};

/// Signals termination once the configured time limit has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Checks the clock every 4096 nodes.
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x0FFF;

    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_CLOCK_CHECK_MASK)
    }

    pub fn with_clock_check_mask(time_limit: Duration, mask: u64) -> Self {
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
    T: PackingNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(
        &mut self,
        _weights: &[T],
        _capacity: T,
        _target: usize,
        _statistics: &BnbSolverStatistics,
    ) {
        self.start_time = Instant::now();
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }

    fn on_lower_bound_computed(
        &mut self,
        _state: &SearchState<T>,
        _lower_bound: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_place(&mut self, _state: &SearchState<T>, _item: usize, _statistics: &BnbSolverStatistics) {}

    fn on_open_bin(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}

    fn on_packing_found(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_terminates_on_first_node() {
        let mut monitor = TimeLimitMonitor::<u32>::new(Duration::ZERO);
        let stats = BnbSolverStatistics::default();
        monitor.on_enter_search(&[], 10, 0, &stats);
        let state = SearchState::new(0, 10u32);
        assert_eq!(
            monitor.search_command(&state, &stats),
            SearchCommand::Terminate("time limit reached".to_string())
        );
    }

    #[test]
    fn test_clock_is_only_checked_on_mask_boundaries() {
        let mut monitor = TimeLimitMonitor::<u32>::with_clock_check_mask(Duration::ZERO, 0x3);
        let state = SearchState::new(0, 10u32);
        let mut stats = BnbSolverStatistics {
            nodes_explored: 5,
            ..Default::default()
        };
        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
        stats.nodes_explored = 8;
        assert!(matches!(
            monitor.search_command(&state, &stats),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_generous_limit_continues() {
        let mut monitor = TimeLimitMonitor::<u32>::new(Duration::from_secs(3600));
        let stats = BnbSolverStatistics::default();
        let state = SearchState::new(0, 10u32);
        monitor.on_enter_search(&[], 10, 0, &stats);
        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
        assert_eq!(monitor.time_limit(), Duration::from_secs(3600));
    }
}
