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
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use binpack_model::num::PackingNumeric;
use std::time::{Duration, Instant};

/// Periodic progress reporting through `tracing`.
///
/// Emits an `info` event when a target search starts and ends, and a `debug`
/// progress event at most once per `log_interval`. The interval is only
/// checked when `nodes_explored & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    target: usize,
    deepest_bin: usize,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> LogTreeSearchMonitor<T> {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            target: 0,
            deepest_bin: 0,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> LogTreeSearchMonitor<T>
where
    T: PackingNumeric,
{
    #[inline(always)]
    fn log_progress(&mut self, state: &SearchState<T>, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        tracing::debug!(
            target: "binpack_bnb::search",
            elapsed_secs = now.duration_since(self.start_time).as_secs_f64(),
            target_bins = self.target,
            nodes = stats.nodes_explored,
            packed = state.num_packed(),
            current_bin = state.current_bin().get(),
            deepest_bin = self.deepest_bin,
            backtracks = stats.backtracks,
            bound_prunings = stats.prunings_bound,
            "search progress"
        );
        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0x0FFF)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: PackingNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(
        &mut self,
        weights: &[T],
        capacity: T,
        target: usize,
        _statistics: &BnbSolverStatistics,
    ) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.target = target;
        self.deepest_bin = 0;
        tracing::info!(
            target: "binpack_bnb::search",
            target_bins = target,
            items = weights.len(),
            capacity = %capacity,
            "target search started"
        );
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        tracing::info!(
            target: "binpack_bnb::search",
            target_bins = self.target,
            nodes = stats.nodes_explored,
            backtracks = stats.backtracks,
            bound_prunings = stats.prunings_bound,
            symmetry_skips = stats.symmetry_skips,
            elapsed = ?stats.time_total,
            "target search finished"
        );
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

    fn on_place(&mut self, state: &SearchState<T>, _item: usize, stats: &BnbSolverStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress(state, stats);
        }
    }

    fn on_open_bin(&mut self, state: &SearchState<T>, _statistics: &BnbSolverStatistics) {
        self.deepest_bin = self.deepest_bin.max(state.current_bin().get());
    }

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}

    fn on_packing_found(&mut self, state: &SearchState<T>, stats: &BnbSolverStatistics) {
        tracing::info!(
            target: "binpack_bnb::search",
            target_bins = self.target,
            bins_used = state.current_bin().get() + 1,
            nodes = stats.nodes_explored,
            "packing found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let monitor = LogTreeSearchMonitor::<u32>::new(Duration::from_secs(2), 0xFF);
        assert_eq!(
            monitor.to_string(),
            "LogTreeSearchMonitor(log_interval: 2s, clock_check_mask: 255)"
        );
    }

    #[test]
    fn test_tracks_deepest_opened_bin() {
        let mut monitor = LogTreeSearchMonitor::<u32>::default();
        let stats = BnbSolverStatistics::default();
        monitor.on_enter_search(&[4, 4], 5, 2, &stats);

        let mut state = SearchState::new(2, 5u32);
        state.place(0, 4);
        monitor.on_place(&state, 0, &stats);
        state.open_next_bin(5);
        monitor.on_open_bin(&state, &stats);
        assert_eq!(monitor.deepest_bin, 1);

        monitor.on_exit_search(&stats);
        monitor.on_enter_search(&[4, 4], 5, 2, &stats);
        assert_eq!(monitor.deepest_bin, 0);
    }
}
