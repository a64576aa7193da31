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

//! Branch-and-bound target search for one-dimensional bin packing.
//!
//! `BnbSolver::solve_target` answers a single question: do the given items,
//! sorted in non-increasing weight order, fit into `target` bins? The search
//! fills one bin at a time. Within a bin, candidates are scanned from a start
//! index so every subset is generated once in descending weight order. When
//! no further item fits, the next bin is opened and the scan restarts at the
//! largest unused item.
//!
//! Pruning rules
//! - Bin budget: a node whose current bin index reached `target` fails.
//! - L2 bound: when a bin is fresh, `bin + L2(unused)` must not exceed `target`.
//! - Symmetry: a candidate with the same weight as its unused predecessor at the
//!   same decision point is skipped.
//! - Must-fill: a fresh bin is always opened with the largest unused item. If
//!   that first placement fails, the node fails. A fresh bin never opens
//!   another fresh bin.
//!
//! The monitor is polled once per explored node; a termination request ends the
//! search with an aborted outcome, never with a proof. A search session
//! object owns the per-run state and statistics, so every call starts from a
//! clean state.
//!
//! The depth-first traversal runs on an explicit `SearchStack`, so the search
//! depth (placed items plus opened bins) is bounded by heap memory only.

use crate::{
    bounds::lower_bound_l2,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    result::TargetOutcome,
    stack::{FramePhase, SearchFrame, SearchStack},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use binpack_model::num::PackingNumeric;

/// The target search engine. Holds scratch storage reused across calls.
#[derive(Debug, Clone)]
pub struct BnbSolver<T> {
    bound_scratch: Vec<T>,
    stack: SearchStack<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: PackingNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: PackingNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            bound_scratch: Vec::new(),
            stack: SearchStack::new(),
        }
    }

    /// Creates a solver whose scratch storage already fits `num_items` items.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            bound_scratch: Vec::with_capacity(num_items),
            stack: SearchStack::preallocated(num_items),
        }
    }

    /// Decides whether `weights` fit into `target` bins of `capacity`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `weights` is not sorted in non-increasing order,
    /// or contains a weight of zero or above `capacity`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use binpack_bnb::{bnb::BnbSolver, monitor::no_op::NoOperationMonitor};
    /// let mut solver = BnbSolver::<u32>::new();
    /// let weights = [10, 7, 7, 5, 5, 4];
    /// assert!(solver.solve_target(&weights, 20, 2, NoOperationMonitor::new()).is_packed());
    /// assert!(solver.solve_target(&weights, 20, 1, NoOperationMonitor::new()).is_infeasible());
    /// ```
    pub fn solve_target<S>(
        &mut self,
        weights: &[T],
        capacity: T,
        target: usize,
        mut monitor: S,
    ) -> TargetOutcome
    where
        S: TreeSearchMonitor<T>,
    {
        debug_assert!(
            weights.windows(2).all(|w| w[0] >= w[1]),
            "called `BnbSolver::solve_target` with weights that are not sorted in non-increasing order"
        );
        debug_assert!(
            weights.iter().all(|&w| !w.is_zero() && w <= capacity),
            "called `BnbSolver::solve_target` with a weight of zero or above the capacity {}",
            capacity
        );

        let session = TargetSearchSession::new(self, weights, capacity, target, &mut monitor);
        session.run()
    }
}

/// Outcome of a node or subtree.
#[derive(Debug)]
enum Step {
    Packed,
    Exhausted,
    Aborted(String),
}

/// A single target search run.
struct TargetSearchSession<'a, T, S> {
    solver: &'a mut BnbSolver<T>,
    weights: &'a [T],
    capacity: T,
    target: usize,
    monitor: &'a mut S,
    state: SearchState<T>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Debug for TargetSearchSession<'a, T, S>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetSearchSession")
            .field("capacity", &self.capacity)
            .field("target", &self.target)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> TargetSearchSession<'a, T, S>
where
    T: PackingNumeric,
    S: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        weights: &'a [T],
        capacity: T,
        target: usize,
        monitor: &'a mut S,
    ) -> Self {
        solver.bound_scratch.reserve(weights.len());
        solver.stack.reset();
        solver.stack.ensure_capacity(weights.len());
        Self {
            solver,
            weights,
            capacity,
            target,
            monitor,
            state: SearchState::new(weights.len(), capacity),
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> TargetOutcome {
        self.monitor
            .on_enter_search(self.weights, self.capacity, self.target, &self.stats);

        let step = self.search();

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        match step {
            Step::Packed => {
                debug_assert!(self.state.is_complete());
                TargetOutcome::packed(self.target, self.state.into_assignment(), self.stats)
            }
            Step::Exhausted => TargetOutcome::infeasible(self.target, self.stats),
            Step::Aborted(reason) => TargetOutcome::aborted(self.target, reason, self.stats),
        }
    }

    /// Runs the depth-first search from the root node.
    ///
    /// A `Packed` or `Aborted` step ends the whole search at once, so the
    /// frames left on the stack are only consulted when a subtree is
    /// exhausted.
    fn search(&mut self) -> Step {
        if let Some(step) = self.enter(0) {
            return step;
        }

        while let Some(frame) = self.solver.stack.pop() {
            let (next, placed) = match frame.phase {
                FramePhase::BinOpened { previous_residual } => {
                    self.state.close_bin(previous_residual);
                    continue;
                }
                FramePhase::Scanning { next, placed } => (next, placed),
            };

            if let Some(item) = placed {
                self.state.unplace(item, self.weights[item]);
                self.stats.on_backtrack();
                self.monitor.on_backtrack(&self.state, &self.stats);

                if frame.fresh {
                    self.stats.on_must_fill_cutoff();
                    self.monitor
                        .on_prune(&self.state, PruneReason::MustFill, &self.stats);
                    continue;
                }
            }

            let step = match self.next_candidate(frame.start, next) {
                Some(item) => {
                    let weight = self.weights[item];
                    self.state.place(item, weight);
                    self.stats.on_placement();
                    self.monitor.on_place(&self.state, item, &self.stats);

                    self.solver.stack.push(SearchFrame {
                        phase: FramePhase::Scanning {
                            next: item + 1,
                            placed: Some(item),
                        },
                        ..frame
                    });
                    self.enter(item + 1)
                }
                None if frame.fresh => continue,
                None => {
                    let previous_residual = self.state.open_next_bin(self.capacity);
                    self.stats.on_bin_opened();
                    self.monitor.on_open_bin(&self.state, &self.stats);

                    self.solver.stack.push(SearchFrame {
                        phase: FramePhase::BinOpened { previous_residual },
                        ..frame
                    });
                    self.enter(0)
                }
            };

            match step {
                None | Some(Step::Exhausted) => {}
                Some(step) => return step,
            }
        }

        Step::Exhausted
    }

    /// Evaluates the node whose current bin and residual live in `self.state`,
    /// with candidates scanned from `start`.
    ///
    /// Returns the step if the node resolves without branching. Otherwise the
    /// node is counted as explored, its frame is pushed and `None` is returned.
    fn enter(&mut self, start: usize) -> Option<Step> {
        if self.state.is_complete() {
            self.monitor.on_packing_found(&self.state, &self.stats);
            return Some(Step::Packed);
        }

        let bin = self.state.current_bin().get();
        if bin >= self.target {
            return Some(Step::Exhausted);
        }

        let fresh = self.state.residual() == self.capacity;
        if fresh {
            self.state
                .collect_unused_weights(self.weights, &mut self.solver.bound_scratch);
            let lower_bound = bin + lower_bound_l2(&self.solver.bound_scratch, self.capacity);
            self.monitor
                .on_lower_bound_computed(&self.state, lower_bound, &self.stats);
            if lower_bound > self.target {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
                return Some(Step::Exhausted);
            }
        }

        if let SearchCommand::Terminate(reason) =
            self.monitor.search_command(&self.state, &self.stats)
        {
            return Some(Step::Aborted(reason));
        }
        self.stats.on_node_explored();
        self.stats.on_depth_update(self.state.num_packed() as u64);

        self.solver.stack.push(SearchFrame::scanning(start, fresh));
        None
    }

    /// The first unused item at or after `from` that fits the current bin
    /// and is not a symmetric copy of an unused predecessor.
    fn next_candidate(&mut self, start: usize, from: usize) -> Option<usize> {
        for item in from..self.weights.len() {
            let weight = self.weights[item];
            if self.state.is_used(item) || weight > self.state.residual() {
                continue;
            }

            if item > start
                && self.weights[item - 1] == weight
                && !self.state.is_used(item - 1)
            {
                self.stats.on_symmetry_skip();
                self.monitor
                    .on_prune(&self.state, PruneReason::Symmetry, &self.stats);
                continue;
            }

            return Some(item);
        }
        None
    }
}
