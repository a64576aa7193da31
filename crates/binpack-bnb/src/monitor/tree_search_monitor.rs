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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling the target search. Callbacks track the search lifecycle, and a
//! monitor can stop it via `SearchCommand` (default: Continue).
//!
//! Lifecycle
//! - enter, then per node: {lower bound / prune} then command then {place / backtrack / open bin},
//!   then packing found or exhaustion, then exit.
//! - `search_command` is polled once per explored node. Termination is
//!   reported as an aborted target, never as infeasibility.
//! - `BnbSolverStatistics` is provided to every callback for telemetry.

use crate::{state::SearchState, stats::BnbSolverStatistics};
use binpack_model::num::PackingNumeric;

/// What the search should do next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for cutting off part of the search tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The L2 bound on the unused items exceeds the bins left in the budget.
    BoundDominated,
    /// An equal weight was already tried at the same decision point.
    Symmetry,
    /// The first placement into a fresh bin failed, so the bin cannot be filled.
    MustFill,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::Symmetry => write!(f, "Symmetry"),
            PruneReason::MustFill => write!(f, "MustFill"),
        }
    }
}

/// Trait for monitoring and controlling the target search.
pub trait TreeSearchMonitor<T>
where
    T: PackingNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called when the search for `target` bins over `weights` starts.
    fn on_enter_search(
        &mut self,
        weights: &[T],
        capacity: T,
        target: usize,
        statistics: &BnbSolverStatistics,
    );

    /// Called when the search ends, whatever the outcome.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);

    /// Called once per explored node to determine the next action of the search.
    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called when a fresh bin computes the bound `current bin + L2(unused)`.
    fn on_lower_bound_computed(
        &mut self,
        state: &SearchState<T>,
        lower_bound: usize,
        statistics: &BnbSolverStatistics,
    );

    /// Called when part of the tree is cut off.
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    );

    /// Called after `item` was placed into the current bin.
    fn on_place(&mut self, state: &SearchState<T>, item: usize, statistics: &BnbSolverStatistics);

    /// Called after the next bin was opened.
    fn on_open_bin(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics);

    /// Called after a placement was undone.
    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics);

    /// Called when every item is packed within the target.
    fn on_packing_found(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics);
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
