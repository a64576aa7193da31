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

//! # Iterative-Deepening Driver
//!
//! `MtpSolver` runs the complete Martello-Toth procedure on a validated
//! instance and returns a `SolverOutcome` that states whether the bin count is
//! proven minimal.
//!
//! ## Highlights
//!
//! - Presolve: reduction of the sorted weights, `LB = fixed + L2(residual)`,
//!   `UB = min(FFD, BFD)` on the full instance. `LB <= UB` is asserted.
//! - Search: targets `LB - fixed .. UB - fixed` over the residual, in
//!   increasing order. The first packed target ends the loop.
//! - Monitors: a `CompositeTreeSearchMonitor` per target with the optional
//!   interrupt, time limit and progress log monitors.
//! - Proof tracking: an aborted target is remembered. Any packing found after
//!   it, and the heuristic fallback, is then reported as `Feasible`.
//! - Builder pattern: `SolverBuilder` to configure time limit, clock mask,
//!   logging and an external interrupt flag.

use crate::{
    config::SolverConfig,
    error::SolveError,
    reconstruct::SolutionReconstructor,
    result::{Bounds, SolverOutcome, SolverResult, TargetReport, TargetStatus, TerminationReason},
    stats::SolverStatisticsBuilder,
};
use binpack_bnb::{
    bnb::BnbSolver,
    bounds::lower_bound_l2,
    heuristics::best_heuristic_packing,
    monitor::{
        composite::CompositeTreeSearchMonitor, interrupt::InterruptMonitor,
        log::LogTreeSearchMonitor, time::TimeLimitMonitor,
    },
    reduction::reduce,
    result::TargetResult,
    stats::BnbSolverStatistics,
};
use binpack_model::{instance::Instance, num::PackingNumeric, solution::Solution};
use std::{sync::atomic::AtomicBool, time::Duration};

/// Exact bin packing solver. Construct it with [`SolverBuilder`].
#[derive(Debug)]
pub struct MtpSolver<'a, T> {
    config: SolverConfig,
    interrupt: Option<&'a AtomicBool>,
    bnb: BnbSolver<T>,
}

impl<'a, T> MtpSolver<'a, T>
where
    T: PackingNumeric,
{
    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Validates `weights` against `capacity` and solves the resulting instance.
    pub fn solve_weights<I>(
        &mut self,
        weights: I,
        capacity: T,
    ) -> Result<SolverOutcome<T>, SolveError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let instance = Instance::from_weights(capacity, weights)?;
        self.solve(&instance)
    }

    /// Computes a packing of `instance` with the minimum number of bins.
    ///
    /// # Panics
    ///
    /// Panics if the lower bound exceeds the heuristic upper bound, which
    /// indicates a broken bound computation.
    #[tracing::instrument(level = "debug", skip_all, fields(items = instance.num_items()))]
    pub fn solve(&mut self, instance: &Instance<T>) -> Result<SolverOutcome<T>, SolveError<T>> {
        let config = self.config.clone();
        let interrupt = self.interrupt;
        self.solve_with_monitors(instance, |_| build_monitor(&config, interrupt))
    }

    /// The full procedure with the monitor stack of each target search
    /// supplied by `make_monitor`, which receives the residual target.
    fn solve_with_monitors<F>(
        &mut self,
        instance: &Instance<T>,
        mut make_monitor: F,
    ) -> Result<SolverOutcome<T>, SolveError<T>>
    where
        F: FnMut(usize) -> CompositeTreeSearchMonitor<'a, T>,
    {
        let start_time = std::time::Instant::now();
        let capacity = instance.capacity();
        let weights = instance.sorted_weights();

        let reduction = reduce(weights, capacity);
        let fixed = reduction.num_fixed_bins();
        let lower = fixed + lower_bound_l2(reduction.residual(), capacity);
        let heuristic = best_heuristic_packing(weights, capacity);
        let upper = heuristic.num_bins();

        assert!(
            lower <= upper,
            "called `MtpSolver::solve` with inconsistent bounds: lower bound {} exceeds upper bound {}",
            lower,
            upper
        );

        let bounds = Bounds {
            lower,
            upper,
            fixed_bins: fixed,
        };
        let presolve_duration = start_time.elapsed();

        tracing::info!(
            items = instance.num_items(),
            capacity = %capacity,
            fixed_bins = fixed,
            residual_items = reduction.residual().len(),
            lower_bound = lower,
            upper_bound = upper,
            heuristic = %heuristic.kind(),
            "presolve finished"
        );

        let reconstructor = SolutionReconstructor::new(instance);

        if lower == upper {
            let solution = reconstructor.from_heuristic(&heuristic)?;
            tracing::info!(bins = upper, "bounds matched, heuristic packing is optimal");
            let statistics = SolverStatisticsBuilder::new()
                .presolve_duration(presolve_duration)
                .solve_duration(start_time.elapsed())
                .build();
            return Ok(SolverOutcome::new(
                SolverResult::Optimal(solution),
                TerminationReason::BoundsMatched,
                bounds,
                Vec::new(),
                statistics,
            ));
        }

        let mut reports = Vec::with_capacity(upper - lower);
        let mut search_statistics = BnbSolverStatistics::default();
        let mut first_abort: Option<String> = None;
        let mut found: Option<Solution<T>> = None;

        for target in (lower - fixed)..(upper - fixed) {
            let total_bins = fixed + target;
            tracing::debug!(target_bins = target, total_bins, "starting target search");

            let monitor = make_monitor(target);
            let outcome = self
                .bnb
                .solve_target(reduction.residual(), capacity, target, monitor);
            search_statistics.merge(outcome.statistics());
            let (_, result, statistics) = outcome.into_parts();

            let status = match result {
                TargetResult::Packed(assignment) => {
                    let solution = reconstructor.from_search(
                        reduction.fixed_bins(),
                        reduction.residual(),
                        &assignment,
                    )?;
                    tracing::debug!(
                        total_bins,
                        nodes = statistics.nodes_explored,
                        "target packed"
                    );
                    found = Some(solution);
                    TargetStatus::Packed
                }
                TargetResult::Infeasible => {
                    tracing::debug!(
                        total_bins,
                        nodes = statistics.nodes_explored,
                        "target proven infeasible"
                    );
                    TargetStatus::Infeasible
                }
                TargetResult::Aborted(reason) => {
                    tracing::warn!(
                        total_bins,
                        nodes = statistics.nodes_explored,
                        reason = %reason,
                        "target search aborted, the final result is not proven optimal"
                    );
                    if first_abort.is_none() {
                        first_abort = Some(reason.clone());
                    }
                    TargetStatus::Aborted(reason)
                }
            };

            reports.push(TargetReport {
                target,
                total_bins,
                status,
                statistics,
            });

            if found.is_some() {
                break;
            }
        }

        let solution = match found {
            Some(solution) => solution,
            None => reconstructor.from_heuristic(&heuristic)?,
        };

        let targets_aborted = reports
            .iter()
            .filter(|r| matches!(r.status, TargetStatus::Aborted(_)))
            .count();
        let statistics = SolverStatisticsBuilder::new()
            .targets_attempted(reports.len())
            .targets_aborted(targets_aborted)
            .search(search_statistics)
            .presolve_duration(presolve_duration)
            .solve_duration(start_time.elapsed())
            .build();

        let (result, termination_reason) = match first_abort {
            None => (
                SolverResult::Optimal(solution),
                TerminationReason::OptimalityProven,
            ),
            Some(reason) => (
                SolverResult::Feasible(solution),
                TerminationReason::Aborted(reason),
            ),
        };

        tracing::info!(
            bins = result.solution().num_bins(),
            optimal = matches!(result, SolverResult::Optimal(_)),
            targets = reports.len(),
            nodes = statistics.search.nodes_explored,
            "solve finished"
        );

        Ok(SolverOutcome::new(
            result,
            termination_reason,
            bounds,
            reports,
            statistics,
        ))
    }
}

/// Monitor stack for one target. The interrupt is checked before the clock.
fn build_monitor<'a, T>(
    config: &SolverConfig,
    interrupt: Option<&'a AtomicBool>,
) -> CompositeTreeSearchMonitor<'a, T>
where
    T: PackingNumeric,
{
    let mut monitor = CompositeTreeSearchMonitor::with_capacity(3);

    if let Some(flag) = interrupt {
        monitor.add_monitor(InterruptMonitor::new(flag));
    }

    if let Some(limit) = config.time_limit {
        monitor.add_monitor(TimeLimitMonitor::with_clock_check_mask(
            limit,
            config.clock_check_mask,
        ));
    }

    if config.log_progress {
        monitor.add_monitor(LogTreeSearchMonitor::new(
            config.log_interval,
            config.clock_check_mask,
        ));
    }

    monitor
}

pub struct SolverBuilder<'a, T> {
    config: SolverConfig,
    interrupt: Option<&'a AtomicBool>,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> Default for SolverBuilder<'a, T>
where
    T: PackingNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SolverBuilder<'a, T>
where
    T: PackingNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            interrupt: None,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Per-target time limit.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn without_time_limit(mut self) -> Self {
        self.config.time_limit = None;
        self
    }

    #[inline]
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.config.clock_check_mask = mask;
        self
    }

    #[inline]
    pub fn with_progress_log(mut self, interval: Duration) -> Self {
        self.config.log_progress = true;
        self.config.log_interval = interval;
        self
    }

    /// Stops every running target search once `flag` becomes `true`.
    #[inline]
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    #[inline]
    pub fn build(self) -> MtpSolver<'a, T> {
        MtpSolver {
            config: self.config,
            interrupt: self.interrupt,
            bnb: BnbSolver::new(),
        }
    }
}
