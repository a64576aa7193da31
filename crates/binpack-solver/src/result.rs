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

use crate::stats::SolverStatistics;
use binpack_bnb::stats::BnbSolverStatistics;
use binpack_model::{num::PackingNumeric, solution::Solution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// The bin count is proven minimal.
    Optimal(Solution<T>),
    /// A valid packing whose minimality was not proven because a target search aborted.
    Feasible(Solution<T>),
}

impl<T> SolverResult<T> {
    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }

    #[inline]
    pub fn into_solution(self) -> Solution<T> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(solution) => write!(f, "Optimal(bins={})", solution.num_bins()),
            SolverResult::Feasible(solution) => write!(f, "Feasible(bins={})", solution.num_bins()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The lower bound already matched the heuristic upper bound; no search ran.
    BoundsMatched,
    /// Every target below the returned bin count was proven infeasible.
    OptimalityProven,
    /// At least one target search was stopped by a limit or interrupt.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::BoundsMatched => write!(f, "Bounds Matched"),
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Bounds established before the search, in total bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Fixed bins plus L2 of the residual.
    pub lower: usize,
    /// Bins used by the best greedy heuristic.
    pub upper: usize,
    /// Bins committed by the reduction.
    pub fixed_bins: usize,
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bounds(lower: {}, upper: {}, fixed_bins: {})",
            self.lower, self.upper, self.fixed_bins
        )
    }
}

/// How a single target search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    Packed,
    Infeasible,
    Aborted(String),
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetStatus::Packed => write!(f, "Packed"),
            TargetStatus::Infeasible => write!(f, "Infeasible"),
            TargetStatus::Aborted(reason) => write!(f, "Aborted({})", reason),
        }
    }
}

/// Record of one target search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// Bin budget for the residual items.
    pub target: usize,
    /// `target` plus the fixed bins.
    pub total_bins: usize,
    pub status: TargetStatus,
    pub statistics: BnbSolverStatistics,
}

impl std::fmt::Display for TargetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TargetReport(target: {}, total_bins: {}, status: {}, nodes: {})",
            self.target, self.total_bins, self.status, self.statistics.nodes_explored
        )
    }
}

/// Result of a complete solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    bounds: Bounds,
    targets: Vec<TargetReport>,
    statistics: SolverStatistics,
}

impl<T> SolverOutcome<T> {
    #[inline]
    pub fn new(
        result: SolverResult<T>,
        termination_reason: TerminationReason,
        bounds: Bounds,
        targets: Vec<TargetReport>,
        statistics: SolverStatistics,
    ) -> Self {
        debug_assert!(
            matches!(
                (&result, &termination_reason),
                (SolverResult::Optimal(_), TerminationReason::BoundsMatched)
                    | (SolverResult::Optimal(_), TerminationReason::OptimalityProven)
                    | (SolverResult::Feasible(_), TerminationReason::Aborted(_))
            ),
            "called `SolverOutcome::new` with a result that contradicts the termination reason"
        );

        Self {
            result,
            termination_reason,
            bounds,
            targets,
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        self.result.solution()
    }

    #[inline]
    pub fn into_solution(self) -> Solution<T> {
        self.result.into_solution()
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Target searches in the order they ran.
    #[inline]
    pub fn targets(&self) -> &[TargetReport] {
        &self.targets
    }

    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// `true` if the bin count is proven minimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }
}

impl<T> SolverOutcome<T>
where
    T: PackingNumeric,
{
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.solution().num_bins()
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        writeln!(f, "{}", self.bounds)?;
        for report in &self.targets {
            writeln!(f, "{}", report)?;
        }
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binpack_model::index::BinIndex;

    fn solution() -> Solution<u32> {
        Solution::new(1, vec![BinIndex::new(0), BinIndex::new(0)], vec![6, 4])
    }

    fn bounds() -> Bounds {
        Bounds {
            lower: 1,
            upper: 1,
            fixed_bins: 1,
        }
    }

    #[test]
    fn test_accessors() {
        let outcome = SolverOutcome::new(
            SolverResult::Optimal(solution()),
            TerminationReason::BoundsMatched,
            bounds(),
            Vec::new(),
            SolverStatistics::default(),
        );
        assert!(outcome.is_optimal());
        assert_eq!(outcome.num_bins(), 1);
        assert_eq!(outcome.bounds().fixed_bins, 1);
        assert!(outcome.targets().is_empty());
        assert_eq!(outcome.into_solution(), solution());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "contradicts the termination reason")]
    fn test_feasible_result_requires_abort() {
        let _ = SolverOutcome::new(
            SolverResult::Feasible(solution()),
            TerminationReason::OptimalityProven,
            bounds(),
            Vec::new(),
            SolverStatistics::default(),
        );
    }

    #[test]
    fn test_display() {
        let outcome = SolverOutcome::new(
            SolverResult::Feasible(solution()),
            TerminationReason::Aborted("time limit reached".into()),
            bounds(),
            vec![TargetReport {
                target: 0,
                total_bins: 1,
                status: TargetStatus::Aborted("time limit reached".into()),
                statistics: BnbSolverStatistics::default(),
            }],
            SolverStatistics::default(),
        );
        let text = outcome.to_string();
        assert!(text.starts_with("Result: Feasible(bins=1)\nTermination: Aborted: time limit reached\n"));
        assert!(text.contains("Bounds(lower: 1, upper: 1, fixed_bins: 1)"));
        assert!(text.contains(
            "TargetReport(target: 0, total_bins: 1, status: Aborted(time limit reached), nodes: 0)"
        ));
    }
}
