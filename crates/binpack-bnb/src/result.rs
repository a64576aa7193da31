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

use crate::stats::BnbSolverStatistics;
use binpack_model::index::BinIndex;

/// What a single target search decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetResult {
    /// Every item fits into `target` bins; the assignment is indexed by item position.
    Packed(Vec<BinIndex>),
    /// The tree was exhausted: `target` bins are provably not enough.
    Infeasible,
    /// A monitor terminated the search before it could decide.
    Aborted(String),
}

impl std::fmt::Display for TargetResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetResult::Packed(_) => write!(f, "Packed"),
            TargetResult::Infeasible => write!(f, "Infeasible"),
            TargetResult::Aborted(reason) => write!(f, "Aborted({})", reason),
        }
    }
}

/// Result of [`crate::bnb::BnbSolver::solve_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    target: usize,
    result: TargetResult,
    statistics: BnbSolverStatistics,
}

impl TargetOutcome {
    #[inline]
    pub fn packed(
        target: usize,
        assignment: Vec<BinIndex>,
        statistics: BnbSolverStatistics,
    ) -> Self {
        Self {
            target,
            result: TargetResult::Packed(assignment),
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(target: usize, statistics: BnbSolverStatistics) -> Self {
        Self {
            target,
            result: TargetResult::Infeasible,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(target: usize, reason: R, statistics: BnbSolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            target,
            result: TargetResult::Aborted(reason.into()),
            statistics,
        }
    }

    /// The bin budget that was searched.
    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    #[inline]
    pub fn result(&self) -> &TargetResult {
        &self.result
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_packed(&self) -> bool {
        matches!(self.result, TargetResult::Packed(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, TargetResult::Infeasible)
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.result, TargetResult::Aborted(_))
    }

    #[inline]
    pub fn into_parts(self) -> (usize, TargetResult, BnbSolverStatistics) {
        (self.target, self.result, self.statistics)
    }
}

impl std::fmt::Display for TargetOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TargetOutcome(target: {}, result: {}, nodes: {})",
            self.target, self.result, self.statistics.nodes_explored
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_result_kind() {
        let packed = TargetOutcome::packed(2, vec![BinIndex::new(0)], Default::default());
        assert!(packed.is_packed());
        assert_eq!(packed.target(), 2);

        let infeasible = TargetOutcome::infeasible(1, Default::default());
        assert!(infeasible.is_infeasible());
        assert!(!infeasible.is_aborted());

        let aborted = TargetOutcome::aborted(3, "time limit reached", Default::default());
        assert!(aborted.is_aborted());
        assert_eq!(
            aborted.result(),
            &TargetResult::Aborted("time limit reached".to_string())
        );
    }

    #[test]
    fn test_display() {
        let outcome = TargetOutcome::aborted(3, "interrupted", Default::default());
        assert_eq!(
            outcome.to_string(),
            "TargetOutcome(target: 3, result: Aborted(interrupted), nodes: 0)"
        );
    }
}
