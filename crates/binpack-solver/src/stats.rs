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

use binpack_bnb::stats::BnbSolverStatistics;
use std::time::Duration;

/// Statistics collected over a whole solve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatistics {
    /// Number of target searches started.
    pub targets_attempted: usize,
    /// Number of target searches stopped by a monitor.
    pub targets_aborted: usize,
    /// Search counters summed over every target.
    pub search: BnbSolverStatistics,
    /// Time spent on reduction, bounds and heuristics.
    pub presolve_duration: Duration,
    /// Total duration of the solve.
    pub solve_duration: Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Targets Attempted: {}", self.targets_attempted)?;
        writeln!(f, "  Targets Aborted: {}", self.targets_aborted)?;
        writeln!(f, "  Nodes Explored: {}", self.search.nodes_explored)?;
        writeln!(
            f,
            "  Presolve Duration (secs): {:.3}",
            self.presolve_duration.as_secs_f64()
        )?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatisticsBuilder {
    statistics: SolverStatistics,
}

impl SolverStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn targets_attempted(mut self, targets_attempted: usize) -> Self {
        self.statistics.targets_attempted = targets_attempted;
        self
    }

    #[inline]
    pub fn targets_aborted(mut self, targets_aborted: usize) -> Self {
        self.statistics.targets_aborted = targets_aborted;
        self
    }

    #[inline]
    pub fn search(mut self, search: BnbSolverStatistics) -> Self {
        self.statistics.search = search;
        self
    }

    #[inline]
    pub fn presolve_duration(mut self, presolve_duration: Duration) -> Self {
        self.statistics.presolve_duration = presolve_duration;
        self
    }

    #[inline]
    pub fn solve_duration(mut self, solve_duration: Duration) -> Self {
        self.statistics.solve_duration = solve_duration;
        self
    }

    #[inline]
    pub fn build(self) -> SolverStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_constructs_expected_struct() {
        let search = BnbSolverStatistics {
            nodes_explored: 42,
            ..Default::default()
        };
        let stats = SolverStatisticsBuilder::new()
            .targets_attempted(3)
            .targets_aborted(1)
            .search(search.clone())
            .presolve_duration(Duration::from_millis(2))
            .solve_duration(Duration::from_millis(1234))
            .build();

        assert_eq!(stats.targets_attempted, 3);
        assert_eq!(stats.targets_aborted, 1);
        assert_eq!(stats.search, search);
        assert_eq!(stats.presolve_duration, Duration::from_millis(2));
        assert_eq!(stats.solve_duration, Duration::from_millis(1234));
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SolverStatisticsBuilder::new()
            .targets_attempted(2)
            .solve_duration(Duration::from_millis(1500))
            .build();
        let text = stats.to_string();
        assert!(text.contains("Targets Attempted: 2"));
        assert!(text.contains("Targets Aborted: 0"));
        assert!(text.contains("Nodes Explored: 0"));
        assert!(text.contains("Solve Duration (secs): 1.500"));
    }
}
