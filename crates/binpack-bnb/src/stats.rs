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

use std::time::Duration;

/// Statistics collected while deciding a single target bin count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbSolverStatistics {
    /// Total nodes visited.
    pub nodes_explored: u64,
    /// Items placed into a bin, counting every retry.
    pub placements: u64,
    /// Placements undone after their subtree failed.
    pub backtracks: u64,
    /// Fresh bins opened after the previous bin could take no further item.
    pub bins_opened: u64,
    /// Fresh-bin nodes cut off by the L2 bound on the unused items.
    pub prunings_bound: u64,
    /// Candidates skipped because an equal weight was already tried at the same point.
    pub symmetry_skips: u64,
    /// Fresh bins abandoned after their first placement failed.
    pub must_fill_cutoffs: u64,
    /// The deepest level reached in the tree, in placed items.
    pub max_depth: u64,
    /// Total time spent in the search.
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_placement(&mut self) {
        self.placements = self.placements.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_bin_opened(&mut self) {
        self.bins_opened = self.bins_opened.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_symmetry_skip(&mut self) {
        self.symmetry_skips = self.symmetry_skips.saturating_add(1);
    }

    #[inline]
    pub fn on_must_fill_cutoff(&mut self) {
        self.must_fill_cutoffs = self.must_fill_cutoffs.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Adds the counters of `other` into `self`. `max_depth` takes the maximum.
    pub fn merge(&mut self, other: &BnbSolverStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.placements = self.placements.saturating_add(other.placements);
        self.backtracks = self.backtracks.saturating_add(other.backtracks);
        self.bins_opened = self.bins_opened.saturating_add(other.bins_opened);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.symmetry_skips = self.symmetry_skips.saturating_add(other.symmetry_skips);
        self.must_fill_cutoffs = self
            .must_fill_cutoffs
            .saturating_add(other.must_fill_cutoffs);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_total = self.time_total.saturating_add(other.time_total);
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Binpack-BnB Search Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Placements:           {}", self.placements)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Bins opened:          {}", self.bins_opened)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Symmetry skips:       {}", self.symmetry_skips)?;
        writeln!(f, "  Must-fill cutoffs:    {}", self.must_fill_cutoffs)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_saturate() {
        let mut stats = BnbSolverStatistics {
            nodes_explored: u64::MAX,
            ..Default::default()
        };
        stats.on_node_explored();
        assert_eq!(stats.nodes_explored, u64::MAX);
    }

    #[test]
    fn test_merge_sums_counters_and_keeps_max_depth() {
        let mut a = BnbSolverStatistics {
            nodes_explored: 3,
            backtracks: 1,
            max_depth: 5,
            time_total: Duration::from_millis(2),
            ..Default::default()
        };
        let b = BnbSolverStatistics {
            nodes_explored: 4,
            symmetry_skips: 2,
            max_depth: 2,
            time_total: Duration::from_millis(3),
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.nodes_explored, 7);
        assert_eq!(a.backtracks, 1);
        assert_eq!(a.symmetry_skips, 2);
        assert_eq!(a.max_depth, 5);
        assert_eq!(a.time_total, Duration::from_millis(5));
    }

    #[test]
    fn test_display_lists_every_counter() {
        let text = BnbSolverStatistics::default().to_string();
        for label in [
            "Nodes explored",
            "Placements",
            "Backtracks",
            "Bins opened",
            "Prunings (bound)",
            "Symmetry skips",
            "Must-fill cutoffs",
        ] {
            assert!(text.contains(label), "missing {label}");
        }
    }
}
