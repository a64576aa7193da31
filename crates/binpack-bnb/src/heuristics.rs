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

//! Greedy upper bounds.
//!
//! Both heuristics process the items in the order given, which callers keep
//! non-increasing. Bins are numbered in the order they are opened and the
//! returned assignment is indexed by position in the input slice.

use binpack_model::{index::BinIndex, num::PackingNumeric};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    FirstFitDecreasing,
    BestFitDecreasing,
}

impl std::fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeuristicKind::FirstFitDecreasing => write!(f, "FFD"),
            HeuristicKind::BestFitDecreasing => write!(f, "BFD"),
        }
    }
}

/// A complete packing produced by a greedy heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicPacking {
    kind: HeuristicKind,
    num_bins: usize,
    assignment: Vec<BinIndex>,
}

impl HeuristicPacking {
    #[inline]
    pub fn kind(&self) -> HeuristicKind {
        self.kind
    }

    /// Number of bins opened; an upper bound on the optimum.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// The bin of each item, indexed by input position.
    #[inline]
    pub fn assignment(&self) -> &[BinIndex] {
        &self.assignment
    }

    #[inline]
    pub fn into_assignment(self) -> Vec<BinIndex> {
        self.assignment
    }
}

impl std::fmt::Display for HeuristicPacking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HeuristicPacking(kind: {}, bins: {}, items: {})",
            self.kind,
            self.num_bins,
            self.assignment.len()
        )
    }
}

/// Places every item into the lowest-indexed bin with enough room.
///
/// # Examples
///
/// ```rust
/// # use binpack_bnb::heuristics::first_fit_decreasing;
/// let packing = first_fit_decreasing(&[9u32, 8, 7, 6, 5, 4, 3, 2, 1], 10);
/// assert_eq!(packing.num_bins(), 5);
/// ```
pub fn first_fit_decreasing<T>(weights_desc: &[T], capacity: T) -> HeuristicPacking
where
    T: PackingNumeric,
{
    pack_greedy(
        HeuristicKind::FirstFitDecreasing,
        weights_desc,
        capacity,
        |residuals, weight| residuals.iter().position(|&r| r >= weight),
    )
}

/// Places every item into the open bin whose residual capacity is smallest
/// among those that fit it. Ties go to the lowest-indexed bin.
pub fn best_fit_decreasing<T>(weights_desc: &[T], capacity: T) -> HeuristicPacking
where
    T: PackingNumeric,
{
    pack_greedy(
        HeuristicKind::BestFitDecreasing,
        weights_desc,
        capacity,
        |residuals, weight| {
            let mut best: Option<(usize, T)> = None;
            for (bin, &residual) in residuals.iter().enumerate() {
                if residual < weight {
                    continue;
                }
                match best {
                    Some((_, r)) if r <= residual => {}
                    _ => best = Some((bin, residual)),
                }
            }
            best.map(|(bin, _)| bin)
        },
    )
}

/// Runs both heuristics and keeps the one with fewer bins, first-fit on a tie.
pub fn best_heuristic_packing<T>(weights_desc: &[T], capacity: T) -> HeuristicPacking
where
    T: PackingNumeric,
{
    let ffd = first_fit_decreasing(weights_desc, capacity);
    let bfd = best_fit_decreasing(weights_desc, capacity);
    if bfd.num_bins < ffd.num_bins { bfd } else { ffd }
}

fn pack_greedy<T, F>(
    kind: HeuristicKind,
    weights_desc: &[T],
    capacity: T,
    mut choose_bin: F,
) -> HeuristicPacking
where
    T: PackingNumeric,
    F: FnMut(&[T], T) -> Option<usize>,
{
    debug_assert!(
        weights_desc.iter().all(|&w| w <= capacity),
        "called `pack_greedy` with a weight larger than the capacity {}",
        capacity
    );

    let mut residuals: Vec<T> = Vec::new();
    let mut assignment = Vec::with_capacity(weights_desc.len());

    for &weight in weights_desc {
        let bin = match choose_bin(&residuals, weight) {
            Some(bin) => bin,
            None => {
                residuals.push(capacity);
                residuals.len() - 1
            }
        };
        residuals[bin] = residuals[bin] - weight;
        assignment.push(BinIndex::new(bin));
    }

    HeuristicPacking {
        kind,
        num_bins: residuals.len(),
        assignment,
    }
}
