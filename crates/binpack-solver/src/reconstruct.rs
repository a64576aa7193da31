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

//! Mapping weight-level packings back onto original items.
//!
//! The reduction and the search only see weights in non-increasing order, and
//! equal weights are common. The reconstructor resolves every weight slot to a
//! distinct original item: the first unclaimed item of that weight in
//! discovery order. Per-weight FIFO queues make each lookup O(1) amortized.
//!
//! Reconstruction never mutates the reconstructor, so running it twice on the
//! same inputs yields the same solution.

use crate::error::ReconstructionError;
use binpack_bnb::{heuristics::HeuristicPacking, reduction::FixedBin};
use binpack_model::{
    index::{BinIndex, ItemIndex},
    instance::Instance,
    num::PackingNumeric,
    solution::Solution,
};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct SolutionReconstructor<'a, T> {
    instance: &'a Instance<T>,
    items_by_weight: FxHashMap<T, VecDeque<ItemIndex>>,
}

impl<'a, T> SolutionReconstructor<'a, T>
where
    T: PackingNumeric,
{
    /// Indexes the items of `instance` by weight, in discovery order.
    pub fn new(instance: &'a Instance<T>) -> Self {
        let mut items_by_weight: FxHashMap<T, VecDeque<ItemIndex>> = FxHashMap::default();
        for item in instance.items() {
            items_by_weight
                .entry(item.weight())
                .or_default()
                .push_back(item.index());
        }

        Self {
            instance,
            items_by_weight,
        }
    }

    /// Combines the fixed bins with a search assignment over `residual`.
    ///
    /// Fixed bins keep their order and occupy bins `0..fixed_bins.len()`; search
    /// bin `b` becomes bin `fixed_bins.len() + b`. The residual bin count is the
    /// highest used search bin plus one, since the search opens bins in order.
    pub fn from_search(
        &self,
        fixed_bins: &[FixedBin<T>],
        residual: &[T],
        assignment: &[BinIndex],
    ) -> Result<Solution<T>, ReconstructionError<T>> {
        assert_eq!(
            residual.len(),
            assignment.len(),
            "called `SolutionReconstructor::from_search` with {} residual weights but {} assignments",
            residual.len(),
            assignment.len()
        );

        let search_bins = assignment
            .iter()
            .filter(|bin| !bin.is_unassigned())
            .map(|bin| bin.get() + 1)
            .max()
            .unwrap_or(0);
        let total_bins = fixed_bins.len() + search_bins;

        let mut queues = self.items_by_weight.clone();
        let mut bins = vec![BinIndex::UNASSIGNED; self.instance.num_items()];

        for (bin, fixed) in fixed_bins.iter().enumerate() {
            for &weight in fixed.weights() {
                let item = Self::claim(&mut queues, weight, bin, total_bins)?;
                bins[item.get()] = BinIndex::new(bin);
            }
        }

        for (position, (&weight, &bin)) in residual.iter().zip(assignment).enumerate() {
            if bin.is_unassigned() {
                return Err(ReconstructionError::UnassignedSlot {
                    total_bins,
                    position,
                    weight,
                });
            }
            let final_bin = bin.offset(fixed_bins.len());
            let item = Self::claim(&mut queues, weight, final_bin.get(), total_bins)?;
            bins[item.get()] = final_bin;
        }

        self.finish(total_bins, bins)
    }

    /// Uses a heuristic packing of the full sorted instance as the solution.
    pub fn from_heuristic(
        &self,
        packing: &HeuristicPacking,
    ) -> Result<Solution<T>, ReconstructionError<T>> {
        let sorted_items = self.instance.sorted_items();
        let sorted_weights = self.instance.sorted_weights();
        assert_eq!(
            packing.assignment().len(),
            sorted_items.len(),
            "called `SolutionReconstructor::from_heuristic` with a packing of {} items for an instance of {}",
            packing.assignment().len(),
            sorted_items.len()
        );

        let total_bins = packing.num_bins();
        let mut bins = vec![BinIndex::UNASSIGNED; self.instance.num_items()];

        for (position, (&item, &bin)) in sorted_items.iter().zip(packing.assignment()).enumerate() {
            if bin.is_unassigned() {
                return Err(ReconstructionError::UnassignedSlot {
                    total_bins,
                    position,
                    weight: sorted_weights[position],
                });
            }
            bins[item.get()] = bin;
        }

        self.finish(total_bins, bins)
    }

    #[inline]
    fn claim(
        queues: &mut FxHashMap<T, VecDeque<ItemIndex>>,
        weight: T,
        bin: usize,
        total_bins: usize,
    ) -> Result<ItemIndex, ReconstructionError<T>> {
        queues
            .get_mut(&weight)
            .and_then(VecDeque::pop_front)
            .ok_or(ReconstructionError::NoUnclaimedItem {
                total_bins,
                bin,
                weight,
            })
    }

    fn finish(
        &self,
        total_bins: usize,
        bins: Vec<BinIndex>,
    ) -> Result<Solution<T>, ReconstructionError<T>> {
        let count = bins.iter().filter(|b| b.is_unassigned()).count();
        if count > 0 {
            return Err(ReconstructionError::UnclaimedItems { total_bins, count });
        }
        Ok(Solution::new(total_bins, bins, self.instance.weights().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binpack_bnb::{heuristics::first_fit_decreasing, reduction::reduce};

    fn instance(capacity: u32, weights: &[u32]) -> Instance<u32> {
        Instance::from_weights(capacity, weights.iter().copied()).unwrap()
    }

    fn bins_of(solution: &Solution<u32>) -> Vec<usize> {
        solution.bins().iter().map(BinIndex::get).collect()
    }

    #[test]
    fn test_fixed_bins_come_first_and_search_bins_are_offset() {
        // Sorted: [19, 14, 12, 11, 9, 9, 9, 7]; fixed {19, 11}.
        let inst = instance(30, &[9, 19, 7, 14, 9, 11, 12, 9]);
        let reduction = reduce(inst.sorted_weights(), inst.capacity());
        assert_eq!(reduction.residual(), &[14, 12, 9, 9, 9, 7]);

        let assignment: Vec<BinIndex> = [0, 1, 0, 1, 1, 0].into_iter().map(BinIndex::new).collect();
        let reconstructor = SolutionReconstructor::new(&inst);
        let solution = reconstructor
            .from_search(reduction.fixed_bins(), reduction.residual(), &assignment)
            .unwrap();

        assert_eq!(solution.num_bins(), 3);
        // Items (discovery order): 9 19 7 14 9 11 12 9
        assert_eq!(bins_of(&solution), vec![1, 0, 1, 1, 2, 0, 2, 2]);
        assert_eq!(solution.validate(&inst), Ok(()));
    }

    #[test]
    fn test_equal_weights_are_claimed_in_discovery_order() {
        let inst = instance(10, &[5, 5, 5]);
        let reduction = reduce(inst.sorted_weights(), inst.capacity());
        let reconstructor = SolutionReconstructor::new(&inst);
        let solution = reconstructor
            .from_search(reduction.fixed_bins(), reduction.residual(), &[BinIndex::new(0)])
            .unwrap();
        assert_eq!(bins_of(&solution), vec![0, 0, 1]);
    }

    #[test]
    fn test_reconstruction_is_idempotent() {
        let inst = instance(30, &[9, 19, 7, 14, 9, 11, 12, 9]);
        let reduction = reduce(inst.sorted_weights(), inst.capacity());
        let assignment: Vec<BinIndex> = [0, 1, 0, 1, 1, 0].into_iter().map(BinIndex::new).collect();
        let reconstructor = SolutionReconstructor::new(&inst);

        let first = reconstructor
            .from_search(reduction.fixed_bins(), reduction.residual(), &assignment)
            .unwrap();
        let second = reconstructor
            .from_search(reduction.fixed_bins(), reduction.residual(), &assignment)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_heuristic_assignment_maps_through_sorted_order() {
        let inst = instance(20, &[4, 10, 5, 7, 5, 7]);
        let packing = first_fit_decreasing(inst.sorted_weights(), inst.capacity());
        let solution = SolutionReconstructor::new(&inst)
            .from_heuristic(&packing)
            .unwrap();

        // Sorted [10, 7, 7, 5, 5, 4] -> FFD bins [0, 0, 1, 1, 1, 2].
        assert_eq!(solution.num_bins(), 3);
        assert_eq!(bins_of(&solution), vec![2, 0, 1, 0, 1, 1]);
        assert_eq!(solution.validate(&inst), Ok(()));
    }

    #[test]
    fn test_unknown_weight_is_reported() {
        let inst = instance(10, &[6, 4]);
        let reconstructor = SolutionReconstructor::new(&inst);
        let err = reconstructor
            .from_search(&[], &[6, 3], &[BinIndex::new(0), BinIndex::new(0)])
            .unwrap_err();
        assert_eq!(
            err,
            ReconstructionError::NoUnclaimedItem {
                total_bins: 1,
                bin: 0,
                weight: 3
            }
        );
    }

    #[test]
    fn test_unassigned_slot_is_reported() {
        let inst = instance(10, &[6, 4]);
        let reconstructor = SolutionReconstructor::new(&inst);
        let err = reconstructor
            .from_search(&[], &[6, 4], &[BinIndex::new(0), BinIndex::UNASSIGNED])
            .unwrap_err();
        assert!(matches!(
            err,
            ReconstructionError::UnassignedSlot { position: 1, weight: 4, .. }
        ));
    }

    #[test]
    fn test_missing_items_are_reported() {
        let inst = instance(10, &[6, 4]);
        let reconstructor = SolutionReconstructor::new(&inst);
        let err = reconstructor
            .from_search(&[], &[6], &[BinIndex::new(0)])
            .unwrap_err();
        assert_eq!(
            err,
            ReconstructionError::UnclaimedItems {
                total_bins: 1,
                count: 1
            }
        );
    }
}
