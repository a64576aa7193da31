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

//! Dominance-based reduction
//!
//! Repeatedly looks at the largest remaining item `w` and commits it to a
//! fixed bin when one of two rules applies:
//!
//! 1. Perfect pair: another item of weight exactly `C - w` exists. The two fill
//!    a bin completely and some optimal solution contains that bin.
//! 2. Forced singleton: even the smallest remaining item does not fit next to
//!    `w`. The smallest remaining item may be `w` itself.
//!
//! The loop stops as soon as neither rule applies to the current largest item.
//! Fixed bins are recorded in the order they were produced; the residual keeps
//! the non-increasing order of the input.

use binpack_model::num::PackingNumeric;
use fixedbitset::FixedBitSet;
use smallvec::{SmallVec, smallvec};

/// The rule that committed a fixed bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReductionRule {
    /// Two items that fill the bin exactly.
    PerfectPair,
    /// One item that nothing else fits next to.
    ForcedSingleton,
}

impl std::fmt::Display for ReductionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReductionRule::PerfectPair => write!(f, "PerfectPair"),
            ReductionRule::ForcedSingleton => write!(f, "ForcedSingleton"),
        }
    }
}

/// A bin committed by the reduction, holding one or two items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBin<T> {
    rule: ReductionRule,
    weights: SmallVec<[T; 2]>,
}

impl<T> FixedBin<T>
where
    T: PackingNumeric,
{
    #[inline]
    fn pair(largest: T, partner: T) -> Self {
        Self {
            rule: ReductionRule::PerfectPair,
            weights: smallvec![largest, partner],
        }
    }

    #[inline]
    fn singleton(weight: T) -> Self {
        Self {
            rule: ReductionRule::ForcedSingleton,
            weights: smallvec![weight],
        }
    }

    /// The rule that produced this bin.
    #[inline]
    pub fn rule(&self) -> ReductionRule {
        self.rule
    }

    /// The item weights in the bin, largest first.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Number of items in the bin.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false`; a fixed bin holds at least one item.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Total weight in the bin.
    #[inline]
    pub fn load(&self) -> T {
        self.weights.iter().fold(T::zero(), |acc, &w| acc + w)
    }
}

impl<T> std::fmt::Display for FixedBin<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[", self.rule)?;
        for (i, w) in self.weights.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", w)?;
        }
        write!(f, "]")
    }
}

/// Result of [`reduce`]: committed bins and the items still to be packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction<T> {
    fixed_bins: Vec<FixedBin<T>>,
    residual: Vec<T>,
}

impl<T> Reduction<T>
where
    T: PackingNumeric,
{
    /// Bins committed by the reduction, in the order they were produced.
    #[inline]
    pub fn fixed_bins(&self) -> &[FixedBin<T>] {
        &self.fixed_bins
    }

    #[inline]
    pub fn num_fixed_bins(&self) -> usize {
        self.fixed_bins.len()
    }

    /// Remaining weights, in non-increasing order.
    #[inline]
    pub fn residual(&self) -> &[T] {
        &self.residual
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<FixedBin<T>>, Vec<T>) {
        (self.fixed_bins, self.residual)
    }
}

/// Applies the perfect-pair and forced-singleton rules to `weights_desc`.
///
/// # Panics
///
/// In debug builds, panics if `weights_desc` is not sorted in non-increasing
/// order or contains a weight larger than `capacity`.
///
/// # Examples
///
/// ```rust
/// # use binpack_bnb::reduction::reduce;
/// let reduction = reduce(&[6u32, 5, 4, 3, 2, 1], 10);
/// assert_eq!(reduction.num_fixed_bins(), 1);
/// assert_eq!(reduction.fixed_bins()[0].weights(), &[6, 4]);
/// assert_eq!(reduction.residual(), &[5, 3, 2, 1]);
/// ```
pub fn reduce<T>(weights_desc: &[T], capacity: T) -> Reduction<T>
where
    T: PackingNumeric,
{
    debug_assert!(
        weights_desc.windows(2).all(|w| w[0] >= w[1]),
        "called `reduce` with weights that are not sorted in non-increasing order"
    );
    debug_assert!(
        weights_desc.iter().all(|&w| w <= capacity),
        "called `reduce` with a weight larger than the capacity {}",
        capacity
    );

    let n = weights_desc.len();
    let mut taken = FixedBitSet::with_capacity(n);
    let mut fixed_bins = Vec::new();

    // Every index below `front` is taken, and so is every index at or above
    // `back`. Complements never shrink, so partners are claimed at strictly
    // decreasing indices: items in `front + 1..partner_limit` are all free.
    let mut front = 0;
    let mut back = n;
    let mut partner_limit = n;

    loop {
        while front < back && taken.contains(front) {
            front += 1;
        }
        while back > front && taken.contains(back - 1) {
            back -= 1;
        }
        if front >= back {
            break;
        }

        let largest = weights_desc[front];
        let complement = capacity - largest;

        let window_start = front + 1;
        let window = &weights_desc[window_start..partner_limit.max(window_start)];
        let end = window.partition_point(|&w| w >= complement);
        if end > 0 && window[end - 1] == complement {
            let partner = window_start + end - 1;
            taken.insert(front);
            taken.insert(partner);
            partner_limit = partner;
            fixed_bins.push(FixedBin::pair(largest, complement));
            continue;
        }

        if weights_desc[back - 1] > complement {
            taken.insert(front);
            fixed_bins.push(FixedBin::singleton(largest));
            continue;
        }

        break;
    }

    let residual = weights_desc
        .iter()
        .enumerate()
        .filter(|&(i, _)| !taken.contains(i))
        .map(|(_, &w)| w)
        .collect();

    Reduction {
        fixed_bins,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::{optimal_bins, random_sorted_weights};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn fixed_weights(reduction: &Reduction<u32>) -> Vec<Vec<u32>> {
        reduction
            .fixed_bins()
            .iter()
            .map(|b| b.weights().to_vec())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let reduction = reduce::<u32>(&[], 10);
        assert_eq!(reduction.num_fixed_bins(), 0);
        assert!(reduction.residual().is_empty());
    }

    #[test]
    fn test_pairs_of_half_capacity() {
        let reduction = reduce(&[1u32, 1, 1, 1], 2);
        assert_eq!(fixed_weights(&reduction), vec![vec![1, 1], vec![1, 1]]);
        assert!(reduction.residual().is_empty());
        assert!(
            reduction
                .fixed_bins()
                .iter()
                .all(|b| b.rule() == ReductionRule::PerfectPair)
        );
    }

    #[test]
    fn test_leftover_half_item_is_not_a_singleton() {
        // 5 + 5 = 10 is not > 10, so the last 5 stays in the residual.
        let reduction = reduce(&[5u32, 5, 5], 10);
        assert_eq!(fixed_weights(&reduction), vec![vec![5, 5]]);
        assert_eq!(reduction.residual(), &[5]);
    }

    #[test]
    fn test_chain_of_complements() {
        let weights: Vec<u32> = (1..=9).rev().collect();
        let reduction = reduce(&weights, 10);
        assert_eq!(
            fixed_weights(&reduction),
            vec![vec![9, 1], vec![8, 2], vec![7, 3], vec![6, 4]]
        );
        assert_eq!(reduction.residual(), &[5]);
    }

    #[test]
    fn test_forced_singletons() {
        let reduction = reduce(&[6u32; 5], 10);
        assert_eq!(reduction.num_fixed_bins(), 5);
        assert!(
            reduction
                .fixed_bins()
                .iter()
                .all(|b| b.rule() == ReductionRule::ForcedSingleton && b.load() == 6)
        );
        assert!(reduction.residual().is_empty());
    }

    #[test]
    fn test_singleton_then_stop() {
        let reduction = reduce(&[99u32, 97, 94, 93, 8, 5, 4, 2], 100);
        assert_eq!(fixed_weights(&reduction), vec![vec![99]]);
        assert_eq!(reduction.fixed_bins()[0].rule(), ReductionRule::ForcedSingleton);
        assert_eq!(reduction.residual(), &[97, 94, 93, 8, 5, 4, 2]);
    }

    #[test]
    fn test_pair_then_stop_keeps_residual_order() {
        let reduction = reduce(&[19u32, 14, 12, 11, 9, 9, 9, 7], 30);
        assert_eq!(fixed_weights(&reduction), vec![vec![19, 11]]);
        assert_eq!(reduction.residual(), &[14, 12, 9, 9, 9, 7]);
    }

    #[test]
    fn test_full_capacity_item_is_a_singleton() {
        let reduction = reduce(&[10u32, 3], 10);
        assert_eq!(fixed_weights(&reduction), vec![vec![10]]);
        assert_eq!(reduction.residual(), &[3]);
    }

    #[test]
    fn test_large_input_with_repeated_complements() {
        let mut weights = vec![7u32; 3_000];
        weights.extend(std::iter::repeat_n(5, 4_001));
        weights.extend(std::iter::repeat_n(3, 2_000));
        let reduction = reduce(&weights, 10);

        // 2000 pairs [7, 3], then 1000 singletons of 7 (nothing small enough
        // remains), then 2000 pairs [5, 5] and one leftover 5.
        assert_eq!(reduction.num_fixed_bins(), 5_000);
        assert_eq!(reduction.fixed_bins()[0].weights(), &[7, 3]);
        assert_eq!(reduction.fixed_bins()[1_999].weights(), &[7, 3]);
        assert_eq!(reduction.fixed_bins()[2_000].rule(), ReductionRule::ForcedSingleton);
        assert_eq!(reduction.fixed_bins()[2_999].weights(), &[7]);
        assert_eq!(reduction.fixed_bins()[3_000].weights(), &[5, 5]);
        assert_eq!(reduction.residual(), &[5]);
    }

    #[test]
    fn test_display() {
        let reduction = reduce(&[6u32, 4], 10);
        assert_eq!(reduction.fixed_bins()[0].to_string(), "PerfectPair[6, 4]");
    }

    #[test]
    fn test_reduction_preserves_items_and_optimum() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
        for _ in 0..300 {
            let capacity = rng.random_range(4..=16);
            let weights = random_sorted_weights(&mut rng, 9, capacity);
            let reduction = reduce(&weights, capacity);

            let mut all: Vec<u32> = reduction
                .fixed_bins()
                .iter()
                .flat_map(|b| b.weights().iter().copied())
                .chain(reduction.residual().iter().copied())
                .collect();
            all.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(all, weights);

            assert!(reduction.fixed_bins().iter().all(|b| b.load() <= capacity));
            assert!(reduction.residual().windows(2).all(|w| w[0] >= w[1]));

            assert_eq!(
                reduction.num_fixed_bins() + optimal_bins(reduction.residual(), capacity),
                optimal_bins(&weights, capacity),
                "reduction changed the optimum for {:?} with capacity {}",
                weights,
                capacity
            );
        }
    }
}
