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

//! Lower bounds on the number of bins
//!
//! `lower_bound_l1` is the volume bound `ceil(sum / C)`. `lower_bound_l2` is the
//! Martello-Toth bound: for every threshold `K` in `{0}` plus the distinct weights
//! `<= C/2`, items are split into
//!
//! - `N1`: `w > C - K` (nothing of size `>= K` fits next to them),
//! - `N2`: `C - K >= w > C/2` (pairwise incompatible, one bin each),
//! - `N3`: `C/2 >= w >= K` (the items competing for the space left in `N2` bins),
//!
//! and `L(K) = |N1| + |N2| + ceil(max(0, sum(N3) - R) / C)` with `R` the residual
//! capacity of the `N2` bins. When no weight exceeds `C/2` a cheaper bucket
//! argument over `floor(C / w)` gives the bound directly.
//!
//! All functions are pure, never fail, and never exceed the optimum. Volume
//! sums are accumulated in `u128`, so they hold for totals beyond `T`.
//! `lower_bound_l2` expects weights in non-increasing order, which every
//! caller in this workspace maintains.

use binpack_model::num::PackingNumeric;

/// Both lower bounds for a weight multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LowerBounds {
    /// The volume bound.
    pub l1: usize,
    /// The Martello-Toth bound, always `>= l1`.
    pub l2: usize,
}

impl std::fmt::Display for LowerBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBounds(l1: {}, l2: {})", self.l1, self.l2)
    }
}

/// Computes both bounds for `weights` sorted in non-increasing order.
#[inline]
pub fn lower_bounds<T>(weights: &[T], capacity: T) -> LowerBounds
where
    T: PackingNumeric,
{
    LowerBounds {
        l1: lower_bound_l1(weights, capacity),
        l2: lower_bound_l2(weights, capacity),
    }
}

/// Volume bound: `ceil(sum(weights) / capacity)`, `0` for no items.
///
/// # Examples
///
/// ```rust
/// # use binpack_bnb::bounds::lower_bound_l1;
/// assert_eq!(lower_bound_l1(&[6u32, 5, 4, 3, 2, 1], 10), 3);
/// assert_eq!(lower_bound_l1::<u32>(&[], 10), 0);
/// ```
#[inline]
pub fn lower_bound_l1<T>(weights: &[T], capacity: T) -> usize
where
    T: PackingNumeric,
{
    debug_assert!(
        !capacity.is_zero(),
        "called `lower_bound_l1` with zero capacity"
    );

    let total = weights
        .iter()
        .fold(0u128, |acc, &w| acc.saturating_add(w.to_u128_saturating()));
    bins_for_volume(total, capacity)
}

/// `ceil(volume / capacity)` as a bin count, saturating at `usize::MAX`.
#[inline]
fn bins_for_volume<T>(volume: u128, capacity: T) -> usize
where
    T: PackingNumeric,
{
    let capacity = capacity.to_u128_saturating();
    usize::try_from(volume.div_ceil(capacity)).unwrap_or(usize::MAX)
}

/// Martello-Toth bound for `weights` sorted in non-increasing order.
///
/// # Panics
///
/// In debug builds, panics if `weights` is not sorted in non-increasing order.
///
/// # Examples
///
/// ```rust
/// # use binpack_bnb::bounds::lower_bound_l2;
/// // Five items of weight 6 are pairwise incompatible.
/// assert_eq!(lower_bound_l2(&[6u32, 6, 6, 6, 6], 10), 5);
/// ```
pub fn lower_bound_l2<T>(weights: &[T], capacity: T) -> usize
where
    T: PackingNumeric,
{
    debug_assert!(
        is_non_increasing(weights),
        "called `lower_bound_l2` with weights that are not sorted in non-increasing order"
    );

    if weights.is_empty() {
        return 0;
    }

    let volume = lower_bound_l1(weights, capacity);
    let half = half_capacity(capacity);

    if weights[0] <= half {
        return volume.max(small_items_bound(weights, capacity));
    }

    // Thresholds: 0, then every distinct weight <= C/2 (descending).
    let first_small = weights.partition_point(|&w| w > half);
    let mut best = volume.max(threshold_bound(weights, capacity, T::zero()));
    let mut previous: Option<T> = None;
    for &k in &weights[first_small..] {
        if previous == Some(k) {
            continue;
        }
        previous = Some(k);
        best = best.max(threshold_bound(weights, capacity, k));
    }

    best
}

#[inline(always)]
fn half_capacity<T>(capacity: T) -> T
where
    T: PackingNumeric,
{
    capacity / (T::one() + T::one())
}

fn is_non_increasing<T>(weights: &[T]) -> bool
where
    T: PackingNumeric,
{
    weights.windows(2).all(|w| w[0] >= w[1])
}

/// `L(K)` for a single threshold `k <= C/2`.
fn threshold_bound<T>(weights: &[T], capacity: T, k: T) -> usize
where
    T: PackingNumeric,
{
    let half = half_capacity(capacity);
    let upper = capacity - k;

    let mut n1 = 0usize;
    let mut n2 = 0usize;
    let mut n2_residual = 0u128;
    let mut n3_sum = 0u128;

    for &w in weights {
        if w > upper {
            n1 += 1;
        } else if w > half {
            n2 += 1;
            n2_residual = n2_residual.saturating_add((capacity - w).to_u128_saturating());
        } else if w >= k {
            n3_sum = n3_sum.saturating_add(w.to_u128_saturating());
        } else {
            break;
        }
    }

    let excess = n3_sum.saturating_sub(n2_residual);
    n1 + n2 + bins_for_volume(excess, capacity)
}

/// Bucket bound for instances whose largest weight is `<= C/2`.
///
/// Items `0..j` all satisfy `floor(C / w) <= r`, so no bin holds more than `r`
/// of them and at least `ceil(j / r)` bins are needed. `r` grows as the scan
/// moves to smaller items; the scan stops once `ceil(n / r)` can no longer
/// improve the best bound found.
fn small_items_bound<T>(weights: &[T], capacity: T) -> usize
where
    T: PackingNumeric,
{
    let n = weights.len();
    if n == 0 {
        return 0;
    }

    let fit_count = |w: T| (capacity / w).to_usize_saturating();

    let mut best = 0usize;
    let mut ratio = fit_count(weights[0]);
    let mut i = 1;

    while i < n {
        let mut next = i;
        while next < n && fit_count(weights[next]) <= ratio {
            next += 1;
        }

        best = best.max(next.div_ceil(ratio));

        if next >= n {
            break;
        }

        let next_ratio = fit_count(weights[next]);
        if n.div_ceil(next_ratio) <= best {
            break;
        }

        i = next;
        ratio = next_ratio;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::{optimal_bins, random_sorted_weights};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_input_has_zero_bounds() {
        assert_eq!(lower_bounds::<u32>(&[], 10), LowerBounds { l1: 0, l2: 0 });
    }

    #[test]
    fn test_l1_is_ceil_of_volume() {
        assert_eq!(lower_bound_l1(&[6u32, 5, 4, 3, 2, 1], 10), 3);
        assert_eq!(lower_bound_l1(&[5u32, 5], 10), 1);
        assert_eq!(lower_bound_l1(&[1u32, 1, 1, 1], 2), 2);
    }

    #[test]
    fn test_l2_counts_pairwise_incompatible_items() {
        let weights = [6u32, 6, 6, 6, 6];
        assert_eq!(lower_bound_l1(&weights, 10), 3);
        assert_eq!(lower_bound_l2(&weights, 10), 5);
    }

    #[test]
    fn test_l2_small_items_bucket_bound() {
        // Only two items of weight 4 fit into a bin of capacity 10.
        assert_eq!(lower_bound_l2(&[4u32; 7], 10), 4);
        assert_eq!(lower_bound_l2(&[3u32; 10], 10), 4);
        assert_eq!(lower_bound_l2(&[10u32, 7, 7, 5, 5, 4], 20), 2);
    }

    #[test]
    fn test_l2_uses_positive_threshold() {
        // K = 0 gives 3, K = 33 gives 4.
        let weights = [70u32, 60, 50, 33, 33, 33, 11, 7, 3];
        assert_eq!(lower_bound_l1(&weights, 100), 3);
        assert_eq!(threshold_bound(&weights, 100, 0), 3);
        assert_eq!(threshold_bound(&weights, 100, 33), 4);
        assert_eq!(lower_bound_l2(&weights, 100), 4);
    }

    #[test]
    fn test_l2_single_item() {
        assert_eq!(lower_bound_l2(&[3u32], 10), 1);
        assert_eq!(lower_bound_l2(&[10u32], 10), 1);
    }

    #[test]
    fn test_l2_odd_capacity_half_boundary() {
        // 6 > 11/2 for both items, so they cannot share a bin.
        assert_eq!(lower_bound_l2(&[6u32, 6], 11), 2);
        assert_eq!(lower_bound_l2(&[5u32, 5], 11), 1);
    }

    #[test]
    fn test_l2_works_for_narrow_weight_types() {
        assert_eq!(lower_bound_l2(&[200u16, 150, 100, 60], 250), 3);
    }

    #[test]
    fn test_bounds_hold_when_total_weight_exceeds_weight_type() {
        assert_eq!(lower_bound_l1(&[200u8, 100], 255), 2);
        assert_eq!(lower_bound_l2(&[200u8, 100], 255), 2);

        let weights = [3_000_000_000u32, 3_000_000_000];
        assert_eq!(lower_bound_l1(&weights, 4_000_000_000), 2);
        assert_eq!(lower_bound_l2(&weights, 4_000_000_000), 2);

        // Many small items whose N3 sum overflows `u8`.
        let weights = [100u8; 9];
        assert_eq!(lower_bound_l1(&weights, 250), 4);
        assert_eq!(lower_bound_l2(&weights, 250), 5);
    }

    #[test]
    #[should_panic(expected = "not sorted in non-increasing order")]
    #[cfg(debug_assertions)]
    fn test_l2_rejects_unsorted_input_in_debug() {
        let _ = lower_bound_l2(&[1u32, 5], 10);
    }

    #[test]
    fn test_bounds_never_exceed_optimum_on_random_instances() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xB0B);
        for _ in 0..400 {
            let capacity = rng.random_range(5..=20);
            let weights = random_sorted_weights(&mut rng, 9, capacity);
            let bounds = lower_bounds(&weights, capacity);
            let optimum = optimal_bins(&weights, capacity);
            assert!(
                bounds.l1 <= bounds.l2 && bounds.l2 <= optimum,
                "bounds {} exceed optimum {} for {:?} with capacity {}",
                bounds,
                optimum,
                weights,
                capacity
            );
        }
    }
}
