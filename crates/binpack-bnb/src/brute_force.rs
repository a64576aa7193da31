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

//! Exhaustive reference solver for tiny instances, used by tests to check
//! bounds, reduction, the target search and the driver against ground truth.
//! Weights may come in any order.

/// Returns `true` if `weights` can be packed into at most `bins` bins.
pub fn fits_in_bins(weights: &[u32], capacity: u32, bins: usize) -> bool {
    fn place(weights: &[u32], item: usize, loads: &mut Vec<u32>, capacity: u32, bins: usize) -> bool {
        if item == weights.len() {
            return true;
        }
        let weight = weights[item];
        for b in 0..loads.len() {
            if loads[b] + weight <= capacity {
                loads[b] += weight;
                if place(weights, item + 1, loads, capacity, bins) {
                    return true;
                }
                loads[b] -= weight;
            }
        }
        if loads.len() < bins {
            loads.push(weight);
            if place(weights, item + 1, loads, capacity, bins) {
                return true;
            }
            loads.pop();
        }
        false
    }

    let mut loads = Vec::with_capacity(bins);
    place(weights, 0, &mut loads, capacity, bins)
}

/// Returns the minimum number of bins needed for `weights`.
pub fn optimal_bins(weights: &[u32], capacity: u32) -> usize {
    (0..=weights.len())
        .find(|&bins| fits_in_bins(weights, capacity, bins))
        .unwrap_or(weights.len())
}

/// Draws a random instance sorted in non-increasing order.
pub fn random_sorted_weights<R>(rng: &mut R, max_items: usize, capacity: u32) -> Vec<u32>
where
    R: rand::Rng,
{
    let n = rng.random_range(0..=max_items);
    let mut weights: Vec<u32> = (0..n).map(|_| rng.random_range(1..=capacity)).collect();
    weights.sort_unstable_by(|a, b| b.cmp(a));
    weights
}
