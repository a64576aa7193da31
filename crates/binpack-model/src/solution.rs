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

use crate::{
    index::{BinIndex, ItemIndex},
    instance::Instance,
    num::PackingNumeric,
};
use thiserror::Error;

/// Violations detected by `Solution::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolutionError {
    #[error("solution covers {found} items but the instance has {expected}")]
    ItemCountMismatch { expected: usize, found: usize },
    #[error("item {item} is not assigned to any bin")]
    Unassigned { item: ItemIndex },
    #[error("item {item} is assigned to {bin} but the solution only has {num_bins} bins")]
    BinOutOfRange {
        item: ItemIndex,
        bin: BinIndex,
        num_bins: usize,
    },
    #[error("item {item} carries a different weight than in the instance")]
    WeightMismatch { item: ItemIndex },
    #[error("{bin} is loaded beyond the bin capacity")]
    Overloaded { bin: BinIndex },
}

/// The final packing of an instance.
///
/// Data is indexed by `ItemIndex`: `bins[i]` is the bin of item `i` and
/// `weights[i]` its weight, so the pair list handed to reporting layers is
/// just a zip of both vectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    num_bins: usize,
    bins: Vec<BinIndex>,
    weights: Vec<T>,
}

impl<T> Solution<T>
where
    T: PackingNumeric,
{
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `bins` and `weights` have different lengths.
    pub fn new(num_bins: usize, bins: Vec<BinIndex>, weights: Vec<T>) -> Self {
        assert_eq!(
            bins.len(),
            weights.len(),
            "called Solution::new with inconsistent vector lengths: bins.len() = {}, weights.len() = {}",
            bins.len(),
            weights.len()
        );

        Self {
            num_bins,
            bins,
            weights,
        }
    }

    /// Returns the number of bins used.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Returns the number of items covered.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.bins.len()
    }

    /// Returns the bin assigned to the given item.
    #[inline]
    pub fn bin_for_item(&self, item: ItemIndex) -> BinIndex {
        let index = item.get();
        debug_assert!(
            index < self.num_items(),
            "called `Solution::bin_for_item` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index
        );

        self.bins[index]
    }

    /// Returns the bin of every item, indexed by `ItemIndex`.
    #[inline]
    pub fn bins(&self) -> &[BinIndex] {
        &self.bins
    }

    /// Returns the weight of every item, indexed by `ItemIndex`.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Returns `(weight, bin)` pairs in item order.
    #[inline]
    pub fn assignments(&self) -> impl ExactSizeIterator<Item = (T, BinIndex)> + '_ {
        self.weights.iter().copied().zip(self.bins.iter().copied())
    }

    /// Returns the items placed in `bin`, in item order.
    pub fn items_in_bin(&self, bin: BinIndex) -> Vec<ItemIndex> {
        self.bins
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == bin)
            .map(|(i, _)| ItemIndex::new(i))
            .collect()
    }

    /// Returns the summed weight of every bin.
    ///
    /// Items with a bin outside `0..num_bins()` are ignored.
    pub fn bin_loads(&self) -> Vec<T> {
        let mut loads = vec![T::zero(); self.num_bins];
        for (weight, bin) in self.assignments() {
            if let Some(load) = loads.get_mut(bin.get()) {
                *load = load.saturating_add(weight);
            }
        }
        loads
    }

    /// Returns the fraction of the total bin volume that is filled.
    pub fn utilization(&self, capacity: T) -> f64 {
        if self.num_bins == 0 {
            return 0.0;
        }
        let total: f64 = self
            .weights
            .iter()
            .map(|w| w.to_f64().unwrap_or(0.0))
            .sum();
        let volume = capacity.to_f64().unwrap_or(f64::INFINITY) * self.num_bins as f64;
        total / volume
    }

    /// Checks that this solution is a feasible packing of `instance`.
    pub fn validate(&self, instance: &Instance<T>) -> Result<(), SolutionError> {
        if self.num_items() != instance.num_items() {
            return Err(SolutionError::ItemCountMismatch {
                expected: instance.num_items(),
                found: self.num_items(),
            });
        }

        let capacity = instance.capacity().to_u128_saturating();
        let mut loads = vec![0u128; self.num_bins];
        for (i, (&weight, &bin)) in self.weights.iter().zip(self.bins.iter()).enumerate() {
            let item = ItemIndex::new(i);
            if bin.is_unassigned() {
                return Err(SolutionError::Unassigned { item });
            }
            if bin.get() >= self.num_bins {
                return Err(SolutionError::BinOutOfRange {
                    item,
                    bin,
                    num_bins: self.num_bins,
                });
            }
            if weight != instance.weight(item) {
                return Err(SolutionError::WeightMismatch { item });
            }
            let load = &mut loads[bin.get()];
            *load = load.saturating_add(weight.to_u128_saturating());
            if *load > capacity {
                return Err(SolutionError::Overloaded { bin });
            }
        }

        Ok(())
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Bins Used: {}", self.num_bins)?;
        writeln!(f)?;

        if self.num_items() == 0 {
            writeln!(f, "   (No items packed)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10} | {:<10}", "Bin", "Load", "Items")?;
        writeln!(f, "   {:-<10}-+-{:-<10}-+-{:-<10}", "", "", "")?;
        let loads = self.bin_loads();
        for (b, load) in loads.iter().enumerate() {
            let items: Vec<String> = self
                .items_in_bin(BinIndex::new(b))
                .iter()
                .map(|i| format!("{}:{}", i.get(), self.weights[i.get()]))
                .collect();
            writeln!(f, "   {:<10} | {:<10} | {}", b, load, items.join(" "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(i: usize) -> BinIndex {
        BinIndex::new(i)
    }

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    #[test]
    fn test_new_and_basic_accessors() {
        let sol = Solution::new(2, vec![bi(0), bi(1), bi(0)], vec![6u32, 5, 4]);

        assert_eq!(sol.num_bins(), 2);
        assert_eq!(sol.num_items(), 3);
        assert_eq!(sol.bin_for_item(ii(2)), bi(0));
        assert_eq!(sol.items_in_bin(bi(0)), vec![ii(0), ii(2)]);
        assert_eq!(sol.bin_loads(), vec![10, 5]);

        let pairs: Vec<_> = sol.assignments().collect();
        assert_eq!(pairs, vec![(6, bi(0)), (5, bi(1)), (4, bi(0))]);
    }

    #[test]
    #[should_panic(expected = "called Solution::new with inconsistent vector lengths")]
    fn test_new_panics_on_length_mismatch() {
        let _ = Solution::new(1, vec![bi(0), bi(0)], vec![1u32]);
    }

    #[test]
    fn test_utilization() {
        let sol = Solution::new(2, vec![bi(0), bi(1), bi(0)], vec![6u32, 5, 4]);
        assert!((sol.utilization(10) - 0.75).abs() < 1e-12);
        let empty = Solution::<u32>::new(0, Vec::new(), Vec::new());
        assert_eq!(empty.utilization(10), 0.0);
    }

    #[test]
    fn test_validate_accepts_feasible_packing() {
        let instance = Instance::from_weights(10u32, [6, 5, 4]).unwrap();
        let sol = Solution::new(2, vec![bi(0), bi(1), bi(0)], vec![6, 5, 4]);
        assert_eq!(sol.validate(&instance), Ok(()));
    }

    #[test]
    fn test_validate_rejects_overloaded_bin() {
        let instance = Instance::from_weights(10u32, [6, 5, 4]).unwrap();
        let sol = Solution::new(2, vec![bi(0), bi(0), bi(1)], vec![6, 5, 4]);
        assert_eq!(
            sol.validate(&instance),
            Err(SolutionError::Overloaded { bin: bi(0) })
        );
    }

    #[test]
    fn test_validate_detects_overload_beyond_weight_type() {
        let instance = Instance::from_weights(u8::MAX, [200, 100]).unwrap();
        let shared = Solution::new(1, vec![bi(0), bi(0)], vec![200, 100]);
        assert_eq!(
            shared.validate(&instance),
            Err(SolutionError::Overloaded { bin: bi(0) })
        );

        let split = Solution::new(2, vec![bi(0), bi(1)], vec![200, 100]);
        assert_eq!(split.validate(&instance), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unassigned_and_out_of_range() {
        let instance = Instance::from_weights(10u32, [6, 5]).unwrap();

        let unassigned = Solution::new(1, vec![bi(0), BinIndex::UNASSIGNED], vec![6, 5]);
        assert_eq!(
            unassigned.validate(&instance),
            Err(SolutionError::Unassigned { item: ii(1) })
        );

        let out_of_range = Solution::new(1, vec![bi(0), bi(1)], vec![6, 5]);
        assert_eq!(
            out_of_range.validate(&instance),
            Err(SolutionError::BinOutOfRange {
                item: ii(1),
                bin: bi(1),
                num_bins: 1
            })
        );
    }

    #[test]
    fn test_validate_rejects_count_and_weight_mismatch() {
        let instance = Instance::from_weights(10u32, [6, 5]).unwrap();

        let short = Solution::new(1, vec![bi(0)], vec![6]);
        assert_eq!(
            short.validate(&instance),
            Err(SolutionError::ItemCountMismatch {
                expected: 2,
                found: 1
            })
        );

        let swapped = Solution::new(2, vec![bi(0), bi(1)], vec![5, 6]);
        assert_eq!(
            swapped.validate(&instance),
            Err(SolutionError::WeightMismatch { item: ii(0) })
        );
    }

    #[test]
    fn test_display_formatting_example() {
        let sol = Solution::new(2, vec![bi(0), bi(1), bi(0)], vec![6u32, 5, 4]);

        let displayed = format!("{}", sol);

        let mut expected = String::new();
        expected.push_str("Solution Summary\n");
        expected.push_str("   Bins Used: 2\n");
        expected.push('\n');
        expected.push_str("   Bin        | Load       | Items     \n");
        expected.push_str("   -----------+------------+-----------\n");
        expected.push_str("   0          | 10         | 0:6 2:4\n");
        expected.push_str("   1          | 5          | 1:5\n");

        assert_eq!(displayed, expected);
    }
}
