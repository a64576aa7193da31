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

//! Validated bin packing instances.
//!
//! An `Instance` is built once from raw weights through `InstanceBuilder`, which
//! checks every invariant the solver relies on before any bound or search work
//! runs. Afterwards the instance is immutable and offers two views of the same
//! items: discovery order (the identity used in the final report) and
//! non-increasing weight order (the working order of every solver component).

use crate::{index::ItemIndex, num::PackingNumeric};
use thiserror::Error;

/// Reasons an instance is rejected before solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError<T>
where
    T: std::fmt::Display + std::fmt::Debug,
{
    /// The bin capacity must be positive.
    #[error("bin capacity must be positive")]
    ZeroCapacity,
    /// Item weights must be positive.
    #[error("item {item} has zero weight")]
    ZeroWeight { item: ItemIndex },
    /// An item that does not fit into an empty bin makes the instance infeasible.
    #[error("item {item} has weight {weight} which exceeds the bin capacity {capacity}")]
    WeightExceedsCapacity {
        item: ItemIndex,
        weight: T,
        capacity: T,
    },
}

/// A single item: its stable identity and its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item<T> {
    index: ItemIndex,
    weight: T,
}

impl<T> Item<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(index: ItemIndex, weight: T) -> Self {
        Self { index, weight }
    }

    /// Returns the index of the item in discovery order.
    #[inline]
    pub fn index(&self) -> ItemIndex {
        self.index
    }

    /// Returns the weight of the item.
    #[inline]
    pub fn weight(&self) -> T {
        self.weight
    }
}

impl<T> std::fmt::Display for Item<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item(index: {}, weight: {})", self.index, self.weight)
    }
}

/// An immutable, validated bin packing instance.
///
/// Invariants established by `InstanceBuilder::build`:
/// - `capacity > 0`
/// - every weight is in `1..=capacity`
/// - `sorted_weights` is non-increasing and `sorted_items[k]` is the item whose
///   weight is `sorted_weights[k]`; equal weights keep discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<T> {
    capacity: T,
    total_weight: u128,
    weights: Vec<T>,             // len = num_items, discovery order
    sorted_items: Vec<ItemIndex>, // len = num_items, non-increasing weight
    sorted_weights: Vec<T>,      // len = num_items, non-increasing
}

impl<T> Instance<T>
where
    T: PackingNumeric,
{
    /// Returns the bin capacity.
    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns the number of items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if the instance has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the sum of all item weights.
    ///
    /// The sum is widened to `u128`, so it never overflows for instances that
    /// fit into memory.
    #[inline]
    pub fn total_weight(&self) -> u128 {
        self.total_weight
    }

    /// Returns the weights in discovery order.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Returns the weight of the given item.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not in `0..num_items()`.
    #[inline]
    pub fn weight(&self, item: ItemIndex) -> T {
        let index = item.get();
        assert!(
            index < self.num_items(),
            "called `Instance::weight` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index
        );
        self.weights[index]
    }

    /// Returns the given item.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not in `0..num_items()`.
    #[inline]
    pub fn item(&self, item: ItemIndex) -> Item<T> {
        Item::new(item, self.weight(item))
    }

    /// Returns an iterator over all items in discovery order.
    #[inline]
    pub fn items(&self) -> impl ExactSizeIterator<Item = Item<T>> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Item::new(ItemIndex::new(i), w))
    }

    /// Returns the item identities in non-increasing weight order.
    #[inline]
    pub fn sorted_items(&self) -> &[ItemIndex] {
        &self.sorted_items
    }

    /// Returns the weights in non-increasing order.
    #[inline]
    pub fn sorted_weights(&self) -> &[T] {
        &self.sorted_weights
    }
}

impl<T> std::fmt::Display for Instance<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(items: {}, capacity: {}, total_weight: {})",
            self.num_items(),
            self.capacity,
            self.total_weight
        )
    }
}

/// Mutable builder collecting raw weights for an `Instance`.
///
/// All validation happens in `build`, so weights may be added in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceBuilder<T> {
    capacity: T,
    weights: Vec<T>,
}

impl<T> InstanceBuilder<T>
where
    T: PackingNumeric,
{
    /// Creates a builder for bins of the given capacity.
    #[inline]
    pub fn new(capacity: T) -> Self {
        Self {
            capacity,
            weights: Vec::new(),
        }
    }

    /// Creates a builder with room for `num_items` weights.
    #[inline]
    pub fn with_capacity(capacity: T, num_items: usize) -> Self {
        Self {
            capacity,
            weights: Vec::with_capacity(num_items),
        }
    }

    /// Adds an item and returns its identity.
    #[inline]
    pub fn add_item(&mut self, weight: T) -> ItemIndex {
        let index = ItemIndex::new(self.weights.len());
        self.weights.push(weight);
        index
    }

    /// Adds all weights yielded by `weights`, in order.
    #[inline]
    pub fn add_items<I>(&mut self, weights: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.weights.extend(weights);
        self
    }

    /// Returns the number of items added so far.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    /// Validates the collected weights and builds the instance.
    ///
    /// The first violated invariant is reported, checking items in discovery order.
    pub fn build(self) -> Result<Instance<T>, InstanceError<T>> {
        let capacity = self.capacity;
        if capacity.is_zero() {
            return Err(InstanceError::ZeroCapacity);
        }

        let mut total_weight = 0u128;
        for (i, &weight) in self.weights.iter().enumerate() {
            let item = ItemIndex::new(i);
            if weight.is_zero() {
                return Err(InstanceError::ZeroWeight { item });
            }
            if weight > capacity {
                return Err(InstanceError::WeightExceedsCapacity {
                    item,
                    weight,
                    capacity,
                });
            }
            total_weight = total_weight.saturating_add(weight.to_u128_saturating());
        }

        let weights = self.weights;
        let mut sorted_items: Vec<ItemIndex> = (0..weights.len()).map(ItemIndex::new).collect();
        // Stable: equal weights keep discovery order.
        sorted_items.sort_by(|a, b| weights[b.get()].cmp(&weights[a.get()]));
        let sorted_weights = sorted_items.iter().map(|i| weights[i.get()]).collect();

        Ok(Instance {
            capacity,
            total_weight,
            weights,
            sorted_items,
            sorted_weights,
        })
    }
}

impl<T> Instance<T>
where
    T: PackingNumeric,
{
    /// Convenience constructor validating `weights` against `capacity`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use binpack_model::instance::Instance;
    ///
    /// let instance = Instance::from_weights(10u32, [6, 5, 4, 3, 2, 1]).unwrap();
    /// assert_eq!(instance.num_items(), 6);
    /// assert_eq!(instance.total_weight(), 21);
    /// assert_eq!(instance.sorted_weights(), &[6, 5, 4, 3, 2, 1]);
    /// ```
    pub fn from_weights<I>(capacity: T, weights: I) -> Result<Self, InstanceError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut builder = InstanceBuilder::new(capacity);
        builder.add_items(weights);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    #[test]
    fn test_build_sorts_descending_and_keeps_identity() {
        let instance = Instance::from_weights(10u32, [3, 7, 3, 9, 1]).unwrap();

        assert_eq!(instance.capacity(), 10);
        assert_eq!(instance.num_items(), 5);
        assert_eq!(instance.total_weight(), 23);
        assert_eq!(instance.weights(), &[3, 7, 3, 9, 1]);
        assert_eq!(instance.sorted_weights(), &[9, 7, 3, 3, 1]);
        assert_eq!(instance.sorted_items(), &[ii(3), ii(1), ii(0), ii(2), ii(4)]);
    }

    #[test]
    fn test_equal_weights_keep_discovery_order() {
        let instance = Instance::from_weights(10u32, [5, 5, 5, 5]).unwrap();
        assert_eq!(instance.sorted_items(), &[ii(0), ii(1), ii(2), ii(3)]);
    }

    #[test]
    fn test_weight_exceeding_capacity_is_rejected() {
        let err = Instance::from_weights(10u32, [4, 11, 3]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::WeightExceedsCapacity {
                item: ii(1),
                weight: 11,
                capacity: 10
            }
        );
        assert_eq!(
            err.to_string(),
            "item ItemIndex(1) has weight 11 which exceeds the bin capacity 10"
        );
    }

    #[test]
    fn test_weight_equal_to_capacity_is_accepted() {
        let instance = Instance::from_weights(10u32, [10, 10]).unwrap();
        assert_eq!(instance.total_weight(), 20);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = Instance::from_weights(0u32, [1]).unwrap_err();
        assert_eq!(err, InstanceError::ZeroCapacity);
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let err = Instance::from_weights(10u32, [1, 0]).unwrap_err();
        assert_eq!(err, InstanceError::ZeroWeight { item: ii(1) });
    }

    #[test]
    fn test_total_weight_beyond_weight_type_is_accepted() {
        let instance = Instance::from_weights(255u8, [200, 100]).unwrap();
        assert_eq!(instance.total_weight(), 300);

        let instance = Instance::from_weights(4_000_000_000u32, [3_000_000_000, 3_000_000_000]).unwrap();
        assert_eq!(instance.total_weight(), 6_000_000_000);
    }

    #[test]
    fn test_empty_instance_is_valid() {
        let instance = Instance::<u32>::from_weights(10, []).unwrap();
        assert!(instance.is_empty());
        assert_eq!(instance.total_weight(), 0);
    }

    #[test]
    fn test_builder_assigns_sequential_indices() {
        let mut builder = InstanceBuilder::with_capacity(8u16, 3);
        assert_eq!(builder.add_item(2), ii(0));
        assert_eq!(builder.add_item(5), ii(1));
        builder.add_items([1, 1]);
        assert_eq!(builder.num_items(), 4);

        let instance = builder.build().unwrap();
        assert_eq!(instance.item(ii(1)), Item::new(ii(1), 5));
        let items: Vec<_> = instance.items().map(|item| item.weight()).collect();
        assert_eq!(items, vec![2, 5, 1, 1]);
    }

    #[test]
    #[should_panic(expected = "called `Instance::weight` with item index out of bounds")]
    fn test_weight_panics_out_of_bounds() {
        let instance = Instance::from_weights(10u32, [1]).unwrap();
        let _ = instance.weight(ii(1));
    }
}
