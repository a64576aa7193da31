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

//! Search state for a single target search.
//!
//! `SearchState` is the arena every search frame works on: the used marks,
//! the per-item bin assignment, and the bin currently being filled together
//! with its residual capacity. Per-node values such as the scan cursor live in
//! the frames of `stack::SearchStack`.
//!
//! Invariants (debug-checked):
//! - `num_packed` equals the number of set used marks.
//! - An item is marked used iff its assignment is not `BinIndex::UNASSIGNED`.
//! - `residual <= capacity` of the current bin.

use binpack_model::{index::BinIndex, num::PackingNumeric};
use fixedbitset::FixedBitSet;

#[derive(Debug, Clone)]
pub struct SearchState<T> {
    assignment: Vec<BinIndex>,
    used: FixedBitSet,
    current_bin: BinIndex,
    residual: T,
    num_packed: usize,
}

impl<T> SearchState<T>
where
    T: PackingNumeric,
{
    /// Creates a state with no item packed and bin `0` open and empty.
    #[inline]
    pub fn new(num_items: usize, capacity: T) -> Self {
        Self {
            assignment: vec![BinIndex::UNASSIGNED; num_items],
            used: FixedBitSet::with_capacity(num_items),
            current_bin: BinIndex::new(0),
            residual: capacity,
            num_packed: 0,
        }
    }

    #[inline]
    pub fn num_items(&self) -> usize {
        self.assignment.len()
    }

    #[inline]
    pub fn num_packed(&self) -> usize {
        self.num_packed
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_packed == self.assignment.len()
    }

    /// The bin currently being filled.
    #[inline]
    pub fn current_bin(&self) -> BinIndex {
        self.current_bin
    }

    /// Residual capacity of the current bin.
    #[inline]
    pub fn residual(&self) -> T {
        self.residual
    }

    /// Returns `true` if the item at `item` has been placed.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of bounds.
    #[inline]
    pub fn is_used(&self, item: usize) -> bool {
        assert!(
            item < self.num_items(),
            "called `SearchState::is_used` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            item
        );
        self.used.contains(item)
    }

    /// The bin assigned to `item`, or `BinIndex::UNASSIGNED`.
    #[inline]
    pub fn bin_of(&self, item: usize) -> BinIndex {
        self.assignment[item]
    }

    /// Places `item` with `weight` into the current bin.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the item is already used or does not fit.
    #[inline]
    pub fn place(&mut self, item: usize, weight: T) {
        debug_assert!(
            !self.used.contains(item),
            "called `SearchState::place` with item {} which is already placed",
            item
        );
        debug_assert!(
            weight <= self.residual,
            "called `SearchState::place` with weight {} exceeding the residual {}",
            weight,
            self.residual
        );

        self.used.insert(item);
        self.assignment[item] = self.current_bin;
        self.residual = self.residual - weight;
        self.num_packed += 1;
    }

    /// Reverts a previous [`SearchState::place`] of `item` with `weight`.
    #[inline]
    pub fn unplace(&mut self, item: usize, weight: T) {
        debug_assert!(
            self.used.contains(item) && self.assignment[item] == self.current_bin,
            "called `SearchState::unplace` with item {} which is not in the current bin",
            item
        );

        self.used.set(item, false);
        self.assignment[item] = BinIndex::UNASSIGNED;
        self.residual = self.residual + weight;
        self.num_packed -= 1;
    }

    /// Moves on to the next bin with full `capacity`. Returns the residual of
    /// the bin left behind, to be handed back to [`SearchState::close_bin`].
    #[inline]
    pub fn open_next_bin(&mut self, capacity: T) -> T {
        let previous = self.residual;
        self.current_bin = self.current_bin.offset(1);
        self.residual = capacity;
        previous
    }

    /// Reverts [`SearchState::open_next_bin`].
    #[inline]
    pub fn close_bin(&mut self, previous_residual: T) {
        debug_assert!(
            self.current_bin.get() > 0,
            "called `SearchState::close_bin` on the first bin"
        );
        self.current_bin = BinIndex::new(self.current_bin.get() - 1);
        self.residual = previous_residual;
    }

    /// Clears `out` and fills it with the weights of the unused items, keeping
    /// the order of `weights`.
    pub fn collect_unused_weights(&self, weights: &[T], out: &mut Vec<T>) {
        debug_assert_eq!(weights.len(), self.num_items());

        out.clear();
        out.extend(
            weights
                .iter()
                .enumerate()
                .filter(|(i, _)| !self.used.contains(*i))
                .map(|(_, &w)| w),
        );
    }

    #[inline]
    pub fn assignment(&self) -> &[BinIndex] {
        &self.assignment
    }

    #[inline]
    pub fn into_assignment(self) -> Vec<BinIndex> {
        self.assignment
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: PackingNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(bin: {}, residual: {}, packed: {}/{})",
            self.current_bin.get(),
            self.residual,
            self.num_packed,
            self.num_items()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = SearchState::new(3, 10u32);
        assert_eq!(state.num_packed(), 0);
        assert_eq!(state.current_bin(), BinIndex::new(0));
        assert_eq!(state.residual(), 10);
        assert!(!state.is_complete());
        assert!(state.assignment().iter().all(|b| b.is_unassigned()));
    }

    #[test]
    fn test_place_and_unplace_restore_state() {
        let mut state = SearchState::new(2, 10u32);
        state.place(1, 4);
        assert!(state.is_used(1));
        assert_eq!(state.bin_of(1), BinIndex::new(0));
        assert_eq!(state.residual(), 6);
        assert_eq!(state.num_packed(), 1);

        state.unplace(1, 4);
        assert!(!state.is_used(1));
        assert!(state.bin_of(1).is_unassigned());
        assert_eq!(state.residual(), 10);
        assert_eq!(state.num_packed(), 0);
    }

    #[test]
    fn test_open_and_close_bin() {
        let mut state = SearchState::new(2, 10u32);
        state.place(0, 7);
        let previous = state.open_next_bin(10);
        assert_eq!(previous, 3);
        assert_eq!(state.current_bin(), BinIndex::new(1));
        assert_eq!(state.residual(), 10);

        state.place(1, 5);
        assert_eq!(state.bin_of(1), BinIndex::new(1));
        assert!(state.is_complete());
        state.unplace(1, 5);

        state.close_bin(previous);
        assert_eq!(state.current_bin(), BinIndex::new(0));
        assert_eq!(state.residual(), 3);
    }

    #[test]
    fn test_collect_unused_weights_keeps_order() {
        let weights = [9u32, 7, 7, 2];
        let mut state = SearchState::new(4, 10u32);
        state.place(1, 7);
        let mut out = vec![42];
        state.collect_unused_weights(&weights, &mut out);
        assert_eq!(out, vec![9, 7, 2]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_is_used_out_of_bounds_panics() {
        let state = SearchState::new(1, 10u32);
        let _ = state.is_used(5);
    }

    #[test]
    fn test_display() {
        let mut state = SearchState::new(2, 10u32);
        state.place(0, 4);
        assert_eq!(
            state.to_string(),
            "SearchState(bin: 0, residual: 6, packed: 1/2)"
        );
    }
}
