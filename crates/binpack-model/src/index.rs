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

//! # Strongly Typed Indices
//!
//! `TypedIndex<T>` wraps a `usize` and carries a phantom tag, so an item index can
//! never be passed where a bin index is expected. The wrapper is
//! `#[repr(transparent)]` and compiles down to a plain `usize`.
//!
//! ```rust
//! use binpack_model::index::{BinIndex, ItemIndex};
//!
//! let item = ItemIndex::new(3);
//! let bin = BinIndex::new(1);
//! assert_eq!(format!("{}", item), "ItemIndex(3)");
//! assert_eq!(bin.get(), 1);
//! assert!(BinIndex::UNASSIGNED.is_unassigned());
//! ```

/// A tag giving a typed index its display name.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index tagged with the index space it belongs to.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize`.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index shifted by `offset`.
    #[inline(always)]
    pub const fn offset(&self, offset: usize) -> Self {
        Self::new(self.index + offset)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

/// A tag type for item indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ItemIndexTag;

impl TypedIndexTag for ItemIndexTag {
    const NAME: &'static str = "ItemIndex";
}

/// The stable identity of an item: its position in the input sequence.
pub type ItemIndex = TypedIndex<ItemIndexTag>;

/// A tag type for bin indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BinIndexTag;

impl TypedIndexTag for BinIndexTag {
    const NAME: &'static str = "BinIndex";
}

/// A typed index for bins.
pub type BinIndex = TypedIndex<BinIndexTag>;

impl TypedIndex<BinIndexTag> {
    /// Sentinel marking an item that is not placed in any bin.
    pub const UNASSIGNED: Self = Self::new(usize::MAX);

    /// Returns `true` if this is the `UNASSIGNED` sentinel.
    #[inline(always)]
    pub const fn is_unassigned(&self) -> bool {
        self.index == usize::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_debug_use_tag_name() {
        assert_eq!(format!("{}", ItemIndex::new(7)), "ItemIndex(7)");
        assert_eq!(format!("{:?}", BinIndex::new(2)), "BinIndex(2)");
    }

    #[test]
    fn test_conversions_round_trip_through_usize() {
        let bin: BinIndex = 4usize.into();
        let raw: usize = bin.into();
        assert_eq!(raw, 4);
    }

    #[test]
    fn test_unassigned_sentinel() {
        assert!(BinIndex::UNASSIGNED.is_unassigned());
        assert!(!BinIndex::new(0).is_unassigned());
    }

    #[test]
    fn test_offset_shifts_index() {
        assert_eq!(BinIndex::new(2).offset(3), BinIndex::new(5));
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        let mut items = vec![ItemIndex::new(3), ItemIndex::new(0), ItemIndex::new(2)];
        items.sort();
        assert_eq!(
            items,
            vec![ItemIndex::new(0), ItemIndex::new(2), ItemIndex::new(3)]
        );
    }
}
