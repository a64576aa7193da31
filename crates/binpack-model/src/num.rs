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

//! # Packing Numeric Trait
//!
//! `PackingNumeric` collects the integer capabilities the solver needs from an
//! item weight type: unsigned primitive arithmetic, hashing for the weight
//! index used during reconstruction, conversions for reporting, and
//! `Send + Sync` so instances can be shared between threads.
//!
//! Sums of weights may exceed `T` even when every single weight fits a bin.
//! Such sums are accumulated in `u128` via [`PackingNumeric::to_u128_saturating`].

use num_traits::{PrimInt, ToPrimitive, Unsigned};
use std::hash::Hash;

/// A trait alias for the unsigned integer types usable as item weights
/// (`u8`, `u16`, `u32`, `u64`, `usize`).
pub trait PackingNumeric:
    PrimInt
    + Unsigned
    + ToPrimitive
    + Hash
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Divides `self` by `divisor`, rounding up.
    ///
    /// Never overflows, unlike `(self + divisor - 1) / divisor`.
    #[inline(always)]
    fn div_ceil_val(self, divisor: Self) -> Self {
        let quotient = self / divisor;
        if (self % divisor).is_zero() {
            quotient
        } else {
            quotient + Self::one()
        }
    }

    /// Converts the value to `usize`, saturating at `usize::MAX`.
    #[inline(always)]
    fn to_usize_saturating(self) -> usize {
        self.to_usize().unwrap_or(usize::MAX)
    }

    /// Converts the value to `u128`, saturating at `u128::MAX`.
    #[inline(always)]
    fn to_u128_saturating(self) -> u128 {
        self.to_u128().unwrap_or(u128::MAX)
    }
}

impl<T> PackingNumeric for T where
    T: PrimInt
        + Unsigned
        + ToPrimitive
        + Hash
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}
