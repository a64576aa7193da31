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

//! # Binpack Model
//!
//! Domain types shared by the bound, reduction and search crates of the exact
//! one-dimensional bin packing solver.
//!
//! ## Architecture
//!
//! * **`index`**: strongly typed `ItemIndex` and `BinIndex` wrappers, including the
//!   `BinIndex::UNASSIGNED` sentinel used by search buffers.
//! * **`num`**: the `PackingNumeric` bound collecting what the solver needs from a weight type.
//! * **`instance`**: validated, immutable `Instance` plus the `InstanceBuilder` that performs
//!   all validation eagerly.
//! * **`solution`**: the final per-item bin assignment handed to reporting layers.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: an `Instance` can only be obtained from a successful `InstanceBuilder::build`,
//!     so no solver component ever has to re-check weights against the capacity.
//! 2.  **Stable Identity**: items keep their discovery position as `ItemIndex`, because equal
//!     weights are common and the final report must be a bijection over original items.
//! 3.  **Overflow Freedom**: the builder rejects instances whose total weight does not fit in
//!     the weight type; every partial sum computed later is bounded by that total.

pub mod index;
pub mod instance;
pub mod num;
pub mod solution;
