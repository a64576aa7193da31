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

use binpack_model::instance::InstanceError;
use thiserror::Error;

/// The weight-to-identity mapping could not produce a bijection.
///
/// `total_bins` is the bin count of the solution being reconstructed. Any of
/// these errors signals a broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructionError<T>
where
    T: std::fmt::Display + std::fmt::Debug,
{
    #[error("no unclaimed item of weight {weight} left for bin {bin} (total bins {total_bins})")]
    NoUnclaimedItem {
        total_bins: usize,
        bin: usize,
        weight: T,
    },
    #[error("slot {position} of weight {weight} has no bin (total bins {total_bins})")]
    UnassignedSlot {
        total_bins: usize,
        position: usize,
        weight: T,
    },
    #[error("{count} items were never claimed (total bins {total_bins})")]
    UnclaimedItems { total_bins: usize, count: usize },
}

/// Errors returned by [`crate::solver::MtpSolver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError<T>
where
    T: std::fmt::Display + std::fmt::Debug,
{
    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] InstanceError<T>),
    #[error("solution reconstruction failed: {0}")]
    Reconstruction(#[from] ReconstructionError<T>),
}
