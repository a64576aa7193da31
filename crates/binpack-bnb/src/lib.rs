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

//! Binpack-BnB: exact search for one-dimensional bin packing
//!
//! This crate holds every algorithmic building block of the Martello-Toth
//! procedure. The driver in `binpack_solver` composes them into the full solve.
//!
//! Core flow
//! - `reduction::reduce` pre-commits items that provably belong in a bin of their own,
//!   or with an exact complement.
//! - `bounds` computes the L1 (volume) and L2 (Martello-Toth) lower bounds.
//! - `heuristics` produces first-fit and best-fit decreasing packings as upper bounds.
//! - `bnb::BnbSolver` decides, for one target bin count, whether the residual items fit.
//!
//! Design highlights
//! - Bin-oriented branching: bins are filled one at a time, items within a bin are
//!   taken in descending weight order, and a fresh bin always starts with the
//!   largest unused item (the must-fill dominance rule).
//! - Equal weights are never tried twice at the same decision point.
//! - Per-target results are tri-state: packed, proven infeasible, or aborted by a monitor.
//!   An aborted target never counts as a proof.
//!
//! Module map
//! - `bnb`: the target search engine and session.
//! - `bounds`: lower bounds.
//! - `heuristics`: greedy upper bounds.
//! - `monitor`: tree-search monitors (time limit, interrupt, log, composite).
//! - `reduction`: fixed bins produced by the dominance rules.
//! - `result`: target outcomes.
//! - `stack`: the explicit frame stack driving the depth-first search.
//! - `state`: the used-mark and assignment arena shared by all search frames.
//! - `stats`: counters and timing.
//! - `brute_force` (tests and the `test-utils` feature): exhaustive reference optimum.

pub mod bnb;
pub mod bounds;
pub mod heuristics;
pub mod monitor;
pub mod reduction;
pub mod result;
pub mod stack;
pub mod state;
pub mod stats;

#[cfg(any(test, feature = "test-utils"))]
pub mod brute_force;
