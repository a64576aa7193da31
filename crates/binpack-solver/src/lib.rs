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

//! # Binpack Solver
//!
//! Proves optimal bin counts for one-dimensional bin packing with the
//! Martello-Toth procedure and maps the result back onto the original items.
//!
//! ## Flow
//!
//! 1. Reduce the sorted weights to fixed bins plus a residual multiset.
//! 2. `LB = fixed + L2(residual)`, `UB = min(FFD, BFD)` on the full instance.
//! 3. If `LB == UB` the heuristic packing is optimal.
//! 4. Otherwise search the residual for every target from `LB - fixed` upward,
//!    stopping at the first one that packs or once `UB - fixed` is reached.
//! 5. Reconstruct a bijective item-to-bin assignment.
//!
//! A target aborted by the time limit or an interrupt is never treated as a
//! proof; the outcome then reports `TerminationReason::Aborted`.
//!
//! ## Usage
//!
//! ```rust
//! use binpack_solver::solver::SolverBuilder;
//! use std::time::Duration;
//!
//! let mut solver = SolverBuilder::<u32>::new()
//!     .with_time_limit(Duration::from_secs(5))
//!     .build();
//! let outcome = solver.solve_weights([10, 7, 7, 5, 5, 4], 20).unwrap();
//! assert!(outcome.is_optimal());
//! assert_eq!(outcome.num_bins(), 2);
//! ```

pub mod config;
pub mod error;
pub mod reconstruct;
pub mod result;
pub mod solver;
pub mod stats;
