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

//! Explicit depth-first stack for the target search.
//!
//! Every expanded node owns one `SearchFrame`. The frame remembers where its
//! candidate scan resumes and what it has to undo when its child subtree is
//! exhausted: the item it placed, or the bin it opened. Keeping the frames on
//! the heap lets the search descend through thousands of items and bins
//! without growing the thread stack.

use binpack_model::num::PackingNumeric;

/// What a frame does once the subtree below it is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase<T> {
    /// Scanning candidates for the current bin. `placed` is the item whose
    /// subtree is being explored, if any.
    Scanning { next: usize, placed: Option<usize> },
    /// All candidates were tried and the next bin was opened. The previous
    /// residual is restored when the new bin is closed again.
    BinOpened { previous_residual: T },
}

/// A single expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFrame<T> {
    /// First candidate index of this node, used by the symmetry rule.
    pub start: usize,
    /// Whether the current bin was empty when the node was entered.
    pub fresh: bool,
    pub phase: FramePhase<T>,
}

impl<T> SearchFrame<T>
where
    T: PackingNumeric,
{
    /// A frame that starts scanning at `start`.
    #[inline]
    pub fn scanning(start: usize, fresh: bool) -> Self {
        Self {
            start,
            fresh,
            phase: FramePhase::Scanning {
                next: start,
                placed: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchStack<T> {
    frames: Vec<SearchFrame<T>>,
}

impl<T> Default for SearchStack<T>
where
    T: PackingNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchStack<T>
where
    T: PackingNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Creates a stack sized for a search over `num_items` items. A path
    /// holds at most one frame per placed item and one per opened bin.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            frames: Vec::with_capacity(num_items.saturating_mul(2).saturating_add(1)),
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn push(&mut self, frame: SearchFrame<T>) {
        self.frames.push(frame);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<SearchFrame<T>> {
        self.frames.pop()
    }

    /// Clears all frames but keeps the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    /// Ensures room for a search over `num_items` items.
    #[inline]
    pub fn ensure_capacity(&mut self, num_items: usize) {
        let wanted = num_items.saturating_mul(2).saturating_add(1);
        if self.frames.capacity() < wanted {
            self.frames.reserve(wanted - self.frames.len());
        }
    }
}
