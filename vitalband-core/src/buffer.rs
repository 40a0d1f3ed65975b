//! Fixed-Size Circular Buffer
//!
//! ## Overview
//!
//! Every piece of history the core keeps (event timestamps, smoothing
//! windows) lives in a ring whose size is fixed at compile time through
//! const generics. Pushing into a full ring overwrites the oldest slot and
//! hands the evicted value back, which is exactly what a running-sum filter
//! needs and what a bounded event history wants to discard.
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<u32, 5>:
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  0  │  1  │  2  │  3  │  4  │  ← Array indices
//! └─────┴─────┴─────┴─────┴─────┘
//!    ↑
//!    └── write_pos, wraps modulo N
//! ```
//!
//! Slots are `Option<T>` so that "never written" is distinguishable from any
//! real value, including zero. No `unsafe`, no `MaybeUninit`.
//!
//! ## Usage Example
//!
//! ```rust
//! use vitalband_core::buffer::CircularBuffer;
//!
//! let mut beats: CircularBuffer<u32, 3> = CircularBuffer::new();
//! beats.push(0);
//! beats.push(800);
//! beats.push(1600);
//! assert_eq!(beats.push(2400), Some(0));
//! assert_eq!(beats.last(), Some(&2400));
//! assert_eq!(beats.iter().copied().collect::<heapless::Vec<u32, 3>>(), [800, 1600, 2400]);
//! ```

/// Fixed-size ring of `Copy` values, oldest overwritten first
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - logical index 0 is the oldest stored value
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    data: [Option<T>; N],
    write_pos: usize,
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates a new empty buffer; usable in `static` contexts
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Stores `value`, returning the value it displaced when the buffer
    /// was already full
    pub fn push(&mut self, value: T) -> Option<T> {
        if N == 0 {
            return Some(value);
        }

        let evicted = if self.len == N { self.data[self.write_pos] } else { None };
        self.data[self.write_pos] = Some(value);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
        evicted
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Total number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Position the next `push` will write to
    pub fn write_index(&self) -> usize {
        self.write_pos
    }

    /// Most recently pushed value
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Value at logical `index` (0 = oldest, `len - 1` = newest)
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (write_pos = 2, full)
    /// Logical view:    [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let physical = if self.len < N { index } else { (self.write_pos + index) % N };
        self.data[physical].as_ref()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter { buffer: self, index: 0 }
    }

    /// Forget every stored value
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over circular buffer contents, oldest first
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'a, T, N> {}
