//! Fixed-capacity stack arena and the allocator handle that draws from it.
//!
//! [`StackStorage`] accounts for `N` bytes with a cursor. Values live in the
//! containers' own slots; the arena decides how many of them fit. Reservations
//! bump the cursor forward after padding to the requested alignment; releasing
//! the most recent block rolls the cursor back, while releasing anything older
//! is a no-op. Space is therefore reclaimed only in LIFO order.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use crate::allocator::{array_layout, Allocator, Block};
use crate::error::AllocError;
use crate::stats::{ArenaCounters, ArenaStats};

/// An `N`-byte arena with a bump cursor.
///
/// The storage must outlive every allocator and container that draws from it;
/// the borrow checker enforces this through [`StackAllocator`]'s lifetime.
pub struct StackStorage<const N: usize> {
    cursor: Cell<usize>,
    counters: ArenaCounters,
}

impl<const N: usize> StackStorage<N> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: Cell::new(0),
            counters: ArenaCounters::new(),
        }
    }

    /// Total capacity in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes below the cursor, including alignment padding.
    #[must_use]
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes above the cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        N - self.cursor.get()
    }

    /// Reserve `size` bytes aligned to `align`.
    ///
    /// On failure the cursor is left untouched. An `align` that is not a
    /// power of two is rejected with [`AllocError::InvalidAlignment`].
    pub fn get_memory(&self, size: usize, align: usize) -> Result<Block, AllocError> {
        if !align.is_power_of_two() {
            self.counters.record_failure();
            return Err(AllocError::InvalidAlignment { align });
        }
        let cursor = self.cursor.get();
        let padding = (align - cursor % align) % align;
        let span = cursor
            .checked_add(padding)
            .and_then(|offset| Some((offset, offset.checked_add(size)?)))
            .filter(|&(_, end)| end <= N);
        match span {
            Some((offset, end)) => {
                self.cursor.set(end);
                self.counters.record_allocation();
                Ok(Block {
                    offset,
                    size,
                    align,
                })
            }
            None => {
                self.counters.record_failure();
                tracing::debug!(
                    requested = size,
                    align,
                    available = N - cursor,
                    capacity = N,
                    "stack arena exhausted"
                );
                Err(AllocError::Exhausted {
                    requested: size,
                    align,
                    available: N - cursor,
                    capacity: N,
                })
            }
        }
    }

    /// Hand back a block. The cursor rolls back only if `block` ends exactly
    /// at the cursor.
    pub fn release(&self, block: Block) {
        self.counters.record_deallocation();
        if block.end() == self.cursor.get() {
            self.cursor.set(block.offset);
            self.counters.record_rollback();
        }
    }

    /// Activity counters since creation or the last reset.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        self.counters.snapshot()
    }

    /// Zero the activity counters.
    pub fn reset_stats(&self) {
        self.counters.reset();
    }
}

impl<const N: usize> Default for StackStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for StackStorage<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackStorage")
            .field("capacity", &N)
            .field("used", &self.used())
            .finish_non_exhaustive()
    }
}

/// Allocator handle over a shared [`StackStorage`].
///
/// Handles are `Copy`; two handles compare equal when they draw from the same
/// storage, regardless of element type.
pub struct StackAllocator<'a, T, const N: usize> {
    storage: &'a StackStorage<N>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T, const N: usize> StackAllocator<'a, T, N> {
    /// Create a handle drawing from `storage`.
    #[must_use]
    pub fn new(storage: &'a StackStorage<N>) -> Self {
        Self {
            storage,
            _marker: PhantomData,
        }
    }

    /// The storage this handle draws from.
    #[must_use]
    pub fn storage(&self) -> &'a StackStorage<N> {
        self.storage
    }
}

impl<'a, T, U, const N: usize> From<&StackAllocator<'a, U, N>> for StackAllocator<'a, T, N> {
    fn from(other: &StackAllocator<'a, U, N>) -> Self {
        Self::new(other.storage)
    }
}

impl<T, const N: usize> Clone for StackAllocator<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for StackAllocator<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for StackAllocator<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackAllocator")
            .field("storage", &std::ptr::from_ref(self.storage))
            .field("capacity", &N)
            .finish()
    }
}

impl<'b, T, U, const N: usize, const M: usize> PartialEq<StackAllocator<'b, U, M>>
    for StackAllocator<'_, T, N>
{
    fn eq(&self, other: &StackAllocator<'b, U, M>) -> bool {
        let lhs: *const StackStorage<N> = self.storage;
        let rhs: *const StackStorage<M> = other.storage;
        N == M && std::ptr::addr_eq(lhs, rhs)
    }
}

impl<T, const N: usize> Eq for StackAllocator<'_, T, N> {}

impl<'a, T, const N: usize> Allocator<T> for StackAllocator<'a, T, N> {
    type Rebind<U> = StackAllocator<'a, U, N>;

    fn allocate(&self, n: usize) -> Result<Block, AllocError> {
        let layout = array_layout::<T>(n)?;
        self.storage.get_memory(layout.size(), layout.align())
    }

    fn deallocate(&self, block: Block) {
        self.storage.release(block);
    }

    fn rebind<U>(&self) -> StackAllocator<'a, U, N> {
        StackAllocator::new(self.storage)
    }
}
