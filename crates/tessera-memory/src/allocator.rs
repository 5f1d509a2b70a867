//! Allocator capability trait and the default heap implementation.

use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;

use crate::error::AllocError;

/// A reserved byte range in an allocator's address space.
///
/// For arena allocators `offset` is relative to the arena base; for the bump
/// allocator it is the address handed out by the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Start of the range.
    pub offset: usize,
    /// Length in bytes.
    pub size: usize,
    /// Alignment the range satisfies.
    pub align: usize,
}

impl Block {
    /// One past the last byte of the range.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Capability interface through which containers obtain node memory.
///
/// Containers reserve a [`Block`] before storing a value, place the value with
/// [`construct`](Allocator::construct), and hand the block back after
/// [`destroy`](Allocator::destroy). Allocators are cheap handles: clones refer
/// to the same underlying resource.
pub trait Allocator<T>: Clone {
    /// The same allocator viewed for another element type.
    type Rebind<U>: Allocator<U>;

    /// Whether copy assignment of a container also copies the source allocator.
    const PROPAGATE_ON_COPY_ASSIGNMENT: bool = false;

    /// Reserve room for `n` values of `T`.
    fn allocate(&self, n: usize) -> Result<Block, AllocError>;

    /// Return a block obtained from [`allocate`](Allocator::allocate).
    fn deallocate(&self, block: Block);

    /// Store `value` into an empty slot.
    fn construct(&self, slot: &mut Option<T>, value: T) {
        debug_assert!(slot.is_none(), "constructing into an occupied slot");
        *slot = Some(value);
    }

    /// Move the value out of a slot, leaving it empty.
    fn destroy(&self, slot: &mut Option<T>) -> Option<T> {
        slot.take()
    }

    /// View this allocator for element type `U`.
    fn rebind<U>(&self) -> Self::Rebind<U>;

    /// Allocator a copy-constructed container should use.
    #[must_use]
    fn select_on_container_copy(&self) -> Self {
        self.clone()
    }
}

/// Layout of `n` consecutive values of `T`.
pub fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow { count: n })
}

/// Stateless allocator backed by the global heap.
///
/// Every request succeeds and all instances compare equal. The heap has no
/// addressable arena, so blocks carry only their layout and a zero offset.
pub struct HeapAllocator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> HeapAllocator<T> {
    /// Create a heap allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for HeapAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for HeapAllocator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for HeapAllocator<T> {}

impl<T> fmt::Debug for HeapAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HeapAllocator")
    }
}

impl<T, U> PartialEq<HeapAllocator<U>> for HeapAllocator<T> {
    fn eq(&self, _other: &HeapAllocator<U>) -> bool {
        true
    }
}

impl<T> Eq for HeapAllocator<T> {}

impl<T> Allocator<T> for HeapAllocator<T> {
    type Rebind<U> = HeapAllocator<U>;

    fn allocate(&self, n: usize) -> Result<Block, AllocError> {
        let layout = array_layout::<T>(n)?;
        Ok(Block {
            offset: 0,
            size: layout.size(),
            align: layout.align(),
        })
    }

    fn deallocate(&self, _block: Block) {
        // Storage lives in the container's slab
    }

    fn rebind<U>(&self) -> HeapAllocator<U> {
        HeapAllocator::new()
    }
}
