//! Growable bump arena backed by bumpalo.
//!
//! Unlike [`StackStorage`](crate::StackStorage), a bump arena never reclaims
//! individual blocks: memory comes back only on [`BumpArena::reset`]. An
//! optional byte limit turns it into a bounded arena.

use std::fmt;
use std::marker::PhantomData;

use bumpalo::Bump;

use crate::allocator::{array_layout, Allocator, Block};
use crate::error::AllocError;

/// Bump arena for containers whose nodes all die together.
pub struct BumpArena {
    bump: Bump,
}

impl BumpArena {
    /// Create an unbounded arena.
    #[must_use]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena with the given initial capacity in bytes.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Create an arena that refuses to grow past `bytes`.
    #[must_use]
    pub fn with_limit(bytes: usize) -> Self {
        let bump = Bump::new();
        bump.set_allocation_limit(Some(bytes));
        Self { bump }
    }

    /// An allocator handle for element type `T`.
    #[must_use]
    pub fn allocator<T>(&self) -> BumpAllocator<'_, T> {
        BumpAllocator {
            arena: self,
            _marker: PhantomData,
        }
    }

    /// Drop every block. Requires `&mut` so no container still borrows it.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Bytes held in bumpalo chunks, including unused chunk tails.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for BumpArena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BumpArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BumpArena")
            .field("allocated_bytes", &self.allocated_bytes())
            .field("limit", &self.bump.allocation_limit())
            .finish()
    }
}

/// Allocator handle over a shared [`BumpArena`].
pub struct BumpAllocator<'a, T> {
    arena: &'a BumpArena,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> BumpAllocator<'a, T> {
    /// The arena this handle draws from.
    #[must_use]
    pub fn arena(&self) -> &'a BumpArena {
        self.arena
    }
}

impl<T> Clone for BumpAllocator<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BumpAllocator<'_, T> {}

impl<T> fmt::Debug for BumpAllocator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BumpAllocator")
            .field(&std::ptr::from_ref(self.arena))
            .finish()
    }
}

impl<'b, T, U> PartialEq<BumpAllocator<'b, U>> for BumpAllocator<'_, T> {
    fn eq(&self, other: &BumpAllocator<'b, U>) -> bool {
        std::ptr::eq(self.arena, other.arena)
    }
}

impl<T> Eq for BumpAllocator<'_, T> {}

impl<'a, T> Allocator<T> for BumpAllocator<'a, T> {
    type Rebind<U> = BumpAllocator<'a, U>;

    fn allocate(&self, n: usize) -> Result<Block, AllocError> {
        let layout = array_layout::<T>(n)?;
        match self.arena.bump.try_alloc_layout(layout) {
            Ok(ptr) => Ok(Block {
                offset: ptr.as_ptr() as usize,
                size: layout.size(),
                align: layout.align(),
            }),
            Err(_) => {
                let allocated = self.arena.allocated_bytes();
                tracing::debug!(requested = layout.size(), allocated, "bump arena limit reached");
                Err(AllocError::LimitReached {
                    requested: layout.size(),
                    allocated,
                })
            }
        }
    }

    fn deallocate(&self, _block: Block) {
        // Reclaimed wholesale by `BumpArena::reset`
    }

    fn rebind<U>(&self) -> BumpAllocator<'a, U> {
        self.arena.allocator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_makes_room_under_limit() {
        let mut arena = BumpArena::with_limit(1 << 16);
        arena.allocator::<u8>().allocate(48_000).unwrap();
        assert!(arena.allocated_bytes() >= 48_000);
        assert!(arena.allocator::<u8>().allocate(48_000).is_err());
        arena.reset();
        assert!(arena.allocator::<u8>().allocate(48_000).is_ok());
    }

    #[test]
    fn default_creates_empty_arena() {
        assert_eq!(BumpArena::default().allocated_bytes(), 0);
    }

    #[test]
    fn blocks_are_distinct_and_aligned() {
        let arena = BumpArena::with_capacity(4096);
        let alloc = arena.allocator::<u64>();
        let a = alloc.allocate(1).unwrap();
        let b = alloc.allocate(1).unwrap();
        assert_ne!(a.offset, b.offset);
        assert_eq!(a.offset % std::mem::align_of::<u64>(), 0);
        assert_eq!(b.offset % std::mem::align_of::<u64>(), 0);
    }

    #[test]
    fn limit_is_enforced() {
        let arena = BumpArena::with_limit(1024);
        let alloc = arena.allocator::<u8>();
        let err = alloc.allocate(1 << 20).unwrap_err();
        assert!(matches!(err, AllocError::LimitReached { requested, .. } if requested == 1 << 20));
    }

    #[test]
    fn handles_on_same_arena_compare_equal() {
        let arena = BumpArena::new();
        let other = BumpArena::new();
        let a = arena.allocator::<u8>();
        let b: BumpAllocator<'_, String> = a.rebind();
        assert_eq!(a, b);
        assert_ne!(a, other.allocator::<u8>());
    }
}
