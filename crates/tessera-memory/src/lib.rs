//! # tessera-memory
//!
//! Memory capabilities for the Tessera containers.
//!
//! Provides the [`Allocator`] trait containers are generic over, a stateless
//! [`HeapAllocator`], the fixed-capacity [`StackStorage`] arena with its
//! [`StackAllocator`] handle, and a growable bumpalo-backed [`BumpArena`].
#![warn(missing_docs)]

pub mod allocator;
pub mod bump;
pub mod error;
pub mod stack;
pub mod stats;

pub use allocator::{array_layout, Allocator, Block, HeapAllocator};
pub use bump::{BumpAllocator, BumpArena};
pub use error::AllocError;
pub use stack::{StackAllocator, StackStorage};
pub use stats::{ArenaCounters, ArenaStats};
