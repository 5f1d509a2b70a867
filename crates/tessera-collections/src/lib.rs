//! # tessera-collections
//!
//! Containers for the Tessera workspace.
//!
//! [`Deque`] is a double-ended queue over fixed 16-slot blocks with O(1)
//! indexing and amortized O(1) pushes at both ends. [`List`] is a doubly
//! linked list that reserves each node through a
//! [`tessera_memory::Allocator`], so it can run on the heap, inside a
//! fixed-size stack arena, or in a bump arena.
#![warn(missing_docs)]

pub mod deque;
pub mod error;
pub mod list;

pub use deque::Deque;
pub use error::{BoxError, ContainerError, PushError};
pub use list::{List, Position};
