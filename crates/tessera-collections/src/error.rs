//! Container error types.

use std::fmt;

use tessera_memory::AllocError;

/// Boxed error produced by a fallible element constructor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors reported by container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// A checked access named a position past the end.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The container length at the time of the access.
        len: usize,
    },

    /// The allocator refused to hand out node memory.
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// The element constructor failed; the container is unchanged.
    #[error("element construction failed")]
    Construct(#[source] BoxError),
}

/// A push that failed to allocate, carrying the rejected value back.
#[derive(thiserror::Error)]
#[error("could not allocate a node for the pushed value")]
pub struct PushError<T> {
    value: T,
    #[source]
    error: AllocError,
}

impl<T> PushError<T> {
    pub(crate) fn new(value: T, error: AllocError) -> Self {
        Self { value, error }
    }

    /// Recover the value that was not inserted.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The allocation failure.
    pub fn error(&self) -> &AllocError {
        &self.error
    }

    /// Discard the value and keep the allocation failure.
    pub fn into_error(self) -> AllocError {
        self.error
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> From<PushError<T>> for ContainerError {
    fn from(err: PushError<T>) -> Self {
        Self::Alloc(err.error)
    }
}
