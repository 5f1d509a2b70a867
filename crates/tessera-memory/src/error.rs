//! Allocation failures.

/// Error returned when an allocator cannot satisfy a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// A fixed-size arena has no room left for the request.
    #[error(
        "arena exhausted: requested {requested} bytes aligned to {align}, \
         {available} of {capacity} bytes left"
    )]
    Exhausted {
        /// Requested size in bytes.
        requested: usize,
        /// Requested alignment in bytes.
        align: usize,
        /// Bytes left before the request (alignment padding not subtracted).
        available: usize,
        /// Total arena capacity in bytes.
        capacity: usize,
    },

    /// A growable arena hit its configured allocation limit.
    #[error("allocation limit reached: requested {requested} bytes with {allocated} bytes already allocated")]
    LimitReached {
        /// Requested size in bytes.
        requested: usize,
        /// Bytes the arena held when the request failed.
        allocated: usize,
    },

    /// The requested alignment is not a power of two.
    #[error("invalid alignment {align}: must be a power of two")]
    InvalidAlignment {
        /// Requested alignment in bytes.
        align: usize,
    },

    /// The byte size of the request does not fit in `usize`.
    #[error("allocation of {count} elements overflows the address space")]
    CapacityOverflow {
        /// Requested element count.
        count: usize,
    },
}
