//! Last-operation flags and error types.
//!
//! Every container records the outcome of its most recent operation in a
//! [`Flag`]. Fallible operations also report failure through their return
//! value: rejected inserts hand the value back in [`Full`] or [`Rejected`],
//! everything else uses [`CollectionError`].

use core::fmt;

/// Outcome of the most recently completed operation on a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flag {
    /// The operation succeeded.
    #[default]
    Ok,
    /// Invalid argument, invalid configuration, or allocation failure.
    Error,
    /// A read or removal was attempted on an empty container.
    Empty,
    /// An insert was attempted on a fixed-capacity container at capacity.
    Full,
}

impl Flag {
    /// Returns `true` for [`Flag::Ok`].
    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, Flag::Ok)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flag::Ok => "ok",
            Flag::Error => "error",
            Flag::Empty => "empty",
            Flag::Full => "full",
        };
        f.write_str(name)
    }
}

/// Error returned when a fixed-capacity container is full.
///
/// Carries the rejected value so the caller can recover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Error returned when a growable container cannot make room for a value.
///
/// Carries the value back alongside the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected<T> {
    /// Why the insert failed.
    pub error: CollectionError,
    /// The value that could not be inserted.
    pub value: T,
}

impl<T> Rejected<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert rejected: {}", self.error)
    }
}

impl<T: fmt::Debug> std::error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Errors reported by constructors and non-insert operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// The value policy does not define a compare function.
    #[error("value policy has no compare function")]
    MissingCompare,
    /// `copy_of` was called on a container whose policy has no duplicate
    /// function.
    #[error("value policy has no duplicate function")]
    MissingDuplicate,
    /// Capacity is zero.
    #[error("capacity cannot be zero")]
    ZeroCapacity,
    /// `capacity * size_of::<slot>()` does not fit in `isize`.
    #[error("capacity {capacity} overflows the buffer size computation")]
    CapacityOverflow {
        /// The requested capacity.
        capacity: usize,
    },
    /// The allocator could not provide the buffer.
    #[error("memory allocation failed")]
    AllocationFailed,
    /// Raw heap ordering discriminant is neither min (-1) nor max (1).
    #[error("invalid heap ordering discriminant {0}")]
    InvalidOrder(i32),
    /// The container holds no elements.
    #[error("container is empty")]
    Empty,
    /// Index does not address a live element.
    #[error("index {index} out of range for count {count}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements.
        count: usize,
    },
    /// A resize would drop live elements.
    #[error("capacity {capacity} is below the current count {count}")]
    CapacityBelowCount {
        /// The requested capacity.
        capacity: usize,
        /// Number of live elements.
        count: usize,
    },
}

impl CollectionError {
    /// The flag a container records when it reports this error.
    pub const fn flag(&self) -> Flag {
        match self {
            CollectionError::Empty => Flag::Empty,
            CollectionError::MissingCompare
            | CollectionError::MissingDuplicate
            | CollectionError::ZeroCapacity
            | CollectionError::CapacityOverflow { .. }
            | CollectionError::AllocationFailed
            | CollectionError::InvalidOrder(_)
            | CollectionError::OutOfRange { .. }
            | CollectionError::CapacityBelowCount { .. } => Flag::Error,
        }
    }
}
