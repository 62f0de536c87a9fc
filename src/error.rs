//! Allocation error type
//!
//! The allocator itself has no recoverable-error taxonomy: an in-buffer
//! hit and a fallback hit are both successes. Errors surface only when
//! the fallback allocator cannot satisfy a request or when a layout
//! cannot be formed; they propagate unchanged, without wrapping.

use core::alloc::Layout;

/// Error returned when an allocation request cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The delegate allocator could not provide the requested memory.
    #[error("allocation of {size} bytes with alignment {align} failed")]
    AllocationFailed {
        /// Requested size in bytes
        size: usize,
        /// Requested alignment in bytes
        align: usize,
    },

    /// A size computation overflowed (e.g. element count times element
    /// size exceeds the address space).
    #[error("allocation size calculation overflowed")]
    SizeOverflow,

    /// Layout parameters were invalid.
    #[error("invalid layout: {reason}")]
    InvalidLayout {
        /// What made the layout invalid
        reason: &'static str,
    },
}

impl AllocError {
    /// Creates an error for a failed allocation of the given size and alignment.
    pub fn allocation_failed(size: usize, align: usize) -> Self {
        AllocError::AllocationFailed { size, align }
    }

    /// Creates an error for a failed allocation described by a [`Layout`].
    pub fn allocation_failed_with_layout(layout: Layout) -> Self {
        AllocError::AllocationFailed {
            size: layout.size(),
            align: layout.align(),
        }
    }

    /// Creates a size-overflow error.
    pub fn size_overflow() -> Self {
        AllocError::SizeOverflow
    }

    /// Creates an invalid-layout error.
    pub fn invalid_layout(reason: &'static str) -> Self {
        AllocError::InvalidLayout { reason }
    }

    /// Checks if this is an allocation failure (out of memory).
    pub fn is_allocation_failed(&self) -> bool {
        matches!(self, AllocError::AllocationFailed { .. })
    }

    /// Checks if this is a size overflow error.
    pub fn is_size_overflow(&self) -> bool {
        matches!(self, AllocError::SizeOverflow)
    }

    /// Checks if this is an invalid layout error.
    pub fn is_invalid_layout(&self) -> bool {
        matches!(self, AllocError::InvalidLayout { .. })
    }
}

/// Result type for allocation operations
pub type AllocResult<T> = Result<T, AllocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_match_predicates() {
        assert!(AllocError::allocation_failed(64, 8).is_allocation_failed());
        assert!(AllocError::size_overflow().is_size_overflow());
        assert!(AllocError::invalid_layout("bad alignment").is_invalid_layout());
    }

    #[test]
    fn layout_constructor_preserves_parameters() {
        let layout = Layout::from_size_align(128, 16).unwrap();
        let err = AllocError::allocation_failed_with_layout(layout);
        assert_eq!(
            err,
            AllocError::AllocationFailed {
                size: 128,
                align: 16
            }
        );
    }

    #[test]
    fn display_mentions_size_and_alignment() {
        let err = AllocError::allocation_failed(64, 8);
        let msg = err.to_string();
        assert!(msg.contains("64"));
        assert!(msg.contains("8"));
    }
}
