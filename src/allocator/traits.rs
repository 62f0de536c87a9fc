//! Allocator contract
//!
//! # Safety
//!
//! [`RawAllocator`] is the seam between containers and allocation
//! strategies. Implementors must uphold:
//! - returned pointers are valid, exclusive, and aligned per the layout
//! - deallocation only accepts pointers previously returned by the same
//!   logical allocator, with the original layout

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocResult;

/// Raw storage allocation contract.
///
/// The contract covers raw storage only; object construction and
/// destruction are the caller's concern (`ptr::write` /
/// `drop_in_place`).
///
/// # Safety
///
/// Implementors must ensure that:
/// - Returned pointers are valid for reads and writes of `layout.size()`
///   bytes and aligned to `layout.align()`
/// - Distinct live allocations never overlap
/// - `deallocate` is only defined for pointers this allocator returned,
///   with the layout used at allocation time
pub unsafe trait RawAllocator {
    /// Allocates memory for the given layout.
    ///
    /// # Safety
    /// - The returned memory is uninitialized and must be initialized
    ///   before reading
    /// - The pointer must not outlive the allocator's backing storage
    ///
    /// # Errors
    /// Returns an error if the memory cannot be provided; the error is
    /// propagated unchanged from whatever strategy failed.
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>>;

    /// Deallocates memory at the given pointer.
    ///
    /// # Safety
    /// - `ptr` must have been returned by this allocator
    /// - `layout` must match the original allocation layout exactly
    /// - `ptr` must not be used after this call
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Maximum allocation size this allocator supports, in bytes.
    fn max_allocation_size() -> usize {
        isize::MAX as usize
    }
}

/// Memory usage introspection for bounded allocators.
pub trait MemoryUsage {
    /// Bytes currently allocated.
    fn used_memory(&self) -> usize;

    /// Bytes still available, if the allocator is bounded.
    fn available_memory(&self) -> Option<usize>;

    /// Total capacity, if the allocator is bounded.
    fn total_memory(&self) -> Option<usize> {
        self.available_memory()
            .map(|available| self.used_memory() + available)
    }
}

// SAFETY: forwards every call to the underlying allocator; the contract
// is preserved through delegation.
unsafe impl<T: RawAllocator + ?Sized> RawAllocator for &T {
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        // SAFETY: same contract as T::allocate.
        unsafe { (**self).allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: same contract as T::deallocate.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    fn max_allocation_size() -> usize {
        T::max_allocation_size()
    }
}

impl<T: MemoryUsage + ?Sized> MemoryUsage for &T {
    fn used_memory(&self) -> usize {
        (**self).used_memory()
    }

    fn available_memory(&self) -> Option<usize> {
        (**self).available_memory()
    }

    fn total_memory(&self) -> Option<usize> {
        (**self).total_memory()
    }
}
