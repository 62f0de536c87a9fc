//! System allocator, the default fallback delegate
//!
//! Wraps the platform's global allocator behind the [`RawAllocator`]
//! contract so a [`StackAllocator`](super::StackAllocator) can embed it
//! as its fallback instance.

use core::alloc::{GlobalAlloc, Layout};
use core::ptr::NonNull;
use std::alloc::System;

use super::{AllocError, AllocResult, MemoryUsage, RawAllocator};

/// Zero-sized wrapper over the system's default allocator.
///
/// Thread-safe and freely copyable; all state lives in the platform
/// allocator. Memory it returns always lies outside any
/// [`StackBuffer`](crate::StackBuffer), which is what deallocation
/// routing relies on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemAllocator;

impl SystemAllocator {
    /// Creates a new `SystemAllocator`. Zero-cost; the type has no state.
    #[inline]
    pub const fn new() -> Self {
        SystemAllocator
    }
}

// SAFETY: delegates to the platform allocator, which returns valid,
// exclusive, properly aligned memory; zero-sized requests are served
// with a dangling pointer and never reach the platform allocator.
unsafe impl RawAllocator for SystemAllocator {
    #[inline]
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        if layout.size() == 0 {
            let ptr = NonNull::<u8>::dangling();
            return Ok(NonNull::slice_from_raw_parts(ptr, 0));
        }

        // SAFETY: layout has non-zero size (checked above).
        let ptr = unsafe { System.alloc(layout) };

        match NonNull::new(ptr) {
            Some(ptr) => Ok(NonNull::slice_from_raw_parts(ptr, layout.size())),
            None => Err(AllocError::allocation_failed_with_layout(layout)),
        }
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        // SAFETY: ptr came from System.alloc with this layout (caller
        // contract); zero-size dangling pointers returned early above.
        unsafe { System.dealloc(ptr.as_ptr(), layout) };
    }
}

impl MemoryUsage for SystemAllocator {
    fn used_memory(&self) -> usize {
        // The system allocator does not track its allocations.
        0
    }

    fn available_memory(&self) -> Option<usize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_allocation_round_trip() {
        let allocator = SystemAllocator::new();
        let layout = Layout::new::<u64>();

        unsafe {
            let ptr = allocator.allocate(layout).unwrap();
            assert_eq!(ptr.len(), layout.size());

            ptr.cast::<u64>().as_ptr().write(0xDEAD_BEEF);
            assert_eq!(*ptr.cast::<u64>().as_ptr(), 0xDEAD_BEEF);

            allocator.deallocate(ptr.cast(), layout);
        }
    }

    #[test]
    fn zero_sized_allocation_is_dangling() {
        let allocator = SystemAllocator::new();
        let layout = Layout::new::<()>();

        unsafe {
            let ptr = allocator.allocate(layout).unwrap();
            assert_eq!(ptr.len(), 0);
            // Must not crash.
            allocator.deallocate(ptr.cast(), layout);
        }
    }

    #[test]
    fn reports_no_bounds() {
        let allocator = SystemAllocator::new();
        assert_eq!(allocator.used_memory(), 0);
        assert_eq!(allocator.available_memory(), None);
        assert_eq!(allocator.total_memory(), None);
    }

    #[test]
    fn max_allocation_size_is_positive() {
        let max = SystemAllocator::max_allocation_size();
        assert!(max > 0);
        assert!(max <= isize::MAX as usize);
    }
}
