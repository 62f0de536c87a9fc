//! Stack allocator: bump allocation with partial-LIFO reclaim
//!
//! # Safety
//!
//! This module implements the allocator handle over a shared
//! [`StackBuffer`]:
//! - allocations are served by advancing the buffer cursor by the
//!   rounded request size; the cursor is the only mutable state
//! - deallocation reclaims memory only for the trailing (most recently
//!   allocated, not yet freed) block; any other in-buffer free is a
//!   deliberate no-op
//! - requests the buffer cannot satisfy delegate to the embedded
//!   fallback allocator, whose pointers always lie outside the buffer
//!   range, so deallocation routes on containment alone
//!
//! ## Invariants
//!
//! - the cursor is always a multiple of the buffer alignment, so every
//!   bump pointer satisfies any request alignment up to the buffer's
//! - the cursor stays within `0..=N`; a violation indicates memory
//!   corruption elsewhere and is debug-asserted, not surfaced as an
//!   error
//! - rounded sizes are computed identically in `allocate` and
//!   `deallocate`, which is what makes trailing-block detection by
//!   address adjacency sound

use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

#[cfg(feature = "logging")]
use tracing::trace;

use crate::align::{Alignment, MaxAlign};
use crate::buffer::StackBuffer;
use crate::utils::align_up;

use super::{AllocResult, MemoryUsage, RawAllocator, SystemAllocator};

/// A lightweight, copyable allocator handle over a shared [`StackBuffer`].
///
/// Satisfies allocations by bumping the buffer cursor; when the buffer
/// cannot serve a request (exhausted, or the request needs stricter
/// alignment than the buffer provides), the embedded fallback allocator
/// takes over transparently. Deallocation routes on pointer containment:
/// in-buffer pointers attempt a trailing reclaim, everything else goes to
/// the fallback.
///
/// Handles are cheap to copy and many may share one buffer; two handles
/// compare equal iff they reference the same buffer, regardless of
/// fallback state. The lifetime parameter ties every handle to the
/// buffer's scope.
///
/// Single-threaded: the buffer is `!Sync`, so handles sharing it cannot
/// cross threads.
#[derive(Clone, Copy)]
pub struct StackAllocator<'buf, const N: usize, A: Alignment = MaxAlign, F = SystemAllocator> {
    buffer: &'buf StackBuffer<N, A>,
    fallback: F,
}

impl<'buf, const N: usize, A: Alignment> StackAllocator<'buf, N, A, SystemAllocator> {
    /// Creates a handle over `buffer` with the system allocator as
    /// fallback.
    #[inline]
    pub const fn new(buffer: &'buf StackBuffer<N, A>) -> Self {
        StackAllocator {
            buffer,
            fallback: SystemAllocator::new(),
        }
    }
}

impl<'buf, const N: usize, A: Alignment, F> StackAllocator<'buf, N, A, F> {
    /// Creates a handle over `buffer` with an explicit fallback
    /// allocator instance.
    #[inline]
    pub const fn with_fallback(buffer: &'buf StackBuffer<N, A>, fallback: F) -> Self {
        StackAllocator { buffer, fallback }
    }

    /// The shared buffer this handle allocates from.
    #[inline]
    pub fn buffer(&self) -> &'buf StackBuffer<N, A> {
        self.buffer
    }

    /// The embedded fallback allocator.
    #[inline]
    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Checks whether a pointer lies within the buffer's byte range.
    ///
    /// The end boundary is inclusive to admit a zero-length trailing
    /// pointer. Fallback allocations always test negative.
    #[inline]
    pub fn contains(&self, ptr: *const u8) -> bool {
        let base = self.buffer.base() as usize;
        let addr = ptr as usize;
        base <= addr && addr <= base + N
    }

    /// Attempts a bump allocation; `None` sends the request to the
    /// fallback path.
    fn try_bump(&self, layout: Layout) -> Option<NonNull<u8>> {
        let cursor = self.buffer.cursor();
        debug_assert!(cursor <= N, "cursor outside buffer range");

        // The buffer only guarantees its own alignment; stricter
        // requests must come from the fallback to stay correctly
        // aligned.
        if layout.align() > A::ALIGN {
            return None;
        }

        let rounded = align_up(layout.size(), A::ALIGN);
        if N - cursor < rounded {
            return None;
        }

        // SAFETY: cursor <= N (asserted above), so base + cursor stays
        // within the storage allocation (or one past its end for a
        // zero-capacity remainder, which is allowed).
        let ptr = unsafe { self.buffer.base().add(cursor) };
        self.buffer.set_cursor(cursor + rounded);

        // ptr is derived from the buffer's storage and is never null.
        NonNull::new(ptr)
    }
}

// SAFETY: bump pointers are exclusive (the cursor advances past each
// allocation and only rewinds when the trailing block is freed), aligned
// (cursor is a multiple of the buffer alignment, which bounds the
// request alignment), and in-bounds; everything else delegates to the
// fallback's own contract.
unsafe impl<const N: usize, A: Alignment, F: RawAllocator> RawAllocator
    for StackAllocator<'_, N, A, F>
{
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        if let Some(ptr) = self.try_bump(layout) {
            return Ok(NonNull::slice_from_raw_parts(ptr, layout.size()));
        }

        #[cfg(feature = "logging")]
        trace!(
            size = layout.size(),
            align = layout.align(),
            remaining = self.buffer.remaining(),
            "buffer cannot serve request, delegating to fallback"
        );

        // SAFETY: same contract as ours; the failure, if any, propagates
        // unchanged.
        unsafe { self.fallback.allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if self.contains(ptr.as_ptr()) {
            let cursor = self.buffer.cursor();
            debug_assert!(cursor <= N, "cursor outside buffer range");

            let offset = ptr.as_ptr() as usize - self.buffer.base() as usize;
            let rounded = align_up(layout.size(), A::ALIGN);

            // Trailing block: reclaim by rewinding the cursor. Anything
            // else is an out-of-order free and the bytes stay abandoned
            // until the trailing rule reaches them or the buffer resets.
            if offset + rounded == cursor {
                self.buffer.set_cursor(offset);
            }
            return;
        }

        #[cfg(feature = "logging")]
        trace!(
            size = layout.size(),
            align = layout.align(),
            "pointer outside buffer, delegating deallocation to fallback"
        );

        // SAFETY: ptr is not in the buffer, so it was produced by the
        // fallback with this layout (caller contract).
        unsafe { self.fallback.deallocate(ptr, layout) };
    }

    fn max_allocation_size() -> usize {
        // The buffer's small fixed capacity is deliberately not
        // reported; the limit is the fallback's.
        F::max_allocation_size()
    }
}

/// Equality is buffer identity: containers use it to decide whether
/// memory from one handle may be deallocated through another, and any
/// two handles over the same buffer are interchangeable for that
/// purpose, independent of fallback state.
impl<const N: usize, A: Alignment, F> PartialEq for StackAllocator<'_, N, A, F> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.buffer, other.buffer)
    }
}

impl<const N: usize, A: Alignment, F> Eq for StackAllocator<'_, N, A, F> {}

impl<const N: usize, A: Alignment, F> fmt::Debug for StackAllocator<'_, N, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackAllocator")
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

impl<const N: usize, A: Alignment, F> MemoryUsage for StackAllocator<'_, N, A, F> {
    fn used_memory(&self) -> usize {
        self.buffer.used()
    }

    fn available_memory(&self) -> Option<usize> {
        Some(self.buffer.remaining())
    }

    fn total_memory(&self) -> Option<usize> {
        Some(N)
    }
}
