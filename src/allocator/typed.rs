//! Element-typed allocator surface
//!
//! Containers allocate in element counts, not byte layouts, and their
//! internals often need auxiliary node types drawn from the same arena.
//! [`TypedStackAllocator`] wraps a [`StackAllocator`] with an element
//! type: count-based allocate/deallocate, a `rebind` operation deriving
//! a same-buffer allocator for another element type, and buffer-identity
//! equality across element types.

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::align::{Alignment, MaxAlign};
use crate::buffer::StackBuffer;

use super::{AllocError, AllocResult, RawAllocator, StackAllocator, SystemAllocator};

/// An element-typed handle over a shared [`StackBuffer`].
///
/// All byte-size computation (`n × size_of::<T>()`, rounded to the
/// buffer alignment) happens here; routing and reclaim are the raw
/// handle's. Rebound handles share the buffer, so a container's node
/// allocations draw from the same arena as its element allocations.
pub struct TypedStackAllocator<
    'buf,
    T,
    const N: usize,
    A: Alignment = MaxAlign,
    F = SystemAllocator,
> {
    raw: StackAllocator<'buf, N, A, F>,
    _element: PhantomData<fn() -> T>,
}

impl<'buf, T, const N: usize, A: Alignment> TypedStackAllocator<'buf, T, N, A, SystemAllocator> {
    /// Creates a typed handle over `buffer` with the system allocator as
    /// fallback.
    #[inline]
    pub const fn new(buffer: &'buf StackBuffer<N, A>) -> Self {
        TypedStackAllocator {
            raw: StackAllocator::new(buffer),
            _element: PhantomData,
        }
    }
}

impl<'buf, T, const N: usize, A: Alignment, F> TypedStackAllocator<'buf, T, N, A, F> {
    /// Creates a typed handle with an explicit fallback allocator
    /// instance.
    #[inline]
    pub const fn with_fallback(buffer: &'buf StackBuffer<N, A>, fallback: F) -> Self {
        TypedStackAllocator {
            raw: StackAllocator::with_fallback(buffer, fallback),
            _element: PhantomData,
        }
    }

    /// Wraps an existing raw handle.
    #[inline]
    pub const fn from_raw(raw: StackAllocator<'buf, N, A, F>) -> Self {
        TypedStackAllocator {
            raw,
            _element: PhantomData,
        }
    }

    /// The underlying raw handle.
    #[inline]
    pub fn as_raw(&self) -> &StackAllocator<'buf, N, A, F> {
        &self.raw
    }

    /// Checks whether an element pointer lies within the buffer's range.
    #[inline]
    pub fn contains(&self, ptr: *const T) -> bool {
        self.raw.contains(ptr.cast())
    }

    /// Derives an allocator for element type `U` over the same buffer.
    ///
    /// The buffer reference is shared (the two handles compare equal)
    /// and the fallback state is copied.
    #[inline]
    pub fn rebind<U>(&self) -> TypedStackAllocator<'buf, U, N, A, F>
    where
        F: Clone,
    {
        TypedStackAllocator {
            raw: StackAllocator::with_fallback(self.raw.buffer(), self.raw.fallback().clone()),
            _element: PhantomData,
        }
    }
}

impl<'buf, T, const N: usize, A: Alignment, F: RawAllocator>
    TypedStackAllocator<'buf, T, N, A, F>
{
    /// Allocates storage for `n` elements of `T`.
    ///
    /// # Safety
    /// - The memory is uninitialized; every element must be written
    ///   before it is read
    /// - The pointer must be released with [`deallocate`](Self::deallocate)
    ///   passing the same count
    ///
    /// # Errors
    /// `SizeOverflow` if `n × size_of::<T>()` overflows; otherwise any
    /// fallback failure, propagated unchanged.
    pub unsafe fn allocate(&self, n: usize) -> AllocResult<NonNull<T>> {
        let layout = Layout::array::<T>(n).map_err(|_| AllocError::size_overflow())?;
        // SAFETY: layout is valid (constructed above); contract forwarded
        // to the caller.
        let bytes = unsafe { self.raw.allocate(layout)? };
        Ok(bytes.cast())
    }

    /// Deallocates storage for `n` elements of `T`.
    ///
    /// An in-buffer pointer reclaims its bytes only if it is the
    /// trailing block; element destructors are the caller's concern and
    /// must have run already.
    ///
    /// # Safety
    /// - `ptr` must have been returned by [`allocate`](Self::allocate)
    ///   on a handle equal to this one, with the same count `n`
    /// - `ptr` must not be used after this call
    pub unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        let layout = Layout::array::<T>(n).expect("layout must be valid for deallocation");
        // SAFETY: ptr and layout match the original allocation (caller
        // contract).
        unsafe { self.raw.deallocate(ptr.cast(), layout) };
    }

    /// Largest element count a single allocation may request.
    ///
    /// Delegates to the fallback allocator's limit; the buffer's own
    /// small fixed capacity is not separately reported.
    pub fn max_size(&self) -> usize {
        F::max_allocation_size() / size_of::<T>().max(1)
    }
}

impl<T, const N: usize, A: Alignment, F: Clone> Clone for TypedStackAllocator<'_, T, N, A, F> {
    fn clone(&self) -> Self {
        TypedStackAllocator {
            raw: self.raw.clone(),
            _element: PhantomData,
        }
    }
}

impl<T, const N: usize, A: Alignment, F: Copy> Copy for TypedStackAllocator<'_, T, N, A, F> {}

impl<T, const N: usize, A: Alignment, F> fmt::Debug for TypedStackAllocator<'_, T, N, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedStackAllocator")
            .field("buffer", &self.raw.buffer())
            .field("element_size", &size_of::<T>())
            .finish_non_exhaustive()
    }
}

/// Equality across element types: two typed handles are interchangeable
/// for deallocation purposes iff they share one buffer.
impl<T, U, const N: usize, A: Alignment, F>
    PartialEq<TypedStackAllocator<'_, U, N, A, F>> for TypedStackAllocator<'_, T, N, A, F>
{
    fn eq(&self, other: &TypedStackAllocator<'_, U, N, A, F>) -> bool {
        core::ptr::eq(self.raw.buffer(), other.raw.buffer())
    }
}

impl<T, const N: usize, A: Alignment, F> Eq for TypedStackAllocator<'_, T, N, A, F> {}
