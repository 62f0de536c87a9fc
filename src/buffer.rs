//! Fixed-capacity aligned storage with a bump cursor
//!
//! [`StackBuffer`] is the leaf of the allocator pair: it owns the byte
//! region and the cursor, and performs no allocation logic of its own.
//! All request validation lives in the allocator handles.
//!
//! ## Invariants
//!
//! - `cursor` stays within `0..=N` (byte offset of the next free byte)
//! - `cursor` moves forward only on allocation, backward only on a
//!   trailing reclaim or a reset
//! - capacity `N` is a multiple of the alignment (checked at compile time)
//! - the buffer is never copied or moved while allocations are
//!   outstanding; allocator handles borrow it, so the borrow checker
//!   enforces this for safe code

use core::cell::{Cell, UnsafeCell};
use core::fmt;
use core::mem::MaybeUninit;

use crate::align::{Alignment, MaxAlign};

/// Storage carrier: the `[A; 0]` field contributes no bytes but forces
/// the array to the requested alignment.
#[repr(C)]
struct Storage<const N: usize, A> {
    _align: [A; 0],
    bytes: [MaybeUninit<u8>; N],
}

/// A fixed-size, fixed-alignment arena shared by allocator handles.
///
/// Capacity and alignment are fixed at the type level; construction takes
/// no runtime parameters and reserves no heap memory. Any number of
/// [`StackAllocator`](crate::StackAllocator) handles may reference one
/// buffer; the buffer must outlive them all, which the handle's lifetime
/// parameter enforces.
///
/// The buffer is intentionally neither `Clone` nor `Sync`: cursor state
/// and storage identity are inseparable from the addresses already handed
/// out, and the cursor is mutated without synchronization. Use one buffer
/// per thread.
///
/// # Memory layout
/// ```text
/// [base]----[alloc1]----[alloc2]----[cursor]----[free]----[base + N]
///           <------ allocated ----->           <-- available -->
/// ```
pub struct StackBuffer<const N: usize, A: Alignment = MaxAlign> {
    storage: UnsafeCell<Storage<N, A>>,
    /// Byte offset of the next free byte, in `0..=N`.
    cursor: Cell<usize>,
}

impl<const N: usize, A: Alignment> StackBuffer<N, A> {
    /// Creates an empty buffer with the cursor at the start of storage.
    ///
    /// Fails to compile (post-monomorphization) unless `N` is a multiple
    /// of the alignment.
    pub const fn new() -> Self {
        const {
            assert!(
                N % A::ALIGN == 0,
                "buffer capacity must be a multiple of its alignment"
            );
        }
        StackBuffer {
            storage: UnsafeCell::new(Storage {
                _align: [],
                bytes: [MaybeUninit::uninit(); N],
            }),
            cursor: Cell::new(0),
        }
    }

    /// Total capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Buffer alignment in bytes.
    #[inline]
    pub const fn align(&self) -> usize {
        A::ALIGN
    }

    /// Bytes currently allocated from the buffer.
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes still available for bump allocation.
    #[inline]
    pub fn remaining(&self) -> usize {
        N - self.cursor.get()
    }

    /// Pointer to the start of storage.
    ///
    /// Useful for asserting allocation offsets; reading through it is
    /// only defined for bytes that have been written.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.get().cast()
    }

    /// Rewinds the cursor to the start of storage, making the whole
    /// capacity available again.
    ///
    /// This is the in-place equivalent of dropping and re-creating the
    /// buffer, for abandoned regions left behind by non-LIFO frees.
    ///
    /// # Safety
    /// - No pointer previously handed out from this buffer may be used
    ///   after the reset; all in-buffer allocations become invalid
    ///   immediately
    pub unsafe fn reset(&self) {
        self.cursor.set(0);
    }

    /// Mutable base pointer for allocator handles.
    #[inline]
    pub(crate) fn base(&self) -> *mut u8 {
        self.storage.get().cast()
    }

    /// Current cursor offset.
    #[inline]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor.get()
    }

    /// Moves the cursor. Callers maintain the `0..=N` invariant.
    #[inline]
    pub(crate) fn set_cursor(&self, offset: usize) {
        debug_assert!(offset <= N, "cursor outside buffer range");
        self.cursor.set(offset);
    }
}

impl<const N: usize, A: Alignment> Default for StackBuffer<N, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, A: Alignment> fmt::Debug for StackBuffer<N, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackBuffer")
            .field("capacity", &N)
            .field("align", &A::ALIGN)
            .field("used", &self.cursor.get())
            .finish_non_exhaustive()
    }
}
