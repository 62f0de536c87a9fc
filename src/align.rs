//! Type-level alignment selection
//!
//! A buffer's alignment is part of its type: each marker type here is a
//! zero-sized `#[repr(align(n))]` struct, and embedding it as a `[A; 0]`
//! field forces the surrounding storage to inherit the alignment without
//! occupying any space.

mod sealed {
    pub trait Sealed {}
}

/// Type-level power-of-two alignment.
///
/// Sealed: implemented only by the `Align*` marker types in this module,
/// so `ALIGN` is always a power of two matching the type's layout.
///
/// # Safety
///
/// `ALIGN` must equal `core::mem::align_of::<Self>()`; buffer bounds and
/// pointer arithmetic rely on it.
pub unsafe trait Alignment: sealed::Sealed + Copy + 'static {
    /// Alignment in bytes
    const ALIGN: usize;
}

macro_rules! alignment_marker {
    ($($(#[$meta:meta])* $name:ident => $align:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            #[repr(align($align))]
            pub struct $name;

            impl sealed::Sealed for $name {}

            // SAFETY: repr(align) above matches ALIGN.
            unsafe impl Alignment for $name {
                const ALIGN: usize = $align;
            }
        )*
    };
}

alignment_marker! {
    /// 1-byte alignment
    Align1 => 1,
    /// 2-byte alignment
    Align2 => 2,
    /// 4-byte alignment
    Align4 => 4,
    /// 8-byte alignment
    Align8 => 8,
    /// 16-byte alignment
    Align16 => 16,
    /// 32-byte alignment
    Align32 => 32,
    /// 64-byte (cache line) alignment
    Align64 => 64,
}

/// Default buffer alignment, suitable for any fundamental type
/// (the `max_align_t` analogue).
pub type MaxAlign = Align16;
